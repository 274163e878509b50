//! Google Cloud Run backend.
//!
//! Deploys the staged source with a single `gcloud run deploy` call. Steps:
//! 1. Resolve the project (explicit option, else the [`ProjectProvider`])
//! 2. Reject passthrough args that collide with managed flags
//! 3. Merge env vars and append the required Google variables
//! 4. Assemble the argument list and run `gcloud`

mod args;
mod conflict;
mod project;

pub use args::{CloudRunArgs, managed_args, split_labels};
pub use conflict::validate_extra_args;
pub use project::{GcloudConfig, ProjectProvider, resolve_project};

use super::config::GCLOUD;
use super::env::{add_required_env_vars, collect_env_vars};
use super::process::ToolCommand;
use super::DeploymentRequest;
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Cloud Run deployer, generic over where the default project comes from.
#[derive(Debug, Clone, Default)]
pub struct CloudRunDeployer<P = GcloudConfig> {
    provider: P,
}

impl CloudRunDeployer {
    /// Deployer reading the default project from the gcloud configuration.
    pub fn new() -> Self {
        Self {
            provider: GcloudConfig,
        }
    }
}

impl<P: ProjectProvider> CloudRunDeployer<P> {
    /// Deployer with a custom project source.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Builds the `gcloud` command without running it.
    ///
    /// # Errors
    ///
    /// - [`DeployError::Configuration`](crate::DeployError::Configuration) if no project can be resolved
    /// - [`DeployError::ArgumentConflict`](crate::DeployError::ArgumentConflict) if passthrough args collide
    /// - [`DeployError::Io`](crate::DeployError::Io) if the `.env` file cannot be read
    pub async fn prepare(
        &self,
        request: &DeploymentRequest,
        runtime: &RuntimeConfig,
    ) -> Result<ToolCommand> {
        let options = request.options();
        let project =
            resolve_project(options.project.as_deref(), &self.provider, runtime).await?;
        let region = options.region();

        validate_extra_args(request.passthrough_args(), &managed_args(region))?;

        let env_vars = collect_env_vars(request.env_vars(), request.agent_dir())?;
        let env_vars = add_required_env_vars(&env_vars, &project, region);

        let args = CloudRunArgs {
            service_name: request.service_name(),
            staging_dir: request.staging_dir(),
            project: &project,
            region,
            port: options.port,
            env_vars: &env_vars,
            verbosity: options.effective_verbosity(),
            passthrough: request.passthrough_args(),
        }
        .build();

        Ok(ToolCommand::new(GCLOUD).args(args))
    }

    /// Runs `gcloud run deploy`. A non-zero exit is returned as an error.
    pub async fn deploy(&self, request: &DeploymentRequest, runtime: &RuntimeConfig) -> Result<()> {
        let command = self.prepare(request, runtime).await?;

        runtime.progress(&format!(
            "Deploying service '{}' to Cloud Run...",
            request.service_name()
        ))?;
        command.run(runtime).await?;

        runtime.success(&format!(
            "Service '{}' deployed to Cloud Run",
            request.service_name()
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deployer::{DeployOptions, Verbosity};
    use crate::error::DeployError;
    use tempfile::TempDir;

    struct StaticProject(&'static str);

    impl ProjectProvider for StaticProject {
        async fn default_project(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn request(agent_dir: &TempDir) -> DeploymentRequest {
        DeploymentRequest::new(agent_dir.path(), "/tmp/stage", "svc")
    }

    #[tokio::test]
    async fn prepares_gcloud_command_with_resolved_project() {
        let agent = TempDir::new().unwrap();
        std::fs::write(agent.path().join(".env"), "C=3\n#comment\nD=4").unwrap();

        let deployer = CloudRunDeployer::with_provider(StaticProject("from-config"));
        let req = request(&agent)
            .with_env_vars(vec!["A=1".into(), "B=2".into()])
            .with_passthrough_args(vec!["--labels=team=x".into(), "--memory=1Gi".into()])
            .with_options(DeployOptions {
                port: 8080,
                log_level: Some(Verbosity::Debug),
                ..Default::default()
            });

        let command = deployer.prepare(&req, &RuntimeConfig::quiet()).await.unwrap();
        assert_eq!(command.program(), "gcloud");

        let expected: Vec<String> = [
            "run",
            "deploy",
            "svc",
            "--source",
            "/tmp/stage",
            "--project",
            "from-config",
            "--region",
            "us-central1",
            "--port",
            "8080",
            "--set-env-vars",
            "A=1,B=2,C=3,D=4,GOOGLE_CLOUD_PROJECT=from-config,GOOGLE_CLOUD_LOCATION=us-central1",
            "--verbosity",
            "debug",
            "--labels",
            "created-by=adk,team=x",
            "--memory=1Gi",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(command.arguments(), &expected[..]);
    }

    #[tokio::test]
    async fn conflicting_passthrough_is_rejected() {
        let agent = TempDir::new().unwrap();
        let deployer = CloudRunDeployer::with_provider(StaticProject("p"));
        let req = request(&agent).with_passthrough_args(vec![
            "--region=europe-west1".into(),
            "--port=9000".into(),
        ]);

        match deployer.prepare(&req, &RuntimeConfig::quiet()).await {
            Err(DeployError::ArgumentConflict { arguments }) => {
                assert_eq!(arguments, vec!["--port", "--region"]);
            }
            other => panic!("expected ArgumentConflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn region_passthrough_allowed_without_managed_region() {
        let agent = TempDir::new().unwrap();
        let deployer = CloudRunDeployer::with_provider(StaticProject("p"));
        let req = request(&agent)
            .with_passthrough_args(vec!["--region=europe-west1".into()])
            .with_options(DeployOptions {
                region: None,
                ..Default::default()
            });

        let command = deployer.prepare(&req, &RuntimeConfig::quiet()).await.unwrap();
        let args = command.arguments();
        assert_eq!(args.last().map(String::as_str), Some("--region=europe-west1"));
        assert!(args.iter().any(|a| a.ends_with("GOOGLE_CLOUD_LOCATION=")));
    }

    #[tokio::test]
    async fn empty_default_project_fails() {
        let agent = TempDir::new().unwrap();
        let deployer = CloudRunDeployer::with_provider(StaticProject(""));
        let err = deployer
            .prepare(&request(&agent), &RuntimeConfig::quiet())
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Configuration { .. }));
    }
}
