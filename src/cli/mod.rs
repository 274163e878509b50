//! Command line interface for adk_deploy.
//!
//! Flow for one invocation:
//! 1. Parse and validate flags
//! 2. Select the backend (unknown targets fail before any work is done)
//! 3. Stage the agent and render its Dockerfile
//! 4. Hand the staged directory to the backend
//!
//! The staging directory is removed on every exit path.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::deployer::config::REQUIREMENTS_FILE;
use crate::deployer::{DeploymentRequest, get_deployer};
use crate::error::{CliError, Result};
use crate::stage::{self, DockerfileOptions, StagingArea};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await?;
    Ok(0)
}

/// Runs one deployment from already-parsed arguments.
pub async fn execute(args: &Args) -> Result<()> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(args);
    let deployer = get_deployer(&args.target)?;

    let agent_dir = stage::resolve_agent_dir(&args.agent_dir)?;
    let app_name = match &args.app_name {
        Some(name) => name.clone(),
        None => stage::default_app_name(&agent_dir)?,
    };

    runtime.section(&format!(
        "Deploying '{}' to {}",
        app_name,
        deployer.display_name()
    ))?;

    let staging = StagingArea::create(args.temp_folder.as_deref(), &agent_dir)?;
    runtime.verbose_println(&format!("Staging in {}", staging.path().display()))?;

    staging.stage_agent(&agent_dir, &app_name)?;

    let dockerfile = stage::render_dockerfile(&DockerfileOptions {
        app_name: app_name.clone(),
        port: args.port,
        adk_version: args.adk_version.clone(),
        with_ui: args.with_ui,
        session_service_uri: args.session_service_uri.clone(),
        artifact_service_uri: args.artifact_service_uri.clone(),
        memory_service_uri: args.memory_service_uri.clone(),
        trace_to_cloud: args.trace_to_cloud,
        allow_origins: args.allow_origins.clone(),
        a2a: args.a2a,
        install_requirements: agent_dir.join(REQUIREMENTS_FILE).is_file(),
    })?;
    let dockerfile_path = staging.write_dockerfile(&dockerfile)?;
    runtime.verbose_println(&format!("Wrote {}", dockerfile_path.display()))?;

    let request = DeploymentRequest::new(&agent_dir, staging.path(), &args.service_name)
        .with_env_vars(args.env.clone())
        .with_passthrough_args(args.passthrough.clone())
        .with_options(args.deploy_options());

    deployer.deploy(&request, &runtime).await
}
