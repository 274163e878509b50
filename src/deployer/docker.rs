//! Local Docker backend.

use super::DeploymentRequest;
use super::config::{DOCKER, IMAGE_PREFIX};
use super::env::{docker_env_args, docker_env_file_args};
use super::process::ToolCommand;
use crate::cli::RuntimeConfig;
use crate::error::Result;
use std::path::Path;

/// Builds the staged image and runs it detached on the local Docker daemon.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerDeployer;

impl DockerDeployer {
    pub fn new() -> Self {
        Self
    }

    /// Image tag for a service: `adk-python-<lowercased service name>`.
    pub fn image_name(service_name: &str) -> String {
        format!("{}{}", IMAGE_PREFIX, service_name.to_lowercase())
    }

    /// `docker build -t <image> <staging>`
    pub fn build_command(image_name: &str, staging_dir: &Path) -> ToolCommand {
        ToolCommand::new(DOCKER)
            .args(["build", "-t", image_name])
            .arg(staging_dir.display().to_string())
    }

    /// `docker run -d -p <port>:<port> [-e K=V]... [--env-file <agent>/.env] <image>`
    pub fn run_command(
        image_name: &str,
        port: u16,
        env_vars: &[String],
        agent_dir: &Path,
    ) -> ToolCommand {
        ToolCommand::new(DOCKER)
            .args(["run", "-d", "-p"])
            .arg(format!("{}:{}", port, port))
            .args(docker_env_args(env_vars))
            .args(docker_env_file_args(agent_dir))
            .arg(image_name)
    }

    pub async fn deploy(&self, request: &DeploymentRequest, runtime: &RuntimeConfig) -> Result<()> {
        let port = request.options().port;
        let image_name = Self::image_name(request.service_name());

        runtime.section("Deploying to Local Docker")?;

        if !request.passthrough_args().is_empty() {
            runtime.warn(&format!(
                "Ignoring passthrough arguments for the docker backend: {}",
                request.passthrough_args().join(" ")
            ))?;
        }

        runtime.progress(&format!("Building Docker image: {}", image_name))?;
        Self::build_command(&image_name, request.staging_dir())
            .run(runtime)
            .await?;
        runtime.success("Docker image built successfully")?;

        runtime.progress(&format!("Starting container from {}", image_name))?;
        Self::run_command(&image_name, port, request.env_vars(), request.agent_dir())
            .run(runtime)
            .await?;

        runtime.success(&format!(
            "Container running locally at http://localhost:{}",
            port
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn image_name_is_prefixed_and_lowercased() {
        assert_eq!(DockerDeployer::image_name("My-Agent"), "adk-python-my-agent");
    }

    #[test]
    fn build_command_tags_staging_dir() {
        let cmd = DockerDeployer::build_command("adk-python-svc", Path::new("/tmp/stage"));
        assert_eq!(cmd.program(), "docker");
        assert_eq!(
            cmd.arguments(),
            &strings(&["build", "-t", "adk-python-svc", "/tmp/stage"])[..]
        );
    }

    #[test]
    fn run_command_without_env_file() {
        let agent = TempDir::new().unwrap();
        let cmd = DockerDeployer::run_command(
            "adk-python-svc",
            8080,
            &strings(&["A=1", "junk"]),
            agent.path(),
        );
        assert_eq!(
            cmd.arguments(),
            &strings(&["run", "-d", "-p", "8080:8080", "-e", "A=1", "adk-python-svc"])[..]
        );
    }

    #[test]
    fn run_command_with_env_file_puts_image_last() {
        let agent = TempDir::new().unwrap();
        std::fs::write(agent.path().join(".env"), "A=1").unwrap();

        let cmd = DockerDeployer::run_command("img", 8000, &[], agent.path());
        let args = cmd.arguments();
        assert_eq!(&args[..4], &strings(&["run", "-d", "-p", "8000:8000"])[..]);
        assert_eq!(args[4], "--env-file");
        assert_eq!(args[5], agent.path().join(".env").display().to_string());
        assert_eq!(args[6], "img");
        assert_eq!(args.len(), 7);
    }
}
