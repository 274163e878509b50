//! Cloud project resolution.

use crate::cli::RuntimeConfig;
use crate::deployer::config::GCLOUD;
use crate::deployer::process::ToolCommand;
use crate::error::{DeployError, Result};
use std::future::Future;

/// Source of the default cloud project when none is given explicitly.
pub trait ProjectProvider {
    /// Returns the active default project. May be empty when none is configured.
    fn default_project(&self) -> impl Future<Output = Result<String>>;
}

/// Reads the project from the active gcloud configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcloudConfig;

impl ProjectProvider for GcloudConfig {
    async fn default_project(&self) -> Result<String> {
        ToolCommand::new(GCLOUD)
            .args(["config", "get-value", "project"])
            .output()
            .await
    }
}

/// Uses `explicit` if non-empty, otherwise asks `provider`.
///
/// # Errors
///
/// [`DeployError::Configuration`] if the provider fails or returns nothing.
pub async fn resolve_project<P: ProjectProvider>(
    explicit: Option<&str>,
    provider: &P,
    runtime: &RuntimeConfig,
) -> Result<String> {
    if let Some(project) = explicit.filter(|p| !p.is_empty()) {
        return Ok(project.to_string());
    }

    let project = provider.default_project().await.map_err(|e| {
        DeployError::configuration(format!("Failed to get project from gcloud: {}", e))
    })?;

    if project.is_empty() {
        return Err(DeployError::configuration(
            "No project ID found in gcloud config.",
        ));
    }

    runtime.println(&format!("Using default project: {}", project))?;
    Ok(project)
}
