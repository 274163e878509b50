//! Deployment backends and their selection.
//!
//! A [`Deployer`] takes a staged build directory plus a [`DeploymentRequest`]
//! and hands it to an external tool:
//!
//! - `docker` builds an image and runs it locally
//! - `cloud_run` runs `gcloud run deploy` against the staged source
//!
//! The set of backends is closed. [`get_deployer`] is the only place a backend
//! name is mapped to an implementation.
//!
//! # Example
//!
//! ```no_run
//! use adk_deploy::deployer::{get_deployer, DeploymentRequest, DeployOptions};
//!
//! # async fn example(runtime: &adk_deploy::cli::RuntimeConfig) -> adk_deploy::Result<()> {
//! let deployer = get_deployer("docker")?;
//! let request = DeploymentRequest::new("./my_agent", "/tmp/staging", "my-agent")
//!     .with_env_vars(vec!["API_KEY=abc".into()])
//!     .with_options(DeployOptions::default());
//!
//! deployer.deploy(&request, runtime).await?;
//! # Ok(())
//! # }
//! ```

pub mod cloud_run;
pub mod config;
pub mod docker;
pub mod env;
pub mod process;

pub use cloud_run::{CloudRunDeployer, GcloudConfig, ProjectProvider};
pub use docker::DockerDeployer;

use crate::cli::RuntimeConfig;
use crate::error::{DeployError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Names accepted by [`get_deployer`].
pub const SUPPORTED_BACKENDS: &[&str] = &["docker", "cloud_run"];

/// Verbosity level forwarded to the deployment tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Verbosity {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
    /// Suppresses tool output entirely
    #[value(name = "none")]
    Silent,
}

impl Verbosity {
    /// Lowercase name as understood by `gcloud --verbosity`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Warning => "warning",
            Verbosity::Error => "error",
            Verbosity::Critical => "critical",
            Verbosity::Silent => "none",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend options with named, typed fields.
///
/// Backends read only the fields they use: `docker` needs `port`, `cloud_run`
/// reads all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Port the agent server listens on. Default: `8000`
    pub port: u16,
    /// Cloud project. Default: `None`, resolved from the active gcloud configuration
    pub project: Option<String>,
    /// Cloud region. Default: `us-central1`. `None` omits `--region` entirely
    pub region: Option<String>,
    /// Tool verbosity. Default: `info`
    pub verbosity: Verbosity,
    /// Overrides `verbosity` when set
    pub log_level: Option<Verbosity>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            port: config::DEFAULT_PORT,
            project: None,
            region: Some(config::DEFAULT_REGION.to_string()),
            verbosity: Verbosity::default(),
            log_level: None,
        }
    }
}

impl DeployOptions {
    /// Region if set and non-empty.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }

    /// Verbosity passed to the tool; `log_level` wins over `verbosity`.
    pub fn effective_verbosity(&self) -> Verbosity {
        self.log_level.unwrap_or(self.verbosity)
    }
}

/// Everything a backend needs for one deployment attempt.
///
/// Built once per invocation and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    agent_dir: PathBuf,
    staging_dir: PathBuf,
    service_name: String,
    env_vars: Vec<String>,
    passthrough_args: Vec<String>,
    options: DeployOptions,
}

impl DeploymentRequest {
    /// Creates a request with default options and no env vars or passthrough args.
    pub fn new(
        agent_dir: impl Into<PathBuf>,
        staging_dir: impl Into<PathBuf>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            agent_dir: agent_dir.into(),
            staging_dir: staging_dir.into(),
            service_name: service_name.into(),
            env_vars: Vec::new(),
            passthrough_args: Vec::new(),
            options: DeployOptions::default(),
        }
    }

    /// Sets the `KEY=VALUE` pairs given on the command line.
    pub fn with_env_vars(mut self, env_vars: Vec<String>) -> Self {
        self.env_vars = env_vars;
        self
    }

    /// Sets arguments forwarded verbatim to the deployment tool.
    pub fn with_passthrough_args(mut self, args: Vec<String>) -> Self {
        self.passthrough_args = args;
        self
    }

    /// Sets backend options.
    pub fn with_options(mut self, options: DeployOptions) -> Self {
        self.options = options;
        self
    }

    /// Original agent directory (holds the optional `.env` file).
    pub fn agent_dir(&self) -> &Path {
        &self.agent_dir
    }

    /// Staged build context handed to the external tool.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn env_vars(&self) -> &[String] {
        &self.env_vars
    }

    pub fn passthrough_args(&self) -> &[String] {
        &self.passthrough_args
    }

    pub fn options(&self) -> &DeployOptions {
        &self.options
    }
}

/// A deployment backend.
#[derive(Debug)]
pub enum Deployer {
    /// Local Docker build + run
    Docker(DockerDeployer),
    /// Google Cloud Run via `gcloud run deploy`
    CloudRun(CloudRunDeployer),
}

impl Deployer {
    /// Backend name as accepted by [`get_deployer`].
    pub fn name(&self) -> &'static str {
        match self {
            Deployer::Docker(_) => "docker",
            Deployer::CloudRun(_) => "cloud_run",
        }
    }

    /// Human-readable target name for status output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Deployer::Docker(_) => "Local Docker",
            Deployer::CloudRun(_) => "Cloud Run",
        }
    }

    /// Deploys the staged agent. Any tool failure is returned as-is.
    pub async fn deploy(&self, request: &DeploymentRequest, runtime: &RuntimeConfig) -> Result<()> {
        log::info!(
            "Deploying service '{}' with backend '{}'",
            request.service_name(),
            self.name()
        );

        match self {
            Deployer::Docker(deployer) => deployer.deploy(request, runtime).await,
            Deployer::CloudRun(deployer) => deployer.deploy(request, runtime).await,
        }
    }
}

/// Returns the deployer registered under `name`.
///
/// # Errors
///
/// [`DeployError::UnsupportedBackend`] for any name not in [`SUPPORTED_BACKENDS`].
pub fn get_deployer(name: &str) -> Result<Deployer> {
    match name {
        "docker" => Ok(Deployer::Docker(DockerDeployer::new())),
        "cloud_run" => Ok(Deployer::CloudRun(CloudRunDeployer::new())),
        other => Err(DeployError::UnsupportedBackend {
            name: other.to_string(),
        }),
    }
}
