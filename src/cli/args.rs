//! Command line argument parsing and validation.

use crate::deployer::config::{DEFAULT_PORT, DEFAULT_REGION, DEFAULT_SERVICE_NAME};
use crate::deployer::{DeployOptions, Verbosity};
use clap::Parser;
use std::path::PathBuf;

/// Deploy an ADK agent to local Docker or Google Cloud Run
#[derive(Parser, Debug)]
#[command(
    name = "adk_deploy",
    version,
    about = "Deploy an ADK agent to local Docker or Google Cloud Run",
    long_about = "Stages an agent directory with a generated Dockerfile and hands it to docker or gcloud.

Targets: docker, cloud_run

Usage:
  adk_deploy docker ./my_agent --service-name my-agent --env API_KEY=abc
  adk_deploy cloud_run ./my_agent --project my-project --region us-east1
  adk_deploy cloud_run ./my_agent -- --memory=1Gi --labels=team=search

Arguments after `--` are forwarded to `gcloud run deploy`. Flags the tool
sets itself (--source, --project, --region, --port, --set-env-vars,
--verbosity) cannot be overridden this way."
)]
pub struct Args {
    /// Deployment target: docker, cloud_run
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Path to the agent directory
    #[arg(value_name = "AGENT_DIR")]
    pub agent_dir: PathBuf,

    /// Service name (Cloud Run service, or Docker image suffix)
    #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// App name inside the image; defaults to the agent directory name
    #[arg(long)]
    pub app_name: Option<String>,

    /// Google Cloud project; defaults to the active gcloud configuration
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,

    /// Google Cloud region; pass an empty value to let gcloud decide
    #[arg(long, env = "GOOGLE_CLOUD_LOCATION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Port the agent server listens on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Verbosity passed to gcloud
    #[arg(long, value_enum, ignore_case = true, default_value_t = Verbosity::Info)]
    pub verbosity: Verbosity,

    /// Log level; overrides --verbosity when set
    #[arg(long, value_enum, ignore_case = true)]
    pub log_level: Option<Verbosity>,

    /// Pin the google-adk version installed in the image
    #[arg(long, value_name = "VERSION")]
    pub adk_version: Option<String>,

    /// Serve the web UI instead of the API server only
    #[arg(long)]
    pub with_ui: bool,

    /// Enable Cloud Trace telemetry
    #[arg(long)]
    pub trace_to_cloud: bool,

    /// Expose the agent over A2A
    #[arg(long)]
    pub a2a: bool,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "allow-origins", value_name = "ORIGIN")]
    pub allow_origins: Vec<String>,

    /// Session service URI
    #[arg(long, value_name = "URI")]
    pub session_service_uri: Option<String>,

    /// Artifact service URI
    #[arg(long, value_name = "URI")]
    pub artifact_service_uri: Option<String>,

    /// Memory service URI
    #[arg(long, value_name = "URI")]
    pub memory_service_uri: Option<String>,

    /// Environment variable for the deployed agent (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Staging folder to use instead of a fresh temporary directory.
    ///
    /// Its contents are deleted before and after the deployment.
    #[arg(long, value_name = "PATH")]
    pub temp_folder: Option<PathBuf>,

    /// Show extra detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Extra arguments forwarded to the deployment tool
    #[arg(last = true, value_name = "PASSTHROUGH")]
    pub passthrough: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.service_name.trim().is_empty() {
            return Err("Service name cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if let Some(app_name) = &self.app_name
            && (app_name.is_empty() || app_name.contains(['/', '\\']))
        {
            return Err(format!("Invalid app name: '{}'", app_name));
        }

        Ok(())
    }

    /// Backend options derived from the flags.
    pub fn deploy_options(&self) -> DeployOptions {
        DeployOptions {
            port: self.port,
            project: self.project.clone().filter(|p| !p.is_empty()),
            region: Some(self.region.clone()).filter(|r| !r.is_empty()),
            verbosity: self.verbosity,
            log_level: self.log_level,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    pub fn new(output: super::OutputManager) -> Self {
        Self { output }
    }

    /// Runtime config that prints nothing but warnings.
    pub fn quiet() -> Self {
        Self::new(super::OutputManager::new(false, true))
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Whether quiet mode is on
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print a plain status line
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        self.output.println(message)
    }
}
