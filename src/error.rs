//! Error types for deployment operations.
//!
//! Every variant is fatal: the deployment attempt stops and the message is
//! surfaced to the user as-is.

use thiserror::Error;

/// Result type alias for deployment operations
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for all deployment operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// A required provider setting could not be resolved
    #[error("{reason}")]
    Configuration {
        /// Reason for the error
        reason: String,
    },

    /// Passthrough arguments collide with arguments the backend sets itself
    #[error("{}", conflict_message(arguments))]
    ArgumentConflict {
        /// Conflicting flag names, sorted and de-duplicated
        arguments: Vec<String>,
    },

    /// Unknown deployment backend
    #[error("Unsupported cloud provider: {name}")]
    UnsupportedBackend {
        /// Backend name as given by the user
        name: String,
    },

    /// External tool was missing, failed to start, or exited non-zero
    #[error("Command failed: {command} - {reason}")]
    ExternalTool {
        /// Command line that was run
        command: String,
        /// Reason for the error
        reason: String,
    },

    /// Dockerfile template errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl DeployError {
    /// Shorthand for a [`DeployError::Configuration`] error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`DeployError::ExternalTool`] error.
    pub fn external_tool(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExternalTool {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

fn conflict_message(arguments: &[String]) -> String {
    let conflict_list = arguments
        .iter()
        .map(|arg| format!("'{}'", arg))
        .collect::<Vec<_>>()
        .join(", ");

    if arguments.len() == 1 {
        format!(
            "The argument {} conflicts with ADK's automatic configuration. \
             ADK will set this argument automatically, so please remove it from your command.",
            conflict_list
        )
    } else {
        format!(
            "The arguments {} conflict with ADK's automatic configuration. \
             ADK will set these arguments automatically, so please remove them from your command.",
            conflict_list
        )
    }
}
