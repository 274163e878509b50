//! External tool execution.
//!
//! One process at a time: every call awaits the child to completion before
//! returning. Long-running tools share the user's terminal; only short
//! queries have their output captured.

use crate::cli::RuntimeConfig;
use crate::error::{DeployError, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Where a tool's stdout goes while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutMode {
    /// Shared with the user's terminal
    Inherit,
    /// Dropped (`--quiet`)
    Discard,
}

impl StdoutMode {
    pub fn for_runtime(runtime: &RuntimeConfig) -> Self {
        if runtime.is_quiet() {
            StdoutMode::Discard
        } else {
            StdoutMode::Inherit
        }
    }
}

/// A command line for an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: &'static str,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: &'static str) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &'static str {
        self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Command line as shown in errors and logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Runs the command attached to the user's terminal.
    ///
    /// stdin and stderr are always inherited so prompts and failure details
    /// reach the user; stdout is discarded in quiet mode.
    ///
    /// # Errors
    ///
    /// [`DeployError::ExternalTool`] if the program is missing, cannot be
    /// spawned, or exits non-zero.
    pub async fn run(&self, runtime: &RuntimeConfig) -> Result<()> {
        let program_path = locate(self.program)?;
        log::debug!("Running: {}", self.display());

        let stdout = match StdoutMode::for_runtime(runtime) {
            StdoutMode::Inherit => Stdio::inherit(),
            StdoutMode::Discard => Stdio::null(),
        };

        let status = Command::new(&program_path)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DeployError::external_tool(self.display(), e.to_string()))?;

        if !status.success() {
            return Err(DeployError::external_tool(
                self.display(),
                format!(
                    "exited with code: {} (see tool output above)",
                    status.code().unwrap_or(-1)
                ),
            ));
        }

        Ok(())
    }

    /// Runs the command quietly and returns its trimmed stdout.
    ///
    /// # Errors
    ///
    /// [`DeployError::ExternalTool`] on spawn failure or non-zero exit; the
    /// reason carries the tool's stderr.
    pub async fn output(&self) -> Result<String> {
        let program_path = locate(self.program)?;
        log::debug!("Querying: {}", self.display());

        let output = Command::new(&program_path)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DeployError::external_tool(self.display(), e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DeployError::external_tool(
                self.display(),
                format!(
                    "exited with code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Finds `program` on `PATH`.
fn locate(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|e| {
        DeployError::external_tool(
            program,
            format!(
                "{} not found in PATH: {}\n\
                 \n\
                 Install it and make sure it is on your PATH:\n\
                 • docker: https://docs.docker.com/get-docker/\n\
                 • gcloud: https://cloud.google.com/sdk/docs/install",
                program, e
            ),
        )
    })
}
