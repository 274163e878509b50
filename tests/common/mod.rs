//! Shared fixtures for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway agent directory with a minimal Python agent.
pub fn agent_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("__init__.py"), "from . import agent\n").unwrap();
    fs::write(dir.path().join("agent.py"), "root_agent = None\n").unwrap();
    dir
}

/// The `adk_deploy` binary with cloud defaults cleared from the environment.
pub fn adk_deploy() -> Command {
    let mut cmd = Command::cargo_bin("adk_deploy").unwrap();
    cmd.env_remove("GOOGLE_CLOUD_PROJECT")
        .env_remove("GOOGLE_CLOUD_LOCATION");
    cmd
}

/// Stand-in `docker` / `gcloud` executables placed first on `PATH`.
///
/// Every invocation appends `<tool> <args>` to a shared call log before the
/// script body runs.
#[cfg(unix)]
pub struct FakeTools {
    dir: TempDir,
}

#[cfg(unix)]
impl FakeTools {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        Self { dir }
    }

    fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.path().join("calls.log")
    }

    /// Installs `name` as a shell script running `body` after logging the call.
    pub fn install(&self, name: &str, body: &str) -> &Self {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir().join(name);
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> \"$FAKE_TOOL_LOG\"\n{}\n",
            name, body
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    /// `adk_deploy` resolving tools from the fake bin directory first.
    pub fn adk_deploy(&self) -> Command {
        let path = std::env::var("PATH").unwrap_or_default();
        let mut cmd = adk_deploy();
        cmd.env("PATH", format!("{}:{}", self.bin_dir().display(), path))
            .env("FAKE_TOOL_LOG", self.log_path());
        cmd
    }

    /// Logged invocations, one per line, in call order.
    pub fn calls(&self) -> Vec<String> {
        read_lines(&self.log_path())
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
