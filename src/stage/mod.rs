//! Build context staging.
//!
//! Lays out the directory handed to `docker build` / `gcloud run deploy`:
//!
//! ```text
//! <staging>/
//! ├── Dockerfile
//! └── agents/
//!     └── <app_name>/   (copy of the agent directory)
//! ```
//!
//! The staging directory is removed when the [`StagingArea`] is dropped.

mod dockerfile;

pub use dockerfile::{DOCKERFILE_TEMPLATE, DockerfileOptions, render_dockerfile};

use crate::error::{DeployError, Result};
use path_absolutize::Absolutize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Returns the absolute agent directory, checking that it exists.
pub fn resolve_agent_dir(path: &Path) -> Result<PathBuf> {
    let absolute = path.absolutize()?.to_path_buf();

    if !absolute.is_dir() {
        return Err(DeployError::configuration(format!(
            "Agent directory not found: {}",
            absolute.display()
        )));
    }

    Ok(absolute)
}

/// App name derived from the agent directory's last path component.
pub fn default_app_name(agent_dir: &Path) -> Result<String> {
    agent_dir
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            DeployError::configuration(format!(
                "Cannot derive an app name from {}; pass --app-name",
                agent_dir.display()
            ))
        })
}

#[derive(Debug)]
enum StagingRoot {
    Temp(TempDir),
    Explicit(PathBuf),
}

/// Temporary build context for one deployment attempt.
#[derive(Debug)]
pub struct StagingArea {
    root: StagingRoot,
}

impl StagingArea {
    /// Creates the staging directory.
    ///
    /// With `explicit` the given folder is emptied (if present) and reused;
    /// otherwise a fresh temporary directory is created. An explicit folder
    /// that contains, equals, or sits inside `agent_dir` is rejected before
    /// anything is deleted.
    pub fn create(explicit: Option<&Path>, agent_dir: &Path) -> Result<Self> {
        let root = match explicit {
            Some(path) => {
                let path = path.absolutize()?.to_path_buf();
                if overlaps(&path, agent_dir) {
                    return Err(DeployError::configuration(format!(
                        "Staging folder {} overlaps the agent directory {}; choose a folder outside it",
                        path.display(),
                        agent_dir.display()
                    )));
                }
                match fs::remove_dir_all(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                fs::create_dir_all(&path)?;
                StagingRoot::Explicit(path)
            }
            None => StagingRoot::Temp(tempfile::Builder::new().prefix("adk_deploy_").tempdir()?),
        };

        let staging = Self { root };
        log::debug!("Staging directory: {}", staging.path().display());
        Ok(staging)
    }

    pub fn path(&self) -> &Path {
        match &self.root {
            StagingRoot::Temp(dir) => dir.path(),
            StagingRoot::Explicit(path) => path,
        }
    }

    /// Copies `agent_dir` into `agents/<app_name>/` and returns the destination.
    pub fn stage_agent(&self, agent_dir: &Path, app_name: &str) -> Result<PathBuf> {
        let destination = self.path().join("agents").join(app_name);
        copy_dir(agent_dir, &destination)?;
        Ok(destination)
    }

    /// Writes `<staging>/Dockerfile`.
    pub fn write_dockerfile(&self, contents: &str) -> Result<PathBuf> {
        let path = self.path().join("Dockerfile");
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        // TempDir cleans up after itself
        if let StagingRoot::Explicit(path) = &self.root
            && let Err(e) = fs::remove_dir_all(path)
            && e.kind() != io::ErrorKind::NotFound
        {
            log::warn!(
                "Failed to remove staging directory {}: {}",
                path.display(),
                e
            );
        }
    }
}

/// True when either path is the other or one of its ancestors.
fn overlaps(staging: &Path, agent_dir: &Path) -> bool {
    let nested = |a: &Path, b: &Path| a.starts_with(b) || b.starts_with(a);

    let agent_dir = match agent_dir.absolutize() {
        Ok(dir) => dir.to_path_buf(),
        Err(_) => agent_dir.to_path_buf(),
    };
    if nested(staging, agent_dir.as_path()) {
        return true;
    }

    // Symlinked spellings of the same location
    match (canonical_prefix(staging), fs::canonicalize(&agent_dir)) {
        (Some(staging), Ok(agent_dir)) => nested(staging.as_path(), agent_dir.as_path()),
        _ => false,
    }
}

/// Canonical form of the deepest existing ancestor, with the rest re-appended.
fn canonical_prefix(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return Some(rest.iter().rev().fold(canonical, |acc, part| acc.join(part)));
        }
        rest.push(existing.file_name()?.to_os_string());
        existing = existing.parent()?;
    }
}

fn copy_dir(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| DeployError::Anyhow(e.into()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
