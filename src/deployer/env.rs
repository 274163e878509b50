//! Environment variable collection from the command line and `.env` files.
//!
//! Cloud Run takes a single comma-joined `--set-env-vars` value; Docker takes
//! one `-e` flag per variable plus `--env-file`. Command-line pairs always come
//! before file pairs and nothing is de-duplicated, so the tool sees the last
//! occurrence of a repeated key.

use super::config::ENV_FILE_NAME;
use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Comma-joins the `KEY=VALUE` entries; entries without `=` are dropped.
pub fn build_env_vars_string(env_vars: &[String]) -> String {
    env_vars
        .iter()
        .filter(|item| item.contains('='))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Reads `<dir>/.env` into a comma-joined `KEY=VALUE` string.
///
/// Blank lines, `#` comments and lines without `=` are skipped. A missing
/// file yields an empty string.
pub fn build_env_file_string(dir: &Path) -> Result<String> {
    let env_file_path = dir.join(ENV_FILE_NAME);

    let contents = match std::fs::read_to_string(&env_file_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(String::new()),
        Err(e) => return Err(e.into()),
    };

    log::debug!("Reading environment from {}", env_file_path.display());

    let pairs: Vec<&str> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && line.contains('='))
        .collect();

    Ok(pairs.join(","))
}

/// Command-line pairs followed by `.env` pairs, comma-separated.
pub fn collect_env_vars(env_vars: &[String], dir: &Path) -> Result<String> {
    let cli_vars = build_env_vars_string(env_vars);
    let file_vars = build_env_file_string(dir)?;

    Ok(match (cli_vars.is_empty(), file_vars.is_empty()) {
        (false, false) => format!("{},{}", cli_vars, file_vars),
        (false, true) => cli_vars,
        _ => file_vars,
    })
}

/// Appends `GOOGLE_CLOUD_PROJECT` and `GOOGLE_CLOUD_LOCATION`.
pub fn add_required_env_vars(env_vars: &str, project: &str, region: Option<&str>) -> String {
    let required = format!(
        "GOOGLE_CLOUD_PROJECT={},GOOGLE_CLOUD_LOCATION={}",
        project,
        region.unwrap_or_default()
    );

    if env_vars.is_empty() {
        required
    } else {
        format!("{},{}", env_vars, required)
    }
}

/// `-e KEY=VALUE` for every valid pair.
pub fn docker_env_args(env_vars: &[String]) -> Vec<String> {
    env_vars
        .iter()
        .filter(|item| item.contains('='))
        .flat_map(|item| ["-e".to_string(), item.clone()])
        .collect()
}

/// `--env-file <dir>/.env` if the file exists, otherwise nothing.
pub fn docker_env_file_args(dir: &Path) -> Vec<String> {
    let env_file_path: PathBuf = dir.join(ENV_FILE_NAME);
    if env_file_path.is_file() {
        vec!["--env-file".to_string(), env_file_path.display().to_string()]
    } else {
        Vec::new()
    }
}
