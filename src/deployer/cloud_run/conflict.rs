//! Rejects passthrough arguments that collide with managed arguments.

use crate::error::{DeployError, Result};
use std::collections::BTreeSet;

/// Checks `extra_args` against the names the backend sets itself.
///
/// Only `--flag` and `--flag=value` forms are considered; the flag name is the
/// text before the first `=`. Every offending name is reported once, sorted.
pub fn validate_extra_args(extra_args: &[String], managed: &BTreeSet<&str>) -> Result<()> {
    let conflicts: BTreeSet<&str> = extra_args
        .iter()
        .filter(|arg| arg.starts_with("--"))
        .map(|arg| arg.split_once('=').map_or(arg.as_str(), |(name, _)| name))
        .filter(|name| managed.contains(name))
        .collect();

    if conflicts.is_empty() {
        return Ok(());
    }

    Err(DeployError::ArgumentConflict {
        arguments: conflicts.into_iter().map(str::to_string).collect(),
    })
}
