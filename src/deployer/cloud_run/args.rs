//! `gcloud run deploy` argument assembly.

use crate::deployer::Verbosity;
use crate::deployer::config::ADK_LABEL;
use std::collections::BTreeSet;
use std::path::Path;

const LABELS_PREFIX: &str = "--labels=";

/// Flags this backend always sets. `--region` is managed only when a region is set.
pub fn managed_args(region: Option<&str>) -> BTreeSet<&'static str> {
    let mut managed: BTreeSet<&'static str> =
        ["--source", "--project", "--port", "--set-env-vars", "--verbosity"]
            .into_iter()
            .collect();
    if region.is_some() {
        managed.insert("--region");
    }
    managed
}

/// Splits `--labels=` arguments out of the passthrough list.
///
/// Returns the merged label value (the ADK label first, then user labels in
/// order) and the remaining arguments in their original order.
pub fn split_labels(passthrough: &[String]) -> (String, Vec<String>) {
    let mut labels = vec![ADK_LABEL];
    let mut remaining = Vec::new();

    for arg in passthrough {
        match arg.strip_prefix(LABELS_PREFIX) {
            Some(user_labels) => labels.push(user_labels),
            None => remaining.push(arg.clone()),
        }
    }

    (labels.join(","), remaining)
}

/// Inputs for one `gcloud run deploy` invocation.
///
/// Conflict validation has to run before [`CloudRunArgs::build`]; the builder
/// itself trusts its inputs.
#[derive(Debug, Clone)]
pub struct CloudRunArgs<'a> {
    pub service_name: &'a str,
    pub staging_dir: &'a Path,
    pub project: &'a str,
    pub region: Option<&'a str>,
    pub port: u16,
    /// Fully merged `--set-env-vars` value, required variables included
    pub env_vars: &'a str,
    pub verbosity: Verbosity,
    pub passthrough: &'a [String],
}

impl CloudRunArgs<'_> {
    /// Managed flags, then labels, then the remaining passthrough args.
    pub fn build(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "deploy".to_string(),
            self.service_name.to_string(),
            "--source".to_string(),
            self.staging_dir.display().to_string(),
            "--project".to_string(),
            self.project.to_string(),
        ];

        if let Some(region) = self.region {
            args.push("--region".to_string());
            args.push(region.to_string());
        }

        args.extend([
            "--port".to_string(),
            self.port.to_string(),
            "--set-env-vars".to_string(),
            self.env_vars.to_string(),
            "--verbosity".to_string(),
            self.verbosity.to_string(),
        ]);

        let (labels, remaining) = split_labels(self.passthrough);
        args.push("--labels".to_string());
        args.push(labels);
        args.extend(remaining);

        args
    }
}
