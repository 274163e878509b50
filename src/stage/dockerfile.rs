//! Dockerfile generation for staged agents.
//!
//! Renders [`DOCKERFILE_TEMPLATE`] with Handlebars. HTML escaping is disabled
//! because the output is a shell-facing build file.

use crate::error::{DeployError, Result};
use handlebars::Handlebars;
use semver::Version;
use serde::Serialize;

/// Build file for a Python ADK agent served by the `adk` CLI.
pub const DOCKERFILE_TEMPLATE: &str = r#"FROM python:3.11-slim
WORKDIR /app

# Create a non-root user
RUN adduser --disabled-password --gecos "" myuser

# Switch to the non-root user
USER myuser

# Set up environment variables
ENV PATH="/home/myuser/.local/bin:$PATH"

# Install ADK
RUN pip install google-adk{{#if adk_version}}=={{adk_version}}{{/if}}

# Copy agent
COPY --chown=myuser:myuser "agents/{{app_name}}/" "/app/agents/{{app_name}}/"
{{#if install_requirements}}
RUN pip install -r "/app/agents/{{app_name}}/requirements.txt"
{{/if}}

EXPOSE {{port}}

CMD adk {{command}} --port={{port}} {{#each server_options}}{{this}} {{/each}}"/app/agents"
"#;

/// Last ADK release whose server did not accept `--host`.
const LAST_VERSION_WITHOUT_HOST: Version = Version::new(0, 5, 0);

/// Inputs for the generated Dockerfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerfileOptions {
    pub app_name: String,
    pub port: u16,
    /// Pinned `google-adk` version; latest when `None`
    pub adk_version: Option<String>,
    /// Serve the web UI (`adk web`) instead of the bare API server
    pub with_ui: bool,
    pub session_service_uri: Option<String>,
    pub artifact_service_uri: Option<String>,
    pub memory_service_uri: Option<String>,
    pub trace_to_cloud: bool,
    pub allow_origins: Vec<String>,
    pub a2a: bool,
    /// Agent ships a `requirements.txt`
    pub install_requirements: bool,
}

#[derive(Serialize)]
struct TemplateData<'a> {
    app_name: &'a str,
    port: u16,
    adk_version: Option<&'a str>,
    install_requirements: bool,
    command: &'static str,
    server_options: Vec<String>,
}

impl DockerfileOptions {
    /// Flags appended to `adk <command> --port=<port>`, in a fixed order.
    fn server_options(&self, include_host: bool) -> Vec<String> {
        let mut options = Vec::new();

        if include_host {
            options.push("--host=0.0.0.0".to_string());
        }
        if let Some(uri) = &self.session_service_uri {
            options.push(format!("--session_service_uri={}", uri));
        }
        if let Some(uri) = &self.artifact_service_uri {
            options.push(format!("--artifact_service_uri={}", uri));
        }
        if let Some(uri) = &self.memory_service_uri {
            options.push(format!("--memory_service_uri={}", uri));
        }
        if self.trace_to_cloud {
            options.push("--trace_to_cloud".to_string());
        }
        if !self.allow_origins.is_empty() {
            options.push(format!("--allow_origins={}", self.allow_origins.join(",")));
        }
        if self.a2a {
            options.push("--a2a".to_string());
        }

        options
    }
}

/// Renders the Dockerfile for `options`.
///
/// # Errors
///
/// - [`DeployError::Configuration`] if `adk_version` is not valid semver
/// - [`DeployError::Template`] if rendering fails
pub fn render_dockerfile(options: &DockerfileOptions) -> Result<String> {
    let include_host = match options.adk_version.as_deref() {
        Some(raw) => {
            let version = Version::parse(raw).map_err(|e| {
                DeployError::configuration(format!("Invalid ADK version '{}': {}", raw, e))
            })?;
            version > LAST_VERSION_WITHOUT_HOST
        }
        None => true,
    };

    let data = TemplateData {
        app_name: &options.app_name,
        port: options.port,
        adk_version: options.adk_version.as_deref(),
        install_requirements: options.install_requirements,
        command: if options.with_ui { "web" } else { "api_server" },
        server_options: options.server_options(include_host),
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    Ok(handlebars.render_template(DOCKERFILE_TEMPLATE, &data)?)
}
