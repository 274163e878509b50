//! Agent deployment library.
//!
//! Stages an ADK agent directory into a build context and deploys it with:
//! - local Docker (`docker build` + `docker run`)
//! - Google Cloud Run (`gcloud run deploy`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod deployer;
pub mod error;
pub mod stage;

// Re-export commonly used types
pub use deployer::{Deployer, DeploymentRequest, DeployOptions, get_deployer};
pub use error::{CliError, DeployError, Result};
