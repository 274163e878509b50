//! adk_deploy - deploy ADK agents to local Docker or Google Cloud Run.
//!
//! Stages the agent with a generated Dockerfile, then shells out to `docker`
//! or `gcloud`. Exit code 0 means the external tool reported success.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match adk_deploy::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
