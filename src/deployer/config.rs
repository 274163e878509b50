//! Deployment defaults and fixed names.

/// Default port for the agent server
pub const DEFAULT_PORT: u16 = 8000;

/// Default Cloud Run region
pub const DEFAULT_REGION: &str = "us-central1";

/// Service name used when none is given
pub const DEFAULT_SERVICE_NAME: &str = "adk-default-service-name";

/// Label identifying resources created by this tool
pub const ADK_LABEL: &str = "created-by=adk";

/// Prefix for locally built image tags
pub const IMAGE_PREFIX: &str = "adk-python-";

/// Env file read from the agent directory
pub const ENV_FILE_NAME: &str = ".env";

/// Python requirements file installed into the image when present
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Container tool
pub const DOCKER: &str = "docker";

/// Cloud deployment tool
pub const GCLOUD: &str = "gcloud";
