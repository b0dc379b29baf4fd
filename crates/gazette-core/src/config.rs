//! Configuration management for Gazette tracer services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (GAZETTE_ prefix, `__` separator, e.g. `GAZETTE__NEO4J__URI`)
//! 2. Config file (gazette.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::GazetteError;

const ENV_PREFIX: &str = "GAZETTE";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GazetteConfig {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub extract: ExtractSettings,
}

/// Connection settings for the Neo4j graph holding the gazettes.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Size of the bolt connection pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows pulled per round trip.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// Settings for fetching and parsing gazette PDFs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractSettings {
    /// Whole-request timeout for the PDF download.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Downloads larger than this are rejected before parsing.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "gazette-dev".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_user_agent() -> String {
    concat!("gazette-tracer/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_bytes: default_max_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

impl GazetteConfig {
    /// Load from `<file_prefix>.toml` (optional) and `GAZETTE__*` environment variables.
    pub fn load(file_prefix: &str) -> Result<Self, GazetteError> {
        load_with_env(file_prefix, ENV_PREFIX)
    }
}

fn load_with_env(file_prefix: &str, env_prefix: &str) -> Result<GazetteConfig, GazetteError> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let loaded: GazetteConfig = cfg.try_deserialize()?;
    tracing::debug!(uri = %loaded.neo4j.uri, "Loaded configuration");
    Ok(loaded)
}
