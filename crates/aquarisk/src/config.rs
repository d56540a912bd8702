//! Service configuration.
//!
//! Layered: built-in defaults, then an optional `aquarisk.toml` next to the
//! working directory, then `AQUARISK_*` environment variables.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration for the prediction service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Path to the model artifact.
    pub model_path: PathBuf,
    /// Bind address, e.g. `127.0.0.1:5000`.
    pub bind: String,
    /// Log filter directive for tracing-subscriber.
    pub log_filter: String,
}

impl ServiceConfig {
    /// Load configuration from defaults, file, and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("model_path", "model.json")?
            .set_default("bind", "127.0.0.1:5000")?
            .set_default("log_filter", "info")?
            .add_source(File::with_name("aquarisk").required(false))
            .add_source(Environment::with_prefix("AQUARISK"))
            .build()?
            .try_deserialize()
    }
}
