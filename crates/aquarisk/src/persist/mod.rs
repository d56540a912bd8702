//! Model artifact persistence.
//!
//! The artifact is a versioned JSON document ([`schema`]) validated in full
//! during loading ([`convert`]). A model is loaded once at process start and
//! is immutable afterwards; there is no reload or multi-version support.

use std::fs;
use std::path::Path;

use crate::model::RiskModel;

pub mod convert;
pub mod schema;

pub use convert::{model_from_artifact, ValidationError};
pub use schema::{ModelArtifactSchema, FORMAT_VERSION};

/// Errors while reading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("artifact failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

/// Errors while writing a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and validate a model artifact from disk.
pub fn load_model(path: impl AsRef<Path>) -> Result<RiskModel, ReadError> {
    let text = fs::read_to_string(path)?;
    let artifact: ModelArtifactSchema = serde_json::from_str(&text)?;

    if artifact.format_version != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found: artifact.format_version,
            supported: FORMAT_VERSION,
        });
    }

    Ok(model_from_artifact(artifact)?)
}

/// Serialize a model to a JSON artifact on disk.
pub fn save_model(model: &RiskModel, path: impl AsRef<Path>) -> Result<(), WriteError> {
    let artifact: ModelArtifactSchema = model.into();
    let json = serde_json::to_string_pretty(&artifact)?;
    fs::write(path, json)?;
    Ok(())
}
