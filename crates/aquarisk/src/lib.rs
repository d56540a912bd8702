//! aquarisk: waterborne-disease risk scoring.
//!
//! Loads a gradient-boosted tree classifier from a versioned JSON artifact
//! and scores single feature records, serving predictions over HTTP.
//!
//! # Key Types
//!
//! - [`RiskModel`] - loaded classifier: forest + metadata + output transform
//! - [`ModelMeta`] - the explicit feature-schema and label-order contract
//! - [`FeatureRecord`] - one submitted JSON record, encoded per the schema
//! - [`persist::load_model`] / [`persist::save_model`] - artifact I/O
//!
//! # Serving
//!
//! [`serve::create_router`] builds the axum router (`POST /predict`,
//! `GET /healthz`); [`serve::serve`] binds and runs it. The model is loaded
//! once at startup and shared read-only across request tasks.

pub mod config;
pub mod model;
pub mod persist;
pub mod record;
pub mod repr;
pub mod serve;
pub mod testing;

// High-level model types
pub use model::{FeatureSpec, FeatureType, ModelMeta, OutputTransform, RiskModel};

// Representation types
pub use repr::{Forest, Tree};

// Record encoding
pub use record::{FeatureRecord, RecordError};

// Artifact I/O
pub use persist::{load_model, save_model, ReadError, WriteError};

// Service
pub use config::ServiceConfig;
pub use serve::{create_router, AppState};
