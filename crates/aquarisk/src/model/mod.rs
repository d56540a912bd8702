//! High-level risk model: forest, metadata, and output transform.

pub mod meta;
pub mod model;
pub mod transform;

pub use meta::{FeatureSpec, FeatureType, ModelMeta};
pub use model::{ModelContractError, RiskModel};
pub use transform::OutputTransform;
