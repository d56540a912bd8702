//! Feature record encoding.
//!
//! A [`FeatureRecord`] is the flat JSON object submitted to the prediction
//! endpoint. [`FeatureRecord::encode`] frames it as one model input row,
//! ordered and typed per the model's feature schema. Every way a record can
//! disagree with the schema maps to a distinct [`RecordError`].

use serde::Deserialize;
use serde_json::Value;

use crate::model::{FeatureType, ModelMeta};

/// Ways a submitted record can violate the model's feature schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing feature {name:?}")]
    MissingFeature { name: String },
    #[error("unknown feature {name:?}")]
    UnknownFeature { name: String },
    #[error("feature {name:?} expects a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
    #[error("unknown category {value:?} for feature {name:?} (expected one of {allowed:?})")]
    UnknownCategory {
        name: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// One flat feature record, as submitted over HTTP.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord {
    values: serde_json::Map<String, Value>,
}

impl FeatureRecord {
    /// Number of submitted keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no keys were submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encode the record as one input row in schema column order.
    ///
    /// Every schema feature must be present; `null` submits an explicit
    /// missing value (encoded as NaN and routed through the trees' default
    /// directions). Keys outside the schema are rejected.
    pub fn encode(&self, meta: &ModelMeta) -> Result<Vec<f32>, RecordError> {
        for name in self.values.keys() {
            if meta.feature(name).is_none() {
                return Err(RecordError::UnknownFeature { name: name.clone() });
            }
        }

        let mut row = Vec::with_capacity(meta.n_features());
        for spec in &meta.features {
            let value = self
                .values
                .get(&spec.name)
                .ok_or_else(|| RecordError::MissingFeature {
                    name: spec.name.clone(),
                })?;

            row.push(encode_value(&spec.name, &spec.kind, value)?);
        }
        Ok(row)
    }
}

fn encode_value(name: &str, kind: &FeatureType, value: &Value) -> Result<f32, RecordError> {
    if value.is_null() {
        return Ok(f32::NAN);
    }

    match kind {
        FeatureType::Numeric => value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| RecordError::TypeMismatch {
                name: name.to_string(),
                expected: "number",
            }),
        FeatureType::Categorical { categories } => {
            let text = value.as_str().ok_or_else(|| RecordError::TypeMismatch {
                name: name.to_string(),
                expected: "string",
            })?;
            categories
                .iter()
                .position(|c| c == text)
                .map(|idx| idx as f32)
                .ok_or_else(|| RecordError::UnknownCategory {
                    name: name.to_string(),
                    value: text.to_string(),
                    allowed: categories.clone(),
                })
        }
    }
}
