//! HTTP payload types.

use serde::Serialize;

/// Response for `POST /predict`.
///
/// Probabilities are ordered per the model's label contract.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub predicted_probabilities: Vec<f32>,
}

/// Response for `GET /healthz`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub labels: Vec<String>,
    pub n_features: usize,
}
