//! Request handlers.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::record::FeatureRecord;

use super::state::AppState;
use super::types::{HealthResponse, PredictResponse};

/// POST /predict
///
/// Accepts one flat feature record and returns the transformed probability
/// vector in label order. Schema violations come back as 422 with the
/// offending key named; malformed JSON is rejected by the extractor before
/// the handler runs.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<FeatureRecord>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let row = record
        .encode(state.model.meta())
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let scores = state.model.labeled_scores(&row);

    info!("predicted probabilities:");
    for (label, probability) in &scores {
        info!("  {label}: {:.2}%", probability * 100.0);
    }

    Ok(Json(PredictResponse {
        predicted_probabilities: scores.into_iter().map(|(_, p)| p).collect(),
    }))
}

/// GET /healthz
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let meta = state.model.meta();
    Json(HealthResponse {
        status: "ok",
        labels: meta.labels.clone(),
        n_features: meta.n_features(),
    })
}
