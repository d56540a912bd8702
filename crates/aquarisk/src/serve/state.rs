//! Shared application state.

use std::sync::Arc;

use crate::model::RiskModel;

/// State shared across request handlers.
///
/// The model is loaded once at startup and read-only afterwards, so an
/// `Arc` is all the coordination concurrent requests need.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<RiskModel>,
}

impl AppState {
    pub fn new(model: Arc<RiskModel>) -> Self {
        Self { model }
    }
}
