//! Prediction service entry point.
//!
//! Loads configuration and the model artifact, then serves until killed.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aquarisk::serve::{self, AppState};
use aquarisk::{persist, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    let model = persist::load_model(&config.model_path).with_context(|| {
        format!(
            "failed to load model artifact {}",
            config.model_path.display()
        )
    })?;

    info!(
        "loaded model: {} features, labels {:?}",
        model.meta().n_features(),
        model.meta().labels
    );

    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.bind))?;

    serve::serve(AppState::new(Arc::new(model)), addr).await?;
    Ok(())
}
