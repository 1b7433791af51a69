//! OpenSASE Chat Commerce - sell-command order intake service

use anyhow::Result;
use opensase_chatcommerce::{api::{self, AppState}, config::AppConfig, store::InMemoryOrderRepository, telemetry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    telemetry::init_logger(config.log_format);
    tracing::debug!(?config, "loaded configuration");

    let state = AppState { orders: Arc::new(InMemoryOrderRepository::new(config.currency.clone())) };
    let app = api::router(state);

    tracing::info!("🚀 OpenSASE Chat Commerce listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?, app).await?;
    Ok(())
}
