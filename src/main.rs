use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use agrismart_web::{app, config, logging, services::CannedResponses};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = config::Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting AgriSmart web frontend"
    );

    if !settings.guide_configured() {
        tracing::warn!("GUIDE_API_KEY is not set - care guides will show the fallback text");
    }

    let state = app::AppState::from_settings(settings.clone(), Arc::new(CannedResponses))?;

    // Check the prediction service without blocking startup
    tokio::spawn({
        let state = Arc::clone(&state);
        async move {
            match state.prediction_client.health_check().await {
                Ok(()) => tracing::info!("Prediction service is reachable"),
                Err(e) => tracing::warn!(error = %e, "Prediction service check failed - predictions will fail until it is up"),
            }
        }
    });

    state
        .sessions
        .spawn_sweeper(Duration::from_secs(settings.session_sweep_interval_seconds));

    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
