// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use drive_client::DriveClient;
use gemini_client::GeminiClient;
use server_core::{
    server::{build_app, AppState},
    Config,
};
use summary_pipeline::{GeminiAI, GoogleDrive, SummaryService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,summary_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Project Summary API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        project = %config.vertex_project_id,
        location = %config.vertex_location,
        model = %config.vertex_model,
        "Configuration loaded"
    );

    // Upstream clients
    let drive = GoogleDrive::new(DriveClient::new(config.google_access_token.clone()));
    let gemini = GeminiClient::new(
        config.google_access_token.clone(),
        config.vertex_project_id.clone(),
    )
    .with_location(config.vertex_location.clone());
    let ai = GeminiAI::new(gemini).with_model(config.vertex_model.clone());

    // Build application
    let service = SummaryService::new(Arc::new(drive), Arc::new(ai), config.pipeline_config());
    let app = build_app(AppState::new(service), &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
