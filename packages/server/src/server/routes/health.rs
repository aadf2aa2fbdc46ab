use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    cached_folders: usize,
}

/// Health check endpoint
///
/// Always 200 while the process is serving; reports cache occupancy.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        cached_folders: state.summaries.cache().len().await,
    })
}
