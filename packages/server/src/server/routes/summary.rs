use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;
use summary_pipeline::SummaryPayload;

use crate::server::app::AppState;
use crate::server::error::{require_folder_id, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    folder_id: Option<String>,
    #[serde(default)]
    refresh: bool,
}

/// `GET /summary?folderId=<id>[&refresh=true]`
pub async fn summary_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<Arc<SummaryPayload>>, ApiError> {
    let Query(query) = query.map_err(ApiError::from)?;
    let folder_id = require_folder_id(query.folder_id)?;

    let payload = state
        .summaries
        .summarize_with(&folder_id, query.refresh)
        .await
        .map_err(ApiError::summary)?;

    Ok(Json(payload))
}
