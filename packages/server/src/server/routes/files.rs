use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use summary_pipeline::{fingerprint, DriveFile};

use crate::server::app::AppState;
use crate::server::error::{require_folder_id, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesQuery {
    folder_id: Option<String>,
}

#[derive(Serialize)]
pub struct FilesResponse {
    files: Vec<DriveFile>,
    total: usize,
    fingerprint: String,
}

/// `GET /files?folderId=<id>` - the flattened folder listing
pub async fn files_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<FilesQuery>, QueryRejection>,
) -> Result<Json<FilesResponse>, ApiError> {
    let Query(query) = query.map_err(ApiError::from)?;
    let folder_id = require_folder_id(query.folder_id)?;

    let files = state
        .summaries
        .list_files(&folder_id)
        .await
        .map_err(ApiError::listing)?;

    Ok(Json(FilesResponse {
        total: files.len(),
        fingerprint: fingerprint(&files),
        files,
    }))
}
