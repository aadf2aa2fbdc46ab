use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use summary_pipeline::SummaryError;
use thiserror::Error;

/// Errors returned by HTTP handlers.
///
/// Pipeline errors are logged in full; clients only see a fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}: {source}")]
    Pipeline {
        message: &'static str,
        #[source]
        source: SummaryError,
    },
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Summary generation failed
    pub fn summary(source: SummaryError) -> Self {
        Self::Pipeline {
            message: "AI analysis failed",
            source,
        }
    }

    /// Folder listing failed
    pub fn listing(source: SummaryError) -> Self {
        Self::Pipeline {
            message: "Failed to list files",
            source,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Pipeline { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Validate the `folderId` query parameter.
pub fn require_folder_id(folder_id: Option<String>) -> Result<String, ApiError> {
    match folder_id.map(|id| id.trim().to_string()) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ApiError::BadRequest("folderId is required".to_string())),
    }
}
