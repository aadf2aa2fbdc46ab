use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use summary_pipeline::SummaryService;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::routes::{files_handler, health_handler, summary_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub summaries: Arc<SummaryService>,
}

impl AppState {
    pub fn new(summaries: SummaryService) -> Self {
        Self {
            summaries: Arc::new(summaries),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let app = Router::new()
        .route("/summary", get(summary_handler))
        .route("/files", get(files_handler))
        .route("/health", get(health_handler));

    app.layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Allow any origin unless an explicit list is configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE])
}
