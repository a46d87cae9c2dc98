//! Campaign analytics server library logic.

pub mod api;
pub mod config;

use axum::{
    http::HeaderValue,
    routing::get,
    Extension, Router,
};
use campaigns_db::DbPool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
}

/// Builds the CORS layer for the configured origins.
///
/// Only the listed origins are echoed back; every method and header is
/// allowed for them. Origins that are not valid header values are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/", get(api::root_handler))
        .route("/campaigns", get(api::list_campaigns_handler))
        .route("/campaigns/summary", get(api::campaign_summary_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
