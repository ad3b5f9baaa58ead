use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the axum router with all Farmchain endpoints.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/v1/health", get(handlers::health_handler))
        .route("/v1/info", get(handlers::info_handler))
        .route("/v1/batches", post(handlers::register_batch))
        .route("/v1/batches/available", get(handlers::available_batches))
        .route("/v1/batches/search", get(handlers::search_batches))
        .route("/v1/batches/token/:token", get(handlers::batch_by_token))
        .route("/v1/batches/:id", get(handlers::get_batch))
        .route("/v1/batches/:id/records", get(handlers::batch_records))
        .route("/v1/batches/:id/timeline", get(handlers::batch_timeline))
        .route("/v1/batches/:id/status", get(handlers::batch_status))
        .route("/v1/batches/:id/verify", get(handlers::verify_batch))
        .route("/v1/records", post(handlers::append_record))
        .route("/v1/farmers/:farmer/batches", get(handlers::farmer_batches))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.allow_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
