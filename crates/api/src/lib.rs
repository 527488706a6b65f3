//! HTTP API server with observability for the zoo.
//!
//! Provides REST endpoints for animals, enclosures, feeding schedules and
//! statistics, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use dispatcher::{EventDispatcher, register_default_handlers};
use metrics_exporter_prometheus::PrometheusHandle;
use store::InMemoryRepositories;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/animals",
            get(routes::animals::list).post(routes::animals::create),
        )
        .route(
            "/animals/{id}",
            get(routes::animals::get).delete(routes::animals::delete),
        )
        .route("/animals/{id}/feed", post(routes::animals::feed))
        .route("/animals/{id}/heal", post(routes::animals::heal))
        .route("/animals/{id}/transfer", post(routes::animals::transfer))
        .route(
            "/animals/{id}/feeding-schedules",
            get(routes::animals::feeding_schedules),
        )
        .route(
            "/enclosures",
            get(routes::enclosures::list).post(routes::enclosures::create),
        )
        .route(
            "/enclosures/{id}",
            get(routes::enclosures::get).delete(routes::enclosures::delete),
        )
        .route("/enclosures/{id}/clean", post(routes::enclosures::clean))
        .route("/enclosures/{id}/animals", get(routes::enclosures::animals))
        .route(
            "/feeding-schedules",
            get(routes::schedules::list).post(routes::schedules::create),
        )
        .route("/feeding-schedules/active", get(routes::schedules::active))
        .route(
            "/feeding-schedules/time-range",
            get(routes::schedules::time_range),
        )
        .route(
            "/feeding-schedules/{id}",
            get(routes::schedules::get).delete(routes::schedules::delete),
        )
        .route(
            "/feeding-schedules/{id}/time",
            put(routes::schedules::update_time),
        )
        .route(
            "/feeding-schedules/{id}/cancel",
            post(routes::schedules::cancel),
        )
        .route(
            "/feeding-schedules/{id}/restore",
            post(routes::schedules::restore),
        )
        .route(
            "/feeding-schedules/{id}/execute",
            post(routes::schedules::execute),
        )
        .route("/statistics", get(routes::statistics::get))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state with in-memory repositories and
/// the logging event handlers registered.
pub fn create_default_state() -> Arc<AppState> {
    let dispatcher = Arc::new(EventDispatcher::new());
    register_default_handlers(&dispatcher);

    Arc::new(AppState::new(InMemoryRepositories::new(), dispatcher))
}
