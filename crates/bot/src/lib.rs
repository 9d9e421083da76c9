//! Command routing and webhook transport for the qa-forum bot.
//!
//! The transport layer here is deliberately thin: it turns one inbound
//! update into one [`router::Router::handle`] call and ships the reply
//! back. Everything stateful lives behind the domain service.

pub mod command;
pub mod config;
pub mod replies;
pub mod router;
pub mod routes;

use std::sync::Arc;

use axum::Router as AxumRouter;
use axum::routing::{get, post};
use domain::ForumService;
use metrics_exporter_prometheus::PrometheusHandle;
use store::ForumStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use router::Router;

/// Shared application state accessible from all handlers.
pub struct AppState<S: ForumStore> {
    pub router: Router<S>,
}

/// Creates the application state over the given store.
pub fn create_state<S: ForumStore>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        router: Router::new(ForumService::new(store)),
    })
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ForumStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> AxumRouter {
    let metrics_router = AxumRouter::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    AxumRouter::new()
        .route("/health", get(routes::health::check))
        .route("/webhook", post(routes::webhook::handle::<S>))
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
