//! HTTP server for the Folio portfolio site.
//!
//! Serves the guestbook, visitor counter and admin moderation API under
//! `/api`, and the built single-page front end for everything else.

pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod state;
pub mod static_files;

use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use crate::config::ServerConfig;
pub use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // CORS: same-origin only by default (no cross-origin requests allowed)
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = api::public_router()
        .merge(api::auth_router())
        .merge(api::admin_router());

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = &state.config.static_files.dir {
        router = router.fallback_service(static_files::spa_service(dir));
    }

    let router = if state.config.tls_enabled() {
        router.layer(from_fn(middleware::security_headers::security_headers_with_hsts))
    } else {
        router.layer(from_fn(middleware::security_headers::security_headers))
    };

    router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
