mod auth_handlers;
pub mod comments;
pub mod visitors;

use axum::routing::{delete, get, patch, post};
use axum::Json;
use axum::Router;

use crate::state::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/comments",
            get(comments::list_approved).post(comments::create),
        )
        .route(
            "/visitors",
            get(visitors::count).post(visitors::record_visit),
        )
}

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/admin/login", post(auth_handlers::login))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/comments", get(comments::list_all))
        .route("/admin/comments/{id}/approve", patch(comments::approve))
        .route("/admin/comments/{id}", delete(comments::remove))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
