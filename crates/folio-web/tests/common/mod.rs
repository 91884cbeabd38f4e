#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use folio_core::MemStorage;
use folio_web::auth::password::hash_password;
use folio_web::{AppState, ServerConfig};
use http_body_util::BodyExt;
use serde_json::Value;

pub const ADMIN_PASSWORD: &str = "secret123";
pub const JWT_SECRET: &str = "test-secret-test-secret-test-secret";

/// State with an admin account stored under `admin_password_hash`. The
/// config is used as given, without the startup checks.
pub async fn state_with_admin_hash(admin_password_hash: String) -> AppState {
    let mut config = ServerConfig::default();
    config.trust_proxy = true;
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config.auth.admin_password_hash = admin_password_hash;

    let state = AppState::new(config, Arc::new(MemStorage::new()));
    state.seed_admin().await.unwrap();
    state
}

pub async fn test_state() -> AppState {
    state_with_admin_hash(hash_password(ADMIN_PASSWORD).unwrap()).await
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (folio_web::app(state.clone()), state)
}

pub fn raw_json_request(uri: &str, ip: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn login_request(ip: &str, username: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({ "username": username, "password": password });
    Request::builder()
        .method("POST")
        .uri("/api/admin/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn admin_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
