//! Admin login endpoint and its attempt throttling.

mod common;

use axum::http::{header, StatusCode};
use common::{
    body_json, login_request, raw_json_request, state_with_admin_hash, test_app, ADMIN_PASSWORD,
};
use tower::ServiceExt; // for .oneshot()

#[tokio::test]
async fn login_success_returns_token() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(login_request("10.0.0.1", "admin", ADMIN_PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(json["expiresAt"].as_u64().is_some());
}

#[tokio::test]
async fn wrong_password_reports_remaining_attempts() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(login_request("10.0.0.2", "admin", "wrong"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid credentials");
    assert_eq!(json["remainingAttempts"], 4);
}

#[tokio::test]
async fn unknown_user_counts_as_failure() {
    let (app, state) = test_app().await;

    let response = app
        .oneshot(login_request("10.0.0.3", "mallory", ADMIN_PASSWORD))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.throttle.record("10.0.0.3").map(|r| r.count), Some(1));
}

#[tokio::test]
async fn fifth_failure_blocks_client() {
    let (app, _) = test_app().await;
    let ip = "10.0.0.4";

    for expected_remaining in [4, 3, 2, 1] {
        let response = app
            .clone()
            .oneshot(login_request(ip, "admin", "wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["remainingAttempts"], expected_remaining);
    }

    let response = app
        .clone()
        .oneshot(login_request(ip, "admin", "wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()[header::RETRY_AFTER], "900");
    let json = body_json(response).await;
    assert_eq!(json["blocked"], true);
    assert_eq!(json["remainingAttempts"], 0);
    assert_eq!(json["blockDurationMs"], 900_000);
}

#[tokio::test]
async fn blocked_client_is_rejected_even_with_correct_password() {
    let (app, state) = test_app().await;
    let ip = "10.0.0.5";

    for _ in 0..5 {
        app.clone()
            .oneshot(login_request(ip, "admin", "wrong"))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(login_request(ip, "admin", ADMIN_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(response).await;
    assert_eq!(json["blocked"], true);
    assert!(json.get("blockDurationMs").is_none());

    // The rejected attempt never reached the credential check.
    assert_eq!(state.throttle.record(ip).map(|r| r.count), Some(5));
}

#[tokio::test]
async fn block_is_per_client() {
    let (app, _) = test_app().await;

    for _ in 0..5 {
        app.clone()
            .oneshot(login_request("10.0.0.6", "admin", "wrong"))
            .await
            .unwrap();
    }

    let response = app
        .oneshot(login_request("10.0.0.7", "admin", ADMIN_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn successful_login_resets_failure_count() {
    let (app, state) = test_app().await;
    let ip = "10.0.0.8";

    for _ in 0..4 {
        app.clone()
            .oneshot(login_request(ip, "admin", "wrong"))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(login_request(ip, "admin", ADMIN_PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.throttle.record(ip).is_none());

    let response = app
        .oneshot(login_request(ip, "admin", "wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["remainingAttempts"], 4);
}

#[tokio::test]
async fn unusable_admin_hash_still_counts_failures() {
    let state = state_with_admin_hash("not-a-phc-hash".to_string()).await;
    let app = folio_web::app(state.clone());
    let ip = "10.9.9.9";

    for expected_remaining in [4, 3, 2, 1] {
        let response = app
            .clone()
            .oneshot(login_request(ip, "admin", "anything"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["remainingAttempts"], expected_remaining);
    }

    let response = app
        .clone()
        .oneshot(login_request(ip, "admin", "not-a-phc-hash"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(state.throttle.record(ip).map(|r| r.count), Some(5));
    assert!(state.throttle.is_blocked(ip));
}

#[tokio::test]
async fn malformed_login_body_is_a_json_error() {
    let (app, state) = test_app().await;

    let response = app
        .oneshot(raw_json_request("/api/admin/login", "10.0.0.9", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
    // Never reached the credential check.
    assert!(state.throttle.record("10.0.0.9").is_none());
}

#[tokio::test]
async fn token_subject_is_the_admin_user_id() {
    let (app, state) = test_app().await;

    let response = app
        .oneshot(login_request("10.0.0.10", "admin", ADMIN_PASSWORD))
        .await
        .unwrap();
    let json = body_json(response).await;
    let claims = folio_web::auth::jwt::verify_token(
        &state.config.auth.jwt_secret,
        json["token"].as_str().unwrap(),
    )
    .unwrap();

    let admin = state.storage.get_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(claims.sub, admin.id);
}
