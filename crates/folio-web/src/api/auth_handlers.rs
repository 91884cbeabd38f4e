use axum::extract::State;
use axum::Json;

use crate::auth::client_ip::ClientIp;
use crate::auth::{jwt, password};
use crate::dto::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Admin login, throttled per client address.
///
/// Blocked clients are turned away before their credentials are looked at.
/// A wrong username or password counts as a failure, and so does an account
/// whose stored hash cannot be checked. A correct login clears the client's
/// failure history.
pub async fn login(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if let Some(retry_after) = state.throttle.block_remaining(&ip) {
        tracing::warn!("Rejected login from blocked client {ip}");
        return Err(AppError::TooManyAttempts {
            retry_after,
            block_duration_ms: None,
        });
    }

    let user = state.storage.get_user_by_username(&body.username).await?;

    // Unknown usernames still go through argon2.
    let stored_hash = user.as_ref().map(|u| u.password.clone());
    let attempt = body.password;
    let verified = tokio::task::spawn_blocking(move || {
        password::verify_login(stored_hash.as_deref(), &attempt)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = match verified {
        Ok(true) => user,
        Ok(false) => None,
        Err(e) => {
            tracing::error!("Cannot check password for user '{}': {e:#}", body.username);
            None
        }
    };

    let Some(user) = user else {
        let outcome = state.throttle.record_failure(&ip);
        tracing::warn!(
            "Failed login attempt for user '{}' from {ip} ({} attempts left)",
            body.username,
            outcome.remaining_attempts
        );

        if outcome.blocked {
            return Err(AppError::TooManyAttempts {
                retry_after: outcome
                    .block_duration
                    .unwrap_or(state.throttle.policy().block_duration),
                block_duration_ms: outcome.block_duration_ms(),
            });
        }
        return Err(AppError::InvalidCredentials {
            remaining_attempts: outcome.remaining_attempts,
        });
    };

    state.throttle.record_success(&ip);
    tracing::info!("Admin login succeeded for user '{}' from {ip}", user.username);

    let (token, expires_at) = jwt::create_token(
        &state.config.auth.jwt_secret,
        state.config.auth.jwt_ttl_hours,
        &user.id,
    )?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        expires_at,
    }))
}
