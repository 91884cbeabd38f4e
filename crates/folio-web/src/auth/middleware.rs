use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor for admin-only handlers; requires a valid bearer token whose
/// subject is the stored admin account.
pub struct AdminUser {
    pub id: String,
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

        let claims = super::jwt::verify_token(&state.config.auth.jwt_secret, token)
            .map_err(|_| AppError::Auth("Invalid or expired token".to_string()))?;

        let user = state
            .storage
            .get_user(&claims.sub)
            .await?
            .filter(|user| user.username == state.config.auth.admin_username)
            .ok_or_else(|| AppError::Auth("Invalid or expired token".to_string()))?;

        Ok(AdminUser {
            id: user.id,
            username: user.username,
        })
    }
}
