use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::{Comment, NewComment};

use crate::auth::middleware::AdminUser;
use crate::dto::{CommentCreatedResponse, MessageResponse};
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list_approved(
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.storage.get_approved_comments().await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewComment>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), AppError> {
    let comment = state.storage.create_comment(body).await?;
    tracing::info!("New comment {} awaiting review", comment.id);

    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            message: "Comment submitted successfully. It will be reviewed before being published."
                .to_string(),
            comment,
        }),
    ))
}

pub async fn list_all(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.storage.get_all_comments().await?))
}

pub async fn approve(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.storage.approve_comment(&id).await? {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }
    tracing::info!("Comment {id} approved by {}", admin.username);
    Ok(Json(MessageResponse::new("Comment approved successfully")))
}

pub async fn remove(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.storage.delete_comment(&id).await? {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }
    tracing::info!("Comment {id} deleted by {}", admin.username);
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
