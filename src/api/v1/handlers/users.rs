/*
 * Responsibility
 * - /users 系 handler
 * - Path/Json を extractor で受け、DTO validation → UserService 呼び出し
 * - 認証済み principal は AuthPrincipal extractor 経由で受け取る
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::users::{CreateUserRequest, RoleResponse, UserResponse},
    api::v1::extractors::AuthPrincipal,
    error::AppError,
    state::AppState,
};

pub async fn create_user(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let input = req
        .validate()
        .map_err(|msg| AppError::bad_request("INVALID_USER", msg))?;

    tracing::debug!(principal = %principal.id, "add user");
    let user = state.users.add_user(input).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    tracing::debug!(principal = %principal.id, %user_id, "find user");
    let user = state.users.find_by_id(&user_id).await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(user_id): Path<String>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(principal = %principal.id, %user_id, "delete user");
    let deleted = state.users.delete(&user_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("user"))
    }
}

/// Never 404s: an unknown id resolves to the GUEST role by design.
pub async fn get_user_role(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(user_id): Path<String>,
) -> Result<Json<RoleResponse>, AppError> {
    tracing::debug!(principal = %principal.id, %user_id, "get user role");
    let role = state.users.get_role(&user_id).await?;

    Ok(Json(RoleResponse { role }))
}
