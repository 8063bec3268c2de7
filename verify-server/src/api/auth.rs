//! Login endpoint

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::Role;
use shared::error::AppError;
use uuid::Uuid;

use crate::db;
use crate::state::AppState;
use crate::util::verify_password;

use super::ApiResult;

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Authenticate credentials and issue a session token
///
/// Unknown username and wrong password produce the same error so username
/// existence cannot be probed. Login is a pre-condition, not an invoice
/// action: no audit entry is written.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let user = db::users::find_by_username(&state.pool, &req.username)
        .await
        .map_err(db::storage_error)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!(username = %req.username, "login failed");
        return Err(AppError::invalid_credentials());
    }

    let role = Role::from_db(&user.role).ok_or_else(|| {
        tracing::error!(user_id = %user.id, role = %user.role, "stored role is invalid");
        AppError::internal()
    })?;

    let token = state
        .jwt
        .generate_token(user.id, &user.username, role)
        .map_err(|e| {
            tracing::error!(error = %e, "token generation failed");
            AppError::internal()
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, %role, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username,
            role,
        },
    }))
}
