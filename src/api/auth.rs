//! Authentication endpoints: login and admin-gated registration

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::{AuthUser, Role, create_token};
use crate::db;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::ApiResult;

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let username = req.username.trim();
    let user = db::users::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &user.password) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let role = Role::from_db(&user.role).ok_or_else(|| {
        tracing::error!(username = %user.username, role = %user.role, "user row carries unknown role");
        AppError::new(ErrorCode::InternalError)
    })?;

    let token = create_token(user.id, &user.username, role, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(username = %user.username, "user authenticated");
    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/register (admin only)
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

pub async fn register(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;

    let username = req.username.trim();
    if username.len() < 3 {
        return Err(AppError::invalid_request(
            "Username must be at least 3 characters long.",
        ));
    }
    if req.password.len() < 6 {
        return Err(AppError::invalid_request(
            "Password must be at least 6 characters long.",
        ));
    }
    let role = Role::from_db(req.role.trim()).ok_or_else(|| {
        AppError::invalid_request("Role must be either admin or employee.")
    })?;

    if db::users::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::with_message(
            ErrorCode::AlreadyExists,
            "User already exists.",
        ));
    }

    let hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    let id = db::users::create(&state.pool, username, &hash, role).await?;

    tracing::info!(username, role = role.as_str(), "user registered");
    Ok(Json(serde_json::json!({
        "id": id,
        "message": "User registered successfully.",
    })))
}
