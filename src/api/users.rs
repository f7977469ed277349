//! User management endpoints (admin only)

use axum::{Extension, Json};
use axum::extract::{Path, State};

use crate::auth::{AuthUser, Role};
use crate::db;
use crate::error::AppError;
use crate::state::AppState;

use super::ApiResult;

/// User as exposed over the API; the password hash stays in the store.
#[derive(serde::Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub role: String,
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<Vec<UserView>> {
    actor.require_role(Role::Admin)?;
    let users = db::users::list(&state.pool).await?;
    Ok(Json(
        users
            .into_iter()
            .map(|u| UserView {
                id: u.id,
                username: u.username,
                role: u.role,
            })
            .collect(),
    ))
}

/// Deleting a user cascades to its employee record and that employee's
/// transaction history.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    let deleted = db::users::delete(&state.pool, id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("User not found."));
    }
    tracing::info!(user_id = id, "user deleted");
    Ok(Json(serde_json::json!({
        "message": "User deleted successfully.",
    })))
}
