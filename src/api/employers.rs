//! Employer endpoints (admin only)

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::{AuthUser, Role};
use crate::db;
use crate::db::employers::Employer;
use crate::error::AppError;
use crate::state::AppState;

use super::ApiResult;

pub async fn list_employers(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<Vec<Employer>> {
    actor.require_role(Role::Admin)?;
    Ok(Json(db::employers::list(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct CreateEmployerRequest {
    pub name: String,
}

pub async fn create_employer(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<CreateEmployerRequest>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_request("Employer name is required."));
    }
    let id = db::employers::create(&state.pool, name).await?;
    Ok(Json(serde_json::json!({ "id": id, "name": name })))
}
