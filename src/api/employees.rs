//! Employee endpoints (admin only)
//!
//! The list view joins users for display names and the most recent
//! transaction per employee; employees without history show the `"N/A"`
//! sentinel rather than a null.

use axum::{Extension, Json};
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::auth::{AuthUser, Role};
use crate::db;
use crate::db::employees::EmployeeStatusRow;
use crate::db::transactions::Transaction;
use crate::error::AppError;
use crate::services;
use crate::state::AppState;

use super::ApiResult;

pub async fn list_employees(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<Vec<EmployeeStatusRow>> {
    actor.require_role(Role::Admin)?;
    Ok(Json(db::employees::list_with_latest_status(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub user_id: i64,
    pub employer_id: i64,
    pub payroll_amount: f64,
}

/// Link an existing user to an employer as an employee.
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;

    if !req.payroll_amount.is_finite() || req.payroll_amount <= 0.0 {
        return Err(AppError::invalid_request(
            "Payroll amount must be a positive number.",
        ));
    }
    db::users::find_by_id(&state.pool, req.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found."))?;
    db::employers::find_by_id(&state.pool, req.employer_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employer not found."))?;

    let id =
        db::employees::create(&state.pool, req.user_id, req.employer_id, req.payroll_amount)
            .await?;
    tracing::info!(employee_id = id, user_id = req.user_id, "employee created");
    Ok(Json(serde_json::json!({ "id": id })))
}

/// GET /api/employees/{id}/latest-transaction
pub async fn latest_transaction(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Transaction> {
    actor.require_role(Role::Admin)?;
    let transaction = db::transactions::latest_for_employee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("No transactions found for the employee."))?;
    Ok(Json(transaction))
}

/// POST /api/employees/{id}/wallet: generate and assign a wallet
pub async fn provision_wallet(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let wallet = services::payments::provision_wallet(&state, &actor, id).await?;
    // The seed is returned exactly once, at provisioning time
    Ok(Json(serde_json::json!({
        "wallet_address": wallet.address,
        "wallet_seed": wallet.seed(),
    })))
}

/// GET /api/employees/{id}/wallet-seed
pub async fn wallet_seed(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    let employee = db::employees::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found."))?;
    let seed = employee
        .wallet_seed
        .ok_or_else(|| AppError::not_found("Wallet seed not found for the employee."))?;
    Ok(Json(serde_json::json!({ "wallet_seed": seed })))
}
