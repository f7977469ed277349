//! Self-service endpoints: any authenticated user sees their own profile
//! and payment history, nothing else.

use axum::{Extension, Json, extract::State};

use crate::auth::AuthUser;
use crate::db;
use crate::db::transactions::Transaction;
use crate::error::AppError;
use crate::state::AppState;

use super::ApiResult;

#[derive(serde::Serialize)]
pub struct EmployeeProfile {
    pub id: i64,
    pub employer_id: i64,
    pub payroll_amount: f64,
    pub wallet_address: Option<String>,
}

#[derive(serde::Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
    /// Present only for users with an employee record
    pub employee: Option<EmployeeProfile>,
}

/// GET /api/me
pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ProfileResponse> {
    let row = db::users::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found."))?;
    let employee = db::employees::find_by_user(&state.pool, user.id).await?;

    Ok(Json(ProfileResponse {
        id: row.id,
        username: row.username,
        role: row.role,
        employee: employee.map(|e| EmployeeProfile {
            id: e.id,
            employer_id: e.employer_id,
            payroll_amount: e.payroll_amount,
            // The seed stays server-side; employees only see the address
            wallet_address: e.wallet_address,
        }),
    }))
}

/// GET /api/me/transactions: own history, newest first
pub async fn transactions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Transaction>> {
    let Some(employee) = db::employees::find_by_user(&state.pool, user.id).await? else {
        return Ok(Json(Vec::new()));
    };
    Ok(Json(
        db::transactions::list_for_employee(&state.pool, employee.id).await?,
    ))
}
