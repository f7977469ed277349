//! Full transaction history (admin only)

use axum::{Extension, Json, extract::State};

use crate::auth::{AuthUser, Role};
use crate::db;
use crate::db::transactions::TransactionRow;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/transactions: newest first, a user-facing ordering contract
pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<Vec<TransactionRow>> {
    actor.require_role(Role::Admin)?;
    Ok(Json(db::transactions::list_all(&state.pool).await?))
}
