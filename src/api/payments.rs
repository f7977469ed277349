//! Payment and trust-line endpoints (admin only), delegated to the
//! payment orchestrator.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::services;
use crate::services::payments::PaymentReceipt;
use crate::state::AppState;

use super::ApiResult;

/// POST /api/payments
#[derive(Deserialize)]
pub struct SendPaymentRequest {
    pub destination: String,
    pub amount: f64,
}

pub async fn send_payment(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<SendPaymentRequest>,
) -> ApiResult<PaymentReceipt> {
    let receipt =
        services::payments::send_payment(&state, &actor, &req.destination, req.amount).await?;
    Ok(Json(receipt))
}

/// POST /api/trustlines
#[derive(Deserialize)]
pub struct CreateTrustLineRequest {
    pub holder_seed: String,
    /// Defaults to the configured issuer
    pub issuer_address: Option<String>,
    /// Defaults to the standard trust limit
    pub limit: Option<f64>,
}

pub async fn create_trust_line(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<CreateTrustLineRequest>,
) -> ApiResult<serde_json::Value> {
    let message = services::payments::create_trust_line(
        &state,
        &actor,
        &req.holder_seed,
        req.issuer_address.as_deref(),
        req.limit,
    )
    .await?;
    Ok(Json(serde_json::json!({ "message": message })))
}
