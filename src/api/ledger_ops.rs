//! Ledger utility endpoints (admin only)
//!
//! Connection check, issuer balance, wallet activation checks and faucet
//! funding. These talk to the network but never write to the store.

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::auth::{AuthUser, Role};
use crate::error::{AppError, ErrorCode};
use crate::ledger::LedgerError;
use crate::state::AppState;

use super::ApiResult;

fn infrastructure(err: LedgerError) -> AppError {
    tracing::error!(error = %err, "ledger unavailable");
    AppError::with_message(
        ErrorCode::InfrastructureError,
        format!("Failed to reach the ledger: {err}"),
    )
}

/// POST /api/ledger/connect: connect and load the issuer credential
pub async fn connect(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    state.ledger.ensure_ready().await.map_err(infrastructure)?;
    let address = state.ledger.issuer_address().map_err(infrastructure)?;
    Ok(Json(serde_json::json!({
        "message": "Connected to the ledger successfully.",
        "address": address,
    })))
}

/// GET /api/ledger/issuer/balance
pub async fn issuer_balance(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    state.ledger.ensure_ready().await.map_err(infrastructure)?;
    let address = state.ledger.issuer_address().map_err(infrastructure)?;
    let info = match state.ledger.account_info(&address).await {
        Ok(info) => info,
        Err(LedgerError::AccountNotFound) => {
            return Err(AppError::not_found(
                "Issuer account not found on the ledger. Fund it first.",
            ));
        }
        Err(e) => return Err(infrastructure(e)),
    };
    Ok(Json(serde_json::json!({
        "address": info.address,
        "balance": info.balance_drops,
    })))
}

#[derive(Deserialize)]
pub struct WalletAddressRequest {
    pub wallet_address: String,
}

/// POST /api/ledger/wallet/verify: is this wallet active on the network?
///
/// `actNotFound` is a business answer (not yet activated), not an error, so
/// both outcomes are 200s.
pub async fn verify_wallet(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<WalletAddressRequest>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    let address = req.wallet_address.trim();
    if address.is_empty() {
        return Err(AppError::invalid_request("Wallet address is required."));
    }
    state.ledger.ensure_ready().await.map_err(infrastructure)?;

    match state.ledger.account_info(address).await {
        Ok(_) => Ok(Json(serde_json::json!({
            "activated": true,
            "message": format!("Wallet {address} is active."),
        }))),
        Err(LedgerError::AccountNotFound) => Ok(Json(serde_json::json!({
            "activated": false,
            "message": format!("Wallet {address} is not active."),
        }))),
        Err(e) => Err(infrastructure(e)),
    }
}

/// POST /api/ledger/fund-wallet: activate a wallet via the public faucet
pub async fn fund_wallet(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthUser>,
    Json(req): Json<WalletAddressRequest>,
) -> ApiResult<serde_json::Value> {
    actor.require_role(Role::Admin)?;
    let address = req.wallet_address.trim();
    if address.is_empty() {
        return Err(AppError::invalid_request("Wallet address is required."));
    }
    let details = state
        .ledger
        .fund_wallet(address)
        .await
        .map_err(infrastructure)?;
    tracing::info!(address, "wallet funded via faucet");
    Ok(Json(serde_json::json!({
        "message": format!("Wallet {address} funded successfully."),
        "details": details,
    })))
}
