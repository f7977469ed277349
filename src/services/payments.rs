//! Payment orchestration: the submit-and-record workflow
//!
//! One ledger submission appends exactly one transaction row; rejected and
//! failed attempts are recorded, not dropped, so history shows every
//! attempt. The ledger submission and the store write are not atomic: a
//! crash between them loses the local record of an attempt that may still
//! have succeeded on the network, and an operator must reconcile against
//! the ledger by hand.

use crate::auth::{AuthUser, Role};
use crate::db;
use crate::error::{AppError, ErrorCode};
use crate::ledger::{DEFAULT_TRUST_LIMIT, LedgerError, Submitted, Wallet};
use crate::state::AppState;
use crate::util::now_millis;

/// Outcome of a successful payment, as returned to the API.
#[derive(Debug, serde::Serialize)]
pub struct PaymentReceipt {
    pub tx_id: String,
    pub message: String,
}

fn infrastructure(err: LedgerError) -> AppError {
    tracing::error!(error = %err, "ledger unavailable");
    AppError::with_message(
        ErrorCode::InfrastructureError,
        format!("Failed to reach the ledger: {err}"),
    )
}

/// Send `amount` of the issued currency to `destination` and durably record
/// the outcome against the employee owning that wallet.
pub async fn send_payment(
    state: &AppState,
    actor: &AuthUser,
    destination: &str,
    amount: f64,
) -> Result<PaymentReceipt, AppError> {
    actor.require_role(Role::Admin)?;

    let destination = destination.trim();
    if destination.is_empty() {
        return Err(AppError::invalid_request(
            "Employee wallet address and amount are required.",
        ));
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::invalid_request(
            "Amount must be a positive number.",
        ));
    }

    // Connection or credential problems abort before anything is recorded.
    state.ledger.ensure_ready().await.map_err(infrastructure)?;

    let submitted = state
        .ledger
        .submit_payment(destination, amount, &state.currency_code)
        .await;

    // From here on exactly one row is appended, whatever the verdict.
    let employee = db::employees::find_by_wallet(&state.pool, destination).await?;
    let employee_id = employee.map(|e| e.id);
    if employee_id.is_none() {
        tracing::warn!(destination, "destination matches no employee; recording unresolved");
    }

    match submitted {
        Ok(Submitted::Succeeded { tx_hash }) => {
            db::transactions::insert(
                &state.pool,
                employee_id,
                amount,
                destination,
                db::transactions::STATUS_SUCCESS,
                Some(&tx_hash),
                now_millis(),
            )
            .await?;
            tracing::info!(destination, amount, %tx_hash, "payment validated");
            Ok(PaymentReceipt {
                message: format!(
                    "Payment of {amount} {} sent successfully to {destination}.",
                    state.currency_code
                ),
                tx_id: tx_hash,
            })
        }
        Ok(Submitted::Rejected { code }) => {
            db::transactions::insert(
                &state.pool,
                employee_id,
                amount,
                destination,
                db::transactions::STATUS_FAILURE,
                None,
                now_millis(),
            )
            .await?;
            tracing::warn!(destination, amount, %code, "payment rejected by the ledger");
            Err(AppError::with_message(
                ErrorCode::LedgerRejection,
                format!("Transaction failed: {code}"),
            ))
        }
        Err(err) => {
            // The intent may or may not have reached the network; record the
            // attempt as failed either way so it stays visible in history.
            db::transactions::insert(
                &state.pool,
                employee_id,
                amount,
                destination,
                db::transactions::STATUS_FAILURE,
                None,
                now_millis(),
            )
            .await?;
            tracing::error!(destination, amount, error = %err, "payment submission failed");
            Err(AppError::with_message(
                ErrorCode::InfrastructureError,
                format!("Failed to send payment: {err}"),
            ))
        }
    }
}

/// Establish a trust line from a holder wallet towards the issuer. Trust
/// lines are not payments and are not recorded as transactions.
pub async fn create_trust_line(
    state: &AppState,
    actor: &AuthUser,
    holder_seed: &str,
    issuer_address: Option<&str>,
    limit: Option<f64>,
) -> Result<String, AppError> {
    actor.require_role(Role::Admin)?;

    let holder_seed = holder_seed.trim();
    if holder_seed.is_empty() {
        return Err(AppError::invalid_request(
            "Employee wallet seed is required.",
        ));
    }
    let limit = limit.unwrap_or(DEFAULT_TRUST_LIMIT);
    if !limit.is_finite() || limit <= 0.0 {
        return Err(AppError::invalid_request(
            "Trust limit must be a positive number.",
        ));
    }

    state.ledger.ensure_ready().await.map_err(infrastructure)?;
    let issuer = match issuer_address {
        Some(address) => address.to_string(),
        None => state.ledger.issuer_address().map_err(infrastructure)?,
    };

    match state
        .ledger
        .establish_trust_line(holder_seed, &issuer, limit, &state.currency_code)
        .await
    {
        Ok(Submitted::Succeeded { .. }) => Ok("Trust line created successfully.".to_string()),
        Ok(Submitted::Rejected { code }) => Err(AppError::with_message(
            ErrorCode::LedgerRejection,
            format!("Transaction failed: {code}"),
        )),
        Err(err) => Err(AppError::with_message(
            ErrorCode::InfrastructureError,
            format!("Failed to create trust line: {err}"),
        )),
    }
}

/// Generate a wallet locally and persist it onto the employee row. A
/// wallet-address collision trips the store's unique constraint and is
/// surfaced, not swallowed.
pub async fn provision_wallet(
    state: &AppState,
    actor: &AuthUser,
    employee_id: i64,
) -> Result<Wallet, AppError> {
    actor.require_role(Role::Admin)?;

    let employee = db::employees::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found."))?;

    let wallet = Wallet::generate();
    db::employees::set_wallet(&state.pool, employee.id, &wallet.address, wallet.seed()).await?;
    tracing::info!(employee_id, address = %wallet.address, "wallet assigned to employee");

    Ok(wallet)
}
