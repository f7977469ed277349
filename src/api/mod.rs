//! API routes

pub mod auth;
pub mod employees;
pub mod employers;
pub mod health;
pub mod ledger_ops;
pub mod me;
pub mod payments;
pub mod transactions;
pub mod users;

use axum::routing::{delete, get, post};
use axum::{Router, middleware};

use crate::auth::auth_middleware;
use crate::error::AppError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Login and health need no token
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/login", post(auth::login));

    // Everything else passes the identity gate; role checks happen inside
    // each handler.
    let protected = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/users", get(users::list_users))
        .route("/api/users/{id}", delete(users::delete_user))
        .route(
            "/api/employers",
            get(employers::list_employers).post(employers::create_employer),
        )
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/{id}/latest-transaction",
            get(employees::latest_transaction),
        )
        .route("/api/employees/{id}/wallet", post(employees::provision_wallet))
        .route("/api/employees/{id}/wallet-seed", get(employees::wallet_seed))
        .route("/api/me", get(me::profile))
        .route("/api/me/transactions", get(me::transactions))
        .route("/api/transactions", get(transactions::list_transactions))
        .route("/api/ledger/connect", post(ledger_ops::connect))
        .route("/api/ledger/issuer/balance", get(ledger_ops::issuer_balance))
        .route("/api/ledger/wallet/verify", post(ledger_ops::verify_wallet))
        .route("/api/ledger/fund-wallet", post(ledger_ops::fund_wallet))
        .route("/api/trustlines", post(payments::create_trust_line))
        .route("/api/payments", post(payments::send_payment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
