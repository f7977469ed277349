//! Ledger client adapter for the XRP Ledger testnet
//!
//! One JSON-RPC connection and one issuer credential are shared across all
//! requests in the process. Submission is submit-and-wait: every intent ends
//! in a terminal verdict (succeeded or rejected) or a network error, never
//! partial state. An intent moves Built → Autofilled → Submitted →
//! {Succeeded | Rejected | NetworkError}; nothing in between is persisted,
//! so a crash after submission loses the local record of an attempt that may
//! still have succeeded on the network (reconciliation is manual).

mod client;
mod wallet;

pub use client::{DEFAULT_TRUST_LIMIT, LedgerClient};
pub use wallet::{Wallet, WalletError};

use async_trait::async_trait;
use thiserror::Error;

/// Terminal verdict for a submitted intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// The validated ledger reported the canonical success code.
    Succeeded { tx_hash: String },
    /// The network processed and declined the intent; the engine code names
    /// the reason (e.g. `tecUNFUNDED`).
    Rejected { code: String },
}

/// Account state reported by the network.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub address: String,
    /// Native-asset balance in drops, as reported
    pub balance_drops: String,
    pub sequence: u32,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The network has no such account (`actNotFound`): a wallet that exists
    /// locally but has never been activated by a funding payment. Business
    /// meaning differs from an outage, so it is its own variant.
    #[error("account not found on the ledger")]
    AccountNotFound,
    /// The access point answered with an error result
    #[error("ledger request failed: {0}")]
    Rpc(String),
    /// Transport failure or bounded wait exhausted
    #[error("ledger network error: {0}")]
    Network(String),
    /// Bad local wallet material
    #[error("invalid wallet material: {0}")]
    Wallet(#[from] WalletError),
}

/// Network-facing ledger operations, behind a trait so the payment
/// workflows can run against a scripted double in tests.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Idempotent readiness check: derives the issuer credential on first
    /// use and pings the access point once per process lifetime. Failures
    /// are reported to the caller, never retried internally.
    async fn ensure_ready(&self) -> Result<(), LedgerError>;

    /// Classic address of the issuer wallet.
    fn issuer_address(&self) -> Result<String, LedgerError>;

    /// Read-only account lookup.
    async fn account_info(&self, address: &str) -> Result<AccountInfo, LedgerError>;

    /// Issued-currency payment from the issuer to `destination`; blocks for
    /// the terminal result.
    async fn submit_payment(
        &self,
        destination: &str,
        amount: f64,
        currency: &str,
    ) -> Result<Submitted, LedgerError>;

    /// Trust line from the holder wallet towards the issuer, up to `limit`;
    /// blocks for the terminal result.
    async fn establish_trust_line(
        &self,
        holder_seed: &str,
        issuer_address: &str,
        limit: f64,
        currency: &str,
    ) -> Result<Submitted, LedgerError>;

    /// Ask the public faucet to activate and fund a wallet.
    async fn fund_wallet(&self, address: &str) -> Result<serde_json::Value, LedgerError>;
}
