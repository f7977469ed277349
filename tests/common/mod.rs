//! Shared fixtures: an in-memory store and a scripted ledger double.
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use xpayroll::auth::{AuthUser, Role};
use xpayroll::db;
use xpayroll::ledger::{AccountInfo, Ledger, LedgerError, Submitted};
use xpayroll::state::AppState;
use xpayroll::util;

pub const ISSUER_ADDRESS: &str = "rISSUERaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const TEST_SECRET: &str = "test-secret";

/// What the scripted ledger does with submitted intents.
#[derive(Clone)]
pub enum Script {
    /// Terminal success with this transaction hash
    Succeed(&'static str),
    /// Terminal rejection with this engine code
    Reject(&'static str),
    /// Submission reaches the network layer and dies there
    NetworkFail(&'static str),
    /// `ensure_ready` itself fails; nothing is ever submitted
    Unreachable(&'static str),
}

pub struct MockLedger {
    script: Script,
    submissions: AtomicUsize,
}

impl MockLedger {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            submissions: AtomicUsize::new(0),
        }
    }

    /// How many intents were actually submitted.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    fn submit(&self) -> Result<Submitted, LedgerError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Succeed(hash) => Ok(Submitted::Succeeded {
                tx_hash: hash.to_string(),
            }),
            Script::Reject(code) => Ok(Submitted::Rejected {
                code: code.to_string(),
            }),
            Script::NetworkFail(msg) | Script::Unreachable(msg) => {
                Err(LedgerError::Network(msg.to_string()))
            }
        }
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn ensure_ready(&self) -> Result<(), LedgerError> {
        match &self.script {
            Script::Unreachable(msg) => Err(LedgerError::Network(msg.to_string())),
            _ => Ok(()),
        }
    }

    fn issuer_address(&self) -> Result<String, LedgerError> {
        Ok(ISSUER_ADDRESS.to_string())
    }

    async fn account_info(&self, address: &str) -> Result<AccountInfo, LedgerError> {
        Ok(AccountInfo {
            address: address.to_string(),
            balance_drops: "1000000000".to_string(),
            sequence: 1,
        })
    }

    async fn submit_payment(
        &self,
        _destination: &str,
        _amount: f64,
        _currency: &str,
    ) -> Result<Submitted, LedgerError> {
        self.submit()
    }

    async fn establish_trust_line(
        &self,
        _holder_seed: &str,
        _issuer_address: &str,
        _limit: f64,
        _currency: &str,
    ) -> Result<Submitted, LedgerError> {
        self.submit()
    }

    async fn fund_wallet(&self, address: &str) -> Result<serde_json::Value, LedgerError> {
        Ok(serde_json::json!({ "account": { "address": address } }))
    }
}

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub async fn test_state(script: Script) -> (AppState, Arc<MockLedger>) {
    let pool = test_pool().await;
    let ledger = Arc::new(MockLedger::new(script));
    let state = AppState {
        pool,
        jwt_secret: TEST_SECRET.to_string(),
        currency_code: "USD".to_string(),
        ledger: ledger.clone() as Arc<dyn Ledger>,
    };
    (state, ledger)
}

pub fn admin_actor() -> AuthUser {
    AuthUser {
        id: 1,
        username: "admin".into(),
        role: Role::Admin,
    }
}

pub fn employee_actor(id: i64) -> AuthUser {
    AuthUser {
        id,
        username: format!("employee-{id}"),
        role: Role::Employee,
    }
}

/// Create a user + employee pair, optionally with an assigned wallet.
/// Returns (user_id, employee_id).
pub async fn seed_employee(
    pool: &SqlitePool,
    username: &str,
    wallet: Option<&str>,
) -> (i64, i64) {
    let hash = util::hash_password("password1").unwrap();
    let user_id = db::users::create(pool, username, &hash, Role::Employee)
        .await
        .unwrap();
    db::employers::ensure_default(pool).await.unwrap();
    let employer_id = db::employers::list(pool).await.unwrap()[0].id;
    let employee_id = db::employees::create(pool, user_id, employer_id, 1000.0)
        .await
        .unwrap();
    if let Some(address) = wallet {
        db::employees::set_wallet(pool, employee_id, address, &format!("sEdSeedFor{username}"))
            .await
            .unwrap();
    }
    (user_id, employee_id)
}
