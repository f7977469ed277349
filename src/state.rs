//! Application state

use std::str::FromStr;
use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::auth::Role;
use crate::config::Config;
use crate::db;
use crate::ledger::{Ledger, LedgerClient};
use crate::util;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Currency code of the issued payroll asset
    pub currency_code: String,
    /// Shared ledger client (one connection, one issuer credential)
    pub ledger: Arc<dyn Ledger>,
}

impl AppState {
    /// Create a new AppState: open the store, run migrations, seed the
    /// default employer and a bootstrap admin, prepare the ledger client.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        db::employers::ensure_default(&pool).await?;
        Self::ensure_admin(&pool).await?;

        let ledger: Arc<dyn Ledger> = Arc::new(LedgerClient::new(
            &config.ledger_rpc_url,
            &config.faucet_url,
            &config.issuer_wallet_seed,
        ));

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            currency_code: config.currency_code.clone(),
            ledger,
        })
    }

    /// First run only: without any user nobody could ever log in, so seed an
    /// admin account from ADMIN_USERNAME / ADMIN_PASSWORD.
    async fn ensure_admin(pool: &SqlitePool) -> Result<(), BoxError> {
        if db::users::count(pool).await? > 0 {
            return Ok(());
        }
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());
        let hash = util::hash_password(&password)?;
        db::users::create(pool, &username, &hash, Role::Admin).await?;
        tracing::warn!("no users found; bootstrap admin '{username}' created; change its password");
        Ok(())
    }
}
