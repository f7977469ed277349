//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default public testnet JSON-RPC access point.
const DEFAULT_RPC_URL: &str = "https://s.altnet.rippletest.net:51234/";
/// Default testnet faucet for activating wallets.
const DEFAULT_FAUCET_URL: &str = "https://faucet.altnet.rippletest.net/accounts";

/// Server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Ledger JSON-RPC endpoint
    pub ledger_rpc_url: String,
    /// Testnet faucet endpoint
    pub faucet_url: String,
    /// Currency code of the issued payroll asset
    pub currency_code: String,
    /// Issuer wallet family seed (sensitive; the sole signing material)
    pub issuer_wallet_seed: String,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require an env var to be set and non-empty. A missing secret is a
    /// fatal configuration error at process start, not a per-request error.
    fn require(name: &str) -> Result<String, BoxError> {
        match std::env::var(name) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(format!("{name} must be set").into()),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://xpayroll.db".into()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            ledger_rpc_url: std::env::var("LEDGER_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_RPC_URL.into()),
            faucet_url: std::env::var("LEDGER_FAUCET_URL")
                .unwrap_or_else(|_| DEFAULT_FAUCET_URL.into()),
            currency_code: std::env::var("CURRENCY_CODE").unwrap_or_else(|_| "USD".into()),
            issuer_wallet_seed: Self::require("ISSUER_WALLET_SEED")?,
            jwt_secret: Self::require("JWT_SECRET")?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }
}
