//! JSON-RPC client for the public testnet access point
//!
//! Plain REST + JSON bodies, no SDK dependency. The client autofills
//! sequence, fee and expiry from current network state, hands the completed
//! intent to the access point's signing facility, and polls the validated
//! ledger for the final engine result within a bounded window.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::OnceCell;

use super::wallet::Wallet;
use super::{AccountInfo, Ledger, LedgerError, Submitted};

/// Default trust limit granted towards the issuer.
pub const DEFAULT_TRUST_LIMIT: f64 = 1_000_000.0;

/// Per-request transport timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// How many ledgers ahead a submitted intent stays valid.
const LAST_LEDGER_OFFSET: u64 = 20;
/// Validation polling: attempts and spacing. Together with the transport
/// timeout this bounds the whole submit-and-wait call.
const VALIDATION_POLL_ATTEMPTS: u32 = 10;
const VALIDATION_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct LedgerClient {
    http: reqwest::Client,
    rpc_url: String,
    faucet_url: String,
    issuer_seed: String,
    /// Derived exactly once per process lifetime
    issuer: OnceLock<Wallet>,
    /// First successful server ping, memoized
    connected: OnceCell<()>,
}

impl LedgerClient {
    pub fn new(rpc_url: &str, faucet_url: &str, issuer_seed: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.to_string(),
            faucet_url: faucet_url.to_string(),
            issuer_seed: issuer_seed.to_string(),
            issuer: OnceLock::new(),
            connected: OnceCell::new(),
        }
    }

    /// Lazily derive the issuer wallet from the configured seed. Concurrent
    /// first calls may both derive; the result is identical and set-once.
    fn issuer(&self) -> Result<&Wallet, LedgerError> {
        if let Some(wallet) = self.issuer.get() {
            return Ok(wallet);
        }
        let wallet = Wallet::from_seed(&self.issuer_seed)?;
        Ok(self.issuer.get_or_init(|| wallet))
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let body = json!({ "method": method, "params": [params] });
        let response = self
            .http
            .post(&self.rpc_url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LedgerError::Network(format!(
                "access point returned HTTP {}",
                response.status()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;
        let result = value
            .get("result")
            .cloned()
            .ok_or_else(|| LedgerError::Rpc("response has no result field".into()))?;

        if result["status"] == "error" {
            let code = result["error"].as_str().unwrap_or("unknown").to_string();
            if code == "actNotFound" {
                return Err(LedgerError::AccountNotFound);
            }
            let message = result["error_message"].as_str().unwrap_or(&code);
            return Err(LedgerError::Rpc(format!("{code}: {message}")));
        }

        Ok(result)
    }

    async fn account_data(&self, address: &str) -> Result<AccountInfo, LedgerError> {
        let result = self
            .rpc(
                "account_info",
                json!({ "account": address, "ledger_index": "current" }),
            )
            .await?;
        let data = &result["account_data"];
        Ok(AccountInfo {
            address: address.to_string(),
            balance_drops: data["Balance"].as_str().unwrap_or("0").to_string(),
            sequence: data["Sequence"].as_u64().unwrap_or(0) as u32,
        })
    }

    async fn open_ledger_fee(&self) -> Result<String, LedgerError> {
        let result = self.rpc("fee", json!({})).await?;
        Ok(result["drops"]["open_ledger_fee"]
            .as_str()
            .unwrap_or("10")
            .to_string())
    }

    async fn ledger_current_index(&self) -> Result<u64, LedgerError> {
        let result = self.rpc("ledger_current", json!({})).await?;
        result["ledger_current_index"]
            .as_u64()
            .ok_or_else(|| LedgerError::Rpc("ledger_current returned no index".into()))
    }

    /// Autofill sequence, fee and expiry onto an unsigned intent from
    /// current network state.
    async fn autofill(&self, tx: &mut Value, account: &str) -> Result<(), LedgerError> {
        let info = self.account_data(account).await?;
        let fee = self.open_ledger_fee().await?;
        let current = self.ledger_current_index().await?;
        tx["Sequence"] = json!(info.sequence);
        tx["Fee"] = json!(fee);
        tx["LastLedgerSequence"] = json!(current + LAST_LEDGER_OFFSET);
        Ok(())
    }

    /// Submit a prepared intent and block until the network reports a
    /// terminal result. Signing is delegated to the access point's
    /// sign-and-submit facility; the autofilled expiry window and the
    /// polling limit keep the wait bounded.
    async fn submit_and_wait(&self, tx_json: Value, seed: &str) -> Result<Submitted, LedgerError> {
        let result = self
            .rpc(
                "submit",
                json!({
                    "tx_json": tx_json,
                    "seed": seed,
                    "key_type": "ed25519",
                    "fail_hard": false,
                }),
            )
            .await?;

        let engine = result["engine_result"].as_str().unwrap_or("").to_string();
        let hash = result["tx_json"]["hash"].as_str().unwrap_or("").to_string();

        // Anything outside the provisionally-applied / retry classes is a
        // terminal rejection straight from the open ledger.
        if !engine.starts_with("tes") && !engine.starts_with("ter") {
            return Ok(Submitted::Rejected { code: engine });
        }
        if hash.is_empty() {
            return Err(LedgerError::Rpc("submit response carried no hash".into()));
        }

        for _ in 0..VALIDATION_POLL_ATTEMPTS {
            tokio::time::sleep(VALIDATION_POLL_INTERVAL).await;
            match self.rpc("tx", json!({ "transaction": hash })).await {
                Ok(tx) if tx["validated"] == json!(true) => {
                    let code = tx["meta"]["TransactionResult"]
                        .as_str()
                        .unwrap_or("")
                        .to_string();
                    return Ok(if code == "tesSUCCESS" {
                        Submitted::Succeeded { tx_hash: hash }
                    } else {
                        Submitted::Rejected { code }
                    });
                }
                // Not yet in a validated ledger
                Ok(_) => continue,
                Err(LedgerError::Rpc(msg)) if msg.starts_with("txnNotFound") => continue,
                Err(e) => return Err(e),
            }
        }

        Err(LedgerError::Network(format!(
            "transaction {hash} was not validated within the wait window"
        )))
    }
}

#[async_trait]
impl Ledger for LedgerClient {
    async fn ensure_ready(&self) -> Result<(), LedgerError> {
        self.issuer()?;
        self.connected
            .get_or_try_init(|| async {
                let info = self.rpc("server_info", json!({})).await?;
                let build = info["info"]["build_version"].as_str().unwrap_or("unknown");
                tracing::info!(build, "connected to ledger access point");
                Ok::<(), LedgerError>(())
            })
            .await?;
        Ok(())
    }

    fn issuer_address(&self) -> Result<String, LedgerError> {
        Ok(self.issuer()?.address.clone())
    }

    async fn account_info(&self, address: &str) -> Result<AccountInfo, LedgerError> {
        self.account_data(address).await
    }

    async fn submit_payment(
        &self,
        destination: &str,
        amount: f64,
        currency: &str,
    ) -> Result<Submitted, LedgerError> {
        let issuer = self.issuer()?;
        let mut tx = json!({
            "TransactionType": "Payment",
            "Account": issuer.address,
            "Destination": destination,
            "Amount": {
                "currency": currency,
                "issuer": issuer.address,
                "value": amount.to_string(),
            },
        });
        self.autofill(&mut tx, &issuer.address).await?;
        tracing::info!(destination, amount, "submitting payment");
        self.submit_and_wait(tx, self.issuer_seed.as_str()).await
    }

    async fn establish_trust_line(
        &self,
        holder_seed: &str,
        issuer_address: &str,
        limit: f64,
        currency: &str,
    ) -> Result<Submitted, LedgerError> {
        let holder = Wallet::from_seed(holder_seed)?;
        let mut tx = json!({
            "TransactionType": "TrustSet",
            "Account": holder.address,
            "LimitAmount": {
                "currency": currency,
                "issuer": issuer_address,
                "value": limit.to_string(),
            },
        });
        self.autofill(&mut tx, &holder.address).await?;
        tracing::info!(holder = %holder.address, issuer = issuer_address, "submitting trust line");
        self.submit_and_wait(tx, holder_seed).await
    }

    async fn fund_wallet(&self, address: &str) -> Result<Value, LedgerError> {
        let response = self
            .http
            .post(&self.faucet_url)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "destination": address }))
            .send()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LedgerError::Rpc(format!(
                "faucet returned HTTP {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))
    }
}
