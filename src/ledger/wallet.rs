//! Local wallet derivation (ed25519)
//!
//! Key material never touches the network: entropy is drawn locally, the
//! family seed encodes it, and the classic address is a hash of the public
//! key. Seeds are sensitive; callers persist them on the employee row and
//! must never log them in full.

use ed25519_dalek::SigningKey;
use rand::RngCore;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use thiserror::Error;
use zeroize::Zeroize;

/// Base58-check type prefix of an ed25519 family seed (renders as `sEd…`).
const SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];
/// Base58-check type prefix of a classic address (renders as `r…`).
const ADDRESS_PREFIX: u8 = 0x00;
/// Marker byte ed25519 public keys carry on the ledger.
const ED25519_KEY_PREFIX: u8 = 0xED;

const ENTROPY_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("seed is not valid base58")]
    InvalidEncoding,
    #[error("seed checksum mismatch")]
    BadChecksum,
    #[error("not an ed25519 family seed")]
    UnsupportedSeed,
}

/// A locally derived wallet: classic address plus the family seed that
/// regenerates it.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub address: String,
    /// Hex, with the ed25519 marker byte
    pub public_key: String,
    seed: String,
}

impl Wallet {
    /// Generate a fresh wallet. Pure local key-pair derivation, no network.
    pub fn generate() -> Self {
        let mut entropy = [0u8; ENTROPY_LEN];
        rand::thread_rng().fill_bytes(&mut entropy);
        let wallet = Self::from_entropy(&entropy);
        entropy.zeroize();
        wallet
    }

    /// Rederive a wallet from its family seed.
    pub fn from_seed(seed: &str) -> Result<Self, WalletError> {
        let mut entropy = decode_seed(seed)?;
        let wallet = Self::from_entropy(&entropy);
        entropy.zeroize();
        Ok(wallet)
    }

    fn from_entropy(entropy: &[u8; ENTROPY_LEN]) -> Self {
        // The raw ed25519 secret key is the first half of SHA-512(entropy)
        let digest = Sha512::digest(entropy);
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&digest[..32]);

        let signing_key = SigningKey::from_bytes(&secret);
        secret.zeroize();
        let verifying_key = signing_key.verifying_key();

        let mut public_key = Vec::with_capacity(33);
        public_key.push(ED25519_KEY_PREFIX);
        public_key.extend_from_slice(verifying_key.as_bytes());

        Wallet {
            address: encode_address(&account_id(&public_key)),
            public_key: hex::encode_upper(&public_key),
            seed: encode_seed(entropy),
        }
    }

    /// The family seed. Sensitive: never log it in full.
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Address/seed checksum: first four bytes of a double SHA-256.
fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = sha256(&sha256(payload));
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

fn base58check_encode(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_string()
}

fn base58check_decode(encoded: &str) -> Result<Vec<u8>, WalletError> {
    let data = bs58::decode(encoded)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .map_err(|_| WalletError::InvalidEncoding)?;
    if data.len() < 5 {
        return Err(WalletError::InvalidEncoding);
    }
    let (payload, check) = data.split_at(data.len() - 4);
    if check != checksum(payload) {
        return Err(WalletError::BadChecksum);
    }
    Ok(payload.to_vec())
}

fn encode_seed(entropy: &[u8; ENTROPY_LEN]) -> String {
    let mut payload = Vec::with_capacity(SEED_PREFIX.len() + ENTROPY_LEN);
    payload.extend_from_slice(&SEED_PREFIX);
    payload.extend_from_slice(entropy);
    base58check_encode(&payload)
}

fn decode_seed(seed: &str) -> Result<[u8; ENTROPY_LEN], WalletError> {
    let payload = base58check_decode(seed)?;
    let entropy = payload
        .strip_prefix(SEED_PREFIX.as_slice())
        .ok_or(WalletError::UnsupportedSeed)?;
    if entropy.len() != ENTROPY_LEN {
        return Err(WalletError::UnsupportedSeed);
    }
    let mut out = [0u8; ENTROPY_LEN];
    out.copy_from_slice(entropy);
    Ok(out)
}

/// Account id: RIPEMD-160 over SHA-256 of the marker-prefixed public key.
fn account_id(public_key: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(public_key)).into()
}

fn encode_address(account_id: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(ADDRESS_PREFIX);
    payload.extend_from_slice(account_id);
    base58check_encode(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_wallet_has_ledger_shaped_material() {
        let wallet = Wallet::generate();
        assert!(wallet.seed().starts_with("sEd"), "seed: {}", wallet.seed());
        assert!(wallet.address.starts_with('r'), "address: {}", wallet.address);
        assert!(wallet.public_key.starts_with("ED"));
        assert_eq!(wallet.public_key.len(), 66);
    }

    #[test]
    fn seed_round_trip_rederives_the_same_wallet() {
        let wallet = Wallet::generate();
        let again = Wallet::from_seed(wallet.seed()).unwrap();
        assert_eq!(again.address, wallet.address);
        assert_eq!(again.public_key, wallet.public_key);
        assert_eq!(again.seed(), wallet.seed());
    }

    #[test]
    fn distinct_wallets_do_not_collide() {
        let a = Wallet::generate();
        let b = Wallet::generate();
        assert_ne!(a.address, b.address);
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn tampered_seed_is_rejected() {
        let wallet = Wallet::generate();
        let mut chars: Vec<char> = wallet.seed().chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();
        assert!(Wallet::from_seed(&tampered).is_err());
    }

    #[test]
    fn foreign_seed_formats_are_rejected() {
        assert!(matches!(
            Wallet::from_seed("not base58 0OIl"),
            Err(WalletError::InvalidEncoding)
        ));
        // valid base58-check but not an ed25519 seed prefix
        let other = base58check_encode(&[0x21, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]);
        assert!(matches!(
            Wallet::from_seed(&other),
            Err(WalletError::UnsupportedSeed)
        ));
    }
}
