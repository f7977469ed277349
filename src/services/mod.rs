//! Workflows that compose the role gate, the ledger adapter and the store

pub mod payments;
