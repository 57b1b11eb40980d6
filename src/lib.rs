// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! WorldDex key vault
//!
//! Recovers the secp256k1 public key behind an Ethereum address from one of
//! its broadcast transactions, and seals payloads to that key with hybrid
//! (ECIES key wrap + XChaCha20-Poly1305) encryption.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod locator;
pub mod transaction;
pub mod version;

pub use config::{ChainConfig, ChainRegistry, VaultConfig};
pub use crypto::{
    derive_address, open, recover_public_key, seal, ChainAddress, Ciphertext, PublicKey,
    RecoverableSignature, WrappedKey,
};
pub use error::{VaultError, VaultResult};
pub use locator::{
    to_standard_v, verify_record_signer, EtherscanExplorer, EthersRpc, ExplorerService,
    KeyLocator, RpcService,
};
pub use transaction::{canonicalize, CanonicalMessage, FeeSchema, TransactionRecord};
