// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vault Error Types
//!
//! Every failure the core can produce, each with enough context to pick a
//! remediation:
//!
//! - **Chain data**: `UnsupportedTransactionType`, `MalformedTransaction`,
//!   `InvalidSignature`, `RecoveryMismatch`
//! - **Network**: `NoActivityFound`, `TransactionNotFound`, `ExplorerTimeout`,
//!   `RpcTimeout` (caller may retry with backoff)
//! - **Hybrid encryption**: `EncryptionFailure`, `KeyUnwrapFailure`,
//!   `PayloadDecryptFailure`
//! - **Input validation**: `InvalidKey`, `InvalidAddress`
//!
//! `RecoveryMismatch`, `KeyUnwrapFailure` and `PayloadDecryptFailure` are
//! security events. They are never retried and the operation must halt.

use thiserror::Error;

/// Result alias used throughout the crate
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors produced by key location and hybrid encryption
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    /// Transaction type discriminant matches no known signing schema
    #[error("Unsupported transaction type: {tx_type}")]
    UnsupportedTransactionType {
        /// Raw type discriminant reported by the chain
        tx_type: u64,
    },

    /// Transaction record is missing fields or carries out-of-range values
    #[error("Malformed transaction {tx_hash}: {reason}")]
    MalformedTransaction {
        /// Hash of the offending transaction
        tx_hash: String,
        /// Specific failure reason
        reason: String,
    },

    /// Signature is out of range or no public key can be recovered from it
    #[error("Invalid signature: {reason}")]
    InvalidSignature {
        /// Specific failure reason
        reason: String,
    },

    /// Explorer has no usable transaction for the address
    #[error("No activity found for {address}: {reason}")]
    NoActivityFound {
        /// Address that was queried
        address: String,
        /// Specific failure reason
        reason: String,
    },

    /// RPC endpoint could not return the transaction
    #[error("Transaction {tx_hash} not found: {reason}")]
    TransactionNotFound {
        /// Hash that was requested
        tx_hash: String,
        /// Specific failure reason
        reason: String,
    },

    /// Address derived from the recovered key disagrees with the expected signer
    #[error("Recovered signer {recovered} does not match expected signer {expected}")]
    RecoveryMismatch {
        /// Address the record (or caller) claims signed the transaction
        expected: String,
        /// Address derived from the recovered public key
        recovered: String,
    },

    /// Randomness source failed while sealing
    #[error("Encryption failed: {reason}")]
    EncryptionFailure {
        /// Specific failure reason
        reason: String,
    },

    /// Wrapped symmetric key could not be authenticated and decrypted
    #[error("Key unwrap failed: {reason}")]
    KeyUnwrapFailure {
        /// Specific failure reason
        reason: String,
    },

    /// Payload ciphertext could not be authenticated and decrypted
    #[error("Payload decryption failed: {reason}")]
    PayloadDecryptFailure {
        /// Specific failure reason
        reason: String,
    },

    /// Explorer request exceeded its deadline
    #[error("Explorer request timed out after {timeout_ms}ms")]
    ExplorerTimeout {
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// RPC request exceeded its deadline
    #[error("RPC request timed out after {timeout_ms}ms")]
    RpcTimeout {
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// Key material has the wrong size or is not a valid curve element
    #[error("Invalid key ({key_type}): {reason}")]
    InvalidKey {
        /// Which key failed (e.g. "recipient_private_key", "public_key")
        key_type: String,
        /// Specific failure reason
        reason: String,
    },

    /// Address text could not be parsed or fails its checksum
    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress {
        /// The rejected input
        input: String,
        /// Specific failure reason
        reason: String,
    },
}

impl VaultError {
    /// Network-origin failures that a caller may retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VaultError::NoActivityFound { .. }
                | VaultError::TransactionNotFound { .. }
                | VaultError::ExplorerTimeout { .. }
                | VaultError::RpcTimeout { .. }
        )
    }

    /// Failures that indicate tampering or a logic bug
    pub fn is_security_event(&self) -> bool {
        matches!(
            self,
            VaultError::RecoveryMismatch { .. }
                | VaultError::KeyUnwrapFailure { .. }
                | VaultError::PayloadDecryptFailure { .. }
        )
    }

    pub(crate) fn invalid_signature(reason: impl Into<String>) -> Self {
        VaultError::InvalidSignature {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_key(key_type: &str, reason: impl Into<String>) -> Self {
        VaultError::InvalidKey {
            key_type: key_type.to_string(),
            reason: reason.into(),
        }
    }
}
