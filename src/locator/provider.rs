// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Collaborator traits for key location

use async_trait::async_trait;
use ethers::types::TxHash;

use crate::crypto::ChainAddress;
use crate::error::VaultResult;
use crate::transaction::TransactionRecord;

/// Source of an address's most recent outgoing transaction
///
/// Implementations wrap a block explorer (Etherscan-compatible `txlist`).
#[async_trait]
pub trait ExplorerService: Send + Sync {
    /// Hash of the most recent transaction sent by `address`
    ///
    /// # Errors
    /// `NoActivityFound` when the explorer reports nothing usable,
    /// `ExplorerTimeout` when the request exceeds its deadline.
    async fn most_recent_tx_hash(&self, address: &ChainAddress) -> VaultResult<TxHash>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Source of full transaction records by hash
#[async_trait]
pub trait RpcService: Send + Sync {
    /// Fetch and normalize the transaction with hash `tx_hash`
    ///
    /// # Errors
    /// `TransactionNotFound`, `RpcTimeout`, or the conversion errors
    /// `MalformedTransaction` / `UnsupportedTransactionType`.
    async fn fetch_transaction(&self, tx_hash: TxHash) -> VaultResult<TransactionRecord>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
