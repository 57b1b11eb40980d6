// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON-RPC transaction source (`eth_getTransactionByHash`)

use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::TxHash;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::provider::RpcService;
use crate::config::VaultConfig;
use crate::error::{VaultError, VaultResult};
use crate::transaction::TransactionRecord;

/// RPC service over an ethers HTTP provider
pub struct EthersRpc {
    provider: Arc<Provider<Http>>,
    timeout: Duration,
}

impl EthersRpc {
    pub fn new(rpc_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)?;
        Ok(Self {
            provider: Arc::new(provider),
            timeout,
        })
    }

    pub fn from_config(config: &VaultConfig) -> anyhow::Result<Self> {
        Self::new(&config.chain.rpc_url, config.rpc_timeout())
    }
}

fn not_found(tx_hash: TxHash, reason: impl Into<String>) -> VaultError {
    VaultError::TransactionNotFound {
        tx_hash: format!("{:?}", tx_hash),
        reason: reason.into(),
    }
}

#[async_trait]
impl RpcService for EthersRpc {
    async fn fetch_transaction(&self, tx_hash: TxHash) -> VaultResult<TransactionRecord> {
        debug!("Fetching transaction {:?}", tx_hash);

        let tx = match tokio::time::timeout(self.timeout, self.provider.get_transaction(tx_hash))
            .await
        {
            Ok(Ok(Some(tx))) => tx,
            Ok(Ok(None)) => return Err(not_found(tx_hash, "node has no such transaction")),
            Ok(Err(e)) => return Err(not_found(tx_hash, e.to_string())),
            Err(_) => {
                return Err(VaultError::RpcTimeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        };

        TransactionRecord::try_from(&tx)
    }

    fn name(&self) -> &'static str {
        "ethers-http"
    }
}
