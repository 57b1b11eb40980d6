// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for key location and the CLI

pub mod chains;

pub use chains::{ChainConfig, ChainRegistry, MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID};

use anyhow::{anyhow, Result};
use std::env;
use std::time::Duration;

/// Settings for the explorer and RPC collaborators
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Chain whose explorer and RPC are queried
    pub chain: ChainConfig,
    /// Etherscan API key
    pub explorer_api_key: Option<String>,
    /// Explorer request timeout in milliseconds
    pub explorer_timeout_ms: u64,
    /// RPC request timeout in milliseconds
    pub rpc_timeout_ms: u64,
    /// Transactions requested per explorer page
    pub explorer_page_size: usize,
}

impl VaultConfig {
    /// Load configuration from environment variables
    ///
    /// `CHAIN` selects the chain ("SEP" by default), `WEB3_PROVIDER`
    /// overrides its RPC URL.
    pub fn from_env() -> Result<Self> {
        let registry = ChainRegistry::new();
        let chain_code = env::var("CHAIN").unwrap_or_else(|_| "SEP".to_string());
        let mut chain = registry
            .resolve(&chain_code)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown chain '{}'", chain_code))?;

        if let Ok(rpc_url) = env::var("WEB3_PROVIDER") {
            if !rpc_url.trim().is_empty() {
                chain.rpc_url = rpc_url.trim().to_string();
            }
        }

        Ok(Self {
            chain,
            explorer_api_key: env::var("ETHERSCAN_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            explorer_timeout_ms: env::var("EXPLORER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            rpc_timeout_ms: env::var("RPC_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            explorer_page_size: env::var("EXPLORER_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.explorer_timeout_ms == 0 {
            return Err("Explorer timeout must be greater than 0".to_string());
        }
        if self.rpc_timeout_ms == 0 {
            return Err("RPC timeout must be greater than 0".to_string());
        }
        if self.explorer_page_size == 0 || self.explorer_page_size > 10_000 {
            return Err("Explorer page size must be between 1 and 10000".to_string());
        }
        if url::Url::parse(&self.chain.rpc_url).is_err() {
            return Err(format!("Invalid RPC URL: {}", self.chain.rpc_url));
        }
        if url::Url::parse(&self.chain.explorer_api_url).is_err() {
            return Err(format!(
                "Invalid explorer URL: {}",
                self.chain.explorer_api_url
            ));
        }
        Ok(())
    }

    pub fn explorer_timeout(&self) -> Duration {
        Duration::from_millis(self.explorer_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig::sepolia(),
            explorer_api_key: None,
            explorer_timeout_ms: 10000,
            rpc_timeout_ms: 10000,
            explorer_page_size: 1,
        }
    }
}
