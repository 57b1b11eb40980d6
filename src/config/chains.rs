// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Known chains: chain id, explorer API and default RPC endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sepolia testnet chain id (0xAA36A7)
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Ethereum mainnet chain id
pub const MAINNET_CHAIN_ID: u64 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Short code used on the command line and in `CHAIN` ("SEP", "ETH")
    pub code: String,
    pub name: String,
    /// Etherscan-compatible `api` endpoint
    pub explorer_api_url: String,
    pub rpc_url: String,
}

impl ChainConfig {
    pub fn sepolia() -> Self {
        ChainConfig {
            chain_id: SEPOLIA_CHAIN_ID,
            code: "SEP".to_string(),
            name: "Sepolia".to_string(),
            explorer_api_url: "https://api-sepolia.etherscan.io/api".to_string(),
            rpc_url: std::env::var("SEPOLIA_RPC_URL")
                .unwrap_or_else(|_| "https://rpc.sepolia.org".to_string()),
        }
    }

    pub fn mainnet() -> Self {
        ChainConfig {
            chain_id: MAINNET_CHAIN_ID,
            code: "ETH".to_string(),
            name: "Ethereum Mainnet".to_string(),
            explorer_api_url: "https://api.etherscan.io/api".to_string(),
            rpc_url: std::env::var("MAINNET_RPC_URL")
                .unwrap_or_else(|_| "https://eth.llamarpc.com".to_string()),
        }
    }
}

pub struct ChainRegistry {
    chains: HashMap<u64, ChainConfig>,
    default_chain: u64,
}

impl ChainRegistry {
    pub fn new() -> Self {
        let mut chains = HashMap::new();
        for chain in [ChainConfig::sepolia(), ChainConfig::mainnet()] {
            chains.insert(chain.chain_id, chain);
        }

        ChainRegistry {
            chains,
            default_chain: SEPOLIA_CHAIN_ID,
        }
    }

    pub fn get_chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.get(&chain_id)
    }

    /// Look up by code ("SEP", "ETH") or by decimal chain id
    pub fn resolve(&self, code_or_id: &str) -> Option<&ChainConfig> {
        let wanted = code_or_id.trim();
        if let Ok(chain_id) = wanted.parse::<u64>() {
            return self.get_chain(chain_id);
        }
        self.chains
            .values()
            .find(|chain| chain.code.eq_ignore_ascii_case(wanted))
    }

    pub fn default_chain(&self) -> &ChainConfig {
        &self.chains[&self.default_chain]
    }

    pub fn list_supported_chains(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.chains.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
