// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Etherscan-compatible explorer
//!
//! Queries `module=account&action=txlist` sorted newest first and picks the
//! first entry actually sent by the address; incoming transfers carry someone
//! else's signature and are skipped.

use async_trait::async_trait;
use ethers::types::{TxHash, H256};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::provider::ExplorerService;
use crate::config::VaultConfig;
use crate::crypto::ChainAddress;
use crate::error::{VaultError, VaultResult};

/// Explorer backed by an Etherscan `api` endpoint
pub struct EtherscanExplorer {
    api_url: String,
    api_key: Option<String>,
    page_size: usize,
    timeout_ms: u64,
    client: Client,
}

impl EtherscanExplorer {
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        page_size: usize,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_url,
            api_key,
            page_size: page_size.max(1),
            timeout_ms: timeout.as_millis() as u64,
            client,
        })
    }

    pub fn from_config(config: &VaultConfig) -> anyhow::Result<Self> {
        Self::new(
            config.chain.explorer_api_url.clone(),
            config.explorer_api_key.clone(),
            config.explorer_page_size,
            config.explorer_timeout(),
        )
    }

    fn query_params(&self, address: &ChainAddress) -> Vec<(&'static str, String)> {
        vec![
            ("module", "account".to_string()),
            ("action", "txlist".to_string()),
            ("address", address.to_checksum()),
            ("startblock", "0".to_string()),
            ("endblock", "99999999".to_string()),
            ("page", "1".to_string()),
            ("offset", self.page_size.to_string()),
            ("sort", "desc".to_string()),
            ("apikey", self.api_key.clone().unwrap_or_default()),
        ]
    }
}

#[async_trait]
impl ExplorerService for EtherscanExplorer {
    async fn most_recent_tx_hash(&self, address: &ChainAddress) -> VaultResult<TxHash> {
        debug!("Querying {} txlist for {}", self.api_url, address);

        let response = self
            .client
            .get(&self.api_url)
            .query(&self.query_params(address))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VaultError::ExplorerTimeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    no_activity(address, format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Explorer returned HTTP {} for {}", status, address);
            return Err(no_activity(address, format!("HTTP {}", status.as_u16())));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                VaultError::ExplorerTimeout {
                    timeout_ms: self.timeout_ms,
                }
            } else {
                no_activity(address, format!("unreadable body: {}", e))
            }
        })?;

        parse_txlist_response(address, &body)
    }

    fn name(&self) -> &'static str {
        "etherscan"
    }
}

#[derive(Debug, Deserialize)]
struct TxListResponse {
    status: String,
    message: String,
    /// Array of entries on success, an error string otherwise
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TxListEntry {
    hash: String,
    from: String,
}

fn no_activity(address: &ChainAddress, reason: impl Into<String>) -> VaultError {
    VaultError::NoActivityFound {
        address: address.to_checksum(),
        reason: reason.into(),
    }
}

fn parse_tx_hash(text: &str) -> Option<TxHash> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits).ok()?;
    if bytes.len() != 32 {
        return None;
    }
    Some(H256::from_slice(&bytes))
}

/// Extract the newest outgoing transaction hash from a `txlist` body
pub fn parse_txlist_response(address: &ChainAddress, body: &str) -> VaultResult<TxHash> {
    let response: TxListResponse = serde_json::from_str(body)
        .map_err(|e| no_activity(address, format!("malformed explorer response: {}", e)))?;

    if response.status != "1" || response.message != "OK" {
        let detail = match &response.result {
            serde_json::Value::String(s) => s.clone(),
            _ => String::new(),
        };
        return Err(no_activity(
            address,
            format!(
                "explorer status {} ({}) {}",
                response.status, response.message, detail
            )
            .trim_end()
            .to_string(),
        ));
    }

    let entries: Vec<TxListEntry> = serde_json::from_value(response.result)
        .map_err(|e| no_activity(address, format!("malformed result list: {}", e)))?;

    if entries.is_empty() {
        return Err(no_activity(address, "explorer returned an empty result"));
    }

    let outgoing = entries.iter().find(|entry| {
        entry
            .from
            .parse::<ChainAddress>()
            .map(|from| &from == address)
            .unwrap_or(false)
    });

    match outgoing {
        Some(entry) => parse_tx_hash(&entry.hash)
            .ok_or_else(|| no_activity(address, format!("invalid transaction hash '{}'", entry.hash))),
        None => Err(no_activity(
            address,
            format!("none of the {} newest transactions were sent by this address", entries.len()),
        )),
    }
}
