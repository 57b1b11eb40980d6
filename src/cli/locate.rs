// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use tracing::info;

use crate::config::{ChainRegistry, VaultConfig};
use crate::crypto::{derive_address, ChainAddress, PublicKey};
use crate::locator::KeyLocator;

/// Arguments for the locate command
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Address whose public key should be recovered
    #[arg(long)]
    pub address: String,

    /// Chain code (SEP, ETH) or chain id; defaults to CHAIN or SEP
    #[arg(long)]
    pub chain: Option<String>,
}

/// Load configuration, applying a `--chain` override
pub(crate) fn load_config(chain: Option<&str>) -> Result<VaultConfig> {
    dotenv::dotenv().ok();

    let mut config = VaultConfig::from_env()?;
    if let Some(code) = chain {
        let registry = ChainRegistry::new();
        let selected = registry
            .resolve(code)
            .cloned()
            .ok_or_else(|| anyhow!("Unsupported chain '{}'. Use SEP or ETH", code))?;
        // WEB3_PROVIDER only applies to the chain selected through the environment
        if selected.chain_id != config.chain.chain_id {
            config.chain = selected;
        }
    }

    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

/// Locate and verify the public key behind `address` using `config`
pub(crate) async fn locate_with_config(
    address: &ChainAddress,
    config: &VaultConfig,
) -> Result<PublicKey> {
    let locator = KeyLocator::from_config(config)?;
    let public_key = locator
        .locate_public_key(address, config.chain.chain_id)
        .await?;
    Ok(public_key)
}

/// Print the verified public key of an address
pub async fn locate(args: LocateArgs) -> Result<()> {
    let address: ChainAddress = args.address.parse()?;
    let config = load_config(args.chain.as_deref())?;

    println!("🔍 Locating public key for {} on {}...", address, config.chain.name);
    let public_key = locate_with_config(&address, &config).await?;
    info!("Recovered key derives to {}", derive_address(&public_key));

    println!("✅ Public key verified");
    println!("   Address:    {}", address);
    println!("   Public key: {}", public_key.to_hex());
    Ok(())
}
