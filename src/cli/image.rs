// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Seal files for an address and open them with the recipient key

use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::locate::{load_config, locate_with_config};
use crate::crypto::{
    load_private_key_from_env, open, parse_private_key, seal, ChainAddress, Ciphertext,
    PublicKey, WrappedKey,
};

/// Arguments for the seal command
#[derive(Args, Debug)]
pub struct SealArgs {
    /// File to encrypt
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the ciphertext blob
    #[arg(long)]
    pub output: PathBuf,

    /// Recipient address; its key is located on chain
    #[arg(long, conflicts_with = "public_key", required_unless_present = "public_key")]
    pub address: Option<String>,

    /// Recipient public key (0x-prefixed hex, 64 or 65 bytes)
    #[arg(long)]
    pub public_key: Option<String>,

    /// Chain code (SEP, ETH) or chain id used with --address
    #[arg(long)]
    pub chain: Option<String>,
}

/// Arguments for the open command
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Ciphertext blob produced by seal
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the decrypted file
    #[arg(long)]
    pub output: PathBuf,

    /// Base64 wrapped key printed by seal
    #[arg(long)]
    pub wrapped_key: String,

    /// Recipient private key (can also be set via VAULT_PRIVATE_KEY env var)
    #[arg(long, env = "VAULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,
}

/// Encrypt `input` to the recipient and print the wrapped key
pub async fn seal_file(args: SealArgs) -> Result<()> {
    let recipient = match (&args.public_key, &args.address) {
        (Some(hex), _) => PublicKey::from_hex(hex)?,
        (None, Some(address)) => {
            let address: ChainAddress = address.parse()?;
            let config = load_config(args.chain.as_deref())?;
            println!("🔍 Locating public key for {}...", address);
            locate_with_config(&address, &config).await?
        }
        (None, None) => return Err(anyhow!("Must specify either --address or --public-key")),
    };

    let wrapped = seal_path(&args.input, &args.output, &recipient)?;

    println!("✅ Sealed {} -> {}", args.input.display(), args.output.display());
    println!("Wrapped key: {}", wrapped.to_base64());
    Ok(())
}

/// Decrypt `input` with the recipient private key
pub async fn open_file(args: OpenArgs) -> Result<()> {
    let private_key = match &args.private_key {
        Some(text) => parse_private_key(text)?,
        None => load_private_key_from_env()?,
    };
    let wrapped = WrappedKey::from_base64(&args.wrapped_key)?;

    let written = open_path(&args.input, &args.output, &wrapped, private_key.as_slice())?;

    println!(
        "✅ Opened {} -> {} ({} bytes)",
        args.input.display(),
        args.output.display(),
        written
    );
    Ok(())
}

/// Seal the file at `input` for `recipient`, writing the ciphertext blob to `output`
pub fn seal_path(
    input: &std::path::Path,
    output: &std::path::Path,
    recipient: &PublicKey,
) -> Result<WrappedKey> {
    let payload =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let (wrapped, ciphertext) = seal(&payload, recipient)?;

    fs::write(output, ciphertext.to_bytes())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Sealed {} bytes for {}", payload.len(), recipient);
    Ok(wrapped)
}

/// Open the ciphertext blob at `input`, writing the plaintext to `output`
pub fn open_path(
    input: &std::path::Path,
    output: &std::path::Path,
    wrapped: &WrappedKey,
    private_key: &[u8],
) -> Result<usize> {
    let blob = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let ciphertext = Ciphertext::from_bytes(&blob)?;
    let plaintext = open(wrapped, &ciphertext, private_key)?;

    fs::write(output, &plaintext)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(plaintext.len())
}
