// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recipient Private Key Loading
//!
//! The key-custody collaborator hands over a raw secp256k1 private key when a
//! payload has to be opened. Keys arrive as `0x`-prefixed hex, either directly
//! or through the `VAULT_PRIVATE_KEY` environment variable.
//!
//! ## Security Considerations
//!
//! - Key is NEVER logged or persisted
//! - Decoded bytes live in a `Zeroizing` buffer and are wiped on drop
//! - Validation rejects anything that is not a usable secp256k1 scalar

use std::env;
use tracing::info;
use zeroize::Zeroizing;

use crate::error::{VaultError, VaultResult};

/// Environment variable holding the recipient private key
pub const PRIVATE_KEY_ENV: &str = "VAULT_PRIVATE_KEY";

const KEY_TYPE: &str = "recipient_private_key";

/// Parse a `0x`-prefixed 64-hex-character private key
///
/// # Errors
///
/// `InvalidKey` when the prefix is missing, the length is wrong, the text is
/// not hex, or the value is zero / not below the curve order.
pub fn parse_private_key(text: &str) -> VaultResult<Zeroizing<[u8; 32]>> {
    let key_str = text.trim();

    if key_str.is_empty() {
        return Err(VaultError::invalid_key(KEY_TYPE, "key is empty"));
    }

    let hex_str = key_str.strip_prefix("0x").ok_or_else(|| {
        VaultError::invalid_key(KEY_TYPE, "key must start with '0x' prefix (Ethereum format)")
    })?;

    if hex_str.len() != 64 {
        return Err(VaultError::invalid_key(
            KEY_TYPE,
            format!(
                "key must be exactly 64 hex characters (32 bytes), got {} characters",
                hex_str.len()
            ),
        ));
    }

    let mut key = Zeroizing::new([0u8; 32]);
    hex::decode_to_slice(hex_str, &mut key[..])
        .map_err(|e| VaultError::invalid_key(KEY_TYPE, format!("invalid hex characters: {}", e)))?;

    // Reject zero and out-of-range scalars up front
    k256::SecretKey::from_slice(&key[..])
        .map_err(|_| VaultError::invalid_key(KEY_TYPE, "not a valid secp256k1 scalar"))?;

    Ok(key)
}

/// Load the recipient private key from `VAULT_PRIVATE_KEY`
pub fn load_private_key_from_env() -> VaultResult<Zeroizing<[u8; 32]>> {
    let value = Zeroizing::new(env::var(PRIVATE_KEY_ENV).map_err(|_| {
        VaultError::invalid_key(
            KEY_TYPE,
            format!("{} environment variable not set", PRIVATE_KEY_ENV),
        )
    })?);

    let key = parse_private_key(&value)?;

    // Log success WITHOUT logging the actual key
    info!("✅ Recipient private key loaded (32 bytes)");

    Ok(key)
}
