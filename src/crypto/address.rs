// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chain Address Derivation
//!
//! Derives Ethereum-style addresses from public keys: Keccak-256 over the 64
//! uncompressed coordinate bytes, keep the low 20 bytes. Addresses render in
//! EIP-55 mixed-case checksum form.

use ethers::types::Address;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use super::keys::PublicKey;
use crate::error::VaultError;

/// Keccak-256 digest of `data`
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut hash);
    hash
}

/// 20-byte chain address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainAddress([u8; 20]);

impl ChainAddress {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        ChainAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// EIP-55 checksummed rendering
    ///
    /// A hex letter is upper-cased when the matching nibble of
    /// keccak256(lowercase hex) is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Derive the chain address controlled by `public_key`
pub fn derive_address(public_key: &PublicKey) -> ChainAddress {
    let hash = keccak256(public_key.as_bytes());
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    ChainAddress(address)
}

impl FromStr for ChainAddress {
    type Err = VaultError;

    /// Accepts all-lowercase, all-uppercase, or correctly checksummed input
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| VaultError::InvalidAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 40 {
            return Err(invalid("expected 40 hex characters"));
        }

        let decoded = hex::decode(digits).map_err(|_| invalid("contains non-hex characters"))?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&decoded);
        let address = ChainAddress(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && &address.to_checksum()[2..] != digits {
            return Err(invalid("mixed-case checksum mismatch"));
        }

        Ok(address)
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainAddress({})", self.to_checksum())
    }
}

impl From<Address> for ChainAddress {
    fn from(address: Address) -> Self {
        ChainAddress(address.0)
    }
}

impl From<ChainAddress> for Address {
    fn from(address: ChainAddress) -> Self {
        Address::from(address.0)
    }
}

impl Serialize for ChainAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for ChainAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
