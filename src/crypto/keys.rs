// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 Public Keys
//!
//! A [`PublicKey`] is the 64-byte `x || y` form of an uncompressed secp256k1
//! point. Values only come out of signature recovery or out of an already
//! validated curve point, so every instance is guaranteed to be on the curve.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

use crate::error::{VaultError, VaultResult};

/// SEC1 tag for an uncompressed point
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Uncompressed secp256k1 public key (x || y, 64 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 64]);

impl PublicKey {
    /// Raw 64-byte coordinates
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// SEC1 uncompressed encoding (0x04 || x || y)
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = UNCOMPRESSED_TAG;
        out[1..].copy_from_slice(&self.0);
        out
    }

    /// 0x-prefixed hex of the 64 coordinate bytes
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse a key from 64 raw coordinate bytes, or a 33/65-byte SEC1 encoding
    ///
    /// The point is validated against the curve equation.
    pub fn from_slice(bytes: &[u8]) -> VaultResult<Self> {
        let point = match bytes.len() {
            64 => {
                let mut sec1 = [0u8; 65];
                sec1[0] = UNCOMPRESSED_TAG;
                sec1[1..].copy_from_slice(bytes);
                k256::PublicKey::from_sec1_bytes(&sec1)
            }
            33 | 65 => k256::PublicKey::from_sec1_bytes(bytes),
            other => {
                return Err(VaultError::invalid_key(
                    "public_key",
                    format!("expected 33, 64 or 65 bytes, got {}", other),
                ))
            }
        }
        .map_err(|_| VaultError::invalid_key("public_key", "point is not on secp256k1"))?;

        Ok(Self::from(&point))
    }

    /// Parse a hex string (with or without 0x) via [`PublicKey::from_slice`]
    pub fn from_hex(input: &str) -> VaultResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits)
            .map_err(|e| VaultError::invalid_key("public_key", format!("hex decode error: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Convert back into a curve point for key agreement
    pub(crate) fn to_curve_point(&self) -> VaultResult<k256::PublicKey> {
        k256::PublicKey::from_sec1_bytes(&self.to_uncompressed())
            .map_err(|_| VaultError::invalid_key("public_key", "point is not on secp256k1"))
    }
}

impl From<&k256::PublicKey> for PublicKey {
    fn from(point: &k256::PublicKey) -> Self {
        let encoded = point.to_encoded_point(false);
        let mut coords = [0u8; 64];
        coords.copy_from_slice(&encoded.as_bytes()[1..]);
        PublicKey(coords)
    }
}

impl From<&k256::ecdsa::VerifyingKey> for PublicKey {
    fn from(key: &k256::ecdsa::VerifyingKey) -> Self {
        Self::from(&k256::PublicKey::from(key))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
