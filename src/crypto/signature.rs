// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDSA Public Key Recovery
//!
//! Recovers the secp256k1 public key that produced a recoverable signature
//! over a 32-byte digest. The recoverer is chain-agnostic: it expects the
//! recovery id already normalized to {0, 1}. Mapping chain-specific `v`
//! encodings (27/28, EIP-155) happens in [`crate::locator::to_standard_v`].

use ethers::types::U256;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use super::keys::PublicKey;
use crate::error::{VaultError, VaultResult};

/// secp256k1 group order n
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// ECDSA signature with a standard recovery id
///
/// Construction enforces `r, s ∈ [1, n − 1]` and `recovery_id ∈ {0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    r: U256,
    s: U256,
    recovery_id: u8,
}

impl RecoverableSignature {
    pub fn new(r: U256, s: U256, recovery_id: u8) -> VaultResult<Self> {
        let order = U256::from_big_endian(&CURVE_ORDER);

        if r.is_zero() || r >= order {
            return Err(VaultError::invalid_signature(
                "r is outside [1, n - 1]",
            ));
        }
        if s.is_zero() || s >= order {
            return Err(VaultError::invalid_signature(
                "s is outside [1, n - 1]",
            ));
        }
        if recovery_id > 1 {
            return Err(VaultError::invalid_signature(format!(
                "recovery id must be 0 or 1 (normalize v first), got {}",
                recovery_id
            )));
        }

        Ok(Self { r, s, recovery_id })
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// 64-byte big-endian r || s
    pub fn to_compact(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        self.r.to_big_endian(&mut bytes[..32]);
        self.s.to_big_endian(&mut bytes[32..]);
        bytes
    }
}

/// Recover the public key that signed `digest`
///
/// Computes `r⁻¹·(s·R − digest·G)` where R is the curve point with
/// x-coordinate r and y-parity given by the recovery id.
///
/// # Errors
///
/// `InvalidSignature` when the scalars are rejected by the curve
/// implementation (including high-s values) or no valid point results.
pub fn recover_public_key(
    digest: &[u8; 32],
    signature: &RecoverableSignature,
) -> VaultResult<PublicKey> {
    let compact = signature.to_compact();
    let parsed = Signature::from_slice(&compact)
        .map_err(|e| VaultError::invalid_signature(format!("failed to parse r/s: {}", e)))?;

    let recovery_id = RecoveryId::from_byte(signature.recovery_id)
        .ok_or_else(|| VaultError::invalid_signature("recovery id out of range"))?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &parsed, recovery_id)
        .map_err(|e| VaultError::invalid_signature(format!("public key recovery failed: {}", e)))?;

    Ok(PublicKey::from(&verifying_key))
}
