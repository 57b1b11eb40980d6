// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Agreement
//!
//! Ephemeral-static Elliptic Curve Diffie-Hellman over secp256k1, followed by
//! HKDF-SHA256 to turn the shared x-coordinate into a 32-byte wrapping key.
//! Both sides of the key wrap call [`derive_wrapping_key`]: the sealer with
//! (ephemeral secret, recipient public), the opener with (recipient secret,
//! ephemeral public).

use hkdf::Hkdf;
use k256::{PublicKey, SecretKey};
use sha2::Sha256;
use zeroize::Zeroizing;

/// HKDF info label binding derived keys to this use
const WRAP_KEY_INFO: &[u8] = b"worlddex-vault/key-wrap/v1";

/// Derive a 32-byte wrapping key from an ECDH exchange
///
/// # Arguments
///
/// * `secret` - Our side of the exchange
/// * `peer` - The other party's public key
/// * `salt` - SEC1 bytes of the ephemeral public key, so every wrap derives
///   a distinct key even for the same recipient
///
/// # Errors
///
/// Only if HKDF rejects the output length, which cannot happen for 32 bytes.
pub fn derive_wrapping_key(
    secret: &SecretKey,
    peer: &PublicKey,
    salt: &[u8],
) -> Result<Zeroizing<[u8; 32]>, hkdf::InvalidLength> {
    // shared_point = peer * secret
    let shared_secret = k256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());

    let hkdf = Hkdf::<Sha256>::new(Some(salt), shared_secret.raw_secret_bytes());
    let mut derived_key = Zeroizing::new([0u8; 32]);
    hkdf.expand(WRAP_KEY_INFO, &mut derived_key[..])?;

    Ok(derived_key)
}
