// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-256-GCM Key Wrapping
//!
//! Seals the per-payload symmetric key under the ECDH-derived wrapping key.
//!
//! **Sealed key format**:
//! ```text
//! [symmetric key (32 bytes) encrypted | tag (16 bytes)]
//! ```
//!
//! - Nonce: 12 bytes (96 bits), carried next to the sealed key
//! - AAD: SEC1 bytes of the ephemeral public key

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use zeroize::Zeroizing;

use crate::error::{VaultError, VaultResult};

/// AES-GCM nonce size
pub const WRAP_NONCE_LEN: usize = 12;

/// Sealed symmetric key size (32-byte key + 16-byte tag)
pub const SEALED_KEY_LEN: usize = 48;

/// Encrypt a 32-byte symmetric key under `wrapping_key`
pub fn wrap_key(
    symmetric_key: &[u8; 32],
    nonce: &[u8; WRAP_NONCE_LEN],
    aad: &[u8],
    wrapping_key: &[u8; 32],
) -> VaultResult<[u8; SEALED_KEY_LEN]> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(wrapping_key));

    let sealed = cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: symmetric_key,
                aad,
            },
        )
        .map_err(|e| VaultError::EncryptionFailure {
            reason: format!("key wrap failed: {}", e),
        })?;

    let mut out = [0u8; SEALED_KEY_LEN];
    out.copy_from_slice(&sealed);
    Ok(out)
}

/// Decrypt and authenticate a sealed symmetric key
///
/// # Errors
///
/// `KeyUnwrapFailure` on tag mismatch (wrong private key, corrupted wrapper,
/// tampering) or when the plaintext is not exactly 32 bytes.
pub fn unwrap_key(
    sealed_key: &[u8; SEALED_KEY_LEN],
    nonce: &[u8; WRAP_NONCE_LEN],
    aad: &[u8],
    wrapping_key: &[u8; 32],
) -> VaultResult<Zeroizing<[u8; 32]>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(wrapping_key));

    let plaintext = Zeroizing::new(
        cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed_key,
                    aad,
                },
            )
            .map_err(|e| VaultError::KeyUnwrapFailure {
                reason: format!(
                    "authentication error - wrong key or corrupted data: {}",
                    e
                ),
            })?,
    );

    if plaintext.len() != 32 {
        return Err(VaultError::KeyUnwrapFailure {
            reason: format!("unwrapped key is {} bytes, expected 32", plaintext.len()),
        });
    }

    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&plaintext);
    Ok(key)
}
