// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! XChaCha20-Poly1305 Payload Encryption
//!
//! Authenticated encryption for payload bytes (images). The 24-byte nonce is
//! large enough to draw at random for every call.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    Key, XChaCha20Poly1305, XNonce,
};

use crate::error::{VaultError, VaultResult};

/// XChaCha20 nonce size
pub const PAYLOAD_NONCE_LEN: usize = 24;

/// Poly1305 tag size appended to every ciphertext
pub const PAYLOAD_TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`
///
/// Returns ciphertext with the 16-byte authentication tag appended.
///
/// # Security
///
/// **CRITICAL**: Never reuse the same nonce with the same key!
pub fn encrypt_payload(
    plaintext: &[u8],
    nonce: &[u8; PAYLOAD_NONCE_LEN],
    aad: &[u8],
    key: &[u8; 32],
) -> VaultResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));

    cipher
        .encrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| VaultError::EncryptionFailure {
            reason: format!("payload encryption failed: {}", e),
        })
}

/// Decrypt and authenticate `ciphertext` under `key`
///
/// # Errors
///
/// `PayloadDecryptFailure` when the tag does not verify (wrong key, wrong
/// AAD, or tampered bytes). No partial plaintext is ever returned.
pub fn decrypt_payload(
    ciphertext: &[u8],
    nonce: &[u8; PAYLOAD_NONCE_LEN],
    aad: &[u8],
    key: &[u8; 32],
) -> VaultResult<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(Key::from_slice(key));

    cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|e| VaultError::PayloadDecryptFailure {
            reason: format!("authentication error: {}", e),
        })
}
