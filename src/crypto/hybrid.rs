// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hybrid Encryption (seal / open)
//!
//! Protects an arbitrary payload for the holder of a secp256k1 key:
//!
//! 1. A fresh 32-byte symmetric key encrypts the payload with
//!    XChaCha20-Poly1305 under a fresh 24-byte nonce.
//! 2. The symmetric key is wrapped ECIES-style: an ephemeral key pair performs
//!    ECDH with the recipient, HKDF-SHA256 derives a wrapping key, and
//!    AES-256-GCM seals the symmetric key.
//!
//! The ephemeral public key is authenticated as associated data by both
//! AEADs, which ties each ciphertext to the wrapped key issued with it.
//!
//! ## Wire formats
//!
//! ```text
//! WrappedKey: [ephemeral public (65) | nonce (12) | sealed key + tag (48)]
//! Ciphertext: [nonce (24) | payload ciphertext + tag (16)]
//! ```

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use super::aes_gcm::{unwrap_key, wrap_key, SEALED_KEY_LEN, WRAP_NONCE_LEN};
use super::ecdh::derive_wrapping_key;
use super::encryption::{decrypt_payload, encrypt_payload, PAYLOAD_NONCE_LEN, PAYLOAD_TAG_LEN};
use super::keys::PublicKey;
use crate::error::{VaultError, VaultResult};

/// SEC1 uncompressed point size
const EPHEMERAL_KEY_LEN: usize = 65;

/// Serialized size of a [`WrappedKey`]
pub const WRAPPED_KEY_LEN: usize = EPHEMERAL_KEY_LEN + WRAP_NONCE_LEN + SEALED_KEY_LEN;

/// Symmetric key sealed for one recipient
#[derive(Clone, PartialEq, Eq)]
pub struct WrappedKey {
    ephemeral_public: [u8; EPHEMERAL_KEY_LEN],
    nonce: [u8; WRAP_NONCE_LEN],
    sealed_key: [u8; SEALED_KEY_LEN],
}

impl WrappedKey {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(WRAPPED_KEY_LEN);
        out.extend_from_slice(&self.ephemeral_public);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.sealed_key);
        out
    }

    /// Parse the 125-byte wire form; anything else fails closed
    pub fn from_bytes(bytes: &[u8]) -> VaultResult<Self> {
        if bytes.len() != WRAPPED_KEY_LEN {
            return Err(VaultError::KeyUnwrapFailure {
                reason: format!(
                    "wrapped key must be {} bytes, got {}",
                    WRAPPED_KEY_LEN,
                    bytes.len()
                ),
            });
        }

        let (ephemeral, rest) = bytes.split_at(EPHEMERAL_KEY_LEN);
        let (nonce, sealed) = rest.split_at(WRAP_NONCE_LEN);

        let mut wrapped = WrappedKey {
            ephemeral_public: [0u8; EPHEMERAL_KEY_LEN],
            nonce: [0u8; WRAP_NONCE_LEN],
            sealed_key: [0u8; SEALED_KEY_LEN],
        };
        wrapped.ephemeral_public.copy_from_slice(ephemeral);
        wrapped.nonce.copy_from_slice(nonce);
        wrapped.sealed_key.copy_from_slice(sealed);
        Ok(wrapped)
    }

    /// Base64 text form stored as the image's `encrypted_key` property
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    pub fn from_base64(text: &str) -> VaultResult<Self> {
        let bytes = BASE64
            .decode(text.trim())
            .map_err(|e| VaultError::KeyUnwrapFailure {
                reason: format!("base64 decode error: {}", e),
            })?;
        Self::from_bytes(&bytes)
    }

    pub fn ephemeral_public(&self) -> &[u8; EPHEMERAL_KEY_LEN] {
        &self.ephemeral_public
    }
}

impl std::fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedKey")
            .field("ephemeral_public", &hex::encode(self.ephemeral_public))
            .finish_non_exhaustive()
    }
}

/// Authenticated payload ciphertext
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext {
    nonce: [u8; PAYLOAD_NONCE_LEN],
    body: Vec<u8>,
}

impl Ciphertext {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PAYLOAD_NONCE_LEN + self.body.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.body);
        out
    }

    /// Parse `nonce || ciphertext+tag`; truncated input fails closed
    pub fn from_bytes(bytes: &[u8]) -> VaultResult<Self> {
        if bytes.len() < PAYLOAD_NONCE_LEN + PAYLOAD_TAG_LEN {
            return Err(VaultError::PayloadDecryptFailure {
                reason: format!(
                    "ciphertext too short: expected at least {} bytes, got {}",
                    PAYLOAD_NONCE_LEN + PAYLOAD_TAG_LEN,
                    bytes.len()
                ),
            });
        }

        let mut nonce = [0u8; PAYLOAD_NONCE_LEN];
        nonce.copy_from_slice(&bytes[..PAYLOAD_NONCE_LEN]);
        Ok(Ciphertext {
            nonce,
            body: bytes[PAYLOAD_NONCE_LEN..].to_vec(),
        })
    }

    /// Encrypted length, excluding the nonce
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl std::fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &self.body.len())
            .finish_non_exhaustive()
    }
}

fn fill_random(buf: &mut [u8]) -> VaultResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| VaultError::EncryptionFailure {
            reason: format!("randomness source failed: {}", e),
        })
}

/// Encrypt `payload` for the holder of `recipient`
///
/// # Errors
///
/// `EncryptionFailure` if the OS randomness source fails. Not retried.
pub fn seal(payload: &[u8], recipient: &PublicKey) -> VaultResult<(WrappedKey, Ciphertext)> {
    let recipient_point = recipient.to_curve_point()?;

    // Single-use symmetric key, zeroized on drop
    let mut symmetric_key = Zeroizing::new([0u8; 32]);
    fill_random(&mut symmetric_key[..])?;

    // Ephemeral key pair for the wrap
    let mut ephemeral_bytes = Zeroizing::new([0u8; 32]);
    fill_random(&mut ephemeral_bytes[..])?;
    let ephemeral_secret =
        SecretKey::from_slice(&ephemeral_bytes[..]).map_err(|_| VaultError::EncryptionFailure {
            reason: "random bytes are not a valid secp256k1 scalar".to_string(),
        })?;

    let mut ephemeral_public = [0u8; EPHEMERAL_KEY_LEN];
    ephemeral_public.copy_from_slice(
        ephemeral_secret
            .public_key()
            .to_encoded_point(false)
            .as_bytes(),
    );

    // Payload under the symmetric key
    let mut payload_nonce = [0u8; PAYLOAD_NONCE_LEN];
    fill_random(&mut payload_nonce)?;
    let body = encrypt_payload(payload, &payload_nonce, &ephemeral_public, &symmetric_key)?;

    // Symmetric key under the ECDH-derived wrapping key
    let wrapping_key = derive_wrapping_key(&ephemeral_secret, &recipient_point, &ephemeral_public)
        .map_err(|e| VaultError::EncryptionFailure {
            reason: format!("HKDF key derivation failed: {}", e),
        })?;
    let mut wrap_nonce = [0u8; WRAP_NONCE_LEN];
    fill_random(&mut wrap_nonce)?;
    let sealed_key = wrap_key(&symmetric_key, &wrap_nonce, &ephemeral_public, &wrapping_key)?;

    tracing::debug!(
        "🔒 Sealed {} byte payload ({} byte ciphertext)",
        payload.len(),
        body.len()
    );

    Ok((
        WrappedKey {
            ephemeral_public,
            nonce: wrap_nonce,
            sealed_key,
        },
        Ciphertext {
            nonce: payload_nonce,
            body,
        },
    ))
}

/// Decrypt a sealed payload with the recipient's 32-byte private key
///
/// The caller owns `recipient_private_key` and is responsible for zeroizing
/// it afterwards.
///
/// # Errors
///
/// - `InvalidKey` if the private key is not a valid secp256k1 scalar
/// - `KeyUnwrapFailure` if the wrapped key does not authenticate
/// - `PayloadDecryptFailure` if the payload does not authenticate
pub fn open(
    wrapped: &WrappedKey,
    ciphertext: &Ciphertext,
    recipient_private_key: &[u8],
) -> VaultResult<Vec<u8>> {
    if recipient_private_key.len() != 32 {
        return Err(VaultError::invalid_key(
            "recipient_private_key",
            format!("expected 32 bytes, got {}", recipient_private_key.len()),
        ));
    }
    let recipient_secret = SecretKey::from_slice(recipient_private_key).map_err(|_| {
        VaultError::invalid_key("recipient_private_key", "not a valid secp256k1 scalar")
    })?;

    let ephemeral_point = k256::PublicKey::from_sec1_bytes(&wrapped.ephemeral_public)
        .map_err(|_| VaultError::KeyUnwrapFailure {
            reason: "ephemeral public key is not a valid secp256k1 point".to_string(),
        })?;

    let wrapping_key =
        derive_wrapping_key(&recipient_secret, &ephemeral_point, &wrapped.ephemeral_public)
            .map_err(|e| VaultError::KeyUnwrapFailure {
                reason: format!("HKDF key derivation failed: {}", e),
            })?;

    let symmetric_key = unwrap_key(
        &wrapped.sealed_key,
        &wrapped.nonce,
        &wrapped.ephemeral_public,
        &wrapping_key,
    )?;

    decrypt_payload(
        &ciphertext.body,
        &ciphertext.nonce,
        &wrapped.ephemeral_public,
        &symmetric_key,
    )
}
