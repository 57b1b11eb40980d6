// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cryptographic Primitives
//!
//! - **Signature**: ECDSA public key recovery over secp256k1
//! - **Address**: Keccak-256 address derivation and EIP-55 checksums
//! - **ECDH**: Ephemeral-static key agreement with HKDF-SHA256
//! - **AES-GCM**: Wrapping of per-payload symmetric keys
//! - **Encryption**: XChaCha20-Poly1305 AEAD for payload bytes
//! - **Hybrid**: `seal` / `open` combining the above
//!
//! ## Security Considerations
//!
//! - Symmetric keys are single-use and zeroized on drop
//! - Nonces are drawn fresh from the OS RNG for every encryption
//! - Private keys are never logged; callers own and wipe their buffers

pub mod address;
pub mod aes_gcm;
pub mod ecdh;
pub mod encryption;
pub mod hybrid;
pub mod keys;
pub mod private_key;
pub mod signature;

pub use address::{derive_address, keccak256, ChainAddress};
pub use hybrid::{open, seal, Ciphertext, WrappedKey, WRAPPED_KEY_LEN};
pub use keys::PublicKey;
pub use private_key::{load_private_key_from_env, parse_private_key, PRIVATE_KEY_ENV};
pub use signature::{recover_public_key, RecoverableSignature};
