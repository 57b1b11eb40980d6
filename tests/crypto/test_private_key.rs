// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recipient private key parsing tests

use worlddex_vault::crypto::parse_private_key;
use worlddex_vault::VaultError;

#[test]
fn test_parse_prefixed_hex() {
    let key = parse_private_key(&format!("0x{}", "46".repeat(32))).unwrap();
    assert_eq!(*key, [0x46u8; 32]);

    // Surrounding whitespace from .env files is tolerated
    let padded = parse_private_key(&format!("  0x{}\n", "46".repeat(32))).unwrap();
    assert_eq!(*padded, *key);
}

#[test]
fn test_reject_missing_prefix() {
    let result = parse_private_key(&"46".repeat(32));
    assert!(matches!(result, Err(VaultError::InvalidKey { .. })));
}

#[test]
fn test_reject_short_key() {
    let result = parse_private_key("0x1234");
    assert!(matches!(result, Err(VaultError::InvalidKey { .. })));
}

#[test]
fn test_reject_non_hex() {
    let result = parse_private_key(&format!("0x{}", "zz".repeat(32)));
    assert!(matches!(result, Err(VaultError::InvalidKey { .. })));
}

#[test]
fn test_reject_zero_scalar() {
    let result = parse_private_key(&format!("0x{}", "00".repeat(32)));
    assert!(matches!(result, Err(VaultError::InvalidKey { .. })));
}

#[test]
fn test_error_never_echoes_key() {
    let secret = format!("0x{}", "ff".repeat(32)); // above the curve order
    let err = parse_private_key(&secret).unwrap_err();
    assert!(!err.to_string().contains(&"ff".repeat(32)));
}
