// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Public key recovery tests

use ethers::types::U256;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use worlddex_vault::crypto::{keccak256, recover_public_key, PublicKey, RecoverableSignature};
use worlddex_vault::VaultError;

fn sign(signing_key: &SigningKey, digest: &[u8; 32]) -> RecoverableSignature {
    let (signature, recid) = signing_key.sign_prehash_recoverable(digest).unwrap();
    let bytes = signature.to_bytes();
    RecoverableSignature::new(
        U256::from_big_endian(&bytes[..32]),
        U256::from_big_endian(&bytes[32..]),
        recid.to_byte(),
    )
    .unwrap()
}

#[test]
fn test_recovery_round_trip() {
    for i in 0..16u8 {
        let signing_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(&[i; 7]);

        let signature = sign(&signing_key, &digest);
        let recovered = recover_public_key(&digest, &signature).unwrap();
        assert_eq!(recovered, PublicKey::from(signing_key.verifying_key()));
    }
}

#[test]
fn test_flipped_recovery_id_yields_other_key() {
    let signing_key = SigningKey::random(&mut OsRng);
    let digest = keccak256(b"recovery id matters");
    let signature = sign(&signing_key, &digest);

    let flipped =
        RecoverableSignature::new(signature.r(), signature.s(), 1 - signature.recovery_id())
            .unwrap();
    match recover_public_key(&digest, &flipped) {
        Ok(other) => assert_ne!(other, PublicKey::from(signing_key.verifying_key())),
        Err(e) => assert!(matches!(e, VaultError::InvalidSignature { .. })),
    }
}

#[test]
fn test_different_digest_yields_other_key() {
    let signing_key = SigningKey::random(&mut OsRng);
    let signature = sign(&signing_key, &keccak256(b"signed"));

    let recovered = recover_public_key(&keccak256(b"not signed"), &signature);
    if let Ok(other) = recovered {
        assert_ne!(other, PublicKey::from(signing_key.verifying_key()));
    }
}

#[test]
fn test_out_of_range_components_rejected() {
    assert!(matches!(
        RecoverableSignature::new(U256::zero(), U256::one(), 0),
        Err(VaultError::InvalidSignature { .. })
    ));
    assert!(matches!(
        RecoverableSignature::new(U256::one(), U256::MAX, 0),
        Err(VaultError::InvalidSignature { .. })
    ));
    assert!(matches!(
        RecoverableSignature::new(U256::one(), U256::one(), 27),
        Err(VaultError::InvalidSignature { .. })
    ));
}
