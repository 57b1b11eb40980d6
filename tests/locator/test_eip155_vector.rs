// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Signer recovery against the published EIP-155 example transaction

use ethers::types::Transaction;
use worlddex_vault::crypto::derive_address;
use worlddex_vault::locator::verify_record_signer;
use worlddex_vault::transaction::{canonicalize, TransactionRecord};
use worlddex_vault::VaultError;

const SENDER: &str = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F";

/// The example transaction as an RPC node would return it
fn rpc_json() -> serde_json::Value {
    serde_json::json!({
        "hash": "0x33469b22e9f636356c4160a87eb19df52b7412e8eac32a4a55ffe88ea8350788",
        "nonce": "0x9",
        "blockHash": null,
        "blockNumber": null,
        "transactionIndex": null,
        "from": SENDER,
        "to": "0x3535353535353535353535353535353535353535",
        "value": "0xde0b6b3a7640000",
        "gasPrice": "0x4a817c800",
        "gas": "0x5208",
        "input": "0x",
        "v": "0x25",
        "r": "0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276",
        "s": "0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
    })
}

fn record() -> TransactionRecord {
    let tx: Transaction = serde_json::from_value(rpc_json()).unwrap();
    TransactionRecord::try_from(&tx).unwrap()
}

#[test]
fn test_signing_hash() {
    let message = canonicalize(&record());
    assert_eq!(
        hex::encode(message.digest()),
        "daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"
    );
}

#[test]
fn test_recovers_published_sender() {
    let public_key = verify_record_signer(&record(), 1).unwrap();
    assert_eq!(derive_address(&public_key).to_checksum(), SENDER);
}

#[test]
fn test_recovered_key_matches_signing_key() {
    // Private key of the published example: 0x4646...46
    let secret = k256::SecretKey::from_slice(&[0x46u8; 32]).unwrap();
    let expected = worlddex_vault::PublicKey::from(&secret.public_key());

    assert_eq!(verify_record_signer(&record(), 1).unwrap(), expected);
}

#[test]
fn test_replayed_on_other_chain_is_rejected() {
    let result = verify_record_signer(&record(), 11_155_111);
    assert!(matches!(result, Err(VaultError::InvalidSignature { .. })));
}

#[test]
fn test_tampered_value_breaks_recovery() {
    let mut record = record();
    record.value += ethers::types::U256::one();

    let result = verify_record_signer(&record, 1);
    assert!(matches!(
        result,
        Err(VaultError::RecoveryMismatch { .. }) | Err(VaultError::InvalidSignature { .. })
    ));
}

#[test]
fn test_tampered_sender_is_mismatch() {
    let mut record = record();
    record.from = ethers::types::Address::repeat_byte(0x01);

    let err = verify_record_signer(&record, 1).unwrap_err();
    assert!(err.is_security_event());
    assert!(err.to_string().contains(SENDER));
}
