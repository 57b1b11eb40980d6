// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! KeyLocator end to end over hand-written explorer and RPC services

use async_trait::async_trait;
use ethers::types::{Address, Bytes, Transaction, TxHash, U256, U64};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use worlddex_vault::crypto::{derive_address, ChainAddress, PublicKey};
use worlddex_vault::locator::{parse_txlist_response, ExplorerService, KeyLocator, RpcService};
use worlddex_vault::transaction::{canonicalize, FeeSchema, SignatureParts, TransactionRecord};
use worlddex_vault::{VaultError, VaultResult};

const SEPOLIA: u64 = 11_155_111;

struct MockExplorer {
    result: VaultResult<TxHash>,
    calls: AtomicUsize,
}

impl MockExplorer {
    fn new(result: VaultResult<TxHash>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ExplorerService for MockExplorer {
    async fn most_recent_tx_hash(&self, _address: &ChainAddress) -> VaultResult<TxHash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn name(&self) -> &'static str {
        "mock-explorer"
    }
}

/// Serves raw RPC transactions and converts them like a real node client
struct MockRpc {
    transactions: HashMap<TxHash, Transaction>,
    timeout: bool,
    calls: AtomicUsize,
}

impl MockRpc {
    fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: transactions.into_iter().map(|tx| (tx.hash, tx)).collect(),
            timeout: false,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RpcService for MockRpc {
    async fn fetch_transaction(&self, tx_hash: TxHash) -> VaultResult<TransactionRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.timeout {
            return Err(VaultError::RpcTimeout { timeout_ms: 10000 });
        }
        let tx = self
            .transactions
            .get(&tx_hash)
            .ok_or_else(|| VaultError::TransactionNotFound {
                tx_hash: format!("{:?}", tx_hash),
                reason: "unknown to mock".to_string(),
            })?;
        TransactionRecord::try_from(tx)
    }

    fn name(&self) -> &'static str {
        "mock-rpc"
    }
}

/// Sign a fresh transaction and return it in RPC form
fn signed_transaction(signing_key: &SigningKey, fee_market: bool, hash_byte: u8) -> Transaction {
    let sender: Address = derive_address(&PublicKey::from(signing_key.verifying_key())).into();
    let fees = if fee_market {
        FeeSchema::FeeMarket {
            chain_id: SEPOLIA,
            max_priority_fee_per_gas: U256::from(1_000_000_000u64),
            max_fee_per_gas: U256::from(20_000_000_000u64),
            access_list: Default::default(),
        }
    } else {
        FeeSchema::Legacy {
            gas_price: U256::from(5_000_000_000u64),
            chain_id: Some(SEPOLIA),
        }
    };

    let mut record = TransactionRecord {
        hash: TxHash::repeat_byte(hash_byte),
        nonce: U256::from(7),
        gas: U256::from(50_000),
        to: Some(Address::repeat_byte(0xbe)),
        value: U256::from(1u64),
        input: Bytes::from(vec![0x01, 0x02]),
        fees,
        signature: SignatureParts {
            r: U256::zero(),
            s: U256::zero(),
            v: 0,
        },
        from: sender,
    };

    let (signature, recid) = signing_key
        .sign_prehash_recoverable(canonicalize(&record).digest())
        .unwrap();
    let bytes = signature.to_bytes();
    let parity = recid.to_byte() as u64;
    record.signature = SignatureParts {
        r: U256::from_big_endian(&bytes[..32]),
        s: U256::from_big_endian(&bytes[32..]),
        v: if fee_market { parity } else { SEPOLIA * 2 + 35 + parity },
    };

    let mut tx = Transaction {
        hash: record.hash,
        nonce: record.nonce,
        from: record.from,
        to: record.to,
        value: record.value,
        gas: record.gas,
        input: record.input.clone(),
        v: U64::from(record.signature.v),
        r: record.signature.r,
        s: record.signature.s,
        ..Default::default()
    };
    match record.fees {
        FeeSchema::Legacy { gas_price, .. } => {
            tx.gas_price = Some(gas_price);
        }
        FeeSchema::FeeMarket {
            chain_id,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            access_list,
        } => {
            tx.transaction_type = Some(U64::from(2));
            tx.chain_id = Some(U256::from(chain_id));
            tx.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
            tx.max_fee_per_gas = Some(max_fee_per_gas);
            // Nodes report the effective price too; it is not part of the payload
            tx.gas_price = Some(U256::from(3_000_000_000u64));
            tx.access_list = Some(access_list);
        }
    }
    tx
}

fn sender_of(tx: &Transaction) -> ChainAddress {
    ChainAddress::from(tx.from)
}

#[tokio::test]
async fn test_locates_legacy_signer() {
    let signing_key = SigningKey::random(&mut OsRng);
    let tx = signed_transaction(&signing_key, false, 0x01);
    let address = sender_of(&tx);

    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(tx.hash))),
        Arc::new(MockRpc::new(vec![tx])),
    );
    let public_key = locator.locate_public_key(&address, SEPOLIA).await.unwrap();

    assert_eq!(public_key, PublicKey::from(signing_key.verifying_key()));
}

#[tokio::test]
async fn test_locates_fee_market_signer() {
    let signing_key = SigningKey::random(&mut OsRng);
    let tx = signed_transaction(&signing_key, true, 0x02);
    let address = sender_of(&tx);

    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(tx.hash))),
        Arc::new(MockRpc::new(vec![tx])),
    );
    let public_key = locator.locate_public_key(&address, SEPOLIA).await.unwrap();

    assert_eq!(derive_address(&public_key), address);
}

#[tokio::test]
async fn test_tampered_sender_is_rejected() {
    let signing_key = SigningKey::random(&mut OsRng);
    let mut tx = signed_transaction(&signing_key, true, 0x03);
    let impostor = Address::repeat_byte(0x66);
    tx.from = impostor;

    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(tx.hash))),
        Arc::new(MockRpc::new(vec![tx])),
    );
    let result = locator
        .locate_public_key(&ChainAddress::from(impostor), SEPOLIA)
        .await;

    assert!(matches!(result, Err(VaultError::RecoveryMismatch { .. })));
}

#[tokio::test]
async fn test_transaction_from_other_sender_is_rejected() {
    // Explorer pointed at a genuine transaction that someone else sent
    let signing_key = SigningKey::random(&mut OsRng);
    let tx = signed_transaction(&signing_key, false, 0x04);
    let requested = ChainAddress::from_bytes([0x12; 20]);

    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(tx.hash))),
        Arc::new(MockRpc::new(vec![tx])),
    );
    let err = locator
        .locate_public_key(&requested, SEPOLIA)
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::RecoveryMismatch { .. }));
    assert!(err.is_security_event());
}

#[tokio::test]
async fn test_explorer_failure_skips_rpc() {
    let address = ChainAddress::from_bytes([0x34; 20]);
    let explorer = Arc::new(MockExplorer::new(Err(VaultError::NoActivityFound {
        address: address.to_checksum(),
        reason: "explorer returned an empty result".to_string(),
    })));
    let rpc = Arc::new(MockRpc::new(vec![]));

    let locator = KeyLocator::new(explorer.clone(), rpc.clone());
    let err = locator.locate_public_key(&address, SEPOLIA).await.unwrap_err();

    assert!(matches!(err, VaultError::NoActivityFound { .. }));
    assert!(err.is_retryable());
    assert_eq!(explorer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(rpc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_explorer_timeout_propagates() {
    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Err(VaultError::ExplorerTimeout {
            timeout_ms: 10000,
        }))),
        Arc::new(MockRpc::new(vec![])),
    );
    let result = locator
        .locate_public_key(&ChainAddress::from_bytes([0x01; 20]), SEPOLIA)
        .await;

    assert_eq!(result, Err(VaultError::ExplorerTimeout { timeout_ms: 10000 }));
}

#[tokio::test]
async fn test_rpc_errors_propagate() {
    let address = ChainAddress::from_bytes([0x56; 20]);

    let missing = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(TxHash::repeat_byte(0xee)))),
        Arc::new(MockRpc::new(vec![])),
    );
    assert!(matches!(
        missing.locate_public_key(&address, SEPOLIA).await,
        Err(VaultError::TransactionNotFound { .. })
    ));

    let mut slow_rpc = MockRpc::new(vec![]);
    slow_rpc.timeout = true;
    let slow = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(TxHash::repeat_byte(0xee)))),
        Arc::new(slow_rpc),
    );
    assert!(matches!(
        slow.locate_public_key(&address, SEPOLIA).await,
        Err(VaultError::RpcTimeout { .. })
    ));
}

#[tokio::test]
async fn test_unsupported_type_is_reported() {
    let signing_key = SigningKey::random(&mut OsRng);
    let mut tx = signed_transaction(&signing_key, true, 0x05);
    tx.transaction_type = Some(U64::from(3)); // blob transaction
    let address = sender_of(&tx);

    let locator = KeyLocator::new(
        Arc::new(MockExplorer::new(Ok(tx.hash))),
        Arc::new(MockRpc::new(vec![tx])),
    );
    let result = locator.locate_public_key(&address, SEPOLIA).await;

    assert_eq!(
        result,
        Err(VaultError::UnsupportedTransactionType { tx_type: 3 })
    );
}

#[tokio::test]
async fn test_concurrent_lookups_share_locator() {
    let mut transactions = Vec::new();
    let mut expected = Vec::new();
    for i in 0..8u8 {
        let signing_key = SigningKey::random(&mut OsRng);
        let tx = signed_transaction(&signing_key, i % 2 == 0, 0x10 + i);
        expected.push((tx.hash, sender_of(&tx)));
        transactions.push(tx);
    }
    let rpc: Arc<dyn RpcService> = Arc::new(MockRpc::new(transactions));

    let mut handles = Vec::new();
    for (hash, address) in expected {
        let locator = KeyLocator::new(Arc::new(MockExplorer::new(Ok(hash))), rpc.clone());
        handles.push(tokio::spawn(async move {
            let key = locator.locate_public_key(&address, SEPOLIA).await?;
            Ok::<_, VaultError>((derive_address(&key), address))
        }));
    }

    for handle in handles {
        let (derived, address) = handle.await.unwrap().unwrap();
        assert_eq!(derived, address);
    }
}

#[test]
fn test_txlist_parsing() {
    let address: ChainAddress = "0x9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F".parse().unwrap();
    let outgoing = "0x1111111111111111111111111111111111111111111111111111111111111111";
    let incoming = "0x2222222222222222222222222222222222222222222222222222222222222222";

    // Newest first: an incoming transfer, then the address's own transaction
    let body = serde_json::json!({
        "status": "1",
        "message": "OK",
        "result": [
            { "hash": incoming, "from": "0x3535353535353535353535353535353535353535",
              "to": "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f" },
            { "hash": outgoing, "from": "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f",
              "to": "0x3535353535353535353535353535353535353535" }
        ]
    })
    .to_string();
    let hash = parse_txlist_response(&address, &body).unwrap();
    assert_eq!(hash, TxHash::repeat_byte(0x11));

    let incoming_only = serde_json::json!({
        "status": "1",
        "message": "OK",
        "result": [{ "hash": incoming, "from": "0x3535353535353535353535353535353535353535" }]
    })
    .to_string();
    assert!(matches!(
        parse_txlist_response(&address, &incoming_only),
        Err(VaultError::NoActivityFound { .. })
    ));

    let empty = r#"{"status":"0","message":"No transactions found","result":[]}"#;
    assert!(matches!(
        parse_txlist_response(&address, empty),
        Err(VaultError::NoActivityFound { .. })
    ));

    let ok_but_empty = r#"{"status":"1","message":"OK","result":[]}"#;
    assert!(matches!(
        parse_txlist_response(&address, ok_but_empty),
        Err(VaultError::NoActivityFound { .. })
    ));
}
