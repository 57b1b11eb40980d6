// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Canonical Signing Payloads
//!
//! Rebuilds the exact bytes a sender signed, per schema:
//!
//! ```text
//! Legacy (EIP-155):  rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0])
//! Legacy (pre-155):  rlp([nonce, gasPrice, gas, to, value, data])
//! Fee market:        0x02 || rlp([chainId, nonce, maxPriorityFeePerGas, maxFeePerGas,
//!                                 gas, to, value, data, accessList])
//! ```
//!
//! `to` is the empty string for contract creation. The digest is Keccak-256
//! over these bytes; any field-order slip yields a different digest and a
//! different (wrong) recovered key.

use ethers::types::transaction::eip2930::AccessList;
use ethers::utils::rlp::RlpStream;

use super::types::{FeeSchema, TransactionRecord, FEE_MARKET_TX_TYPE};
use crate::crypto::keccak256;

/// Signed payload of a transaction and its digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalMessage {
    bytes: Vec<u8>,
    digest: [u8; 32],
}

impl CanonicalMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }
}

fn append_common_tail(stream: &mut RlpStream, record: &TransactionRecord) {
    stream.append(&record.gas);
    match &record.to {
        Some(to) => {
            stream.append(to);
        }
        None => {
            stream.append_empty_data();
        }
    }
    stream.append(&record.value);
    stream.append(&record.input.to_vec());
}

fn append_access_list(stream: &mut RlpStream, access_list: &AccessList) {
    stream.begin_list(access_list.0.len());
    for item in &access_list.0 {
        stream.begin_list(2);
        stream.append(&item.address);
        stream.begin_list(item.storage_keys.len());
        for key in &item.storage_keys {
            stream.append(key);
        }
    }
}

/// Rebuild the canonical signing payload of `record`
///
/// Unknown transaction types never reach this point: they are rejected when
/// the record is built, so no partial encoding is produced.
pub fn canonicalize(record: &TransactionRecord) -> CanonicalMessage {
    let bytes = match &record.fees {
        FeeSchema::Legacy {
            gas_price,
            chain_id,
        } => {
            let mut stream = RlpStream::new_list(if chain_id.is_some() { 9 } else { 6 });
            stream.append(&record.nonce);
            stream.append(gas_price);
            append_common_tail(&mut stream, record);
            if let Some(chain_id) = chain_id {
                stream.append(chain_id);
                stream.append(&0u8);
                stream.append(&0u8);
            }
            stream.out().to_vec()
        }
        FeeSchema::FeeMarket {
            chain_id,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            access_list,
        } => {
            let mut stream = RlpStream::new_list(9);
            stream.append(chain_id);
            stream.append(&record.nonce);
            stream.append(max_priority_fee_per_gas);
            stream.append(max_fee_per_gas);
            append_common_tail(&mut stream, record);
            append_access_list(&mut stream, access_list);

            let body = stream.out();
            let mut bytes = Vec::with_capacity(body.len() + 1);
            bytes.push(FEE_MARKET_TX_TYPE as u8);
            bytes.extend_from_slice(&body);
            bytes
        }
    };

    let digest = keccak256(&bytes);
    CanonicalMessage { bytes, digest }
}
