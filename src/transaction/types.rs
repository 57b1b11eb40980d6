// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transaction Records
//!
//! The signable fields of a broadcast transaction plus its signature and
//! claimed sender. Fee fields are a tagged schema chosen by the transaction
//! type discriminant when the record is built, so a record can never carry
//! a half-legacy, half-fee-market shape.

use ethers::types::{
    transaction::eip2930::AccessList, Address, Bytes, Transaction, TxHash, U256,
};
use serde::{Deserialize, Serialize};

use crate::error::{VaultError, VaultResult};

/// Type discriminant of legacy transactions (absent on old RPC responses)
pub const LEGACY_TX_TYPE: u64 = 0;

/// Type discriminant of EIP-1559 fee-market transactions
pub const FEE_MARKET_TX_TYPE: u64 = 2;

/// Fee fields and chain binding, per signing schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "camelCase")]
pub enum FeeSchema {
    /// Single gas price; `chain_id` is `None` for pre-EIP-155 signatures
    #[serde(rename_all = "camelCase")]
    Legacy {
        gas_price: U256,
        chain_id: Option<u64>,
    },
    /// EIP-1559 base-fee cap plus priority-fee cap
    #[serde(rename_all = "camelCase")]
    FeeMarket {
        chain_id: u64,
        max_priority_fee_per_gas: U256,
        max_fee_per_gas: U256,
        access_list: AccessList,
    },
}

impl FeeSchema {
    /// Type discriminant this schema is signed under
    pub fn tx_type(&self) -> u64 {
        match self {
            FeeSchema::Legacy { .. } => LEGACY_TX_TYPE,
            FeeSchema::FeeMarket { .. } => FEE_MARKET_TX_TYPE,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            FeeSchema::Legacy { chain_id, .. } => *chain_id,
            FeeSchema::FeeMarket { chain_id, .. } => Some(*chain_id),
        }
    }
}

/// Raw signature triple as reported by the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParts {
    pub r: U256,
    pub s: U256,
    /// Chain-specific encoding: 0/1, 27/28, or EIP-155 `2 * chainId + 35/36`
    pub v: u64,
}

/// A broadcast transaction, reduced to what signer recovery needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: TxHash,
    pub nonce: U256,
    pub gas: U256,
    /// `None` for contract creation
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub fees: FeeSchema,
    pub signature: SignatureParts,
    /// Sender claimed by the RPC node
    pub from: Address,
}

impl TransactionRecord {
    pub fn tx_type(&self) -> u64 {
        self.fees.tx_type()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.fees.chain_id()
    }
}

/// Chain id carried by an EIP-155 legacy `v`
pub fn chain_id_from_legacy_v(v: u64) -> Option<u64> {
    if v >= 35 {
        Some((v - 35) / 2)
    } else {
        None
    }
}

fn malformed(hash: &TxHash, reason: impl Into<String>) -> VaultError {
    VaultError::MalformedTransaction {
        tx_hash: format!("{:?}", hash),
        reason: reason.into(),
    }
}

fn quantity_to_u64(hash: &TxHash, field: &str, value: U256) -> VaultResult<u64> {
    if value > U256::from(u64::MAX) {
        return Err(malformed(hash, format!("{} does not fit in 64 bits", field)));
    }
    Ok(value.low_u64())
}

impl TryFrom<&Transaction> for TransactionRecord {
    type Error = VaultError;

    /// Normalize an RPC transaction into a record
    ///
    /// # Errors
    ///
    /// - `UnsupportedTransactionType` for any discriminant other than 0 or 2
    /// - `MalformedTransaction` when a field the schema needs is missing or
    ///   out of range
    fn try_from(tx: &Transaction) -> Result<Self, Self::Error> {
        let tx_type = tx
            .transaction_type
            .map(|t| t.as_u64())
            .unwrap_or(LEGACY_TX_TYPE);
        let v = tx.v.as_u64();

        let fees = match tx_type {
            LEGACY_TX_TYPE => {
                let gas_price = tx
                    .gas_price
                    .ok_or_else(|| malformed(&tx.hash, "legacy transaction without gasPrice"))?;
                // The signed chain id lives in v; a node-reported chainId is not authoritative
                FeeSchema::Legacy {
                    gas_price,
                    chain_id: chain_id_from_legacy_v(v),
                }
            }
            FEE_MARKET_TX_TYPE => {
                let chain_id = tx
                    .chain_id
                    .ok_or_else(|| malformed(&tx.hash, "fee-market transaction without chainId"))?;
                FeeSchema::FeeMarket {
                    chain_id: quantity_to_u64(&tx.hash, "chainId", chain_id)?,
                    max_priority_fee_per_gas: tx.max_priority_fee_per_gas.ok_or_else(|| {
                        malformed(&tx.hash, "fee-market transaction without maxPriorityFeePerGas")
                    })?,
                    max_fee_per_gas: tx.max_fee_per_gas.ok_or_else(|| {
                        malformed(&tx.hash, "fee-market transaction without maxFeePerGas")
                    })?,
                    access_list: tx.access_list.clone().unwrap_or_default(),
                }
            }
            other => return Err(VaultError::UnsupportedTransactionType { tx_type: other }),
        };

        Ok(TransactionRecord {
            hash: tx.hash,
            nonce: tx.nonce,
            gas: tx.gas,
            to: tx.to,
            value: tx.value,
            input: tx.input.clone(),
            fees,
            signature: SignatureParts {
                r: tx.r,
                s: tx.s,
                v,
            },
            from: tx.from,
        })
    }
}
