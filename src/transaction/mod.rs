// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transaction records and their canonical signing payloads
//!
//! Supported schemas are legacy (type 0, with or without EIP-155 replay
//! protection) and EIP-1559 fee market (type 2). Adding a schema means a new
//! [`FeeSchema`] variant, a match arm in `TryFrom<&Transaction>`, and an
//! encoder arm in [`canonicalize`].

pub mod canonical;
pub mod types;

pub use canonical::{canonicalize, CanonicalMessage};
pub use types::{
    chain_id_from_legacy_v, FeeSchema, SignatureParts, TransactionRecord, FEE_MARKET_TX_TYPE,
    LEGACY_TX_TYPE,
};
