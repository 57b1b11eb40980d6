// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recovery-id normalization for chain-reported `v` values

use crate::error::{VaultError, VaultResult};

/// Map a chain-reported `v` to the standard recovery id {0, 1}
///
/// - `0 | 1`: y-parity as reported for typed transactions
/// - `27 | 28`: pre-EIP-155 legacy
/// - `>= 35`: EIP-155 `2 * chain_id + 35 + parity`, which must encode `chain_id`
pub fn to_standard_v(v: u64, chain_id: u64) -> VaultResult<u8> {
    match v {
        0 | 1 => Ok(v as u8),
        27 | 28 => Ok((v - 27) as u8),
        v if v >= 35 => {
            let encoded_chain = (v - 35) / 2;
            if encoded_chain != chain_id {
                return Err(VaultError::invalid_signature(format!(
                    "v={} is bound to chain {}, expected chain {}",
                    v, encoded_chain, chain_id
                )));
            }
            Ok(((v - 35) % 2) as u8)
        }
        other => Err(VaultError::invalid_signature(format!(
            "v={} is not a recognised recovery encoding",
            other
        ))),
    }
}
