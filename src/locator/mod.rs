// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key Locator
//!
//! Finds the secp256k1 public key behind an address from its most recent
//! outgoing transaction:
//!
//! 1. Explorer: newest transaction hash sent by the address
//! 2. RPC: the full transaction record
//! 3. Canonicalize the signed payload and normalize `v` for the chain
//! 4. Recover the key and derive its address
//! 5. Require recovered == claimed sender == requested address
//!
//! Only a key that passes step 5 is returned.

pub mod etherscan;
pub mod provider;
pub mod recovery_id;
pub mod rpc;

pub use etherscan::{parse_txlist_response, EtherscanExplorer};
pub use provider::{ExplorerService, RpcService};
pub use recovery_id::to_standard_v;
pub use rpc::EthersRpc;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::VaultConfig;
use crate::crypto::{derive_address, recover_public_key, ChainAddress, PublicKey, RecoverableSignature};
use crate::error::{VaultError, VaultResult};
use crate::transaction::{canonicalize, TransactionRecord};

/// Recover and verify the signer key of a single record
///
/// Fails with `RecoveryMismatch` when the key recovered from the signature
/// does not derive to the record's claimed sender.
pub fn verify_record_signer(record: &TransactionRecord, chain_id: u64) -> VaultResult<PublicKey> {
    let message = canonicalize(record);
    let recovery_id = to_standard_v(record.signature.v, chain_id)?;
    let signature =
        RecoverableSignature::new(record.signature.r, record.signature.s, recovery_id)?;

    let public_key = recover_public_key(message.digest(), &signature)?;
    let recovered = derive_address(&public_key);
    let claimed = ChainAddress::from(record.from);

    if recovered != claimed {
        warn!(
            "⚠️ Signer mismatch on {:?}: claimed {}, recovered {}",
            record.hash, claimed, recovered
        );
        return Err(VaultError::RecoveryMismatch {
            expected: claimed.to_checksum(),
            recovered: recovered.to_checksum(),
        });
    }

    Ok(public_key)
}

/// Locates verified public keys through an explorer and an RPC node
#[derive(Clone)]
pub struct KeyLocator {
    explorer: Arc<dyn ExplorerService>,
    rpc: Arc<dyn RpcService>,
}

impl KeyLocator {
    pub fn new(explorer: Arc<dyn ExplorerService>, rpc: Arc<dyn RpcService>) -> Self {
        Self { explorer, rpc }
    }

    /// Build an Etherscan + ethers HTTP locator from configuration
    pub fn from_config(config: &VaultConfig) -> anyhow::Result<Self> {
        let explorer = EtherscanExplorer::from_config(config)?;
        let rpc = EthersRpc::from_config(config)?;
        Ok(Self::new(Arc::new(explorer), Arc::new(rpc)))
    }

    /// Public key of `address`, verified against its latest transaction on `chain_id`
    pub async fn locate_public_key(
        &self,
        address: &ChainAddress,
        chain_id: u64,
    ) -> VaultResult<PublicKey> {
        info!(
            "🔍 Locating public key for {} on chain {} via {}",
            address,
            chain_id,
            self.explorer.name()
        );

        let tx_hash = self.explorer.most_recent_tx_hash(address).await?;
        debug!("Most recent outgoing transaction: {:?}", tx_hash);

        let record = self.rpc.fetch_transaction(tx_hash).await?;
        let public_key = verify_record_signer(&record, chain_id)?;

        let claimed = ChainAddress::from(record.from);
        if &claimed != address {
            warn!(
                "⚠️ Transaction {:?} was sent by {}, not {}",
                tx_hash, claimed, address
            );
            return Err(VaultError::RecoveryMismatch {
                expected: address.to_checksum(),
                recovered: claimed.to_checksum(),
            });
        }

        info!("✅ Public key verified for {}", address);
        Ok(public_key)
    }
}
