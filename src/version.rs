// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the WorldDex key vault

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-signer-recovery-2026-10-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-18";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "legacy-transactions",
    "eip155-replay-protection",
    "eip1559-transactions",
    "contract-creation",
    "ecdsa-key-recovery",
    "eip55-checksums",
    "etherscan-explorer",
    "ecies-key-wrap",
    "xchacha20-poly1305",
];

/// Supported chain IDs
pub const SUPPORTED_CHAINS: &[u64] = &[
    11155111, // Sepolia
    1,        // Ethereum Mainnet
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("WorldDex Vault {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "chains": SUPPORTED_CHAINS,
    })
}
