// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod image;
pub mod locate;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// WorldDex key vault CLI
#[derive(Parser, Debug)]
#[command(name = "vault-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Recover on-chain public keys and seal files to them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recover and verify the public key behind an address
    Locate(locate::LocateArgs),

    /// Encrypt a file to an address or public key
    Seal(image::SealArgs),

    /// Decrypt a sealed file with the recipient private key
    Open(image::OpenArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Locate(args) => locate::locate(args).await,
        Commands::Seal(args) => image::seal_file(args).await,
        Commands::Open(args) => image::open_file(args).await,
    }
}
