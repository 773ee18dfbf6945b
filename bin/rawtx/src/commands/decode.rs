//! The `decode` subcommand.

use crate::format::report;
use alloy_primitives::Bytes;
use anyhow::{Context, Result};
use clap::Args;
use rawtx_consensus::recover;

/// Decodes a raw transaction and recovers its signer.
#[derive(Debug, Clone, Args)]
pub(crate) struct DecodeCmd {
    /// The hex encoded raw transaction.
    raw: Bytes,
    /// Print the decoded transaction as JSON.
    #[arg(long)]
    json: bool,
    /// Print only the type, chain id, sender, recipient and value.
    #[arg(long, conflicts_with = "json")]
    summary: bool,
}

impl DecodeCmd {
    pub(crate) fn run(&self) -> Result<()> {
        let recovered = recover(&self.raw).context("Failed to decode transaction")?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&recovered)?);
        } else if self.summary {
            println!("{}", serde_json::to_string_pretty(&recovered.summary())?);
        } else {
            print!("{}", report(&recovered)?);
        }
        Ok(())
    }
}
