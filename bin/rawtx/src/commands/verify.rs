//! The `sender` and `verify` subcommands.

use alloy_primitives::{Address, Bytes};
use anyhow::{bail, Context, Result};
use clap::Args;
use rawtx_consensus::{sender, verify_signature};

/// Prints the address that signed a raw transaction.
#[derive(Debug, Clone, Args)]
pub(crate) struct SenderCmd {
    /// The hex encoded raw transaction.
    raw: Bytes,
}

impl SenderCmd {
    pub(crate) fn run(&self) -> Result<()> {
        let from = sender(&self.raw).context("Failed to recover sender")?;
        println!("{}", from.to_checksum(None));
        Ok(())
    }
}

/// Checks the signature of a raw transaction, optionally against an expected signer.
#[derive(Debug, Clone, Args)]
pub(crate) struct VerifyCmd {
    /// The hex encoded raw transaction.
    raw: Bytes,
    /// The address the transaction must be signed by.
    #[arg(long, short = 'e')]
    expected: Option<Address>,
}

impl VerifyCmd {
    pub(crate) fn run(&self) -> Result<()> {
        if !verify_signature(&self.raw, self.expected).context("Failed to decode transaction")? {
            bail!("Signature verification failed");
        }
        println!("Signature valid");
        Ok(())
    }
}
