//! The `sign` subcommand.

use crate::request::RequestFile;
use alloy_primitives::B256;
use anyhow::Result;
use clap::Args;
use rawtx_consensus::{TracingHook, TxPipeline};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Builds, signs and assembles a transaction described by a JSON request file.
#[derive(Debug, Clone, Args)]
pub(crate) struct SignCmd {
    /// Path to the JSON request file.
    #[arg(long, short = 'r')]
    request: PathBuf,
    /// Transaction type, overriding the request file (0 legacy, 1 EIP-2930, 2 EIP-1559,
    /// 3 EIP-4844).
    #[arg(long, short = 't')]
    tx_type: Option<u8>,
    /// Hex encoded secp256k1 private key.
    #[arg(long, env = "RAWTX_PRIVATE_KEY", hide_env_values = true)]
    private_key: B256,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl SignCmd {
    pub(crate) fn run(&self) -> Result<()> {
        let file = RequestFile::read(&self.request)?;
        let tx_type = file.tx_type(self.tx_type)?;
        let request = file.to_request()?;

        let pipeline = TxPipeline::with_hook(TracingHook);
        let raw = pipeline.build_and_sign(tx_type, &request, self.private_key)?;
        info!(target: "rawtx", %tx_type, tx_hash = %raw.tx_hash, "Signed transaction");

        if self.json {
            println!("{}", json!({ "raw": raw.bytes, "txHash": raw.tx_hash }));
        } else {
            println!("raw:    {}", raw.bytes);
            println!("txHash: {}", raw.tx_hash);
        }
        Ok(())
    }
}
