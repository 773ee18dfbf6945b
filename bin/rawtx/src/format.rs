//! Human readable rendering of recovered transactions.

use alloy_primitives::{
    utils::{format_ether, format_units},
    Bytes, TxKind, B256, U256,
};
use anyhow::Result;
use rawtx_consensus::{RecoveredTransaction, Transaction};
use std::fmt::Write;

/// Call data longer than this many bytes is truncated in the report.
const DATA_PREVIEW_BYTES: usize = 32;

fn gwei(value: U256) -> Result<String> {
    Ok(format!("{} Gwei", format_units(value, "gwei")?))
}

fn recipient(to: TxKind) -> String {
    match to {
        TxKind::Create => String::from("(contract creation)"),
        TxKind::Call(address) => address.to_checksum(None),
    }
}

fn data_preview(data: &Bytes) -> String {
    if data.len() > DATA_PREVIEW_BYTES {
        let preview = Bytes::copy_from_slice(&data[..DATA_PREVIEW_BYTES]);
        format!("{preview}... ({} bytes)", data.len())
    } else {
        data.to_string()
    }
}

/// Renders the fields, signer and signature of a recovered transaction.
pub(crate) fn report(recovered: &RecoveredTransaction) -> Result<String> {
    let tx = recovered.tx();
    let signature = recovered.signature();
    let mut out = String::new();

    writeln!(out, "=== Transaction ===")?;
    writeln!(out, "Type:       {} ({})", tx.tx_type(), u8::from(tx.tx_type()))?;
    writeln!(out, "Hash:       {}", recovered.tx_hash())?;
    match tx.chain_id() {
        Some(chain_id) => writeln!(out, "Chain ID:   {chain_id}")?,
        None => writeln!(out, "Chain ID:   (none)")?,
    }
    writeln!(out, "Nonce:      {}", tx.nonce())?;
    writeln!(out, "From:       {}", recovered.signer().to_checksum(None))?;
    writeln!(out, "To:         {}", recipient(tx.to()))?;
    writeln!(out, "Value:      {} ETH", format_ether(tx.value()))?;
    writeln!(out, "Data:       {}", data_preview(tx.data()))?;
    writeln!(out, "Gas limit:  {}", tx.gas_limit())?;

    writeln!(out, "\n=== Signature ===")?;
    writeln!(out, "R:          {}", B256::from(signature.r))?;
    writeln!(out, "S:          {}", B256::from(signature.s))?;
    writeln!(out, "V:          {}", signature.v(tx)?)?;
    writeln!(out, "Signed:     {}", recovered.signing_hash())?;

    writeln!(out, "\n=== {} fields ===", tx.tx_type())?;
    match tx {
        Transaction::Legacy(tx) => {
            writeln!(out, "Gas price:  {}", gwei(tx.gas_price)?)?;
        }
        Transaction::Eip2930(tx) => {
            writeln!(out, "Gas price:  {}", gwei(tx.gas_price)?)?;
        }
        Transaction::Eip1559(tx) => {
            writeln!(out, "Max priority fee: {}", gwei(tx.max_priority_fee_per_gas)?)?;
            writeln!(out, "Max fee:          {}", gwei(tx.max_fee_per_gas)?)?;
        }
        Transaction::Eip4844(tx) => {
            writeln!(out, "Max priority fee: {}", gwei(tx.max_priority_fee_per_gas)?)?;
            writeln!(out, "Max fee:          {}", gwei(tx.max_fee_per_gas)?)?;
            writeln!(out, "Max blob fee:     {}", gwei(tx.max_fee_per_blob_gas)?)?;
            writeln!(out, "Blob hashes:")?;
            for hash in &tx.blob_versioned_hashes {
                writeln!(out, "  {hash} (version {:#04x})", hash[0])?;
            }
        }
    }

    if let Some(access_list) = tx.access_list() {
        if access_list.is_empty() {
            writeln!(out, "Access list: (empty)")?;
        } else {
            writeln!(out, "Access list:")?;
            for item in access_list.iter() {
                writeln!(out, "  {}", item.address.to_checksum(None))?;
                for key in &item.storage_keys {
                    writeln!(out, "    {key}")?;
                }
            }
        }
    }

    Ok(out)
}
