//! JSON request files and their conversion into a [TxRequest].

use alloy_primitives::{Bytes, U256};
use anyhow::{anyhow, bail, Context, Result};
use rawtx_consensus::{AccessListRequest, TxRequest, TxType};
use rawtx_rlp::parse_quantity;
use serde::Deserialize;
use std::path::Path;

/// A quantity as written in a request file: a decimal or `0x` hex string, or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Quantity {
    /// A JSON number.
    Number(u64),
    /// A decimal or hex string.
    Text(String),
}

impl Quantity {
    fn parse(&self, field: &str) -> Result<U256> {
        match self {
            Self::Number(n) => Ok(U256::from(*n)),
            Self::Text(text) => {
                parse_quantity(text).map_err(|err| anyhow!("Invalid `{field}` {text:?}: {err}"))
            }
        }
    }
}

/// The contents of a request file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct RequestFile {
    #[serde(rename = "type")]
    tx_type: Option<Quantity>,
    chain_id: Option<Quantity>,
    nonce: Option<Quantity>,
    gas_limit: Option<Quantity>,
    to: Option<Bytes>,
    value: Option<Quantity>,
    data: Option<Bytes>,
    gas_price: Option<Quantity>,
    max_priority_fee_per_gas: Option<Quantity>,
    max_fee_per_gas: Option<Quantity>,
    access_list: Option<Vec<AccessListRequest>>,
    max_fee_per_blob_gas: Option<Quantity>,
    blob_versioned_hashes: Option<Vec<Bytes>>,
}

fn quantity(value: &Option<Quantity>, field: &str) -> Result<Option<U256>> {
    value.as_ref().map(|q| q.parse(field)).transpose()
}

impl RequestFile {
    /// Reads a request file from disk.
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse request file {}", path.display()))
    }

    /// Parses a request file.
    pub(crate) fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the transaction type: `override_type`, then the `type` field, then the type
    /// implied by the fee fields that are present.
    pub(crate) fn tx_type(&self, override_type: Option<u8>) -> Result<TxType> {
        if let Some(ty) = override_type {
            return Ok(TxType::try_from(ty)?);
        }
        if let Some(ty) = quantity(&self.tx_type, "type")? {
            let Ok(ty) = u8::try_from(ty) else {
                bail!("Unsupported transaction type {ty}");
            };
            return Ok(TxType::try_from(ty)?);
        }
        Ok(if self.max_fee_per_blob_gas.is_some() || self.blob_versioned_hashes.is_some() {
            TxType::Eip4844
        } else if self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some() {
            TxType::Eip1559
        } else if self.access_list.is_some() {
            TxType::Eip2930
        } else {
            TxType::Legacy
        })
    }

    /// Converts the file into a [TxRequest]. Length checks happen later, in the builder.
    pub(crate) fn to_request(&self) -> Result<TxRequest> {
        Ok(TxRequest {
            chain_id: quantity(&self.chain_id, "chainId")?,
            nonce: quantity(&self.nonce, "nonce")?,
            gas_limit: quantity(&self.gas_limit, "gasLimit")?,
            to: self.to.clone(),
            value: quantity(&self.value, "value")?,
            data: self.data.clone(),
            gas_price: quantity(&self.gas_price, "gasPrice")?,
            max_priority_fee_per_gas: quantity(
                &self.max_priority_fee_per_gas,
                "maxPriorityFeePerGas",
            )?,
            max_fee_per_gas: quantity(&self.max_fee_per_gas, "maxFeePerGas")?,
            access_list: self.access_list.clone(),
            max_fee_per_blob_gas: quantity(&self.max_fee_per_blob_gas, "maxFeePerBlobGas")?,
            blob_versioned_hashes: self.blob_versioned_hashes.clone(),
        })
    }
}
