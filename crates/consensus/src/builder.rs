//! Builds a typed [Transaction] from loosely typed caller parameters.

use crate::{
    fields::{parse_address, parse_b256, parse_tx_kind},
    signature::eip155_v,
    AccessList, AccessListItem, FieldEncodingError, Transaction, TxEip1559, TxEip2930, TxEip4844,
    TxError, TxLegacy, TxResult, TxType,
};
use alloc::vec::Vec;
use alloy_primitives::{Bytes, U256};
use tracing::trace;

/// One access list entry as supplied by a caller: unvalidated address and storage keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessListRequest {
    /// The accessed account. Must be 20 bytes.
    pub address: Bytes,
    /// The accessed storage slots. Each must be 32 bytes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub storage_keys: Vec<Bytes>,
}

/// Caller supplied transaction parameters.
///
/// Every field is optional; [build] decides which ones the chosen variant requires, fills in
/// defaults, and rejects the ones it does not understand. Byte strings are validated for
/// length only once the variant is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TxRequest {
    /// Chain id. Required for typed variants, enables EIP-155 for legacy ones.
    pub chain_id: Option<U256>,
    /// Sender nonce.
    pub nonce: Option<U256>,
    /// Gas limit.
    pub gas_limit: Option<U256>,
    /// Recipient address. [None] or empty creates a contract.
    pub to: Option<Bytes>,
    /// Transferred wei. Defaults to zero.
    pub value: Option<U256>,
    /// Call data. Defaults to empty.
    pub data: Option<Bytes>,
    /// Gas price of legacy and EIP-2930 transactions.
    pub gas_price: Option<U256>,
    /// Priority fee of EIP-1559 and EIP-4844 transactions.
    pub max_priority_fee_per_gas: Option<U256>,
    /// Fee cap of EIP-1559 and EIP-4844 transactions.
    pub max_fee_per_gas: Option<U256>,
    /// Access list of typed transactions. Defaults to empty.
    pub access_list: Option<Vec<AccessListRequest>>,
    /// Blob fee cap of EIP-4844 transactions.
    pub max_fee_per_blob_gas: Option<U256>,
    /// Blob versioned hashes of EIP-4844 transactions. Defaults to empty.
    pub blob_versioned_hashes: Option<Vec<Bytes>>,
}

impl TxRequest {
    /// Returns the wire names of the fields that are set but not part of `tx_type`.
    fn foreign_fields(&self, tx_type: TxType) -> impl Iterator<Item = &'static str> + '_ {
        let is_set = [
            ("gasPrice", self.gas_price.is_some()),
            ("maxPriorityFeePerGas", self.max_priority_fee_per_gas.is_some()),
            ("maxFeePerGas", self.max_fee_per_gas.is_some()),
            ("accessList", self.access_list.is_some()),
            ("maxFeePerBlobGas", self.max_fee_per_blob_gas.is_some()),
            ("blobVersionedHashes", self.blob_versioned_hashes.is_some()),
        ];
        let names = Transaction::field_names(tx_type);
        is_set
            .into_iter()
            .filter(move |(name, set)| *set && !names.contains(name))
            .map(|(name, _)| name)
    }

    fn access_list(&self) -> TxResult<AccessList> {
        let Some(entries) = &self.access_list else {
            return Ok(AccessList::default());
        };
        entries
            .iter()
            .map(|entry| {
                Ok(AccessListItem {
                    address: parse_address(&entry.address, "accessList.address")?,
                    storage_keys: entry
                        .storage_keys
                        .iter()
                        .map(|key| parse_b256(key, "accessList.storageKeys"))
                        .collect::<TxResult<_>>()?,
                })
            })
            .collect::<TxResult<Vec<_>>>()
            .map(AccessList)
    }
}

fn required(value: Option<U256>, field: &'static str) -> TxResult<U256> {
    value.ok_or(TxError::MissingRequiredField(field))
}

/// Accepts a legacy chain id only if both recovery parities yield a `v` that fits in 256 bits.
fn legacy_chain_id(chain_id: U256) -> TxResult<U256> {
    eip155_v(chain_id, true).map(|_| chain_id)
}

/// Builds a [Transaction] of `tx_type` from `request`.
///
/// ## Errors
/// - [TxError::MissingRequiredField] if `nonce`, `gasLimit`, a fee field of the variant, or
///   the chain id of a typed variant is missing.
/// - [TxError::InvalidFieldEncoding] if an address or hash has the wrong length, if a field
///   that does not belong to `tx_type` is set, or if a legacy chain id is too large for its
///   EIP-155 `v`.
pub fn build(tx_type: TxType, request: &TxRequest) -> TxResult<Transaction> {
    if let Some(field) = request.foreign_fields(tx_type).next() {
        return Err(TxError::InvalidFieldEncoding {
            field,
            reason: FieldEncodingError::NotApplicable(tx_type),
        });
    }

    let nonce = required(request.nonce, "nonce")?;
    let gas_limit = required(request.gas_limit, "gasLimit")?;
    let to = parse_tx_kind(request.to.as_ref().map(|b| &b[..]).unwrap_or_default(), "to")?;
    let value = request.value.unwrap_or_default();
    let data = request.data.clone().unwrap_or_default();

    let tx = match tx_type {
        TxType::Legacy => Transaction::Legacy(TxLegacy {
            chain_id: request.chain_id.map(legacy_chain_id).transpose()?,
            nonce,
            gas_price: required(request.gas_price, "gasPrice")?,
            gas_limit,
            to,
            value,
            data,
        }),
        TxType::Eip2930 => Transaction::Eip2930(TxEip2930 {
            chain_id: required(request.chain_id, "chainId")?,
            nonce,
            gas_price: required(request.gas_price, "gasPrice")?,
            gas_limit,
            to,
            value,
            data,
            access_list: request.access_list()?,
        }),
        TxType::Eip1559 => Transaction::Eip1559(TxEip1559 {
            chain_id: required(request.chain_id, "chainId")?,
            nonce,
            max_priority_fee_per_gas: required(
                request.max_priority_fee_per_gas,
                "maxPriorityFeePerGas",
            )?,
            max_fee_per_gas: required(request.max_fee_per_gas, "maxFeePerGas")?,
            gas_limit,
            to,
            value,
            data,
            access_list: request.access_list()?,
        }),
        TxType::Eip4844 => Transaction::Eip4844(TxEip4844 {
            chain_id: required(request.chain_id, "chainId")?,
            nonce,
            max_priority_fee_per_gas: required(
                request.max_priority_fee_per_gas,
                "maxPriorityFeePerGas",
            )?,
            max_fee_per_gas: required(request.max_fee_per_gas, "maxFeePerGas")?,
            gas_limit,
            to,
            value,
            data,
            access_list: request.access_list()?,
            max_fee_per_blob_gas: required(request.max_fee_per_blob_gas, "maxFeePerBlobGas")?,
            blob_versioned_hashes: request
                .blob_versioned_hashes
                .iter()
                .flatten()
                .map(|hash| parse_b256(hash, "blobVersionedHashes"))
                .collect::<TxResult<_>>()?,
        }),
    };

    trace!(target: "rawtx::builder", %tx_type, nonce = %nonce, "Built transaction");
    Ok(tx)
}
