//! This module contains the [EIP-2930] access list types.
//!
//! [EIP-2930]: https://eips.ethereum.org/EIPS/eip-2930

use crate::{
    fields::{decode_hashes, hashes_item, parse_address},
    TxResult,
};
use alloc::vec::Vec;
use alloy_primitives::{Address, B256};
use rawtx_rlp::{RlpError, RlpItem};

/// A single access list entry: an address and the storage keys it touches.
///
/// Keys keep their insertion order and duplicates are preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccessListItem {
    /// Account address that would be loaded at the start of execution.
    pub address: Address,
    /// Storage keys of the account that would be loaded.
    pub storage_keys: Vec<B256>,
}

impl AccessListItem {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::List(alloc::vec![
            RlpItem::bytes(self.address.to_vec()),
            hashes_item(&self.storage_keys),
        ])
    }

    fn from_rlp(item: &RlpItem) -> TxResult<Self> {
        let fields = item.as_list()?;
        let [address, storage_keys] = fields else {
            return Err(RlpError::ListLength { expected: 2, got: fields.len() }.into());
        };
        Ok(Self {
            address: parse_address(address.as_bytes()?, "accessList.address")?,
            storage_keys: decode_hashes(storage_keys, "accessList.storageKeys")?,
        })
    }
}

/// An ordered list of [AccessListItem]s. Always encoded, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccessList(pub Vec<AccessListItem>);

impl From<Vec<AccessListItem>> for AccessList {
    fn from(items: Vec<AccessListItem>) -> Self {
        Self(items)
    }
}

impl AccessList {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> core::slice::Iter<'_, AccessListItem> {
        self.0.iter()
    }

    /// Returns the total number of storage keys across all entries.
    pub fn storage_key_count(&self) -> usize {
        self.0.iter().map(|item| item.storage_keys.len()).sum()
    }

    /// Encodes the list as `[[address, [key, ...]], ...]`.
    pub fn to_rlp(&self) -> RlpItem {
        RlpItem::List(self.0.iter().map(AccessListItem::to_rlp).collect())
    }

    /// Decodes the list from its RLP shape.
    pub fn from_rlp(item: &RlpItem) -> TxResult<Self> {
        let items = item.as_list()?;
        items.iter().map(AccessListItem::from_rlp).collect::<TxResult<Vec<_>>>().map(Self)
    }
}
