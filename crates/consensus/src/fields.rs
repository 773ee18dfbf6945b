//! Field level conversions between typed transaction fields and [RlpItem]s.

use crate::{AccessList, TxError, TxResult};
use alloc::vec::Vec;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use rawtx_rlp::{RlpError, RlpItem};

const ADDRESS_LENGTH: usize = 20;
const HASH_LENGTH: usize = 32;

/// Encodes a [TxKind] as the `to` field: the empty string for contract creation.
pub(crate) fn tx_kind_item(kind: &TxKind) -> RlpItem {
    match kind {
        TxKind::Create => RlpItem::EMPTY,
        TxKind::Call(to) => RlpItem::bytes(to.to_vec()),
    }
}

/// Interprets raw bytes as a `to` field. Only the empty string and exactly 20 bytes are valid.
pub(crate) fn parse_tx_kind(bytes: &[u8], field: &'static str) -> TxResult<TxKind> {
    if bytes.is_empty() {
        return Ok(TxKind::Create);
    }
    parse_address(bytes, field).map(TxKind::Call)
}

pub(crate) fn parse_address(bytes: &[u8], field: &'static str) -> TxResult<Address> {
    if bytes.len() != ADDRESS_LENGTH {
        return Err(TxError::length(field, ADDRESS_LENGTH, bytes.len()));
    }
    Ok(Address::from_slice(bytes))
}

pub(crate) fn parse_b256(bytes: &[u8], field: &'static str) -> TxResult<B256> {
    if bytes.len() != HASH_LENGTH {
        return Err(TxError::length(field, HASH_LENGTH, bytes.len()));
    }
    Ok(B256::from_slice(bytes))
}

pub(crate) fn decode_u256(item: &RlpItem, field: &'static str) -> TxResult<U256> {
    item.as_int()?.map_err(|err| TxError::int(field, err))
}

/// Encodes a list of 32 byte hashes.
pub(crate) fn hashes_item(hashes: &[B256]) -> RlpItem {
    RlpItem::List(hashes.iter().map(|hash| RlpItem::bytes(hash.to_vec())).collect())
}

pub(crate) fn decode_hashes(item: &RlpItem, field: &'static str) -> TxResult<Vec<B256>> {
    item.as_list()?.iter().map(|hash| parse_b256(hash.as_bytes()?, field)).collect()
}

/// Reads the unsigned fields of a variant in wire order, naming each one in errors.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    fields: &'a [RlpItem],
    names: &'static [&'static str],
    position: usize,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader, failing if the field count does not match the layout.
    pub(crate) fn new(fields: &'a [RlpItem], names: &'static [&'static str]) -> TxResult<Self> {
        if fields.len() != names.len() {
            return Err(RlpError::ListLength { expected: names.len(), got: fields.len() }.into());
        }
        Ok(Self { fields, names, position: 0 })
    }

    fn next(&mut self) -> (&'a RlpItem, &'static str) {
        let entry = (&self.fields[self.position], self.names[self.position]);
        self.position += 1;
        entry
    }

    pub(crate) fn u256(&mut self) -> TxResult<U256> {
        let (item, field) = self.next();
        decode_u256(item, field)
    }

    pub(crate) fn bytes(&mut self) -> TxResult<Bytes> {
        let (item, _) = self.next();
        Ok(item.as_bytes()?.clone())
    }

    pub(crate) fn tx_kind(&mut self) -> TxResult<TxKind> {
        let (item, field) = self.next();
        parse_tx_kind(item.as_bytes()?, field)
    }

    pub(crate) fn access_list(&mut self) -> TxResult<AccessList> {
        let (item, _) = self.next();
        AccessList::from_rlp(item)
    }

    pub(crate) fn hashes(&mut self) -> TxResult<Vec<B256>> {
        let (item, field) = self.next();
        decode_hashes(item, field)
    }
}
