//! This module contains the [RlpItem] type, an untyped tree of RLP byte strings and lists.

use crate::{decode_int, encode_int, IntCodecError, RlpError, RlpResult};
use alloc::vec::Vec;
use alloy_primitives::{Bytes, U256};
use alloy_rlp::{length_of_length, BufMut, Decodable, Encodable, Header};

/// The deepest list nesting accepted by the decoder.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A single RLP value: either a byte string or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// An RLP byte string.
    Bytes(Bytes),
    /// An RLP list.
    List(Vec<RlpItem>),
}

impl Default for RlpItem {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Bytes> for RlpItem {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}

impl RlpItem {
    /// The empty byte string, encoded as `0x80`.
    pub const EMPTY: Self = Self::Bytes(Bytes::new());

    /// Creates a byte string item.
    pub fn bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Creates a byte string item holding the canonical encoding of `value`.
    pub fn int(value: &U256) -> Self {
        Self::Bytes(encode_int(value))
    }

    /// Returns `true` if the item is the empty byte string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::Bytes(bytes) if bytes.is_empty())
    }

    /// Returns the byte string, or [RlpError::UnexpectedList].
    pub const fn as_bytes(&self) -> RlpResult<&Bytes> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::List(_) => Err(RlpError::UnexpectedList),
        }
    }

    /// Returns the list elements, or [RlpError::UnexpectedString].
    pub fn as_list(&self) -> RlpResult<&[Self]> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(RlpError::UnexpectedString),
        }
    }

    /// Consumes the item and returns its list elements, or [RlpError::UnexpectedString].
    pub fn into_list(self) -> RlpResult<Vec<Self>> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(RlpError::UnexpectedString),
        }
    }

    /// Consumes the item and returns exactly `len` list elements.
    pub fn expect_list(self, len: usize) -> RlpResult<Vec<Self>> {
        let items = self.into_list()?;
        if items.len() != len {
            return Err(RlpError::ListLength { expected: len, got: items.len() });
        }
        Ok(items)
    }

    /// Interprets the item as a canonical integer.
    ///
    /// The outer `Result` reports shape errors, the inner one integer codec errors.
    pub fn as_int(&self) -> RlpResult<Result<U256, IntCodecError>> {
        self.as_bytes().map(|bytes| decode_int(bytes))
    }

    /// Returns the RLP encoding of the item.
    pub fn encoded(&self) -> Bytes {
        alloy_rlp::encode(self).into()
    }

    /// Decodes a single item from `buf`, failing if any bytes remain afterwards.
    pub fn decode_exact(mut buf: &[u8]) -> RlpResult<Self> {
        let item = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(RlpError::TrailingBytes(buf.len()));
        }
        Ok(item)
    }

    fn decode_nested(buf: &mut &[u8], depth: usize) -> alloy_rlp::Result<Self> {
        let header = Header::decode(buf)?;
        if buf.len() < header.payload_length {
            return Err(alloy_rlp::Error::InputTooShort);
        }
        let (payload, rest) = buf.split_at(header.payload_length);
        *buf = rest;

        if !header.list {
            return Ok(Self::Bytes(Bytes::copy_from_slice(payload)));
        }
        if depth >= MAX_NESTING_DEPTH {
            return Err(alloy_rlp::Error::Custom("RLP list nesting too deep"));
        }

        let mut payload = payload;
        let mut items = Vec::new();
        while !payload.is_empty() {
            items.push(Self::decode_nested(&mut payload, depth + 1)?);
        }
        Ok(Self::List(items))
    }

    fn list_payload_length(items: &[Self]) -> usize {
        items.iter().map(Encodable::length).sum()
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.encode(out),
            Self::List(items) => {
                Header { list: true, payload_length: Self::list_payload_length(items) }.encode(out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.length(),
            Self::List(items) => {
                let payload_length = Self::list_payload_length(items);
                payload_length + length_of_length(payload_length)
            }
        }
    }
}

impl Decodable for RlpItem {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Self::decode_nested(buf, 0)
    }
}
