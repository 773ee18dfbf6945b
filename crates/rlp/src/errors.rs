//! Errors for the `rawtx-rlp` crate.

use thiserror::Error;

/// A [Result] type alias where the error is [RlpError].
pub type RlpResult<T> = Result<T, RlpError>;

/// An error type for the canonical integer codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntCodecError {
    /// A negative number was supplied where only unsigned integers are valid.
    #[error("Negative value cannot be encoded as an unsigned integer")]
    NegativeValue,
    /// The encoded integer carries a leading zero byte.
    #[error("Integer encoding has a leading zero byte")]
    NonCanonicalInteger,
    /// The encoded integer does not fit in 256 bits.
    #[error("Integer of {0} bytes overflows 256 bits")]
    Overflow(usize),
    /// The textual quantity is neither decimal nor `0x`-prefixed hex.
    #[error("Invalid quantity literal")]
    InvalidQuantity,
}

/// An error type for [RlpItem] decoding and shape checks.
///
/// [RlpItem]: crate::RlpItem
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RlpError {
    /// The input violates RLP framing.
    #[error("Malformed RLP: {0}")]
    Malformed(alloy_rlp::Error),
    /// Bytes remain after the outermost item.
    #[error("{0} trailing bytes after the outermost RLP item")]
    TrailingBytes(usize),
    /// A byte string was expected but a list was found.
    #[error("Expected an RLP string, found a list")]
    UnexpectedList,
    /// A list was expected but a byte string was found.
    #[error("Expected an RLP list, found a string")]
    UnexpectedString,
    /// A list has the wrong number of elements.
    #[error("Expected an RLP list of {expected} items, found {got}")]
    ListLength {
        /// The expected number of items.
        expected: usize,
        /// The number of items present.
        got: usize,
    },
}

impl From<alloy_rlp::Error> for RlpError {
    fn from(err: alloy_rlp::Error) -> Self {
        Self::Malformed(err)
    }
}
