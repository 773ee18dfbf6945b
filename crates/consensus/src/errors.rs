//! Errors for the `rawtx-consensus` crate.

use crate::TxType;
use alloy_primitives::B256;
use rawtx_rlp::{IntCodecError, RlpError};
use thiserror::Error;

/// A [Result] type alias where the error is [TxError].
pub type TxResult<T> = Result<T, TxError>;

/// An error type for every stage of the transaction pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    /// A field holds a value of the wrong shape, length or sign.
    #[error("Invalid encoding for field `{field}`: {reason}")]
    InvalidFieldEncoding {
        /// The wire name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: FieldEncodingError,
    },
    /// A field the chosen variant requires was not supplied.
    #[error("Missing required field `{0}`")]
    MissingRequiredField(&'static str),
    /// An integer field carries a leading zero byte.
    #[error("Non-canonical integer encoding in field `{0}`")]
    NonCanonicalInteger(&'static str),
    /// The wire bytes are not a well formed RLP structure for the variant.
    #[error("Malformed RLP input: {0}")]
    MalformedRlpInput(#[from] RlpError),
    /// The leading byte names a transaction type this crate does not support.
    #[error("Unsupported transaction type: {0:#04x}")]
    UnsupportedTransactionType(u8),
    /// The private key is zero or not below the curve order.
    #[error("Invalid private key")]
    InvalidPrivateKey,
    /// The signature could not be produced with, or recovered from, a usable recovery id.
    #[error("Signature recovery failed")]
    SignatureRecoveryFailure,
    /// The transaction hash recomputed over the wire bytes disagrees with the sealed hash.
    #[error("Transaction hash mismatch: sealed {expected}, recomputed {computed}")]
    HashMismatch {
        /// The hash sealed into the signed transaction.
        expected: B256,
        /// The hash recomputed over the final wire bytes.
        computed: B256,
    },
}

impl TxError {
    /// Attaches a field name to an integer codec error.
    pub(crate) const fn int(field: &'static str, err: IntCodecError) -> Self {
        match err {
            IntCodecError::NonCanonicalInteger => Self::NonCanonicalInteger(field),
            IntCodecError::NegativeValue => {
                Self::InvalidFieldEncoding { field, reason: FieldEncodingError::Negative }
            }
            IntCodecError::Overflow(_) => {
                Self::InvalidFieldEncoding { field, reason: FieldEncodingError::Overflow }
            }
            IntCodecError::InvalidQuantity => {
                Self::InvalidFieldEncoding { field, reason: FieldEncodingError::InvalidQuantity }
            }
        }
    }

    /// Shorthand for an [TxError::InvalidFieldEncoding] length error.
    pub(crate) const fn length(field: &'static str, expected: usize, got: usize) -> Self {
        Self::InvalidFieldEncoding { field, reason: FieldEncodingError::Length { expected, got } }
    }
}

/// The reason a field value was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncodingError {
    /// A fixed width byte string has the wrong length.
    #[error("expected {expected} bytes, got {got}")]
    Length {
        /// The required length.
        expected: usize,
        /// The supplied length.
        got: usize,
    },
    /// A numeric field is negative.
    #[error("value is negative")]
    Negative,
    /// A numeric field does not fit in 256 bits.
    #[error("value overflows 256 bits")]
    Overflow,
    /// A numeric field is not a decimal or hex quantity.
    #[error("value is not a valid quantity")]
    InvalidQuantity,
    /// The field does not exist in the chosen transaction variant.
    #[error("field is not part of {0} transactions")]
    NotApplicable(TxType),
    /// A signature recovery value outside the range the variant allows.
    #[error("invalid signature recovery value")]
    InvalidRecoveryValue,
    /// A signature placeholder that should be empty carries data.
    #[error("signature placeholder is not empty")]
    NonEmptyPlaceholder,
}
