//! Contains the [TxType] discriminant.

use crate::TxError;
use core::fmt;

/// Transaction type flags as specified in EIPs [2718], [2930], [1559] and [4844].
///
/// [2718]: https://eips.ethereum.org/EIPS/eip-2718
/// [2930]: https://eips.ethereum.org/EIPS/eip-2930
/// [1559]: https://eips.ethereum.org/EIPS/eip-1559
/// [4844]: https://eips.ethereum.org/EIPS/eip-4844
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
pub enum TxType {
    /// Untyped legacy transaction, optionally replay protected by [EIP-155].
    ///
    /// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
    #[default]
    Legacy = 0,
    /// EIP-2930 access list transaction.
    Eip2930 = 1,
    /// EIP-1559 fee market transaction.
    Eip1559 = 2,
    /// EIP-4844 blob carrying transaction.
    Eip4844 = 3,
}

impl TxType {
    /// Every supported type, in discriminant order.
    pub const ALL: [Self; 4] = [Self::Legacy, Self::Eip2930, Self::Eip1559, Self::Eip4844];

    /// Returns the byte prepended to the wire encoding, or [None] for legacy transactions.
    pub const fn prefix(self) -> Option<u8> {
        match self {
            Self::Legacy => None,
            ty => Some(ty as u8),
        }
    }

    /// Returns `true` for [EIP-2718] typed envelopes.
    ///
    /// [EIP-2718]: https://eips.ethereum.org/EIPS/eip-2718
    pub const fn is_typed(self) -> bool {
        !matches!(self, Self::Legacy)
    }
}

impl From<TxType> for u8 {
    fn from(ty: TxType) -> Self {
        ty as Self
    }
}

impl TryFrom<u8> for TxType {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::Eip2930),
            2 => Ok(Self::Eip1559),
            3 => Ok(Self::Eip4844),
            _ => Err(TxError::UnsupportedTransactionType(value)),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Eip2930 => f.write_str("EIP-2930"),
            Self::Eip1559 => f.write_str("EIP-1559"),
            Self::Eip4844 => f.write_str("EIP-4844"),
        }
    }
}
