//! Contains the [TxSignature] type and the variant specific encodings of its recovery value.

use crate::{fields::decode_u256, FieldEncodingError, Transaction, TxError, TxResult};
use alloy_primitives::U256;
use rawtx_rlp::{RlpError, RlpItem};

/// The offset of pre EIP-155 legacy `v` values.
const LEGACY_V_OFFSET: u64 = 27;

/// The offset of EIP-155 `v` values: `v = chainId * 2 + 35 + parity`.
const EIP155_V_OFFSET: u64 = 35;

/// An ECDSA signature over a transaction signing hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxSignature {
    /// The `r` value.
    pub r: U256,
    /// The `s` value.
    pub s: U256,
    /// The recovery id: whether the `y` coordinate of the ephemeral point is odd.
    pub odd_y_parity: bool,
}

impl TxSignature {
    /// Creates a new signature.
    pub const fn new(r: U256, s: U256, odd_y_parity: bool) -> Self {
        Self { r, s, odd_y_parity }
    }

    /// Returns the recovery id, `0` or `1`.
    pub const fn recovery_id(&self) -> u8 {
        self.odd_y_parity as u8
    }

    /// Returns the legacy `v` value: `chainId * 2 + 35 + parity` when a chain id is known,
    /// `27 + parity` otherwise.
    ///
    /// ## Errors
    /// Fails with [TxError::InvalidFieldEncoding] on `chainId` if `v` does not fit in 256 bits.
    pub fn legacy_v(&self, chain_id: Option<U256>) -> TxResult<U256> {
        match chain_id {
            Some(chain_id) => eip155_v(chain_id, self.odd_y_parity),
            None => Ok(U256::from(LEGACY_V_OFFSET + u64::from(self.recovery_id()))),
        }
    }

    /// Returns the value stored in the first signature field of `tx`: the EIP-155 `v` for
    /// legacy transactions, the bare `yParity` for typed ones.
    pub fn v(&self, tx: &Transaction) -> TxResult<U256> {
        match tx {
            Transaction::Legacy(tx) => self.legacy_v(tx.chain_id),
            _ => Ok(U256::from(self.recovery_id())),
        }
    }

    /// Splits a legacy `v` into the chain id and the recovery parity.
    ///
    /// `27` and `28` are unprotected, values from `35` up carry a chain id, and everything else
    /// is rejected.
    pub fn decode_legacy_v(v: U256) -> TxResult<(Option<U256>, bool)> {
        let legacy = U256::from(LEGACY_V_OFFSET);
        let eip155 = U256::from(EIP155_V_OFFSET);
        if v == legacy || v == legacy + U256::from(1) {
            return Ok((None, v != legacy));
        }
        if v >= eip155 {
            let offset = v - eip155;
            return Ok((Some(offset >> 1usize), offset.bit(0)));
        }
        Err(invalid_recovery_value("v"))
    }

    /// Interprets a typed `yParity`, which must be `0` or `1`.
    pub fn decode_y_parity(y_parity: U256) -> TxResult<bool> {
        if y_parity > U256::from(1) {
            return Err(invalid_recovery_value("yParity"));
        }
        Ok(y_parity == U256::from(1))
    }

    /// Returns the trailing `[v | yParity, r, s]` fields, given the already computed `v`.
    pub(crate) fn fields(&self, v: U256) -> [RlpItem; 3] {
        [RlpItem::int(&v), RlpItem::int(&self.r), RlpItem::int(&self.s)]
    }

    /// Decodes the trailing signature fields of a transaction of type `tx`.
    ///
    /// Returns the signature and, for legacy transactions, the chain id carried by `v`.
    pub(crate) fn from_fields(
        tx: &Transaction,
        fields: &[RlpItem],
    ) -> TxResult<(Self, Option<U256>)> {
        let [v, r, s] = fields else {
            return Err(RlpError::ListLength { expected: 3, got: fields.len() }.into());
        };
        let r = decode_u256(r, "r")?;
        let s = decode_u256(s, "s")?;
        match tx {
            Transaction::Legacy(_) => {
                let (chain_id, parity) = Self::decode_legacy_v(decode_u256(v, "v")?)?;
                Ok((Self::new(r, s, parity), chain_id))
            }
            _ => {
                let parity = Self::decode_y_parity(decode_u256(v, "yParity")?)?;
                Ok((Self::new(r, s, parity), tx.chain_id()))
            }
        }
    }
}

/// Computes the EIP-155 `v` for `chain_id`, rejecting chain ids whose `v` overflows.
pub(crate) fn eip155_v(chain_id: U256, odd_y_parity: bool) -> TxResult<U256> {
    chain_id
        .checked_mul(U256::from(2))
        .and_then(|v| v.checked_add(U256::from(EIP155_V_OFFSET + u64::from(odd_y_parity))))
        .ok_or(TxError::InvalidFieldEncoding {
            field: "chainId",
            reason: FieldEncodingError::Overflow,
        })
}

const fn invalid_recovery_value(field: &'static str) -> TxError {
    TxError::InvalidFieldEncoding { field, reason: FieldEncodingError::InvalidRecoveryValue }
}
