//! This module contains the legacy transaction type.

use crate::{
    fields::{tx_kind_item, FieldReader},
    TxLayout, TxResult, TxType,
};
use alloc::vec::Vec;
use alloy_primitives::{Bytes, TxKind, U256};
use rawtx_rlp::RlpItem;

/// A legacy transaction.
///
/// When `chain_id` is set the transaction is replay protected as described in [EIP-155]: the
/// signing payload gains the `[chainId, 0x, 0x]` placeholder triple and `v` encodes the chain.
///
/// [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxLegacy {
    /// Chain id for EIP-155 replay protection, [None] for unprotected transactions.
    pub chain_id: Option<U256>,
    /// Number of transactions previously sent by the sender.
    pub nonce: U256,
    /// Price paid per unit of gas, in wei.
    pub gas_price: U256,
    /// Maximum gas the transaction may consume.
    pub gas_limit: U256,
    /// Recipient, or [TxKind::Create] for contract creation.
    pub to: TxKind,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Call data or init code.
    pub data: Bytes,
}

impl TxLayout for TxLegacy {
    const TX_TYPE: TxType = TxType::Legacy;
    const FIELDS: &'static [&'static str] =
        &["nonce", "gasPrice", "gasLimit", "to", "value", "data"];

    fn chain_id(&self) -> Option<U256> {
        self.chain_id
    }

    fn unsigned_fields(&self) -> Vec<RlpItem> {
        alloc::vec![
            RlpItem::int(&self.nonce),
            RlpItem::int(&self.gas_price),
            RlpItem::int(&self.gas_limit),
            tx_kind_item(&self.to),
            RlpItem::int(&self.value),
            RlpItem::Bytes(self.data.clone()),
        ]
    }

    /// Decodes the six base fields. The chain id lives outside of them and is left unset.
    fn from_unsigned_fields(fields: &[RlpItem]) -> TxResult<Self> {
        let mut reader = FieldReader::new(fields, Self::FIELDS)?;
        Ok(Self {
            chain_id: None,
            nonce: reader.u256()?,
            gas_price: reader.u256()?,
            gas_limit: reader.u256()?,
            to: reader.tx_kind()?,
            value: reader.u256()?,
            data: reader.bytes()?,
        })
    }
}
