//! This module contains the [EIP-1559] fee market transaction type.
//!
//! [EIP-1559]: https://eips.ethereum.org/EIPS/eip-1559

use crate::{
    fields::{tx_kind_item, FieldReader},
    AccessList, TxLayout, TxResult, TxType,
};
use alloc::vec::Vec;
use alloy_primitives::{Bytes, TxKind, U256};
use rawtx_rlp::RlpItem;

/// A fee market transaction with a priority fee and a fee cap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxEip1559 {
    /// Chain id the transaction is valid on.
    pub chain_id: U256,
    /// Number of transactions previously sent by the sender.
    pub nonce: U256,
    /// Tip paid to the block producer per unit of gas, in wei.
    pub max_priority_fee_per_gas: U256,
    /// Maximum total fee paid per unit of gas, in wei.
    pub max_fee_per_gas: U256,
    /// Maximum gas the transaction may consume.
    pub gas_limit: U256,
    /// Recipient, or [TxKind::Create] for contract creation.
    pub to: TxKind,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Call data or init code.
    pub data: Bytes,
    /// Addresses and storage keys pre-declared by the transaction.
    pub access_list: AccessList,
}

impl TxLayout for TxEip1559 {
    const TX_TYPE: TxType = TxType::Eip1559;
    const FIELDS: &'static [&'static str] = &[
        "chainId",
        "nonce",
        "maxPriorityFeePerGas",
        "maxFeePerGas",
        "gasLimit",
        "to",
        "value",
        "data",
        "accessList",
    ];

    fn chain_id(&self) -> Option<U256> {
        Some(self.chain_id)
    }

    fn unsigned_fields(&self) -> Vec<RlpItem> {
        alloc::vec![
            RlpItem::int(&self.chain_id),
            RlpItem::int(&self.nonce),
            RlpItem::int(&self.max_priority_fee_per_gas),
            RlpItem::int(&self.max_fee_per_gas),
            RlpItem::int(&self.gas_limit),
            tx_kind_item(&self.to),
            RlpItem::int(&self.value),
            RlpItem::Bytes(self.data.clone()),
            self.access_list.to_rlp(),
        ]
    }

    fn from_unsigned_fields(fields: &[RlpItem]) -> TxResult<Self> {
        let mut reader = FieldReader::new(fields, Self::FIELDS)?;
        Ok(Self {
            chain_id: reader.u256()?,
            nonce: reader.u256()?,
            max_priority_fee_per_gas: reader.u256()?,
            max_fee_per_gas: reader.u256()?,
            gas_limit: reader.u256()?,
            to: reader.tx_kind()?,
            value: reader.u256()?,
            data: reader.bytes()?,
            access_list: reader.access_list()?,
        })
    }
}
