//! Contains the transaction variants and the [Transaction] union over them.

use crate::{fields::decode_u256, FieldEncodingError, TxError, TxResult, TxType};
use alloc::vec::Vec;
use alloy_primitives::{keccak256, Bytes, TxKind, B256, U256};
use alloy_rlp::Encodable;
use rawtx_rlp::{RlpError, RlpItem};

mod access_list;
pub use access_list::{AccessList, AccessListItem};

mod legacy;
pub use legacy::TxLegacy;

mod eip2930;
pub use eip2930::TxEip2930;

mod eip1559;
pub use eip1559::TxEip1559;

mod eip4844;
pub use eip4844::TxEip4844;

/// Number of trailing signature fields, `[v | yParity, r, s]`.
pub(crate) const SIGNATURE_FIELDS: usize = 3;

/// The wire layout of a transaction variant: its type and ordered unsigned fields.
pub trait TxLayout: Sized {
    /// The variant's type discriminant.
    const TX_TYPE: TxType;

    /// Wire names of the unsigned fields, in encoding order.
    const FIELDS: &'static [&'static str];

    /// Returns the chain id the transaction is bound to, if any.
    fn chain_id(&self) -> Option<U256>;

    /// Returns the unsigned fields in wire order.
    fn unsigned_fields(&self) -> Vec<RlpItem>;

    /// Rebuilds the variant from exactly [TxLayout::FIELDS] unsigned fields.
    fn from_unsigned_fields(fields: &[RlpItem]) -> TxResult<Self>;
}

/// A transaction of any supported variant. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Transaction {
    /// A legacy transaction.
    Legacy(TxLegacy),
    /// An EIP-2930 access list transaction.
    Eip2930(TxEip2930),
    /// An EIP-1559 fee market transaction.
    Eip1559(TxEip1559),
    /// An EIP-4844 blob carrying transaction.
    Eip4844(TxEip4844),
}

impl From<TxLegacy> for Transaction {
    fn from(tx: TxLegacy) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TxEip2930> for Transaction {
    fn from(tx: TxEip2930) -> Self {
        Self::Eip2930(tx)
    }
}

impl From<TxEip1559> for Transaction {
    fn from(tx: TxEip1559) -> Self {
        Self::Eip1559(tx)
    }
}

impl From<TxEip4844> for Transaction {
    fn from(tx: TxEip4844) -> Self {
        Self::Eip4844(tx)
    }
}

impl Transaction {
    /// Returns the wire names of the unsigned fields of `tx_type`, in encoding order.
    pub const fn field_names(tx_type: TxType) -> &'static [&'static str] {
        match tx_type {
            TxType::Legacy => TxLegacy::FIELDS,
            TxType::Eip2930 => TxEip2930::FIELDS,
            TxType::Eip1559 => TxEip1559::FIELDS,
            TxType::Eip4844 => TxEip4844::FIELDS,
        }
    }

    /// Returns the transaction type.
    pub const fn tx_type(&self) -> TxType {
        match self {
            Self::Legacy(_) => TxLegacy::TX_TYPE,
            Self::Eip2930(_) => TxEip2930::TX_TYPE,
            Self::Eip1559(_) => TxEip1559::TX_TYPE,
            Self::Eip4844(_) => TxEip4844::TX_TYPE,
        }
    }

    /// Returns the chain id, [None] only for unprotected legacy transactions.
    pub fn chain_id(&self) -> Option<U256> {
        match self {
            Self::Legacy(tx) => tx.chain_id(),
            Self::Eip2930(tx) => tx.chain_id(),
            Self::Eip1559(tx) => tx.chain_id(),
            Self::Eip4844(tx) => tx.chain_id(),
        }
    }

    /// Returns the sender nonce.
    pub const fn nonce(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip2930(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
            Self::Eip4844(tx) => tx.nonce,
        }
    }

    /// Returns the gas limit.
    pub const fn gas_limit(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::Eip2930(tx) => tx.gas_limit,
            Self::Eip1559(tx) => tx.gas_limit,
            Self::Eip4844(tx) => tx.gas_limit,
        }
    }

    /// Returns the recipient.
    pub const fn to(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::Eip2930(tx) => tx.to,
            Self::Eip1559(tx) => tx.to,
            Self::Eip4844(tx) => tx.to,
        }
    }

    /// Returns the transferred value.
    pub const fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value,
            Self::Eip2930(tx) => tx.value,
            Self::Eip1559(tx) => tx.value,
            Self::Eip4844(tx) => tx.value,
        }
    }

    /// Returns the call data.
    pub const fn data(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.data,
            Self::Eip2930(tx) => &tx.data,
            Self::Eip1559(tx) => &tx.data,
            Self::Eip4844(tx) => &tx.data,
        }
    }

    /// Returns the access list, or [None] for legacy transactions.
    pub const fn access_list(&self) -> Option<&AccessList> {
        match self {
            Self::Legacy(_) => None,
            Self::Eip2930(tx) => Some(&tx.access_list),
            Self::Eip1559(tx) => Some(&tx.access_list),
            Self::Eip4844(tx) => Some(&tx.access_list),
        }
    }

    /// Returns the unsigned fields in wire order, without any signature placeholders.
    pub fn unsigned_fields(&self) -> Vec<RlpItem> {
        match self {
            Self::Legacy(tx) => tx.unsigned_fields(),
            Self::Eip2930(tx) => tx.unsigned_fields(),
            Self::Eip1559(tx) => tx.unsigned_fields(),
            Self::Eip4844(tx) => tx.unsigned_fields(),
        }
    }

    /// Rebuilds a transaction from a caller assembled unsigned field list.
    ///
    /// Legacy lists are either the six base fields or the nine field EIP-155 hashing form
    /// `[..., chainId, 0x, 0x]`. Typed lists must match the variant layout; a trailing
    /// `[0x, 0x, 0x]` signature placeholder is dropped since typed signing payloads never
    /// contain one. Any other extra field is rejected.
    pub fn from_unsigned_fields(tx_type: TxType, mut fields: Vec<RlpItem>) -> TxResult<Self> {
        let base = Self::field_names(tx_type).len();
        match tx_type {
            TxType::Legacy => {
                let chain_id = match fields.len() {
                    len if len == base => None,
                    len if len == base + SIGNATURE_FIELDS => {
                        ensure_empty_placeholders(&fields[base + 1..], &["r", "s"])?;
                        Some(decode_u256(&fields[base], "chainId")?)
                    }
                    got => {
                        return Err(RlpError::ListLength { expected: base, got }.into());
                    }
                };
                let tx = TxLegacy::from_unsigned_fields(&fields[..base])?;
                Ok(Self::Legacy(TxLegacy { chain_id, ..tx }))
            }
            _ => {
                if fields.len() == base + SIGNATURE_FIELDS {
                    ensure_empty_placeholders(&fields[base..], &["yParity", "r", "s"])?;
                    fields.truncate(base);
                }
                Self::from_typed_fields(tx_type, &fields)
            }
        }
    }

    /// Dispatches exactly-sized unsigned fields to the layout of `tx_type`.
    ///
    /// Legacy transactions come back without a chain id.
    pub(crate) fn from_typed_fields(tx_type: TxType, fields: &[RlpItem]) -> TxResult<Self> {
        Ok(match tx_type {
            TxType::Legacy => TxLegacy::from_unsigned_fields(fields)?.into(),
            TxType::Eip2930 => TxEip2930::from_unsigned_fields(fields)?.into(),
            TxType::Eip1559 => TxEip1559::from_unsigned_fields(fields)?.into(),
            TxType::Eip4844 => TxEip4844::from_unsigned_fields(fields)?.into(),
        })
    }

    /// Returns the payload that is hashed for signing.
    ///
    /// Legacy: `rlp([nonce, gasPrice, gasLimit, to, value, data])`, with `chainId, 0x, 0x`
    /// appended inside the list when a chain id is present. Typed:
    /// `type || rlp(unsignedFields)`, with no signature placeholders at all.
    pub fn signing_payload(&self) -> Bytes {
        let mut fields = self.unsigned_fields();
        if let Self::Legacy(TxLegacy { chain_id: Some(chain_id), .. }) = self {
            fields.extend([RlpItem::int(chain_id), RlpItem::EMPTY, RlpItem::EMPTY]);
        }
        envelope(self.tx_type(), fields)
    }

    /// Returns the hash that is signed: `keccak256` of [Transaction::signing_payload].
    pub fn signing_hash(&self) -> B256 {
        keccak256(self.signing_payload())
    }
}

/// Encodes `fields` as an RLP list, prefixed with the type byte for typed transactions.
pub(crate) fn envelope(tx_type: TxType, fields: Vec<RlpItem>) -> Bytes {
    let list = RlpItem::List(fields);
    let mut out = Vec::with_capacity(1 + list.length());
    if let Some(prefix) = tx_type.prefix() {
        out.push(prefix);
    }
    list.encode(&mut out);
    out.into()
}

fn ensure_empty_placeholders(fields: &[RlpItem], names: &[&'static str]) -> TxResult<()> {
    match fields.iter().zip(names).find(|(field, _)| !field.is_empty_string()) {
        Some((_, name)) => Err(TxError::InvalidFieldEncoding {
            field: *name,
            reason: FieldEncodingError::NonEmptyPlaceholder,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{eip155_example, fee_market};
    use alloc::vec;
    use alloy_primitives::{b256, hex};

    #[test]
    fn test_eip155_signing_payload() {
        let tx = Transaction::Legacy(eip155_example());
        assert_eq!(
            tx.signing_payload(),
            Bytes::from_static(&hex!(
                "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
            ))
        );
        assert_eq!(
            tx.signing_hash(),
            b256!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53")
        );
    }

    #[test]
    fn test_unprotected_legacy_hashes_six_fields() {
        let tx = Transaction::Legacy(TxLegacy { chain_id: None, ..eip155_example() });
        let payload = tx.signing_payload();
        let fields = RlpItem::decode_exact(&payload).unwrap().into_list().unwrap();
        assert_eq!(fields.len(), 6);
    }

    #[test]
    fn test_typed_signing_payload_is_prefixed_and_unpadded() {
        let tx = Transaction::Eip1559(fee_market());
        let payload = tx.signing_payload();
        assert_eq!(payload[0], 0x02);
        let fields = RlpItem::decode_exact(&payload[1..]).unwrap().into_list().unwrap();
        assert_eq!(fields.len(), TxEip1559::FIELDS.len());
        assert_eq!(fields, tx.unsigned_fields());
    }

    #[test]
    fn test_signing_hash_commits_to_type_prefix() {
        let tx = Transaction::Eip1559(fee_market());
        let mut payload = tx.signing_payload().to_vec();
        assert_eq!(keccak256(&payload), tx.signing_hash());
        payload[0] = 0x01;
        assert_ne!(keccak256(&payload), tx.signing_hash());
    }

    #[test]
    fn test_typed_placeholders_are_never_hashed() {
        let tx = Transaction::Eip1559(fee_market());
        let mut padded = tx.unsigned_fields();
        padded.extend([RlpItem::EMPTY, RlpItem::EMPTY, RlpItem::EMPTY]);

        let rebuilt = Transaction::from_unsigned_fields(TxType::Eip1559, padded).unwrap();
        assert_eq!(rebuilt, tx);
        assert_eq!(rebuilt.signing_hash(), tx.signing_hash());
    }

    #[test]
    fn test_typed_rejects_non_empty_placeholders() {
        let tx = Transaction::Eip1559(fee_market());
        let mut padded = tx.unsigned_fields();
        padded.extend([RlpItem::EMPTY, RlpItem::int(&U256::from(1)), RlpItem::EMPTY]);
        assert_eq!(
            Transaction::from_unsigned_fields(TxType::Eip1559, padded),
            Err(TxError::InvalidFieldEncoding {
                field: "r",
                reason: FieldEncodingError::NonEmptyPlaceholder
            })
        );
    }

    #[test]
    fn test_typed_rejects_wrong_field_count() {
        let mut fields = Transaction::Eip1559(fee_market()).unsigned_fields();
        fields.push(RlpItem::EMPTY);
        assert_eq!(
            Transaction::from_unsigned_fields(TxType::Eip1559, fields),
            Err(TxError::MalformedRlpInput(RlpError::ListLength { expected: 9, got: 10 }))
        );
    }

    #[test]
    fn test_legacy_accepts_eip155_hashing_form() {
        let tx = Transaction::Legacy(eip155_example());
        let mut fields = tx.unsigned_fields();
        fields.extend([RlpItem::int(&U256::from(1)), RlpItem::EMPTY, RlpItem::EMPTY]);
        let rebuilt = Transaction::from_unsigned_fields(TxType::Legacy, fields).unwrap();
        assert_eq!(rebuilt, tx);

        let unprotected =
            Transaction::from_unsigned_fields(TxType::Legacy, tx.unsigned_fields()).unwrap();
        assert_eq!(unprotected.chain_id(), None);
    }

    #[test]
    fn test_field_order_per_variant() {
        let tx = TxEip4844 {
            chain_id: U256::from(1),
            nonce: U256::from(2),
            max_priority_fee_per_gas: U256::from(3),
            max_fee_per_gas: U256::from(4),
            gas_limit: U256::from(5),
            to: TxKind::Create,
            value: U256::from(6),
            data: Bytes::new(),
            access_list: AccessList::default(),
            max_fee_per_blob_gas: U256::from(7),
            blob_versioned_hashes: vec![],
        };
        let fields = tx.unsigned_fields();
        let ints: Vec<_> = [0, 1, 2, 3, 4, 6, 9]
            .iter()
            .map(|&i| fields[i].as_int().unwrap().unwrap())
            .collect();
        assert_eq!(ints, [1u64, 2, 3, 4, 5, 6, 7].map(U256::from));
        assert!(fields[5].is_empty_string());
        assert_eq!(fields[8], RlpItem::List(vec![]));
        assert_eq!(fields[10], RlpItem::List(vec![]));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_transaction_serde_roundtrip() {
        use crate::test_utils::{access_list_tx, blob_tx};

        for tx in [
            Transaction::Legacy(eip155_example()),
            Transaction::Eip2930(access_list_tx()),
            Transaction::Eip1559(fee_market()),
            Transaction::Eip4844(blob_tx()),
        ] {
            let serialized = serde_json::to_string(&tx).unwrap();
            let deserialized: Transaction = serde_json::from_str(&serialized).unwrap();
            assert_eq!(tx, deserialized);
            assert!(serialized.contains("\"chainId\""));
        }
    }
}
