//! Contains the [SignedTransaction] and its final wire encoding, [RawTransaction].

use crate::{transaction::envelope, Transaction, TxError, TxResult, TxSignature};
use alloc::vec::Vec;
use alloy_primitives::{keccak256, Bytes, Keccak256, B256, U256};
use rawtx_rlp::RlpItem;
use tracing::debug;

/// A transaction bound to its signature, sealed with the hash of its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SignedTransaction {
    tx: Transaction,
    signature: TxSignature,
    v: U256,
    hash: B256,
}

impl SignedTransaction {
    /// Binds `signature` to `tx` and seals the transaction hash.
    ///
    /// ## Errors
    /// Fails with [TxError::InvalidFieldEncoding] on `chainId` if a legacy chain id is too large
    /// for its EIP-155 `v` to fit in 256 bits.
    pub fn new(tx: Transaction, signature: TxSignature) -> TxResult<Self> {
        let v = signature.v(&tx)?;
        let fields = Self::fields_of(&tx, &signature, v);
        let mut hasher = Keccak256::new();
        hasher.update(envelope(tx.tx_type(), fields));
        Ok(Self { tx, signature, v, hash: hasher.finalize() })
    }

    /// Returns the signed transaction.
    pub const fn tx(&self) -> &Transaction {
        &self.tx
    }

    /// Returns the signature.
    pub const fn signature(&self) -> &TxSignature {
        &self.signature
    }

    /// Returns the value of the first signature field: the EIP-155 `v` for legacy transactions,
    /// the bare `yParity` for typed ones.
    pub const fn v(&self) -> U256 {
        self.v
    }

    /// Returns the transaction hash sealed at construction.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Consumes the signed transaction, returning the transaction and its signature.
    pub fn into_parts(self) -> (Transaction, TxSignature) {
        (self.tx, self.signature)
    }

    fn fields_of(tx: &Transaction, signature: &TxSignature, v: U256) -> Vec<RlpItem> {
        let mut fields = tx.unsigned_fields();
        fields.extend(signature.fields(v));
        fields
    }

    /// Returns the unsigned fields followed by `[v | yParity, r, s]`. Legacy transactions
    /// never carry the EIP-155 placeholder triple here.
    pub fn signed_fields(&self) -> Vec<RlpItem> {
        Self::fields_of(&self.tx, &self.signature, self.v)
    }

    /// Returns the wire bytes: `type || rlp(signedFields)` for typed transactions, plain
    /// `rlp(signedFields)` for legacy ones.
    pub fn encoded(&self) -> Bytes {
        envelope(self.tx.tx_type(), self.signed_fields())
    }
}

/// Final wire bytes together with the transaction hash computed over them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawTransaction {
    /// The wire bytes.
    pub bytes: Bytes,
    /// `keccak256(bytes)`, the identifier nodes report for the transaction.
    pub tx_hash: B256,
}

/// Produces the final wire bytes of `signed` and cross-checks the transaction hash.
///
/// ## Errors
/// Fails with [TxError::HashMismatch] if the hash recomputed over the wire bytes differs from
/// the one sealed into `signed`. This never happens for transactions built by this crate.
pub fn assemble(signed: &SignedTransaction) -> TxResult<RawTransaction> {
    let bytes = signed.encoded();
    let computed = keccak256(&bytes);
    if computed != signed.hash {
        return Err(TxError::HashMismatch { expected: signed.hash, computed });
    }
    debug!(
        target: "rawtx::assembler",
        tx_type = %signed.tx.tx_type(),
        tx_hash = %computed,
        len = bytes.len(),
        "Assembled transaction"
    );
    Ok(RawTransaction { bytes, tx_hash: computed })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        sign_transaction,
        test_utils::{access_list_tx, blob_tx, eip155_example, fee_market, DEV_KEY, EIP155_KEY},
        FieldEncodingError, TxLegacy,
    };
    use alloy_primitives::{b256, hex};

    #[test]
    fn test_eip155_wire_bytes() {
        let signed = sign_transaction(Transaction::Legacy(eip155_example()), EIP155_KEY).unwrap();
        let raw = assemble(&signed).unwrap();
        assert_eq!(
            raw.bytes,
            Bytes::from_static(&hex!(
                "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
            ))
        );
        assert_eq!(raw.tx_hash, keccak256(&raw.bytes));
        assert_ne!(raw.tx_hash, signed.tx().signing_hash());
    }

    #[test]
    fn test_legacy_signed_fields_have_no_placeholders() {
        let signed = sign_transaction(Transaction::Legacy(eip155_example()), EIP155_KEY).unwrap();
        let fields = signed.signed_fields();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[6], RlpItem::int(&U256::from(37)));
    }

    #[test]
    fn test_typed_wire_bytes_are_prefixed() {
        for tx in [
            Transaction::Eip2930(access_list_tx()),
            Transaction::Eip1559(fee_market()),
            Transaction::Eip4844(blob_tx()),
        ] {
            let tx_type = tx.tx_type();
            let field_count = tx.unsigned_fields().len() + 3;
            let raw = assemble(&sign_transaction(tx, DEV_KEY).unwrap()).unwrap();
            assert_eq!(Some(raw.bytes[0]), tx_type.prefix());
            let fields = RlpItem::decode_exact(&raw.bytes[1..]).unwrap().into_list().unwrap();
            assert_eq!(fields.len(), field_count);
        }
    }

    #[test]
    fn test_unprotected_legacy_uses_v_27_or_28() {
        let tx = Transaction::Legacy(TxLegacy { chain_id: None, ..eip155_example() });
        let signed = sign_transaction(tx, EIP155_KEY).unwrap();
        let v = signed.v();
        assert!(v == U256::from(27) || v == U256::from(28));
        assert!(signed.encoded()[0] >= 0xc0);
    }

    #[test]
    fn test_legacy_chain_id_overflowing_v_is_rejected() {
        let overflow = Err(TxError::InvalidFieldEncoding {
            field: "chainId",
            reason: FieldEncodingError::Overflow,
        });
        let tx = Transaction::Legacy(TxLegacy {
            chain_id: Some(U256::MAX >> 1usize),
            ..eip155_example()
        });
        assert_eq!(sign_transaction(tx.clone(), EIP155_KEY), overflow);

        let signature = TxSignature::new(U256::from(1), U256::from(1), false);
        assert_eq!(SignedTransaction::new(tx, signature), overflow);
    }

    #[test]
    fn test_assemble_detects_forged_hash() {
        let mut signed = sign_transaction(Transaction::Eip1559(fee_market()), DEV_KEY).unwrap();
        let computed = signed.hash();
        let forged = b256!("00000000000000000000000000000000000000000000000000000000deadbeef");
        signed.hash = forged;
        assert_eq!(assemble(&signed), Err(TxError::HashMismatch { expected: forged, computed }));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_raw_transaction_serde_roundtrip() {
        let signed = sign_transaction(Transaction::Legacy(eip155_example()), EIP155_KEY).unwrap();
        let raw = assemble(&signed).unwrap();

        let serialized = serde_json::to_string(&raw).unwrap();
        let deserialized: RawTransaction = serde_json::from_str(&serialized).unwrap();
        assert_eq!(raw, deserialized);
        assert!(serialized.contains("\"txHash\""));
    }
}
