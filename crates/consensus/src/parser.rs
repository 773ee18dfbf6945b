//! Decodes wire bytes back into a [SignedTransaction] and recovers its signer.

use crate::{
    recovery::{public_key_to_address, recover_public_key},
    transaction::SIGNATURE_FIELDS,
    SignedTransaction, Transaction, TxError, TxResult, TxSignature, TxType,
};
use alloy_primitives::{keccak256, Address, B256, B512, U256};
use rawtx_rlp::{RlpError, RlpItem};
use tracing::{debug, trace};

/// Decodes wire bytes into a [SignedTransaction].
///
/// A first byte in `0x01..=0x7f` is a type prefix; only `0x01`, `0x02` and `0x03` are
/// supported. Anything else is decoded as a legacy RLP list.
///
/// ## Errors
/// - [TxError::UnsupportedTransactionType] for unknown type prefixes.
/// - [TxError::MalformedRlpInput] for malformed RLP, trailing bytes, or a field count that
///   does not match the variant.
/// - [TxError::NonCanonicalInteger] and [TxError::InvalidFieldEncoding] for field values
///   that no canonical encoder would produce.
pub fn decode_raw(raw: &[u8]) -> TxResult<SignedTransaction> {
    let (tx_type, payload) = match raw.first() {
        Some(&prefix @ 0x01..=0x7f) => (TxType::try_from(prefix)?, &raw[1..]),
        _ => (TxType::Legacy, raw),
    };
    trace!(target: "rawtx::parser", %tx_type, len = raw.len(), "Decoding transaction");

    let mut fields = RlpItem::decode_exact(payload)?.into_list()?;
    let base = Transaction::field_names(tx_type).len();
    if fields.len() != base + SIGNATURE_FIELDS {
        return Err(RlpError::ListLength { expected: base + SIGNATURE_FIELDS, got: fields.len() }
            .into());
    }
    let signature_fields = fields.split_off(base);

    let mut tx = Transaction::from_typed_fields(tx_type, &fields)?;
    let (signature, chain_id) = TxSignature::from_fields(&tx, &signature_fields)?;
    if let Transaction::Legacy(legacy) = &mut tx {
        legacy.chain_id = chain_id;
    }

    let signed = SignedTransaction::new(tx, signature)?;
    let computed = keccak256(raw);
    if computed != signed.hash() {
        return Err(TxError::HashMismatch { expected: signed.hash(), computed });
    }
    Ok(signed)
}

/// A decoded transaction together with everything recovered from its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RecoveredTransaction {
    signed: SignedTransaction,
    signing_hash: B256,
    public_key: B512,
    signer: Address,
}

impl RecoveredTransaction {
    /// Returns the decoded signed transaction.
    pub const fn signed(&self) -> &SignedTransaction {
        &self.signed
    }

    /// Returns the decoded transaction.
    pub const fn tx(&self) -> &Transaction {
        self.signed.tx()
    }

    /// Returns the decoded signature.
    pub const fn signature(&self) -> &TxSignature {
        self.signed.signature()
    }

    /// Returns the recomputed signing hash.
    pub const fn signing_hash(&self) -> B256 {
        self.signing_hash
    }

    /// Returns the recovered 64 byte public key.
    pub const fn public_key(&self) -> &B512 {
        &self.public_key
    }

    /// Returns the recovered signer address.
    pub const fn signer(&self) -> Address {
        self.signer
    }

    /// Returns the transaction hash, `keccak256` of the wire bytes.
    pub const fn tx_hash(&self) -> B256 {
        self.signed.hash()
    }

    /// Returns the key facts about the transaction.
    pub fn summary(&self) -> TxSummary {
        let tx = self.tx();
        TxSummary {
            tx_type: tx.tx_type(),
            chain_id: tx.chain_id(),
            from: self.signer,
            to: tx.to().to().copied(),
            value: tx.value(),
        }
    }
}

/// The key facts about a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TxSummary {
    /// The transaction type.
    pub tx_type: TxType,
    /// The chain id, if the transaction is bound to one.
    pub chain_id: Option<U256>,
    /// The recovered sender.
    pub from: Address,
    /// The recipient, or [None] for contract creation.
    pub to: Option<Address>,
    /// The transferred wei.
    pub value: U256,
}

/// Decodes `raw`, recomputes its signing hash, and recovers the signer.
///
/// ## Errors
/// Every error of [decode_raw], plus [TxError::SignatureRecoveryFailure] if `r` or `s` is out
/// of range, `s` is high, or no public key can be recovered.
pub fn recover(raw: &[u8]) -> TxResult<RecoveredTransaction> {
    let signed = decode_raw(raw)?;
    let signing_hash = signed.tx().signing_hash();
    let public_key = recover_public_key(signing_hash, signed.signature())?;
    let signer = public_key_to_address(&public_key);
    debug!(
        target: "rawtx::parser",
        tx_type = %signed.tx().tx_type(),
        tx_hash = %signed.hash(),
        %signer,
        "Recovered transaction signer"
    );
    Ok(RecoveredTransaction { signed, signing_hash, public_key, signer })
}

/// Returns the address that signed `raw`.
pub fn sender(raw: &[u8]) -> TxResult<Address> {
    recover(raw).map(|recovered| recovered.signer)
}

/// Checks the signature of `raw`, optionally against an expected signer.
///
/// An unrecoverable signature yields `Ok(false)`; bytes that do not decode are an error.
pub fn verify_signature(raw: &[u8], expected: Option<Address>) -> TxResult<bool> {
    match recover(raw) {
        Ok(recovered) => Ok(expected.map_or(true, |expected| expected == recovered.signer)),
        Err(TxError::SignatureRecoveryFailure) => Ok(false),
        Err(err) => Err(err),
    }
}
