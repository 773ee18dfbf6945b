//! Signs transaction signing hashes with secp256k1 private keys.
//!
//! Private keys are taken by value per call and are never stored or logged.

use crate::{
    recovery::verifying_key_to_address, SignedTransaction, Transaction, TxError, TxResult,
    TxSignature,
};
use alloy_primitives::{Address, B256, U256};
use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId, Signature, SigningKey};
use tracing::debug;

fn signing_key(private_key: B256) -> TxResult<SigningKey> {
    SigningKey::from_slice(private_key.as_slice()).map_err(|_| TxError::InvalidPrivateKey)
}

/// Signs a 32 byte prehash with RFC6979 deterministic nonces. The returned `s` is always in
/// the lower half of the curve order.
///
/// ## Errors
/// - [TxError::InvalidPrivateKey] if the key is zero or not below the curve order.
/// - [TxError::SignatureRecoveryFailure] if no usable recovery id can be produced.
pub fn sign_hash(hash: B256, private_key: B256) -> TxResult<TxSignature> {
    let key = signing_key(private_key)?;
    let (signature, recovery_id): (Signature, RecoveryId) =
        key.sign_prehash(hash.as_slice()).map_err(|_| TxError::SignatureRecoveryFailure)?;

    // An x-reduced recovery id cannot be expressed by the `v` / `yParity` encodings.
    if recovery_id.is_x_reduced() {
        return Err(TxError::SignatureRecoveryFailure);
    }

    let (r, s) = signature.split_bytes();
    Ok(TxSignature::new(
        U256::from_be_slice(r.as_slice()),
        U256::from_be_slice(s.as_slice()),
        recovery_id.is_y_odd(),
    ))
}

/// Computes the signing hash of `tx`, signs it, and seals the result.
///
/// ## Errors
/// Besides the errors of [sign_hash], fails with [TxError::InvalidFieldEncoding] on `chainId`
/// if a legacy chain id is too large for its EIP-155 `v`.
pub fn sign_transaction(tx: Transaction, private_key: B256) -> TxResult<SignedTransaction> {
    let signing_hash = tx.signing_hash();
    let signature = sign_hash(signing_hash, private_key)?;
    debug!(
        target: "rawtx::signer",
        tx_type = %tx.tx_type(),
        %signing_hash,
        odd_y_parity = signature.odd_y_parity,
        "Signed transaction"
    );
    SignedTransaction::new(tx, signature)
}

/// Derives the account address controlled by `private_key`.
pub fn address_from_private_key(private_key: B256) -> TxResult<Address> {
    Ok(verifying_key_to_address(signing_key(private_key)?.verifying_key()))
}
