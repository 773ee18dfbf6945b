//! Observation points of the transaction pipeline.

use crate::{RawTransaction, SignedTransaction, Transaction};
use alloy_primitives::{Bytes, B256};
use tracing::debug;

/// Observes the intermediate values of a [TxPipeline](crate::TxPipeline).
///
/// Every method defaults to a no-op. Private keys are never passed to a hook.
pub trait PipelineHook {
    /// Called with the transaction produced by the builder.
    fn on_build(&self, _tx: &Transaction) {}

    /// Called with the exact payload that is hashed for signing and its hash.
    fn on_signing_hash(&self, _tx: &Transaction, _payload: &Bytes, _hash: B256) {}

    /// Called with the signed, sealed transaction.
    fn on_sign(&self, _signed: &SignedTransaction) {}

    /// Called with the final wire bytes.
    fn on_assemble(&self, _raw: &RawTransaction) {}
}

/// The default, no-op implementation of the [PipelineHook] trait.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl PipelineHook for NoopHook {}

/// A [PipelineHook] that emits every stage as a `debug` event under the `rawtx::pipeline`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl PipelineHook for TracingHook {
    fn on_build(&self, tx: &Transaction) {
        debug!(
            target: "rawtx::pipeline",
            tx_type = %tx.tx_type(),
            nonce = %tx.nonce(),
            gas_limit = %tx.gas_limit(),
            "Built transaction"
        );
    }

    fn on_signing_hash(&self, tx: &Transaction, payload: &Bytes, hash: B256) {
        debug!(
            target: "rawtx::pipeline",
            tx_type = %tx.tx_type(),
            %payload,
            signing_hash = %hash,
            "Computed signing hash"
        );
    }

    fn on_sign(&self, signed: &SignedTransaction) {
        let signature = signed.signature();
        debug!(
            target: "rawtx::pipeline",
            r = %signature.r,
            s = %signature.s,
            v = %signed.v(),
            "Signed transaction"
        );
    }

    fn on_assemble(&self, raw: &RawTransaction) {
        debug!(
            target: "rawtx::pipeline",
            raw = %raw.bytes,
            tx_hash = %raw.tx_hash,
            "Assembled transaction"
        );
    }
}
