//! Contains the [TxPipeline], which runs build, hash, sign and assemble in order.

use crate::{
    assemble, build, sign_hash, NoopHook, PipelineHook, RawTransaction, SignedTransaction,
    Transaction, TxRequest, TxResult, TxType,
};
use alloy_primitives::{keccak256, B256};

/// Runs the transaction pipeline, reporting every intermediate value to a [PipelineHook].
///
/// Each stage returns a new value; nothing is mutated in place. The pipeline holds no key
/// material.
#[derive(Debug, Default, Clone)]
pub struct TxPipeline<H = NoopHook> {
    hook: H,
}

impl TxPipeline {
    /// Creates a pipeline without observation.
    pub const fn new() -> Self {
        Self { hook: NoopHook }
    }
}

impl<H: PipelineHook> TxPipeline<H> {
    /// Creates a pipeline reporting to `hook`.
    pub const fn with_hook(hook: H) -> Self {
        Self { hook }
    }

    /// Returns the hook.
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Builds a transaction of `tx_type` from `request`.
    pub fn build(&self, tx_type: TxType, request: &TxRequest) -> TxResult<Transaction> {
        let tx = build(tx_type, request)?;
        self.hook.on_build(&tx);
        Ok(tx)
    }

    /// Hashes and signs `tx`.
    pub fn sign(&self, tx: Transaction, private_key: B256) -> TxResult<SignedTransaction> {
        let payload = tx.signing_payload();
        let hash = keccak256(&payload);
        self.hook.on_signing_hash(&tx, &payload, hash);

        let signed = SignedTransaction::new(tx, sign_hash(hash, private_key)?)?;
        self.hook.on_sign(&signed);
        Ok(signed)
    }

    /// Produces the wire bytes of `signed`.
    pub fn assemble(&self, signed: &SignedTransaction) -> TxResult<RawTransaction> {
        let raw = assemble(signed)?;
        self.hook.on_assemble(&raw);
        Ok(raw)
    }

    /// Runs every stage: build, hash, sign, assemble.
    pub fn build_and_sign(
        &self,
        tx_type: TxType,
        request: &TxRequest,
        private_key: B256,
    ) -> TxResult<RawTransaction> {
        let tx = self.build(tx_type, request)?;
        let signed = self.sign(tx, private_key)?;
        self.assemble(&signed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        recover,
        test_utils::{eip155_example, CollectingLayer, TraceStorage, EIP155_KEY},
        TracingHook, TxError,
    };
    use alloc::{string::{String, ToString}, vec::Vec};
    use alloy_primitives::{b256, hex, Bytes, U256};
    use core::cell::RefCell;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Debug, Default)]
    struct RecordingHook {
        stages: RefCell<Vec<&'static str>>,
        signing_hash: RefCell<Option<B256>>,
    }

    impl PipelineHook for RecordingHook {
        fn on_build(&self, _tx: &Transaction) {
            self.stages.borrow_mut().push("build");
        }

        fn on_signing_hash(&self, _tx: &Transaction, _payload: &Bytes, hash: B256) {
            self.stages.borrow_mut().push("signing_hash");
            *self.signing_hash.borrow_mut() = Some(hash);
        }

        fn on_sign(&self, _signed: &SignedTransaction) {
            self.stages.borrow_mut().push("sign");
        }

        fn on_assemble(&self, _raw: &RawTransaction) {
            self.stages.borrow_mut().push("assemble");
        }
    }

    fn eip155_request() -> TxRequest {
        let tx = eip155_example();
        TxRequest {
            chain_id: tx.chain_id,
            nonce: Some(tx.nonce),
            gas_limit: Some(tx.gas_limit),
            to: Some(Bytes::from_static(&[0x35; 20])),
            value: Some(tx.value),
            gas_price: Some(tx.gas_price),
            ..Default::default()
        }
    }

    #[test]
    fn test_pipeline_reports_every_stage() {
        let pipeline = TxPipeline::with_hook(RecordingHook::default());
        let raw = pipeline.build_and_sign(TxType::Legacy, &eip155_request(), EIP155_KEY).unwrap();

        assert_eq!(*pipeline.hook().stages.borrow(), ["build", "signing_hash", "sign", "assemble"]);
        assert_eq!(
            *pipeline.hook().signing_hash.borrow(),
            Some(b256!("daf5a779ae972f972197303d7b574746c7ef83eadac0f2791ad23db92e4c8e53"))
        );
        assert_eq!(raw.tx_hash, recover(&raw.bytes).unwrap().tx_hash());
    }

    #[test]
    fn test_pipeline_stops_at_failing_stage() {
        let pipeline = TxPipeline::with_hook(RecordingHook::default());
        let request = TxRequest { nonce: None, ..eip155_request() };
        assert_eq!(
            pipeline.build_and_sign(TxType::Legacy, &request, EIP155_KEY),
            Err(TxError::MissingRequiredField("nonce"))
        );
        assert!(pipeline.hook().stages.borrow().is_empty());

        let tx = pipeline.build(TxType::Legacy, &eip155_request()).unwrap();
        assert_eq!(pipeline.sign(tx, B256::ZERO), Err(TxError::InvalidPrivateKey));
        assert_eq!(*pipeline.hook().stages.borrow(), ["build", "signing_hash"]);
    }

    #[test]
    fn test_noop_pipeline_matches_free_functions() {
        let raw = TxPipeline::new()
            .build_and_sign(TxType::Legacy, &eip155_request(), EIP155_KEY)
            .unwrap();
        let expected = crate::sign_transaction(eip155_example().into(), EIP155_KEY).unwrap();
        assert_eq!(raw, assemble(&expected).unwrap());
    }

    #[test]
    fn test_tracing_hook_never_logs_the_key() {
        let trace_store = TraceStorage::default();
        let layer = CollectingLayer::new(trace_store.clone());
        let subscriber = tracing_subscriber::Registry::default().with(layer);
        let _guard = tracing::subscriber::set_default(subscriber);

        let pipeline = TxPipeline::with_hook(TracingHook);
        pipeline.build_and_sign(TxType::Legacy, &eip155_request(), EIP155_KEY).unwrap();

        let events: Vec<String> = trace_store.get_by_level(Level::DEBUG);
        assert!(events.iter().any(|event| event.contains("Computed signing hash")));
        assert!(events.iter().any(|event| event.contains("Assembled transaction")));
        assert!(events.iter().any(|event| event.contains(&U256::from(37).to_string())));

        let key = hex::encode(EIP155_KEY);
        assert!(trace_store.lock().iter().all(|(_, event)| !event.contains(&key)));
    }
}
