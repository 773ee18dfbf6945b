//! Fixtures and a trace collecting subscriber layer shared by the unit tests.

use crate::{AccessList, AccessListItem, TxEip1559, TxEip2930, TxEip4844, TxLegacy};
use alloc::{format, string::String, sync::Arc, vec, vec::Vec};
use alloy_primitives::{address, b256, hex, Bytes, TxKind, B256, U256};
use std::sync::{Mutex, MutexGuard};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer};

/// The private key used by the EIP-155 example: `0x4646...46`.
pub(crate) const EIP155_KEY: B256 =
    b256!("4646464646464646464646464646464646464646464646464646464646464646");

/// A throwaway development key.
pub(crate) const DEV_KEY: B256 =
    b256!("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

/// The legacy transaction from the EIP-155 specification.
pub(crate) fn eip155_example() -> TxLegacy {
    TxLegacy {
        chain_id: Some(U256::from(1)),
        nonce: U256::from(9),
        gas_price: U256::from(20_000_000_000u64),
        gas_limit: U256::from(21_000),
        to: TxKind::Call(address!("3535353535353535353535353535353535353535")),
        value: U256::from(1_000_000_000_000_000_000u128),
        data: Bytes::new(),
    }
}

pub(crate) fn access_list() -> AccessList {
    AccessList(vec![AccessListItem {
        address: address!("de0b295669a9fd93d5f28d9ec85e40f4cb697bae"),
        storage_keys: vec![
            b256!("0000000000000000000000000000000000000000000000000000000000000003"),
            b256!("0000000000000000000000000000000000000000000000000000000000000007"),
        ],
    }])
}

pub(crate) fn access_list_tx() -> TxEip2930 {
    TxEip2930 {
        chain_id: U256::from(1),
        nonce: U256::from(0),
        gas_price: U256::from(1_000_000_000u64),
        gas_limit: U256::from(100_000),
        to: TxKind::Call(address!("095e7baea6a6c7c4c2dfeb977efac326af552d87")),
        value: U256::from(10),
        data: Bytes::from_static(&hex!("5544")),
        access_list: access_list(),
    }
}

pub(crate) fn fee_market() -> TxEip1559 {
    TxEip1559 {
        chain_id: U256::from(20200),
        nonce: U256::from(3),
        max_priority_fee_per_gas: U256::from(1_000_000_000u64),
        max_fee_per_gas: U256::from(30_000_000_000u64),
        gas_limit: U256::from(150_000),
        to: TxKind::Call(address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")),
        value: U256::ZERO,
        data: Bytes::from_static(&hex!("6080604052")),
        access_list: AccessList::default(),
    }
}

pub(crate) fn blob_tx() -> TxEip4844 {
    TxEip4844 {
        chain_id: U256::from(11155111),
        nonce: U256::from(42),
        max_priority_fee_per_gas: U256::from(2_000_000_000u64),
        max_fee_per_gas: U256::from(40_000_000_000u64),
        gas_limit: U256::from(21_000),
        to: TxKind::Call(address!("70997970c51812dc3a010c7d01b50e0d17dc79c8")),
        value: U256::ZERO,
        data: Bytes::new(),
        access_list: access_list(),
        max_fee_per_blob_gas: U256::from(1),
        blob_versioned_hashes: vec![
            b256!("01a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8"),
            b256!("0100000000000000000000000000000000000000000000000000000000000001"),
        ],
    }
}

/// The storage for the collected traces.
#[derive(Debug, Default, Clone)]
pub(crate) struct TraceStorage(pub(crate) Arc<Mutex<Vec<(Level, String)>>>);

impl TraceStorage {
    /// Returns the items in the storage that match the specified level.
    pub(crate) fn get_by_level(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|(l, message)| if *l == level { Some(message.clone()) } else { None })
            .collect()
    }

    /// Locks the storage and returns the items.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<(Level, String)>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A subscriber layer that collects traces and their log levels.
#[derive(Debug, Default)]
pub(crate) struct CollectingLayer {
    storage: TraceStorage,
}

impl CollectingLayer {
    /// Creates a new collecting layer with the specified storage.
    pub(crate) const fn new(storage: TraceStorage) -> Self {
        Self { storage }
    }
}

impl<S: Subscriber> Layer<S> for CollectingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        let message = format!("{:?}", event);
        self.storage.lock().push((level, message));
    }
}
