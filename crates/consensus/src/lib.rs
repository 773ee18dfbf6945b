#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(test)]
pub(crate) mod test_utils;

mod errors;
pub use errors::{FieldEncodingError, TxError, TxResult};

mod tx_type;
pub use tx_type::TxType;

mod fields;

mod transaction;
pub use transaction::{
    AccessList, AccessListItem, Transaction, TxEip1559, TxEip2930, TxEip4844, TxLayout, TxLegacy,
};

mod builder;
pub use builder::{build, AccessListRequest, TxRequest};

mod signature;
pub use signature::TxSignature;

mod signer;
pub use signer::{address_from_private_key, sign_hash, sign_transaction};

mod recovery;
pub use recovery::{public_key_to_address, recover_public_key, recover_signer};

mod signed;
pub use signed::{assemble, RawTransaction, SignedTransaction};

mod parser;
pub use parser::{decode_raw, recover, sender, verify_signature, RecoveredTransaction, TxSummary};

mod hook;
pub use hook::{NoopHook, PipelineHook, TracingHook};

mod pipeline;
pub use pipeline::TxPipeline;

pub use alloy_primitives::TxKind;
pub use rawtx_rlp::RlpItem;
