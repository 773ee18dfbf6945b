#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![no_std]

extern crate alloc;

mod errors;
pub use errors::{IntCodecError, RlpError, RlpResult};

mod int;
pub use int::{decode_int, encode_int, parse_quantity};

mod item;
pub use item::{RlpItem, MAX_NESTING_DEPTH};
