//! Subcommands of the `rawtx` binary.

mod sign;
pub(crate) use sign::SignCmd;

mod decode;
pub(crate) use decode::DecodeCmd;

mod verify;
pub(crate) use verify::{SenderCmd, VerifyCmd};
