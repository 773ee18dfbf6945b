//! Module for the CLI.

use crate::commands::{DecodeCmd, SenderCmd, SignCmd, VerifyCmd};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

/// Main CLI
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Verbosity level (0-4)
    #[arg(long, short, help = "Verbosity level (0-4)", action = ArgAction::Count)]
    pub(crate) v: u8,
    /// The subcommand to run.
    #[clap(subcommand)]
    pub(crate) subcommand: RawTxSubcommand,
}

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum RawTxSubcommand {
    /// Build, sign and assemble a transaction from a request file.
    Sign(SignCmd),
    /// Decode a raw transaction and recover its signer.
    Decode(DecodeCmd),
    /// Print the signer of a raw transaction.
    Sender(SenderCmd),
    /// Check the signature of a raw transaction.
    Verify(VerifyCmd),
}

impl Cli {
    /// Initializes telemetry for the application.
    pub(crate) fn init_telemetry(self) -> Result<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;
        Ok(self)
    }

    /// Runs the selected subcommand.
    pub(crate) fn run(&self) -> Result<()> {
        match &self.subcommand {
            RawTxSubcommand::Sign(cmd) => cmd.run(),
            RawTxSubcommand::Decode(cmd) => cmd.run(),
            RawTxSubcommand::Sender(cmd) => cmd.run(),
            RawTxSubcommand::Verify(cmd) => cmd.run(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_count() {
        let cli = Cli::parse_from(["rawtx", "-vvv", "sender", "0x00"]);
        assert_eq!(cli.v, 3);
        assert!(matches!(cli.subcommand, RawTxSubcommand::Sender(_)));
    }
}
