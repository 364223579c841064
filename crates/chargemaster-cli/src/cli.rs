//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Parser)]
#[command(
    name = "chargemaster",
    about = "Normalize hospital chargemaster price-transparency artifacts",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered institutions and the artifact URLs each expects.
    List,
    /// Parse locally fetched artifacts for one institution and write
    /// newline-delimited JSON records to stdout.
    Parse {
        /// Institution name (matched case-insensitively).
        #[arg(long)]
        institution: String,

        /// Bind an artifact URL to a local file supplied as a raw byte
        /// stream (delimited text or JSON sources).
        #[arg(long = "stream", value_name = "URL=PATH")]
        streams: Vec<String>,

        /// Bind an artifact URL to a local CSV decoded into typed rows
        /// (stand-in for spreadsheet sources).
        #[arg(long = "rows", value_name = "URL=PATH")]
        rows: Vec<String>,
    },
}
