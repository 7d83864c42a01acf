//! # CLI Argument Definitions
//!
//! Global flags apply to every subcommand. Key material given with `--key` overrides
//! `cipher.key` from the config file and the `SCRIBE__CIPHER__KEY` environment variable.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scribe")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Encrypt and decrypt sensitive text fields with AES-CBC")]
pub(crate) struct Cli {
    /// Configuration file (defaults to `scribe.toml` in the working directory, if present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Hex-encoded 16, 24 or 32 byte key
    #[arg(short, long, global = true, value_name = "HEX")]
    pub(crate) key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print a fresh random IV as hex
    Iv,
    /// Encrypt text. Prints a base64 `IV || CIPHERTEXT` envelope, or hex ciphertext with `--iv`
    Encrypt {
        /// Text to encrypt
        text: String,
        /// Encrypt under this hex IV instead of a fresh one
        #[arg(long, value_name = "HEX")]
        iv: Option<String>,
    },
    /// Decrypt a base64 envelope, or hex ciphertext with `--iv`
    Decrypt {
        /// Envelope (base64) or ciphertext (hex)
        blob: String,
        /// IV the hex ciphertext was produced with
        #[arg(long, value_name = "HEX")]
        iv: Option<String>,
    },
}
