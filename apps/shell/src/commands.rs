use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scribe_cipher::{Cipher, CipherError, Iv, IvGenerator};
use std::io::Write;
use tracing::{info, warn};

use crate::cli::Command;

/// Runs a parsed subcommand, writing its result line to `out`.
///
/// `key` is only required by `encrypt` and `decrypt`.
pub(crate) fn execute(command: &Command, key: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Iv => {
            let iv = IvGenerator.generate()?;
            writeln!(out, "{}", hex::encode(iv))?;
        },
        Command::Encrypt { text, iv } => {
            let cipher = build_cipher(key)?;
            match iv {
                Some(iv) => {
                    let ciphertext = cipher.encrypt_text(text, decode_iv(iv)?)?;
                    writeln!(out, "{}", hex::encode(ciphertext))?;
                },
                None => {
                    let envelope = cipher.seal_text(text)?;
                    writeln!(out, "{}", STANDARD.encode(envelope))?;
                },
            }
        },
        Command::Decrypt { blob, iv } => {
            let cipher = build_cipher(key)?;
            let result = match iv {
                Some(iv) => {
                    let ciphertext = hex::decode(blob.trim()).context("Ciphertext is not valid hex")?;
                    cipher.decrypt_text(ciphertext, decode_iv(iv)?)
                },
                None => {
                    let envelope = STANDARD.decode(blob.trim()).context("Envelope is not valid base64")?;
                    cipher.open_text(envelope)
                },
            };

            let text = result.inspect_err(|e| {
                if e.is_integrity_failure() {
                    warn!("Ciphertext rejected, wrong key or tampered data");
                }
            })?;
            writeln!(out, "{text}")?;
        },
    }

    Ok(())
}

fn build_cipher(key: Option<&str>) -> Result<Cipher, CipherError> {
    let key = key.ok_or_else(|| CipherError::InvalidConfiguration {
        message: "No key configured. Pass --key, set cipher.key or SCRIBE__CIPHER__KEY".into(),
        context: None,
    })?;

    let cipher = Cipher::builder().key_hex(key.trim())?.build();
    info!(key_size = %cipher.key_size(), "Cipher ready");
    Ok(cipher)
}

fn decode_iv(encoded: &str) -> anyhow::Result<Iv> {
    let bytes = hex::decode(encoded.trim()).context("IV is not valid hex")?;
    Ok(Iv::from_slice(&bytes)?)
}
