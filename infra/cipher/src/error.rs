//! # Cipher Errors
//!
//! This module defines the [`CipherError`] enum and [`Result`] type used throughout
//! the cipher crate for reporting configuration, input, cryptographic, and text
//! decoding failures.

use std::borrow::Cow;
use std::str::Utf8Error;
use thiserror::Error;

/// Convenience alias used by every fallible operation of the engine.
pub type Result<T, E = CipherError> = std::result::Result<T, E>;

/// Failures detected by the block-mode transform itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// The recovered plaintext does not end in valid PKCS7 padding.
    ///
    /// Signals a wrong key, a wrong IV, or corrupted/tampered ciphertext.
    #[error("invalid PKCS7 padding")]
    InvalidPadding,
}

/// A specialized [`CipherError`] enum for cipher engine failures.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The engine cannot be constructed with the supplied key material.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The caller supplied a malformed IV or ciphertext.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Decryption produced output that fails validation.
    #[error("Cryptographic failure{}: {source}", format_context(.context))]
    Crypto { source: CryptoError, context: Option<Cow<'static, str>> },

    /// Decrypted bytes are not valid UTF-8.
    ///
    /// Same root causes as [`CipherError::Crypto`], surfaced one layer up.
    #[error("Text decoding error{}: {source}", format_context(.context))]
    Codec { source: Utf8Error, context: Option<Cow<'static, str>> },

    /// The operating system entropy source could not be read.
    #[error("Entropy source error{}: {source}", format_context(.context))]
    Entropy { source: getrandom::Error, context: Option<Cow<'static, str>> },
}

impl CipherError {
    /// Returns `true` for failures caused by a wrong key, a wrong IV, or tampered data.
    ///
    /// Callers should treat these as "verify key/IV/data integrity" and abort.
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::Crypto { .. } | Self::Codec { .. })
    }

    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput { message: message.into(), context: None }
    }

    pub(crate) fn invalid_configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfiguration { message: message.into(), context: None }
    }
}

/// Adds `.context(...)` to results that can be converted into a [`CipherError`].
pub trait CipherErrorExt<T> {
    /// Attaches a human-readable context to the error, if any.
    ///
    /// # Errors
    /// Returns the original error converted into [`CipherError`].
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T>;
}

impl<T> CipherErrorExt<T> for Result<T> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                CipherError::InvalidConfiguration { context: c, .. }
                | CipherError::InvalidInput { context: c, .. }
                | CipherError::Crypto { context: c, .. }
                | CipherError::Codec { context: c, .. }
                | CipherError::Entropy { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

macro_rules! source_conversions {
    ($($source:ty => $variant:ident),* $(,)?) => {$(
        impl From<$source> for CipherError {
            #[inline]
            fn from(source: $source) -> Self {
                Self::$variant { source, context: None }
            }
        }

        impl<T> CipherErrorExt<T> for std::result::Result<T, $source> {
            #[inline]
            fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T> {
                self.map_err(|source| CipherError::$variant { source, context: Some(context.into()) })
            }
        }
    )*};
}

source_conversions! {
    CryptoError => Crypto,
    Utf8Error => Codec,
    getrandom::Error => Entropy,
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
