//! # Envelope
//!
//! Storage layout that keeps an IV next to the ciphertext it was used for:
//!
//! ```text
//! [IV(16)][CIPHERTEXT(N)]    N = 16 * k, k >= 1
//! ```
//!
//! Sealing always draws a fresh IV, so callers that persist envelopes never have to
//! manage IVs themselves.

use std::fmt;
use std::ops::Deref;
use tracing::trace;
use zeroize::Zeroizing;

use crate::engine::Cipher;
use crate::error::{CipherError, Result};
use crate::iv::{IV_LEN, Iv};
use crate::key::KeyProvider;
use crate::types::BLOCK_LEN;

/// Minimum envelope length: one IV and one padding block.
pub const MIN_ENVELOPE_LEN: usize = IV_LEN + BLOCK_LEN;

/// An `IV || CIPHERTEXT` blob produced by [`Cipher::seal`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Envelope {
    data: Vec<u8>,
}

impl Envelope {
    /// Splits a persisted blob into its IV and ciphertext.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidInput`] if the blob is shorter than
    /// [`MIN_ENVELOPE_LEN`] or the ciphertext part is not block aligned.
    pub fn split(blob: &[u8]) -> Result<(Iv, &[u8])> {
        if blob.len() < MIN_ENVELOPE_LEN || !(blob.len() - IV_LEN).is_multiple_of(BLOCK_LEN) {
            return Err(CipherError::InvalidInput {
                message: format!(
                    "Envelope of {} bytes is malformed. Expected {IV_LEN} IV bytes followed by a non-zero multiple of {BLOCK_LEN}",
                    blob.len()
                )
                .into(),
                context: None,
            });
        }

        let (iv, ciphertext) = blob.split_at(IV_LEN);
        Ok((Iv::from_slice(iv)?, ciphertext))
    }

    /// Returns the IV part.
    #[must_use]
    pub fn iv(&self) -> Iv {
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&self.data[..IV_LEN]);
        Iv::from_bytes(iv)
    }

    /// Returns the ciphertext part.
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.data[IV_LEN..]
    }

    /// Returns the raw sealed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("iv", &self.iv())
            .field("ciphertext_len", &self.ciphertext().len())
            .finish()
    }
}

impl AsRef<[u8]> for Envelope {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for Envelope {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl TryFrom<Vec<u8>> for Envelope {
    type Error = CipherError;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::split(&data)?;
        Ok(Self { data })
    }
}

impl<P> Cipher<P>
where
    P: KeyProvider,
{
    /// Encrypts `plaintext` under a freshly generated IV and packs both into an [`Envelope`].
    ///
    /// # Errors
    /// * [`CipherError::Entropy`] If no IV could be generated.
    pub fn seal(&self, plaintext: impl AsRef<[u8]>) -> Result<Envelope> {
        let iv = self.generate_iv()?;
        let ciphertext = self.encrypt(plaintext, iv)?;

        let mut data = Vec::with_capacity(IV_LEN + ciphertext.len());
        data.extend_from_slice(iv.as_ref());
        data.extend_from_slice(&ciphertext);

        trace!(len = data.len(), "sealed envelope");
        Ok(Envelope { data })
    }

    /// Seals the UTF-8 encoding of `text`.
    ///
    /// # Errors
    /// See [`Cipher::seal`].
    pub fn seal_text(&self, text: &str) -> Result<Envelope> {
        self.seal(text.as_bytes())
    }

    /// Opens an envelope (or its persisted bytes) back into plaintext.
    ///
    /// # Errors
    /// * [`CipherError::InvalidInput`] If the blob is malformed.
    /// * [`CipherError::Crypto`] If the padding is invalid.
    pub fn open(&self, blob: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let (iv, ciphertext) = Envelope::split(blob.as_ref())?;
        self.decrypt(ciphertext, iv)
    }

    /// Opens an envelope and decodes the plaintext as UTF-8.
    ///
    /// # Errors
    /// See [`Cipher::open`]; additionally [`CipherError::Codec`] for invalid UTF-8.
    pub fn open_text(&self, blob: impl AsRef<[u8]>) -> Result<String> {
        let bytes = Zeroizing::new(self.open(blob)?);
        Ok(std::str::from_utf8(&bytes)?.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_cipher() -> Cipher {
        Cipher::builder().key_bytes([0x11u8; 16]).unwrap().build()
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let cipher = setup_cipher();

        let sealed = cipher.seal(b"backup entry").unwrap();
        assert_eq!(sealed.len(), IV_LEN + BLOCK_LEN);
        assert_eq!(cipher.open(&sealed).unwrap(), b"backup entry");
    }

    #[test]
    fn test_seal_uses_fresh_iv() {
        let cipher = setup_cipher();

        let first = cipher.seal_text("same text").unwrap();
        let second = cipher.seal_text("same text").unwrap();

        assert_ne!(first.iv(), second.iv());
        assert_ne!(first.ciphertext(), second.ciphertext());
    }

    #[test]
    fn test_split_rejects_malformed_blobs() {
        for len in [0, IV_LEN, IV_LEN + 1, IV_LEN + BLOCK_LEN - 1, IV_LEN + BLOCK_LEN + 3] {
            assert!(
                matches!(Envelope::split(&vec![0u8; len]), Err(CipherError::InvalidInput { .. })),
                "blob of {len} bytes must be rejected"
            );
        }
    }

    #[test]
    fn test_envelope_from_persisted_bytes() {
        let cipher = setup_cipher();
        let sealed = cipher.seal_text("restored article").unwrap();

        let restored = Envelope::try_from(sealed.as_slice().to_vec()).unwrap();
        assert_eq!(restored, sealed);
        assert_eq!(cipher.open_text(&restored).unwrap(), "restored article");
    }
}
