//! # Text Codec
//!
//! Thin adapter between Unicode text and the byte-oriented [`Cipher`] transform.
//! Text is always encoded as UTF-8 before encryption. On the way back, bytes that are
//! not valid UTF-8 surface as [`crate::CipherError::Codec`], which is the usual symptom of a
//! wrong key, a wrong IV, or tampered ciphertext that happened to carry valid padding.

use zeroize::Zeroizing;

use crate::engine::Cipher;
use crate::error::{CipherErrorExt, Result};
use crate::key::KeyProvider;
use crate::types::Ciphertext;

impl<P> Cipher<P>
where
    P: KeyProvider,
{
    /// Encrypts the UTF-8 encoding of `text`.
    ///
    /// # Errors
    /// * [`crate::CipherError::InvalidInput`] If `iv` is not exactly 16 bytes.
    pub fn encrypt_text(&self, text: &str, iv: impl AsRef<[u8]>) -> Result<Ciphertext> {
        self.encrypt(text.as_bytes(), iv)
    }

    /// Decrypts `ciphertext` and decodes the plaintext as UTF-8.
    ///
    /// # Errors
    /// * [`crate::CipherError::InvalidInput`] If the IV or ciphertext is malformed.
    /// * [`crate::CipherError::Crypto`] If the padding is invalid.
    /// * [`crate::CipherError::Codec`] If the plaintext is not valid UTF-8.
    pub fn decrypt_text(&self, ciphertext: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Result<String> {
        let bytes = Zeroizing::new(self.decrypt(ciphertext, iv)?);
        let text = std::str::from_utf8(&bytes)?;
        Ok(text.to_owned())
    }

    /// Encrypts a character buffer, for callers that keep secrets out of `String`.
    ///
    /// # Errors
    /// * [`crate::CipherError::InvalidInput`] If `iv` is not exactly 16 bytes.
    pub fn encrypt_chars(&self, chars: &[char], iv: impl AsRef<[u8]>) -> Result<Ciphertext> {
        let text = Zeroizing::new(chars.iter().collect::<String>());
        self.encrypt_text(&text, iv)
    }

    /// Decrypts `ciphertext` into a character buffer.
    ///
    /// # Errors
    /// Same as [`Cipher::decrypt_text`].
    pub fn decrypt_to_chars(
        &self,
        ciphertext: impl AsRef<[u8]>,
        iv: impl AsRef<[u8]>,
    ) -> Result<Vec<char>> {
        let text = Zeroizing::new(self.decrypt_text(ciphertext, iv).context("decrypt to chars")?);
        Ok(text.chars().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CipherError;
    use crate::iv::Iv;

    fn setup_cipher() -> Cipher {
        Cipher::builder().key_bytes([0x5Au8; 32]).unwrap().build()
    }

    #[test]
    fn test_text_roundtrip() {
        let cipher = setup_cipher();
        let iv = Iv::generate().unwrap();

        for text in ["", "CSE360", "héllo wörld", "記事の本文", "emoji 🦀🔐"] {
            let ciphertext = cipher.encrypt_text(text, iv).unwrap();
            assert_eq!(cipher.decrypt_text(&ciphertext, iv).unwrap(), text);
        }
    }

    #[test]
    fn test_chars_roundtrip() {
        let cipher = setup_cipher();
        let iv = Iv::generate().unwrap();
        let secret: Vec<char> = "pässwörd".chars().collect();

        let ciphertext = cipher.encrypt_chars(&secret, iv).unwrap();
        assert_eq!(cipher.decrypt_to_chars(&ciphertext, iv).unwrap(), secret);
    }

    #[test]
    fn test_invalid_utf8_is_codec_error() {
        let cipher = setup_cipher();
        let iv = Iv::generate().unwrap();

        let ciphertext = cipher.encrypt([0xFFu8, 0xFE, 0xFD], iv).unwrap();
        let result = cipher.decrypt_text(&ciphertext, iv);

        assert!(matches!(result, Err(CipherError::Codec { .. })));
    }
}
