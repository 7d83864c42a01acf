use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::{NoPadding, Pkcs7};
use cbc::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use std::sync::Arc;
use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater};
use tracing::trace;
use zeroize::Zeroizing;

use crate::builder::{CipherBuilder, NoKey};
use crate::error::{CipherError, CryptoError, Result};
use crate::iv::{Iv, IvGenerator};
use crate::key::{KeyProvider, KeySize, StaticKey, SymmetricKey};
use crate::types::{BLOCK_LEN, Ciphertext, Direction};

const BLOCK_LEN_U8: u8 = 16;

/// Everything one transform invocation needs, assembled fresh for every call.
#[derive(Debug)]
struct CipherContext<'a> {
    key: &'a SymmetricKey,
    iv: Iv,
    direction: Direction,
}

/// AES-CBC engine with PKCS7 padding.
///
/// `Cipher` holds only its [`KeyProvider`] (behind an [`Arc`]), so it is cheap to clone
/// and safe to share across threads. Every `encrypt`/`decrypt` call builds its own
/// block-mode state; concurrent calls never observe each other's IV or chaining state.
///
/// ### Security
/// CBC with PKCS7 and no MAC is malleable: an attacker who can submit modified
/// ciphertexts and observe whether padding validation fails can recover plaintext
/// (padding oracle). Padding is checked in constant time, but that does not close the
/// oracle if the failure itself is observable. Authenticate ciphertexts at a higher layer
/// when they cross a trust boundary.
///
/// ### Example
/// ```rust
/// use scribe_cipher::prelude::*;
///
/// # fn main() -> Result<(), CipherError> {
/// let cipher = Cipher::builder().key_hex("000102030405060708090a0b0c0d0e0f")?.build();
///
/// let iv = cipher.generate_iv()?;
/// let ciphertext = cipher.encrypt_text("article body", &iv)?;
///
/// // Persist `iv` next to `ciphertext`; both are needed to decrypt.
/// let restored = cipher.decrypt_text(&ciphertext, &iv)?;
/// assert_eq!(restored, "article body");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cipher<P = StaticKey>
where
    P: KeyProvider,
{
    pub(crate) provider: Arc<P>,
}

impl<P: KeyProvider> Clone for Cipher<P> {
    fn clone(&self) -> Self {
        Self { provider: Arc::clone(&self.provider) }
    }
}

impl Cipher {
    /// Returns a new [`CipherBuilder`] to configure the engine.
    #[must_use]
    pub fn builder() -> CipherBuilder<NoKey> {
        CipherBuilder::new()
    }
}

impl<P> Cipher<P>
where
    P: KeyProvider,
{
    /// Creates an engine around an injected key provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider: Arc::new(provider) }
    }

    /// Key size of the provider's key.
    #[must_use]
    pub fn key_size(&self) -> KeySize {
        self.provider.key().size()
    }

    /// Draws a fresh IV from the operating system CSPRNG.
    ///
    /// # Errors
    /// * [`CipherError::Entropy`] If the OS entropy source is unavailable.
    pub fn generate_iv(&self) -> Result<Iv> {
        IvGenerator.generate()
    }

    /// Encrypts `plaintext` under the provider's key and the caller's IV.
    ///
    /// The output length is `16 * (len / 16 + 1)`. The IV must be fresh for every call
    /// under the same key; reuse is not detected here.
    ///
    /// # Errors
    /// * [`CipherError::InvalidInput`] If `iv` is not exactly 16 bytes.
    pub fn encrypt(&self, plaintext: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Result<Ciphertext> {
        let ctx = self.context(iv.as_ref(), Direction::Encrypt)?;
        let plaintext = plaintext.as_ref();

        let data = match ctx.key.size() {
            KeySize::Aes128 => encrypt_cbc::<Aes128>(&ctx, plaintext)?,
            KeySize::Aes192 => encrypt_cbc::<Aes192>(&ctx, plaintext)?,
            KeySize::Aes256 => encrypt_cbc::<Aes256>(&ctx, plaintext)?,
        };

        trace!(direction = ?ctx.direction, input = plaintext.len(), output = data.len(), "cbc transform");
        Ok(Ciphertext::new(data))
    }

    /// Decrypts `ciphertext` and strips its PKCS7 padding.
    ///
    /// # Errors
    /// * [`CipherError::InvalidInput`] If `iv` is not 16 bytes, or the ciphertext is
    ///   empty or not a multiple of 16 bytes.
    /// * [`CipherError::Crypto`] If the padding is invalid (wrong key, wrong IV, or
    ///   tampered data).
    pub fn decrypt(&self, ciphertext: impl AsRef<[u8]>, iv: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let ctx = self.context(iv.as_ref(), Direction::Decrypt)?;
        let ciphertext = ciphertext.as_ref();

        if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_LEN) {
            return Err(CipherError::InvalidInput {
                message: format!(
                    "Invalid ciphertext length {}, must be a non-zero multiple of {BLOCK_LEN}",
                    ciphertext.len()
                )
                .into(),
                context: None,
            });
        }

        let mut buf = Zeroizing::new(ciphertext.to_vec());
        match ctx.key.size() {
            KeySize::Aes128 => decrypt_cbc::<Aes128>(&ctx, &mut buf)?,
            KeySize::Aes192 => decrypt_cbc::<Aes192>(&ctx, &mut buf)?,
            KeySize::Aes256 => decrypt_cbc::<Aes256>(&ctx, &mut buf)?,
        }

        let len = unpadded_len(&buf)?;
        let mut plaintext = std::mem::take(&mut *buf);
        plaintext.truncate(len);

        trace!(direction = ?ctx.direction, input = ciphertext.len(), output = len, "cbc transform");
        Ok(plaintext)
    }

    fn context(&self, iv: &[u8], direction: Direction) -> Result<CipherContext<'_>> {
        Ok(CipherContext { key: self.provider.key(), iv: Iv::from_slice(iv)?, direction })
    }
}

fn encrypt_cbc<C>(ctx: &CipherContext<'_>, plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher,
    cbc::Encryptor<C>: KeyIvInit + BlockEncryptMut,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(ctx.key.as_bytes(), ctx.iv.as_ref())
        .map_err(|_| rejected_key(ctx))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn decrypt_cbc<C>(ctx: &CipherContext<'_>, buf: &mut [u8]) -> Result<()>
where
    C: BlockDecryptMut + BlockCipher,
    cbc::Decryptor<C>: KeyIvInit + BlockDecryptMut,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(ctx.key.as_bytes(), ctx.iv.as_ref())
        .map_err(|_| rejected_key(ctx))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|_| CipherError::invalid_input("Ciphertext is not block aligned"))?;
    Ok(())
}

fn rejected_key(ctx: &CipherContext<'_>) -> CipherError {
    CipherError::InvalidConfiguration {
        message: "Key or IV rejected by the block cipher".into(),
        context: Some(ctx.key.size().to_string().into()),
    }
}

/// Validates PKCS7 padding on the final block and returns the plaintext length.
///
/// Every byte of the final block is inspected regardless of where a mismatch occurs.
fn unpadded_len(plain: &[u8]) -> Result<usize, CryptoError> {
    let Some(tail) = plain.len().checked_sub(BLOCK_LEN).map(|start| &plain[start..]) else {
        return Err(CryptoError::InvalidPadding);
    };
    let pad = tail[BLOCK_LEN - 1];

    let mut valid: Choice = !pad.ct_eq(&0) & !pad.ct_gt(&BLOCK_LEN_U8);
    for (position, byte) in (1..=BLOCK_LEN_U8).zip(tail.iter().rev()) {
        let in_padding = !position.ct_gt(&pad);
        valid &= !in_padding | byte.ct_eq(&pad);
    }

    if bool::from(valid) { Ok(plain.len() - usize::from(pad)) } else { Err(CryptoError::InvalidPadding) }
}
