//! # Key Material
//!
//! The engine never owns a literal key. Key bytes arrive through a [`KeyProvider`]
//! supplied at construction, so the source (literal, environment, secret store) stays
//! outside of the engine.

use std::fmt;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CipherError, Result};

/// Supported AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key.
    Aes128,

    /// 192-bit key.
    Aes192,

    /// 256-bit key.
    Aes256,
}

impl KeySize {
    /// Maps a key length in bytes to a [`KeySize`].
    #[must_use]
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128),
            24 => Some(Self::Aes192),
            32 => Some(Self::Aes256),
            _ => None,
        }
    }

    /// Key length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aes128 => f.write_str("AES-128"),
            Self::Aes192 => f.write_str("AES-192"),
            Self::Aes256 => f.write_str("AES-256"),
        }
    }
}

/// Raw AES key material.
///
/// The length is checked once at construction and the bytes are zeroed on drop.
/// `Debug` only reveals the key size.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    size: KeySize,
}

impl SymmetricKey {
    /// Copies key material from a byte slice.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidConfiguration`] unless the slice is 16, 24, or 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let size = KeySize::from_len(bytes.len()).ok_or_else(|| {
            CipherError::invalid_configuration(format!(
                "Invalid key length {}, must be 16, 24 or 32 bytes",
                bytes.len()
            ))
        })?;

        Ok(Self { bytes: bytes.to_vec(), size })
    }

    /// Decodes hex-encoded key material (e.g. from a config file or environment variable).
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidConfiguration`] if the string is not valid hex or
    /// does not decode to a supported key length.
    pub fn from_hex(encoded: impl AsRef<[u8]>) -> Result<Self> {
        let decoded = Zeroizing::new(
            hex::decode(encoded.as_ref())
                .map_err(|e| CipherError::invalid_configuration(format!("Key is not valid hex: {e}")))?,
        );

        Self::from_slice(&decoded)
    }

    #[must_use]
    pub const fn size(&self) -> KeySize {
        self.size
    }

    /// Exposes the raw key bytes to the block cipher.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey").field("size", &self.size).finish_non_exhaustive()
    }
}

impl TryFrom<&[u8]> for SymmetricKey {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

/// Source of the key used for every operation of a [`crate::Cipher`].
///
/// Implementations must return the same key for their whole lifetime and never
/// regenerate it implicitly.
pub trait KeyProvider: Send + Sync + fmt::Debug {
    /// Returns the symmetric key.
    fn key(&self) -> &SymmetricKey;
}

impl KeyProvider for SymmetricKey {
    fn key(&self) -> &SymmetricKey {
        self
    }
}

impl<P: KeyProvider + ?Sized> KeyProvider for Arc<P> {
    fn key(&self) -> &SymmetricKey {
        (**self).key()
    }
}

impl<P: KeyProvider + ?Sized> KeyProvider for &P {
    fn key(&self) -> &SymmetricKey {
        (**self).key()
    }
}

/// A provider holding a single key for the process lifetime.
#[derive(Debug, Clone)]
pub struct StaticKey {
    key: SymmetricKey,
}

impl StaticKey {
    #[must_use]
    pub const fn new(key: SymmetricKey) -> Self {
        Self { key }
    }

    /// # Errors
    /// See [`SymmetricKey::from_slice`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SymmetricKey::from_slice(bytes).map(Self::new)
    }

    /// # Errors
    /// See [`SymmetricKey::from_hex`].
    pub fn from_hex(encoded: impl AsRef<[u8]>) -> Result<Self> {
        SymmetricKey::from_hex(encoded).map(Self::new)
    }
}

impl KeyProvider for StaticKey {
    fn key(&self) -> &SymmetricKey {
        &self.key
    }
}

impl From<SymmetricKey> for StaticKey {
    fn from(key: SymmetricKey) -> Self {
        Self::new(key)
    }
}
