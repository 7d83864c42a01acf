use private::Sealed;
use tracing::debug;

use crate::engine::Cipher;
use crate::error::Result;
use crate::key::{KeyProvider, StaticKey, SymmetricKey};

#[derive(Debug, Default)]
pub struct NoKey;

#[derive(Debug)]
pub struct WithKey<P: KeyProvider>(P);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoKey {}
impl<P: KeyProvider> Sealed for WithKey<P> {}

/// A builder for the [`Cipher`] engine.
///
/// The key is mandatory: [`CipherBuilder::build`] only exists once a key or key provider
/// has been supplied. Raw key bytes handed to the builder are copied into a
/// [`SymmetricKey`], which zeroes them on drop.
#[allow(private_bounds)]
#[derive(Debug)]
pub struct CipherBuilder<K: Sealed = NoKey> {
    key: K,
}

impl Default for CipherBuilder {
    fn default() -> Self {
        Self { key: NoKey }
    }
}

impl CipherBuilder {
    /// Creates a new empty builder.
    #[must_use = "Builder must be given a key before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `bytes` as the key for every operation.
    ///
    /// # Errors
    /// Returns [`crate::CipherError::InvalidConfiguration`] unless `bytes` is 16, 24, or 32 bytes long.
    pub fn key_bytes(self, bytes: impl AsRef<[u8]>) -> Result<CipherBuilder<WithKey<StaticKey>>> {
        Ok(self.key_provider(StaticKey::from_slice(bytes.as_ref())?))
    }

    /// Uses a hex-encoded key for every operation.
    ///
    /// # Errors
    /// Returns [`crate::CipherError::InvalidConfiguration`] if the string is not hex or has
    /// an unsupported length.
    pub fn key_hex(self, encoded: impl AsRef<[u8]>) -> Result<CipherBuilder<WithKey<StaticKey>>> {
        Ok(self.key_provider(StaticKey::from_hex(encoded)?))
    }

    /// Uses an already validated [`SymmetricKey`].
    #[must_use]
    pub fn key(self, key: SymmetricKey) -> CipherBuilder<WithKey<StaticKey>> {
        self.key_provider(StaticKey::new(key))
    }

    /// Injects a custom key source (environment, secret store, test fixture).
    #[must_use]
    pub fn key_provider<P: KeyProvider>(self, provider: P) -> CipherBuilder<WithKey<P>> {
        CipherBuilder { key: WithKey(provider) }
    }
}

impl<P: KeyProvider> CipherBuilder<WithKey<P>> {
    /// Finalizes engine construction.
    #[must_use]
    pub fn build(self) -> Cipher<P> {
        let WithKey(provider) = self.key;
        debug!(key_size = %provider.key().size(), "cipher engine initialized");
        Cipher::new(provider)
    }
}
