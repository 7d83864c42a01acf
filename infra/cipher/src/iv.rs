use getrandom::fill;
use std::fmt;
use std::ops::Deref;

use crate::error::{CipherError, CipherErrorExt, Result};

/// AES block length, and therefore the CBC IV length.
pub const IV_LEN: usize = 16;

/// A 16-byte CBC initialization vector.
///
/// IVs are not secret but must be unpredictable and never reused under the same key.
/// Keep the IV next to its ciphertext; decryption is impossible without it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Iv([u8; IV_LEN]);

impl Iv {
    /// Draws a fresh IV from the operating system CSPRNG.
    ///
    /// # Errors
    /// Returns [`CipherError::Entropy`] if the OS entropy source is unavailable.
    pub fn generate() -> Result<Self> {
        IvGenerator.generate()
    }

    /// Wraps exactly 16 caller-supplied bytes.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidInput`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; IV_LEN] = bytes.try_into().map_err(|_| {
            CipherError::invalid_input(format!(
                "Invalid IV length {}, must be {IV_LEN} bytes",
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.0
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({})", hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Iv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Iv {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; IV_LEN]> for Iv {
    fn from(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Iv {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

/// Produces per-operation IVs.
///
/// Backed by `getrandom`, which reads the kernel CSPRNG directly and holds no
/// user-space state, so concurrent callers never observe correlated output.
#[derive(Debug, Default, Clone, Copy)]
pub struct IvGenerator;

impl IvGenerator {
    /// # Errors
    /// Returns [`CipherError::Entropy`] if the OS entropy source is unavailable.
    pub fn generate(&self) -> Result<Iv> {
        let mut iv = [0u8; IV_LEN];
        fill(&mut iv).context("System RNG unavailable for IV generation")?;
        Ok(Iv(iv))
    }
}
