use std::fmt;
use std::ops::Deref;

// --- Block geometry ---

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Length of the ciphertext produced for `plaintext_len` bytes of input.
///
/// PKCS7 always appends between 1 and 16 bytes, so an aligned plaintext gains a full block.
#[must_use]
pub const fn ciphertext_len(plaintext_len: usize) -> usize {
    (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN
}

// --- Direction ---

/// Which way a single transform invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

// --- Container ---

/// Output of [`crate::Cipher::encrypt`].
///
/// Its length is always a non-zero multiple of [`BLOCK_LEN`]. Only the engine
/// creates values of this type; persisted ciphertext is passed back to
/// [`crate::Cipher::decrypt`] as plain bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    pub(crate) const fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Returns the raw ciphertext bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Number of cipher blocks.
    #[must_use]
    pub fn blocks(&self) -> usize {
        self.0.len() / BLOCK_LEN
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({})", hex::encode(&self.0))
    }
}

impl AsRef<[u8]> for Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Ciphertext {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Ciphertext> for Vec<u8> {
    fn from(ciphertext: Ciphertext) -> Self {
        ciphertext.0
    }
}
