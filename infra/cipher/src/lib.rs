//! Symmetric cipher engine for protecting sensitive text fields.
//!
//! The crate turns plaintext into ciphertext and back with AES (128/192/256, chosen by
//! key length) in CBC mode with PKCS7 padding. It is split into four parts:
//!
//! * **Key material** ([`KeyProvider`], [`SymmetricKey`]): injected at construction.
//! * **IV generation** ([`IvGenerator`], [`Iv`]): 16 random bytes from the OS CSPRNG.
//! * **Cipher transform** ([`Cipher::encrypt`], [`Cipher::decrypt`]): single-shot,
//!   stateless between calls.
//! * **Text codec** ([`Cipher::encrypt_text`], [`Cipher::decrypt_text`]): UTF-8 adapter.
//!
//! ## IV Policy
//!
//! The caller supplies the IV and must keep it with the ciphertext. A fresh random IV is
//! required for every encryption under the same key. Reuse is not detected and leaks
//! equality of plaintext prefixes. [`Cipher::seal`] removes the burden by generating the
//! IV itself and storing it in front of the ciphertext:
//!
//! ```text
//! [IV(16)][CIPHERTEXT(N)]
//! ```
//!
//! ## Integrity
//!
//! CBC with PKCS7 provides confidentiality only. Tampering is detected probabilistically,
//! through invalid padding ([`CipherError::Crypto`]) or invalid UTF-8
//! ([`CipherError::Codec`]), and never guaranteed. Ciphertext exposed to an active attacker
//! who can observe decryption failures is vulnerable to padding-oracle attacks.
//!
//! ## Example
//!
//! ```rust
//! use scribe_cipher::prelude::*;
//!
//! # fn main() -> Result<(), CipherError> {
//! let cipher = Cipher::builder().key_bytes([0x42u8; 32])?.build();
//!
//! let sealed = cipher.seal_text("instructor notes")?;
//! let bytes: Vec<u8> = sealed.as_slice().to_vec();
//!
//! assert_eq!(cipher.open_text(&bytes)?, "instructor notes");
//! # Ok(())
//! # }
//! ```

mod builder;
mod codec;
mod engine;
pub mod envelope;
mod error;
mod iv;
mod key;
mod types;

pub use builder::{CipherBuilder, NoKey, WithKey};
pub use engine::Cipher;
pub use envelope::{Envelope, MIN_ENVELOPE_LEN};
pub use error::{CipherError, CipherErrorExt, CryptoError, Result};
pub use iv::{IV_LEN, Iv, IvGenerator};
pub use key::{KeyProvider, KeySize, StaticKey, SymmetricKey};
pub use types::{BLOCK_LEN, Ciphertext, Direction, ciphertext_len};

pub mod prelude {
    pub use crate::engine::Cipher;
    pub use crate::envelope::Envelope;
    pub use crate::error::{CipherError, CipherErrorExt, CryptoError};
    pub use crate::iv::{Iv, IvGenerator};
    pub use crate::key::{KeyProvider, KeySize, StaticKey, SymmetricKey};
    pub use crate::types::Ciphertext;
}
