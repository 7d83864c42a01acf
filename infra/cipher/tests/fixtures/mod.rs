use scribe_cipher::prelude::*;

/// Key `00 01 02 .. 0f`, the AES-128 key used by the regression vectors.
pub const KEY_128: [u8; 16] = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");

pub const ZERO_IV: [u8; 16] = [0u8; 16];

/// Returns `len` bytes counting up from zero, for AES-192/256 vector keys.
#[must_use]
pub fn counting_key(len: u8) -> Vec<u8> {
    (0..len).collect()
}

/// Initializes an AES-128 engine with the regression key.
/// # Panics
/// * If the engine cannot be built, the function will panic.
#[must_use]
pub fn setup_cipher() -> Cipher {
    Cipher::builder().key_bytes(KEY_128).expect("Cipher setup failed").build()
}
