pub mod fixtures;

use fixtures::*;
use hex_literal::hex;
use scribe_cipher::prelude::*;
use scribe_cipher::{BLOCK_LEN, ciphertext_len};

#[test]
fn encrypt_matches_reference_vector() {
    let cipher = setup_cipher();

    let ciphertext = cipher.encrypt(b"CSE360", ZERO_IV).expect("encrypt failed");

    assert_eq!(ciphertext.as_slice(), hex!("d07e6d1a60958f173fef1be052bb3bc7"));
    assert_eq!(cipher.decrypt(&ciphertext, ZERO_IV).expect("decrypt failed"), b"CSE360");
}

#[test]
fn encrypt_matches_reference_vectors_for_longer_keys() {
    let vectors = [
        (24, hex!("657545aea28d9b8118ccf833133fcc3e")),
        (32, hex!("49056f7f97e70bb5e883845c6627e0cb")),
    ];

    for (len, expected) in vectors {
        let cipher = Cipher::builder().key_bytes(counting_key(len)).unwrap().build();
        let ciphertext = cipher.encrypt_text("CSE360", ZERO_IV).unwrap();
        assert_eq!(ciphertext.as_slice(), expected, "vector for {len}-byte key");
    }
}

#[test]
fn empty_plaintext_is_one_padding_block() {
    let cipher = setup_cipher();

    let ciphertext = cipher.encrypt(b"", ZERO_IV).unwrap();
    assert_eq!(ciphertext.len(), BLOCK_LEN);
    assert_eq!(ciphertext.as_slice(), hex!("954f64f2e4e86e9eee82d20216684899"));

    let plaintext = cipher.decrypt(&ciphertext, ZERO_IV).unwrap();
    assert!(plaintext.is_empty());
}

#[test]
fn encryption_is_deterministic_for_fixed_iv() {
    let cipher = setup_cipher();
    let iv = cipher.generate_iv().unwrap();

    let first = cipher.encrypt_text("article draft", iv).unwrap();
    let second = cipher.encrypt_text("article draft", iv).unwrap();

    assert_eq!(first, second);
}

#[test]
fn different_ivs_give_different_ciphertexts() {
    let cipher = setup_cipher();
    let iv1 = cipher.generate_iv().unwrap();
    let iv2 = cipher.generate_iv().unwrap();

    let first = cipher.encrypt_text("article draft", iv1).unwrap();
    let second = cipher.encrypt_text("article draft", iv2).unwrap();

    assert_ne!(first, second);
}

#[test]
fn block_aligned_plaintext_gains_full_block() {
    let cipher = setup_cipher();
    let data = [0x41u8; 32];

    let ciphertext = cipher.encrypt(data, ZERO_IV).unwrap();

    assert_eq!(ciphertext.len(), 48);
    assert_eq!(ciphertext.len(), ciphertext_len(data.len()));
    assert_eq!(ciphertext.blocks(), 3);
}

#[test]
fn wrong_key_never_yields_original_text() {
    let cipher = setup_cipher();
    let other = Cipher::builder().key_bytes([0xEEu8; 16]).unwrap().build();
    let iv = cipher.generate_iv().unwrap();

    let ciphertext = cipher.encrypt_text("grade: A", iv).unwrap();

    match other.decrypt_text(&ciphertext, iv) {
        Ok(text) => assert_ne!(text, "grade: A"),
        Err(err) => assert!(err.is_integrity_failure(), "unexpected error: {err}"),
    }
}

#[test]
fn malformed_inputs_are_input_errors() {
    let cipher = setup_cipher();

    assert!(matches!(cipher.encrypt_text("x", [0u8; 12]), Err(CipherError::InvalidInput { .. })));
    assert!(matches!(cipher.decrypt([0u8; 20], ZERO_IV), Err(CipherError::InvalidInput { .. })));
    assert!(matches!(cipher.decrypt_text(b"", ZERO_IV), Err(CipherError::InvalidInput { .. })));
}
