pub mod fixtures;

use fixtures::*;
use scribe_cipher::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

#[test]
fn flipping_any_ciphertext_byte_never_restores_plaintext() {
    let cipher = setup_cipher();
    let iv = cipher.generate_iv().unwrap();
    let text = "Confidential article: midterm answers";

    let ciphertext = cipher.encrypt_text(text, iv).unwrap();

    for index in 0..ciphertext.len() {
        let mut tampered = ciphertext.as_slice().to_vec();
        tampered[index] ^= 0x01;

        match cipher.decrypt_text(&tampered, iv) {
            Ok(decoded) => assert_ne!(decoded, text, "byte {index} flip went unnoticed"),
            Err(err) => assert!(
                matches!(err, CipherError::Crypto { .. } | CipherError::Codec { .. }),
                "byte {index}: unexpected error {err}"
            ),
        }
    }
}

#[test]
fn flipping_previous_block_breaks_padding() {
    let cipher = setup_cipher();
    let iv = cipher.generate_iv().unwrap();

    let mut ciphertext = cipher.encrypt([0x41u8; 20], iv).unwrap().into_vec();
    assert_eq!(ciphertext.len(), 32);

    // Byte 15 of block 0 is XORed into the pad byte of block 1 on decryption.
    ciphertext[15] ^= 0xFF;

    let result = cipher.decrypt(&ciphertext, iv);
    assert!(matches!(
        result,
        Err(CipherError::Crypto { source: CryptoError::InvalidPadding, .. })
    ));
}

#[test]
fn concurrent_calls_are_independent() {
    let cipher = setup_cipher();
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cipher = cipher.clone();
            thread::spawn(move || {
                for round in 0..200 {
                    let text = format!("worker {worker} round {round}");
                    let iv = cipher.generate_iv().unwrap();
                    let ciphertext = cipher.encrypt_text(&text, iv).unwrap();
                    assert_eq!(cipher.decrypt_text(&ciphertext, iv).unwrap(), text);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}

#[test]
fn concurrent_iv_generation_has_no_duplicates() {
    let generator = IvGenerator;
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(move || (0..2_500).map(|_| generator.generate().unwrap()).collect::<Vec<_>>()))
        .collect();

    let mut seen = HashSet::with_capacity(10_000);
    for handle in handles {
        for iv in handle.join().expect("generator thread panicked") {
            assert!(seen.insert(iv), "duplicate IV across threads");
        }
    }
    assert_eq!(seen.len(), 10_000);
}

#[test]
fn shared_provider_drives_multiple_engines() {
    let provider = Arc::new(StaticKey::from_slice(&KEY_128).unwrap());
    let writer = Cipher::new(Arc::clone(&provider));
    let reader = Cipher::builder().key_provider(provider).build();

    let sealed = writer.seal_text("user: ada, role: admin").unwrap();
    assert_eq!(reader.open_text(&sealed).unwrap(), "user: ada, role: admin");
}

#[test]
fn envelope_survives_persistence_roundtrip() {
    let cipher = setup_cipher();
    let sealed = cipher.seal_text("backup line").unwrap();

    let persisted: Vec<u8> = sealed.into_vec();
    let (iv, ciphertext) = Envelope::split(&persisted).unwrap();

    assert_eq!(cipher.decrypt_text(ciphertext, iv).unwrap(), "backup line");
}
