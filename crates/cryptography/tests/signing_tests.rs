//! Integration tests for recoverable signing.

use minter_cryptography::{
    keccak256, recover_address, sha256, sign_recoverable, PrivateKey, Signature,
};
use std::thread;

#[test]
fn parallel_signing_needs_no_lock() {
    // Independent transactions are signed from many threads at once; the
    // global secp256k1 context is shared by all of them.
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            thread::spawn(move || {
                let key = PrivateKey::generate();
                let hash = keccak256(&[i; 32]);
                let signature = sign_recoverable(&hash, &key).unwrap();
                assert_eq!(key.address(), recover_address(&hash, &signature).unwrap());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn passphrase_lock_flow() {
    // A check lock signs with the sha256-of-passphrase key; whoever knows
    // the passphrase can reproduce the exact lock bytes offline.
    let passphrase = "secret words";
    let lock_key = PrivateKey::from_passphrase(passphrase).unwrap();
    let hash = sha256(b"pre-lock canonical bytes");

    let lock = sign_recoverable(&hash, &lock_key).unwrap();
    let reproduced = sign_recoverable(
        &hash,
        &PrivateKey::from_passphrase(passphrase).unwrap(),
    )
    .unwrap();
    assert_eq!(lock.to_bytes(), reproduced.to_bytes());

    let wrong = sign_recoverable(
        &hash,
        &PrivateKey::from_passphrase("wrong words").unwrap(),
    )
    .unwrap();
    assert_ne!(lock.to_bytes(), wrong.to_bytes());
}

#[test]
fn serialized_signature_survives_transport() {
    let key = PrivateKey::generate();
    let hash = keccak256(b"payload");
    let signature = sign_recoverable(&hash, &key).unwrap();

    let hex_form = hex::encode(signature.to_bytes());
    let restored = Signature::from_bytes(&hex::decode(hex_form).unwrap()).unwrap();
    assert_eq!(key.address(), recover_address(&hash, &restored).unwrap());
}
