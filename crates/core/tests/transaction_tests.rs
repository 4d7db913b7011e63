//! End-to-end envelope tests: sign, encode, decode, recover.

use minter_core::operation::{MultisendData, SendData};
use minter_core::{
    CoreError, Operation, OperationType, SignatureData, SignatureType, SignedTransaction,
    TransactionBuilder,
};
use minter_cryptography::PrivateKey;
use minter_primitives::{Address, Amount, ChainId, CoinId};
use minter_rlp::Rlp;

fn test_key() -> PrivateKey {
    PrivateKey::from_hex("07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142")
        .unwrap()
}

fn recipient() -> Address {
    "Mx31e61a05adbd13c6b625262704bc305bf7725026".parse().unwrap()
}

fn send_transaction() -> minter_core::Transaction {
    TransactionBuilder::new(ChainId::MainNet)
        .nonce(1)
        .operation(Operation::Send(SendData::new(
            CoinId::BASE,
            recipient(),
            Amount::from_decimal("0.012345").unwrap(),
        )))
        .build()
        .unwrap()
}

#[test]
fn sign_encode_decode_recovers_everything() {
    let key = test_key();
    let signed = send_transaction().sign(&key).unwrap();

    let restored = SignedTransaction::from_hex(&signed.to_hex()).unwrap();
    assert_eq!(signed, restored);

    let tx = restored.transaction();
    assert_eq!(1, tx.nonce());
    assert_eq!(ChainId::MainNet, tx.chain_id());
    assert_eq!(1, tx.gas_price());
    assert_eq!(CoinId::BASE, tx.gas_coin());
    assert!(tx.service_data().is_empty());
    match tx.operation() {
        Operation::Send(data) => {
            assert_eq!(recipient(), data.to);
            assert_eq!("0.012345", data.value.to_decimal_string());
        }
        other => panic!("expected send, got {other:?}"),
    }

    // The signature binds the signer's address to the unsigned bytes.
    assert_eq!(key.address(), restored.sender().unwrap());
}

#[test]
fn hex_transport_accepts_0x_prefix() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let with_prefix = format!("0x{}", signed.to_hex());
    assert_eq!(signed, SignedTransaction::from_hex(&with_prefix).unwrap());
}

#[test]
fn display_hash_is_mt_prefixed() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let hash = signed.hash().to_string();
    assert!(hash.starts_with("Mt"));
    assert_eq!(2 + 64, hash.len());
    // The hash is a pure function of the wire bytes.
    assert_eq!(hash, SignedTransaction::decode(&signed.encode()).unwrap().hash().to_string());
}

#[test]
fn multisig_preserves_signer_order() {
    let signers: Vec<PrivateKey> = (1u8..=3).map(|_| PrivateKey::generate()).collect();
    let multisig_address = Address::from([0xab; 20]);

    let tx = send_transaction();
    let collected: Vec<_> = signers
        .iter()
        .map(|key| tx.signature_for(key).unwrap())
        .collect();
    let signed = tx.sign_multi(multisig_address, collected.clone()).unwrap();

    assert_eq!(multisig_address, signed.sender().unwrap());
    assert_eq!(SignatureType::Multi, signed.signature_type());

    let restored = SignedTransaction::decode(&signed.encode()).unwrap();
    match restored.signature_data() {
        SignatureData::Multi(multi) => {
            assert_eq!(collected, multi.signatures);
            // Each co-signer is recoverable against the multi-shaped hash.
            let hash = restored
                .transaction()
                .signing_hash(SignatureType::Multi);
            for (key, signature) in signers.iter().zip(&multi.signatures) {
                assert_eq!(key.address(), signature.recover(&hash).unwrap());
            }
        }
        other => panic!("expected multi signature, got {other:?}"),
    }
}

#[test]
fn multisig_without_signatures_is_a_precondition_error() {
    let result = send_transaction().sign_multi(Address::zero(), Vec::new());
    assert!(matches!(result, Err(CoreError::MissingField("signatures"))));
}

#[test]
fn unknown_operation_tag_fails_closed() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let rlp = Rlp::decode(&signed.encode()).unwrap();
    let mut fields = rlp.as_list().unwrap().to_vec();
    fields[4] = Rlp::from_u64(0x99);
    let tampered = Rlp::list(fields).encode();

    assert!(matches!(
        SignedTransaction::decode(&tampered),
        Err(CoreError::UnknownOperationType(0x99))
    ));
}

#[test]
fn unknown_chain_id_fails_closed() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let rlp = Rlp::decode(&signed.encode()).unwrap();
    let mut fields = rlp.as_list().unwrap().to_vec();
    fields[1] = Rlp::from_u64(9);
    let tampered = Rlp::list(fields).encode();

    assert!(SignedTransaction::decode(&tampered).is_err());
}

#[test]
fn short_element_count_fails_closed() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let rlp = Rlp::decode(&signed.encode()).unwrap();
    let mut fields = rlp.as_list().unwrap().to_vec();
    fields.pop();
    let tampered = Rlp::list(fields).encode();

    assert!(matches!(
        SignedTransaction::decode(&tampered),
        Err(CoreError::Decode { .. })
    ));
}

#[test]
fn proofless_redeem_check_is_rejected_on_the_signed_wire() {
    use minter_core::operation::RedeemCheckData;
    use minter_primitives::PROOF_SIZE;

    let signed = TransactionBuilder::new(ChainId::MainNet)
        .nonce(1)
        .operation(Operation::RedeemCheck(RedeemCheckData::new(
            vec![0xcd; 90],
            [0x7f; PROOF_SIZE],
        )))
        .build()
        .unwrap()
        .sign(&test_key())
        .unwrap();

    // Swap the operation data for the proof-less interchange form.
    let rlp = Rlp::decode(&signed.encode()).unwrap();
    let mut fields = rlp.as_list().unwrap().to_vec();
    fields[5] = Rlp::bytes(
        Operation::RedeemCheck(RedeemCheckData::without_proof(vec![0xcd; 90])).encode_data(),
    );
    let tampered = Rlp::list(fields).encode();

    assert!(matches!(
        SignedTransaction::decode(&tampered),
        Err(CoreError::Decode { .. })
    ));
}

#[test]
fn payload_travels_verbatim() {
    let payload = vec![0x42; 1024];
    let signed = TransactionBuilder::new(ChainId::TestNet)
        .nonce(7)
        .gas_price(2)
        .gas_coin(CoinId::from(3))
        .operation(Operation::Send(SendData::new(
            CoinId::from(3),
            recipient(),
            Amount::from_base_units(5),
        )))
        .payload(payload.clone())
        .build()
        .unwrap()
        .sign(&test_key())
        .unwrap();

    let restored = SignedTransaction::decode(&signed.encode()).unwrap();
    assert_eq!(payload, restored.transaction().payload());
    assert_eq!(2, restored.transaction().gas_price());
    assert_eq!(CoinId::from(3), restored.transaction().gas_coin());
}

#[test]
fn multisend_survives_the_full_pipeline() {
    let operation = Operation::Multisend(
        MultisendData::new()
            .add(SendData::new(CoinId::BASE, recipient(), Amount::from_base_units(1)))
            .add(SendData::new(CoinId::from(1), Address::from([0x01; 20]), Amount::from(2u64)))
            .add(SendData::new(CoinId::from(2), Address::from([0x02; 20]), Amount::from(3u64))),
    );
    let signed = TransactionBuilder::new(ChainId::MainNet)
        .nonce(10)
        .operation(operation.clone())
        .build()
        .unwrap()
        .sign(&test_key())
        .unwrap();

    let restored = SignedTransaction::decode(&signed.encode()).unwrap();
    assert_eq!(&operation, restored.transaction().operation());
}

#[test]
fn base_fee_lookup_matches_tag() {
    assert_eq!(
        OperationType::Send.base_fee(),
        Operation::Send(SendData::new(CoinId::BASE, Address::zero(), Amount::zero()))
            .operation_type()
            .base_fee()
    );
}

#[test]
fn signed_transaction_serializes_to_json() {
    let signed = send_transaction().sign(&test_key()).unwrap();
    let json = serde_json::to_string(&signed).unwrap();
    let back: SignedTransaction = serde_json::from_str(&json).unwrap();
    assert_eq!(signed, back);
}
