//! The transaction envelope: canonical encoding, signing and decoding.
//!
//! A transaction moves through three states: the [`TransactionBuilder`]
//! accumulates fields, [`Transaction`] is the complete unsigned value, and
//! [`SignedTransaction`] is frozen - signing consumes the unsigned value,
//! so nothing can be mutated after the hash input is fixed.

use crate::error::{CoreError, CoreResult};
use crate::operation::{Operation, OperationType};
use crate::signature::{MultiSignature, SignatureData, SignatureType, SingleSignature};
use minter_cryptography::{keccak256, sha256, sign_recoverable, PrivateKey};
use minter_primitives::{
    Address, ChainId, CoinId, MAX_PAYLOAD_SIZE, TX_HASH_PREFIX,
};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of elements in the signed wire tuple.
const SIGNED_FIELDS: usize = 10;

/// A complete, unsigned transaction.
///
/// All fields are fixed at build time; signing consumes the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    nonce: u64,
    chain_id: ChainId,
    gas_price: u32,
    gas_coin: CoinId,
    operation: Operation,
    payload: Vec<u8>,
    service_data: Vec<u8>,
}

impl Transaction {
    /// Returns the account nonce.
    #[must_use]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns the bound network.
    #[must_use]
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the gas price multiplier.
    #[must_use]
    pub fn gas_price(&self) -> u32 {
        self.gas_price
    }

    /// Returns the coin the fee is paid in.
    #[must_use]
    pub fn gas_coin(&self) -> CoinId {
        self.gas_coin
    }

    /// Returns the operation payload.
    #[must_use]
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Returns the free-form payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the reserved service-data field (empty on every current
    /// network).
    #[must_use]
    pub fn service_data(&self) -> &[u8] {
        &self.service_data
    }

    /// Builds the canonical unsigned tuple for the given signature shape.
    ///
    /// Wire order: `[nonce, chain_id, gas_price, gas_coin, type, data,
    /// payload, service_data, signature_type]` - no signature element.
    fn unsigned_rlp(&self, signature_type: SignatureType) -> Rlp {
        Rlp::list(vec![
            Rlp::from_u64(self.nonce),
            Rlp::from_u64(u64::from(self.chain_id.code())),
            Rlp::from_u64(u64::from(self.gas_price)),
            Rlp::from_u64(u64::from(self.gas_coin.value())),
            Rlp::from_u64(u64::from(self.operation.operation_type().code())),
            Rlp::bytes(self.operation.encode_data()),
            Rlp::bytes(self.payload.clone()),
            Rlp::bytes(self.service_data.clone()),
            Rlp::from_u64(u64::from(signature_type.code())),
        ])
    }

    /// Encodes the canonical unsigned bytes for the given signature shape.
    #[must_use]
    pub fn unsigned_bytes(&self, signature_type: SignatureType) -> Vec<u8> {
        self.unsigned_rlp(signature_type).encode()
    }

    /// Computes the hash every signer commits to.
    #[must_use]
    pub fn signing_hash(&self, signature_type: SignatureType) -> [u8; 32] {
        keccak256(&self.unsigned_bytes(signature_type))
    }

    /// Signs with a single key, producing the frozen signed transaction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if signing fails.
    pub fn sign(self, key: &PrivateKey) -> CoreResult<SignedTransaction> {
        let hash = self.signing_hash(SignatureType::Single);
        let signature = sign_recoverable(&hash, key)?;
        Ok(SignedTransaction {
            transaction: self,
            signature: SignatureData::Single(SingleSignature::from(signature)),
        })
    }

    /// Produces one co-signer triple over the multisig-shaped unsigned
    /// bytes. Every co-signer calls this against the same transaction; the
    /// coordinator assembles the envelope with [`Transaction::sign_multi`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if signing fails.
    pub fn signature_for(&self, key: &PrivateKey) -> CoreResult<SingleSignature> {
        let hash = self.signing_hash(SignatureType::Multi);
        Ok(SingleSignature::from(sign_recoverable(&hash, key)?))
    }

    /// Assembles the multisig envelope from collected co-signer triples.
    ///
    /// Signature order is preserved exactly as given; no canonical sort is
    /// imposed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` when no signatures were collected.
    pub fn sign_multi(
        self,
        address: Address,
        signatures: Vec<SingleSignature>,
    ) -> CoreResult<SignedTransaction> {
        if signatures.is_empty() {
            return Err(CoreError::MissingField("signatures"));
        }
        Ok(SignedTransaction {
            transaction: self,
            signature: SignatureData::Multi(MultiSignature::new(address, signatures)),
        })
    }
}

/// Accumulates envelope fields; `build` checks preconditions and operation
/// validity in one place.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    chain_id: ChainId,
    nonce: Option<u64>,
    gas_price: u32,
    gas_coin: CoinId,
    operation: Option<Operation>,
    payload: Vec<u8>,
}

impl TransactionBuilder {
    /// Starts a builder for the given network with default gas settings
    /// (price 1, base coin).
    #[must_use]
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            nonce: None,
            gas_price: 1,
            gas_coin: CoinId::BASE,
            operation: None,
            payload: Vec::new(),
        }
    }

    /// Sets the account nonce (required).
    #[must_use]
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the gas price multiplier (default 1).
    #[must_use]
    pub fn gas_price(mut self, gas_price: u32) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Sets the fee coin (default: the base coin).
    #[must_use]
    pub fn gas_coin(mut self, gas_coin: CoinId) -> Self {
        self.gas_coin = gas_coin;
        self
    }

    /// Sets the operation payload (required).
    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the free-form payload, at most 10,000 bytes.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Finalizes the unsigned transaction.
    ///
    /// # Errors
    ///
    /// - `CoreError::MissingField` if nonce or operation is absent
    /// - `CoreError::PayloadTooLarge` past the 10,000 byte limit
    /// - `CoreError::InvalidOperationData` with every collected field
    ///   problem if the operation fails validation
    pub fn build(self) -> CoreResult<Transaction> {
        let nonce = self.nonce.ok_or(CoreError::MissingField("nonce"))?;
        let operation = self.operation.ok_or(CoreError::MissingField("operation"))?;
        if self.payload.len() > MAX_PAYLOAD_SIZE {
            return Err(CoreError::PayloadTooLarge {
                actual: self.payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        let problems = operation.validate();
        if !problems.is_empty() {
            return Err(CoreError::InvalidOperationData { fields: problems });
        }
        Ok(Transaction {
            nonce,
            chain_id: self.chain_id,
            gas_price: self.gas_price,
            gas_coin: self.gas_coin,
            operation,
            payload: self.payload,
            service_data: Vec::new(),
        })
    }
}

/// A signed, frozen transaction ready for the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: SignatureData,
}

impl SignedTransaction {
    /// Returns the envelope fields.
    #[must_use]
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Returns the signature shape.
    #[must_use]
    pub fn signature_type(&self) -> SignatureType {
        self.signature.signature_type()
    }

    /// Returns the signature element.
    #[must_use]
    pub fn signature_data(&self) -> &SignatureData {
        &self.signature
    }

    /// Encodes the final wire bytes: the unsigned tuple plus the encoded
    /// signature as the tenth element.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut fields = match self.transaction.unsigned_rlp(self.signature_type()) {
            Rlp::List(fields) => fields,
            Rlp::Bytes(_) => unreachable!("unsigned form is always a list"),
        };
        fields.push(Rlp::bytes(self.signature.encode()));
        Rlp::list(fields).encode()
    }

    /// Hex-encodes the wire bytes for transport.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Computes the display hash of this transaction.
    #[must_use]
    pub fn hash(&self) -> TxHash {
        TxHash(sha256(&self.encode()))
    }

    /// Decodes wire bytes into a signed transaction.
    ///
    /// The outer list must carry exactly ten elements; unknown operation
    /// tags, chain ids or signature types fail closed.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode(data: &[u8]) -> CoreResult<Self> {
        let rlp = Rlp::decode(data).map_err(|e| {
            tracing::debug!(error = %e, len = data.len(), "rejecting malformed transaction bytes");
            CoreError::from(e)
        })?;
        let items = rlp
            .as_list()
            .map_err(|_| CoreError::decode("transaction: expected a list"))?;
        if items.len() != SIGNED_FIELDS {
            return Err(CoreError::decode(format!(
                "transaction: expected {SIGNED_FIELDS} elements, got {}",
                items.len()
            )));
        }

        let nonce = crate::wire::u64_field(&items[0], "nonce")?;
        let chain_id = ChainId::from_code(crate::wire::u8_field(&items[1], "chain_id")?)?;
        let gas_price = crate::wire::u32_field(&items[2], "gas_price")?;
        let gas_coin = crate::wire::coin_field(&items[3], "gas_coin")?;
        let tag = OperationType::from_code(crate::wire::u8_field(&items[4], "type")?)?;
        let operation = Operation::decode_data(
            tag,
            &crate::wire::bytes_field(&items[5], "data")?,
        )?;
        // The proof-less redeem form exists only for the unsigned
        // interchange tuple; on the signed wire the proof is mandatory.
        if let Operation::RedeemCheck(data) = &operation {
            if data.proof.is_empty() {
                return Err(CoreError::decode(
                    "proof: required in a signed transaction",
                ));
            }
        }
        let payload = crate::wire::bytes_field(&items[6], "payload")?;
        let service_data = crate::wire::bytes_field(&items[7], "service_data")?;
        let signature_type =
            SignatureType::from_code(crate::wire::u8_field(&items[8], "signature_type")?)?;
        let signature = SignatureData::decode(
            signature_type,
            &crate::wire::bytes_field(&items[9], "signature_data")?,
        )?;

        Ok(Self {
            transaction: Transaction {
                nonce,
                chain_id,
                gas_price,
                gas_coin,
                operation,
                payload,
                service_data,
            },
            signature,
        })
    }

    /// Decodes a hex transport string, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| CoreError::decode(format!("transaction hex: {e}")))?;
        Self::decode(&bytes)
    }

    /// Returns the transaction sender.
    ///
    /// For a single signature the sender is recovered from the signature
    /// over the unsigned bytes; for a multisig envelope it is the embedded
    /// account address.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if recovery fails.
    pub fn sender(&self) -> CoreResult<Address> {
        match &self.signature {
            SignatureData::Single(signature) => {
                let hash = self.transaction.signing_hash(SignatureType::Single);
                signature.recover(&hash)
            }
            SignatureData::Multi(signature) => Ok(signature.address),
        }
    }
}

/// A transaction display hash (`Mt` + 64 hex characters).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Returns the raw hash bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TX_HASH_PREFIX, hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::SendData;
    use minter_primitives::Amount;

    fn send_tx() -> Transaction {
        TransactionBuilder::new(ChainId::MainNet)
            .nonce(1)
            .operation(Operation::Send(SendData::new(
                CoinId::BASE,
                "Mx31e61a05adbd13c6b625262704bc305bf7725026".parse().unwrap(),
                Amount::from_decimal("0.012345").unwrap(),
            )))
            .build()
            .unwrap()
    }

    #[test]
    fn unsigned_bytes_match_hand_computed_encoding() {
        // nonce 1, mainnet, gas price 1, base gas coin, send of 0.012345
        // to Mx31e6..., empty payload and service data, single signature.
        let expected = concat!(
            "e8",                                       // 40-byte list
            "01", "01", "01", "80",                     // nonce, chain, gas price, gas coin
            "01",                                       // type: send
            "9f",                                       // 31-byte data string
            "de",                                       // 30-byte field list
            "80",                                       // coin 0
            "9431e61a05adbd13c6b625262704bc305bf7725026", // recipient
            "872bdbb64bc09000",                         // 12345000000000000 pips
            "80", "80",                                 // payload, service data
            "01"                                        // signature type: single
        );
        assert_eq!(
            expected,
            hex::encode(send_tx().unsigned_bytes(SignatureType::Single))
        );
    }

    #[test]
    fn builder_requires_nonce_and_operation() {
        let missing_nonce = TransactionBuilder::new(ChainId::MainNet)
            .operation(Operation::Send(SendData::new(
                CoinId::BASE,
                Address::zero(),
                Amount::zero(),
            )))
            .build();
        assert_eq!(Err(CoreError::MissingField("nonce")), missing_nonce);

        let missing_operation = TransactionBuilder::new(ChainId::MainNet).nonce(1).build();
        assert_eq!(
            Err(CoreError::MissingField("operation")),
            missing_operation
        );
    }

    #[test]
    fn payload_boundary_is_enforced_at_build() {
        let base = |payload: Vec<u8>| {
            TransactionBuilder::new(ChainId::MainNet)
                .nonce(1)
                .operation(Operation::Send(SendData::new(
                    CoinId::BASE,
                    Address::zero(),
                    Amount::zero(),
                )))
                .payload(payload)
                .build()
        };
        assert!(base(vec![0x55; MAX_PAYLOAD_SIZE]).is_ok());
        assert_eq!(
            Err(CoreError::PayloadTooLarge {
                actual: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE
            }),
            base(vec![0x55; MAX_PAYLOAD_SIZE + 1])
        );
    }

    #[test]
    fn invalid_operation_aborts_build_with_all_problems() {
        let result = TransactionBuilder::new(ChainId::MainNet)
            .nonce(1)
            .operation(Operation::Multisend(crate::operation::MultisendData::new()))
            .build();
        match result {
            Err(CoreError::InvalidOperationData { fields }) => {
                assert_eq!(1, fields.len());
                assert_eq!("items", fields[0].field);
            }
            other => panic!("expected invalid operation data, got {other:?}"),
        }
    }

    #[test]
    fn signature_type_changes_the_hash_input() {
        let tx = send_tx();
        assert_ne!(
            tx.signing_hash(SignatureType::Single),
            tx.signing_hash(SignatureType::Multi)
        );
    }
}
