//! The reduced interchange form used between untrusted producers and a
//! signer (deep links, QR payloads).
//!
//! The tuple carries no chain id and no signature: the signer supplies
//! those. A redeem-check operation may travel without its proof here; the
//! proof becomes mandatory once the tuple is promoted to a real
//! transaction.

use crate::error::{CoreError, CoreResult};
use crate::operation::{Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};
use crate::wire;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use minter_primitives::{ChainId, CoinId};
use minter_rlp::Rlp;
use serde::{Deserialize, Serialize};

/// Number of elements in the interchange tuple.
const EXTERNAL_FIELDS: usize = 6;

/// A chain-free, signature-free transaction template.
///
/// Wire order: `[type, data, payload, nonce_or_empty, gas_price,
/// gas_coin_or_empty]`. Empty stands for "let the signer decide".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTransaction {
    /// The operation payload.
    pub operation: Operation,
    /// Free-form payload bytes.
    pub payload: Vec<u8>,
    /// Pre-filled nonce, if the producer knows it.
    pub nonce: Option<u64>,
    /// Gas price multiplier (1 when the producer does not care).
    pub gas_price: u32,
    /// Pre-filled fee coin, if the producer insists on one.
    pub gas_coin: Option<CoinId>,
}

impl ExternalTransaction {
    /// Creates a template around an operation with default gas settings.
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            payload: Vec::new(),
            nonce: None,
            gas_price: 1,
            gas_coin: None,
        }
    }

    /// Sets the free-form payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Pre-fills the nonce.
    #[must_use]
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the gas price multiplier.
    #[must_use]
    pub fn gas_price(mut self, gas_price: u32) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Pre-fills the fee coin.
    #[must_use]
    pub fn gas_coin(mut self, gas_coin: CoinId) -> Self {
        self.gas_coin = Some(gas_coin);
        self
    }

    /// Encodes the interchange tuple.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        Rlp::list(vec![
            Rlp::from_u64(u64::from(self.operation.operation_type().code())),
            Rlp::bytes(self.operation.encode_data()),
            Rlp::bytes(self.payload.clone()),
            match self.nonce {
                Some(nonce) => Rlp::from_u64(nonce),
                None => Rlp::empty(),
            },
            Rlp::from_u64(u64::from(self.gas_price)),
            match self.gas_coin {
                Some(coin) => Rlp::from_u64(u64::from(coin.value())),
                None => Rlp::empty(),
            },
        ])
        .encode()
    }

    /// Decodes an interchange tuple.
    ///
    /// A redeem-check operation is accepted without its proof at this
    /// stage; every other shape rule applies in full.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode(data: &[u8]) -> CoreResult<Self> {
        let rlp = Rlp::decode(data)?;
        let items = rlp
            .as_list()
            .map_err(|_| CoreError::decode("external transaction: expected a list"))?;
        if items.len() != EXTERNAL_FIELDS {
            return Err(CoreError::decode(format!(
                "external transaction: expected {EXTERNAL_FIELDS} elements, got {}",
                items.len()
            )));
        }

        let tag = OperationType::from_code(wire::u8_field(&items[0], "type")?)?;
        let operation = Operation::decode_data(tag, &wire::bytes_field(&items[1], "data")?)?;
        let payload = wire::bytes_field(&items[2], "payload")?;
        let nonce = match items[3].as_bytes() {
            Ok([]) => None,
            _ => Some(wire::u64_field(&items[3], "nonce")?),
        };
        let gas_price = wire::u32_field(&items[4], "gas_price")?;
        let gas_coin = match items[5].as_bytes() {
            Ok([]) => None,
            _ => Some(wire::coin_field(&items[5], "gas_coin")?),
        };

        Ok(Self {
            operation,
            payload,
            nonce,
            gas_price,
            gas_coin,
        })
    }

    /// Encodes for URL embedding: base64 with the URL-safe alphabet and no
    /// padding.
    #[must_use]
    pub fn to_base64url(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.encode())
    }

    /// Decodes the URL-embedded form.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn from_base64url(s: &str) -> CoreResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|e| CoreError::decode(format!("external transaction base64: {e}")))?;
        Self::decode(&bytes)
    }

    /// Promotes the template into a full unsigned transaction.
    ///
    /// An embedded nonce wins over `fallback_nonce`; the fallback is used
    /// only when the producer left the field empty. Validation runs in
    /// full here - a proof-less redeem check fails the build.
    ///
    /// # Errors
    ///
    /// As [`TransactionBuilder::build`].
    pub fn into_transaction(
        self,
        fallback_nonce: u64,
        chain_id: ChainId,
    ) -> CoreResult<Transaction> {
        TransactionBuilder::new(chain_id)
            .nonce(self.nonce.unwrap_or(fallback_nonce))
            .gas_price(self.gas_price)
            .gas_coin(self.gas_coin.unwrap_or(CoinId::BASE))
            .operation(self.operation)
            .payload(self.payload)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{RedeemCheckData, SendData};
    use minter_primitives::{Address, Amount};

    fn send_template() -> ExternalTransaction {
        ExternalTransaction::new(Operation::Send(SendData::new(
            CoinId::BASE,
            Address::zero(),
            Amount::from_base_units(1),
        )))
    }

    #[test]
    fn tuple_round_trip() {
        let template = send_template().nonce(128).gas_coin(CoinId::from(3));
        assert_eq!(
            template,
            ExternalTransaction::decode(&template.encode()).unwrap()
        );
    }

    #[test]
    fn empty_fields_decode_as_none() {
        let template = send_template();
        let back = ExternalTransaction::decode(&template.encode()).unwrap();
        assert_eq!(None, back.nonce);
        assert_eq!(None, back.gas_coin);
        assert_eq!(1, back.gas_price);
    }

    #[test]
    fn base64url_round_trip_is_unpadded() {
        let encoded = send_template().to_base64url();
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
        assert_eq!(
            send_template(),
            ExternalTransaction::from_base64url(&encoded).unwrap()
        );
    }

    #[test]
    fn embedded_nonce_wins_over_fallback() {
        let tx = send_template()
            .nonce(42)
            .into_transaction(7, ChainId::MainNet)
            .unwrap();
        assert_eq!(42, tx.nonce());

        let tx = send_template()
            .into_transaction(7, ChainId::MainNet)
            .unwrap();
        assert_eq!(7, tx.nonce());
    }

    #[test]
    fn proofless_redeem_check_travels_but_does_not_build() {
        let template = ExternalTransaction::new(Operation::RedeemCheck(
            RedeemCheckData::without_proof(vec![0xcd; 90]),
        ));
        // The interchange form round-trips without the proof.
        let back = ExternalTransaction::decode(&template.encode()).unwrap();
        assert_eq!(template, back);

        // Promotion enforces the proof.
        let result = back.into_transaction(1, ChainId::MainNet);
        assert!(matches!(
            result,
            Err(CoreError::InvalidOperationData { .. })
        ));
    }
}
