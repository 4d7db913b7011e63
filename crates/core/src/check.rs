//! The bearer-check sub-protocol.
//!
//! A check is a transferable instrument: the issuer locks it to a
//! passphrase and signs it; anyone holding the passphrase can later bind a
//! redemption to their own address with a proof, without chain access.
//!
//! Two signatures layer on top of each other:
//!
//! 1. the **lock** - a recoverable signature over the pre-lock tuple hash,
//!    made with the key `sha256(passphrase)`
//! 2. the **issuer signature** - a recoverable signature over the tuple
//!    *including* the lock, made with the issuer's private key

use crate::error::{CoreError, CoreResult};
use crate::operation::RedeemCheckData;
use crate::signature::SingleSignature;
use crate::wire;
use minter_cryptography::{keccak256, sign_recoverable, PrivateKey, Signature};
use minter_primitives::{
    Address, Amount, ChainId, CoinId, CHECK_PREFIX, MAX_CHECK_NONCE_SIZE, PROOF_SIZE,
};
use minter_rlp::Rlp;
use num_bigint::BigUint;
use std::fmt;

/// Number of elements in the check wire tuple.
const CHECK_FIELDS: usize = 10;

/// A signed bearer check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    nonce: Vec<u8>,
    chain_id: ChainId,
    due_block: u64,
    coin: CoinId,
    value: Amount,
    gas_coin: CoinId,
    lock: [u8; PROOF_SIZE],
    signature: SingleSignature,
}

impl Check {
    /// Returns the opaque check nonce (not necessarily numeric).
    #[must_use]
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Returns the bound network.
    #[must_use]
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the height the check expires at.
    #[must_use]
    pub fn due_block(&self) -> u64 {
        self.due_block
    }

    /// Returns the coin the check pays in.
    #[must_use]
    pub fn coin(&self) -> CoinId {
        self.coin
    }

    /// Returns the check value in pips.
    #[must_use]
    pub fn value(&self) -> &Amount {
        &self.value
    }

    /// Returns the coin the redemption fee is paid in.
    #[must_use]
    pub fn gas_coin(&self) -> CoinId {
        self.gas_coin
    }

    /// Returns the passphrase lock (`r || s || v`).
    #[must_use]
    pub fn lock(&self) -> &[u8; PROOF_SIZE] {
        &self.lock
    }

    /// The tuple every signature commits to, without and with the lock.
    fn base_fields(
        nonce: &[u8],
        chain_id: ChainId,
        due_block: u64,
        coin: CoinId,
        value: &Amount,
        gas_coin: CoinId,
    ) -> Vec<Rlp> {
        vec![
            Rlp::bytes(nonce.to_vec()),
            Rlp::from_u64(u64::from(chain_id.code())),
            Rlp::from_u64(due_block),
            Rlp::from_u64(u64::from(coin.value())),
            Rlp::from_uint(value.as_pips()),
            Rlp::from_u64(u64::from(gas_coin.value())),
        ]
    }

    /// Hash of the pre-lock form; the passphrase key signs this.
    fn pre_lock_hash(
        nonce: &[u8],
        chain_id: ChainId,
        due_block: u64,
        coin: CoinId,
        value: &Amount,
        gas_coin: CoinId,
    ) -> [u8; 32] {
        let tuple = Rlp::list(Self::base_fields(
            nonce, chain_id, due_block, coin, value, gas_coin,
        ));
        keccak256(&tuple.encode())
    }

    /// Hash of the post-lock form; the issuer key signs this.
    fn signing_hash(&self) -> [u8; 32] {
        let mut fields = Self::base_fields(
            &self.nonce,
            self.chain_id,
            self.due_block,
            self.coin,
            &self.value,
            self.gas_coin,
        );
        fields.push(lock_rlp(&self.lock));
        keccak256(&Rlp::list(fields).encode())
    }

    /// Encodes the check wire bytes.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut fields = Self::base_fields(
            &self.nonce,
            self.chain_id,
            self.due_block,
            self.coin,
            &self.value,
            self.gas_coin,
        );
        fields.push(lock_rlp(&self.lock));
        let signature = self.signature.to_rlp();
        match signature {
            Rlp::List(vrs) => fields.extend(vrs),
            Rlp::Bytes(_) => unreachable!("signature form is always a list"),
        }
        Rlp::list(fields).encode()
    }

    /// Hex-encodes with the check display prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{}{}", CHECK_PREFIX, hex::encode(self.encode()))
    }

    /// Decodes check wire bytes.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn decode(data: &[u8]) -> CoreResult<Self> {
        let rlp = Rlp::decode(data)?;
        let items = rlp
            .as_list()
            .map_err(|_| CoreError::decode("check: expected a list"))?;
        if items.len() != CHECK_FIELDS {
            return Err(CoreError::decode(format!(
                "check: expected {CHECK_FIELDS} elements, got {}",
                items.len()
            )));
        }

        let nonce = wire::bytes_field(&items[0], "nonce")?;
        if nonce.len() > MAX_CHECK_NONCE_SIZE {
            return Err(CoreError::decode(format!(
                "nonce: at most {MAX_CHECK_NONCE_SIZE} bytes, got {}",
                nonce.len()
            )));
        }
        let signature = SingleSignature::from_rlp(&Rlp::list(vec![
            items[7].clone(),
            items[8].clone(),
            items[9].clone(),
        ]))?;

        Ok(Self {
            nonce,
            chain_id: ChainId::from_code(wire::u8_field(&items[1], "chain_id")?)?,
            due_block: wire::u64_field(&items[2], "due_block")?,
            coin: wire::coin_field(&items[3], "coin")?,
            value: wire::amount_field(&items[4], "value")?,
            gas_coin: wire::coin_field(&items[5], "gas_coin")?,
            lock: lock_field(&items[6])?,
            signature,
        })
    }

    /// Decodes the display form, with or without the `Mc` prefix.
    ///
    /// # Errors
    ///
    /// Any decode variant of [`CoreError`].
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let stripped = s
            .strip_prefix(CHECK_PREFIX)
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| CoreError::decode(format!("check hex: {e}")))?;
        Self::decode(&bytes)
    }

    /// Recovers the issuer address from the outer signature.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if recovery fails.
    pub fn issuer(&self) -> CoreResult<Address> {
        self.signature.recover(&self.signing_hash())
    }

    /// Verifies a candidate passphrase against the embedded lock without
    /// chain access.
    ///
    /// Recomputes the lock a holder of `passphrase` would produce over the
    /// pre-lock bytes and compares byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Crypto` if the passphrase digests to an invalid
    /// key.
    pub fn verify_passphrase(&self, passphrase: &str) -> CoreResult<bool> {
        let key = PrivateKey::from_passphrase(passphrase)?;
        let hash = Self::pre_lock_hash(
            &self.nonce,
            self.chain_id,
            self.due_block,
            self.coin,
            &self.value,
            self.gas_coin,
        );
        let expected = sign_recoverable(&hash, &key)?;
        Ok(expected.to_bytes() == self.lock)
    }

    /// Builds the redemption operation binding this check to a proof.
    #[must_use]
    pub fn redeem_with(&self, proof: [u8; PROOF_SIZE]) -> RedeemCheckData {
        RedeemCheckData::new(self.encode(), proof)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The lock travels as an unsigned integer, so leading zero bytes of `r`
/// are stripped on the wire and restored on decode.
fn lock_rlp(lock: &[u8; PROOF_SIZE]) -> Rlp {
    Rlp::from_uint(&BigUint::from_bytes_be(lock))
}

fn lock_field(item: &Rlp) -> CoreResult<[u8; PROOF_SIZE]> {
    let digits = item
        .as_uint()
        .map_err(|e| CoreError::decode(format!("lock: {e}")))?
        .to_bytes_be();
    let digits = if digits == [0] { Vec::new() } else { digits };
    if digits.len() > PROOF_SIZE {
        return Err(CoreError::decode(format!(
            "lock: wider than {PROOF_SIZE} bytes"
        )));
    }
    let mut lock = [0u8; PROOF_SIZE];
    lock[PROOF_SIZE - digits.len()..].copy_from_slice(&digits);
    Ok(lock)
}

/// Builds and signs checks.
#[derive(Clone, Debug)]
pub struct CheckBuilder {
    chain_id: ChainId,
    nonce: Vec<u8>,
    due_block: u64,
    coin: CoinId,
    value: Option<Amount>,
    gas_coin: CoinId,
}

impl CheckBuilder {
    /// Starts a check on the given network with the given opaque nonce.
    #[must_use]
    pub fn new(chain_id: ChainId, nonce: impl Into<Vec<u8>>) -> Self {
        Self {
            chain_id,
            nonce: nonce.into(),
            due_block: u64::MAX,
            coin: CoinId::BASE,
            value: None,
            gas_coin: CoinId::BASE,
        }
    }

    /// Sets the expiry height (default: never).
    #[must_use]
    pub fn due_block(mut self, due_block: u64) -> Self {
        self.due_block = due_block;
        self
    }

    /// Sets the coin the check pays in (default: the base coin).
    #[must_use]
    pub fn coin(mut self, coin: CoinId) -> Self {
        self.coin = coin;
        self
    }

    /// Sets the check value (required).
    #[must_use]
    pub fn value(mut self, value: Amount) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the redemption fee coin (default: the base coin).
    #[must_use]
    pub fn gas_coin(mut self, gas_coin: CoinId) -> Self {
        self.gas_coin = gas_coin;
        self
    }

    /// Locks the check to `passphrase` and signs it with the issuer key.
    ///
    /// # Errors
    ///
    /// - `CoreError::MissingField` without a value
    /// - `CoreError::Decode` for an over-long nonce
    /// - `CoreError::Crypto` if signing fails
    pub fn sign(self, passphrase: &str, issuer: &PrivateKey) -> CoreResult<Check> {
        let value = self.value.ok_or(CoreError::MissingField("value"))?;
        if self.nonce.len() > MAX_CHECK_NONCE_SIZE {
            return Err(CoreError::decode(format!(
                "nonce: at most {MAX_CHECK_NONCE_SIZE} bytes, got {}",
                self.nonce.len()
            )));
        }

        let lock_key = PrivateKey::from_passphrase(passphrase)?;
        let pre_lock_hash = Check::pre_lock_hash(
            &self.nonce,
            self.chain_id,
            self.due_block,
            self.coin,
            &value,
            self.gas_coin,
        );
        let lock = sign_recoverable(&pre_lock_hash, &lock_key)?.to_bytes();

        let mut check = Check {
            nonce: self.nonce,
            chain_id: self.chain_id,
            due_block: self.due_block,
            coin: self.coin,
            value,
            gas_coin: self.gas_coin,
            lock,
            // Placeholder until the issuer signature is computed below.
            signature: SingleSignature {
                v: 0,
                r: [0; 32],
                s: [0; 32],
            },
        };
        let signature = sign_recoverable(&check.signing_hash(), issuer)?;
        check.signature = SingleSignature::from(signature);
        Ok(check)
    }
}

/// Produces the proof binding a redemption to `redeemer`: a recoverable
/// signature over `keccak256(rlp([address]))` with the passphrase key.
///
/// # Errors
///
/// Returns `CoreError::Crypto` if the passphrase digests to an invalid key.
pub fn redeem_proof(redeemer: &Address, passphrase: &str) -> CoreResult<[u8; PROOF_SIZE]> {
    let key = PrivateKey::from_passphrase(passphrase)?;
    let tuple = Rlp::list(vec![Rlp::bytes(redeemer.to_array().to_vec())]);
    let hash = keccak256(&tuple.encode());
    Ok(sign_recoverable(&hash, &key)?.to_bytes())
}

/// Verifies that `proof` binds a redemption of a check locked to
/// `passphrase` to `redeemer`.
///
/// # Errors
///
/// Returns `CoreError::Crypto` if the proof bytes are malformed.
pub fn verify_redeem_proof(
    redeemer: &Address,
    passphrase: &str,
    proof: &[u8; PROOF_SIZE],
) -> CoreResult<bool> {
    let expected = redeem_proof(redeemer, passphrase)?;
    // Deterministic signing makes byte comparison sufficient, but recovery
    // keeps the verdict meaningful for proofs from other signers.
    if expected == *proof {
        return Ok(true);
    }
    let key = PrivateKey::from_passphrase(passphrase)?;
    let tuple = Rlp::list(vec![Rlp::bytes(redeemer.to_array().to_vec())]);
    let hash = keccak256(&tuple.encode());
    let signature = Signature::from_bytes(proof)?;
    match minter_cryptography::recover_public_key(&hash, &signature) {
        Ok(recovered) => Ok(recovered == key.public_key()),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> PrivateKey {
        PrivateKey::from_hex("07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142")
            .unwrap()
    }

    fn sample_check() -> Check {
        CheckBuilder::new(ChainId::TestNet, b"128".to_vec())
            .due_block(999_999)
            .coin(CoinId::BASE)
            .value(Amount::from_base_units(10))
            .sign("pass phrase", &issuer())
            .unwrap()
    }

    #[test]
    fn check_round_trip() {
        let check = sample_check();
        assert_eq!(check, Check::decode(&check.encode()).unwrap());
        assert_eq!(check, Check::from_hex(&check.to_hex()).unwrap());
        assert!(check.to_hex().starts_with(CHECK_PREFIX));
    }

    #[test]
    fn passphrase_verification_distinguishes() {
        let check = sample_check();
        assert!(check.verify_passphrase("pass phrase").unwrap());
        assert!(!check.verify_passphrase("wrong phrase").unwrap());
    }

    #[test]
    fn issuer_is_recoverable() {
        assert_eq!(issuer().address(), sample_check().issuer().unwrap());
    }

    #[test]
    fn proof_binds_the_redeemer() {
        let redeemer = Address::from([0x11; 20]);
        let other = Address::from([0x22; 20]);
        let proof = redeem_proof(&redeemer, "pass phrase").unwrap();

        assert!(verify_redeem_proof(&redeemer, "pass phrase", &proof).unwrap());
        assert!(!verify_redeem_proof(&other, "pass phrase", &proof).unwrap());
        assert!(!verify_redeem_proof(&redeemer, "wrong phrase", &proof).unwrap());
    }

    #[test]
    fn builder_requires_a_value() {
        let result = CheckBuilder::new(ChainId::MainNet, b"1".to_vec())
            .sign("p", &issuer());
        assert!(matches!(result, Err(CoreError::MissingField("value"))));
    }

    #[test]
    fn oversized_nonce_is_rejected() {
        let result = CheckBuilder::new(ChainId::MainNet, vec![0xaa; 17])
            .value(Amount::from_base_units(1))
            .sign("p", &issuer());
        assert!(result.is_err());
    }

    #[test]
    fn redeem_operation_embeds_the_check() {
        let check = sample_check();
        let proof = redeem_proof(&Address::from([0x11; 20]), "pass phrase").unwrap();
        let data = check.redeem_with(proof);
        assert_eq!(check.encode(), data.raw_check);
        assert_eq!(PROOF_SIZE, data.proof.len());
    }
}
