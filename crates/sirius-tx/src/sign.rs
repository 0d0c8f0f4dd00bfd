//! Hashing and signing.
//!
//! Both the hash and the signature bind a transaction to one network by
//! mixing in its generation hash:
//!
//! - hash = SHA3-256(signature R ‖ signer ‖ generation hash ‖ payload[100..])
//! - signature = Ed25519-SHA3 over (generation hash ‖ payload[100..])
//!
//! `payload[100..]` is everything after the signer: version, type, fee,
//! deadline and the body.

use crate::transaction::{Transaction, TransactionBody};
use crate::{decode_fixed, TxError};
use log::debug;
use serde::{Deserialize, Serialize};
use sirius_crypto::hash::sha3_256_parts;
use sirius_crypto::{verify, KeyPair};
use sirius_types::constants::{
    EntityType, HASH_SIZE, HEADER_SIZE, KEY_SIZE, SIGNATURE_OFFSET, SIGNATURE_SIZE, SIGNED_DATA_OFFSET, SIGNER_OFFSET,
};

/// Result of signing: the payload to announce and its hash, both upper-case hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    payload: String,
    hash: String,
    entity_type: EntityType,
}

impl SignedTransaction {
    pub fn new(payload: String, hash: String, entity_type: EntityType) -> Self {
        Self { payload, hash, entity_type }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }
}

/// Transaction hash of a signed payload, upper-case hex.
pub fn create_transaction_hash(payload: &[u8], generation_hash: &[u8; HASH_SIZE]) -> Result<String, TxError> {
    if payload.len() < SIGNED_DATA_OFFSET {
        return Err(TxError::Decode(format!("payload too short to hash: {} bytes", payload.len())));
    }
    let end = signed_data_end(payload)?;
    let hash = sha3_256_parts(&[
        &payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 32],
        &payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET],
        &generation_hash[..],
        &payload[SIGNED_DATA_OFFSET..end],
    ]);
    Ok(hex::encode_upper(hash))
}

/// End of the data covered by the hash and the signer's signature.
/// Cosignatures trailing an aggregate are not part of it.
fn signed_data_end(payload: &[u8]) -> Result<usize, TxError> {
    if payload.len() < HEADER_SIZE {
        return Ok(payload.len());
    }
    let entity = u16::from_le_bytes([payload[104], payload[105]]);
    let is_aggregate = EntityType::from_u16(entity).is_some_and(EntityType::is_aggregate);
    if !is_aggregate {
        return Ok(payload.len());
    }
    if payload.len() < HEADER_SIZE + 4 {
        return Err(TxError::Decode("aggregate payload too short".into()));
    }
    let inner = u32::from_le_bytes([
        payload[HEADER_SIZE],
        payload[HEADER_SIZE + 1],
        payload[HEADER_SIZE + 2],
        payload[HEADER_SIZE + 3],
    ]) as usize;
    let end = HEADER_SIZE + 4 + inner;
    if end > payload.len() {
        return Err(TxError::Decode("aggregate payload size exceeds payload".into()));
    }
    Ok(end)
}

/// Check the signature embedded in a signed payload against its signer field.
pub fn verify_transaction(payload: &[u8], generation_hash: &[u8; HASH_SIZE]) -> Result<(), TxError> {
    if payload.len() < HEADER_SIZE {
        return Err(TxError::Decode(format!("payload too short: {} bytes", payload.len())));
    }
    let signature: [u8; SIGNATURE_SIZE] = payload[SIGNATURE_OFFSET..SIGNER_OFFSET]
        .try_into()
        .map_err(|_| TxError::Decode("signature field".into()))?;
    let signer: [u8; KEY_SIZE] = payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET]
        .try_into()
        .map_err(|_| TxError::Decode("signer field".into()))?;
    let end = signed_data_end(payload)?;

    let mut message = Vec::with_capacity(HASH_SIZE + end - SIGNED_DATA_OFFSET);
    message.extend_from_slice(generation_hash);
    message.extend_from_slice(&payload[SIGNED_DATA_OFFSET..end]);
    Ok(verify(&signer, &message, &signature)?)
}

impl Transaction {
    /// Sign with `key_pair` for the network identified by `generation_hash`.
    pub fn sign_with(&self, key_pair: &KeyPair, generation_hash: &[u8; HASH_SIZE]) -> Result<SignedTransaction, TxError> {
        let mut payload = self.to_bytes()?;
        let end = signed_data_end(&payload)?;

        let mut message = Vec::with_capacity(HASH_SIZE + end - SIGNED_DATA_OFFSET);
        message.extend_from_slice(generation_hash);
        message.extend_from_slice(&payload[SIGNED_DATA_OFFSET..end]);
        let signature = key_pair.sign(&message);

        payload[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(&signature);
        payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET].copy_from_slice(key_pair.public_key());
        let hash = create_transaction_hash(&payload, generation_hash)?;

        debug!("signed {} by {} as {}", self.entity_type(), key_pair.public_key_hex(), hash);
        Ok(SignedTransaction::new(hex::encode_upper(&payload), hash, self.entity_type()))
    }

    /// Sign an aggregate with `initiator` and append a cosignature from each
    /// of `cosigners` over the resulting hash.
    pub fn sign_with_cosigners(
        &self,
        initiator: &KeyPair,
        cosigners: &[&KeyPair],
        generation_hash: &[u8; HASH_SIZE],
    ) -> Result<SignedTransaction, TxError> {
        if !matches!(self.body(), TransactionBody::Aggregate(_)) {
            return Err(TxError::Signing(format!("{} cannot carry cosignatures", self.entity_type())));
        }
        let signed = self.sign_with(initiator, generation_hash)?;
        let hash: [u8; HASH_SIZE] = decode_fixed("hash", signed.hash())?;
        let mut payload = hex::decode(signed.payload()).map_err(|e| TxError::Signing(e.to_string()))?;

        for cosigner in cosigners {
            payload.extend_from_slice(cosigner.public_key());
            payload.extend_from_slice(&cosigner.sign(&hash));
        }
        let size = payload.len() as u32;
        payload[..4].copy_from_slice(&size.to_le_bytes());

        debug!("added {} cosignatures to {}", cosigners.len(), signed.hash());
        Ok(SignedTransaction::new(hex::encode_upper(&payload), signed.hash().to_string(), signed.entity_type()))
    }
}

// ─── Cosigning ──────────────────────────────────────────────────────────────

/// A cosignature to add to an announced bonded aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    parent_hash: String,
    signature: String,
    signer: String,
}

impl CosignatureSignedTransaction {
    pub fn parent_hash(&self) -> &str {
        &self.parent_hash
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn signer(&self) -> &str {
        &self.signer
    }
}

/// An announced aggregate waiting for this party's cosignature.
#[derive(Debug, Clone)]
pub struct CosignatureTransaction {
    transaction: Transaction,
    hash: [u8; HASH_SIZE],
}

impl CosignatureTransaction {
    /// Fails unless `transaction` is an aggregate carrying confirmation info
    /// with a hash, i.e. it has already been announced.
    pub fn new(transaction: Transaction) -> Result<Self, TxError> {
        if !transaction.entity_type().is_aggregate() {
            return Err(TxError::Invalid(format!("cannot cosign {}", transaction.entity_type())));
        }
        let hash = transaction
            .info()
            .and_then(|info| info.hash())
            .ok_or_else(|| TxError::Invalid("transaction to cosign should be announced first".into()))?;
        let hash = decode_fixed("hash", hash)?;
        Ok(Self { transaction, hash })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn sign_with(&self, key_pair: &KeyPair) -> CosignatureSignedTransaction {
        let signature = key_pair.sign(&self.hash);
        CosignatureSignedTransaction {
            parent_hash: hex::encode_upper(self.hash),
            signature: hex::encode_upper(signature),
            signer: key_pair.public_key_hex(),
        }
    }
}
