//! Hash locks and secret locks.

use crate::schema::Schema;
use crate::sign::SignedTransaction;
use crate::transaction::transfer::Recipient;
use crate::{decode_fixed, TxError};
use sirius_crypto::hash;
use sirius_types::constants::{EntityType, ADDRESS_SIZE, HASH_SIZE};
use sirius_types::{Address, Mosaic};

// ─── Hash Type ──────────────────────────────────────────────────────────────

/// Digest a secret lock is unlocked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashType {
    Sha3_256,
    Keccak256,
    Hash160,
    Hash256,
}

/// Hex characters in a valid secret, whatever the hash type.
pub const SECRET_HEX_LENGTH: usize = 64;

impl HashType {
    pub fn value(self) -> u8 {
        match self {
            HashType::Sha3_256 => 0,
            HashType::Keccak256 => 1,
            HashType::Hash160 => 2,
            HashType::Hash256 => 3,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(HashType::Sha3_256),
            1 => Some(HashType::Keccak256),
            2 => Some(HashType::Hash160),
            3 => Some(HashType::Hash256),
            _ => None,
        }
    }

    /// Digest of `proof` under this hash type.
    pub fn hash_value(self, proof: &[u8]) -> Vec<u8> {
        match self {
            HashType::Sha3_256 => hash::sha3_256(proof).to_vec(),
            HashType::Keccak256 => hash::keccak256(proof).to_vec(),
            HashType::Hash160 => hash::hash160(proof).to_vec(),
            HashType::Hash256 => hash::hash256(proof).to_vec(),
        }
    }

    /// 32-byte secret for `proof`; shorter digests are zero-filled on the right.
    pub fn secret_for(self, proof: &[u8]) -> [u8; HASH_SIZE] {
        let digest = self.hash_value(proof);
        let mut secret = [0u8; HASH_SIZE];
        secret[..digest.len()].copy_from_slice(&digest);
        secret
    }

    /// Whether `secret` is 64 hex characters. Every hash type shares the
    /// 32-byte secret field, so the rule does not depend on `self`.
    pub fn validate(self, secret: &str) -> bool {
        secret.len() == SECRET_HEX_LENGTH && secret.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

fn parse_secret(hash_type: HashType, secret: &str) -> Result<[u8; HASH_SIZE], TxError> {
    if !hash_type.validate(secret) {
        return Err(TxError::Invalid(format!("secret is not valid for {hash_type:?}")));
    }
    decode_fixed("secret", secret).map_err(|e| TxError::Invalid(e.to_string()))
}

// ─── Lock Funds ─────────────────────────────────────────────────────────────

/// Deposit locked until the referenced bonded aggregate gathers its cosignatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockFunds {
    mosaic: Mosaic,
    duration: u64,
    hash: [u8; HASH_SIZE],
}

impl LockFunds {
    /// Fails unless `signed` is a bonded aggregate.
    pub fn new(mosaic: Mosaic, duration: u64, signed: &SignedTransaction) -> Result<Self, TxError> {
        if signed.entity_type() != EntityType::AggregateBonded {
            return Err(TxError::Invalid(format!(
                "lock funds must reference an AggregateBonded transaction, got {}",
                signed.entity_type()
            )));
        }
        let hash = decode_fixed("hash", signed.hash())?;
        Ok(Self { mosaic, duration, hash })
    }

    /// A lock read back from the network, where only the hash is known.
    pub(crate) fn from_hash(mosaic: Mosaic, duration: u64, hash: [u8; HASH_SIZE]) -> Self {
        Self { mosaic, duration, hash }
    }

    pub fn mosaic(&self) -> &Mosaic {
        &self.mosaic
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn hash(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    pub fn hash_hex(&self) -> String {
        hex::encode_upper(self.hash)
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("mosaicId", self.mosaic.id.id())
            .u64("amount", self.mosaic.amount)
            .u64("duration", self.duration)
            .fixed("hash", &self.hash, HASH_SIZE)
    }
}

// ─── Secret Lock ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretLock {
    mosaic: Mosaic,
    duration: u64,
    hash_type: HashType,
    secret: [u8; HASH_SIZE],
    recipient: Address,
}

impl SecretLock {
    pub fn new(
        mosaic: Mosaic,
        duration: u64,
        hash_type: HashType,
        secret: &str,
        recipient: Address,
    ) -> Result<Self, TxError> {
        let secret = parse_secret(hash_type, secret)?;
        Ok(Self { mosaic, duration, hash_type, secret, recipient })
    }

    pub fn mosaic(&self) -> &Mosaic {
        &self.mosaic
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    pub fn secret(&self) -> &[u8; HASH_SIZE] {
        &self.secret
    }

    pub fn secret_hex(&self) -> String {
        hex::encode_upper(self.secret)
    }

    pub fn recipient(&self) -> &Address {
        &self.recipient
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("mosaicId", self.mosaic.id.id())
            .u64("amount", self.mosaic.amount)
            .u64("duration", self.duration)
            .u8("hashAlgorithm", self.hash_type.value())
            .fixed("secret", &self.secret, HASH_SIZE)
            .fixed("recipient", self.recipient.as_bytes(), ADDRESS_SIZE)
    }
}

// ─── Secret Proof ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretProof {
    hash_type: HashType,
    secret: [u8; HASH_SIZE],
    recipient: Recipient,
    proof: Vec<u8>,
}

impl SecretProof {
    /// `proof` is hex and must not be empty.
    pub fn new(hash_type: HashType, secret: &str, recipient: Recipient, proof: &str) -> Result<Self, TxError> {
        let secret = parse_secret(hash_type, secret)?;
        let proof = hex::decode(proof).map_err(|e| TxError::Invalid(format!("proof: {e}")))?;
        if proof.is_empty() {
            return Err(TxError::Invalid("proof must not be empty".into()));
        }
        if proof.len() > u16::MAX as usize {
            return Err(TxError::Invalid("proof too large".into()));
        }
        Ok(Self { hash_type, secret, recipient, proof })
    }

    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    pub fn secret(&self) -> &[u8; HASH_SIZE] {
        &self.secret
    }

    pub fn secret_hex(&self) -> String {
        hex::encode_upper(self.secret)
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn proof(&self) -> &[u8] {
        &self.proof
    }

    pub fn proof_hex(&self) -> String {
        hex::encode_upper(&self.proof)
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u8("hashAlgorithm", self.hash_type.value())
            .fixed("secret", &self.secret, HASH_SIZE)
            .fixed("recipient", &self.recipient.to_bytes(), ADDRESS_SIZE)
            .u16("proofSize", self.proof.len() as u16)
            .bytes("proof", &self.proof)
    }
}
