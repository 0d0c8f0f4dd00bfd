//! Ed25519 key pairs over SHA3-512.
//!
//! Identical to RFC 8032 Ed25519 except that every SHA-512 invocation is
//! replaced by SHA3-512:
//!
//! - secret scalar `a` = clamp(SHA3-512(sk)[0..32]), public key `A = a·B`
//! - `r = SHA3-512(prefix ‖ M) mod L`, `R = r·B`
//! - `k = SHA3-512(R ‖ A ‖ M) mod L`, `S = r + k·a mod L`
//!
//! A signature is `R ‖ S` (64 bytes). Signing and verification run through
//! `ed25519-dalek`'s hazmat API with SHA3-512 as the context digest.

use crate::hash::sha3_512;
use crate::{parse_key_hex, random_bytes, CryptoError};
use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::hazmat::{self, ExpandedSecretKey};
use ed25519_dalek::{Signature, VerifyingKey};
use sha3::Sha3_512;
use sirius_types::constants::{KEY_SIZE, SIGNATURE_SIZE};
use sirius_types::{NetworkType, PublicAccount};

pub struct KeyPair {
    private_key: [u8; KEY_SIZE],
    expanded: ExpandedSecretKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    pub fn from_private_key(private_key: [u8; KEY_SIZE]) -> Self {
        let expanded = ExpandedSecretKey::from_bytes(&sha3_512(&[&private_key[..]]));
        let verifying_key = VerifyingKey::from(&expanded);
        Self { private_key, expanded, verifying_key }
    }

    pub fn from_private_key_hex(private_key: &str) -> Result<Self, CryptoError> {
        Ok(Self::from_private_key(parse_key_hex(private_key)?))
    }

    /// Fresh key pair from the OS random source.
    pub fn random() -> Result<Self, CryptoError> {
        Ok(Self::from_private_key(random_bytes()?))
    }

    pub fn private_key(&self) -> &[u8; KEY_SIZE] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; KEY_SIZE] {
        self.verifying_key.as_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key())
    }

    pub fn public_account(&self, network_type: NetworkType) -> PublicAccount {
        PublicAccount::new(*self.public_key(), network_type)
    }

    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_SIZE] {
        hazmat::raw_sign::<Sha3_512>(&self.expanded, message, &self.verifying_key).to_bytes()
    }

    /// ECDH point `a·P` for another party's public key, compressed.
    pub fn shared_point(&self, other_public_key: &[u8; KEY_SIZE]) -> Result<[u8; 32], CryptoError> {
        let point = CompressedEdwardsY(*other_public_key).decompress().ok_or(CryptoError::InvalidPoint)?;
        Ok((point * self.expanded.scalar).compress().to_bytes())
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair").field("public_key", &self.public_key_hex()).finish()
    }
}

/// Check `signature` over `message` against `public_key`.
pub fn verify(
    public_key: &[u8; KEY_SIZE],
    message: &[u8],
    signature: &[u8; SIGNATURE_SIZE],
) -> Result<(), CryptoError> {
    let verifying_key = VerifyingKey::from_bytes(public_key).map_err(|_| CryptoError::InvalidPoint)?;
    hazmat::raw_verify::<Sha3_512>(&verifying_key, message, &Signature::from_bytes(signature))
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}
