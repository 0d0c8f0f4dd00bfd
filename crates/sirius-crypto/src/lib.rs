//! Crypto primitives for the Sirius client.
//!
//! - [`hash`]: SHA3, Keccak, SHA-256, RIPEMD-160 and the composite digests
//!   used by secret locks.
//! - [`keys`]: Ed25519 key pairs where every hash is SHA3-512 instead of
//!   SHA-512, plus signature verification.
//! - [`block_cipher`]: the ECDH + AES-256-CBC scheme behind secure messages.
//!
//! Signatures come from `ed25519-dalek`, the ECDH point from
//! `curve25519-dalek` and the cipher from `aes` with `cbc`.

pub mod block_cipher;
pub mod hash;
pub mod keys;

pub use keys::{verify, KeyPair};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("public key is not a valid curve point")]
    InvalidPoint,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("decryption failed: {0}")]
    Decrypt(String),

    #[error("random source unavailable: {0}")]
    Random(String),
}

// ─── Helpers ────────────────────────────────────────────────────────────────

pub(crate) fn parse_key_hex(s: &str) -> Result<[u8; 32], CryptoError> {
    let raw = hex::decode(s.trim()).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    raw.as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKey(format!("expected 32 bytes, got {}", raw.len())))
}

pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf).map_err(|e| CryptoError::Random(e.to_string()))?;
    Ok(buf)
}
