//! Digest functions.
//!
//! `hash160` and `hash256` feed the lower-case hex text of the first SHA-256
//! digest into the second round, which is how secret-lock proofs are hashed
//! by the network's reference clients.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak, Sha3};

/// SHA3-256 (FIPS 202).
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    sha3_256_parts(&[data])
}

/// SHA3-256 over the concatenation of `parts`.
pub fn sha3_256_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut sha3 = Sha3::v256();
    let mut output = [0u8; 32];
    for part in parts {
        sha3.update(part);
    }
    sha3.finalize(&mut output);
    output
}

/// SHA3-512 over the concatenation of `parts`.
pub fn sha3_512(parts: &[&[u8]]) -> [u8; 64] {
    let mut sha3 = Sha3::v512();
    let mut output = [0u8; 64];
    for part in parts {
        sha3.update(part);
    }
    sha3.finalize(&mut output);
    output
}

/// Keccak-256 with the original 0x01 padding (not SHA3).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut keccak = Keccak::v256();
    let mut output = [0u8; 32];
    keccak.update(data);
    keccak.finalize(&mut output);
    output
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    output.copy_from_slice(&Sha256::digest(data));
    output
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut output = [0u8; 20];
    output.copy_from_slice(&Ripemd160::digest(data));
    output
}

/// RIPEMD-160 of the hex text of SHA-256(data).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(hex::encode(sha256(data)).as_bytes())
}

/// SHA-256 of the hex text of SHA-256(data).
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(hex::encode(sha256(data)).as_bytes())
}
