//! Secure message encryption.
//!
//! Output layout: `salt (32) ‖ iv (16) ‖ AES-256-CBC(PKCS#7)`. The AES key is
//! SHA3-256 of the ECDH point (compressed) XOR the salt, so either party can
//! decrypt with its own private key and the other party's public key.

use crate::hash::sha3_256;
use crate::keys::KeyPair;
use crate::{random_bytes, CryptoError};
use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use log::debug;
use sirius_types::constants::KEY_SIZE;

pub const SALT_SIZE: usize = 32;
pub const IV_SIZE: usize = 16;
const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Shortest valid payload: salt, iv, and one cipher block.
pub const MIN_PAYLOAD_SIZE: usize = SALT_SIZE + IV_SIZE + BLOCK_SIZE;

fn shared_key(
    own: &KeyPair,
    other_public_key: &[u8; KEY_SIZE],
    salt: &[u8; SALT_SIZE],
) -> Result<[u8; 32], CryptoError> {
    let mut shared = own.shared_point(other_public_key)?;
    for (b, s) in shared.iter_mut().zip(salt.iter()) {
        *b ^= s;
    }
    Ok(sha3_256(&shared))
}

/// Encrypt `plaintext` from `sender` to `recipient_public_key` with a fresh
/// random salt and IV.
pub fn encrypt(
    sender: &KeyPair,
    recipient_public_key: &[u8; KEY_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let salt = random_bytes::<SALT_SIZE>()?;
    let iv = random_bytes::<IV_SIZE>()?;
    encrypt_with(sender, recipient_public_key, plaintext, &salt, &iv)
}

/// Encrypt with caller-supplied salt and IV.
pub fn encrypt_with(
    sender: &KeyPair,
    recipient_public_key: &[u8; KEY_SIZE],
    plaintext: &[u8],
    salt: &[u8; SALT_SIZE],
    iv: &[u8; IV_SIZE],
) -> Result<Vec<u8>, CryptoError> {
    let key = shared_key(sender, recipient_public_key, salt)?;
    let ciphertext = Aes256CbcEnc::new(GenericArray::from_slice(&key), GenericArray::from_slice(iv))
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut out = Vec::with_capacity(SALT_SIZE + IV_SIZE + ciphertext.len());
    out.extend_from_slice(salt);
    out.extend_from_slice(iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a payload produced by [`encrypt`]. `own` is either party's key
/// pair and `other_public_key` the counterparty's public key.
pub fn decrypt(
    own: &KeyPair,
    other_public_key: &[u8; KEY_SIZE],
    payload: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if payload.len() < MIN_PAYLOAD_SIZE {
        return Err(CryptoError::Decrypt(format!("payload too short ({} bytes)", payload.len())));
    }
    let ciphertext = &payload[SALT_SIZE + IV_SIZE..];
    if ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::Decrypt("ciphertext is not block aligned".into()));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&payload[..SALT_SIZE]);
    let iv = &payload[SALT_SIZE..SALT_SIZE + IV_SIZE];

    let key = shared_key(own, other_public_key, &salt)?;
    Aes256CbcDec::new(GenericArray::from_slice(&key), GenericArray::from_slice(iv))
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| {
            debug!("secure message padding check failed");
            CryptoError::Decrypt("bad padding".into())
        })
}
