//! Sirius address derivation, parsing, and formatting.
//!
//! An address is 25 bytes: the network byte, the RIPEMD-160 of the SHA3-256
//! of the public key, and the first 4 bytes of the SHA3-256 of those 21 bytes
//! as a checksum. The plain text form is base32 (40 characters), the encoded
//! form is hex, and the pretty form groups the plain form by six characters.

use crate::base32;
use crate::constants::{NetworkType, ADDRESS_ENCODED_SIZE, ADDRESS_SIZE, CHECKSUM_SIZE, KEY_SIZE};
use crate::digest::{ripemd160, sha3_256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be a non-empty string")]
    Empty,

    #[error("invalid address length ({0})")]
    InvalidLength(usize),

    #[error("base32 decode error: {0}")]
    Base32(#[from] base32::Base32Error),

    #[error("hex decode error: {0}")]
    Hex(String),

    #[error("unknown network byte 0x{0:02x}")]
    UnknownNetwork(u8),

    #[error("address belongs to {actual}, expected {expected}")]
    NetworkMismatch { expected: NetworkType, actual: NetworkType },

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("public key must be {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },
}

/// A decoded, checksum-verified address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_SIZE],
    network_type: NetworkType,
}

impl Address {
    /// Derive the address of a public key on a network.
    pub fn from_public_key(public_key: &[u8; KEY_SIZE], network_type: NetworkType) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = network_type.value();
        bytes[1..21].copy_from_slice(&ripemd160(&sha3_256(&[&public_key[..]])));
        let checksum = sha3_256(&[&bytes[..21]]);
        bytes[21..].copy_from_slice(&checksum[..CHECKSUM_SIZE]);
        Self { bytes, network_type }
    }

    /// Derive the address of a hex-encoded public key on a network.
    pub fn from_public_key_hex(public_key: &str, network_type: NetworkType) -> Result<Self, AddressError> {
        let raw = hex::decode(public_key).map_err(|e| AddressError::Hex(e.to_string()))?;
        let key: [u8; KEY_SIZE] = raw.as_slice().try_into().map_err(|_| AddressError::InvalidKeySize {
            expected: KEY_SIZE,
            actual: raw.len(),
        })?;
        Ok(Self::from_public_key(&key, network_type))
    }

    /// Parse a plain or pretty (dash separated) address.
    pub fn from_raw(address: &str) -> Result<Self, AddressError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AddressError::Empty);
        }
        let plain: String = address.chars().filter(|&c| c != '-').collect();
        if plain.len() != ADDRESS_ENCODED_SIZE {
            return Err(AddressError::InvalidLength(plain.len()));
        }
        let bytes = base32::decode(&plain)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a plain or pretty address and require it to belong to `network_type`.
    pub fn from_raw_for_network(address: &str, network_type: NetworkType) -> Result<Self, AddressError> {
        let parsed = Self::from_raw(address)?;
        if parsed.network_type != network_type {
            return Err(AddressError::NetworkMismatch {
                expected: network_type,
                actual: parsed.network_type,
            });
        }
        Ok(parsed)
    }

    /// Parse the hex ("encoded") form.
    pub fn from_encoded(encoded: &str) -> Result<Self, AddressError> {
        let bytes = hex::decode(encoded.trim()).map_err(|e| AddressError::Hex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Validate raw address bytes: length, network byte, and checksum.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ADDRESS_SIZE] = data
            .try_into()
            .map_err(|_| AddressError::InvalidLength(data.len()))?;
        let network_type = NetworkType::from_u8(bytes[0]).ok_or(AddressError::UnknownNetwork(bytes[0]))?;

        let checksum = sha3_256(&[&bytes[..21]]);
        if checksum[..CHECKSUM_SIZE] != bytes[21..] {
            return Err(AddressError::ChecksumMismatch);
        }

        Ok(Self { bytes, network_type })
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.bytes
    }

    /// Base32 form, 40 upper-case characters.
    pub fn plain(&self) -> String {
        base32::encode(&self.bytes)
    }

    /// Plain form split into dash-separated groups of six.
    pub fn pretty(&self) -> String {
        let plain = self.plain();
        plain
            .as_bytes()
            .chunks(6)
            .map(|c| std::str::from_utf8(c).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Upper-case hex of the 25 bytes.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.bytes)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.plain())
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_raw(s)
    }
}

/// Validate a plain or pretty address string.
pub fn is_valid_address(address: &str) -> bool {
    Address::from_raw(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC_KEY: &str = "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf";

    #[test]
    fn test_from_public_key_all_networks() {
        let expected = [
            (NetworkType::MijinTest, "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP"),
            (NetworkType::Mijin, "MARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJE5K5RYU"),
            (NetworkType::TestNet, "VARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJGOH3FCE"),
            (NetworkType::MainNet, "XARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJF6CHIGW"),
            (NetworkType::PrivateTest, "WARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJHPRCU4F"),
            (NetworkType::Private, "ZARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJF2S3UOQ"),
        ];
        for (network, plain) in expected {
            let address = Address::from_public_key_hex(PUBLIC_KEY, network).unwrap();
            assert_eq!(address.plain(), plain);
            assert_eq!(address.network_type(), network);
        }
    }

    #[test]
    fn test_plain_and_encoded_forms_agree() {
        let address = Address::from_raw("SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP").unwrap();
        assert_eq!(address.encoded(), "9022D04812D05000F96C283657B0C17990932BC84926CDE64F");
        let back = Address::from_encoded(&address.encoded()).unwrap();
        assert_eq!(back, address);
        assert_eq!(back.plain(), "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP");
    }

    #[test]
    fn test_pretty_form() {
        let address = Address::from_raw("SDGLFWDSHILTIUHGIBH5UGX2VYF5VNJEKCCDBR26").unwrap();
        assert_eq!(address.pretty(), "SDGLFW-DSHILT-IUHGIB-H5UGX2-VYF5VN-JEKCCD-BR26");
        let from_pretty = Address::from_raw("SDGLFW-DSHILT-IUHGIB-H5UGX2-VYF5VN-JEKCCD-BR26").unwrap();
        assert_eq!(from_pretty, address);
    }

    #[test]
    fn test_network_mismatch() {
        let err = Address::from_raw_for_network("SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP", NetworkType::Mijin)
            .unwrap_err();
        assert_eq!(
            err,
            AddressError::NetworkMismatch {
                expected: NetworkType::Mijin,
                actual: NetworkType::MijinTest,
            }
        );
    }

    #[test]
    fn test_corrupted_checksum_rejected() {
        let address = Address::from_raw("SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP").unwrap();
        let mut bytes = *address.as_bytes();
        bytes[24] ^= 0x01;
        assert_eq!(Address::from_bytes(&bytes), Err(AddressError::ChecksumMismatch));

        let mut bytes = *address.as_bytes();
        bytes[5] ^= 0x80;
        assert_eq!(Address::from_bytes(&bytes), Err(AddressError::ChecksumMismatch));
    }

    #[test]
    fn test_invalid_lengths() {
        assert_eq!(Address::from_raw(""), Err(AddressError::Empty));
        assert_eq!(
            Address::from_raw("SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZS"),
            Err(AddressError::InvalidLength(39))
        );
        assert_eq!(Address::from_bytes(&[0x90; 24]), Err(AddressError::InvalidLength(24)));
        assert!(!is_valid_address("not an address"));
    }

    #[test]
    fn test_unknown_network_byte() {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = 0x98;
        assert_eq!(Address::from_bytes(&bytes), Err(AddressError::UnknownNetwork(0x98)));
    }
}
