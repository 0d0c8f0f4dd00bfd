use crate::address::{Address, AddressError};
use crate::constants::{NetworkType, KEY_SIZE};

/// A public key bound to a network. The address is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicAccount {
    public_key: [u8; KEY_SIZE],
    network_type: NetworkType,
}

impl PublicAccount {
    pub fn new(public_key: [u8; KEY_SIZE], network_type: NetworkType) -> Self {
        Self { public_key, network_type }
    }

    /// Parse a 64-character hex public key.
    pub fn from_public_key(public_key: &str, network_type: NetworkType) -> Result<Self, AddressError> {
        let raw = hex::decode(public_key.trim()).map_err(|e| AddressError::Hex(e.to_string()))?;
        let key: [u8; KEY_SIZE] = raw.as_slice().try_into().map_err(|_| AddressError::InvalidKeySize {
            expected: KEY_SIZE,
            actual: raw.len(),
        })?;
        Ok(Self::new(key, network_type))
    }

    pub fn public_key(&self) -> &[u8; KEY_SIZE] {
        &self.public_key
    }

    /// Upper-case hex of the public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key)
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key, self.network_type)
    }
}

impl std::fmt::Display for PublicAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.public_key_hex(), self.network_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_is_derived() {
        let account = PublicAccount::from_public_key(
            "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf",
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(account.address().plain(), "SARNASAS2BIAB6LMFA3FPMGBPGIJGK6IJETM3ZSP");
        assert_eq!(
            account.public_key_hex(),
            "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF"
        );
    }

    #[test]
    fn test_equality_is_case_insensitive_on_input() {
        let a = PublicAccount::from_public_key(
            "b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf",
            NetworkType::MijinTest,
        )
        .unwrap();
        let b = PublicAccount::from_public_key(
            "B4F12E7C9F6946091E2CB8B6D3A12B50D17CCBBF646386EA27CE2946A7423DCF",
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_key_length() {
        assert_eq!(
            PublicAccount::from_public_key("abcd", NetworkType::Mijin),
            Err(AddressError::InvalidKeySize { expected: 32, actual: 2 })
        );
        assert!(PublicAccount::from_public_key("zz", NetworkType::Mijin).is_err());
    }
}
