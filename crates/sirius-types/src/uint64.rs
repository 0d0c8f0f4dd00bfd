//! UInt64 codec.
//!
//! The REST gateway transports 64-bit values as `[low, high]` pairs of
//! 32-bit words; the wire format stores them as 8 little-endian bytes; ids are
//! displayed as 16 lower-case hex characters, high word first.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("expected 16 hex characters, got {0:?}")]
    InvalidHex(String),

    #[error("expected 8 bytes, got {0}")]
    InvalidLength(usize),

    #[error("invalid namespace name {0:?}")]
    InvalidName(String),

    #[error("namespace path {0:?} has more than 3 levels")]
    TooDeep(String),
}

/// Split into `[low, high]` 32-bit words.
pub fn to_pair(value: u64) -> [u32; 2] {
    [value as u32, (value >> 32) as u32]
}

/// Join `[low, high]` 32-bit words.
pub fn from_pair(pair: [u32; 2]) -> u64 {
    (pair[1] as u64) << 32 | pair[0] as u64
}

/// Read 8 little-endian bytes.
pub fn from_le_slice(bytes: &[u8]) -> Result<u64, IdError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| IdError::InvalidLength(bytes.len()))?;
    Ok(u64::from_le_bytes(arr))
}

/// 16 lower-case hex characters, most significant first.
pub fn to_hex(value: u64) -> String {
    format!("{:016x}", value)
}

/// Parse exactly 16 hex characters (either case).
pub fn from_hex(s: &str) -> Result<u64, IdError> {
    if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IdError::InvalidHex(s.to_string()));
    }
    u64::from_str_radix(s, 16).map_err(|_| IdError::InvalidHex(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_roundtrip_edges() {
        for &v in &[
            0u64,
            1,
            0x7FFF_FFFF,
            0x8000_0000,
            0xFFFF_FFFF,
            0x1_0000_0000,
            0x8000_0000_8000_0000,
            0x7FFF_FFFF_FFFF_FFFF,
            0x8000_0000_0000_0000,
            u64::MAX,
        ] {
            assert_eq!(from_pair(to_pair(v)), v, "pair roundtrip failed for {:#x}", v);
            assert_eq!(from_hex(&to_hex(v)).unwrap(), v);
        }
    }

    #[test]
    fn test_pair_word_order() {
        assert_eq!(to_pair(0x0dc6_7fbe_1cad_29e3), [481_110_499, 231_112_638]);
        // nem.xem as reported by the gateway
        assert_eq!(from_pair([3_646_934_825, 3_576_016_193]), 0xD525_AD41_D95F_CF29);
    }

    #[test]
    fn test_hex_form() {
        assert_eq!(to_hex(992_621_222_383_397_347), "0dc67fbe1cad29e3");
        assert_eq!(from_hex("0DC67FBE1CAD29E3").unwrap(), 992_621_222_383_397_347);
        assert!(from_hex("0dc67fbe1cad29e").is_err());
        assert!(from_hex("0dc67fbe1cad29eg").is_err());
        assert!(from_hex("+dc67fbe1cad29e3").is_err());
    }

    #[test]
    fn test_le_slice() {
        let bytes = 0x0102_0304_0506_0708u64.to_le_bytes();
        assert_eq!(from_le_slice(&bytes).unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(from_le_slice(&bytes[..7]), Err(IdError::InvalidLength(7)));
    }
}
