//! RFC 4648 Base32 encoding/decoding (no padding).
//!
//! Plain addresses are the base32 form of the 25-byte address, which is
//! exactly 40 characters. Data is processed in 5-byte groups, each encoding
//! to 8 characters; a trailing partial group emits only the characters that
//! carry data bits.

use thiserror::Error;

/// Base32 alphabet (RFC 4648, upper-case).
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Characters emitted for a trailing group of N bytes (index = N).
const ENCODED_GROUP_SIZES: [usize; 6] = [0, 2, 4, 5, 7, 8];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base32Error {
    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),

    #[error("invalid encoded length {0}")]
    InvalidLength(usize),

    #[error("non-zero trailing bits")]
    TrailingBits,
}

/// Build reverse alphabet lookup table at compile time. Lower-case letters
/// map to the same values as upper-case ones.
const fn build_reverse_alphabet() -> [u8; 128] {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        let c = ALPHABET[i];
        table[c as usize] = i as u8;
        if c >= b'A' && c <= b'Z' {
            table[(c + 32) as usize] = i as u8;
        }
        i += 1;
    }
    table
}

static REVERSE_ALPHABET: [u8; 128] = build_reverse_alphabet();

/// Encode bytes to base32 without padding.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 + 4) / 5);
    for group in data.chunks(5) {
        let mut buf = [0u8; 5];
        buf[..group.len()].copy_from_slice(group);
        let bits = u64::from_be_bytes([0, 0, 0, buf[0], buf[1], buf[2], buf[3], buf[4]]);
        for i in 0..ENCODED_GROUP_SIZES[group.len()] {
            let index = (bits >> (35 - 5 * i)) & 0x1F;
            out.push(ALPHABET[index as usize] as char);
        }
    }
    out
}

/// Decode unpadded base32. Trailing `=` padding is tolerated.
pub fn decode(encoded: &str) -> Result<Vec<u8>, Base32Error> {
    let trimmed = encoded.trim_end_matches('=');
    let input = trimmed.as_bytes();

    let tail = input.len() % 8;
    let tail_bytes = match tail {
        0 => 0,
        2 => 1,
        4 => 2,
        5 => 3,
        7 => 4,
        _ => return Err(Base32Error::InvalidLength(encoded.len())),
    };

    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    for (group_index, group) in input.chunks(8).enumerate() {
        let mut bits: u64 = 0;
        for (i, &ch) in group.iter().enumerate() {
            let position = group_index * 8 + i;
            if ch >= 128 {
                return Err(Base32Error::InvalidCharacter(ch as char, position));
            }
            let digit = REVERSE_ALPHABET[ch as usize];
            if digit == 0xFF {
                return Err(Base32Error::InvalidCharacter(ch as char, position));
            }
            bits |= (digit as u64) << (35 - 5 * i);
        }

        let bytes = bits.to_be_bytes();
        let take = if group.len() == 8 { 5 } else { tail_bytes };
        // bits beyond the last whole byte must be zero
        if take < 5 && bits & ((1u64 << (40 - 8 * take)) - 1) != 0 {
            return Err(Base32Error::TrailingBits);
        }
        out.extend_from_slice(&bytes[3..3 + take]);
    }

    Ok(out)
}
