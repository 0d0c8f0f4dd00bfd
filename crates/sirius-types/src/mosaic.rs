//! Mosaic identifiers, nonces, amounts, and definition properties.

use crate::constants::KEY_SIZE;
use crate::digest::sha3_256;
use crate::uint64::{self, IdError};

/// Mosaic ids never carry the namespace flag bit.
const MOSAIC_ID_MASK: u64 = 0x7FFF_FFFF_FFFF_FFFF;

// =============================================================================
// Nonce
// =============================================================================

/// Four bytes mixed with the owner key to derive a mosaic id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MosaicNonce([u8; 4]);

impl MosaicNonce {
    pub fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Nonce from its little-endian wire value.
    pub fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    /// Fresh nonce from the OS random source.
    pub fn random() -> Result<Self, getrandom::Error> {
        let mut bytes = [0u8; 4];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Parse 8 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        let raw = hex::decode(s).map_err(|_| IdError::InvalidHex(s.to_string()))?;
        let bytes: [u8; 4] = raw
            .as_slice()
            .try_into()
            .map_err(|_| IdError::InvalidLength(raw.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    pub fn value(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

// =============================================================================
// Mosaic Id
// =============================================================================

/// Id derived from the first 8 bytes (LE) of SHA3-256(nonce ‖ owner key).
pub fn generate_mosaic_id(nonce: &MosaicNonce, owner_public_key: &[u8; KEY_SIZE]) -> u64 {
    let hash = sha3_256(&[&nonce.as_bytes()[..], &owner_public_key[..]]);
    let mut low = [0u8; 8];
    low.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(low) & MOSAIC_ID_MASK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MosaicId(u64);

impl MosaicId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        Ok(Self(uint64::from_hex(s)?))
    }

    pub fn from_nonce(nonce: &MosaicNonce, owner_public_key: &[u8; KEY_SIZE]) -> Self {
        Self(generate_mosaic_id(nonce, owner_public_key))
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        uint64::to_hex(self.0)
    }

    pub fn to_pair(&self) -> [u32; 2] {
        uint64::to_pair(self.0)
    }
}

impl std::fmt::Display for MosaicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// An amount of a mosaic, in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: u64,
}

impl Mosaic {
    pub fn new(id: MosaicId, amount: u64) -> Self {
        Self { id, amount }
    }
}

// =============================================================================
// Properties
// =============================================================================

pub const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
pub const FLAG_TRANSFERABLE: u8 = 0x02;
pub const FLAG_LEVY_MUTABLE: u8 = 0x04;

/// Optional property id carrying the duration.
pub const PROPERTY_DURATION: u8 = 2;

/// Mosaic definition properties. Without a duration the mosaic never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub levy_mutable: bool,
    pub divisibility: u8,
    pub duration: Option<u64>,
}

impl MosaicProperties {
    pub fn new(
        supply_mutable: bool,
        transferable: bool,
        levy_mutable: bool,
        divisibility: u8,
        duration: Option<u64>,
    ) -> Self {
        Self { supply_mutable, transferable, levy_mutable, divisibility, duration }
    }

    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        if self.levy_mutable {
            flags |= FLAG_LEVY_MUTABLE;
        }
        flags
    }

    pub fn from_flags(flags: u8, divisibility: u8, duration: Option<u64>) -> Self {
        Self {
            supply_mutable: flags & FLAG_SUPPLY_MUTABLE != 0,
            transferable: flags & FLAG_TRANSFERABLE != 0,
            levy_mutable: flags & FLAG_LEVY_MUTABLE != 0,
            divisibility,
            duration,
        }
    }
}
