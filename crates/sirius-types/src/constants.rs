//! Sirius network constants, entity type codes, and wire sizes.
//!
//! Reference: catapult-server src/catapult/model/EntityType.h, NetworkInfo.h

use serde::{Deserialize, Serialize};

// =============================================================================
// Network Types
// =============================================================================

/// Network type identifier, carried in the high byte of every entity version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    #[serde(rename = "public")]
    MainNet,
    #[serde(rename = "publicTest")]
    TestNet,
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "privateTest")]
    PrivateTest,
    #[serde(rename = "mijin")]
    Mijin,
    #[serde(rename = "mijinTest")]
    MijinTest,
}

impl NetworkType {
    pub const ALL: [NetworkType; 6] = [
        Self::MainNet,
        Self::TestNet,
        Self::Private,
        Self::PrivateTest,
        Self::Mijin,
        Self::MijinTest,
    ];

    /// The wire byte.
    pub fn value(self) -> u8 {
        match self {
            Self::MainNet     => 0xb8,
            Self::TestNet     => 0xa8,
            Self::Private     => 0xc8,
            Self::PrivateTest => 0xb0,
            Self::Mijin       => 0x60,
            Self::MijinTest   => 0x90,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.value() == v)
    }

    /// Name used by the REST gateway (`/network` resource).
    pub fn name(self) -> &'static str {
        match self {
            Self::MainNet     => "public",
            Self::TestNet     => "publicTest",
            Self::Private     => "private",
            Self::PrivateTest => "privateTest",
            Self::Mijin       => "mijin",
            Self::MijinTest   => "mijinTest",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|n| n.name().eq_ignore_ascii_case(name))
    }

    /// First character of a plain address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            Self::MainNet     => 'X',
            Self::TestNet     => 'V',
            Self::Private     => 'Z',
            Self::PrivateTest => 'W',
            Self::Mijin       => 'M',
            Self::MijinTest   => 'S',
        }
    }

    pub fn from_address_prefix(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|n| n.address_prefix() == c)
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Entity Types
// =============================================================================

/// Every transaction kind understood by this client.
///
/// Codes are the 16-bit `type` field of the entity header; the paired
/// version is the transaction version written into the low bytes of the
/// entity `version` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum EntityType {
    MosaicDefinition            = 0x414D,
    MosaicSupplyChange          = 0x424D,
    RegisterNamespace           = 0x414E,
    AddressAlias                = 0x424E,
    MosaicAlias                 = 0x434E,
    Transfer                    = 0x4154,
    ModifyMultisigAccount       = 0x4155,
    AggregateComplete           = 0x4141,
    AggregateBonded             = 0x4241,
    Lock                        = 0x4148,
    AccountPropertiesAddress    = 0x4150,
    AccountPropertiesMosaic     = 0x4250,
    AccountPropertiesEntityType = 0x4350,
    SecretLock                  = 0x4152,
    SecretProof                 = 0x4252,
    AccountLink                 = 0x414C,
    ModifyAddressMetadata       = 0x413D,
    ModifyMosaicMetadata        = 0x423D,
    ModifyNamespaceMetadata     = 0x433D,
    ModifyContract              = 0x4157,
    BlockchainUpgrade           = 0x4158,
    BlockchainConfig            = 0x4159,
    ExchangeOfferAdd            = 0x415D,
    ExchangeOffer               = 0x425D,
    ExchangeOfferRemove         = 0x435D,
}

impl EntityType {
    pub const ALL: [EntityType; 25] = [
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::RegisterNamespace,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::Transfer,
        Self::ModifyMultisigAccount,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::Lock,
        Self::AccountPropertiesAddress,
        Self::AccountPropertiesMosaic,
        Self::AccountPropertiesEntityType,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountLink,
        Self::ModifyAddressMetadata,
        Self::ModifyMosaicMetadata,
        Self::ModifyNamespaceMetadata,
        Self::ModifyContract,
        Self::BlockchainUpgrade,
        Self::BlockchainConfig,
        Self::ExchangeOfferAdd,
        Self::ExchangeOffer,
        Self::ExchangeOfferRemove,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_u16(v: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == v)
    }

    /// Current transaction version for this entity type.
    pub fn version(self) -> u32 {
        match self {
            Self::MosaicDefinition => 3,
            Self::MosaicSupplyChange => 2,
            Self::RegisterNamespace => 2,
            Self::AddressAlias | Self::MosaicAlias => 1,
            Self::Transfer => 3,
            Self::ModifyMultisigAccount => 3,
            Self::AggregateComplete | Self::AggregateBonded => 3,
            Self::Lock => 1,
            Self::AccountPropertiesAddress
            | Self::AccountPropertiesMosaic
            | Self::AccountPropertiesEntityType => 1,
            Self::SecretLock | Self::SecretProof => 1,
            Self::AccountLink => 2,
            Self::ModifyAddressMetadata
            | Self::ModifyMosaicMetadata
            | Self::ModifyNamespaceMetadata => 1,
            Self::ModifyContract => 3,
            Self::BlockchainUpgrade | Self::BlockchainConfig => 1,
            Self::ExchangeOfferAdd => 4,
            Self::ExchangeOffer | Self::ExchangeOfferRemove => 2,
        }
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.code())
    }
}

// =============================================================================
// Key and Data Sizes
// =============================================================================

/// Size of a public/private key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Size of a SHA3-256 hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Size of a decoded address.
pub const ADDRESS_SIZE: usize = 25;

/// Size of a base32 encoded address.
pub const ADDRESS_ENCODED_SIZE: usize = 40;

/// Size of the address checksum in bytes.
pub const CHECKSUM_SIZE: usize = 4;

/// size(4) + signature(64) + signer(32) + version(4) + type(2) + maxFee(8) + deadline(8)
pub const HEADER_SIZE: usize = 122;

/// size(4) + signer(32) + version(4) + type(2)
pub const EMBEDDED_HEADER_SIZE: usize = 42;

/// Offset of the signature inside a serialized transaction.
pub const SIGNATURE_OFFSET: usize = 4;

/// Offset of the signer public key inside a serialized transaction.
pub const SIGNER_OFFSET: usize = 68;

/// First byte covered by the signature (version onwards).
pub const SIGNED_DATA_OFFSET: usize = 100;

/// Embedded transactions inside an aggregate start on this alignment.
pub const EMBEDDED_ALIGNMENT: usize = 8;

// =============================================================================
// Time
// =============================================================================

/// Network epoch (2016-04-01T00:00:00Z) in Unix milliseconds.
pub const NETWORK_EPOCH_MILLIS: u64 = 1_459_468_800_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_type_lookup() {
        for n in NetworkType::ALL {
            assert_eq!(NetworkType::from_u8(n.value()), Some(n));
            assert_eq!(NetworkType::from_name(n.name()), Some(n));
            assert_eq!(NetworkType::from_address_prefix(n.address_prefix()), Some(n));
        }
        assert_eq!(NetworkType::from_u8(0x98), None);
        assert_eq!(NetworkType::from_name("mainnet"), None);
    }

    #[test]
    fn test_entity_type_codes_are_unique() {
        for t in EntityType::ALL {
            assert_eq!(EntityType::from_u16(t.code()), Some(t));
        }
        assert_eq!(EntityType::from_u16(0x4154), Some(EntityType::Transfer));
        assert_eq!(EntityType::from_u16(0x0000), None);
        assert_eq!(EntityType::from_u16(0x415A), None);
    }

    #[test]
    fn test_entity_versions() {
        assert_eq!(EntityType::Transfer.version(), 3);
        assert_eq!(EntityType::AccountLink.version(), 2);
        assert_eq!(EntityType::ExchangeOfferAdd.version(), 4);
        assert!(EntityType::AggregateBonded.is_aggregate());
        assert!(!EntityType::Lock.is_aggregate());
    }

    #[test]
    fn test_network_type_serde_names() {
        let json = serde_json::to_string(&NetworkType::MijinTest).unwrap();
        assert_eq!(json, "\"mijinTest\"");
        let back: NetworkType = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(back, NetworkType::MainNet);
    }
}
