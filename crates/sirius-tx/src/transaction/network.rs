//! Network-level upgrades, announced by the nemesis account.

use crate::schema::Schema;
use crate::TxError;

/// Packed node software version: major, minor, revision, build as 16-bit
/// words, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockchainVersion(u64);

impl BlockchainVersion {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn from_parts(major: u16, minor: u16, revision: u16, build: u16) -> Self {
        Self((major as u64) << 48 | (minor as u64) << 32 | (revision as u64) << 16 | build as u64)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn parts(&self) -> [u16; 4] {
        [(self.0 >> 48) as u16, (self.0 >> 32) as u16, (self.0 >> 16) as u16, self.0 as u16]
    }
}

impl std::fmt::Display for BlockchainVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [major, minor, revision, build] = self.parts();
        write!(f, "{major}.{minor}.{revision}.{build}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainUpgrade {
    upgrade_period: u64,
    new_version: BlockchainVersion,
}

impl BlockchainUpgrade {
    pub fn new(upgrade_period: u64, new_version: BlockchainVersion) -> Self {
        Self { upgrade_period, new_version }
    }

    pub fn upgrade_period(&self) -> u64 {
        self.upgrade_period
    }

    pub fn new_version(&self) -> BlockchainVersion {
        self.new_version
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("upgradePeriod", self.upgrade_period)
            .u64("newBlockChainVersion", self.new_version.value())
    }
}

/// Replacement network configuration, applied `apply_height_delta` blocks
/// after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainConfig {
    apply_height_delta: u64,
    blockchain_config: String,
    supported_entity_versions: String,
}

impl BlockchainConfig {
    pub fn new(
        apply_height_delta: u64,
        blockchain_config: &str,
        supported_entity_versions: &str,
    ) -> Result<Self, TxError> {
        if blockchain_config.len() > u16::MAX as usize || supported_entity_versions.len() > u16::MAX as usize {
            return Err(TxError::Invalid("blockchain configuration exceeds 65535 bytes".into()));
        }
        Ok(Self {
            apply_height_delta,
            blockchain_config: blockchain_config.to_string(),
            supported_entity_versions: supported_entity_versions.to_string(),
        })
    }

    pub fn apply_height_delta(&self) -> u64 {
        self.apply_height_delta
    }

    pub fn blockchain_config(&self) -> &str {
        &self.blockchain_config
    }

    pub fn supported_entity_versions(&self) -> &str {
        &self.supported_entity_versions
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("applyHeightDelta", self.apply_height_delta)
            .u16("blockChainConfigSize", self.blockchain_config.len() as u16)
            .u16("supportedEntityVersionsSize", self.supported_entity_versions.len() as u16)
            .bytes("blockChainConfig", self.blockchain_config.as_bytes())
            .bytes("supportedEntityVersions", self.supported_entity_versions.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parts() {
        let v = BlockchainVersion::from_parts(0, 5, 1, 2);
        assert_eq!(v.value(), 0x0000_0005_0001_0002);
        assert_eq!(v.parts(), [0, 5, 1, 2]);
        assert_eq!(v.to_string(), "0.5.1.2");
    }

    #[test]
    fn test_config_layout() {
        let tx = BlockchainConfig::new(10, "[network]", "{}").unwrap();
        let bytes = tx.schema().to_bytes().unwrap();
        assert_eq!(bytes.len(), 8 + 2 + 2 + 9 + 2);
        assert_eq!(&bytes[8..12], &[9, 0, 2, 0]);
        assert_eq!(&bytes[12..21], b"[network]");
    }

    #[test]
    fn test_upgrade_layout() {
        let tx = BlockchainUpgrade::new(100, BlockchainVersion::new(7));
        assert_eq!(tx.schema().to_bytes().unwrap()[8], 7);
    }
}
