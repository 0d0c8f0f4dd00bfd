//! Mosaic definition and supply change transactions.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::KEY_SIZE;
use sirius_types::mosaic::PROPERTY_DURATION;
use sirius_types::{MosaicId, MosaicNonce, MosaicProperties};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicDefinition {
    nonce: MosaicNonce,
    mosaic_id: MosaicId,
    properties: MosaicProperties,
}

impl MosaicDefinition {
    pub fn nonce(&self) -> &MosaicNonce {
        &self.nonce
    }

    pub fn mosaic_id(&self) -> MosaicId {
        self.mosaic_id
    }

    pub fn properties(&self) -> &MosaicProperties {
        &self.properties
    }

    pub(crate) fn schema(&self) -> Schema {
        let optional: Vec<Schema> = self
            .properties
            .duration
            .map(|d| Schema::new().u8("id", PROPERTY_DURATION).u64("value", d))
            .into_iter()
            .collect();
        Schema::new()
            .fixed("mosaicNonce", self.nonce.as_bytes(), 4)
            .u64("mosaicId", self.mosaic_id.id())
            .u8("numOptionalProperties", optional.len() as u8)
            .u8("flags", self.properties.flags())
            .u8("divisibility", self.properties.divisibility)
            .table("optionalProperties", optional)
    }
}

/// The id is either given or derived from the nonce and owner public key.
#[derive(Debug, Clone, Default)]
pub struct MosaicDefinitionBuilder {
    nonce: Option<MosaicNonce>,
    mosaic_id: Option<MosaicId>,
    owner: Option<[u8; KEY_SIZE]>,
    properties: Option<MosaicProperties>,
}

impl MosaicDefinitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_nonce(mut self, nonce: MosaicNonce) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn set_mosaic_id(mut self, mosaic_id: MosaicId) -> Self {
        self.mosaic_id = Some(mosaic_id);
        self
    }

    /// Derive the mosaic id from the nonce and this owner key at build time.
    pub fn set_owner(mut self, owner_public_key: [u8; KEY_SIZE]) -> Self {
        self.owner = Some(owner_public_key);
        self
    }

    pub fn set_properties(mut self, properties: MosaicProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn build(self) -> Result<MosaicDefinition, TxError> {
        let nonce = self
            .nonce
            .ok_or_else(|| TxError::Invalid("mosaic definition requires a nonce".into()))?;
        let properties = self
            .properties
            .ok_or_else(|| TxError::Invalid("mosaic definition requires properties".into()))?;
        let mosaic_id = match (self.mosaic_id, self.owner) {
            (Some(id), _) => id,
            (None, Some(owner)) => MosaicId::from_nonce(&nonce, &owner),
            (None, None) => {
                return Err(TxError::Invalid("mosaic definition requires an id or an owner".into()))
            }
        };
        Ok(MosaicDefinition { nonce, mosaic_id, properties })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MosaicSupplyType {
    Decrease,
    Increase,
}

impl MosaicSupplyType {
    pub fn value(self) -> u8 {
        match self {
            MosaicSupplyType::Decrease => 0,
            MosaicSupplyType::Increase => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(MosaicSupplyType::Decrease),
            1 => Some(MosaicSupplyType::Increase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicSupplyChange {
    mosaic_id: MosaicId,
    direction: MosaicSupplyType,
    delta: u64,
}

impl MosaicSupplyChange {
    pub fn new(mosaic_id: MosaicId, direction: MosaicSupplyType, delta: u64) -> Self {
        Self { mosaic_id, direction, delta }
    }

    pub fn mosaic_id(&self) -> MosaicId {
        self.mosaic_id
    }

    pub fn direction(&self) -> MosaicSupplyType {
        self.direction
    }

    pub fn delta(&self) -> u64 {
        self.delta
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("mosaicId", self.mosaic_id.id())
            .u8("direction", self.direction.value())
            .u64("delta", self.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> [u8; 32] {
        let mut key = [0u8; 32];
        hex::decode_to_slice("b4f12e7c9f6946091e2cb8b6d3a12b50d17ccbbf646386ea27ce2946a7423dcf", &mut key)
            .unwrap();
        key
    }

    #[test]
    fn test_id_derived_from_owner() {
        let tx = MosaicDefinitionBuilder::new()
            .set_nonce(MosaicNonce::from_u32(0))
            .set_owner(owner())
            .set_properties(MosaicProperties::new(true, true, false, 4, None))
            .build()
            .unwrap();
        assert_eq!(tx.mosaic_id().id(), 0x0dc67fbe1cad29e3);
    }

    #[test]
    fn test_duration_is_optional_property() {
        let base = MosaicDefinitionBuilder::new()
            .set_nonce(MosaicNonce::from_u32(7))
            .set_mosaic_id(MosaicId::new(1));
        let without = base.clone().set_properties(MosaicProperties::new(true, false, false, 0, None)).build().unwrap();
        let with = base.set_properties(MosaicProperties::new(true, false, false, 0, Some(500))).build().unwrap();
        assert_eq!(with.schema().size(), without.schema().size() + 9);

        let bytes = with.schema().to_bytes().unwrap();
        assert_eq!(&bytes[..4], &7u32.to_le_bytes());
        assert_eq!(bytes[12], 1);
        assert_eq!(bytes[13], 0x01);
        assert_eq!(bytes[15], PROPERTY_DURATION);
        assert_eq!(&bytes[16..24], &500u64.to_le_bytes());
    }

    #[test]
    fn test_missing_properties_rejected() {
        let result = MosaicDefinitionBuilder::new()
            .set_nonce(MosaicNonce::from_u32(0))
            .set_mosaic_id(MosaicId::new(1))
            .build();
        assert!(matches!(result, Err(TxError::Invalid(_))));
    }

    #[test]
    fn test_supply_change_layout() {
        let tx = MosaicSupplyChange::new(MosaicId::new(0x56CE00002B67), MosaicSupplyType::Increase, 10);
        let bytes = tx.schema().to_bytes().unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[8], 1);
    }
}
