//! Metadata modifications attached to an address, mosaic or namespace.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::{EntityType, ADDRESS_SIZE};
use sirius_types::{Address, MosaicId, NamespaceId};

/// The single entity whose metadata is modified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataTarget {
    Address(Address),
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl MetadataTarget {
    pub fn metadata_type(&self) -> u8 {
        match self {
            MetadataTarget::Address(_) => 1,
            MetadataTarget::Mosaic(_) => 2,
            MetadataTarget::Namespace(_) => 3,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            MetadataTarget::Address(_) => EntityType::ModifyAddressMetadata,
            MetadataTarget::Mosaic(_) => EntityType::ModifyMosaicMetadata,
            MetadataTarget::Namespace(_) => EntityType::ModifyNamespaceMetadata,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataModificationType {
    Add,
    Remove,
}

impl MetadataModificationType {
    pub fn value(self) -> u8 {
        match self {
            MetadataModificationType::Add => 0,
            MetadataModificationType::Remove => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(MetadataModificationType::Add),
            1 => Some(MetadataModificationType::Remove),
            _ => None,
        }
    }
}

/// Removal carries only the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetadataModification {
    Add { key: String, value: String },
    Remove { key: String },
}

impl MetadataModification {
    pub fn add(key: &str, value: &str) -> Self {
        MetadataModification::Add { key: key.to_string(), value: value.to_string() }
    }

    pub fn remove(key: &str) -> Self {
        MetadataModification::Remove { key: key.to_string() }
    }

    pub fn modification_type(&self) -> MetadataModificationType {
        match self {
            MetadataModification::Add { .. } => MetadataModificationType::Add,
            MetadataModification::Remove { .. } => MetadataModificationType::Remove,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            MetadataModification::Add { key, .. } | MetadataModification::Remove { key } => key,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            MetadataModification::Add { value, .. } => Some(value),
            MetadataModification::Remove { .. } => None,
        }
    }

    fn schema(&self) -> Schema {
        let key = self.key().as_bytes();
        let value = self.value().unwrap_or("").as_bytes();
        Schema::new()
            .u32("size", (4 + 1 + 1 + 2 + key.len() + value.len()) as u32)
            .u8("modificationType", self.modification_type().value())
            .u8("keySize", key.len() as u8)
            .u16("valueSize", value.len() as u16)
            .bytes("key", key)
            .bytes("value", value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMetadata {
    target: MetadataTarget,
    modifications: Vec<MetadataModification>,
}

impl ModifyMetadata {
    pub fn target(&self) -> &MetadataTarget {
        &self.target
    }

    pub fn modifications(&self) -> &[MetadataModification] {
        &self.modifications
    }

    pub fn entity_type(&self) -> EntityType {
        self.target.entity_type()
    }

    pub(crate) fn schema(&self) -> Schema {
        let schema = Schema::new().u8("metadataType", self.target.metadata_type());
        let schema = match &self.target {
            MetadataTarget::Address(address) => schema.fixed("metadataId", address.as_bytes(), ADDRESS_SIZE),
            MetadataTarget::Mosaic(id) => schema.u64("metadataId", id.id()),
            MetadataTarget::Namespace(id) => schema.u64("metadataId", id.id()),
        };
        schema.table("modifications", self.modifications.iter().map(MetadataModification::schema).collect())
    }
}

/// Exactly one target setter must be called before [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ModifyMetadataBuilder {
    address: Option<Address>,
    mosaic_id: Option<MosaicId>,
    namespace_id: Option<NamespaceId>,
    modifications: Vec<MetadataModification>,
}

impl ModifyMetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn set_mosaic_id(mut self, mosaic_id: MosaicId) -> Self {
        self.mosaic_id = Some(mosaic_id);
        self
    }

    pub fn set_namespace_id(mut self, namespace_id: NamespaceId) -> Self {
        self.namespace_id = Some(namespace_id);
        self
    }

    pub fn set_target(self, target: MetadataTarget) -> Self {
        match target {
            MetadataTarget::Address(a) => self.set_address(a),
            MetadataTarget::Mosaic(m) => self.set_mosaic_id(m),
            MetadataTarget::Namespace(n) => self.set_namespace_id(n),
        }
    }

    pub fn add_modification(mut self, modification: MetadataModification) -> Self {
        self.modifications.push(modification);
        self
    }

    pub fn build(self) -> Result<ModifyMetadata, TxError> {
        let target = match (self.address, self.mosaic_id, self.namespace_id) {
            (Some(a), None, None) => MetadataTarget::Address(a),
            (None, Some(m), None) => MetadataTarget::Mosaic(m),
            (None, None, Some(n)) => MetadataTarget::Namespace(n),
            (None, None, None) => return Err(TxError::Invalid("metadata modification needs a target".into())),
            _ => return Err(TxError::Invalid("metadata modification has more than one target".into())),
        };
        for m in &self.modifications {
            if m.key().len() > u8::MAX as usize {
                return Err(TxError::Invalid(format!("metadata key too long: {} bytes", m.key().len())));
            }
            if m.value().map_or(0, str::len) > u16::MAX as usize {
                return Err(TxError::Invalid("metadata value too long".into()));
            }
        }
        Ok(ModifyMetadata { target, modifications: self.modifications })
    }
}
