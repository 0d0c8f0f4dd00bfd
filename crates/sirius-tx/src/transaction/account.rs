//! Account link and account property (restriction) transactions.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::{EntityType, ADDRESS_SIZE, KEY_SIZE};
use sirius_types::{Address, MosaicId, PublicAccount};

// ─── Account Link ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountLinkAction {
    Link,
    Unlink,
}

impl AccountLinkAction {
    pub fn value(self) -> u8 {
        match self {
            AccountLinkAction::Link => 0,
            AccountLinkAction::Unlink => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(AccountLinkAction::Link),
            1 => Some(AccountLinkAction::Unlink),
            _ => None,
        }
    }
}

/// Delegates harvesting to a remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLink {
    remote_account: PublicAccount,
    action: AccountLinkAction,
}

impl AccountLink {
    pub fn new(remote_account: PublicAccount, action: AccountLinkAction) -> Self {
        Self { remote_account, action }
    }

    pub fn remote_account(&self) -> &PublicAccount {
        &self.remote_account
    }

    pub fn action(&self) -> AccountLinkAction {
        self.action
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .fixed("remoteAccountKey", self.remote_account.public_key(), KEY_SIZE)
            .u8("linkAction", self.action.value())
    }
}

// ─── Account Properties ─────────────────────────────────────────────────────

/// Whether listed values are the only ones allowed, or the ones blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyRule {
    Allow,
    Block,
}

const BLOCK_FLAG: u8 = 0x80;

/// What a property restricts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Address,
    Mosaic,
    EntityType,
}

impl PropertyKind {
    pub fn value(self) -> u8 {
        match self {
            PropertyKind::Address => 0x01,
            PropertyKind::Mosaic => 0x02,
            PropertyKind::EntityType => 0x04,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x01 => Some(PropertyKind::Address),
            0x02 => Some(PropertyKind::Mosaic),
            0x04 => Some(PropertyKind::EntityType),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyModificationType {
    Add,
    Remove,
}

impl PropertyModificationType {
    pub fn value(self) -> u8 {
        match self {
            PropertyModificationType::Add => 0,
            PropertyModificationType::Remove => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(PropertyModificationType::Add),
            1 => Some(PropertyModificationType::Remove),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyModification<T> {
    pub modification_type: PropertyModificationType,
    pub value: T,
}

impl<T> PropertyModification<T> {
    pub fn new(modification_type: PropertyModificationType, value: T) -> Self {
        Self { modification_type, value }
    }
}

/// Modifications of one property kind. The kind decides the entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyModifications {
    Address(Vec<PropertyModification<Address>>),
    Mosaic(Vec<PropertyModification<MosaicId>>),
    EntityType(Vec<PropertyModification<EntityType>>),
}

impl PropertyModifications {
    fn len(&self) -> usize {
        match self {
            PropertyModifications::Address(m) => m.len(),
            PropertyModifications::Mosaic(m) => m.len(),
            PropertyModifications::EntityType(m) => m.len(),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyModifications::Address(_) => PropertyKind::Address,
            PropertyModifications::Mosaic(_) => PropertyKind::Mosaic,
            PropertyModifications::EntityType(_) => PropertyKind::EntityType,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProperties {
    rule: PropertyRule,
    modifications: PropertyModifications,
}

impl AccountProperties {
    pub fn new(rule: PropertyRule, modifications: PropertyModifications) -> Result<Self, TxError> {
        if modifications.len() > u8::MAX as usize {
            return Err(TxError::Invalid(format!("too many property modifications: {}", modifications.len())));
        }
        Ok(Self { rule, modifications })
    }

    pub fn rule(&self) -> PropertyRule {
        self.rule
    }

    pub fn modifications(&self) -> &PropertyModifications {
        &self.modifications
    }

    /// Wire property type: kind bit, plus 0x80 for block rules.
    pub fn property_type(&self) -> u8 {
        match self.rule {
            PropertyRule::Allow => self.modifications.kind().value(),
            PropertyRule::Block => self.modifications.kind().value() | BLOCK_FLAG,
        }
    }

    /// Split a wire property type into its rule and kind.
    pub fn parse_property_type(value: u8) -> Option<(PropertyRule, PropertyKind)> {
        let rule = if value & BLOCK_FLAG != 0 { PropertyRule::Block } else { PropertyRule::Allow };
        PropertyKind::from_u8(value & !BLOCK_FLAG).map(|kind| (rule, kind))
    }

    pub fn entity_type(&self) -> EntityType {
        match self.modifications {
            PropertyModifications::Address(_) => EntityType::AccountPropertiesAddress,
            PropertyModifications::Mosaic(_) => EntityType::AccountPropertiesMosaic,
            PropertyModifications::EntityType(_) => EntityType::AccountPropertiesEntityType,
        }
    }

    pub(crate) fn schema(&self) -> Schema {
        let rows: Vec<Schema> = match &self.modifications {
            PropertyModifications::Address(mods) => mods
                .iter()
                .map(|m| {
                    Schema::new()
                        .u8("modificationType", m.modification_type.value())
                        .fixed("value", m.value.as_bytes(), ADDRESS_SIZE)
                })
                .collect(),
            PropertyModifications::Mosaic(mods) => mods
                .iter()
                .map(|m| Schema::new().u8("modificationType", m.modification_type.value()).u64("value", m.value.id()))
                .collect(),
            PropertyModifications::EntityType(mods) => mods
                .iter()
                .map(|m| Schema::new().u8("modificationType", m.modification_type.value()).u16("value", m.value.code()))
                .collect(),
        };
        Schema::new()
            .u8("propertyType", self.property_type())
            .u8("modificationsCount", self.modifications.len() as u8)
            .table("modifications", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirius_types::NetworkType;

    #[test]
    fn test_property_type_codes() {
        let allow_address = AccountProperties::new(PropertyRule::Allow, PropertyModifications::Address(Vec::new())).unwrap();
        assert_eq!(allow_address.property_type(), 0x01);
        let block_mosaic = AccountProperties::new(PropertyRule::Block, PropertyModifications::Mosaic(Vec::new())).unwrap();
        assert_eq!(block_mosaic.property_type(), 0x82);
        assert_eq!(block_mosaic.entity_type(), EntityType::AccountPropertiesMosaic);
        let block_types =
            AccountProperties::new(PropertyRule::Block, PropertyModifications::EntityType(Vec::new())).unwrap();
        assert_eq!(block_types.property_type(), 0x84);
    }

    #[test]
    fn test_parse_property_type() {
        assert_eq!(AccountProperties::parse_property_type(0x81), Some((PropertyRule::Block, PropertyKind::Address)));
        assert_eq!(AccountProperties::parse_property_type(0x04), Some((PropertyRule::Allow, PropertyKind::EntityType)));
        assert_eq!(AccountProperties::parse_property_type(0x05), None);
        assert_eq!(AccountProperties::parse_property_type(0x00), None);
    }

    #[test]
    fn test_entity_type_rows() {
        let tx = AccountProperties::new(
            PropertyRule::Allow,
            PropertyModifications::EntityType(vec![PropertyModification::new(
                PropertyModificationType::Remove,
                EntityType::Transfer,
            )]),
        )
        .unwrap();
        assert_eq!(hex::encode(tx.schema().to_bytes().unwrap()), "0401015441");
    }

    #[test]
    fn test_account_link_layout() {
        let remote = PublicAccount::new([5; 32], NetworkType::MijinTest);
        let bytes = AccountLink::new(remote, AccountLinkAction::Unlink).schema().to_bytes().unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[32], 1);
    }
}
