//! Namespace registration and alias transactions.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::{EntityType, ADDRESS_SIZE};
use sirius_types::namespace::generate_id;
use sirius_types::{Address, MosaicId, NamespaceId, NamespaceType};

// ─── Registration ───────────────────────────────────────────────────────────

/// A root namespace is leased for a duration; a child hangs off its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceRegistration {
    Root { duration: u64 },
    Sub { parent_id: NamespaceId },
}

impl NamespaceRegistration {
    pub fn namespace_type(&self) -> NamespaceType {
        match self {
            NamespaceRegistration::Root { .. } => NamespaceType::Root,
            NamespaceRegistration::Sub { .. } => NamespaceType::Sub,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNamespace {
    name: String,
    namespace_id: NamespaceId,
    registration: NamespaceRegistration,
}

impl RegisterNamespace {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    pub fn registration(&self) -> &NamespaceRegistration {
        &self.registration
    }

    pub fn namespace_type(&self) -> NamespaceType {
        self.registration.namespace_type()
    }

    pub(crate) fn schema(&self) -> Schema {
        let duration_or_parent = match &self.registration {
            NamespaceRegistration::Root { duration } => *duration,
            NamespaceRegistration::Sub { parent_id } => parent_id.id(),
        };
        Schema::new()
            .u8("namespaceType", self.namespace_type().value())
            .u64("durationParentId", duration_or_parent)
            .u64("namespaceId", self.namespace_id.id())
            .u8("namespaceNameSize", self.name.len() as u8)
            .bytes("name", self.name.as_bytes())
    }
}

/// Exactly one of [`set_duration`](Self::set_duration) (root) and
/// [`set_parent_id`](Self::set_parent_id) (child) must be called.
#[derive(Debug, Clone, Default)]
pub struct RegisterNamespaceBuilder {
    name: Option<String>,
    namespace_id: Option<NamespaceId>,
    duration: Option<u64>,
    parent_id: Option<NamespaceId>,
}

impl RegisterNamespaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn set_duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn set_parent_id(mut self, parent_id: NamespaceId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Use a known id instead of deriving it from the name.
    pub fn set_namespace_id(mut self, namespace_id: NamespaceId) -> Self {
        self.namespace_id = Some(namespace_id);
        self
    }

    pub fn build(self) -> Result<RegisterNamespace, TxError> {
        let name = self
            .name
            .ok_or_else(|| TxError::Invalid("namespace registration requires a name".into()))?;
        if name.is_empty() || name.len() > u8::MAX as usize || name.contains('.') {
            return Err(TxError::Invalid(format!("invalid namespace name {name:?}")));
        }

        let registration = match (self.duration, self.parent_id) {
            (Some(duration), None) => NamespaceRegistration::Root { duration },
            (None, Some(parent_id)) => NamespaceRegistration::Sub { parent_id },
            (Some(_), Some(_)) => {
                return Err(TxError::Invalid("namespace has both a duration and a parent id".into()))
            }
            (None, None) => {
                return Err(TxError::Invalid("namespace needs a duration or a parent id".into()))
            }
        };

        let namespace_id = match self.namespace_id {
            Some(id) => id,
            None => match &registration {
                NamespaceRegistration::Root { .. } => NamespaceId::from_name(&name)?,
                NamespaceRegistration::Sub { parent_id } => NamespaceId::from_parent(&name, parent_id)?,
            },
        };
        Ok(RegisterNamespace { name, namespace_id, registration })
    }
}

// ─── Alias ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasAction {
    Link,
    Unlink,
}

impl AliasAction {
    pub fn value(self) -> u8 {
        match self {
            AliasAction::Link => 0,
            AliasAction::Unlink => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(AliasAction::Link),
            1 => Some(AliasAction::Unlink),
            _ => None,
        }
    }
}

/// What a namespace alias points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasTarget {
    Address(Address),
    Mosaic(MosaicId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    action: AliasAction,
    namespace_id: NamespaceId,
    target: AliasTarget,
}

impl Alias {
    pub fn new(action: AliasAction, namespace_id: NamespaceId, target: AliasTarget) -> Self {
        Self { action, namespace_id, target }
    }

    pub fn action(&self) -> AliasAction {
        self.action
    }

    pub fn namespace_id(&self) -> &NamespaceId {
        &self.namespace_id
    }

    pub fn target(&self) -> &AliasTarget {
        &self.target
    }

    pub fn entity_type(&self) -> EntityType {
        match self.target {
            AliasTarget::Address(_) => EntityType::AddressAlias,
            AliasTarget::Mosaic(_) => EntityType::MosaicAlias,
        }
    }

    pub(crate) fn schema(&self) -> Schema {
        let schema = Schema::new()
            .u8("aliasAction", self.action.value())
            .u64("namespaceId", self.namespace_id.id());
        match &self.target {
            AliasTarget::Address(address) => schema.fixed("address", address.as_bytes(), ADDRESS_SIZE),
            AliasTarget::Mosaic(mosaic_id) => schema.u64("mosaicId", mosaic_id.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_namespace_id_derived() {
        let tx = RegisterNamespaceBuilder::new().set_name("prx").set_duration(1000).build().unwrap();
        assert_eq!(tx.namespace_id().id(), 0xb16d77fd8b6fb3be);
        assert_eq!(tx.namespace_type(), NamespaceType::Root);
    }

    #[test]
    fn test_sub_namespace_id_derived() {
        let parent = NamespaceId::from_name("prx").unwrap();
        let tx = RegisterNamespaceBuilder::new().set_name("xpx").set_parent_id(parent).build().unwrap();
        assert_eq!(tx.namespace_id().id(), 0xbffb42a19116bdf6);
        assert_eq!(tx.namespace_id().full_name(), Some("prx.xpx"));
    }

    #[test]
    fn test_duration_and_parent_are_exclusive() {
        let both = RegisterNamespaceBuilder::new()
            .set_name("xpx")
            .set_duration(10)
            .set_parent_id(NamespaceId::new(1))
            .build();
        assert!(matches!(both, Err(TxError::Invalid(_))));
        let neither = RegisterNamespaceBuilder::new().set_name("xpx").build();
        assert!(matches!(neither, Err(TxError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_names() {
        for name in ["", "a.b", "Upper", "-dash"] {
            assert!(RegisterNamespaceBuilder::new().set_name(name).set_duration(1).build().is_err());
        }
    }

    #[test]
    fn test_register_layout() {
        let tx = RegisterNamespaceBuilder::new().set_name("nem").set_duration(0x0102).build().unwrap();
        let bytes = tx.schema().to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 8 + 8 + 1 + 3);
        assert_eq!(bytes[0], 0);
        assert_eq!(&bytes[1..9], &0x0102u64.to_le_bytes());
        assert_eq!(&bytes[9..17], &0x84b3552d375ffa4bu64.to_le_bytes());
        assert_eq!(bytes[17], 3);
        assert_eq!(&bytes[18..], b"nem");
    }

    #[test]
    fn test_alias_entity_type_follows_target() {
        let ns = NamespaceId::new(0xd525ad41d95fcf29);
        let mosaic = Alias::new(AliasAction::Link, ns.clone(), AliasTarget::Mosaic(MosaicId::new(7)));
        assert_eq!(mosaic.entity_type(), EntityType::MosaicAlias);
        assert_eq!(mosaic.schema().size(), 1 + 8 + 8);

        let address = Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap();
        let alias = Alias::new(AliasAction::Unlink, ns, AliasTarget::Address(address));
        assert_eq!(alias.entity_type(), EntityType::AddressAlias);
        assert_eq!(alias.schema().to_bytes().unwrap()[0], 1);
        assert_eq!(alias.schema().size(), 1 + 8 + 25);
    }
}
