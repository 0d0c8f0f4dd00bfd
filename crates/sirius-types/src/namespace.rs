//! Namespace identifiers.
//!
//! A namespace id is the first 8 bytes (little-endian) of
//! SHA3-256(parent id LE ‖ name), with the high bit set. Root namespaces use
//! parent id 0. Dotted paths ("a.b.c") hash one level at a time.

use crate::digest::sha3_256;
use crate::uint64::{self, IdError};

/// Highest bit marks an id as a namespace id.
pub const NAMESPACE_FLAG: u64 = 1 << 63;

/// Maximum depth of a namespace path.
pub const MAX_NAMESPACE_DEPTH: usize = 3;

/// Id of the child `name` under `parent_id` (0 for a root namespace).
pub fn generate_id(name: &str, parent_id: u64) -> u64 {
    let hash = sha3_256(&[&parent_id.to_le_bytes()[..], name.as_bytes()]);
    let mut low = [0u8; 8];
    low.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(low) | NAMESPACE_FLAG
}

fn is_valid_part(part: &str) -> bool {
    let mut bytes = part.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_lowercase() || b.is_ascii_digit() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

/// Ids of every level in a dotted namespace path, root first.
pub fn namespace_path(name: &str) -> Result<Vec<u64>, IdError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > MAX_NAMESPACE_DEPTH {
        return Err(IdError::TooDeep(name.to_string()));
    }

    let mut path = Vec::with_capacity(parts.len());
    let mut parent = 0u64;
    for part in parts {
        if !is_valid_part(part) {
            return Err(IdError::InvalidName(name.to_string()));
        }
        parent = generate_id(part, parent);
        path.push(parent);
    }
    Ok(path)
}

/// Root (0) or child (1) namespace registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceType {
    Root,
    Sub,
}

impl NamespaceType {
    pub fn value(self) -> u8 {
        match self {
            Self::Root => 0,
            Self::Sub => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Root),
            1 => Some(Self::Sub),
            _ => None,
        }
    }
}

/// A namespace id, optionally remembering the name it was derived from.
///
/// Two ids compare equal when their numeric values match, whatever the name.
#[derive(Debug, Clone)]
pub struct NamespaceId {
    id: u64,
    full_name: Option<String>,
}

impl NamespaceId {
    pub fn new(id: u64) -> Self {
        Self { id, full_name: None }
    }

    /// Parse a 16-character hex id.
    pub fn from_hex(s: &str) -> Result<Self, IdError> {
        Ok(Self::new(uint64::from_hex(s)?))
    }

    /// Derive the id of a dotted namespace path such as `prx.xpx`.
    pub fn from_name(name: &str) -> Result<Self, IdError> {
        let path = namespace_path(name)?;
        let id = path.last().copied().ok_or_else(|| IdError::InvalidName(name.to_string()))?;
        Ok(Self { id, full_name: Some(name.to_string()) })
    }

    /// Derive the id of `name` directly under `parent`.
    pub fn from_parent(name: &str, parent: &NamespaceId) -> Result<Self, IdError> {
        if !is_valid_part(name) {
            return Err(IdError::InvalidName(name.to_string()));
        }
        let full_name = parent.full_name.as_ref().map(|p| format!("{}.{}", p, name));
        Ok(Self { id: generate_id(name, parent.id), full_name })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn to_hex(&self) -> String {
        uint64::to_hex(self.id)
    }

    pub fn to_pair(&self) -> [u32; 2] {
        uint64::to_pair(self.id)
    }
}

impl PartialEq for NamespaceId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NamespaceId {}

impl std::hash::Hash for NamespaceId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.full_name {
            Some(name) => write!(f, "{} ({})", name, self.to_hex()),
            None => f.write_str(&self.to_hex()),
        }
    }
}
