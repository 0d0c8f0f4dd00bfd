//! Schema-driven binary serializer.
//!
//! A [`Schema`] is an ordered list of named fields. Scalars are written
//! little-endian, byte fields are written raw with no implicit length prefix,
//! and tables are written row by row in insertion order. Nothing is sorted.
//!
//! Fixed-width fields carry their declared width, so [`Schema::size`] is
//! known even when a required value is absent. Writing such a schema fails
//! with the name of the missing field instead of producing a short buffer.

use crate::TxError;
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Wire {
    U8(u8),
    I8(i8),
    U16(u16),
    U32(u32),
    U64(u64),
    Fixed { bytes: Vec<u8>, len: usize },
    Bytes(Vec<u8>),
    Table(Vec<Schema>),
    Missing(usize),
}

impl Wire {
    fn size(&self) -> usize {
        match self {
            Wire::U8(_) | Wire::I8(_) => 1,
            Wire::U16(_) => 2,
            Wire::U32(_) => 4,
            Wire::U64(_) => 8,
            Wire::Fixed { len, .. } => *len,
            Wire::Bytes(b) => b.len(),
            Wire::Table(rows) => rows.iter().map(Schema::size).sum(),
            Wire::Missing(len) => *len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    name: &'static str,
    wire: Wire,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: &'static str, wire: Wire) -> Self {
        self.fields.push(Field { name, wire });
        self
    }

    pub fn u8(self, name: &'static str, value: u8) -> Self {
        self.push(name, Wire::U8(value))
    }

    pub fn i8(self, name: &'static str, value: i8) -> Self {
        self.push(name, Wire::I8(value))
    }

    pub fn u16(self, name: &'static str, value: u16) -> Self {
        self.push(name, Wire::U16(value))
    }

    pub fn u32(self, name: &'static str, value: u32) -> Self {
        self.push(name, Wire::U32(value))
    }

    pub fn u64(self, name: &'static str, value: u64) -> Self {
        self.push(name, Wire::U64(value))
    }

    /// Fixed-width byte field. A value of the wrong width fails at write time.
    pub fn fixed(self, name: &'static str, bytes: &[u8], len: usize) -> Self {
        self.push(name, Wire::Fixed { bytes: bytes.to_vec(), len })
    }

    /// Fixed-width field that must be present when the schema is written.
    pub fn required(self, name: &'static str, bytes: Option<&[u8]>, len: usize) -> Self {
        match bytes {
            Some(b) => self.fixed(name, b, len),
            None => self.push(name, Wire::Missing(len)),
        }
    }

    /// Variable-length bytes. Any length prefix is a separate field.
    pub fn bytes(self, name: &'static str, bytes: &[u8]) -> Self {
        self.push(name, Wire::Bytes(bytes.to_vec()))
    }

    pub fn table(self, name: &'static str, rows: Vec<Schema>) -> Self {
        self.push(name, Wire::Table(rows))
    }

    /// Append all fields of `other`.
    pub fn extend(mut self, other: Schema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn size(&self) -> usize {
        self.fields.iter().map(|f| f.wire.size()).sum()
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), TxError> {
        for field in &self.fields {
            match &field.wire {
                Wire::U8(v) => out.push(*v),
                Wire::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
                Wire::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
                Wire::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
                Wire::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
                Wire::Fixed { bytes, len } => {
                    if bytes.len() != *len {
                        return Err(TxError::Serialize(format!(
                            "field {} must be {} bytes, got {}",
                            field.name,
                            len,
                            bytes.len()
                        )));
                    }
                    out.extend_from_slice(bytes);
                }
                Wire::Bytes(bytes) => out.extend_from_slice(bytes),
                Wire::Table(rows) => {
                    for row in rows {
                        row.write_to(out)?;
                    }
                }
                Wire::Missing(_) => {
                    return Err(TxError::Serialize(format!("missing required field {}", field.name)));
                }
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TxError> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out)?;
        trace!("serialized {} fields into {} bytes", self.fields.len(), out.len());
        Ok(out)
    }
}

/// Zero bytes needed after a block of `size` bytes so the next block starts
/// on an `alignment` boundary.
pub fn padding(size: usize, alignment: usize) -> usize {
    (alignment - size % alignment) % alignment
}
