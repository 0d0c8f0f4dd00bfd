//! Core types and constants for the Sirius blockchain client.
//!
//! This crate provides the foundational types used across all sirius crates:
//! network and entity type tables, the UInt64 word-pair codec, base32 address
//! encoding, public accounts, mosaic and namespace identifiers, deadlines,
//! and the client configuration.

pub mod account;
pub mod address;
pub mod base32;
pub mod config;
pub mod constants;
pub mod deadline;
pub mod mosaic;
pub mod namespace;
pub mod uint64;

mod digest;

pub use account::PublicAccount;
pub use address::{Address, AddressError};
pub use config::{ClientConfig, ConfigError};
pub use constants::{EntityType, NetworkType};
pub use deadline::Deadline;
pub use mosaic::{Mosaic, MosaicId, MosaicNonce, MosaicProperties};
pub use namespace::{NamespaceId, NamespaceType};
pub use uint64::IdError;

/// Any failure raised by this crate.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown network type: {0}")]
    UnknownNetwork(String),
}
