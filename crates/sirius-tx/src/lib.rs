//! Sirius transaction model, wire codec and signing.
//!
//! Transactions are immutable values: a [`TransactionBuilder`] produces an
//! unsigned [`Transaction`] from a validated [`TransactionBody`], the
//! [`schema`] serializer turns it into the catbuffer wire layout, and
//! [`sign`] hashes and signs the payload against a network generation hash.
//! Inbound JSON from the REST and push APIs is decoded by [`json::from_json`].

pub mod builder;
pub mod json;
pub mod message;
pub mod schema;
pub mod sign;
pub mod transaction;

pub use builder::TransactionBuilder;
pub use message::{Message, MessageType};
pub use sign::{
    create_transaction_hash, verify_transaction, CosignatureSignedTransaction, CosignatureTransaction,
    SignedTransaction,
};
pub use transaction::{Signer, Transaction, TransactionBody, TransactionInfo};

use sirius_crypto::CryptoError;
use sirius_types::{AddressError, IdError, TypesError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid transaction: {0}")]
    Invalid(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("unsupported entity type: {0:#x}")]
    UnsupportedType(u64),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Types(#[from] TypesError),
}

impl From<AddressError> for TxError {
    fn from(e: AddressError) -> Self {
        TxError::Types(TypesError::Address(e))
    }
}

impl From<IdError> for TxError {
    fn from(e: IdError) -> Self {
        TxError::Types(TypesError::Id(e))
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Decode a hex string into a fixed-size array.
pub(crate) fn decode_fixed<const N: usize>(field: &str, s: &str) -> Result<[u8; N], TxError> {
    let raw = hex::decode(s).map_err(|e| TxError::Decode(format!("{field}: {e}")))?;
    raw.as_slice()
        .try_into()
        .map_err(|_| TxError::Decode(format!("{field}: expected {N} bytes, got {}", raw.len())))
}
