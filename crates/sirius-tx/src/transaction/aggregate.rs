//! Aggregate transactions.
//!
//! The body is `payloadSize u32` followed by one block per inner
//! transaction (embedded header plus body), each zero-padded to an 8-byte
//! boundary, then any cosignatures as `signer (32) ‖ signature (64)`.

use crate::schema::{padding, Schema};
use crate::transaction::Transaction;
use crate::TxError;
use sirius_types::constants::{EntityType, EMBEDDED_ALIGNMENT, KEY_SIZE, SIGNATURE_SIZE};
use sirius_types::PublicAccount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    /// All required signatures are present at announcement.
    Complete,
    /// Cosignatures are collected on the network after announcement.
    Bonded,
}

impl AggregateKind {
    pub fn entity_type(self) -> EntityType {
        match self {
            AggregateKind::Complete => EntityType::AggregateComplete,
            AggregateKind::Bonded => EntityType::AggregateBonded,
        }
    }
}

/// One cosignatory's signature over the aggregate hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cosignature {
    pub signer: PublicAccount,
    pub signature: [u8; SIGNATURE_SIZE],
}

impl Cosignature {
    pub fn new(signer: PublicAccount, signature: [u8; SIGNATURE_SIZE]) -> Self {
        Self { signer, signature }
    }

    pub fn signature_hex(&self) -> String {
        hex::encode_upper(self.signature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    kind: AggregateKind,
    inner: Vec<Transaction>,
    cosignatures: Vec<Cosignature>,
}

impl Aggregate {
    /// Every inner transaction must already be attributed to a signer
    /// (see [`Transaction::to_aggregate`]) and must not itself be an aggregate.
    pub fn new(kind: AggregateKind, inner: Vec<Transaction>) -> Result<Self, TxError> {
        Self::with_cosignatures(kind, inner, Vec::new())
    }

    pub(crate) fn with_cosignatures(
        kind: AggregateKind,
        inner: Vec<Transaction>,
        cosignatures: Vec<Cosignature>,
    ) -> Result<Self, TxError> {
        for (i, tx) in inner.iter().enumerate() {
            if tx.entity_type().is_aggregate() {
                return Err(TxError::Invalid(format!("inner transaction {i} is an aggregate")));
            }
            if tx.signer().is_none() {
                return Err(TxError::Invalid(format!("inner transaction {i} has no signer")));
            }
        }
        Ok(Self { kind, inner, cosignatures })
    }

    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    pub fn inner_transactions(&self) -> &[Transaction] {
        &self.inner
    }

    pub fn cosignatures(&self) -> &[Cosignature] {
        &self.cosignatures
    }

    pub fn cosigned_by(&self, account: &PublicAccount) -> bool {
        self.cosignatures.iter().any(|c| c.signer.public_key() == account.public_key())
    }

    /// Byte length of the inner transaction blocks, padding included.
    pub fn payload_size(&self) -> usize {
        self.blocks().iter().map(Schema::size).sum()
    }

    fn blocks(&self) -> Vec<Schema> {
        self.inner
            .iter()
            .map(|tx| {
                let block = tx.embedded_schema();
                let pad = padding(block.size(), EMBEDDED_ALIGNMENT);
                block.bytes("padding", &vec![0u8; pad])
            })
            .collect()
    }

    pub(crate) fn schema(&self) -> Schema {
        let blocks = self.blocks();
        let payload_size: usize = blocks.iter().map(Schema::size).sum();
        let cosignatures = self
            .cosignatures
            .iter()
            .map(|c| {
                Schema::new()
                    .fixed("signer", c.signer.public_key(), KEY_SIZE)
                    .fixed("signature", &c.signature, SIGNATURE_SIZE)
            })
            .collect();
        Schema::new()
            .u32("payloadSize", payload_size as u32)
            .table("transactions", blocks)
            .table("cosignatures", cosignatures)
    }
}
