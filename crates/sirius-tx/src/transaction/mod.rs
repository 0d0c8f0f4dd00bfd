//! The transaction value type.
//!
//! A [`Transaction`] is a common header (network, version, deadline, fee,
//! signer state, confirmation info) plus a [`TransactionBody`] with one
//! variant per on-chain operation. The entity type is derived from the body,
//! so the two can never disagree.
//!
//! Wire layout of a standalone transaction:
//!
//! ```text
//! size u32 | signature [64] | signer [32] | version u32 | type u16 | maxFee u64 | deadline u64 | body
//! ```
//!
//! Inside an aggregate the header shrinks to `size | signer | version | type`.

pub mod account;
pub mod aggregate;
pub mod exchange;
pub mod lock;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod network;
pub mod transfer;

pub use account::{
    AccountLink, AccountLinkAction, AccountProperties, PropertyKind, PropertyModification,
    PropertyModificationType, PropertyModifications, PropertyRule,
};
pub use aggregate::{Aggregate, AggregateKind, Cosignature};
pub use exchange::{
    AddExchangeOffer, ExchangeOffer, ExchangeOfferAdd, ExchangeOfferItem, ExchangeOfferRemove,
    ExchangeOfferType, RemoveExchangeOffer,
};
pub use lock::{HashType, LockFunds, SecretLock, SecretProof};
pub use metadata::{
    MetadataModification, MetadataModificationType, MetadataTarget, ModifyMetadata, ModifyMetadataBuilder,
};
pub use mosaic::{MosaicDefinition, MosaicDefinitionBuilder, MosaicSupplyChange, MosaicSupplyType};
pub use multisig::{CosignatoryModification, ModificationType, ModifyContract, ModifyMultisigAccount};
pub use namespace::{Alias, AliasAction, AliasTarget, NamespaceRegistration, RegisterNamespace, RegisterNamespaceBuilder};
pub use network::{BlockchainConfig, BlockchainUpgrade, BlockchainVersion};
pub use transfer::{Recipient, Transfer, TransferBuilder};

use crate::schema::Schema;
use crate::TxError;
use log::trace;
use sirius_types::constants::{EntityType, EMBEDDED_HEADER_SIZE, HEADER_SIZE, KEY_SIZE, SIGNATURE_SIZE};
use sirius_types::{Deadline, NetworkType, PublicAccount};

// ─── Signer ─────────────────────────────────────────────────────────────────

/// Who a transaction belongs to. A signature never exists without its signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signer {
    Unsigned,
    /// Attributed to an account but not signed, as inner transactions are
    /// before aggregation.
    Attributed(PublicAccount),
    Signed {
        signer: PublicAccount,
        signature: [u8; SIGNATURE_SIZE],
    },
}

impl Signer {
    pub fn account(&self) -> Option<&PublicAccount> {
        match self {
            Signer::Unsigned => None,
            Signer::Attributed(account) | Signer::Signed { signer: account, .. } => Some(account),
        }
    }

    pub fn signature(&self) -> Option<&[u8; SIGNATURE_SIZE]> {
        match self {
            Signer::Signed { signature, .. } => Some(signature),
            Signer::Unsigned | Signer::Attributed(_) => None,
        }
    }
}

// ─── Transaction Info ───────────────────────────────────────────────────────

/// Confirmation metadata reported by the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionInfo {
    /// A top-level transaction.
    Standalone {
        height: u64,
        index: u32,
        id: String,
        hash: String,
        merkle_component_hash: String,
    },
    /// A transaction embedded in an aggregate.
    AggregateInner {
        height: u64,
        index: u32,
        id: String,
        aggregate_hash: String,
        aggregate_id: String,
    },
    /// Older gateways report only the height and hashes.
    Legacy {
        height: u64,
        hash: Option<String>,
        merkle_component_hash: Option<String>,
    },
}

impl TransactionInfo {
    pub fn height(&self) -> u64 {
        match self {
            TransactionInfo::Standalone { height, .. }
            | TransactionInfo::AggregateInner { height, .. }
            | TransactionInfo::Legacy { height, .. } => *height,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match self {
            TransactionInfo::Standalone { index, .. } | TransactionInfo::AggregateInner { index, .. } => Some(*index),
            TransactionInfo::Legacy { .. } => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            TransactionInfo::Standalone { id, .. } | TransactionInfo::AggregateInner { id, .. } => Some(id),
            TransactionInfo::Legacy { .. } => None,
        }
    }

    pub fn hash(&self) -> Option<&str> {
        match self {
            TransactionInfo::Standalone { hash, .. } => Some(hash),
            TransactionInfo::Legacy { hash, .. } => hash.as_deref(),
            TransactionInfo::AggregateInner { .. } => None,
        }
    }

    pub fn merkle_component_hash(&self) -> Option<&str> {
        match self {
            TransactionInfo::Standalone { merkle_component_hash, .. } => Some(merkle_component_hash),
            TransactionInfo::Legacy { merkle_component_hash, .. } => merkle_component_hash.as_deref(),
            TransactionInfo::AggregateInner { .. } => None,
        }
    }

    pub fn aggregate_hash(&self) -> Option<&str> {
        match self {
            TransactionInfo::AggregateInner { aggregate_hash, .. } => Some(aggregate_hash),
            TransactionInfo::Standalone { .. } | TransactionInfo::Legacy { .. } => None,
        }
    }

    pub fn aggregate_id(&self) -> Option<&str> {
        match self {
            TransactionInfo::AggregateInner { aggregate_id, .. } => Some(aggregate_id),
            TransactionInfo::Standalone { .. } | TransactionInfo::Legacy { .. } => None,
        }
    }
}

// ─── Body ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(Transfer),
    RegisterNamespace(RegisterNamespace),
    MosaicDefinition(MosaicDefinition),
    MosaicSupplyChange(MosaicSupplyChange),
    Alias(Alias),
    ModifyMultisigAccount(ModifyMultisigAccount),
    Aggregate(Aggregate),
    LockFunds(LockFunds),
    SecretLock(SecretLock),
    SecretProof(SecretProof),
    AccountLink(AccountLink),
    ModifyMetadata(ModifyMetadata),
    AccountProperties(AccountProperties),
    ModifyContract(ModifyContract),
    BlockchainUpgrade(BlockchainUpgrade),
    BlockchainConfig(BlockchainConfig),
    ExchangeOfferAdd(ExchangeOfferAdd),
    ExchangeOffer(ExchangeOffer),
    ExchangeOfferRemove(ExchangeOfferRemove),
}

impl TransactionBody {
    pub fn entity_type(&self) -> EntityType {
        match self {
            TransactionBody::Transfer(_) => EntityType::Transfer,
            TransactionBody::RegisterNamespace(_) => EntityType::RegisterNamespace,
            TransactionBody::MosaicDefinition(_) => EntityType::MosaicDefinition,
            TransactionBody::MosaicSupplyChange(_) => EntityType::MosaicSupplyChange,
            TransactionBody::Alias(b) => b.entity_type(),
            TransactionBody::ModifyMultisigAccount(_) => EntityType::ModifyMultisigAccount,
            TransactionBody::Aggregate(b) => b.kind().entity_type(),
            TransactionBody::LockFunds(_) => EntityType::Lock,
            TransactionBody::SecretLock(_) => EntityType::SecretLock,
            TransactionBody::SecretProof(_) => EntityType::SecretProof,
            TransactionBody::AccountLink(_) => EntityType::AccountLink,
            TransactionBody::ModifyMetadata(b) => b.entity_type(),
            TransactionBody::AccountProperties(b) => b.entity_type(),
            TransactionBody::ModifyContract(_) => EntityType::ModifyContract,
            TransactionBody::BlockchainUpgrade(_) => EntityType::BlockchainUpgrade,
            TransactionBody::BlockchainConfig(_) => EntityType::BlockchainConfig,
            TransactionBody::ExchangeOfferAdd(_) => EntityType::ExchangeOfferAdd,
            TransactionBody::ExchangeOffer(_) => EntityType::ExchangeOffer,
            TransactionBody::ExchangeOfferRemove(_) => EntityType::ExchangeOfferRemove,
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            TransactionBody::Transfer(b) => b.schema(),
            TransactionBody::RegisterNamespace(b) => b.schema(),
            TransactionBody::MosaicDefinition(b) => b.schema(),
            TransactionBody::MosaicSupplyChange(b) => b.schema(),
            TransactionBody::Alias(b) => b.schema(),
            TransactionBody::ModifyMultisigAccount(b) => b.schema(),
            TransactionBody::Aggregate(b) => b.schema(),
            TransactionBody::LockFunds(b) => b.schema(),
            TransactionBody::SecretLock(b) => b.schema(),
            TransactionBody::SecretProof(b) => b.schema(),
            TransactionBody::AccountLink(b) => b.schema(),
            TransactionBody::ModifyMetadata(b) => b.schema(),
            TransactionBody::AccountProperties(b) => b.schema(),
            TransactionBody::ModifyContract(b) => b.schema(),
            TransactionBody::BlockchainUpgrade(b) => b.schema(),
            TransactionBody::BlockchainConfig(b) => b.schema(),
            TransactionBody::ExchangeOfferAdd(b) => b.schema(),
            TransactionBody::ExchangeOffer(b) => b.schema(),
            TransactionBody::ExchangeOfferRemove(b) => b.schema(),
        }
    }
}

macro_rules! body_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for TransactionBody {
                fn from(body: $variant) -> Self {
                    TransactionBody::$variant(body)
                }
            }
        )*
    };
}

body_from!(
    Transfer,
    RegisterNamespace,
    MosaicDefinition,
    MosaicSupplyChange,
    Alias,
    ModifyMultisigAccount,
    Aggregate,
    LockFunds,
    SecretLock,
    SecretProof,
    AccountLink,
    ModifyMetadata,
    AccountProperties,
    ModifyContract,
    BlockchainUpgrade,
    BlockchainConfig,
    ExchangeOfferAdd,
    ExchangeOffer,
    ExchangeOfferRemove,
);

// ─── Transaction ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    network_type: NetworkType,
    version: u32,
    deadline: Deadline,
    max_fee: u64,
    signer: Signer,
    info: Option<TransactionInfo>,
    body: TransactionBody,
}

impl Transaction {
    pub(crate) fn from_parts(
        network_type: NetworkType,
        version: u32,
        deadline: Deadline,
        max_fee: u64,
        signer: Signer,
        info: Option<TransactionInfo>,
        body: TransactionBody,
    ) -> Self {
        Self { network_type, version, deadline, max_fee, signer, info, body }
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Transaction version, without the network byte.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Wire version field: network byte in the top 8 bits.
    pub fn version_field(&self) -> u32 {
        (self.network_type.value() as u32) << 24 | (self.version & 0x00FF_FFFF)
    }

    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn max_fee(&self) -> u64 {
        self.max_fee
    }

    pub fn signer_state(&self) -> &Signer {
        &self.signer
    }

    pub fn signer(&self) -> Option<&PublicAccount> {
        self.signer.account()
    }

    pub fn signature(&self) -> Option<&[u8; SIGNATURE_SIZE]> {
        self.signer.signature()
    }

    pub fn info(&self) -> Option<&TransactionInfo> {
        self.info.as_ref()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    // ── Serialization ──

    /// Total serialized size: header plus body.
    pub fn payload_size(&self) -> usize {
        HEADER_SIZE + self.body.schema().size()
    }

    fn schema(&self) -> Schema {
        let body = self.body.schema();
        let size = HEADER_SIZE + body.size();
        let zero_signature = [0u8; SIGNATURE_SIZE];
        let zero_key = [0u8; KEY_SIZE];
        Schema::new()
            .u32("size", size as u32)
            .fixed("signature", self.signature().unwrap_or(&zero_signature), SIGNATURE_SIZE)
            .fixed("signer", self.signer().map_or(&zero_key, |s| s.public_key()), KEY_SIZE)
            .u32("version", self.version_field())
            .u16("type", self.entity_type().code())
            .u64("maxFee", self.max_fee)
            .u64("deadline", self.deadline.instant())
            .extend(body)
    }

    /// Standalone wire payload. Unsigned transactions carry zeroed
    /// signature and signer fields.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TxError> {
        let bytes = self.schema().to_bytes()?;
        trace!("{} payload is {} bytes", self.entity_type(), bytes.len());
        Ok(bytes)
    }

    pub(crate) fn embedded_schema(&self) -> Schema {
        let body = self.body.schema();
        let size = EMBEDDED_HEADER_SIZE + body.size();
        Schema::new()
            .u32("size", size as u32)
            .required("signer", self.signer().map(|s| &s.public_key()[..]), KEY_SIZE)
            .u32("version", self.version_field())
            .u16("type", self.entity_type().code())
            .extend(body)
    }

    /// Embedded form used inside an aggregate (no padding). Fails when the
    /// transaction has no signer.
    pub fn to_embedded_bytes(&self) -> Result<Vec<u8>, TxError> {
        self.embedded_schema().to_bytes()
    }

    // ── Signer substitution ──

    /// A copy attributed to `signer`, with any signature dropped.
    ///
    /// Fails for transactions that already carry confirmation info and for
    /// aggregates, whose identity is fixed once built.
    pub fn copy_for_signer(&self, signer: PublicAccount) -> Result<Transaction, TxError> {
        if self.info.is_some() {
            return Err(TxError::Invalid("transaction with info cannot be re-attributed".into()));
        }
        if self.entity_type().is_aggregate() {
            return Err(TxError::Invalid("aggregate transactions cannot be re-attributed".into()));
        }
        Ok(Transaction { signer: Signer::Attributed(signer), ..self.clone() })
    }

    /// Prepare this transaction for inclusion in an aggregate on behalf of `signer`.
    pub fn to_aggregate(&self, signer: PublicAccount) -> Result<Transaction, TxError> {
        self.copy_for_signer(signer)
    }

    pub(crate) fn with_signer(self, signer: Signer) -> Transaction {
        Transaction { signer, ..self }
    }

    // ── Status ──

    /// Built locally and never seen by the network.
    pub fn is_unannounced(&self) -> bool {
        self.info.is_none()
    }

    pub fn is_confirmed(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.height() > 0)
    }

    /// Announced, not yet in a block, and complete.
    pub fn is_unconfirmed(&self) -> bool {
        self.info.as_ref().is_some_and(|i| {
            i.height() == 0 && i.hash().is_some() && i.hash() == i.merkle_component_hash()
        })
    }

    /// Announced bonded aggregate still waiting for cosignatures.
    pub fn has_missing_signatures(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.height() == 0 && i.hash() != i.merkle_component_hash())
    }

    /// Whether `account` is the signer or, for aggregates, a cosigner.
    pub fn signed_by_account(&self, account: &PublicAccount) -> bool {
        if self.signer().is_some_and(|s| s.public_key() == account.public_key()) {
            return true;
        }
        match &self.body {
            TransactionBody::Aggregate(aggregate) => aggregate.cosigned_by(account),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransactionBuilder;
    use sirius_types::{Address, Mosaic, MosaicId};

    fn transfer() -> Transaction {
        let body = TransferBuilder::new()
            .set_recipient(Address::from_raw("SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM").unwrap())
            .add_mosaic(Mosaic::new(MosaicId::new(0x56CE00002B67), 100))
            .build()
            .unwrap();
        TransactionBuilder::new(NetworkType::MijinTest).set_deadline(Deadline::new(1)).build(body).unwrap()
    }

    fn account(byte: u8) -> PublicAccount {
        PublicAccount::new([byte; 32], NetworkType::MijinTest)
    }

    #[test]
    fn test_version_field_packs_network() {
        let tx = transfer();
        assert_eq!(tx.version(), 3);
        assert_eq!(tx.version_field(), 0x9000_0003);
    }

    #[test]
    fn test_unsigned_payload() {
        let tx = transfer();
        let bytes = tx.to_bytes().unwrap();
        assert_eq!(bytes.len(), tx.payload_size());
        assert_eq!(&bytes[..4], &(bytes.len() as u32).to_le_bytes());
        assert!(bytes[4..100].iter().all(|&b| b == 0));
        assert_eq!(&bytes[104..106], &[0x54, 0x41]);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let tx = transfer();
        assert_eq!(tx.to_bytes().unwrap(), tx.to_bytes().unwrap());
    }

    #[test]
    fn test_embedded_requires_signer() {
        let tx = transfer();
        assert!(matches!(tx.to_embedded_bytes(), Err(TxError::Serialize(_))));
        let embedded = tx.to_aggregate(account(7)).unwrap().to_embedded_bytes().unwrap();
        assert_eq!(embedded.len(), tx.payload_size() - HEADER_SIZE + EMBEDDED_HEADER_SIZE);
        assert_eq!(&embedded[..4], &(embedded.len() as u32).to_le_bytes());
        assert_eq!(&embedded[4..36], &[7u8; 32]);
    }

    #[test]
    fn test_copy_for_signer_keeps_original() {
        let tx = transfer();
        let copy = tx.copy_for_signer(account(1)).unwrap();
        assert_eq!(copy.signer(), Some(&account(1)));
        assert_eq!(tx.signer(), None);
        assert_eq!(copy.body(), tx.body());
    }

    #[test]
    fn test_copy_for_signer_rejects_aggregates() {
        let inner = transfer().to_aggregate(account(1)).unwrap();
        let aggregate = Aggregate::new(AggregateKind::Complete, vec![inner]).unwrap();
        let tx = TransactionBuilder::new(NetworkType::MijinTest).set_deadline(Deadline::new(1)).build(aggregate).unwrap();
        assert!(matches!(tx.copy_for_signer(account(2)), Err(TxError::Invalid(_))));
    }

    #[test]
    fn test_copy_for_signer_rejects_announced() {
        let tx = Transaction {
            info: Some(TransactionInfo::Legacy { height: 5, hash: None, merkle_component_hash: None }),
            ..transfer()
        };
        assert!(tx.copy_for_signer(account(1)).is_err());
    }

    #[test]
    fn test_status_helpers() {
        let tx = transfer();
        assert!(tx.is_unannounced());
        assert!(!tx.is_confirmed());

        let info = |height, hash: &str, merkle: &str| TransactionInfo::Standalone {
            height,
            index: 0,
            id: "id".into(),
            hash: hash.into(),
            merkle_component_hash: merkle.into(),
        };
        let confirmed = Transaction { info: Some(info(10, "A", "A")), ..transfer() };
        assert!(confirmed.is_confirmed());
        let unconfirmed = Transaction { info: Some(info(0, "A", "A")), ..transfer() };
        assert!(unconfirmed.is_unconfirmed());
        assert!(!unconfirmed.has_missing_signatures());
        let partial = Transaction { info: Some(info(0, "A", "B")), ..transfer() };
        assert!(partial.has_missing_signatures());
        assert!(!partial.is_unconfirmed());
    }

    #[test]
    fn test_signed_by_account() {
        let inner = transfer().to_aggregate(account(1)).unwrap();
        let aggregate =
            Aggregate::with_cosignatures(AggregateKind::Bonded, vec![inner], vec![Cosignature::new(account(3), [0; 64])])
                .unwrap();
        let tx = TransactionBuilder::new(NetworkType::MijinTest)
            .set_deadline(Deadline::new(1))
            .build(aggregate)
            .unwrap()
            .with_signer(Signer::Signed { signer: account(2), signature: [1; 64] });
        assert!(tx.signed_by_account(&account(2)));
        assert!(tx.signed_by_account(&account(3)));
        assert!(!tx.signed_by_account(&account(1)));
    }

    #[test]
    fn test_aggregate_blocks_are_aligned() {
        let inner = transfer().to_aggregate(account(1)).unwrap();
        let inner_size = inner.to_embedded_bytes().unwrap().len();
        assert_ne!(inner_size % 8, 0);
        let aggregate = Aggregate::new(AggregateKind::Complete, vec![inner.clone(), inner]).unwrap();
        let padded = inner_size + (8 - inner_size % 8);
        assert_eq!(aggregate.payload_size(), 2 * padded);
    }
}
