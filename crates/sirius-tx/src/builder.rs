//! Transaction builder.
//!
//! Variant bodies are built and validated first (`TransferBuilder`,
//! `RegisterNamespaceBuilder`, or a body constructor); the
//! [`TransactionBuilder`] then adds the common header and produces an
//! unsigned [`Transaction`] with no confirmation info.

use crate::transaction::{Signer, Transaction, TransactionBody};
use crate::TxError;
use log::debug;
use sirius_types::{ClientConfig, Deadline, NetworkType};

/// Builder for the common transaction header.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network_type: NetworkType,
    deadline: Option<Deadline>,
    max_fee: u64,
    version: Option<u32>,
}

impl TransactionBuilder {
    /// Create a builder for `network_type` with a zero fee and no deadline.
    pub fn new(network_type: NetworkType) -> Self {
        Self { network_type, deadline: None, max_fee: 0, version: None }
    }

    /// Network, fee and a deadline derived from the current time, as
    /// configured in `config`.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.network_type)
            .set_deadline(Deadline::hours(config.default_deadline_hours))
            .set_max_fee(config.default_max_fee)
    }

    pub fn set_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn set_max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Override the entity type's current version.
    pub fn set_version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn build(self, body: impl Into<TransactionBody>) -> Result<Transaction, TxError> {
        let body = body.into();
        let entity_type = body.entity_type();
        let deadline = self
            .deadline
            .ok_or_else(|| TxError::Invalid(format!("{entity_type} requires a deadline")))?;
        let version = self.version.unwrap_or_else(|| entity_type.version());
        if version > 0x00FF_FFFF {
            return Err(TxError::Invalid(format!("version {version} does not fit in 24 bits")));
        }

        if let TransactionBody::Aggregate(aggregate) = &body {
            if let Some(tx) = aggregate.inner_transactions().iter().find(|tx| tx.network_type() != self.network_type) {
                return Err(TxError::Invalid(format!(
                    "inner {} is for {}, aggregate is for {}",
                    tx.entity_type(),
                    tx.network_type(),
                    self.network_type
                )));
            }
        }

        debug!("built {} v{} for {}", entity_type, version, self.network_type);
        Ok(Transaction::from_parts(
            self.network_type,
            version,
            deadline,
            self.max_fee,
            Signer::Unsigned,
            None,
            body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{MosaicSupplyChange, MosaicSupplyType};
    use sirius_types::constants::EntityType;
    use sirius_types::MosaicId;

    fn body() -> MosaicSupplyChange {
        MosaicSupplyChange::new(MosaicId::new(1), MosaicSupplyType::Increase, 5)
    }

    #[test]
    fn test_deadline_required() {
        let result = TransactionBuilder::new(NetworkType::MijinTest).build(body());
        assert!(matches!(result, Err(TxError::Invalid(_))));
    }

    #[test]
    fn test_defaults() {
        let tx = TransactionBuilder::new(NetworkType::TestNet)
            .set_deadline(Deadline::new(10))
            .build(body())
            .unwrap();
        assert_eq!(tx.entity_type(), EntityType::MosaicSupplyChange);
        assert_eq!(tx.version(), 2);
        assert_eq!(tx.max_fee(), 0);
        assert!(tx.is_unannounced());
        assert!(tx.signature().is_none() && tx.signer().is_none());
    }

    #[test]
    fn test_version_override() {
        let builder = TransactionBuilder::new(NetworkType::MijinTest).set_deadline(Deadline::new(1));
        assert_eq!(builder.clone().set_version(1).build(body()).unwrap().version(), 1);
        assert!(builder.set_version(0x0100_0000).build(body()).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::new(
            NetworkType::PrivateTest,
            "7B631D803F912B00DC0CBED3014BBD17A302BA50B99D233B9C2D9533B842ABDF",
        )
        .unwrap();
        let tx = TransactionBuilder::from_config(&config).build(body()).unwrap();
        assert_eq!(tx.network_type(), NetworkType::PrivateTest);
        assert!(tx.deadline().instant() > 0);
    }
}
