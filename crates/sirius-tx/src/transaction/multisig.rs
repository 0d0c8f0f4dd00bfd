//! Multisig account and contract modifications.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::{HASH_SIZE, KEY_SIZE};
use sirius_types::PublicAccount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModificationType {
    Add,
    Remove,
}

impl ModificationType {
    pub fn value(self) -> u8 {
        match self {
            ModificationType::Add => 0,
            ModificationType::Remove => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(ModificationType::Add),
            1 => Some(ModificationType::Remove),
            _ => None,
        }
    }
}

/// Add or remove one cosignatory key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CosignatoryModification {
    pub modification_type: ModificationType,
    pub cosignatory: PublicAccount,
}

impl CosignatoryModification {
    pub fn new(modification_type: ModificationType, cosignatory: PublicAccount) -> Self {
        Self { modification_type, cosignatory }
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .u8("type", self.modification_type.value())
            .fixed("cosignatoryPublicKey", self.cosignatory.public_key(), KEY_SIZE)
    }
}

fn modification_table(modifications: &[CosignatoryModification]) -> Vec<Schema> {
    modifications.iter().map(CosignatoryModification::schema).collect()
}

fn check_count(what: &str, count: usize) -> Result<(), TxError> {
    if count > u8::MAX as usize {
        return Err(TxError::Invalid(format!("too many {what}: {count}")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMultisigAccount {
    min_approval_delta: i8,
    min_removal_delta: i8,
    modifications: Vec<CosignatoryModification>,
}

impl ModifyMultisigAccount {
    /// An empty modification list is valid (only the thresholds change).
    pub fn new(
        min_approval_delta: i8,
        min_removal_delta: i8,
        modifications: Vec<CosignatoryModification>,
    ) -> Result<Self, TxError> {
        check_count("cosignatory modifications", modifications.len())?;
        Ok(Self { min_approval_delta, min_removal_delta, modifications })
    }

    pub fn min_approval_delta(&self) -> i8 {
        self.min_approval_delta
    }

    pub fn min_removal_delta(&self) -> i8 {
        self.min_removal_delta
    }

    pub fn modifications(&self) -> &[CosignatoryModification] {
        &self.modifications
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .i8("minRemovalDelta", self.min_removal_delta)
            .i8("minApprovalDelta", self.min_approval_delta)
            .u8("numModifications", self.modifications.len() as u8)
            .table("modifications", modification_table(&self.modifications))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyContract {
    duration_delta: u64,
    hash: [u8; HASH_SIZE],
    customers: Vec<CosignatoryModification>,
    executors: Vec<CosignatoryModification>,
    verifiers: Vec<CosignatoryModification>,
}

impl ModifyContract {
    pub fn new(
        duration_delta: u64,
        hash: [u8; HASH_SIZE],
        customers: Vec<CosignatoryModification>,
        executors: Vec<CosignatoryModification>,
        verifiers: Vec<CosignatoryModification>,
    ) -> Result<Self, TxError> {
        check_count("customer modifications", customers.len())?;
        check_count("executor modifications", executors.len())?;
        check_count("verifier modifications", verifiers.len())?;
        Ok(Self { duration_delta, hash, customers, executors, verifiers })
    }

    pub fn duration_delta(&self) -> u64 {
        self.duration_delta
    }

    pub fn hash(&self) -> &[u8; HASH_SIZE] {
        &self.hash
    }

    pub fn customers(&self) -> &[CosignatoryModification] {
        &self.customers
    }

    pub fn executors(&self) -> &[CosignatoryModification] {
        &self.executors
    }

    pub fn verifiers(&self) -> &[CosignatoryModification] {
        &self.verifiers
    }

    pub(crate) fn schema(&self) -> Schema {
        Schema::new()
            .u64("durationDelta", self.duration_delta)
            .fixed("hash", &self.hash, HASH_SIZE)
            .u8("numCustomers", self.customers.len() as u8)
            .u8("numExecutors", self.executors.len() as u8)
            .u8("numVerifiers", self.verifiers.len() as u8)
            .table("customers", modification_table(&self.customers))
            .table("executors", modification_table(&self.executors))
            .table("verifiers", modification_table(&self.verifiers))
    }
}
