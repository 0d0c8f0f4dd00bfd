//! Transfer transactions and recipients.

use crate::message::Message;
use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::ADDRESS_SIZE;
use sirius_types::{Address, Mosaic, NamespaceId};

/// First byte of a recipient that names a namespace alias instead of an address.
pub const NAMESPACE_RECIPIENT_PREFIX: u8 = 0x91;

/// Where a transfer (or secret lock) delivers funds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Address(Address),
    Namespace(NamespaceId),
}

impl Recipient {
    /// 25-byte wire form. A namespace recipient is the prefix byte, the id
    /// little-endian, and zero fill.
    pub fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        match self {
            Recipient::Address(address) => *address.as_bytes(),
            Recipient::Namespace(namespace_id) => {
                let mut out = [0u8; ADDRESS_SIZE];
                out[0] = NAMESPACE_RECIPIENT_PREFIX;
                out[1..9].copy_from_slice(&namespace_id.id().to_le_bytes());
                out
            }
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TxError> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(TxError::Decode(format!(
                "recipient must be {ADDRESS_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        if bytes[0] == NAMESPACE_RECIPIENT_PREFIX {
            let id = sirius_types::uint64::from_le_slice(&bytes[1..9])?;
            return Ok(Recipient::Namespace(NamespaceId::new(id)));
        }
        Ok(Recipient::Address(Address::from_bytes(bytes)?))
    }

    /// Upper-case hex of the wire form, as the REST gateway reports it.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.to_bytes())
    }

    pub fn from_encoded(encoded: &str) -> Result<Self, TxError> {
        let raw = hex::decode(encoded).map_err(|e| TxError::Decode(format!("recipient: {e}")))?;
        Self::from_bytes(&raw)
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Recipient::Address(address)
    }
}

impl From<NamespaceId> for Recipient {
    fn from(namespace_id: NamespaceId) -> Self {
        Recipient::Namespace(namespace_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    recipient: Recipient,
    mosaics: Vec<Mosaic>,
    message: Message,
}

impl Transfer {
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Mosaics in the order they were added.
    pub fn mosaics(&self) -> &[Mosaic] {
        &self.mosaics
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub(crate) fn schema(&self) -> Schema {
        let payload = self.message.payload();
        let mosaics = self
            .mosaics
            .iter()
            .map(|m| Schema::new().u64("id", m.id.id()).u64("amount", m.amount))
            .collect();
        Schema::new()
            .fixed("recipient", &self.recipient.to_bytes(), ADDRESS_SIZE)
            .u16("messageSize", (payload.len() + 1) as u16)
            .u8("numMosaics", self.mosaics.len() as u8)
            .u8("messageType", self.message.message_type().value())
            .bytes("message", payload)
            .table("mosaics", mosaics)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransferBuilder {
    recipient: Option<Recipient>,
    mosaics: Vec<Mosaic>,
    message: Message,
}

impl TransferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_recipient(mut self, recipient: impl Into<Recipient>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    pub fn add_mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaics.push(mosaic);
        self
    }

    pub fn set_mosaics(mut self, mosaics: Vec<Mosaic>) -> Self {
        self.mosaics = mosaics;
        self
    }

    /// Replace the default empty plain message.
    pub fn set_message(mut self, message: Message) -> Self {
        self.message = message;
        self
    }

    pub fn build(self) -> Result<Transfer, TxError> {
        let recipient = self
            .recipient
            .ok_or_else(|| TxError::Invalid("transfer requires a recipient".into()))?;
        if self.mosaics.len() > u8::MAX as usize {
            return Err(TxError::Invalid(format!("too many mosaics: {}", self.mosaics.len())));
        }
        if self.message.payload().len() >= u16::MAX as usize {
            return Err(TxError::Invalid("message payload too large".into()));
        }
        Ok(Transfer { recipient, mosaics: self.mosaics, message: self.message })
    }
}
