//! Transfer messages.
//!
//! A plain message carries its bytes as-is. A secure message carries the
//! block cipher output (`salt ‖ iv ‖ ciphertext`), which either the sender
//! or the recipient can open with their own key pair.

use crate::TxError;
use serde::{Deserialize, Serialize};
use sirius_crypto::{block_cipher, KeyPair};
use sirius_types::constants::KEY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    Plain,
    Secure,
}

impl MessageType {
    pub fn value(self) -> u8 {
        match self {
            MessageType::Plain => 0,
            MessageType::Secure => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(MessageType::Plain),
            1 => Some(MessageType::Secure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Message {
    Plain(Vec<u8>),
    Secure(Vec<u8>),
}

impl Default for Message {
    fn default() -> Self {
        Message::Plain(Vec::new())
    }
}

impl Message {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn plain(text: &str) -> Self {
        Message::Plain(text.as_bytes().to_vec())
    }

    /// Encrypt `plaintext` from `sender` to the holder of `recipient_public_key`.
    pub fn secure(
        sender: &KeyPair,
        recipient_public_key: &[u8; KEY_SIZE],
        plaintext: &[u8],
    ) -> Result<Self, TxError> {
        Ok(Message::Secure(block_cipher::encrypt(sender, recipient_public_key, plaintext)?))
    }

    pub fn secure_text(
        sender: &KeyPair,
        recipient_public_key: &[u8; KEY_SIZE],
        text: &str,
    ) -> Result<Self, TxError> {
        Self::secure(sender, recipient_public_key, text.as_bytes())
    }

    /// Wrap an already-encoded payload as read from the wire or JSON.
    pub fn from_payload(message_type: MessageType, payload: Vec<u8>) -> Self {
        match message_type {
            MessageType::Plain => Message::Plain(payload),
            MessageType::Secure => Message::Secure(payload),
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Plain(_) => MessageType::Plain,
            Message::Secure(_) => MessageType::Secure,
        }
    }

    /// Encoded payload bytes as they appear on the wire.
    pub fn payload(&self) -> &[u8] {
        match self {
            Message::Plain(p) | Message::Secure(p) => p,
        }
    }

    /// Plain message text, if the payload is UTF-8.
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::Plain(p) => std::str::from_utf8(p).ok(),
            Message::Secure(_) => None,
        }
    }

    /// Open a secure message. `own` is the sender's or recipient's key pair,
    /// `other_public_key` the counterparty's public key.
    pub fn decrypt(&self, own: &KeyPair, other_public_key: &[u8; KEY_SIZE]) -> Result<Vec<u8>, TxError> {
        match self {
            Message::Secure(p) => Ok(block_cipher::decrypt(own, other_public_key, p)?),
            Message::Plain(_) => Err(TxError::Invalid("plain messages are not encrypted".into())),
        }
    }

    pub fn decrypt_text(&self, own: &KeyPair, other_public_key: &[u8; KEY_SIZE]) -> Result<String, TxError> {
        String::from_utf8(self.decrypt(own, other_public_key)?)
            .map_err(|e| TxError::Decode(format!("message text: {e}")))
    }
}
