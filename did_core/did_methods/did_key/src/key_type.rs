use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::DidKeyError;

/// Key types a `did:key` may carry in a DIDComm v1 service block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Ed25519,
    X25519,
}

impl KeyType {
    const C_X25519: u64 = 0xec;
    const C_ED25519: u64 = 0xed;
}

// https://github.com/multiformats/multicodec/blob/master/table.csv
impl From<KeyType> for u64 {
    fn from(key_type: KeyType) -> Self {
        match key_type {
            KeyType::X25519 => KeyType::C_X25519,
            KeyType::Ed25519 => KeyType::C_ED25519,
        }
    }
}

impl TryFrom<u64> for KeyType {
    type Error = DidKeyError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            KeyType::C_X25519 => Ok(KeyType::X25519),
            KeyType::C_ED25519 => Ok(KeyType::Ed25519),
            p => Err(DidKeyError::UnsupportedMulticodecDescriptor(p)),
        }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::X25519 => write!(f, "X25519"),
            KeyType::Ed25519 => write!(f, "Ed25519"),
        }
    }
}
