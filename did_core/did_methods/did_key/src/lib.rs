//! Conversion between `did:key` identifiers and the raw base58 verkeys used
//! by DIDComm v1 `~service` decorators.

mod error;
mod key_type;

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use error::DidKeyError;
pub use key_type::KeyType;

const DID_KEY_PREFIX: &str = "did:key:";

/// A parsed `did:key`, e.g. `did:key:z6MkpTHR8VNsBxYAAWHut2Geadd9jSwuBV8xRoAnwWsdvktH`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidKey {
    key_type: KeyType,
    key: Vec<u8>,
}

impl DidKey {
    pub fn from_public_key_base58(verkey: &str, key_type: KeyType) -> Result<Self, DidKeyError> {
        let key = bs58::decode(verkey).into_vec()?;
        Ok(Self { key_type, key })
    }

    /// Parses a `did:key`. A trailing DID URL fragment (`#z6Mk...`) is ignored.
    pub fn from_did(did: &str) -> Result<Self, DidKeyError> {
        let fingerprint = did
            .strip_prefix(DID_KEY_PREFIX)
            .ok_or_else(|| DidKeyError::InvalidDid(did.to_string()))?;
        let fingerprint = fingerprint.split('#').next().unwrap_or_default();
        if fingerprint.is_empty() {
            return Err(DidKeyError::InvalidDid(did.to_string()));
        }
        let (_base, decoded) = multibase::decode(fingerprint)?;
        let (code, key) = unsigned_varint::decode::u64(&decoded)?;
        Ok(Self {
            key_type: code.try_into()?,
            key: key.to_vec(),
        })
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn public_key(&self) -> &[u8] {
        &self.key
    }

    pub fn public_key_base58(&self) -> String {
        bs58::encode(&self.key).into_string()
    }

    pub fn fingerprint(&self) -> String {
        let mut buffer = unsigned_varint::encode::u64_buffer();
        let code = unsigned_varint::encode::u64(self.key_type.into(), &mut buffer);
        let mut prefixed = code.to_vec();
        prefixed.extend_from_slice(&self.key);
        multibase::encode(multibase::Base::Base58Btc, prefixed)
    }

    pub fn did(&self) -> String {
        format!("{DID_KEY_PREFIX}{}", self.fingerprint())
    }

    /// The DID URL referencing the key itself, as used in `recipientKeys`.
    pub fn key_id(&self) -> String {
        format!("{}#{}", self.did(), self.fingerprint())
    }
}

impl Display for DidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did())
    }
}

impl Serialize for DidKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.did())
    }
}

impl<'de> Deserialize<'de> for DidKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DidKey::from_did(&s).map_err(serde::de::Error::custom)
    }
}
