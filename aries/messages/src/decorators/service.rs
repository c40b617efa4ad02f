use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Key under which the decorator lives in a message's top level mapping.
pub const SERVICE_DECORATOR: &str = "~service";

/// Struct representing the `~service` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0056-service-decorator/README.md>).
///
/// Keys are raw base58 verkeys, not `did:key` identifiers. The value is
/// immutable in practice: when a peer's address changes the whole block is
/// replaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub recipient_keys: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub routing_keys: Vec<String>,
    #[builder(setter(into))]
    pub service_endpoint: String,
}

impl Service {
    pub fn endpoint(&self) -> &str {
        &self.service_endpoint
    }

    pub fn has_recipient_key(&self, key: &str) -> bool {
        self.recipient_keys.iter().any(|k| k == key)
    }
}
