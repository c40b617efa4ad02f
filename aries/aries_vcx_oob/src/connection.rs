//! Pairwise connections, as far as out-of-band correlation needs to see them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::error::VcxOobResult;

/// An established pairwise connection bound to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub connection_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ConnectionRecord {
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
            state: None,
        }
    }
}

/// Storage of pairwise connections, owned by the connection protocol.
/// Used here only to drop connections made stale by a connection reuse.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    async fn find_by_id(&self, connection_id: &str) -> VcxOobResult<Option<ConnectionRecord>>;

    async fn delete(&self, connection_id: &str) -> VcxOobResult<()>;
}
