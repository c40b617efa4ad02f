//! Ledger lookups used to resolve a public DID found in an invitation's
//! `services` into an endpoint and verkey.

mod indy;

use async_trait::async_trait;

pub use self::indy::IndyLedgerLookup;
use crate::errors::error::VcxOobResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerLookup: Send + Sync {
    async fn resolve_endpoint(&self, did: &str) -> VcxOobResult<String>;

    async fn resolve_key(&self, did: &str) -> VcxOobResult<String>;
}

/// Raw ledger reads, returning the ledger's JSON reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRead: Send + Sync {
    async fn get_attr(&self, target_did: &str, attr_name: &str) -> VcxOobResult<String>;

    async fn get_nym(&self, did: &str) -> VcxOobResult<String>;
}
