//! Record storage capability consumed by the correlation engine.

mod error;
pub mod in_memory;
mod record;

use async_trait::async_trait;

pub use self::{
    error::{NotFoundInfo, RecordStoreError, RecordStoreResult},
    record::{Record, RecordTags},
};

/// Tag-indexed record storage.
///
/// Implementations guarantee per-key atomicity: two concurrent `add_record`
/// calls colliding on a unique tag combination must leave exactly one winner,
/// the loser observing [`RecordStoreError::DuplicateRecord`].
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    async fn add_record(&self, record: Record) -> RecordStoreResult<()>;

    async fn get_record(&self, category: &str, name: &str) -> RecordStoreResult<Record>;

    /// Replaces value and tags of an existing record.
    async fn update_record(&self, record: Record) -> RecordStoreResult<()>;

    async fn delete_record(&self, category: &str, name: &str) -> RecordStoreResult<()>;

    /// Returns every record of `category` carrying all tags of `filter`.
    async fn search_record(
        &self,
        category: &str,
        filter: &RecordTags,
    ) -> RecordStoreResult<Vec<Record>>;

    /// Like [`RecordStore::search_record`] but expects exactly one match.
    async fn find_unique_by_tags(
        &self,
        category: &str,
        filter: &RecordTags,
    ) -> RecordStoreResult<Record> {
        let mut records = self.search_record(category, filter).await?;
        match records.len() {
            0 => Err(RecordStoreError::RecordNotFound(NotFoundInfo::by_tags(
                category, filter,
            ))),
            1 => Ok(records.remove(0)),
            n => Err(RecordStoreError::AmbiguousQuery(format!(
                "{n} records of category {category} match {filter}"
            ))),
        }
    }
}
