use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;

use super::{Record, RecordStore, RecordStoreError, RecordStoreResult, RecordTags};

type Categories = HashMap<String, HashMap<String, Record>>;

/// Process-local [`RecordStore`].
///
/// Unique indices registered through [`InMemoryRecordStore::with_unique_tags`]
/// are checked under the write lock, so concurrent inserts of the same tag
/// combination resolve to a single winner.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    store_name: String,
    records: RwLock<Categories>,
    unique_indices: HashMap<String, Vec<Vec<String>>>,
}

impl InMemoryRecordStore {
    pub fn new(store_name: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            ..Default::default()
        }
    }

    /// Registers a combination of tag names that must be unique within `category`.
    pub fn with_unique_tags(mut self, category: &str, tag_names: &[&str]) -> Self {
        self.unique_indices
            .entry(category.to_string())
            .or_default()
            .push(tag_names.iter().map(|name| name.to_string()).collect());
        self
    }

    fn lock_read(&self) -> RecordStoreResult<RwLockReadGuard<'_, Categories>> {
        self.records.read().map_err(|err| {
            error!("Unable to read-lock record store: {:?}", err);
            RecordStoreError::Unavailable(format!(
                "[InMemoryRecordStore: {}] Unable to lock store: {}",
                self.store_name, err
            ))
        })
    }

    fn lock_write(&self) -> RecordStoreResult<RwLockWriteGuard<'_, Categories>> {
        self.records.write().map_err(|err| {
            error!("Unable to write-lock record store: {:?}", err);
            RecordStoreError::Unavailable(format!(
                "[InMemoryRecordStore: {}] Unable to lock store: {}",
                self.store_name, err
            ))
        })
    }

    fn check_unique(&self, categories: &Categories, record: &Record) -> RecordStoreResult<()> {
        let (Some(indices), Some(existing)) = (
            self.unique_indices.get(record.category()),
            categories.get(record.category()),
        ) else {
            return Ok(());
        };
        for index in indices {
            let mut key = RecordTags::default();
            for name in index {
                match record.tags().get(name) {
                    Some(value) => key.add(name.as_str(), value),
                    // partially tagged records are not covered by the index
                    None => break,
                }
            }
            if key.iter().count() != index.len() {
                continue;
            }
            let conflict = existing
                .values()
                .any(|other| other.name() != record.name() && other.tags().matches(&key));
            if conflict {
                return Err(RecordStoreError::DuplicateRecord(format!(
                    "category: {}, tags: {}",
                    record.category(),
                    key
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn add_record(&self, record: Record) -> RecordStoreResult<()> {
        let mut categories = self.lock_write()?;
        self.check_unique(&categories, &record)?;
        let records = categories.entry(record.category().to_string()).or_default();
        if records.contains_key(record.name()) {
            return Err(RecordStoreError::DuplicateRecord(format!(
                "category: {}, name: {}",
                record.category(),
                record.name()
            )));
        }
        records.insert(record.name().to_string(), record);
        Ok(())
    }

    async fn get_record(&self, category: &str, name: &str) -> RecordStoreResult<Record> {
        self.lock_read()?
            .get(category)
            .and_then(|records| records.get(name))
            .cloned()
            .ok_or_else(|| RecordStoreError::record_not_found(category, name))
    }

    async fn update_record(&self, record: Record) -> RecordStoreResult<()> {
        let mut categories = self.lock_write()?;
        self.check_unique(&categories, &record)?;
        let slot = categories
            .get_mut(record.category())
            .and_then(|records| records.get_mut(record.name()))
            .ok_or_else(|| RecordStoreError::record_not_found(record.category(), record.name()))?;
        *slot = record;
        Ok(())
    }

    async fn delete_record(&self, category: &str, name: &str) -> RecordStoreResult<()> {
        self.lock_write()?
            .get_mut(category)
            .and_then(|records| records.remove(name))
            .map(|_| ())
            .ok_or_else(|| RecordStoreError::record_not_found(category, name))
    }

    async fn search_record(
        &self,
        category: &str,
        filter: &RecordTags,
    ) -> RecordStoreResult<Vec<Record>> {
        Ok(self
            .lock_read()?
            .get(category)
            .map(|records| {
                records
                    .values()
                    .filter(|record| record.tags().matches(filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
