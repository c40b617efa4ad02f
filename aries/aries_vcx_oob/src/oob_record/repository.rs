use std::sync::Arc;

use chrono::Utc;

use super::OobRecord;
use crate::{
    errors::error::prelude::*,
    storage::{Record, RecordStore, RecordStoreError, RecordTags},
};

/// Typed access to [`OobRecord`]s kept in a [`RecordStore`].
#[derive(Debug, Clone)]
pub struct OobRecordRepository {
    store: Arc<dyn RecordStore>,
}

impl OobRecordRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn to_record(record: &OobRecord) -> VcxOobResult<Record> {
        Ok(Record::builder()
            .category(OobRecord::RECORD_CATEGORY)
            .name(record.oob_id.as_str())
            .value(serde_json::to_string(record)?)
            .tags(record.tags())
            .build())
    }

    fn from_record(record: &Record) -> VcxOobResult<OobRecord> {
        serde_json::from_str(record.value()).map_err(|err| {
            AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidJson,
                format!("Stored out-of-band record {} is corrupt: {err}", record.name()),
            )
        })
    }

    /// Persists a new record. When a concurrent creator already stored a
    /// record for the same invitation, that record is returned instead.
    pub async fn create(&self, record: OobRecord) -> VcxOobResult<OobRecord> {
        match self.store.add_record(Self::to_record(&record)?).await {
            Ok(()) => Ok(record),
            Err(RecordStoreError::DuplicateRecord(details)) => {
                info!(
                    "Out-of-band record for invitation {} already exists ({details}), re-reading",
                    record.invi_msg_id
                );
                self.find_by_invi_msg_id(&record.invi_msg_id)
                    .await?
                    .ok_or_else(|| {
                        AriesVcxOobError::from_msg(
                            AriesVcxOobErrorKind::DuplicationWalletRecord,
                            format!(
                                "Out-of-band record {} conflicts with a record of another \
                                 invitation",
                                record.oob_id
                            ),
                        )
                    })
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn retrieve_by_id(&self, oob_id: &str) -> VcxOobResult<OobRecord> {
        let record = self
            .store
            .get_record(OobRecord::RECORD_CATEGORY, oob_id)
            .await?;
        Self::from_record(&record)
    }

    /// Unique lookup by tags; `None` when nothing matches.
    async fn find_by_tags(&self, filter: RecordTags) -> VcxOobResult<Option<OobRecord>> {
        match self
            .store
            .find_unique_by_tags(OobRecord::RECORD_CATEGORY, &filter)
            .await
        {
            Ok(record) => Ok(Some(Self::from_record(&record)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_invi_msg_id(&self, invi_msg_id: &str) -> VcxOobResult<Option<OobRecord>> {
        let mut filter = RecordTags::default();
        filter.add(OobRecord::TAG_INVI_MSG_ID, invi_msg_id);
        self.find_by_tags(filter).await
    }

    /// Looks up the record bound to `attach_thread_id`, narrowed to the
    /// exchange that advertised `our_recipient_key` when given.
    pub async fn find_by_attach_thread(
        &self,
        attach_thread_id: &str,
        our_recipient_key: Option<&str>,
    ) -> VcxOobResult<Option<OobRecord>> {
        let mut filter = RecordTags::default();
        filter.add(OobRecord::TAG_ATTACH_THREAD_ID, attach_thread_id);
        filter.add_opt(OobRecord::TAG_OUR_RECIPIENT_KEY, our_recipient_key);
        self.find_by_tags(filter).await
    }

    pub async fn save(&self, record: &mut OobRecord) -> VcxOobResult<()> {
        record.updated_at = Utc::now();
        self.store.update_record(Self::to_record(record)?).await?;
        Ok(())
    }

    pub async fn delete(&self, record: &OobRecord) -> VcxOobResult<()> {
        self.store
            .delete_record(OobRecord::RECORD_CATEGORY, &record.oob_id)
            .await?;
        Ok(())
    }
}
