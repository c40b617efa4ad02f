//! Entry point of the correlation engine.
//!
//! [`OobMessageProcessor`] owns the collaborators every operation needs and
//! exposes them as three groups:
//!
//! - inbound correlation, matching a received message to its out-of-band record
//! - reply addressing for connectionless exchanges
//! - bootstrapping a record on the first message routed for it

mod connectionless;
mod inbound;
mod outbound;
#[cfg(test)]
mod test_utils;

use std::{fmt, sync::Arc};

pub use self::inbound::{correlate, CorrelationRejection, CorrelationUpdate, InboundCorrelation};
use crate::{
    connection::ConnectionStore,
    errors::error::prelude::*,
    ledger::LedgerLookup,
    oob_record::{OobRecord, OobRecordRepository, OobState},
    settings::OobProcessorConfig,
    storage::RecordStore,
    transport::{InboundRouter, JsonWireFormat, WireFormat},
};

pub struct OobMessageProcessor {
    config: OobProcessorConfig,
    records: OobRecordRepository,
    connections: Arc<dyn ConnectionStore>,
    ledger: Arc<dyn LedgerLookup>,
    inbound_router: Arc<dyn InboundRouter>,
    wire_format: Arc<dyn WireFormat>,
}

impl fmt::Debug for OobMessageProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OobMessageProcessor")
            .field("config", &self.config)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl OobMessageProcessor {
    /// Builds a processor decoding raw messages with [`JsonWireFormat`].
    pub fn new(
        config: OobProcessorConfig,
        record_store: Arc<dyn RecordStore>,
        connections: Arc<dyn ConnectionStore>,
        ledger: Arc<dyn LedgerLookup>,
        inbound_router: Arc<dyn InboundRouter>,
    ) -> Self {
        Self {
            config,
            records: OobRecordRepository::new(record_store),
            connections,
            ledger,
            inbound_router,
            wire_format: Arc::new(JsonWireFormat),
        }
    }

    pub fn with_wire_format(mut self, wire_format: Arc<dyn WireFormat>) -> Self {
        self.wire_format = wire_format;
        self
    }

    pub fn config(&self) -> &OobProcessorConfig {
        &self.config
    }

    pub fn records(&self) -> &OobRecordRepository {
        &self.records
    }

    /// Stores a freshly issued or accepted invitation's record. Returns the
    /// already stored record when another task registered the same invitation
    /// first.
    pub async fn create_record(&self, record: OobRecord) -> VcxOobResult<OobRecord> {
        let record = self.records.create(record).await?;
        debug!(
            "Created out-of-band record {} for invitation {}",
            record.oob_id, record.invi_msg_id
        );
        Ok(record)
    }

    /// Marks the exchange bootstrapped by `oob_id` as finished.
    pub async fn complete(&self, oob_id: &str) -> VcxOobResult<OobRecord> {
        let mut record = self.records.retrieve_by_id(oob_id).await?;
        record.transition(OobState::Done)?;
        self.records.save(&mut record).await?;
        info!("Out-of-band exchange {oob_id} is done");
        Ok(record)
    }

    /// Drops a record whose exchange has been taken over by a pairwise
    /// connection.
    pub async fn supersede(&self, oob_id: &str) -> VcxOobResult<OobRecord> {
        let mut record = self.records.retrieve_by_id(oob_id).await?;
        record.transition(OobState::Deleted)?;
        self.records.delete(&record).await?;
        info!(
            "Out-of-band record {oob_id} superseded by connection {:?}",
            record.connection_id
        );
        Ok(record)
    }
}
