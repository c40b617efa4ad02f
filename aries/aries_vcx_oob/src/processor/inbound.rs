use messages::decorators::{attachment::Attachment, thread::THREAD_DECORATOR};
use serde_json::Value;

use super::OobMessageProcessor;
use crate::{
    connection::ConnectionRecord,
    errors::error::prelude::*,
    oob_record::{OobRecord, OobRole, OobState},
    transport::InboundEnvelope,
};

/// Outcome of correlating an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundCorrelation {
    Correlated(OobRecord),
    NotCorrelated,
    Rejected(CorrelationRejection),
}

impl InboundCorrelation {
    pub fn into_record(self) -> Option<OobRecord> {
        match self {
            Self::Correlated(record) => Some(record),
            Self::NotCorrelated | Self::Rejected(_) => None,
        }
    }
}

/// Why a message matched a record but was refused by it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorrelationRejection {
    #[error(
        "connection {actual} does not match connection {expected:?} of out-of-band record in \
         state {state:?}"
    )]
    ConnectionMismatch {
        expected: Option<String>,
        actual: String,
        state: OobState,
    },
    #[error("thread {thread_id:?} is none of the attached request threads {allowed:?}")]
    ThreadNotAllowed {
        thread_id: Option<String>,
        allowed: Vec<String>,
    },
    #[error("thread {actual:?} differs from bound thread {expected}")]
    ThreadMismatch {
        expected: String,
        actual: Option<String>,
    },
    #[error("sender key {sender_verkey} is not a recipient key of the peer's service")]
    SenderKeyMismatch { sender_verkey: String },
}

/// A record accepted by [`correlate`], plus the connection it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationUpdate {
    pub record: OobRecord,
    pub stale_connection_id: Option<String>,
}

/// Thread an attached request starts: its `~thread.thid`, else its `@id`.
fn attachment_thread_id(attachment: &Attachment) -> Option<String> {
    let content = match attachment.content() {
        Ok(content) => content,
        Err(err) => {
            warn!("Skipping unreadable attachment {:?}: {err}", attachment.id);
            return None;
        }
    };
    content
        .get(THREAD_DECORATOR)
        .and_then(|thread| thread.get("thid"))
        .or_else(|| content.get("@id"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Decides whether `envelope` belongs to `record` and how the record changes
/// if it does. Performs no I/O.
pub fn correlate(
    mut record: OobRecord,
    envelope: &InboundEnvelope,
    connection: Option<&ConnectionRecord>,
) -> Result<CorrelationUpdate, CorrelationRejection> {
    let mut stale_connection_id = None;

    if let Some(connection) = connection {
        let mismatch = record.connection_id.as_deref() != Some(connection.connection_id.as_str());
        if record.role == OobRole::Sender && mismatch {
            if record.state != OobState::AwaitResponse {
                return Err(CorrelationRejection::ConnectionMismatch {
                    expected: record.connection_id,
                    actual: connection.connection_id.clone(),
                    state: record.state,
                });
            }
            if record.invitation.has_requests_attach() {
                stale_connection_id = record
                    .connection_id
                    .replace(connection.connection_id.clone());
            }
        }
    }

    let thread_id = envelope.thread_id();
    match record.attach_thread_id.clone() {
        None if record.invitation.has_requests_attach() => {
            let allowed: Vec<String> = record
                .requests_attach()
                .iter()
                .filter_map(attachment_thread_id)
                .collect();
            match thread_id {
                Some(thread_id) if allowed.iter().any(|allowed| allowed == thread_id) => {
                    record.attach_thread_id = Some(thread_id.to_owned());
                }
                _ => {
                    return Err(CorrelationRejection::ThreadNotAllowed {
                        thread_id: thread_id.map(str::to_owned),
                        allowed,
                    })
                }
            }
        }
        Some(bound) if Some(bound.as_str()) != thread_id => {
            return Err(CorrelationRejection::ThreadMismatch {
                expected: bound,
                actual: thread_id.map(str::to_owned),
            });
        }
        _ => {}
    }

    if let (Some(their_service), Some(sender_verkey)) = (
        record.their_service.as_ref(),
        envelope.receipt.sender_verkey.as_deref(),
    ) {
        if !their_service.has_recipient_key(sender_verkey) {
            return Err(CorrelationRejection::SenderKeyMismatch {
                sender_verkey: sender_verkey.to_owned(),
            });
        }
    }

    if let Some(service) = &envelope.service {
        record.their_service = Some(service.clone());
    }

    Ok(CorrelationUpdate {
        record,
        stale_connection_id,
    })
}

impl OobMessageProcessor {
    /// Finds the out-of-band record an inbound message belongs to, updating
    /// and persisting it. `None` covers both "no record" and "refused".
    pub async fn resolve_for_inbound(
        &self,
        envelope: &InboundEnvelope,
        connection: Option<&ConnectionRecord>,
    ) -> VcxOobResult<Option<OobRecord>> {
        Ok(self
            .correlate_inbound(envelope, connection)
            .await?
            .into_record())
    }

    /// Like [`OobMessageProcessor::resolve_for_inbound`], keeping the reason
    /// of a rejection.
    pub async fn correlate_inbound(
        &self,
        envelope: &InboundEnvelope,
        connection: Option<&ConnectionRecord>,
    ) -> VcxOobResult<InboundCorrelation> {
        let Some(record) = self.find_for_inbound(envelope, connection).await? else {
            trace!(
                "No out-of-band record for {} message on thread {:?}",
                envelope.message_type(),
                envelope.thread_id()
            );
            return Ok(InboundCorrelation::NotCorrelated);
        };
        let oob_id = record.oob_id.clone();

        let CorrelationUpdate {
            mut record,
            stale_connection_id,
        } = match correlate(record, envelope, connection) {
            Ok(update) => update,
            Err(rejection) => {
                debug!(
                    "Out-of-band record {oob_id} refused {} message: {rejection}",
                    envelope.message_type()
                );
                return Ok(InboundCorrelation::Rejected(rejection));
            }
        };

        self.records.save(&mut record).await?;
        if let Some(stale_connection_id) = stale_connection_id {
            self.remove_stale_connection(&stale_connection_id).await?;
        }
        debug!(
            "Correlated {} message on thread {:?} to out-of-band record {oob_id}",
            envelope.message_type(),
            envelope.thread_id()
        );
        Ok(InboundCorrelation::Correlated(record))
    }

    async fn find_for_inbound(
        &self,
        envelope: &InboundEnvelope,
        connection: Option<&ConnectionRecord>,
    ) -> VcxOobResult<Option<OobRecord>> {
        let receipt = &envelope.receipt;
        if let Some(parent_thread_id) = receipt.parent_thread_id.as_deref() {
            if let Some(record) = self.records.find_by_invi_msg_id(parent_thread_id).await? {
                return Ok(Some(record));
            }
        }
        if connection.is_some() {
            return Ok(None);
        }
        match (
            receipt.thread_id.as_deref(),
            receipt.recipient_verkey.as_deref(),
        ) {
            (Some(thread_id), Some(recipient_verkey)) => {
                self.records
                    .find_by_attach_thread(thread_id, Some(recipient_verkey))
                    .await
            }
            _ => Ok(None),
        }
    }

    async fn remove_stale_connection(&self, connection_id: &str) -> VcxOobResult<()> {
        match self.connections.find_by_id(connection_id).await? {
            Some(connection) => {
                self.connections.delete(&connection.connection_id).await?;
                info!("Removed connection {connection_id} replaced through connection reuse");
            }
            None => warn!("Stale connection {connection_id} is already gone"),
        }
        Ok(())
    }
}
