use messages::decorators::{
    service::{Service, SERVICE_DECORATOR},
    thread::THREAD_DECORATOR,
};
use serde_json::{Map, Value};

use super::OobMessageProcessor;
use crate::{
    errors::error::prelude::*,
    transport::{ConnectionTarget, OutboundMessage},
};

/// Adds our `~service` (unless a non-null one is present) and points `~thread.pthid`
/// at the invitation. Leaves the payload untouched on error.
fn stamp_reply(
    payload: &mut Map<String, Value>,
    our_service: &Service,
    invi_msg_id: &str,
) -> VcxOobResult<()> {
    if let Some(thread) = payload.get(THREAD_DECORATOR) {
        if !thread.is_object() {
            return Err(AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidMessageFormat,
                format!("{THREAD_DECORATOR} decorator of outbound message is not an object"),
            ));
        }
    }
    let service = serde_json::to_value(our_service)?;

    if payload.get(SERVICE_DECORATOR).map_or(true, Value::is_null) {
        payload.insert(SERVICE_DECORATOR.to_owned(), service);
    }
    if let Value::Object(thread) = payload
        .entry(THREAD_DECORATOR)
        .or_insert_with(|| Value::Object(Map::new()))
    {
        thread.insert("pthid".to_owned(), Value::String(invi_msg_id.to_owned()));
    }
    Ok(())
}

impl OobMessageProcessor {
    /// Addresses a connectionless reply. Returns `None` when the message does
    /// not reply to an out-of-band exchange.
    pub async fn resolve_target(
        &self,
        outbound: &mut OutboundMessage,
    ) -> VcxOobResult<Option<ConnectionTarget>> {
        let Some(thread_id) = outbound.reply_thread_id.as_deref() else {
            return Ok(None);
        };
        let Some(record) = self.records.find_by_attach_thread(thread_id, None).await? else {
            trace!("No out-of-band record bound to thread {thread_id}");
            return Ok(None);
        };

        let Some(our_recipient_key) = record.our_recipient_key.clone() else {
            return Err(AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidState,
                format!("Out-of-band record {} has no recipient key of ours", record.oob_id),
            ));
        };
        let Some(their_service) = record.their_service else {
            return Err(AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidState,
                format!("Out-of-band record {} has no service of the peer", record.oob_id),
            ));
        };

        let our_service = Service::builder()
            .recipient_keys(vec![our_recipient_key.clone()])
            .service_endpoint(self.config.default_endpoint())
            .build();
        stamp_reply(&mut outbound.payload, &our_service, &record.invi_msg_id)?;
        debug!(
            "Addressed reply on thread {thread_id} to {} for out-of-band record {}",
            their_service.service_endpoint, record.oob_id
        );

        Ok(Some(ConnectionTarget {
            endpoint: their_service.service_endpoint,
            recipient_keys: their_service.recipient_keys,
            routing_keys: their_service.routing_keys,
            sender_key: our_recipient_key,
        }))
    }
}
