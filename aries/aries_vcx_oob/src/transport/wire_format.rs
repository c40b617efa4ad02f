use async_trait::async_trait;
use messages::decorators::{
    service::{Service, SERVICE_DECORATOR},
    thread::{Thread, THREAD_DECORATOR},
};
use serde_json::Value;

use super::{InboundEnvelope, MessageReceipt};
use crate::errors::error::prelude::*;

/// Decodes a raw message into an [`InboundEnvelope`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WireFormat: Send + Sync {
    async fn parse_message(&self, message: &str) -> VcxOobResult<InboundEnvelope>;
}

/// Wire format for plaintext (already unpacked) JSON messages. Sender and
/// recipient keys are unknown at this level and stay unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWireFormat;

impl JsonWireFormat {
    pub fn decode(&self, payload: Value) -> VcxOobResult<InboundEnvelope> {
        let message = payload.as_object().ok_or_else(|| {
            AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidMessageFormat,
                "Message is not a JSON object",
            )
        })?;

        let thread: Option<Thread> = message
            .get(THREAD_DECORATOR)
            .map(|thread| serde_json::from_value(thread.clone()))
            .transpose()
            .map_err(|err| {
                AriesVcxOobError::from_msg(
                    AriesVcxOobErrorKind::InvalidMessageFormat,
                    format!("Invalid {THREAD_DECORATOR} decorator: {err}"),
                )
            })?;
        let service: Option<Service> = message
            .get(SERVICE_DECORATOR)
            .map(|service| serde_json::from_value(service.clone()))
            .transpose()
            .map_err(|err| {
                AriesVcxOobError::from_msg(
                    AriesVcxOobErrorKind::InvalidMessageFormat,
                    format!("Invalid {SERVICE_DECORATOR} decorator: {err}"),
                )
            })?;

        let message_id = message.get("@id").and_then(Value::as_str).map(str::to_owned);
        let message_type = message
            .get("@type")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let (thread_id, parent_thread_id) = match thread {
            Some(thread) => (thread.thid.or(message_id), thread.pthid),
            None => (message_id, None),
        };

        Ok(InboundEnvelope {
            payload,
            message_type,
            receipt: MessageReceipt {
                parent_thread_id,
                thread_id,
                ..MessageReceipt::default()
            },
            service,
        })
    }
}

#[async_trait]
impl WireFormat for JsonWireFormat {
    async fn parse_message(&self, message: &str) -> VcxOobResult<InboundEnvelope> {
        self.decode(serde_json::from_str(message)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_parse_threaded_message() {
        let message = json!({
            "@type": "https://didcomm.org/present-proof/1.0/presentation",
            "@id": "msg-2",
            "~thread": { "thid": "thread-1", "pthid": "invitation-1" },
            "~service": {
                "recipientKeys": ["K1"],
                "routingKeys": [],
                "serviceEndpoint": "http://localhost:8030"
            }
        });

        let envelope = JsonWireFormat
            .parse_message(&message.to_string())
            .await
            .unwrap();

        assert_eq!(envelope.thread_id(), Some("thread-1"));
        assert_eq!(
            envelope.receipt.parent_thread_id.as_deref(),
            Some("invitation-1")
        );
        assert_eq!(
            envelope.message_type(),
            "https://didcomm.org/present-proof/1.0/presentation"
        );
        assert_eq!(envelope.service.unwrap().recipient_keys, vec!["K1"]);
        assert_eq!(envelope.payload, message);
    }

    #[test]
    fn test_thread_defaults_to_message_id() {
        let envelope = JsonWireFormat
            .decode(json!({ "@id": "msg-1", "~thread": { "pthid": "invitation-1" } }))
            .unwrap();

        assert_eq!(envelope.thread_id(), Some("msg-1"));
        assert_eq!(
            envelope.receipt.parent_thread_id.as_deref(),
            Some("invitation-1")
        );
        assert!(envelope.service.is_none());
    }

    #[test]
    fn test_rejects_malformed_service() {
        let err = JsonWireFormat
            .decode(json!({ "@id": "msg-1", "~service": { "serviceEndpoint": 1 } }))
            .unwrap_err();

        assert_eq!(err.kind(), AriesVcxOobErrorKind::InvalidMessageFormat);
    }

    #[test]
    fn test_rejects_non_object() {
        let err = JsonWireFormat.decode(json!(["not", "a", "message"])).unwrap_err();

        assert_eq!(err.kind(), AriesVcxOobErrorKind::InvalidMessageFormat);
    }
}
