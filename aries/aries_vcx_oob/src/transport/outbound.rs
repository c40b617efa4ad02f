use serde_json::{Map, Value};

/// An outbound message before packing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutboundMessage {
    pub payload: Map<String, Value>,
    /// Thread the message replies to, if any.
    pub reply_thread_id: Option<String>,
}

impl OutboundMessage {
    pub fn new(payload: Map<String, Value>, reply_thread_id: Option<String>) -> Self {
        Self {
            payload,
            reply_thread_id,
        }
    }
}

/// Where and how to deliver an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub endpoint: String,
    pub recipient_keys: Vec<String>,
    pub routing_keys: Vec<String>,
    pub sender_key: String,
}
