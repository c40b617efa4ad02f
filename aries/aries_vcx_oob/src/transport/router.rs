use serde_json::Value;

use super::MessageReceipt;

/// A message handed over to the protocol handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub payload: Value,
    pub connection_id: Option<String>,
    pub receipt: MessageReceipt,
}

/// Dispatches inbound messages to protocol handlers. Fire and forget.
#[cfg_attr(test, mockall::automock)]
pub trait InboundRouter: Send + Sync {
    fn route(&self, message: InboundMessage, is_fresh_session: bool);
}
