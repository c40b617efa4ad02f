use messages::decorators::service::Service;
use serde_json::Value;
use typed_builder::TypedBuilder;

/// Correlation metadata the transport extracted while unpacking a message.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
pub struct MessageReceipt {
    #[builder(default, setter(strip_option, into))]
    pub parent_thread_id: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub thread_id: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub sender_verkey: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub recipient_verkey: Option<String>,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct InboundEnvelope {
    #[builder(default = Value::Object(Default::default()))]
    pub payload: Value,
    #[builder(default, setter(strip_option, into))]
    pub message_type: Option<String>,
    #[builder(default)]
    pub receipt: MessageReceipt,
    /// The message's `~service` decorator, if it carried one.
    #[builder(default, setter(strip_option))]
    pub service: Option<Service>,
}

impl InboundEnvelope {
    pub fn thread_id(&self) -> Option<&str> {
        self.receipt.thread_id.as_deref()
    }

    pub fn message_type(&self) -> &str {
        self.message_type.as_deref().unwrap_or("unknown")
    }
}
