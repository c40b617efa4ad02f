//! Inbound and outbound message shapes exchanged with the transport layer.

mod envelope;
mod outbound;
mod router;
mod wire_format;

pub use self::{
    envelope::{InboundEnvelope, MessageReceipt},
    outbound::{ConnectionTarget, OutboundMessage},
    router::{InboundMessage, InboundRouter},
    wire_format::{JsonWireFormat, WireFormat},
};

#[cfg(test)]
pub use self::router::MockInboundRouter;
