use did_key::DidKey;
use messages::{
    decorators::service::Service,
    msg_fields::protocols::out_of_band::invitation::{AriesService, OobService},
};
use serde_json::Value;

use super::OobMessageProcessor;
use crate::{
    errors::error::prelude::*,
    oob_record::OobRecord,
    transport::{InboundEnvelope, InboundMessage},
};

const DID_KEY_PREFIX: &str = "did:key:";

/// Raw base58 verkey of a `did:key`; other key references are kept as they are.
fn to_verkey(key: &str) -> VcxOobResult<String> {
    if key.starts_with(DID_KEY_PREFIX) {
        Ok(DidKey::from_did(key)?.public_key_base58())
    } else {
        Ok(key.to_owned())
    }
}

fn to_verkeys(keys: &[String]) -> VcxOobResult<Vec<String>> {
    keys.iter().map(|key| to_verkey(key)).collect()
}

/// `~service` block equivalent to an invitation's inline service.
fn service_from_inline(service: &AriesService) -> VcxOobResult<Service> {
    Ok(Service::builder()
        .recipient_keys(to_verkeys(&service.recipient_keys)?)
        .routing_keys(to_verkeys(&service.routing_keys)?)
        .service_endpoint(service.service_endpoint.as_str())
        .build())
}

impl OobMessageProcessor {
    async fn their_service(&self, record: &OobRecord) -> VcxOobResult<Service> {
        let service = record.invitation.services.first().ok_or_else(|| {
            AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidState,
                format!(
                    "Invitation {} of out-of-band record {} has no services",
                    record.invi_msg_id, record.oob_id
                ),
            )
        })?;
        match service {
            OobService::Did(did) => {
                let endpoint = self.ledger.resolve_endpoint(did).await?;
                let verkey = self.ledger.resolve_key(did).await?;
                Ok(Service::builder()
                    .recipient_keys(vec![verkey])
                    .service_endpoint(endpoint)
                    .build())
            }
            OobService::AriesService(service) => service_from_inline(service),
        }
    }

    /// Prepares a connectionless record for the first message routed to it,
    /// then hands the message over to the inbound router.
    pub async fn prime_record(
        &self,
        mut record: OobRecord,
        envelope: &InboundEnvelope,
    ) -> VcxOobResult<OobRecord> {
        if record.connection_id.is_none() {
            record.their_service = Some(self.their_service(&record).await?);
        }
        record.attach_thread_id = envelope.thread_id().map(str::to_owned);
        self.records.save(&mut record).await?;
        debug!(
            "Primed out-of-band record {} for thread {:?}",
            record.oob_id, record.attach_thread_id
        );

        self.inbound_router.route(
            InboundMessage {
                payload: envelope.payload.clone(),
                connection_id: record.connection_id.clone(),
                receipt: envelope.receipt.clone(),
            },
            false,
        );
        Ok(record)
    }

    /// Decodes a plaintext message and primes `record` with it.
    pub async fn handle_message(
        &self,
        message: &Value,
        record: OobRecord,
    ) -> VcxOobResult<OobRecord> {
        let envelope = self.wire_format.parse_message(&message.to_string()).await?;
        self.prime_record(record, &envelope).await
    }
}
