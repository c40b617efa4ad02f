use std::sync::Arc;

use messages::{
    decorators::{attachment::Attachment, service::Service},
    msg_fields::protocols::out_of_band::invitation::Invitation,
};
use serde_json::json;

use super::OobMessageProcessor;
use crate::{
    connection::MockConnectionStore,
    ledger::MockLedgerLookup,
    oob_record::OobRecord,
    settings::OobProcessorConfig,
    storage::in_memory::InMemoryRecordStore,
    transport::MockInboundRouter,
};

pub const OUR_KEY: &str = "7NVpXqYskU3csdYi3SL6QpzvQWvaDYPWXQWenzPiaBGP";
pub const THEIR_KEY: &str = "8HH5gYEeNc3z7PYXmd54d4x6qAfCNrqQqEB3nS7Zfu7K";
pub const THEIR_DID_KEY: &str = "did:key:z6MkmjY8GnV5i9YTDtPETC2uUAW6ejw3nk5mXF5yci5ab7th";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8020/";

/// Collaborator mocks; any call without an expectation fails the test.
#[derive(Default)]
pub struct ProcessorMocks {
    pub connections: MockConnectionStore,
    pub ledger: MockLedgerLookup,
    pub router: MockInboundRouter,
}

impl ProcessorMocks {
    pub fn build(self) -> OobMessageProcessor {
        let store = OobRecord::UNIQUE_TAG_SETS.iter().fold(
            InMemoryRecordStore::new("processor-test"),
            |store, tags| store.with_unique_tags(OobRecord::RECORD_CATEGORY, tags),
        );
        let config = OobProcessorConfig::builder()
            .default_endpoint(DEFAULT_ENDPOINT.parse().unwrap())
            .build();
        OobMessageProcessor::new(
            config,
            Arc::new(store),
            Arc::new(self.connections),
            Arc::new(self.ledger),
            Arc::new(self.router),
        )
    }
}

pub fn invitation(id: &str) -> Invitation {
    Invitation::builder().id(id).build()
}

/// Invitation carrying one request attachment per thread id.
pub fn invitation_with_requests(id: &str, thread_ids: &[&str]) -> Invitation {
    let requests = thread_ids
        .iter()
        .enumerate()
        .map(|(idx, thid)| {
            Attachment::json(
                format!("request-{idx}"),
                json!({
                    "@type": "https://didcomm.org/present-proof/1.0/request-presentation",
                    "@id": thid,
                }),
            )
        })
        .collect();
    Invitation::builder().id(id).requests_attach(requests).build()
}

pub fn sender_record(invitation: Invitation) -> OobRecord {
    OobRecord::new_sender(invitation, OUR_KEY)
}

pub fn their_service(keys: &[&str]) -> Service {
    Service::builder()
        .recipient_keys(keys.iter().map(|key| key.to_string()).collect())
        .service_endpoint("http://localhost:8030")
        .build()
}
