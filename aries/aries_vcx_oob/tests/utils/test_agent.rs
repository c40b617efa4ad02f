use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use aries_vcx_oob::{
    connection::{ConnectionRecord, ConnectionStore},
    errors::error::prelude::*,
    ledger::{IndyLedgerLookup, LedgerRead},
    oob_record::OobRecord,
    processor::OobMessageProcessor,
    settings::OobProcessorConfig,
    storage::{in_memory::InMemoryRecordStore, RecordStore},
    transport::{InboundMessage, InboundRouter},
};
use async_trait::async_trait;
use serde_json::json;

/// Remembers every routed message.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    routed: Mutex<Vec<(InboundMessage, bool)>>,
}

impl RecordingRouter {
    pub fn routed(&self) -> Vec<(InboundMessage, bool)> {
        self.routed.lock().unwrap().clone()
    }
}

impl InboundRouter for RecordingRouter {
    fn route(&self, message: InboundMessage, is_fresh_session: bool) {
        self.routed.lock().unwrap().push((message, is_fresh_session));
    }
}

#[derive(Debug, Default)]
pub struct FakeConnectionStore {
    connections: Mutex<HashMap<String, ConnectionRecord>>,
}

impl FakeConnectionStore {
    pub fn insert(&self, connection_id: &str) {
        self.connections
            .lock()
            .unwrap()
            .insert(connection_id.to_owned(), ConnectionRecord::new(connection_id));
    }

    pub fn contains(&self, connection_id: &str) -> bool {
        self.connections.lock().unwrap().contains_key(connection_id)
    }
}

#[async_trait]
impl ConnectionStore for FakeConnectionStore {
    async fn find_by_id(&self, connection_id: &str) -> VcxOobResult<Option<ConnectionRecord>> {
        Ok(self.connections.lock().unwrap().get(connection_id).cloned())
    }

    async fn delete(&self, connection_id: &str) -> VcxOobResult<()> {
        self.connections.lock().unwrap().remove(connection_id);
        Ok(())
    }
}

/// Answers ledger reads the way an Indy pool does, from canned data.
#[derive(Debug, Default)]
pub struct FakeLedgerRead {
    endpoints: HashMap<String, String>,
    verkeys: HashMap<String, String>,
}

impl FakeLedgerRead {
    pub fn with_nym(mut self, did: &str, verkey: &str, endpoint: &str) -> Self {
        self.verkeys.insert(did.to_owned(), verkey.to_owned());
        self.endpoints.insert(did.to_owned(), endpoint.to_owned());
        self
    }

    fn reply(data: Option<serde_json::Value>) -> String {
        let data = data.map(|data| data.to_string());
        json!({ "op": "REPLY", "result": { "data": data } }).to_string()
    }
}

#[async_trait]
impl LedgerRead for FakeLedgerRead {
    async fn get_attr(&self, target_did: &str, attr_name: &str) -> VcxOobResult<String> {
        let data = self
            .endpoints
            .get(target_did)
            .filter(|_| attr_name == "endpoint")
            .map(|endpoint| json!({ "endpoint": { "endpoint": endpoint } }));
        Ok(Self::reply(data))
    }

    async fn get_nym(&self, did: &str) -> VcxOobResult<String> {
        let data = self
            .verkeys
            .get(did)
            .map(|verkey| json!({ "dest": did, "verkey": verkey }));
        Ok(Self::reply(data))
    }
}

/// An agent's out-of-band processor wired to in-memory collaborators.
pub struct TestAgent {
    pub processor: OobMessageProcessor,
    pub router: Arc<RecordingRouter>,
    pub connections: Arc<FakeConnectionStore>,
}

pub fn create_test_agent(endpoint: &str, ledger: FakeLedgerRead) -> TestAgent {
    let store = OobRecord::UNIQUE_TAG_SETS.iter().fold(
        InMemoryRecordStore::new(endpoint),
        |store, tags| store.with_unique_tags(OobRecord::RECORD_CATEGORY, tags),
    );
    let store: Arc<dyn RecordStore> = Arc::new(store);
    let router = Arc::new(RecordingRouter::default());
    let connections = Arc::new(FakeConnectionStore::default());
    let config = OobProcessorConfig::builder()
        .default_endpoint(endpoint.parse().unwrap())
        .build();

    let processor = OobMessageProcessor::new(
        config,
        store,
        connections.clone(),
        Arc::new(IndyLedgerLookup::new(ledger)),
        router.clone(),
    );
    TestAgent {
        processor,
        router,
        connections,
    }
}
