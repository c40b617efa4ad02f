use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{LedgerLookup, LedgerRead};
use crate::errors::error::prelude::*;

const DID_SOV_PREFIX: &str = "did:sov:";
const ENDPOINT_ATTR: &str = "endpoint";

#[derive(Debug, Deserialize)]
struct EndpointAttrib {
    endpoint: Option<EndpointData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointData {
    endpoint: Option<String>,
}

/// [`LedgerLookup`] over an Indy ledger: the endpoint comes from the DID's
/// `endpoint` ATTRIB, the key from its NYM.
#[derive(Debug)]
pub struct IndyLedgerLookup<R> {
    reader: R,
}

impl<R: LedgerRead> IndyLedgerLookup<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

fn unqualify(did: &str) -> &str {
    did.strip_prefix(DID_SOV_PREFIX).unwrap_or(did)
}

/// Pulls the JSON encoded `result.data` out of a ledger reply.
fn reply_data(reply: &str, did: &str) -> VcxOobResult<Value> {
    let reply: Value = serde_json::from_str(reply)?;
    match &reply["result"]["data"] {
        Value::String(data) => Ok(serde_json::from_str(data)?),
        Value::Null => Err(AriesVcxOobError::from_msg(
            AriesVcxOobErrorKind::LedgerItemNotFound,
            format!("Ledger has no data for DID {did}"),
        )),
        other => Err(AriesVcxOobError::from_msg(
            AriesVcxOobErrorKind::InvalidLedgerResponse,
            format!("Unexpected ledger reply data: {other}"),
        )),
    }
}

/// Expands an abbreviated verkey (`~` prefixed) against the DID it belongs to.
fn full_verkey(did: &str, verkey: &str) -> VcxOobResult<String> {
    match verkey.strip_prefix('~') {
        None => Ok(verkey.to_string()),
        Some(abbreviated) => {
            let mut key = bs58::decode(did).into_vec()?;
            key.extend(bs58::decode(abbreviated).into_vec()?);
            Ok(bs58::encode(key).into_string())
        }
    }
}

#[async_trait]
impl<R: LedgerRead> LedgerLookup for IndyLedgerLookup<R> {
    async fn resolve_endpoint(&self, did: &str) -> VcxOobResult<String> {
        let nym = unqualify(did);
        let reply = self.reader.get_attr(nym, ENDPOINT_ATTR).await?;
        let attrib: EndpointAttrib = serde_json::from_value(reply_data(&reply, nym)?)?;
        attrib
            .endpoint
            .and_then(|data| data.endpoint)
            .ok_or_else(|| {
                AriesVcxOobError::from_msg(
                    AriesVcxOobErrorKind::LedgerItemNotFound,
                    format!("No endpoint registered on ledger for DID {nym}"),
                )
            })
    }

    async fn resolve_key(&self, did: &str) -> VcxOobResult<String> {
        let nym = unqualify(did);
        let reply = self.reader.get_nym(nym).await?;
        let data = reply_data(&reply, nym)?;
        let verkey = data["verkey"].as_str().ok_or_else(|| {
            AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidLedgerResponse,
                "Failed to parse verkey from nym data",
            )
        })?;
        full_verkey(nym, verkey)
    }
}
