use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::OOB_INVITATION_TYPE;
use crate::decorators::attachment::Attachment;

fn default_invitation_type() -> String {
    OOB_INVITATION_TYPE.to_owned()
}

/// An out-of-band invitation from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0434-outofband/README.md>).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TypedBuilder)]
pub struct Invitation {
    #[builder(default = default_invitation_type())]
    #[serde(rename = "@type", default = "default_invitation_type")]
    pub msg_type: String,
    #[builder(setter(into))]
    #[serde(rename = "@id")]
    pub id: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_code: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handshake_protocols: Option<Vec<String>>,
    #[builder(default)]
    #[serde(default)]
    pub services: Vec<OobService>,
    #[builder(default, setter(strip_option))]
    #[serde(rename = "requests~attach")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_attach: Option<Vec<Attachment>>,
}

impl Invitation {
    /// Attached requests, empty when the invitation carries none.
    pub fn requests_attach(&self) -> &[Attachment] {
        self.requests_attach.as_deref().unwrap_or_default()
    }

    pub fn has_requests_attach(&self) -> bool {
        !self.requests_attach().is_empty()
    }
}

/// An entry of the invitation's `services` array: either a DID to resolve or
/// an inline service block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OobService {
    AriesService(AriesService),
    Did(String),
}

/// Inline service of an invitation. Unlike the `~service` decorator its keys
/// are `did:key` identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AriesService {
    #[builder(default = "#inline".to_owned(), setter(into))]
    pub id: String,
    #[builder(default = "did-communication".to_owned(), setter(into))]
    #[serde(rename = "type")]
    pub service_type: String,
    pub recipient_keys: Vec<String>,
    #[builder(default)]
    #[serde(default)]
    pub routing_keys: Vec<String>,
    #[builder(setter(into))]
    pub service_endpoint: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils;

    #[test]
    fn test_invitation_with_did_service() {
        let invitation = Invitation::builder()
            .id("69212a3a-d068-4f9d-a2dd-4741bca89af3")
            .label("Faber College")
            .handshake_protocols(vec!["https://didcomm.org/didexchange/1.0".to_owned()])
            .services(vec![OobService::Did(
                "did:sov:LjgpST2rjsoxYegQDRm7EL".to_owned(),
            )])
            .build();

        let expected = json!({
            "@type": "https://didcomm.org/out-of-band/1.1/invitation",
            "@id": "69212a3a-d068-4f9d-a2dd-4741bca89af3",
            "label": "Faber College",
            "handshake_protocols": ["https://didcomm.org/didexchange/1.0"],
            "services": ["did:sov:LjgpST2rjsoxYegQDRm7EL"]
        });

        test_utils::test_serde(invitation.clone(), expected);
        assert!(!invitation.has_requests_attach());
    }

    #[test]
    fn test_invitation_with_inline_service_and_requests() {
        let request = json!({
            "@type": "https://didcomm.org/present-proof/1.0/request-presentation",
            "@id": "request-1"
        });
        let service = AriesService::builder()
            .recipient_keys(vec![
                "did:key:z6MkmjY8GnV5i9YTDtPETC2uUAW6ejw3nk5mXF5yci5ab7th".to_owned(),
            ])
            .service_endpoint("http://localhost:8020")
            .build();
        let invitation = Invitation::builder()
            .id("invitation-1")
            .services(vec![OobService::AriesService(service)])
            .requests_attach(vec![Attachment::json("request-0", request.clone())])
            .build();

        let expected = json!({
            "@type": "https://didcomm.org/out-of-band/1.1/invitation",
            "@id": "invitation-1",
            "services": [{
                "id": "#inline",
                "type": "did-communication",
                "recipientKeys": ["did:key:z6MkmjY8GnV5i9YTDtPETC2uUAW6ejw3nk5mXF5yci5ab7th"],
                "routingKeys": [],
                "serviceEndpoint": "http://localhost:8020"
            }],
            "requests~attach": [{
                "@id": "request-0",
                "mime-type": "application/json",
                "data": { "json": request }
            }]
        });

        test_utils::test_serde(invitation.clone(), expected);
        assert_eq!(invitation.requests_attach().len(), 1);
    }
}
