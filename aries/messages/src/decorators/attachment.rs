use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;
use url::Url;

use crate::error::{MessagesError, MessagesResult};

/// Struct representing the `~attach` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/concepts/0017-attachments/README.md>).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TypedBuilder)]
pub struct Attachment {
    #[builder(default, setter(strip_option, into))]
    #[serde(rename = "@id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(rename = "mime-type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: AttachmentData,
}

impl Attachment {
    pub fn json(id: impl Into<String>, content: Value) -> Self {
        Self::builder()
            .id(id)
            .mime_type("application/json")
            .data(AttachmentData::new(AttachmentType::Json(content)))
            .build()
    }

    /// Decodes the attached message into its JSON form.
    pub fn content(&self) -> MessagesResult<Value> {
        match &self.data.content {
            AttachmentType::Json(value) => Ok(value.clone()),
            AttachmentType::Base64(encoded) => {
                let bytes = STANDARD.decode(encoded)?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            AttachmentType::Links(_) => Err(MessagesError::UnsupportedAttachmentType("links")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TypedBuilder)]
pub struct AttachmentData {
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jws: Option<Value>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(flatten)]
    pub content: AttachmentType,
}

impl AttachmentData {
    pub fn new(content: AttachmentType) -> Self {
        Self::builder().content(content).build()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentType {
    Base64(String),
    Json(Value),
    Links(Vec<Url>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::misc::test_utils;

    #[test]
    fn test_json_attachment() {
        let message = json!({ "@id": "msg-1", "~thread": { "thid": "thread-1" } });
        let attachment = Attachment::json("request-0", message.clone());

        let expected = json!({
            "@id": "request-0",
            "mime-type": "application/json",
            "data": { "json": message }
        });

        test_utils::test_serde(attachment.clone(), expected);
        assert_eq!(attachment.content().unwrap(), message);
    }

    #[test]
    fn test_base64_attachment_content() {
        let message = json!({ "@id": "msg-1" });
        let encoded = STANDARD.encode(message.to_string());
        let attachment = Attachment::builder()
            .data(AttachmentData::new(AttachmentType::Base64(encoded)))
            .build();

        assert_eq!(attachment.content().unwrap(), message);
    }

    #[test]
    fn test_links_attachment_has_no_inline_content() {
        let attachment = Attachment::builder()
            .data(AttachmentData::new(AttachmentType::Links(vec![
                "https://example.org/attachment".parse().unwrap(),
            ])))
            .build();

        assert!(matches!(
            attachment.content(),
            Err(MessagesError::UnsupportedAttachmentType("links"))
        ));
    }
}
