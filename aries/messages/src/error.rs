use thiserror::Error;

pub type MessagesResult<T> = Result<T, MessagesError>;

#[derive(Debug, Error)]
pub enum MessagesError {
    #[error("Attachment content is not base64: {0}")]
    NotBase64(#[from] base64::DecodeError),
    #[error("Attachment content is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Attachment content of type {0} can not be read inline")]
    UnsupportedAttachmentType(&'static str),
}
