use std::fmt;

use thiserror::Error;

use super::RecordTags;

pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

pub struct NotFoundInfo(Option<(String, String)>);

impl NotFoundInfo {
    pub fn new(category: &str, name: &str) -> Self {
        Self(Some((category.to_string(), format!("name: {name}"))))
    }

    pub fn by_tags(category: &str, tags: &RecordTags) -> Self {
        Self(Some((category.to_string(), format!("tags: {tags}"))))
    }

    pub fn new_without_details() -> Self {
        Self(None)
    }
}

impl fmt::Debug for NotFoundInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => write!(f, "no details provided"),
            Some(payload) => write!(f, "category: {}, {}", payload.0, payload.1),
        }
    }
}

impl fmt::Display for NotFoundInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Could not find record in store: {0}")]
    RecordNotFound(NotFoundInfo),
    #[error("Duplicate record error: {0}")]
    DuplicateRecord(String),
    #[error("Query matched more than one record: {0}")]
    AmbiguousQuery(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl RecordStoreError {
    pub fn record_not_found(category: &str, name: &str) -> Self {
        Self::RecordNotFound(NotFoundInfo::new(category, name))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound(_))
    }
}
