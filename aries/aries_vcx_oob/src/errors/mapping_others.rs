use did_key::DidKeyError;
use messages::error::MessagesError;

use super::error::{AriesVcxOobError, AriesVcxOobErrorKind};
use crate::storage::RecordStoreError;

impl From<serde_json::Error> for AriesVcxOobError {
    fn from(err: serde_json::Error) -> Self {
        AriesVcxOobError::from_msg(AriesVcxOobErrorKind::InvalidJson, err.to_string())
    }
}

impl From<bs58::decode::Error> for AriesVcxOobError {
    fn from(err: bs58::decode::Error) -> Self {
        AriesVcxOobError::from_msg(AriesVcxOobErrorKind::NotBase58, err.to_string())
    }
}

impl From<DidKeyError> for AriesVcxOobError {
    fn from(err: DidKeyError) -> Self {
        AriesVcxOobError::from_msg(AriesVcxOobErrorKind::InvalidDid, err.to_string())
    }
}

impl From<MessagesError> for AriesVcxOobError {
    fn from(err: MessagesError) -> Self {
        AriesVcxOobError::from_msg(AriesVcxOobErrorKind::InvalidMessageFormat, err.to_string())
    }
}

impl From<RecordStoreError> for AriesVcxOobError {
    fn from(err: RecordStoreError) -> Self {
        let kind = match &err {
            RecordStoreError::RecordNotFound(_) => AriesVcxOobErrorKind::WalletRecordNotFound,
            RecordStoreError::DuplicateRecord(_) => AriesVcxOobErrorKind::DuplicationWalletRecord,
            RecordStoreError::AmbiguousQuery(_) => AriesVcxOobErrorKind::AmbiguousRecordQuery,
            RecordStoreError::Unavailable(_) => AriesVcxOobErrorKind::StorageUnavailable,
        };
        AriesVcxOobError::from_msg(kind, err.to_string())
    }
}
