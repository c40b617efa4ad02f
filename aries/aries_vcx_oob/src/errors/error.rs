use std::{error::Error, fmt};

pub mod prelude {
    pub use super::{AriesVcxOobError, AriesVcxOobErrorKind, VcxOobResult};
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum AriesVcxOobErrorKind {
    // Common
    #[error("Object is in invalid state for requested operation")]
    InvalidState,
    #[error("Invalid JSON string")]
    InvalidJson,
    #[error("Invalid message format")]
    InvalidMessageFormat,

    // Validation
    #[error("Invalid DID")]
    InvalidDid,
    #[error("Value needs to be base58")]
    NotBase58,

    // Ledger
    #[error("Ledger rejected submitted request.")]
    InvalidLedgerResponse,
    #[error("Ledger item not found.")]
    LedgerItemNotFound,

    // Storage
    #[error("Wallet record not found")]
    WalletRecordNotFound,
    #[error("Record already exists in the wallet")]
    DuplicationWalletRecord,
    #[error("Query matched more than one record")]
    AmbiguousRecordQuery,
    #[error("Storage unavailable")]
    StorageUnavailable,
}

#[derive(thiserror::Error)]
pub struct AriesVcxOobError {
    msg: String,
    kind: AriesVcxOobErrorKind,
}

fn format_error(err: &AriesVcxOobError, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Error: {}", err.msg())?;
    let mut current = err.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

impl fmt::Display for AriesVcxOobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl fmt::Debug for AriesVcxOobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl AriesVcxOobError {
    pub fn from_msg<D>(kind: AriesVcxOobErrorKind, msg: D) -> AriesVcxOobError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        AriesVcxOobError {
            msg: msg.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> AriesVcxOobErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

pub type VcxOobResult<T> = Result<T, AriesVcxOobError>;
