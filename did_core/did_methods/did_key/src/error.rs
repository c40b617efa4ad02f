use thiserror::Error;

#[derive(Debug, Error)]
pub enum DidKeyError {
    #[error("Not a did:key identifier: {0}")]
    InvalidDid(String),
    #[error("Base 58 decoding error")]
    Base58DecodingError(#[from] bs58::decode::Error),
    #[error("Multibase decoding error")]
    MultibaseDecodingError(#[from] multibase::Error),
    #[error("Varint decoding error: {0}")]
    VarintDecodingError(String),
    #[error("Unsupported multicodec descriptor: {0}")]
    UnsupportedMulticodecDescriptor(u64),
}

impl From<unsigned_varint::decode::Error> for DidKeyError {
    fn from(error: unsigned_varint::decode::Error) -> Self {
        Self::VarintDecodingError(error.to_string())
    }
}
