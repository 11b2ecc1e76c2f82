use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("expected SEQUENCE for {0}")]
    ExpectedSequence(&'static str),

    #[error("expected {expected} elements, got {actual}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("expected OCTET STRING for {field}")]
    ExpectedOctetString { field: &'static str },

    #[error("expected INTEGER for version")]
    ExpectedVersionInteger,

    #[error("Invalid algorithm identifier: {0}")]
    InvalidAlgorithmIdentifier(&'static str),

    #[error("invalid publicKey: {0}")]
    InvalidPublicKey(#[source] shirushi_asn1::error::Error),

    #[error("unexpected element: {0}")]
    UnexpectedElement(String),
}
