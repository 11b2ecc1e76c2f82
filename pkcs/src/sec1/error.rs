//! SEC1 (RFC 5915) error types

use thiserror::Error;

/// Errors that can occur when parsing SEC1 structures.
#[derive(Debug, Error)]
pub enum Error {
    /// Expected a SEQUENCE element but got something else
    #[error("expected SEQUENCE")]
    ExpectedSequence,

    /// The sequence has fewer or more elements than allowed
    #[error("expected 2 to 4 elements, got {0}")]
    InvalidElementCount(usize),

    /// Expected an INTEGER element but got something else
    #[error("expected INTEGER for {0}")]
    ExpectedInteger(&'static str),

    /// Invalid version number (must be 1 for ecPrivkeyVer1)
    #[error("invalid version: expected 1 (ecPrivkeyVer1), got {0}")]
    InvalidVersion(String),

    /// Expected an OCTET STRING element but got something else
    #[error("expected OCTET STRING")]
    ExpectedOctetString,

    #[error("empty private key")]
    EmptyPrivateKey,

    /// Unknown or unsupported elliptic curve OID
    #[error("unknown curve OID: {0}")]
    UnknownCurve(String),

    /// specifiedCurve or implicitCurve instead of a named curve
    #[error("explicit curve parameters are not supported")]
    ExplicitCurveParameters,

    #[error("invalid curve parameters: {0}")]
    InvalidParameters(&'static str),

    #[error("expected BIT STRING for publicKey")]
    ExpectedBitString,

    #[error("unexpected element: {0}")]
    UnexpectedElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;
