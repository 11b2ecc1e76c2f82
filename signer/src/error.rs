use shirushi_pkcs::sec1::NamedCurve;
use thiserror::Error;

use crate::algorithm::EcCurve;

/// Coarse classification of a failure, for callers that only need to know
/// which way the input was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input is not PEM, or its payload is not a valid key structure.
    Malformed,
    /// Well-formed input naming a key type or encoding that is not handled.
    Unsupported,
    /// The signing handle failed to produce a signature.
    Signing,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Malformed => write!(f, "malformed input"),
            ErrorKind::Unsupported => write!(f, "unsupported key type"),
            ErrorKind::Signing => write!(f, "signing failure"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("PEM error: {0}")]
    Pem(#[from] shirushi_pem::Error),

    #[error("private key error: {0}")]
    Key(#[from] shirushi_pkcs::Error),

    #[error("invalid RSA key: {0}")]
    InvalidRsaKey(#[source] rsa::Error),

    #[error("RSA {0} must be a positive integer")]
    NegativeRsaComponent(&'static str),

    #[error("EC private scalar is out of range for {0}")]
    InvalidEcScalar(EcCurve),

    #[error("EC public key is not a valid point encoding")]
    InvalidEcPublicKey,

    #[error("EC public key does not match the private scalar")]
    PublicKeyMismatch,

    #[error("EC key does not name its curve")]
    MissingCurve,

    #[error("curve mismatch: algorithm names {outer}, key names {inner}")]
    CurveMismatch {
        outer: NamedCurve,
        inner: NamedCurve,
    },

    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported curve: {0}")]
    UnsupportedCurve(NamedCurve),

    #[error("digest must be {expected} bytes, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },

    #[error("RSA signing failed: {0}")]
    RsaSigning(#[source] rsa::Error),

    #[error("ECDSA signing failed: {0}")]
    EcdsaSigning(#[source] signature::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Key(shirushi_pkcs::Error::UnsupportedLabel(_))
            | Error::Key(shirushi_pkcs::Error::EncryptedKey)
            | Error::UnsupportedAlgorithm(_)
            | Error::UnsupportedCurve(_) => ErrorKind::Unsupported,
            Error::InvalidDigestLength { .. } | Error::RsaSigning(_) | Error::EcdsaSigning(_) => {
                ErrorKind::Signing
            }
            Error::Pem(_)
            | Error::Key(_)
            | Error::InvalidRsaKey(_)
            | Error::NegativeRsaComponent(_)
            | Error::InvalidEcScalar(_)
            | Error::InvalidEcPublicKey
            | Error::PublicKeyMismatch
            | Error::MissingCurve
            | Error::CurveMismatch { .. } => ErrorKind::Malformed,
        }
    }
}

impl From<shirushi_pkcs::pkcs1::Error> for Error {
    fn from(err: shirushi_pkcs::pkcs1::Error) -> Self {
        Error::Key(err.into())
    }
}

impl From<shirushi_pkcs::sec1::Error> for Error {
    fn from(err: shirushi_pkcs::sec1::Error) -> Self {
        Error::Key(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
