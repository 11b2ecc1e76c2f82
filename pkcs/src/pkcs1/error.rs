use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected SEQUENCE for {0}")]
    ExpectedSequence(&'static str),

    #[error("expected {expected} elements, got {actual}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("expected INTEGER for {field}")]
    ExpectedInteger { field: &'static str },

    #[error("Invalid version: {0} (must be 0 for two-prime or 1 for multi-prime)")]
    InvalidVersion(String),

    #[error("version {version:?} does not match {other_primes} additional prime(s)")]
    VersionMismatch {
        version: super::Version,
        other_primes: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
