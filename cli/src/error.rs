use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {}", .0.kind(), .0)]
    Signer(#[from] shirushi_signer::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<shirushi_pem::Error> for Error {
    fn from(err: shirushi_pem::Error) -> Self {
        Error::Signer(err.into())
    }
}

impl From<shirushi_pkcs::Error> for Error {
    fn from(err: shirushi_pkcs::Error) -> Self {
        Error::Signer(err.into())
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
