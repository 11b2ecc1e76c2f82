use shirushi_pem::Label;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("PEM error: {0}")]
    Pem(#[from] shirushi_pem::Error),

    #[error("DER error: {0}")]
    Der(#[from] shirushi_der::Error),

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] shirushi_asn1::error::Error),

    #[error("PKCS#1 error: {0}")]
    Pkcs1(#[from] crate::pkcs1::Error),

    #[error("SEC1 error: {0}")]
    Sec1(#[from] crate::sec1::Error),

    #[error("PKCS#8 error: {0}")]
    Pkcs8(#[from] crate::pkcs8::Error),

    #[error("empty ASN1Object")]
    EmptyAsn1Object,

    #[error("{0} unexpected element(s) after the key structure")]
    TrailingData(usize),

    #[error("unsupported PEM label: {0}")]
    UnsupportedLabel(Label),

    #[error("encrypted private keys are not supported")]
    EncryptedKey,
}

pub type Result<T> = std::result::Result<T, Error>;
