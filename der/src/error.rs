use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("no DER data")]
    Empty,
    #[error("truncated value: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("indefinite length is not allowed in DER")]
    IndefiniteLength,
    #[error("length field uses {0} octets")]
    LengthTooLong(u8),
    #[error("high tag number form is not supported")]
    HighTagNumber,
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(e: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match e {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(e.code),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
