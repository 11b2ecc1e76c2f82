//! PKCS#1: RSA private keys ([RFC 8017](https://datatracker.ietf.org/doc/html/rfc8017)).

pub mod error;
mod types;

pub use error::{Error, Result};
pub use types::{OtherPrimeInfo, RSAPrivateKey, Version};
