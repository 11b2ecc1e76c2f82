//! PKCS#8: Private-Key Information Syntax Specification
//!
//! This module implements [RFC 5958](https://datatracker.ietf.org/doc/html/rfc5958) (Asymmetric Key Packages)
//! which obsoletes RFC 5208 (PKCS#8 v1.2).
//!
//! The wrapper names the key algorithm; the inner key is kept as raw octets
//! and parsed on demand with [`OneAsymmetricKey::private_key_element`].

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    AlgorithmIdentifier, OID_EC_PUBLIC_KEY, OID_ED448, OID_ED25519, OID_RSA_ENCRYPTION,
    OneAsymmetricKey, PrivateKeyInfo, Version,
};
