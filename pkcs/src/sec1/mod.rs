//! SEC1 - Elliptic Curve Private Key Structure
//!
//! This module implements the ECPrivateKey structure as defined in
//! [RFC 5915](https://datatracker.ietf.org/doc/html/rfc5915) (Elliptic Curve Private Key Format).
//!
//! Only named curves are accepted as domain parameters.

pub mod error;
mod types;

pub use error::{Error, Result};
pub use types::{ECPrivateKey, NamedCurve};
