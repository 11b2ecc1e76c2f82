//! # shirushi
//!
//! Core traits shared by the shirushi private key toolkit.
//!
//! Every layer of the toolkit turns one representation of a key into the
//! next one through the same [`decoder::Decoder`] trait:
//!
//! ```text
//! bytes → Pem → Vec<u8> → Der → ASN1Object → PrivateKey → SignerInfo
//! ```
//!
//! The concrete implementations live in the `shirushi-pem`, `shirushi-der`,
//! `shirushi-asn1`, `shirushi-pkcs` and `shirushi-signer` crates. Keeping the
//! trait here lets each crate add conversions out of its own types without
//! depending on the layers above it.
//!
//! ```ignore
//! use shirushi::decoder::Decoder;
//! use shirushi_der::Der;
//! use shirushi_asn1::ASN1Object;
//!
//! let der: Der = vec![0x30, 0x03, 0x02, 0x01, 0x01].decode()?;
//! let asn1: ASN1Object = der.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
