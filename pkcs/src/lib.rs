//! Private key containers: PKCS#1 (RSA), SEC1 (EC) and PKCS#8 (generic).
//!
//! Every structure decodes from an [`Element`](shirushi_asn1::Element) and,
//! through the full pipeline, from a [`Pem`](shirushi_pem::Pem) block.
//! [`PrivateKey`] picks the structure from the PEM label alone.

pub mod error;
pub mod pkcs1;
pub mod pkcs8;
mod private_key;
pub mod sec1;

pub use error::{Error, Result};
pub use private_key::{KeyAlgorithm, PrivateKey, PrivateKeyExt};

use shirushi::decoder::Decoder;
use shirushi_asn1::{ASN1Object, Element};
use shirushi_der::Der;
use shirushi_pem::Pem;

/// Decodes the body of `pem` down to its only top level element.
pub(crate) fn pem_to_element(pem: &Pem) -> Result<Element> {
    let bytes: Vec<u8> = pem.decode()?;
    let der: Der = bytes.decode()?;
    let asn1_obj: ASN1Object = der.decode()?;
    single_element(&asn1_obj)
}

/// Returns the only element of `asn1_obj`; anything after it is an error.
pub(crate) fn single_element(asn1_obj: &ASN1Object) -> Result<Element> {
    match asn1_obj.elements() {
        [] => Err(Error::EmptyAsn1Object),
        [element] => Ok(element.clone()),
        [_, rest @ ..] => Err(Error::TrailingData(rest.len())),
    }
}
