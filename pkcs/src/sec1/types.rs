//! SEC1 (RFC 5915) ECPrivateKey structure

use std::fmt::Display;

use shirushi::decoder::{DecodableFrom, Decoder};
use shirushi_asn1::{BitString, Element, ObjectIdentifier, OctetString};
use shirushi_pem::Pem;

use super::error::{Error, Result};
use crate::private_key::{KeyAlgorithm, PrivateKeyExt};

/*
RFC 5915 - Elliptic Curve Private Key Structure

ECPrivateKey ::= SEQUENCE {
    version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
    privateKey     OCTET STRING,
    parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
    publicKey  [1] BIT STRING OPTIONAL
}

RFC 5480 - ECParameters ::= CHOICE {
    namedCurve         OBJECT IDENTIFIER
    -- implicitCurve   NULL
    -- specifiedCurve  SpecifiedECDomain
}
*/

/// Named curves from RFC 5480 section 2.1.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    Secp192r1,
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl NamedCurve {
    pub const OID_SECP192R1: &'static str = "1.2.840.10045.3.1.1";
    pub const OID_SECP224R1: &'static str = "1.3.132.0.33";
    pub const OID_SECP256R1: &'static str = "1.2.840.10045.3.1.7";
    pub const OID_SECP384R1: &'static str = "1.3.132.0.34";
    pub const OID_SECP521R1: &'static str = "1.3.132.0.35";

    pub fn oid(&self) -> &'static str {
        match self {
            NamedCurve::Secp192r1 => Self::OID_SECP192R1,
            NamedCurve::Secp224r1 => Self::OID_SECP224R1,
            NamedCurve::Secp256r1 => Self::OID_SECP256R1,
            NamedCurve::Secp384r1 => Self::OID_SECP384R1,
            NamedCurve::Secp521r1 => Self::OID_SECP521R1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedCurve::Secp192r1 => "secp192r1",
            NamedCurve::Secp224r1 => "secp224r1",
            NamedCurve::Secp256r1 => "secp256r1",
            NamedCurve::Secp384r1 => "secp384r1",
            NamedCurve::Secp521r1 => "secp521r1",
        }
    }

    /// Field size in bits.
    pub fn bits(&self) -> u32 {
        match self {
            NamedCurve::Secp192r1 => 192,
            NamedCurve::Secp224r1 => 224,
            NamedCurve::Secp256r1 => 256,
            NamedCurve::Secp384r1 => 384,
            NamedCurve::Secp521r1 => 521,
        }
    }
}

impl Display for NamedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&ObjectIdentifier> for NamedCurve {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self> {
        [
            NamedCurve::Secp192r1,
            NamedCurve::Secp224r1,
            NamedCurve::Secp256r1,
            NamedCurve::Secp384r1,
            NamedCurve::Secp521r1,
        ]
        .into_iter()
        .find(|curve| *oid == curve.oid())
        .ok_or_else(|| Error::UnknownCurve(oid.to_string()))
    }
}

impl DecodableFrom<Element> for NamedCurve {}

impl Decoder<Element, NamedCurve> for Element {
    type Error = Error;

    /// Decodes an `ECParameters` choice, accepting only `namedCurve`.
    fn decode(&self) -> Result<NamedCurve> {
        match self {
            Element::ObjectIdentifier(oid) => NamedCurve::try_from(oid),
            Element::Sequence(_) | Element::Null => Err(Error::ExplicitCurveParameters),
            other => Err(Error::InvalidParameters(other.type_name())),
        }
    }
}

/// SEC1 EC Private Key structure (RFC 5915)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ECPrivateKey {
    /// Private key value as octet string
    pub private_key: OctetString,
    /// EC parameters (named curve) - OPTIONAL [0]
    pub parameters: Option<NamedCurve>,
    /// Public key - OPTIONAL [1]
    pub public_key: Option<BitString>,
}

impl ECPrivateKey {
    /// Returns the curve name if parameters are present.
    pub fn curve_name(&self) -> Option<&'static str> {
        self.parameters.as_ref().map(NamedCurve::name)
    }
}

impl DecodableFrom<Element> for ECPrivateKey {}

impl Decoder<Element, ECPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<ECPrivateKey> {
        let elements = match self {
            Element::Sequence(elements) => elements,
            _ => return Err(Error::ExpectedSequence),
        };
        if !(2..=4).contains(&elements.len()) {
            return Err(Error::InvalidElementCount(elements.len()));
        }

        match &elements[0] {
            Element::Integer(int) if int.to_u64() == Some(1) => {}
            Element::Integer(int) => return Err(Error::InvalidVersion(int.to_string())),
            _ => return Err(Error::ExpectedInteger("version")),
        }

        let private_key = match &elements[1] {
            Element::OctetString(octets) if octets.as_bytes().is_empty() => {
                return Err(Error::EmptyPrivateKey);
            }
            Element::OctetString(octets) => octets.clone(),
            _ => return Err(Error::ExpectedOctetString),
        };

        // Both optional fields are looked up independently: either may be absent.
        let mut parameters = None;
        let mut public_key = None;
        let mut last_slot = None;
        for e in &elements[2..] {
            match e {
                Element::ContextSpecific {
                    slot: slot @ (0 | 1),
                    constructed: true,
                    element,
                } if last_slot < Some(*slot) => {
                    last_slot = Some(*slot);
                    if *slot == 0 {
                        let curve: NamedCurve = element.decode()?;
                        parameters = Some(curve);
                    } else {
                        match element.as_ref() {
                            Element::BitString(bits) => public_key = Some(bits.clone()),
                            _ => return Err(Error::ExpectedBitString),
                        }
                    }
                }
                other => return Err(Error::UnexpectedElement(other.to_string())),
            }
        }

        Ok(ECPrivateKey {
            private_key,
            parameters,
            public_key,
        })
    }
}

impl DecodableFrom<Pem> for ECPrivateKey {}

impl Decoder<Pem, ECPrivateKey> for Pem {
    type Error = crate::Error;

    fn decode(&self) -> crate::Result<ECPrivateKey> {
        let element = crate::pem_to_element(self)?;
        Ok(element.decode()?)
    }
}

impl PrivateKeyExt for ECPrivateKey {
    fn key_size(&self) -> u32 {
        self.parameters.map_or_else(
            || u32::try_from(self.private_key.as_bytes().len() * 8).unwrap_or(u32::MAX),
            |curve| curve.bits(),
        )
    }

    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Ec
    }
}
