use shirushi::decoder::{DecodableFrom, Decoder};
use shirushi_asn1::{ASN1Object, BitString, Element, ObjectIdentifier, OctetString};
use shirushi_pem::Pem;

use super::Result;
use super::error::Error;
use crate::private_key::{KeyAlgorithm, PrivateKeyExt};
use crate::{pkcs1::RSAPrivateKey, sec1::NamedCurve};

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}

PrivateKeyInfo ::= OneAsymmetricKey

Version ::= INTEGER { v1(0), v2(1) } (v1, ..., v2)

PrivateKeyAlgorithmIdentifier ::= AlgorithmIdentifier

AlgorithmIdentifier ::= SEQUENCE {
    algorithm         OBJECT IDENTIFIER,
    parameters        ANY DEFINED BY algorithm OPTIONAL
}

PrivateKey ::= OCTET STRING

PublicKey ::= BIT STRING
*/

pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const OID_ED25519: &str = "1.3.101.112";
pub const OID_ED448: &str = "1.3.101.113";

/// PKCS#8 OneAsymmetricKey version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Version 1 (no public key)
    V1 = 0,
    /// Version 2 (with public key)
    V2 = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<Element>,
}

impl AlgorithmIdentifier {
    /// The curve named by id-ecPublicKey parameters.
    ///
    /// Returns `None` when no parameters are present.
    pub fn named_curve(&self) -> Option<crate::sec1::Result<NamedCurve>> {
        self.parameters.as_ref().map(|params| params.decode())
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("AlgorithmIdentifier"));
        };
        match elements.as_slice() {
            [Element::ObjectIdentifier(algorithm)] => Ok(AlgorithmIdentifier {
                algorithm: algorithm.clone(),
                parameters: None,
            }),
            [Element::ObjectIdentifier(algorithm), parameters] => Ok(AlgorithmIdentifier {
                algorithm: algorithm.clone(),
                parameters: Some(parameters.clone()),
            }),
            [_] | [_, _] => Err(Error::InvalidAlgorithmIdentifier(
                "algorithm must be an OBJECT IDENTIFIER",
            )),
            _ => Err(Error::InvalidElementCount {
                expected: "1 or 2",
                actual: elements.len(),
            }),
        }
    }
}

/// OneAsymmetricKey (PKCS#8 v2)
///
/// This structure can contain both private and public keys.
/// Attributes are accepted but not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneAsymmetricKey {
    /// Version (v1 or v2)
    pub version: Version,
    /// Private key algorithm identifier
    pub private_key_algorithm: AlgorithmIdentifier,
    /// Private key bytes (algorithm-specific format)
    pub private_key: OctetString,
    /// Optional public key [1] (only in v2)
    pub public_key: Option<BitString>,
}

/// PrivateKeyInfo (PKCS#8 v1 compatibility)
pub type PrivateKeyInfo = OneAsymmetricKey;

impl OneAsymmetricKey {
    /// Parses the privateKey octets as the algorithm specific DER structure,
    /// e.g. an `RSAPrivateKey` or an `ECPrivateKey`.
    pub fn private_key_element(&self) -> crate::Result<Element> {
        let asn1_obj = ASN1Object::try_from(&self.private_key)?;
        crate::single_element(&asn1_obj)
    }
}

impl DecodableFrom<Element> for OneAsymmetricKey {}

// Decoder implementation for OneAsymmetricKey
impl Decoder<Element, OneAsymmetricKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("OneAsymmetricKey"));
        };
        if !(3..=5).contains(&elements.len()) {
            return Err(Error::InvalidElementCount {
                expected: "3 to 5",
                actual: elements.len(),
            });
        }

        // 1. version (INTEGER)
        let Element::Integer(int) = &elements[0] else {
            return Err(Error::ExpectedVersionInteger);
        };
        let version = match int.to_u64() {
            Some(0) => Version::V1,
            Some(1) => Version::V2,
            _ => return Err(Error::InvalidVersion(int.to_string())),
        };

        // 2. privateKeyAlgorithm (AlgorithmIdentifier)
        let private_key_algorithm: AlgorithmIdentifier = elements[1].decode()?;

        // 3. privateKey (OCTET STRING)
        let Element::OctetString(private_key) = &elements[2] else {
            return Err(Error::ExpectedOctetString {
                field: "privateKey",
            });
        };

        // Optional: attributes [0] (skipped) and publicKey [1]
        let public_key = elements[3..]
            .iter()
            .try_fold(None, |pubkey, elem| match elem {
                Element::ContextSpecific { slot: 0, .. } => Ok(pubkey),
                Element::ContextSpecific {
                    slot: 1, element, ..
                } => match element.as_ref() {
                    Element::BitString(bits) => Ok(Some(bits.clone())),
                    // IMPLICIT tagging leaves the raw BIT STRING content
                    Element::OctetString(raw) => BitString::try_from(raw.as_bytes())
                        .map(Some)
                        .map_err(Error::InvalidPublicKey),
                    other => Err(Error::UnexpectedElement(other.to_string())),
                },
                other => Err(Error::UnexpectedElement(other.to_string())),
            })?;

        Ok(OneAsymmetricKey {
            version,
            private_key_algorithm,
            private_key: private_key.clone(),
            public_key,
        })
    }
}

// Decoder from Pem for convenient CLI usage
impl DecodableFrom<Pem> for OneAsymmetricKey {}

impl Decoder<Pem, OneAsymmetricKey> for Pem {
    type Error = crate::Error;

    fn decode(&self) -> crate::Result<OneAsymmetricKey> {
        let element = crate::pem_to_element(self)?;
        Ok(element.decode()?)
    }
}

impl PrivateKeyExt for OneAsymmetricKey {
    /// Bit size of the wrapped key; 0 when it cannot be determined.
    fn key_size(&self) -> u32 {
        match self.algorithm() {
            KeyAlgorithm::Rsa => self
                .private_key_element()
                .ok()
                .and_then(|element| {
                    let key: std::result::Result<RSAPrivateKey, _> = element.decode();
                    key.ok()
                })
                .map_or(0, |key| key.key_size()),
            KeyAlgorithm::Ec => match self.private_key_algorithm.named_curve() {
                Some(Ok(curve)) => curve.bits(),
                _ => 0,
            },
            KeyAlgorithm::Ed25519 => 256,
            KeyAlgorithm::Ed448 => 448,
            KeyAlgorithm::Unknown => 0,
        }
    }

    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::from(&self.private_key_algorithm.algorithm)
    }
}
