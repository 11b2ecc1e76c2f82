use shirushi::decoder::{DecodableFrom, Decoder};
use shirushi_asn1::{Element, Integer};
use shirushi_pem::Pem;

use super::error::{Error, Result};
use crate::private_key::{KeyAlgorithm, PrivateKeyExt};

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
    (CONSTRAINED BY {-- version must be multi if otherPrimeInfos present --})

OtherPrimeInfos ::= SEQUENCE SIZE(1..MAX) OF OtherPrimeInfo

OtherPrimeInfo ::= SEQUENCE {
    prime             INTEGER,  -- ri
    exponent          INTEGER,  -- di
    coefficient       INTEGER   -- ti
}
*/

/// PKCS#1 RSAPrivateKey version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    TwoPrime = 0,
    Multi = 1,
}

impl DecodableFrom<Element> for Version {}

impl Decoder<Element, Version> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Version> {
        match self {
            Element::Integer(int) => match int.to_u64() {
                Some(0) => Ok(Version::TwoPrime),
                Some(1) => Ok(Version::Multi),
                _ => Err(Error::InvalidVersion(int.to_string())),
            },
            _ => Err(Error::ExpectedInteger { field: "version" }),
        }
    }
}

/// Additional prime of a multi-prime key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherPrimeInfo {
    pub prime: Integer,       // ri
    pub exponent: Integer,    // di
    pub coefficient: Integer, // ti
}

impl DecodableFrom<Element> for OtherPrimeInfo {}

impl Decoder<Element, OtherPrimeInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<OtherPrimeInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("OtherPrimeInfo"));
        };
        if elements.len() != 3 {
            return Err(Error::InvalidElementCount {
                expected: "3",
                actual: elements.len(),
            });
        }
        Ok(OtherPrimeInfo {
            prime: get_integer(elements, 0, "prime")?,
            exponent: get_integer(elements, 1, "exponent")?,
            coefficient: get_integer(elements, 2, "coefficient")?,
        })
    }
}

/// PKCS#1 RSA Private Key structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPrivateKey {
    pub version: Version,
    pub modulus: Integer,          // n
    pub public_exponent: Integer,  // e
    pub private_exponent: Integer, // d
    pub prime1: Integer,           // p
    pub prime2: Integer,           // q
    pub exponent1: Integer,        // d mod (p-1)
    pub exponent2: Integer,        // d mod (q-1)
    pub coefficient: Integer,      // (inverse of q) mod p
    pub other_prime_infos: Vec<OtherPrimeInfo>,
}

impl RSAPrivateKey {
    /// All prime factors of the modulus: p, q, then any additional primes.
    pub fn primes(&self) -> Vec<&Integer> {
        [&self.prime1, &self.prime2]
            .into_iter()
            .chain(self.other_prime_infos.iter().map(|info| &info.prime))
            .collect()
    }
}

fn get_integer(elements: &[Element], idx: usize, field: &'static str) -> Result<Integer> {
    match elements.get(idx) {
        Some(Element::Integer(int)) => Ok(int.clone()),
        _ => Err(Error::ExpectedInteger { field }),
    }
}

impl DecodableFrom<Element> for RSAPrivateKey {}

impl Decoder<Element, RSAPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RSAPrivateKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("RSAPrivateKey"));
        };
        if !(9..=10).contains(&elements.len()) {
            return Err(Error::InvalidElementCount {
                expected: "9 or 10",
                actual: elements.len(),
            });
        }

        let version: Version = elements[0].decode()?;

        let other_prime_infos = match elements.get(9) {
            Some(Element::Sequence(infos)) => infos
                .iter()
                .map(|info| -> Result<OtherPrimeInfo> { info.decode() })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(Error::ExpectedSequence("OtherPrimeInfos")),
            None => Vec::new(),
        };
        match (version, other_prime_infos.len()) {
            (Version::TwoPrime, 0) => {}
            (Version::Multi, n) if n > 0 => {}
            (version, other_primes) => {
                return Err(Error::VersionMismatch {
                    version,
                    other_primes,
                });
            }
        }

        Ok(RSAPrivateKey {
            version,
            modulus: get_integer(elements, 1, "modulus")?,
            public_exponent: get_integer(elements, 2, "publicExponent")?,
            private_exponent: get_integer(elements, 3, "privateExponent")?,
            prime1: get_integer(elements, 4, "prime1")?,
            prime2: get_integer(elements, 5, "prime2")?,
            exponent1: get_integer(elements, 6, "exponent1")?,
            exponent2: get_integer(elements, 7, "exponent2")?,
            coefficient: get_integer(elements, 8, "coefficient")?,
            other_prime_infos,
        })
    }
}

// Pem -> RSAPrivateKey decoder
impl DecodableFrom<Pem> for RSAPrivateKey {}

impl Decoder<Pem, RSAPrivateKey> for Pem {
    type Error = crate::Error;

    fn decode(&self) -> crate::Result<RSAPrivateKey> {
        let element = crate::pem_to_element(self)?;
        Ok(element.decode()?)
    }
}

impl PrivateKeyExt for RSAPrivateKey {
    fn key_size(&self) -> u32 {
        u32::try_from(self.modulus.bits()).unwrap_or(u32::MAX)
    }

    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Rsa
    }
}
