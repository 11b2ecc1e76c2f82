//! Signing handles.
//!
//! A handle owns the key material it was built from and exposes a single
//! operation, [`KeySigner::sign`], over a SHA-256 digest. Handles never hash
//! the message themselves.

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPrivateKey};
use sha2::Sha256;
use shirushi_asn1::Integer;
use shirushi_pkcs::pkcs1::RSAPrivateKey;
use signature::hazmat::PrehashSigner;

use crate::algorithm::EcCurve;
use crate::error::{Error, Result};

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// A private key that can sign.
pub trait KeySigner: Send + Sync + std::fmt::Debug {
    /// Signs a SHA-256 `digest` and returns the encoded signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDigestLength`] unless `digest` is exactly
    /// [`DIGEST_LEN`] bytes long, or a signing error from the backend.
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>>;
}

fn check_digest(digest: &[u8]) -> Result<()> {
    if digest.len() != DIGEST_LEN {
        return Err(Error::InvalidDigestLength {
            expected: DIGEST_LEN,
            actual: digest.len(),
        });
    }
    Ok(())
}

/// RSASSA-PKCS1-v1_5 signer.
pub struct RsaSigner {
    key: RsaPrivateKey,
}

fn to_biguint(int: &Integer, field: &'static str) -> Result<BigUint> {
    int.to_unsigned_bytes_be()
        .map(|bytes| BigUint::from_bytes_be(&bytes))
        .ok_or(Error::NegativeRsaComponent(field))
}

impl RsaSigner {
    /// Builds a signer from PKCS#1 components, checking that they form a
    /// consistent RSA key.
    pub fn new(key: &RSAPrivateKey) -> Result<Self> {
        let n = to_biguint(&key.modulus, "modulus")?;
        let e = to_biguint(&key.public_exponent, "publicExponent")?;
        let d = to_biguint(&key.private_exponent, "privateExponent")?;
        let primes = key
            .primes()
            .into_iter()
            .map(|prime| to_biguint(prime, "prime"))
            .collect::<Result<Vec<_>>>()?;

        let key = RsaPrivateKey::from_components(n, e, d, primes).map_err(Error::InvalidRsaKey)?;
        key.validate().map_err(Error::InvalidRsaKey)?;
        Ok(Self { key })
    }

    /// Modulus size in bits.
    pub fn key_size(&self) -> usize {
        self.key.n().bits()
    }
}

impl std::fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("bits", &self.key_size())
            .finish_non_exhaustive()
    }
}

impl KeySigner for RsaSigner {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        check_digest(digest)?;
        self.key
            .sign(Pkcs1v15Sign::new::<Sha256>(), digest)
            .map_err(Error::RsaSigning)
    }
}

enum EcdsaKey {
    P224(p224::ecdsa::SigningKey),
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
}

/// ECDSA signer producing DER encoded `(r, s)` signatures.
pub struct EcdsaSigner {
    key: EcdsaKey,
}

/// Left pads a big endian scalar to the field size.
fn fixed_scalar(curve: EcCurve, scalar: &[u8]) -> Result<Vec<u8>> {
    let size = curve.field_size();
    let start = scalar
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(scalar.len());
    let significant = &scalar[start..];
    if significant.is_empty() || significant.len() > size {
        return Err(Error::InvalidEcScalar(curve));
    }
    let mut bytes = vec![0u8; size - significant.len()];
    bytes.extend_from_slice(significant);
    Ok(bytes)
}

/// Left pads `digest` to the field size of `curve`.
///
/// The integer value of the digest is unchanged, so the signature is the
/// one a verifier computes from the bare digest. Digests longer than the
/// field are passed through and truncated by the signer.
fn prehash(curve: EcCurve, digest: &[u8]) -> Vec<u8> {
    let size = curve.field_size();
    if digest.len() >= size {
        return digest.to_vec();
    }
    let mut bytes = vec![0u8; size - digest.len()];
    bytes.extend_from_slice(digest);
    bytes
}

// Parses the scalar as a secret key of `$krate` and checks it against the
// optional SEC1 encoded public point.
macro_rules! secret_key {
    ($krate:ident, $curve:expr, $scalar:expr, $public_key:expr) => {{
        let secret = $krate::SecretKey::from_slice($scalar)
            .map_err(|_| Error::InvalidEcScalar($curve))?;
        if let Some(point) = $public_key {
            let public =
                $krate::PublicKey::from_sec1_bytes(point).map_err(|_| Error::InvalidEcPublicKey)?;
            if public != secret.public_key() {
                return Err(Error::PublicKeyMismatch);
            }
        }
        secret
    }};
}

impl EcdsaSigner {
    /// Builds a signer for `curve` from the private `scalar`.
    ///
    /// When the key carries its public point, the point must be the one
    /// derived from the scalar.
    pub fn new(curve: EcCurve, scalar: &[u8], public_key: Option<&[u8]>) -> Result<Self> {
        let scalar = fixed_scalar(curve, scalar)?;
        let key = match curve {
            EcCurve::P224 => {
                let secret = secret_key!(p224, curve, &scalar, public_key);
                EcdsaKey::P224(p224::ecdsa::SigningKey::from(secret))
            }
            EcCurve::P256 => {
                let secret = secret_key!(p256, curve, &scalar, public_key);
                EcdsaKey::P256(p256::ecdsa::SigningKey::from(secret))
            }
            EcCurve::P384 => {
                let secret = secret_key!(p384, curve, &scalar, public_key);
                EcdsaKey::P384(p384::ecdsa::SigningKey::from(secret))
            }
            EcCurve::P521 => {
                let secret = secret_key!(p521, curve, &scalar, public_key);
                let key = p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
                    .map_err(|_| Error::InvalidEcScalar(curve))?;
                EcdsaKey::P521(key)
            }
        };
        Ok(Self { key })
    }

    pub fn curve(&self) -> EcCurve {
        match self.key {
            EcdsaKey::P224(_) => EcCurve::P224,
            EcdsaKey::P256(_) => EcCurve::P256,
            EcdsaKey::P384(_) => EcCurve::P384,
            EcdsaKey::P521(_) => EcCurve::P521,
        }
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaSigner")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

impl KeySigner for EcdsaSigner {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        check_digest(digest)?;
        let prehash = prehash(self.curve(), digest);
        match &self.key {
            EcdsaKey::P224(key) => {
                let signature: p224::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(Error::EcdsaSigning)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            EcdsaKey::P256(key) => {
                let signature: p256::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(Error::EcdsaSigning)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            EcdsaKey::P384(key) => {
                let signature: p384::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(Error::EcdsaSigning)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            EcdsaKey::P521(key) => {
                let signature: p521::ecdsa::Signature =
                    key.sign_prehash(&prehash).map_err(Error::EcdsaSigning)?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
        }
    }
}
