use std::fmt::Display;

/// Signature algorithm a caller must use with a decoded key.
///
/// The hash is always SHA-256, whatever the key size or curve.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// No key was decoded.
    #[default]
    Unknown,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Sha256WithRsa,
    /// ECDSA with SHA-256.
    EcdsaWithSha256,
}

impl SignatureAlgorithm {
    pub const OID_SHA256_WITH_RSA: &'static str = "1.2.840.113549.1.1.11";
    pub const OID_ECDSA_WITH_SHA256: &'static str = "1.2.840.10045.4.3.2";

    /// Algorithm for keys of `family`.
    pub fn for_family(family: KeyFamily) -> Self {
        match family {
            KeyFamily::Rsa => SignatureAlgorithm::Sha256WithRsa,
            KeyFamily::Ec(_) => SignatureAlgorithm::EcdsaWithSha256,
        }
    }

    pub fn oid(&self) -> Option<&'static str> {
        match self {
            SignatureAlgorithm::Unknown => None,
            SignatureAlgorithm::Sha256WithRsa => Some(Self::OID_SHA256_WITH_RSA),
            SignatureAlgorithm::EcdsaWithSha256 => Some(Self::OID_ECDSA_WITH_SHA256),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Unknown => "unknown",
            SignatureAlgorithm::Sha256WithRsa => "sha256WithRSAEncryption",
            SignatureAlgorithm::EcdsaWithSha256 => "ecdsa-with-SHA256",
        }
    }
}

impl Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Curves an [`EcdsaSigner`](crate::EcdsaSigner) can sign with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P224,
    P256,
    P384,
    P521,
}

impl EcCurve {
    pub fn name(&self) -> &'static str {
        match self {
            EcCurve::P224 => "P-224",
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Length of a field element (and of the private scalar) in bytes.
    pub fn field_size(&self) -> usize {
        match self {
            EcCurve::P224 => 28,
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

impl Display for EcCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    Rsa,
    Ec(EcCurve),
}

impl Display for KeyFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyFamily::Rsa => f.write_str("RSA"),
            KeyFamily::Ec(curve) => write!(f, "EC ({curve})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rsa(KeyFamily::Rsa, SignatureAlgorithm::Sha256WithRsa)]
    #[case::p256(KeyFamily::Ec(EcCurve::P256), SignatureAlgorithm::EcdsaWithSha256)]
    #[case::p384(KeyFamily::Ec(EcCurve::P384), SignatureAlgorithm::EcdsaWithSha256)]
    #[case::p521(KeyFamily::Ec(EcCurve::P521), SignatureAlgorithm::EcdsaWithSha256)]
    fn test_algorithm_for_family(#[case] family: KeyFamily, #[case] expected: SignatureAlgorithm) {
        assert_eq!(SignatureAlgorithm::for_family(family), expected);
    }

    #[rstest]
    #[case(SignatureAlgorithm::Unknown, None, "unknown")]
    #[case(
        SignatureAlgorithm::Sha256WithRsa,
        Some("1.2.840.113549.1.1.11"),
        "sha256WithRSAEncryption"
    )]
    #[case(
        SignatureAlgorithm::EcdsaWithSha256,
        Some("1.2.840.10045.4.3.2"),
        "ecdsa-with-SHA256"
    )]
    fn test_algorithm_oid_and_name(
        #[case] algorithm: SignatureAlgorithm,
        #[case] oid: Option<&str>,
        #[case] name: &str,
    ) {
        assert_eq!(algorithm.oid(), oid);
        assert_eq!(algorithm.to_string(), name);
    }

    #[test]
    fn test_algorithm_default_is_unknown() {
        assert_eq!(SignatureAlgorithm::default(), SignatureAlgorithm::Unknown);
    }
}
