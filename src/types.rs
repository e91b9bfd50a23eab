//! Protocol identifiers shared by the codec, the negotiators and the key schedule.

use std::fmt;

use crate::Error;

mod cipher_suite;
pub use cipher_suite::CipherSuite;

mod named_group;
pub use named_group::NamedGroup;

mod version;
pub use version::ProtocolVersion;

/// Which side of the handshake is acting.
///
/// Selects the Finished label, the CertificateVerify context string and the
/// traffic secret direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    pub fn peer(&self) -> Role {
        match self {
            Role::Client => Role::Server,
            Role::Server => Role::Client,
        }
    }
}

// ============================================================================
// Hash Algorithms
// ============================================================================

/// Hash algorithms used for transcript hashing, PRF/HKDF and signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum HashAlgorithm {
    /// SHA-256 hash.
    SHA256,
    /// SHA-384 hash.
    SHA384,
    /// SHA-512 hash.
    SHA512,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::SHA256 => 32,
            HashAlgorithm::SHA384 => 48,
            HashAlgorithm::SHA512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::SHA256 => "SHA-256",
            HashAlgorithm::SHA384 => "SHA-384",
            HashAlgorithm::SHA512 => "SHA-512",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Signature Schemes
// ============================================================================

/// How a signature scheme pads or encodes its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignaturePadding {
    /// RSASSA-PKCS1-v1_5.
    Pkcs1v15,
    /// RSASSA-PSS with MGF1 using the same hash and a hash-length salt.
    Pss,
    /// ECDSA, DER-encoded signature.
    Ecdsa,
}

/// Kind of private or public key a scheme is used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    EcdsaP256,
    EcdsaP384,
}

/// Signature schemes (RFC 8446 Section 4.2.3).
///
/// For TLS 1.2 the high byte is the hash and the low byte the signature
/// algorithm, which lines up with the TLS 1.3 code points used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum SignatureScheme {
    /// ECDSA with P-256 and SHA-256.
    ECDSA_SECP256R1_SHA256,
    /// ECDSA with P-384 and SHA-384.
    ECDSA_SECP384R1_SHA384,
    /// ECDSA with P-521 and SHA-512.
    ECDSA_SECP521R1_SHA512,
    /// Ed25519.
    ED25519,
    /// Ed448.
    ED448,
    /// RSA-PSS with SHA-256 (rsaEncryption OID).
    RSA_PSS_RSAE_SHA256,
    /// RSA-PSS with SHA-384 (rsaEncryption OID).
    RSA_PSS_RSAE_SHA384,
    /// RSA-PSS with SHA-512 (rsaEncryption OID).
    RSA_PSS_RSAE_SHA512,
    /// RSA-PSS with SHA-256 (id-rsassa-pss OID).
    RSA_PSS_PSS_SHA256,
    /// RSA-PSS with SHA-384 (id-rsassa-pss OID).
    RSA_PSS_PSS_SHA384,
    /// RSA-PSS with SHA-512 (id-rsassa-pss OID).
    RSA_PSS_PSS_SHA512,
    /// RSA PKCS#1 v1.5 with SHA-256.
    RSA_PKCS1_SHA256,
    /// RSA PKCS#1 v1.5 with SHA-384.
    RSA_PKCS1_SHA384,
    /// RSA PKCS#1 v1.5 with SHA-512.
    RSA_PKCS1_SHA512,
    /// Unknown or unsupported signature scheme.
    Unknown(u16),
}

impl SignatureScheme {
    /// Convert a wire format u16 value to a `SignatureScheme`.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0403 => SignatureScheme::ECDSA_SECP256R1_SHA256,
            0x0503 => SignatureScheme::ECDSA_SECP384R1_SHA384,
            0x0603 => SignatureScheme::ECDSA_SECP521R1_SHA512,
            0x0807 => SignatureScheme::ED25519,
            0x0808 => SignatureScheme::ED448,
            0x0804 => SignatureScheme::RSA_PSS_RSAE_SHA256,
            0x0805 => SignatureScheme::RSA_PSS_RSAE_SHA384,
            0x0806 => SignatureScheme::RSA_PSS_RSAE_SHA512,
            0x0809 => SignatureScheme::RSA_PSS_PSS_SHA256,
            0x080a => SignatureScheme::RSA_PSS_PSS_SHA384,
            0x080b => SignatureScheme::RSA_PSS_PSS_SHA512,
            0x0401 => SignatureScheme::RSA_PKCS1_SHA256,
            0x0501 => SignatureScheme::RSA_PKCS1_SHA384,
            0x0601 => SignatureScheme::RSA_PKCS1_SHA512,
            _ => SignatureScheme::Unknown(value),
        }
    }

    /// Convert this `SignatureScheme` to its wire format u16 value.
    pub fn as_u16(&self) -> u16 {
        match self {
            SignatureScheme::ECDSA_SECP256R1_SHA256 => 0x0403,
            SignatureScheme::ECDSA_SECP384R1_SHA384 => 0x0503,
            SignatureScheme::ECDSA_SECP521R1_SHA512 => 0x0603,
            SignatureScheme::ED25519 => 0x0807,
            SignatureScheme::ED448 => 0x0808,
            SignatureScheme::RSA_PSS_RSAE_SHA256 => 0x0804,
            SignatureScheme::RSA_PSS_RSAE_SHA384 => 0x0805,
            SignatureScheme::RSA_PSS_RSAE_SHA512 => 0x0806,
            SignatureScheme::RSA_PSS_PSS_SHA256 => 0x0809,
            SignatureScheme::RSA_PSS_PSS_SHA384 => 0x080a,
            SignatureScheme::RSA_PSS_PSS_SHA512 => 0x080b,
            SignatureScheme::RSA_PKCS1_SHA256 => 0x0401,
            SignatureScheme::RSA_PKCS1_SHA384 => 0x0501,
            SignatureScheme::RSA_PKCS1_SHA512 => 0x0601,
            SignatureScheme::Unknown(value) => *value,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SignatureScheme::Unknown(_))
    }

    /// Hash and padding this scheme signs with.
    ///
    /// Schemes without a separate hash step (EdDSA) and unknown identifiers
    /// are rejected with [`Error::UnsupportedSignatureScheme`].
    pub fn hash_and_padding(&self) -> Result<(HashAlgorithm, SignaturePadding), Error> {
        use HashAlgorithm::*;
        use SignaturePadding::*;
        use SignatureScheme::*;
        let pair = match self {
            RSA_PKCS1_SHA256 => (SHA256, Pkcs1v15),
            RSA_PKCS1_SHA384 => (SHA384, Pkcs1v15),
            RSA_PKCS1_SHA512 => (SHA512, Pkcs1v15),
            ECDSA_SECP256R1_SHA256 => (SHA256, Ecdsa),
            ECDSA_SECP384R1_SHA384 => (SHA384, Ecdsa),
            ECDSA_SECP521R1_SHA512 => (SHA512, Ecdsa),
            RSA_PSS_RSAE_SHA256 | RSA_PSS_PSS_SHA256 => (SHA256, Pss),
            RSA_PSS_RSAE_SHA384 | RSA_PSS_PSS_SHA384 => (SHA384, Pss),
            RSA_PSS_RSAE_SHA512 | RSA_PSS_PSS_SHA512 => (SHA512, Pss),
            ED25519 | ED448 | Unknown(_) => {
                return Err(Error::UnsupportedSignatureScheme(self.as_u16()))
            }
        };
        Ok(pair)
    }

    /// Returns the hash algorithm associated with this signature scheme.
    pub fn hash_algorithm(&self) -> Result<HashAlgorithm, Error> {
        self.hash_and_padding().map(|(h, _)| h)
    }

    /// Whether a key of `key_type` can produce signatures for this scheme.
    ///
    /// RSA keys (rsaEncryption) serve both PKCS#1 and RSA-PSS-RSAE schemes.
    /// ECDSA schemes are bound to their curve.
    pub fn is_compatible_with(&self, key_type: KeyType) -> bool {
        use SignatureScheme::*;
        match key_type {
            KeyType::Rsa => matches!(
                self,
                RSA_PKCS1_SHA256
                    | RSA_PKCS1_SHA384
                    | RSA_PKCS1_SHA512
                    | RSA_PSS_RSAE_SHA256
                    | RSA_PSS_RSAE_SHA384
                    | RSA_PSS_RSAE_SHA512
            ),
            KeyType::EcdsaP256 => *self == ECDSA_SECP256R1_SHA256,
            KeyType::EcdsaP384 => *self == ECDSA_SECP384R1_SHA384,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Unknown(v) => write!(f, "Unknown(0x{:04x})", v),
            _ => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_hash_mapping() {
        let sha256 = [0x0401, 0x0403, 0x0804];
        let sha384 = [0x0501, 0x0503, 0x0805];
        let sha512 = [0x0601, 0x0603, 0x0806];
        for v in sha256 {
            let s = SignatureScheme::from_u16(v);
            assert_eq!(s.hash_algorithm().unwrap(), HashAlgorithm::SHA256);
        }
        for v in sha384 {
            let s = SignatureScheme::from_u16(v);
            assert_eq!(s.hash_algorithm().unwrap(), HashAlgorithm::SHA384);
        }
        for v in sha512 {
            let s = SignatureScheme::from_u16(v);
            assert_eq!(s.hash_algorithm().unwrap(), HashAlgorithm::SHA512);
        }
    }

    #[test]
    fn scheme_padding() {
        assert_eq!(
            SignatureScheme::RSA_PKCS1_SHA256.hash_and_padding().unwrap().1,
            SignaturePadding::Pkcs1v15
        );
        assert_eq!(
            SignatureScheme::ECDSA_SECP384R1_SHA384
                .hash_and_padding()
                .unwrap()
                .1,
            SignaturePadding::Ecdsa
        );
        assert_eq!(
            SignatureScheme::RSA_PSS_RSAE_SHA512
                .hash_and_padding()
                .unwrap()
                .1,
            SignaturePadding::Pss
        );
    }

    #[test]
    fn unknown_scheme_is_an_error() {
        let err = SignatureScheme::from_u16(0x0201).hash_algorithm().unwrap_err();
        assert_eq!(err, Error::UnsupportedSignatureScheme(0x0201));
        let err = SignatureScheme::ED25519.hash_and_padding().unwrap_err();
        assert_eq!(err, Error::UnsupportedSignatureScheme(0x0807));
    }

    #[test]
    fn key_compatibility() {
        assert!(SignatureScheme::RSA_PSS_RSAE_SHA256.is_compatible_with(KeyType::Rsa));
        assert!(!SignatureScheme::RSA_PSS_PSS_SHA256.is_compatible_with(KeyType::Rsa));
        assert!(SignatureScheme::ECDSA_SECP256R1_SHA256.is_compatible_with(KeyType::EcdsaP256));
        assert!(!SignatureScheme::ECDSA_SECP384R1_SHA384.is_compatible_with(KeyType::EcdsaP256));
    }

    #[test]
    fn role_peer() {
        assert_eq!(Role::Client.peer(), Role::Server);
        assert_eq!(Role::Server.peer(), Role::Client);
    }
}
