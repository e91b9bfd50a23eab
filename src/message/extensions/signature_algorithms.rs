use crate::codec::{expect_empty, read_u16_prefixed, u16_values, write_u16_prefixed};
use crate::message::ExtensionType;
use crate::types::{KeyType, SignatureScheme};
use crate::Error;

use super::ExtensionData;

/// SignatureAlgorithms extension (RFC 8446 Section 4.2.3).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureAlgorithms {
    pub supported_signature_algorithms: Vec<SignatureScheme>,
}

impl SignatureAlgorithms {
    pub fn new(schemes: Vec<SignatureScheme>) -> Self {
        SignatureAlgorithms {
            supported_signature_algorithms: schemes,
        }
    }

    /// Default list offered by this crate, strongest first per family.
    pub fn default_schemes() -> Self {
        SignatureAlgorithms::new(vec![
            SignatureScheme::ECDSA_SECP256R1_SHA256,
            SignatureScheme::ECDSA_SECP384R1_SHA384,
            SignatureScheme::RSA_PSS_RSAE_SHA256,
            SignatureScheme::RSA_PSS_RSAE_SHA384,
            SignatureScheme::RSA_PSS_RSAE_SHA512,
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
        ])
    }

    /// First listed scheme a key of `key_type` can sign with.
    pub fn first_compatible(&self, key_type: KeyType) -> Option<SignatureScheme> {
        self.supported_signature_algorithms
            .iter()
            .copied()
            .find(|s| s.is_compatible_with(key_type))
    }
}

impl ExtensionData for SignatureAlgorithms {
    const TYPE: ExtensionType = ExtensionType::SignatureAlgorithms;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(out, "signature_algorithms", |out| {
            for scheme in &self.supported_signature_algorithms {
                out.extend_from_slice(&scheme.as_u16().to_be_bytes());
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = "signature_algorithms";
        let (rest, body) = read_u16_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        let schemes = u16_values(body, CTX)?
            .into_iter()
            .map(SignatureScheme::from_u16)
            .filter(|s| s.is_known())
            .collect();

        Ok(SignatureAlgorithms::new(schemes))
    }
}
