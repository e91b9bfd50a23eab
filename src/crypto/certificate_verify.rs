//! CertificateVerify signing and verification.
//!
//! TLS 1.2 signs the hash of the concatenated handshake messages directly.
//! TLS 1.3 signs a constructed block instead (RFC 8446 Section 4.4.3):
//!
//! ```text
//! 0x20 * 64 || "TLS 1.3, server CertificateVerify" || 0x00 || transcript_hash
//! ```
//!
//! In both cases the digest is taken with the hash of the signature scheme
//! and handed to the provider's prehash signer or verifier.

use crate::buffer::Buf;
use crate::crypto::provider::SigningKey;
use crate::crypto::CryptoProvider;
use crate::message::CertificateVerify;
use crate::types::{HashAlgorithm, Role, SignatureScheme};
use crate::Error;

const CLIENT_CONTEXT: &[u8] = b"TLS 1.3, client CertificateVerify";
const SERVER_CONTEXT: &[u8] = b"TLS 1.3, server CertificateVerify";

fn check_transcript_hash(transcript_hash: &[u8]) -> Result<(), Error> {
    let len = transcript_hash.len();
    let is_digest = [HashAlgorithm::SHA256, HashAlgorithm::SHA384, HashAlgorithm::SHA512]
        .iter()
        .any(|h| h.output_len() == len);
    if !is_digest {
        return Err(Error::InvalidArgument(format!(
            "transcript hash of {} bytes is not a SHA-2 digest",
            len
        )));
    }
    Ok(())
}

/// Signs and verifies CertificateVerify over transcript material.
#[derive(Debug, Clone, Copy)]
pub struct CertificateVerifier<'a> {
    provider: &'a CryptoProvider,
}

impl<'a> CertificateVerifier<'a> {
    pub fn new(provider: &'a CryptoProvider) -> Self {
        CertificateVerifier { provider }
    }

    /// The TLS 1.3 block to be signed by `role`.
    ///
    /// `transcript_hash` must be a SHA-256, SHA-384 or SHA-512 digest. Any
    /// other length is rejected, which keeps a raw transcript from being
    /// signed by mistake.
    pub fn signature_content(transcript_hash: &[u8], role: Role) -> Result<Vec<u8>, Error> {
        check_transcript_hash(transcript_hash)?;
        let context = match role {
            Role::Client => CLIENT_CONTEXT,
            Role::Server => SERVER_CONTEXT,
        };
        let mut content = Vec::with_capacity(64 + context.len() + 1 + transcript_hash.len());
        content.extend_from_slice(&[0x20u8; 64]);
        content.extend_from_slice(context);
        content.push(0x00);
        content.extend_from_slice(transcript_hash);
        Ok(content)
    }

    /// Parse a PKCS#8, PKCS#1 or SEC1 private key (DER or PEM).
    pub fn load_key(&self, key: &[u8]) -> Result<Box<dyn SigningKey>, Error> {
        self.provider
            .key_provider
            .load_private_key(key)
            .map_err(Error::Crypto)
    }

    fn digest_for(&self, scheme: SignatureScheme, data: &[u8]) -> Result<Buf, Error> {
        let hash = scheme.hash_algorithm()?;
        Ok(self.provider.digest(hash, data))
    }

    fn sign(
        &self,
        key: &dyn SigningKey,
        scheme: SignatureScheme,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        if !scheme.is_compatible_with(key.key_type()) {
            // Unknown schemes are never compatible, report those as unsupported.
            scheme.hash_and_padding()?;
            return Err(Error::InvalidArgument(format!(
                "{} does not match a {:?} key",
                scheme,
                key.key_type()
            )));
        }
        let digest = self.digest_for(scheme, data)?;
        let mut signature = Buf::new();
        key.sign_prehashed(scheme, &digest, &mut signature)
            .map_err(|e| Error::Crypto(format!("Failed to sign CertificateVerify: {}", e)))?;
        debug!("Signed CertificateVerify with {}", scheme);
        Ok(signature.to_vec())
    }

    fn verify(
        &self,
        public_key: &[u8],
        scheme: SignatureScheme,
        data: &[u8],
        signature: &[u8],
    ) -> Result<bool, Error> {
        let digest = self.digest_for(scheme, data)?;
        let ok = self
            .provider
            .signature_verification
            .verify_prehashed(public_key, scheme, &digest, signature)
            .map_err(Error::Crypto)?;
        if !ok {
            debug!("CertificateVerify signature mismatch ({})", scheme);
        }
        Ok(ok)
    }

    // ------------------------------------------------------------------------
    // TLS 1.2
    // ------------------------------------------------------------------------

    /// Sign the hash of all prior handshake messages.
    pub fn tls12_sign(
        &self,
        key: &dyn SigningKey,
        scheme: SignatureScheme,
        handshake_messages: &[u8],
    ) -> Result<Vec<u8>, Error> {
        self.sign(key, scheme, handshake_messages)
    }

    pub fn tls12_verify(
        &self,
        public_key: &[u8],
        scheme: SignatureScheme,
        handshake_messages: &[u8],
        signature: &[u8],
    ) -> Result<bool, Error> {
        self.verify(public_key, scheme, handshake_messages, signature)
    }

    // ------------------------------------------------------------------------
    // TLS 1.3
    // ------------------------------------------------------------------------

    /// Sign the CertificateVerify block for `role`, the sending side.
    pub fn tls13_sign(
        &self,
        key: &dyn SigningKey,
        scheme: SignatureScheme,
        transcript_hash: &[u8],
        role: Role,
    ) -> Result<Vec<u8>, Error> {
        let content = Self::signature_content(transcript_hash, role)?;
        self.sign(key, scheme, &content)
    }

    /// Verify a CertificateVerify sent by `role`.
    pub fn tls13_verify(
        &self,
        public_key: &[u8],
        scheme: SignatureScheme,
        transcript_hash: &[u8],
        role: Role,
        signature: &[u8],
    ) -> Result<bool, Error> {
        let content = Self::signature_content(transcript_hash, role)?;
        self.verify(public_key, scheme, &content, signature)
    }

    // ------------------------------------------------------------------------
    // Message helpers
    // ------------------------------------------------------------------------

    pub fn generate_tls12(
        &self,
        key: &dyn SigningKey,
        scheme: SignatureScheme,
        handshake_messages: &[u8],
    ) -> Result<CertificateVerify, Error> {
        let signature = self.tls12_sign(key, scheme, handshake_messages)?;
        Ok(CertificateVerify::new(scheme, signature))
    }

    pub fn verify_tls12(
        &self,
        public_key: &[u8],
        message: &CertificateVerify,
        handshake_messages: &[u8],
    ) -> Result<bool, Error> {
        self.tls12_verify(
            public_key,
            message.signature_algorithm(),
            handshake_messages,
            message.signature(),
        )
    }

    pub fn generate_tls13(
        &self,
        key: &dyn SigningKey,
        scheme: SignatureScheme,
        transcript_hash: &[u8],
        role: Role,
    ) -> Result<CertificateVerify, Error> {
        let signature = self.tls13_sign(key, scheme, transcript_hash, role)?;
        Ok(CertificateVerify::new(scheme, signature))
    }

    pub fn verify_tls13(
        &self,
        public_key: &[u8],
        message: &CertificateVerify,
        transcript_hash: &[u8],
        role: Role,
    ) -> Result<bool, Error> {
        self.tls13_verify(
            public_key,
            message.signature_algorithm(),
            transcript_hash,
            role,
            message.signature(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_layout() {
        let hash = [0xAB; 32];
        let content = CertificateVerifier::signature_content(&hash, Role::Server).unwrap();
        assert_eq!(content.len(), 64 + 33 + 1 + 32);
        assert!(content[..64].iter().all(|b| *b == 0x20));
        assert_eq!(&content[64..97], b"TLS 1.3, server CertificateVerify");
        assert_eq!(content[97], 0x00);
        assert_eq!(&content[98..], &hash);

        let client = CertificateVerifier::signature_content(&hash, Role::Client).unwrap();
        assert_eq!(&client[64..97], b"TLS 1.3, client CertificateVerify");
        assert_ne!(client, content);
    }

    #[test]
    fn content_needs_a_digest() {
        for len in [32, 48, 64] {
            let content = CertificateVerifier::signature_content(&vec![0x11; len], Role::Client);
            assert_eq!(content.unwrap().len(), 98 + len);
        }
        for len in [0, 20, 31, 33, 68] {
            let err = CertificateVerifier::signature_content(&vec![0x11; len], Role::Server)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }
}
