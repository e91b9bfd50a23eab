//! Signing, verification and key loading using RustCrypto.

use std::borrow::Cow;
use std::str;

use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey};
use p256::ecdsa::VerifyingKey as P256VerifyingKey;
use p384::ecdsa::{Signature as P384Signature, SigningKey as P384SigningKey};
use p384::ecdsa::VerifyingKey as P384VerifyingKey;
use pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::{pkcs1v15, pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};
use signature::hazmat::{PrehashSigner, PrehashVerifier, RandomizedPrehashSigner};
use signature::SignatureEncoding;

use crate::buffer::Buf;
use crate::crypto::provider::{KeyProvider, SignatureVerifier, SigningKey};
use crate::types::{HashAlgorithm, KeyType, SignaturePadding, SignatureScheme};

// Binds `$d` to the RustCrypto digest type for `$hash` while evaluating `$body`.
macro_rules! with_digest {
    ($hash:expr, $d:ident, $body:expr) => {
        match $hash {
            HashAlgorithm::SHA256 => {
                type $d = Sha256;
                $body
            }
            HashAlgorithm::SHA384 => {
                type $d = Sha384;
                $body
            }
            HashAlgorithm::SHA512 => {
                type $d = Sha512;
                $body
            }
        }
    };
}

/// A private key loaded from PKCS#8, PKCS#1 or SEC1 material.
enum RustCryptoSigningKey {
    P256(P256SigningKey),
    P384(P384SigningKey),
    Rsa(RsaPrivateKey),
}

impl std::fmt::Debug for RustCryptoSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RustCryptoSigningKey")
            .field(&self.key_type())
            .finish()
    }
}

impl SigningKey for RustCryptoSigningKey {
    fn key_type(&self) -> KeyType {
        match self {
            RustCryptoSigningKey::P256(_) => KeyType::EcdsaP256,
            RustCryptoSigningKey::P384(_) => KeyType::EcdsaP384,
            RustCryptoSigningKey::Rsa(_) => KeyType::Rsa,
        }
    }

    fn sign_prehashed(
        &self,
        scheme: SignatureScheme,
        digest: &[u8],
        out: &mut Buf,
    ) -> Result<(), String> {
        if !scheme.is_compatible_with(self.key_type()) {
            return Err(format!(
                "{} cannot be used with a {:?} key",
                scheme,
                self.key_type()
            ));
        }
        let (hash, padding) = scheme.hash_and_padding().map_err(|e| e.to_string())?;
        if digest.len() != hash.output_len() {
            return Err(format!("Digest length {} does not match {}", digest.len(), hash));
        }

        out.clear();
        match (self, padding) {
            (RustCryptoSigningKey::P256(key), _) => {
                let sig: P256Signature = key
                    .sign_prehash(digest)
                    .map_err(|e| format!("ECDSA signing failed: {}", e))?;
                out.extend_from_slice(sig.to_der().as_bytes());
            }
            (RustCryptoSigningKey::P384(key), _) => {
                let sig: P384Signature = key
                    .sign_prehash(digest)
                    .map_err(|e| format!("ECDSA signing failed: {}", e))?;
                out.extend_from_slice(sig.to_der().as_bytes());
            }
            (RustCryptoSigningKey::Rsa(key), SignaturePadding::Pkcs1v15) => {
                let sig = with_digest!(
                    hash,
                    D,
                    pkcs1v15::SigningKey::<D>::new(key.clone()).sign_prehash(digest)
                )
                .map_err(|e| format!("RSA signing failed: {}", e))?;
                out.extend_from_slice(&sig.to_bytes());
            }
            (RustCryptoSigningKey::Rsa(key), SignaturePadding::Pss) => {
                let mut rng = rand::thread_rng();
                let sig = with_digest!(
                    hash,
                    D,
                    pss::SigningKey::<D>::new(key.clone()).sign_prehash_with_rng(&mut rng, digest)
                )
                .map_err(|e| format!("RSA-PSS signing failed: {}", e))?;
                out.extend_from_slice(&sig.to_bytes());
            }
            (RustCryptoSigningKey::Rsa(_), SignaturePadding::Ecdsa) => {
                return Err(format!("{} cannot be used with an RSA key", scheme));
            }
        }
        Ok(())
    }
}

/// Strip PEM armor if present, otherwise hand the DER back untouched.
fn pem_to_der(input: &[u8]) -> Result<Cow<'_, [u8]>, String> {
    if let Ok(text) = str::from_utf8(input) {
        if text.contains("-----BEGIN") {
            let (_label, doc) =
                pkcs8::Document::from_pem(text).map_err(|e| format!("Invalid PEM: {}", e))?;
            return Ok(Cow::Owned(doc.as_bytes().to_vec()));
        }
    }
    Ok(Cow::Borrowed(input))
}

/// Key provider implementation.
#[derive(Debug)]
pub(super) struct RustCryptoKeyProvider;

impl KeyProvider for RustCryptoKeyProvider {
    fn load_private_key(&self, key: &[u8]) -> Result<Box<dyn SigningKey>, String> {
        let der = pem_to_der(key)?;
        let der = Buf::from_slice(&der);

        // PKCS#8 first, it is what most tooling writes.
        if let Ok(key) = P256SigningKey::from_pkcs8_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::P256(key)));
        }
        if let Ok(key) = P384SigningKey::from_pkcs8_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::P384(key)));
        }
        if let Ok(key) = RsaPrivateKey::from_pkcs8_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::Rsa(key)));
        }

        // Legacy OpenSSL forms: "RSA PRIVATE KEY" and "EC PRIVATE KEY".
        if let Ok(key) = RsaPrivateKey::from_pkcs1_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::Rsa(key)));
        }
        if let Ok(secret) = p256::SecretKey::from_sec1_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::P256(secret.into())));
        }
        if let Ok(secret) = p384::SecretKey::from_sec1_der(&der) {
            return Ok(Box::new(RustCryptoSigningKey::P384(secret.into())));
        }

        Err("Failed to parse private key in any supported format".to_string())
    }
}

/// Signature verifier implementation.
#[derive(Debug)]
pub(super) struct RustCryptoSignatureVerifier;

impl SignatureVerifier for RustCryptoSignatureVerifier {
    fn verify_prehashed(
        &self,
        public_key: &[u8],
        scheme: SignatureScheme,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<bool, String> {
        let (hash, padding) = scheme.hash_and_padding().map_err(|e| e.to_string())?;
        if digest.len() != hash.output_len() {
            return Err(format!("Digest length {} does not match {}", digest.len(), hash));
        }
        let spki = pem_to_der(public_key)?;

        match padding {
            SignaturePadding::Ecdsa => match scheme {
                SignatureScheme::ECDSA_SECP256R1_SHA256 => {
                    let key = P256VerifyingKey::from_public_key_der(&spki)
                        .map_err(|e| format!("Invalid P-256 public key: {}", e))?;
                    match P256Signature::from_der(signature) {
                        Ok(sig) => Ok(key.verify_prehash(digest, &sig).is_ok()),
                        Err(_) => Ok(false),
                    }
                }
                SignatureScheme::ECDSA_SECP384R1_SHA384 => {
                    let key = P384VerifyingKey::from_public_key_der(&spki)
                        .map_err(|e| format!("Invalid P-384 public key: {}", e))?;
                    match P384Signature::from_der(signature) {
                        Ok(sig) => Ok(key.verify_prehash(digest, &sig).is_ok()),
                        Err(_) => Ok(false),
                    }
                }
                _ => Err(format!("Unsupported ECDSA curve for {}", scheme)),
            },
            SignaturePadding::Pkcs1v15 => {
                let key = RsaPublicKey::from_public_key_der(&spki)
                    .map_err(|e| format!("Invalid RSA public key: {}", e))?;
                let sig = match pkcs1v15::Signature::try_from(signature) {
                    Ok(sig) => sig,
                    Err(_) => return Ok(false),
                };
                let res = with_digest!(
                    hash,
                    D,
                    pkcs1v15::VerifyingKey::<D>::new(key).verify_prehash(digest, &sig)
                );
                Ok(res.is_ok())
            }
            SignaturePadding::Pss => {
                let key = RsaPublicKey::from_public_key_der(&spki)
                    .map_err(|e| format!("Invalid RSA public key: {}", e))?;
                let sig = match pss::Signature::try_from(signature) {
                    Ok(sig) => sig,
                    Err(_) => return Ok(false),
                };
                let res = with_digest!(
                    hash,
                    D,
                    pss::VerifyingKey::<D>::new(key).verify_prehash(digest, &sig)
                );
                Ok(res.is_ok())
            }
        }
    }
}

/// Static instance of the key provider.
pub(super) static KEY_PROVIDER: RustCryptoKeyProvider = RustCryptoKeyProvider;

/// Static instance of the signature verifier.
pub(super) static SIGNATURE_VERIFIER: RustCryptoSignatureVerifier = RustCryptoSignatureVerifier;
