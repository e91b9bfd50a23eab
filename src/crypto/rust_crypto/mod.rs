//! RustCrypto cryptographic provider.
//!
//! A pure Rust backend built from crates of the
//! [RustCrypto](https://github.com/RustCrypto) organization.
//!
//! # Feature Flag
//!
//! Only available with the `rust-crypto` feature, which is on by default. To
//! bring your own backend, disable default features:
//!
//! ```toml
//! tls-negotiation = { version = "...", default-features = false }
//! ```
//!
//! # Usage
//!
//! ```
//! use tls_negotiation::crypto::rust_crypto;
//! use tls_negotiation::types::HashAlgorithm;
//!
//! let provider = rust_crypto::default_provider();
//! let digest = provider.digest(HashAlgorithm::SHA256, b"abc");
//! assert_eq!(digest.len(), 32);
//! ```

mod hash;
mod hkdf;
mod hmac;
mod sign;
mod tls12;

use crate::crypto::provider::CryptoProvider;

/// Get the default RustCrypto-based crypto provider.
///
/// # Hash Algorithms
///
/// SHA-256, SHA-384 and SHA-512 for hashing, HMAC, HKDF and the TLS 1.2 PRF.
///
/// # Signature Schemes
///
/// - ECDSA with P-256 and SHA-256
/// - ECDSA with P-384 and SHA-384
/// - RSA PKCS#1 v1.5 with SHA-256/384/512
/// - RSA-PSS (rsaEncryption keys) with SHA-256/384/512
///
/// # Key Formats
///
/// The key provider loads private keys in:
/// - PKCS#8 DER (most common)
/// - PKCS#1 DER (`RSA PRIVATE KEY`)
/// - SEC1 DER (`EC PRIVATE KEY`)
/// - PEM encoded versions of the above
///
/// Public keys for verification are SubjectPublicKeyInfo in DER or PEM.
pub fn default_provider() -> CryptoProvider {
    CryptoProvider {
        hash_provider: &hash::HASH_PROVIDER,
        hmac_provider: &hmac::HMAC_PROVIDER,
        hkdf_provider: &hkdf::HKDF_PROVIDER,
        prf_provider: &tls12::PRF_PROVIDER,
        key_provider: &sign::KEY_PROVIDER,
        signature_verification: &sign::SIGNATURE_VERIFIER,
    }
}
