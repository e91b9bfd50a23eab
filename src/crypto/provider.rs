//! Cryptographic provider traits for pluggable crypto backends.
//!
//! The negotiation layer never implements a primitive itself. Hashing, HMAC,
//! HKDF, the TLS 1.2 PRF and asymmetric sign/verify all go through the
//! components of a [`CryptoProvider`], which holds static references to
//! trait objects, one per capability.
//!
//! # Components
//!
//! - **Hash Provider** ([`HashProvider`]): Factory for running hash contexts
//! - **HMAC Provider** ([`HmacProvider`]): One-shot HMAC
//! - **HKDF Provider** ([`HkdfProvider`]): TLS 1.3 Extract/Expand/Expand-Label
//! - **PRF Provider** ([`PrfProvider`]): TLS 1.2 PRF
//! - **Key Provider** ([`KeyProvider`]): Parse private keys into [`SigningKey`]s
//! - **Signature Verification** ([`SignatureVerifier`]): Verify against a public key
//!
//! # Using a Custom Provider
//!
//! ```
//! # #[cfg(feature = "rust-crypto")]
//! # fn main() {
//! use tls_negotiation::Config;
//! use tls_negotiation::crypto::rust_crypto;
//!
//! let config = Config::builder()
//!     .with_crypto_provider(rust_crypto::default_provider())
//!     .build()
//!     .unwrap();
//! # let _ = config;
//! # }
//! # #[cfg(not(feature = "rust-crypto"))]
//! # fn main() {}
//! ```
//!
//! # Thread Safety
//!
//! All provider traits require `Send + Sync + UnwindSafe + RefUnwindSafe`.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::sync::OnceLock;

use crate::buffer::Buf;
use crate::types::{HashAlgorithm, KeyType, SignatureScheme};

// ============================================================================
// Marker Trait
// ============================================================================

/// Marker trait for types that are safe to use in crypto provider components.
///
/// This trait combines the common bounds required for crypto provider trait objects:
/// - [`Send`] + [`Sync`]: Thread-safe
/// - [`Debug`]: Support debugging
/// - [`UnwindSafe`] + [`RefUnwindSafe`]: Panic-safe
///
/// This trait is automatically implemented for all types that satisfy these bounds.
pub trait CryptoSafe: Send + Sync + Debug + UnwindSafe + RefUnwindSafe {}

impl<T: Send + Sync + Debug + UnwindSafe + RefUnwindSafe> CryptoSafe for T {}

// ============================================================================
// Instance Traits (created by factories)
// ============================================================================

/// Stateful hash context for incremental hashing.
pub trait HashContext: CryptoSafe {
    /// Update the hash with new data.
    fn update(&mut self, data: &[u8]);

    /// Clone the context and finalize it, writing the hash to `out`.
    /// The original context can continue to be updated.
    fn clone_and_finalize(&self, out: &mut Buf);
}

/// Private key able to sign a precomputed digest.
pub trait SigningKey: CryptoSafe {
    /// Kind of key, used to match it against signature schemes.
    fn key_type(&self) -> KeyType;

    /// Sign `digest`, which was produced by the hash of `scheme`.
    ///
    /// Writes the signature in its TLS wire form (DER for ECDSA).
    fn sign_prehashed(
        &self,
        scheme: SignatureScheme,
        digest: &[u8],
        out: &mut Buf,
    ) -> Result<(), String>;
}

// ============================================================================
// Factory Traits (used by CryptoProvider)
// ============================================================================

/// Hash provider (factory for HashContext).
pub trait HashProvider: CryptoSafe {
    /// Create a new hash context for the specified algorithm.
    fn create_hash(&self, algorithm: HashAlgorithm) -> Box<dyn HashContext>;
}

/// HMAC provider.
pub trait HmacProvider: CryptoSafe {
    /// Compute HMAC-`hash`(key, data) into `out`.
    fn hmac(
        &self,
        hash: HashAlgorithm,
        key: &[u8],
        data: &[u8],
        out: &mut Buf,
    ) -> Result<(), String>;
}

/// HKDF provider for TLS 1.3 key derivation (RFC 5869).
pub trait HkdfProvider: CryptoSafe {
    /// HKDF-Extract: Extract a pseudorandom key from input keying material.
    /// PRK = HKDF-Extract(salt, IKM)
    fn hkdf_extract(
        &self,
        hash: HashAlgorithm,
        salt: &[u8],
        ikm: &[u8],
        out: &mut Buf,
    ) -> Result<(), String>;

    /// HKDF-Expand: Expand a pseudorandom key to the desired length.
    /// OKM = HKDF-Expand(PRK, info, L)
    fn hkdf_expand(
        &self,
        hash: HashAlgorithm,
        prk: &[u8],
        info: &[u8],
        out: &mut Buf,
        output_len: usize,
    ) -> Result<(), String>;

    /// HKDF-Expand-Label for TLS 1.3 (RFC 8446 Section 7.1).
    ///
    /// HkdfLabel = struct {
    ///     uint16 length;
    ///     opaque label<7..255> = "tls13 " + Label;
    ///     opaque context<0..255> = Context;
    /// }
    /// OKM = HKDF-Expand(Secret, HkdfLabel, Length)
    fn hkdf_expand_label(
        &self,
        hash: HashAlgorithm,
        secret: &[u8],
        label: &[u8],
        context: &[u8],
        out: &mut Buf,
        output_len: usize,
    ) -> Result<(), String> {
        let info = hkdf_label(label, context, output_len)?;
        self.hkdf_expand(hash, secret, &info, out, output_len)
    }
}

/// Build the HkdfLabel info structure with the "tls13 " prefix.
pub fn hkdf_label(label: &[u8], context: &[u8], output_len: usize) -> Result<Vec<u8>, String> {
    let full_label_len = 6 + label.len();

    if full_label_len > 255 {
        return Err("Label too long for HKDF-Expand-Label".to_string());
    }
    if context.len() > 255 {
        return Err("Context too long for HKDF-Expand-Label".to_string());
    }
    if output_len > 65535 {
        return Err("Output length too large for HKDF-Expand-Label".to_string());
    }

    let mut info = Vec::with_capacity(2 + 1 + full_label_len + 1 + context.len());
    info.extend_from_slice(&(output_len as u16).to_be_bytes());
    info.push(full_label_len as u8);
    info.extend_from_slice(b"tls13 ");
    info.extend_from_slice(label);
    info.push(context.len() as u8);
    info.extend_from_slice(context);
    Ok(info)
}

/// PRF (Pseudo-Random Function) for TLS 1.2 key derivation.
pub trait PrfProvider: CryptoSafe {
    /// TLS 1.2 PRF: PRF(secret, label, seed) writing output to `out`.
    /// Uses `scratch` for temporary concatenation of label+seed.
    #[allow(clippy::too_many_arguments)]
    fn prf_tls12(
        &self,
        secret: &[u8],
        label: &str,
        seed: &[u8],
        out: &mut Buf,
        output_len: usize,
        scratch: &mut Buf,
        hash: HashAlgorithm,
    ) -> Result<(), String>;
}

/// Private key parser (factory for SigningKey).
pub trait KeyProvider: CryptoSafe {
    /// Parse and load a private key from PKCS#8 DER or PEM bytes.
    fn load_private_key(&self, key: &[u8]) -> Result<Box<dyn SigningKey>, String>;
}

/// Signature verification against a public key.
pub trait SignatureVerifier: CryptoSafe {
    /// Verify `signature` over a digest produced by the hash of `scheme`.
    ///
    /// `public_key` is a SubjectPublicKeyInfo in DER or PEM form. Unusable
    /// key material or a scheme the key cannot serve is an `Err`. A
    /// signature that simply does not match is `Ok(false)`.
    fn verify_prehashed(
        &self,
        public_key: &[u8],
        scheme: SignatureScheme,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<bool, String>;
}

// ============================================================================
// Core Provider Struct
// ============================================================================

/// Cryptographic provider for the negotiation layer.
///
/// Holds `&'static dyn` references to each component, so a provider is
/// cheap to copy around and dispatch has no allocation.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "rust-crypto")]
/// # fn main() {
/// use tls_negotiation::crypto::{CryptoProvider, rust_crypto};
///
/// let provider = rust_crypto::default_provider();
///
/// // Swap a single component, keep the rest.
/// let custom_provider = CryptoProvider {
///     hash_provider: provider.hash_provider,
///     hmac_provider: provider.hmac_provider,
///     hkdf_provider: provider.hkdf_provider,
///     prf_provider: provider.prf_provider,
///     key_provider: provider.key_provider,
///     signature_verification: provider.signature_verification,
/// };
/// # let _ = custom_provider;
/// # }
/// # #[cfg(not(feature = "rust-crypto"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone)]
pub struct CryptoProvider {
    /// Hash provider for transcript hashing and signature digests.
    pub hash_provider: &'static dyn HashProvider,

    /// HMAC provider for Finished verify_data.
    pub hmac_provider: &'static dyn HmacProvider,

    /// HKDF provider for the TLS 1.3 key schedule.
    pub hkdf_provider: &'static dyn HkdfProvider,

    /// PRF for the TLS 1.2 key schedule.
    pub prf_provider: &'static dyn PrfProvider,

    /// Key provider for parsing private keys.
    pub key_provider: &'static dyn KeyProvider,

    /// Signature verification for CertificateVerify.
    pub signature_verification: &'static dyn SignatureVerifier,
}

/// Static storage for the default crypto provider.
///
/// This is set by `install_default()` and retrieved by `get_default()`.
static DEFAULT: OnceLock<CryptoProvider> = OnceLock::new();

impl CryptoProvider {
    /// Install a default crypto provider for the process.
    ///
    /// Used by [`Config::builder()`](crate::Config::builder) when no explicit
    /// provider is given. Only the first call succeeds. Later calls hand the
    /// provider back as the error.
    pub fn install_default(provider: CryptoProvider) -> Result<(), CryptoProvider> {
        DEFAULT.set(provider)
    }

    /// Get the default crypto provider, if one has been installed.
    pub fn get_default() -> Option<&'static CryptoProvider> {
        DEFAULT.get()
    }

    /// Hash `data` in one go.
    pub fn digest(&self, hash: HashAlgorithm, data: &[u8]) -> Buf {
        let mut ctx = self.hash_provider.create_hash(hash);
        ctx.update(data);
        let mut out = Buf::new();
        ctx.clone_and_finalize(&mut out);
        out
    }
}
