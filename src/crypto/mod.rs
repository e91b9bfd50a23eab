//! Key schedules, transcript hashing and CertificateVerify, on top of a
//! pluggable crypto provider.

pub mod provider;

#[cfg(feature = "rust-crypto")]
pub mod rust_crypto;

mod certificate_verify;
mod tls12_key_schedule;
mod tls13_key_schedule;
mod transcript;

pub use certificate_verify::CertificateVerifier;
pub use tls12_key_schedule::{Tls12KeySchedule, MASTER_SECRET_LEN, VERIFY_DATA_LEN};
pub use tls13_key_schedule::{EarlySecret, HandshakeSecret, MasterSecret, Tls13KeySchedule};
pub use transcript::Transcript;

pub use provider::{CryptoProvider, CryptoSafe, HashContext, HashProvider};
pub use provider::{HkdfProvider, HmacProvider, KeyProvider, PrfProvider};
pub use provider::{SignatureVerifier, SigningKey};
