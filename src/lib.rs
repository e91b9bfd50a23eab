//! TLS 1.2/1.3 handshake negotiation.
//!
//! This crate is the part of a TLS handshake that decides things and proves
//! them: it decodes and encodes the hello extensions, picks the cipher suite,
//! key exchange group, signature scheme and PSK, walks the key schedule, and
//! builds or checks Finished and CertificateVerify values. It has no state
//! machine, record layer or I/O. Those belong to the caller.
//!
//! # Layout
//!
//! - [`message`]: the extension codec and the CertificateVerify record
//! - [`negotiation`]: cipher suite, group and signature scheme selection
//! - [`psk`]: the PSK store and the identity/mode negotiator
//! - [`crypto`]: transcript hashing, both key schedules, CertificateVerify
//!   signing, and the pluggable [`CryptoProvider`](crypto::CryptoProvider)
//! - [`types`]: the identifier catalogs shared by all of the above
//!
//! # Example
//!
//! ```
//! use tls_negotiation::negotiation::CipherSuiteNegotiator;
//! use tls_negotiation::types::{CipherSuite, ProtocolVersion};
//! use tls_negotiation::Config;
//!
//! let config = Config::builder().build().unwrap();
//! let negotiator = CipherSuiteNegotiator::from_config(&config, ProtocolVersion::Tls1_3);
//!
//! let offered = [CipherSuite::TLS_AES_128_GCM_SHA256];
//! assert_eq!(
//!     negotiator.negotiate(&offered),
//!     Some(CipherSuite::TLS_AES_128_GCM_SHA256)
//! );
//! ```
//!
//! # Logging
//!
//! Uses the [`log`](https://crates.io/crates/log) facade. Selections are
//! logged at `debug`, decode failures and key schedule steps at `trace`.
//! Secret bytes are never logged.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod buffer;
pub(crate) mod codec;
mod config;
mod error;

pub mod crypto;
pub mod message;
pub mod negotiation;
pub mod psk;
pub mod types;

pub use buffer::Buf;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, FormatError, FormatErrorKind};
