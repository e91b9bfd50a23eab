//! Selection of cipher suite, key exchange group and signature scheme.
//!
//! Cipher suites use server preference: the local list is scanned in order
//! and the first suite the peer also offers wins. Groups use the opposite
//! policy and keep the peer's order. Finding nothing in common is not an
//! error, the result is simply `None` or an empty list.

mod cipher_suite;
mod group;
mod signature;

pub use cipher_suite::CipherSuiteNegotiator;
pub use group::{negotiate_groups, GroupNegotiator};
pub use signature::select_signature_scheme;
