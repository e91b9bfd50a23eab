//! Typed payloads for each extension kind.
//!
//! Extensions whose wire shape depends on the carrying message have one type
//! per shape (e.g. [`KeyShareClientHello`] and [`KeyShareServerHello`]), so
//! a body can only be decoded with the shape it was written in.

use crate::types::ProtocolVersion;
use crate::Error;

use super::extension::ExtensionType;

pub mod alpn;
pub mod early_data;
pub mod key_share;
pub mod pre_shared_key;
pub mod psk_key_exchange_modes;
pub mod renegotiation_info;
pub mod server_name;
pub mod signature_algorithms;
pub mod supported_groups;
pub mod supported_versions;

pub use alpn::Alpn;
pub use early_data::EarlyData;
pub use key_share::{KeyShareClientHello, KeyShareEntry};
pub use key_share::{KeyShareHelloRetryRequest, KeyShareServerHello};
pub use pre_shared_key::{PreSharedKeyClientHello, PreSharedKeyServerHello};
pub use pre_shared_key::{PskBinder, PskIdentity};
pub use psk_key_exchange_modes::PskKeyExchangeModes;
pub use renegotiation_info::RenegotiationInfo;
pub use server_name::ServerName;
pub use signature_algorithms::SignatureAlgorithms;
pub use supported_groups::SupportedGroups;
pub use supported_versions::{SupportedVersionsClientHello, SupportedVersionsServerHello};

/// Encode/decode of one extension body (the bytes after type and length).
pub trait ExtensionData: Sized {
    /// Extension type code this payload is carried under.
    const TYPE: ExtensionType;

    /// Append the canonical body encoding to `out`.
    ///
    /// Fails with [`Error::InvalidArgument`] when a field is too long for its
    /// length prefix.
    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error>;

    /// Decode a complete body. Trailing bytes are an error.
    fn decode(data: &[u8]) -> Result<Self, Error>;

    /// Canonical body encoding.
    fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.encode_into(&mut out)?;
        Ok(out)
    }

    /// Whether the extension may appear in a handshake of `version`.
    fn is_applicable_for_version(version: ProtocolVersion) -> bool {
        Self::TYPE.is_applicable_for_version(version)
    }
}
