//! Wire records read and written by the negotiation layer.
//!
//! Extension bodies are decoded into typed values by [`Extension::decode`],
//! with the carrying message given as a [`MessageContext`] so asymmetric
//! shapes can never be mixed up.

mod certificate_verify;
mod extension;
pub mod extensions;

pub use certificate_verify::CertificateVerify;
pub use extension::{decode_extensions, encode_extensions};
pub use extension::{Extension, ExtensionType, MessageContext};
pub use extensions::ExtensionData;
