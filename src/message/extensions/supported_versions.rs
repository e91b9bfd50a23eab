//! SupportedVersions extension (RFC 8446 Section 4.2.1)

use crate::codec::{expect_empty, read_u16, read_u8_prefixed, u16_values, write_u8_prefixed};
use crate::message::ExtensionType;
use crate::types::ProtocolVersion;
use crate::Error;

use super::ExtensionData;

/// Versions the client offers, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedVersionsClientHello {
    pub versions: Vec<ProtocolVersion>,
}

impl SupportedVersionsClientHello {
    pub fn new(versions: Vec<ProtocolVersion>) -> Self {
        SupportedVersionsClientHello { versions }
    }

    pub fn contains(&self, version: ProtocolVersion) -> bool {
        self.versions.contains(&version)
    }
}

impl ExtensionData for SupportedVersionsClientHello {
    const TYPE: ExtensionType = ExtensionType::SupportedVersions;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u8_prefixed(out, "supported_versions(client_hello)", |out| {
            for v in &self.versions {
                out.extend_from_slice(&v.as_u16().to_be_bytes());
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = "supported_versions(client_hello)";
        let (rest, body) = read_u8_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        // GREASE and future versions are skipped.
        let versions = u16_values(body, CTX)?
            .into_iter()
            .map(ProtocolVersion::from_u16)
            .filter(|v| v.is_known())
            .collect();

        Ok(SupportedVersionsClientHello { versions })
    }
}

/// The single version the server selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedVersionsServerHello {
    pub selected_version: ProtocolVersion,
}

impl SupportedVersionsServerHello {
    pub fn new(selected_version: ProtocolVersion) -> Self {
        SupportedVersionsServerHello { selected_version }
    }
}

impl ExtensionData for SupportedVersionsServerHello {
    const TYPE: ExtensionType = ExtensionType::SupportedVersions;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        out.extend_from_slice(&self.selected_version.as_u16().to_be_bytes());
        Ok(())
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = "supported_versions(server_hello)";
        let (rest, v) = read_u16(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(SupportedVersionsServerHello {
            selected_version: ProtocolVersion::from_u16(v),
        })
    }
}
