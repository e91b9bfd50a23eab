use crate::codec::{expect_empty, read_u8_prefixed, write_u8_prefixed};
use crate::message::ExtensionType;
use crate::Error;

use super::ExtensionData;

const CTX: &str = "renegotiation_info";

/// RenegotiationInfo extension (RFC 5746).
///
/// The only extension here with an 8-bit length prefix. On an initial
/// handshake `renegotiated_connection` is empty and the body is a single
/// zero byte.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenegotiationInfo {
    renegotiated_connection: Vec<u8>,
}

impl RenegotiationInfo {
    /// Fails if `data` does not fit the 8-bit length.
    pub fn new(data: Vec<u8>) -> Result<Self, Error> {
        if data.len() > u8::MAX as usize {
            return Err(Error::InvalidArgument(format!(
                "renegotiation_info of {} bytes exceeds 255",
                data.len()
            )));
        }
        Ok(RenegotiationInfo {
            renegotiated_connection: data,
        })
    }

    /// The empty value sent on an initial handshake.
    pub fn initial() -> Self {
        RenegotiationInfo::default()
    }

    pub fn renegotiated_connection(&self) -> &[u8] {
        &self.renegotiated_connection
    }
}

impl ExtensionData for RenegotiationInfo {
    const TYPE: ExtensionType = ExtensionType::RenegotiationInfo;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u8_prefixed(out, CTX, |out| {
            out.extend_from_slice(&self.renegotiated_connection);
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (rest, value) = read_u8_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(RenegotiationInfo {
            renegotiated_connection: value.to_vec(),
        })
    }
}
