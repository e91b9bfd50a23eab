//! EarlyData extension (RFC 8446 Section 4.2.10)

use crate::codec::{expect_empty, read_u32};
use crate::message::{ExtensionType, MessageContext};
use crate::types::ProtocolVersion;
use crate::Error;

/// EarlyData extension.
///
/// Empty in ClientHello and EncryptedExtensions. A NewSessionTicket carries
/// the maximum amount of 0-RTT data the server accepts. The ServerHello form
/// is empty as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyData {
    ClientHello,
    ServerHello,
    EncryptedExtensions,
    NewSessionTicket { max_early_data_size: u32 },
}

impl EarlyData {
    pub const TYPE: ExtensionType = ExtensionType::EarlyData;

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        if let EarlyData::NewSessionTicket {
            max_early_data_size,
        } = self
        {
            out.extend_from_slice(&max_early_data_size.to_be_bytes());
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    /// Decode the body in the shape `ctx` calls for.
    ///
    /// HelloRetryRequest has no form of its own and decodes like ServerHello.
    pub fn decode(data: &[u8], ctx: MessageContext) -> Result<Self, Error> {
        const CTX: &str = "early_data";
        let value = match ctx {
            MessageContext::NewSessionTicket => {
                let (rest, max_early_data_size) = read_u32(data, CTX)?;
                expect_empty(rest, CTX)?;
                return Ok(EarlyData::NewSessionTicket {
                    max_early_data_size,
                });
            }
            MessageContext::ClientHello => EarlyData::ClientHello,
            MessageContext::ServerHello | MessageContext::HelloRetryRequest => {
                EarlyData::ServerHello
            }
            MessageContext::EncryptedExtensions => EarlyData::EncryptedExtensions,
        };
        expect_empty(data, CTX)?;
        Ok(value)
    }

    pub fn is_applicable_for_version(version: ProtocolVersion) -> bool {
        Self::TYPE.is_applicable_for_version(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;

    #[test]
    fn empty_forms() {
        for (value, ctx) in [
            (EarlyData::ClientHello, MessageContext::ClientHello),
            (EarlyData::ServerHello, MessageContext::ServerHello),
            (
                EarlyData::EncryptedExtensions,
                MessageContext::EncryptedExtensions,
            ),
        ] {
            assert!(value.encode().is_empty());
            assert_eq!(EarlyData::decode(&[], ctx).unwrap(), value);
        }
    }

    #[test]
    fn new_session_ticket_size() {
        let ext = EarlyData::NewSessionTicket {
            max_early_data_size: 0x4000,
        };
        let wire = [0x00, 0x00, 0x40, 0x00];
        assert_eq!(ext.encode(), wire);
        assert_eq!(
            EarlyData::decode(&wire, MessageContext::NewSessionTicket).unwrap(),
            ext
        );
    }

    #[test]
    fn body_in_empty_context_is_rejected() {
        let err = EarlyData::decode(&[0x00], MessageContext::ClientHello).unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::TrailingData(1)));
    }

    #[test]
    fn short_ticket_size_is_rejected() {
        let err = EarlyData::decode(&[0x00, 0x01], MessageContext::NewSessionTicket).unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::Truncated));
    }

    #[test]
    fn only_tls13() {
        assert!(EarlyData::is_applicable_for_version(ProtocolVersion::Tls1_3));
        assert!(!EarlyData::is_applicable_for_version(ProtocolVersion::Tls1_2));
    }
}
