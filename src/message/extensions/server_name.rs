//! ServerName extension (RFC 6066 Section 3)

use crate::codec::{expect_empty, read_u16_prefixed, read_u8, write_u16_prefixed};
use crate::message::ExtensionType;
use crate::Error;

use super::ExtensionData;

const HOST_NAME: u8 = 0;
const CTX: &str = "server_name";

/// ServerName extension.
///
/// The client sends a list of host names. A server that used the name
/// acknowledges with an empty body, which decodes to an empty list. Entries
/// with a name type other than host_name are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerName {
    pub host_names: Vec<Vec<u8>>,
}

impl ServerName {
    pub fn new(host_name: impl Into<Vec<u8>>) -> Self {
        ServerName {
            host_names: vec![host_name.into()],
        }
    }

    /// The empty server acknowledgement.
    pub fn acknowledgement() -> Self {
        ServerName::default()
    }

    /// First host name as UTF-8, if there is one and it decodes.
    pub fn host_name(&self) -> Option<&str> {
        self.host_names
            .first()
            .and_then(|n| std::str::from_utf8(n).ok())
    }
}

impl ExtensionData for ServerName {
    const TYPE: ExtensionType = ExtensionType::ServerName;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        if self.host_names.is_empty() {
            return Ok(());
        }
        write_u16_prefixed(out, CTX, |out| {
            for name in &self.host_names {
                out.push(HOST_NAME);
                write_u16_prefixed(out, CTX, |out| {
                    out.extend_from_slice(name);
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        if data.is_empty() {
            return Ok(ServerName::acknowledgement());
        }

        let (rest, mut list) = read_u16_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        let mut host_names = Vec::new();
        while !list.is_empty() {
            let (r, name_type) = read_u8(list, CTX)?;
            let (r, name) = read_u16_prefixed(r, CTX)?;
            if name_type == HOST_NAME {
                host_names.push(name.to_vec());
            }
            list = r;
        }

        Ok(ServerName { host_names })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;

    const MESSAGE: &[u8] = &[
        0x00, 0x0E, // List length
        0x00, // host_name
        0x00, 0x0B, // Name length
        b'e', b'x', b'a', b'm', b'p', b'l', b'e', b'.', b'c', b'o', b'm',
    ];

    #[test]
    fn host_name_roundtrip() {
        let ext = ServerName::new("example.com");
        assert_eq!(ext.encode().unwrap(), MESSAGE);
        let parsed = ServerName::decode(MESSAGE).unwrap();
        assert_eq!(parsed.host_name(), Some("example.com"));
    }

    #[test]
    fn empty_acknowledgement() {
        let ack = ServerName::acknowledgement();
        assert!(ack.encode().unwrap().is_empty());
        assert_eq!(ServerName::decode(&[]).unwrap(), ack);
        assert_eq!(ack.host_name(), None);
    }

    #[test]
    fn name_overrun() {
        let wire = [
            0x00, 0x05, // List length
            0x00, // host_name
            0x00, 0x09, // Name claims 9 bytes
            b'a', b'b',
        ];
        let err = ServerName::decode(&wire).unwrap_err();
        assert!(matches!(
            err.format_kind(),
            Some(FormatErrorKind::LengthOverrun { declared: 9, .. })
        ));
    }
}
