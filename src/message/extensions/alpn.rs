use crate::codec::{expect_empty, read_u16_prefixed, read_u8_prefixed};
use crate::codec::{write_u16_prefixed, write_u8_prefixed};
use crate::error::FormatErrorKind;
use crate::message::ExtensionType;
use crate::Error;

use super::ExtensionData;

const CTX: &str = "alpn";

/// Application-Layer Protocol Negotiation extension (RFC 7301).
///
/// The client lists protocols in preference order. The server answers with a
/// list holding exactly the one it picked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alpn {
    pub protocols: Vec<Vec<u8>>,
}

impl Alpn {
    /// Protocol names must be 1..=255 bytes.
    pub fn new<P: AsRef<[u8]>>(protocols: &[P]) -> Result<Self, Error> {
        let mut out = Vec::with_capacity(protocols.len());
        for p in protocols {
            let p = p.as_ref();
            if p.is_empty() || p.len() > u8::MAX as usize {
                return Err(Error::InvalidArgument(format!(
                    "ALPN protocol name of {} bytes",
                    p.len()
                )));
            }
            out.push(p.to_vec());
        }
        Ok(Alpn { protocols: out })
    }

    /// First local protocol the peer also listed, in local order.
    pub fn select<'a>(&self, local: &'a [Vec<u8>]) -> Option<&'a [u8]> {
        local
            .iter()
            .find(|p| self.protocols.contains(p))
            .map(|p| p.as_slice())
    }
}

impl ExtensionData for Alpn {
    const TYPE: ExtensionType = ExtensionType::ApplicationLayerProtocolNegotiation;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(out, CTX, |out| {
            for p in &self.protocols {
                if p.is_empty() {
                    return Err(Error::InvalidArgument(
                        "empty ALPN protocol name".to_string(),
                    ));
                }
                write_u8_prefixed(out, CTX, |out| {
                    out.extend_from_slice(p);
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (rest, mut list) = read_u16_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        let mut protocols = Vec::new();
        while !list.is_empty() {
            let (r, p) = read_u8_prefixed(list, CTX)?;
            if p.is_empty() {
                return Err(Error::format(FormatErrorKind::EmptyValue, CTX));
            }
            protocols.push(p.to_vec());
            list = r;
        }

        Ok(Alpn { protocols })
    }
}
