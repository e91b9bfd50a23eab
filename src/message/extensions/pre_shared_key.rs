//! PreSharedKey extension (RFC 8446 Section 4.2.11)
//!
//! The ClientHello form offers identities followed by one binder per
//! identity. The ServerHello form is just the index of the accepted identity.

use crate::codec::{expect_empty, read_u16, read_u16_prefixed, read_u32, read_u8_prefixed};
use crate::codec::{write_u16_prefixed, write_u8_prefixed};
use crate::message::ExtensionType;
use crate::Error;

use super::ExtensionData;

const CLIENT_CTX: &str = "pre_shared_key(client_hello)";

/// A PSK identity offered by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PskIdentity {
    /// Opaque identity (ticket or external label).
    pub identity: Vec<u8>,
    /// Ticket age plus the server's age_add, mod 2^32.
    pub obfuscated_ticket_age: u32,
}

impl PskIdentity {
    pub fn new(identity: impl Into<Vec<u8>>, obfuscated_ticket_age: u32) -> Self {
        PskIdentity {
            identity: identity.into(),
            obfuscated_ticket_age,
        }
    }
}

/// A PSK binder: the HMAC proving possession of the matching PSK.
///
/// Binders carry an 8-bit length on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PskBinder(Vec<u8>);

impl PskBinder {
    pub fn new(binder: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let binder = binder.into();
        if binder.len() > u8::MAX as usize {
            return Err(Error::InvalidArgument(format!(
                "PSK binder of {} bytes exceeds 255",
                binder.len()
            )));
        }
        Ok(PskBinder(binder))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for PskBinder {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// PreSharedKey extension for ClientHello.
///
/// `identities` and `binders` correspond by position. Their lengths are not
/// checked against each other; callers keep them in step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreSharedKeyClientHello {
    pub identities: Vec<PskIdentity>,
    pub binders: Vec<PskBinder>,
}

impl PreSharedKeyClientHello {
    pub fn new(identities: Vec<PskIdentity>, binders: Vec<PskBinder>) -> Self {
        PreSharedKeyClientHello {
            identities,
            binders,
        }
    }

    pub fn add_identity(&mut self, identity: PskIdentity) -> &mut Self {
        self.identities.push(identity);
        self
    }

    pub fn add_binder(&mut self, binder: PskBinder) -> &mut Self {
        self.binders.push(binder);
        self
    }

    /// Wire size of the binders list, including its 2-byte length.
    ///
    /// Binders are computed over the ClientHello truncated by this many
    /// bytes.
    pub fn binders_len_on_wire(&self) -> usize {
        2 + self.binders.iter().map(|b| 1 + b.0.len()).sum::<usize>()
    }
}

impl ExtensionData for PreSharedKeyClientHello {
    const TYPE: ExtensionType = ExtensionType::PreSharedKey;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        let start = out.len();
        write_u16_prefixed(out, CLIENT_CTX, |out| {
            for id in &self.identities {
                write_u16_prefixed(out, CLIENT_CTX, |out| {
                    out.extend_from_slice(&id.identity);
                    Ok(())
                })?;
                out.extend_from_slice(&id.obfuscated_ticket_age.to_be_bytes());
            }
            Ok(())
        })?;
        let binders = write_u16_prefixed(out, CLIENT_CTX, |out| {
            for binder in &self.binders {
                write_u8_prefixed(out, CLIENT_CTX, |out| {
                    out.extend_from_slice(&binder.0);
                    Ok(())
                })?;
            }
            Ok(())
        });
        if binders.is_err() {
            out.truncate(start);
        }
        binders
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = CLIENT_CTX;

        let (rest, mut id_list) = read_u16_prefixed(data, CTX)?;
        let mut identities = Vec::new();
        while !id_list.is_empty() {
            let (r, identity) = read_u16_prefixed(id_list, CTX)?;
            let (r, age) = read_u32(r, CTX)?;
            identities.push(PskIdentity::new(identity, age));
            id_list = r;
        }

        let (rest, mut binder_list) = read_u16_prefixed(rest, CTX)?;
        expect_empty(rest, CTX)?;
        let mut binders = Vec::new();
        while !binder_list.is_empty() {
            let (r, binder) = read_u8_prefixed(binder_list, CTX)?;
            binders.push(PskBinder(binder.to_vec()));
            binder_list = r;
        }

        Ok(PreSharedKeyClientHello {
            identities,
            binders,
        })
    }
}

/// PreSharedKey extension for ServerHello: the accepted identity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreSharedKeyServerHello {
    pub selected_identity: u16,
}

impl PreSharedKeyServerHello {
    pub fn new(selected_identity: u16) -> Self {
        PreSharedKeyServerHello { selected_identity }
    }
}

impl ExtensionData for PreSharedKeyServerHello {
    const TYPE: ExtensionType = ExtensionType::PreSharedKey;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        out.extend_from_slice(&self.selected_identity.to_be_bytes());
        Ok(())
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = "pre_shared_key(server_hello)";
        let (rest, selected_identity) = read_u16(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(PreSharedKeyServerHello { selected_identity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;

    const CLIENT: &[u8] = &[
        0x00, 0x0A, // Identities length
        0x00, 0x04, // Identity length
        0x74, 0x69, 0x63, 0x6B, // "tick"
        0x00, 0x00, 0x10, 0x00, // Obfuscated ticket age
        0x00, 0x05, // Binders length
        0x04, // Binder length
        0xB1, 0xB2, 0xB3, 0xB4, // Binder
    ];

    #[test]
    fn client_hello_parse() {
        let parsed = PreSharedKeyClientHello::decode(CLIENT).unwrap();
        assert_eq!(parsed.identities, [PskIdentity::new(*b"tick", 0x1000)]);
        assert_eq!(parsed.binders.len(), 1);
        assert_eq!(parsed.binders[0].as_slice(), [0xB1, 0xB2, 0xB3, 0xB4]);
        assert_eq!(parsed.binders_len_on_wire(), 7);
        assert_eq!(parsed.encode().unwrap(), CLIENT);
    }

    #[test]
    fn builder_matches_wire() {
        let mut ext = PreSharedKeyClientHello::default();
        ext.add_identity(PskIdentity::new(b"tick".to_vec(), 0x1000))
            .add_binder(PskBinder::new(vec![0xB1, 0xB2, 0xB3, 0xB4]).unwrap());
        assert_eq!(ext.encode().unwrap(), CLIENT);
    }

    #[test]
    fn unequal_lists_are_carried() {
        let mut ext = PreSharedKeyClientHello::default();
        ext.add_identity(PskIdentity::new(b"a".to_vec(), 1))
            .add_identity(PskIdentity::new(b"b".to_vec(), 2));
        let parsed = PreSharedKeyClientHello::decode(&ext.encode().unwrap()).unwrap();
        assert_eq!(parsed.identities.len(), 2);
        assert!(parsed.binders.is_empty());
        assert_eq!(parsed.binders_len_on_wire(), 2);
    }

    #[test]
    fn oversized_binder_is_rejected() {
        let err = PskBinder::new(vec![0; 256]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(PskBinder::new(vec![0; 255]).is_ok());
    }

    #[test]
    fn oversized_identity_is_rejected() {
        let mut ext = PreSharedKeyClientHello::default();
        ext.add_identity(PskIdentity::new(vec![0x69; 70000], 0));
        let mut out = vec![0xFF];
        let err = ext.encode_into(&mut out).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(out, [0xFF]);
    }

    #[test]
    fn truncated_age_is_rejected() {
        let wire = [
            0x00, 0x04, // Identities length
            0x00, 0x01, // Identity length
            0x61, // "a"
            0x00, // Age cut short
        ];
        let err = PreSharedKeyClientHello::decode(&wire).unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::Truncated));
    }

    #[test]
    fn binder_overrun_is_rejected() {
        let wire = [
            0x00, 0x00, // No identities
            0x00, 0x03, // Binders length
            0x05, 0x01, 0x02, // Binder claims 5 bytes
        ];
        let err = PreSharedKeyClientHello::decode(&wire).unwrap_err();
        assert!(matches!(
            err.format_kind(),
            Some(FormatErrorKind::LengthOverrun { declared: 5, .. })
        ));
    }

    #[test]
    fn server_hello_index() {
        let ext = PreSharedKeyServerHello::new(2);
        assert_eq!(ext.encode().unwrap(), [0x00, 0x02]);
        assert_eq!(PreSharedKeyServerHello::decode(&[0x00, 0x02]).unwrap(), ext);
        assert!(PreSharedKeyServerHello::decode(&[0x00]).is_err());
        // The client shape never decodes as a server index.
        assert!(PreSharedKeyServerHello::decode(CLIENT).is_err());
    }
}
