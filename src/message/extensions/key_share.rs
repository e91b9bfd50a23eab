//! KeyShare extension (RFC 8446 Section 4.2.8)
//!
//! The key_share extension carries the client's or server's ephemeral public
//! value. The ClientHello form is a length-prefixed list of entries, the
//! ServerHello form is a single bare entry and the HelloRetryRequest form is
//! just the group the server wants. The three shapes are not byte-compatible,
//! so each has its own type.

use crate::codec::{expect_empty, read_u16, read_u16_prefixed, write_u16_prefixed};
use crate::message::ExtensionType;
use crate::types::NamedGroup;
use crate::Error;

use super::ExtensionData;

const CLIENT_CTX: &str = "key_share(client_hello)";
const SERVER_CTX: &str = "key_share(server_hello)";

/// A single key share entry: named group + public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShareEntry {
    /// The named group (e.g., X25519, secp256r1).
    pub group: NamedGroup,
    /// The public key bytes.
    pub key_exchange: Vec<u8>,
}

impl KeyShareEntry {
    pub fn new(group: NamedGroup, key_exchange: impl Into<Vec<u8>>) -> Self {
        KeyShareEntry {
            group,
            key_exchange: key_exchange.into(),
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>, ctx: &'static str) -> Result<(), Error> {
        let start = out.len();
        out.extend_from_slice(&self.group.as_u16().to_be_bytes());
        let res = write_u16_prefixed(out, ctx, |out| {
            out.extend_from_slice(&self.key_exchange);
            Ok(())
        });
        if res.is_err() {
            out.truncate(start);
        }
        res
    }

    /// Parse a single KeyShareEntry.
    fn parse<'a>(input: &'a [u8], ctx: &'static str) -> Result<(&'a [u8], Self), Error> {
        let (input, group) = read_u16(input, ctx)?;
        let (input, key) = read_u16_prefixed(input, ctx)?;
        Ok((input, KeyShareEntry::new(NamedGroup::from_u16(group), key)))
    }
}

/// KeyShare extension for ClientHello.
///
/// Contains a list of key share entries, one per group the client guessed the
/// server would pick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyShareClientHello {
    pub entries: Vec<KeyShareEntry>,
}

impl KeyShareClientHello {
    pub fn new(entries: Vec<KeyShareEntry>) -> Self {
        KeyShareClientHello { entries }
    }

    pub fn add_entry(&mut self, entry: KeyShareEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// First entry for `group`, if the client sent one.
    pub fn entry_by_group(&self, group: NamedGroup) -> Option<&KeyShareEntry> {
        self.entries.iter().find(|e| e.group == group)
    }
}

impl ExtensionData for KeyShareClientHello {
    const TYPE: ExtensionType = ExtensionType::KeyShare;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(out, CLIENT_CTX, |out| {
            for entry in &self.entries {
                entry.encode_into(out, CLIENT_CTX)?;
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = CLIENT_CTX;
        let (rest, mut list) = read_u16_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        let mut entries = Vec::new();
        while !list.is_empty() {
            let (rest, entry) = KeyShareEntry::parse(list, CTX)?;
            list = rest;

            // Only keep entries for known groups
            if entry.group.is_known() {
                entries.push(entry);
            }
        }

        Ok(KeyShareClientHello { entries })
    }
}

/// KeyShare extension for ServerHello.
///
/// Contains a single key share entry for the group selected by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShareServerHello {
    pub entry: KeyShareEntry,
}

impl KeyShareServerHello {
    pub fn new(entry: KeyShareEntry) -> Self {
        KeyShareServerHello { entry }
    }
}

impl ExtensionData for KeyShareServerHello {
    const TYPE: ExtensionType = ExtensionType::KeyShare;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        self.entry.encode_into(out, SERVER_CTX)
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = SERVER_CTX;
        let (rest, entry) = KeyShareEntry::parse(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(KeyShareServerHello { entry })
    }
}

/// KeyShare extension for HelloRetryRequest.
///
/// Contains only the selected group (no key material), telling the client
/// which group to use in its retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyShareHelloRetryRequest {
    pub selected_group: NamedGroup,
}

impl ExtensionData for KeyShareHelloRetryRequest {
    const TYPE: ExtensionType = ExtensionType::KeyShare;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        out.extend_from_slice(&self.selected_group.as_u16().to_be_bytes());
        Ok(())
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        const CTX: &str = "key_share(hello_retry_request)";
        let (rest, group) = read_u16(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(KeyShareHelloRetryRequest {
            selected_group: NamedGroup::from_u16(group),
        })
    }
}
