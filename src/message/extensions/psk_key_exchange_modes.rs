use crate::codec::{expect_empty, read_u8_prefixed, write_u8_prefixed};
use crate::message::ExtensionType;
use crate::psk::PskMode;
use crate::Error;

use super::ExtensionData;

const CTX: &str = "psk_key_exchange_modes";

/// PskKeyExchangeModes extension (RFC 8446 Section 4.2.9).
///
/// Modes are kept as raw wire values so a negotiator sees exactly what the
/// peer sent, including values it does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PskKeyExchangeModes {
    pub ke_modes: Vec<u8>,
}

impl PskKeyExchangeModes {
    pub fn new(modes: impl IntoIterator<Item = PskMode>) -> Self {
        PskKeyExchangeModes {
            ke_modes: modes.into_iter().map(|m| m.as_u8()).collect(),
        }
    }

    /// Recognised modes, in the order sent.
    pub fn modes(&self) -> Vec<PskMode> {
        self.ke_modes
            .iter()
            .filter_map(|&m| PskMode::from_u8(m))
            .collect()
    }
}

impl ExtensionData for PskKeyExchangeModes {
    const TYPE: ExtensionType = ExtensionType::PskKeyExchangeModes;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u8_prefixed(out, CTX, |out| {
            out.extend_from_slice(&self.ke_modes);
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (rest, modes) = read_u8_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(PskKeyExchangeModes {
            ke_modes: modes.to_vec(),
        })
    }
}
