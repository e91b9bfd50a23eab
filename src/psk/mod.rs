//! Pre-shared keys: the identity store and the identity/mode negotiator.

use std::fmt;

use crate::Error;

mod negotiator;
mod store;

pub use negotiator::PskNegotiator;
pub use store::{PskSession, PskStore};

/// PSK key exchange mode (RFC 8446 Section 4.2.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PskMode {
    /// PSK-only key establishment. No forward secrecy.
    PskKe,
    /// PSK with (EC)DHE key establishment.
    PskDheKe,
}

impl PskMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PskMode::PskKe),
            1 => Some(PskMode::PskDheKe),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            PskMode::PskKe => 0,
            PskMode::PskDheKe => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PskMode::PskKe => "psk_ke",
            PskMode::PskDheKe => "psk_dhe_ke",
        }
    }

    /// Whether the mode skips the (EC)DHE exchange.
    pub fn is_psk_only(&self) -> bool {
        *self == PskMode::PskKe
    }

    pub fn all() -> &'static [PskMode] {
        &[PskMode::PskKe, PskMode::PskDheKe]
    }
}

impl TryFrom<u8> for PskMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PskMode::from_u8(value)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown PSK mode: {}", value)))
    }
}

impl fmt::Display for PskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        for mode in PskMode::all() {
            assert_eq!(PskMode::from_u8(mode.as_u8()), Some(*mode));
        }
        assert_eq!(PskMode::from_u8(2), None);
        assert_eq!(PskMode::PskDheKe.to_string(), "psk_dhe_ke");
        assert!(PskMode::PskKe.is_psk_only());
        assert!(!PskMode::PskDheKe.is_psk_only());
    }

    #[test]
    fn try_from_unknown_is_invalid_argument() {
        assert_eq!(PskMode::try_from(1).unwrap(), PskMode::PskDheKe);
        assert!(matches!(PskMode::try_from(9), Err(Error::InvalidArgument(_))));
    }
}
