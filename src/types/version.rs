use core::fmt;

/// SSL/TLS protocol versions as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ProtocolVersion {
    Ssl3_0,
    Tls1_0,
    Tls1_1,
    Tls1_2,
    Tls1_3,
    Unknown(u16),
}

impl ProtocolVersion {
    pub fn from_u16(value: u16) -> Self {
        use ProtocolVersion::*;
        match value {
            0x0300 => Ssl3_0,
            0x0301 => Tls1_0,
            0x0302 => Tls1_1,
            0x0303 => Tls1_2,
            0x0304 => Tls1_3,
            _ => Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        use ProtocolVersion::*;
        match self {
            Ssl3_0 => 0x0300,
            Tls1_0 => 0x0301,
            Tls1_1 => 0x0302,
            Tls1_2 => 0x0303,
            Tls1_3 => 0x0304,
            Unknown(v) => *v,
        }
    }

    pub fn name(&self) -> &'static str {
        use ProtocolVersion::*;
        match self {
            Ssl3_0 => "SSL 3.0",
            Tls1_0 => "TLS 1.0",
            Tls1_1 => "TLS 1.1",
            Tls1_2 => "TLS 1.2",
            Tls1_3 => "TLS 1.3",
            Unknown(_) => "Unknown",
        }
    }

    /// Only TLS 1.2 and TLS 1.3 are considered secure.
    pub fn is_secure(&self) -> bool {
        matches!(self, ProtocolVersion::Tls1_2 | ProtocolVersion::Tls1_3)
    }

    /// Whether this version uses the TLS 1.3 cipher suite range and key schedule.
    pub fn is_tls13(&self) -> bool {
        matches!(self, ProtocolVersion::Tls1_3)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProtocolVersion::Unknown(_))
    }

    /// Versions to offer, most preferred first.
    pub const fn recommended() -> &'static [ProtocolVersion] {
        &[ProtocolVersion::Tls1_3, ProtocolVersion::Tls1_2]
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::Unknown(v) => write!(f, "Unknown (0x{:04x})", v),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        for v in [0x0300, 0x0301, 0x0302, 0x0303, 0x0304] {
            let version = ProtocolVersion::from_u16(v);
            assert!(version.is_known());
            assert_eq!(version.as_u16(), v);
        }
        assert_eq!(
            ProtocolVersion::from_u16(0x7f1c),
            ProtocolVersion::Unknown(0x7f1c)
        );
    }

    #[test]
    fn security() {
        assert!(!ProtocolVersion::Ssl3_0.is_secure());
        assert!(!ProtocolVersion::Tls1_0.is_secure());
        assert!(!ProtocolVersion::Tls1_1.is_secure());
        assert!(ProtocolVersion::Tls1_2.is_secure());
        assert!(ProtocolVersion::Tls1_3.is_secure());
        assert!(ProtocolVersion::recommended()
            .iter()
            .all(|v| v.is_secure()));
    }

    #[test]
    fn display() {
        assert_eq!(ProtocolVersion::Tls1_3.to_string(), "TLS 1.3");
        assert_eq!(ProtocolVersion::Unknown(0x0305).to_string(), "Unknown (0x0305)");
    }
}
