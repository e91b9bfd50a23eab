use core::fmt;

use super::ProtocolVersion;

/// Key exchange groups (RFC 8446, RFC 7919).
///
/// Elliptic curves for ECDHE and finite-field groups for DHE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedGroup {
    /// secp256r1 / P-256.
    Secp256r1,
    /// secp384r1 / P-384.
    Secp384r1,
    /// secp521r1 / P-521.
    Secp521r1,
    /// X25519 (Curve25519 for ECDHE).
    X25519,
    /// X448 (Curve448 for ECDHE).
    X448,
    /// 2048-bit finite field group.
    Ffdhe2048,
    /// 3072-bit finite field group.
    Ffdhe3072,
    /// 4096-bit finite field group.
    Ffdhe4096,
    /// 6144-bit finite field group.
    Ffdhe6144,
    /// 8192-bit finite field group.
    Ffdhe8192,
    /// Unknown or unsupported group.
    Unknown(u16),
}

impl NamedGroup {
    /// Convert a wire format u16 value to a `NamedGroup`.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0017 => NamedGroup::Secp256r1,
            0x0018 => NamedGroup::Secp384r1,
            0x0019 => NamedGroup::Secp521r1,
            0x001D => NamedGroup::X25519,
            0x001E => NamedGroup::X448,
            0x0100 => NamedGroup::Ffdhe2048,
            0x0101 => NamedGroup::Ffdhe3072,
            0x0102 => NamedGroup::Ffdhe4096,
            0x0103 => NamedGroup::Ffdhe6144,
            0x0104 => NamedGroup::Ffdhe8192,
            _ => NamedGroup::Unknown(value),
        }
    }

    /// Convert this `NamedGroup` to its wire format u16 value.
    pub fn as_u16(&self) -> u16 {
        match self {
            NamedGroup::Secp256r1 => 0x0017,
            NamedGroup::Secp384r1 => 0x0018,
            NamedGroup::Secp521r1 => 0x0019,
            NamedGroup::X25519 => 0x001D,
            NamedGroup::X448 => 0x001E,
            NamedGroup::Ffdhe2048 => 0x0100,
            NamedGroup::Ffdhe3072 => 0x0101,
            NamedGroup::Ffdhe4096 => 0x0102,
            NamedGroup::Ffdhe6144 => 0x0103,
            NamedGroup::Ffdhe8192 => 0x0104,
            NamedGroup::Unknown(value) => *value,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedGroup::Secp256r1 => "secp256r1",
            NamedGroup::Secp384r1 => "secp384r1",
            NamedGroup::Secp521r1 => "secp521r1",
            NamedGroup::X25519 => "x25519",
            NamedGroup::X448 => "x448",
            NamedGroup::Ffdhe2048 => "ffdhe2048",
            NamedGroup::Ffdhe3072 => "ffdhe3072",
            NamedGroup::Ffdhe4096 => "ffdhe4096",
            NamedGroup::Ffdhe6144 => "ffdhe6144",
            NamedGroup::Ffdhe8192 => "ffdhe8192",
            NamedGroup::Unknown(_) => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, NamedGroup::Unknown(_))
    }

    /// Elliptic curve group.
    pub fn is_ec(&self) -> bool {
        matches!(
            self,
            NamedGroup::Secp256r1
                | NamedGroup::Secp384r1
                | NamedGroup::Secp521r1
                | NamedGroup::X25519
                | NamedGroup::X448
        )
    }

    /// Finite field Diffie-Hellman group.
    pub fn is_dhe(&self) -> bool {
        matches!(
            self,
            NamedGroup::Ffdhe2048
                | NamedGroup::Ffdhe3072
                | NamedGroup::Ffdhe4096
                | NamedGroup::Ffdhe6144
                | NamedGroup::Ffdhe8192
        )
    }

    /// Key length in bytes. `None` for unknown groups.
    pub fn key_length(&self) -> Option<usize> {
        let len = match self {
            NamedGroup::Secp256r1 => 32,
            NamedGroup::Secp384r1 => 48,
            NamedGroup::Secp521r1 => 66,
            NamedGroup::X25519 => 32,
            NamedGroup::X448 => 56,
            NamedGroup::Ffdhe2048 => 256,
            NamedGroup::Ffdhe3072 => 384,
            NamedGroup::Ffdhe4096 => 512,
            NamedGroup::Ffdhe6144 => 768,
            NamedGroup::Ffdhe8192 => 1024,
            NamedGroup::Unknown(_) => return None,
        };
        Some(len)
    }

    /// All recognized named groups (every non-`Unknown` variant).
    pub const fn all() -> &'static [NamedGroup; 10] {
        &[
            NamedGroup::Secp256r1,
            NamedGroup::Secp384r1,
            NamedGroup::Secp521r1,
            NamedGroup::X25519,
            NamedGroup::X448,
            NamedGroup::Ffdhe2048,
            NamedGroup::Ffdhe3072,
            NamedGroup::Ffdhe4096,
            NamedGroup::Ffdhe6144,
            NamedGroup::Ffdhe8192,
        ]
    }

    /// Recommended groups in preference order for the given version.
    pub fn recommended(version: ProtocolVersion) -> &'static [NamedGroup] {
        if version.is_tls13() {
            &[
                NamedGroup::X25519,
                NamedGroup::Secp256r1,
                NamedGroup::X448,
                NamedGroup::Secp384r1,
                NamedGroup::Secp521r1,
                NamedGroup::Ffdhe2048,
                NamedGroup::Ffdhe3072,
            ]
        } else {
            &[
                NamedGroup::Secp256r1,
                NamedGroup::X25519,
                NamedGroup::Secp384r1,
                NamedGroup::Ffdhe2048,
                NamedGroup::Ffdhe3072,
            ]
        }
    }
}

impl fmt::Display for NamedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedGroup::Unknown(v) => write!(f, "unknown (0x{:04x})", v),
            _ => f.write_str(self.name()),
        }
    }
}
