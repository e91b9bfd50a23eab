//! Cipher suite catalog.

use core::fmt;

use super::{HashAlgorithm, ProtocolVersion};

/// A cipher suite identifier.
///
/// Any 16-bit value is a valid `CipherSuite`, so peer lists can be carried
/// through negotiation untouched. Known values are available as associated
/// constants and carry a canonical name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CipherSuite(pub u16);

// name = value
macro_rules! catalog {
    ($($name:ident = $value:literal,)*) => {
        #[allow(missing_docs)]
        impl CipherSuite {
            $(pub const $name: CipherSuite = CipherSuite($value);)*

            /// Every cipher suite in the catalog, in registry order.
            pub const ALL: &'static [CipherSuite] = &[$(CipherSuite::$name,)*];

            /// Canonical IANA name, if the suite is in the catalog.
            pub fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

catalog! {
    TLS_RSA_WITH_NULL_MD5 = 0x0001,
    TLS_RSA_WITH_NULL_SHA = 0x0002,
    TLS_RSA_WITH_RC4_128_MD5 = 0x0004,
    TLS_RSA_WITH_RC4_128_SHA = 0x0005,
    TLS_RSA_WITH_DES_CBC_SHA = 0x0009,
    TLS_RSA_WITH_3DES_EDE_CBC_SHA = 0x000A,
    TLS_RSA_WITH_AES_128_CBC_SHA = 0x002F,
    TLS_DHE_RSA_WITH_AES_128_CBC_SHA = 0x0033,
    TLS_RSA_WITH_AES_256_CBC_SHA = 0x0035,
    TLS_DHE_RSA_WITH_AES_256_CBC_SHA = 0x0039,
    TLS_RSA_WITH_AES_128_CBC_SHA256 = 0x003C,
    TLS_RSA_WITH_AES_256_CBC_SHA256 = 0x003D,
    TLS_RSA_WITH_AES_128_GCM_SHA256 = 0x009C,
    TLS_RSA_WITH_AES_256_GCM_SHA384 = 0x009D,
    TLS_DHE_RSA_WITH_AES_128_GCM_SHA256 = 0x009E,
    TLS_DHE_RSA_WITH_AES_256_GCM_SHA384 = 0x009F,
    TLS_AES_128_GCM_SHA256 = 0x1301,
    TLS_AES_256_GCM_SHA384 = 0x1302,
    TLS_CHACHA20_POLY1305_SHA256 = 0x1303,
    TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA = 0xC009,
    TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA = 0xC00A,
    TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA = 0xC013,
    TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA = 0xC014,
    TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256 = 0xC023,
    TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384 = 0xC024,
    TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256 = 0xC027,
    TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384 = 0xC028,
    TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256 = 0xC02B,
    TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384 = 0xC02C,
    TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256 = 0xC02F,
    TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384 = 0xC030,
    TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256 = 0xCCA8,
    TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256 = 0xCCA9,
    TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256 = 0xCCAA,
}

/// Name fragments marking a broken or absent cipher or MAC.
const WEAK_MARKERS: &[&str] = &["_NULL_", "_RC4_", "_DES_", "_3DES_", "_MD5"];

impl CipherSuite {
    pub fn from_u16(value: u16) -> Self {
        CipherSuite(value)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// TLS 1.3 suites occupy 0x1301..=0x1303. Everything else is legacy.
    pub fn is_tls13(&self) -> bool {
        (0x1301..=0x1303).contains(&self.0)
    }

    /// Whether the suite is in the catalog.
    pub fn is_known(&self) -> bool {
        self.name().is_some()
    }

    /// Whether the suite is acceptable for use.
    ///
    /// Null ciphers and suites whose name contains a weak algorithm marker
    /// are insecure. Suites outside the catalog have no name to inspect and
    /// are not considered secure either.
    pub fn is_secure(&self) -> bool {
        if *self == Self::TLS_RSA_WITH_NULL_MD5 || *self == Self::TLS_RSA_WITH_NULL_SHA {
            return false;
        }
        let Some(name) = self.name() else {
            return false;
        };
        !WEAK_MARKERS.iter().any(|m| name.contains(m))
    }

    /// Hash used by the PRF (TLS 1.2) or HKDF (TLS 1.3) for this suite.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        match self.name() {
            Some(name) if name.ends_with("_SHA384") => HashAlgorithm::SHA384,
            _ => HashAlgorithm::SHA256,
        }
    }

    /// Recommended TLS 1.2 suites, most preferred first.
    ///
    /// Forward-secret AEAD suites lead, static RSA key exchange comes last.
    pub const fn recommended_tls12() -> &'static [CipherSuite] {
        &[
            Self::TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
            Self::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
            Self::TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384,
            Self::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
            Self::TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
            Self::TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256,
            Self::TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256,
            Self::TLS_DHE_RSA_WITH_AES_256_GCM_SHA384,
            Self::TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
            Self::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384,
            Self::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256,
            Self::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384,
            Self::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256,
            Self::TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA,
            Self::TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA,
            Self::TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA,
            Self::TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA,
            Self::TLS_DHE_RSA_WITH_AES_256_CBC_SHA,
            Self::TLS_DHE_RSA_WITH_AES_128_CBC_SHA,
            Self::TLS_RSA_WITH_AES_256_GCM_SHA384,
            Self::TLS_RSA_WITH_AES_128_GCM_SHA256,
            Self::TLS_RSA_WITH_AES_256_CBC_SHA256,
            Self::TLS_RSA_WITH_AES_128_CBC_SHA256,
            Self::TLS_RSA_WITH_AES_256_CBC_SHA,
            Self::TLS_RSA_WITH_AES_128_CBC_SHA,
        ]
    }

    /// Recommended TLS 1.3 suites, most preferred first.
    pub const fn recommended_tls13() -> &'static [CipherSuite] {
        &[
            Self::TLS_AES_256_GCM_SHA384,
            Self::TLS_CHACHA20_POLY1305_SHA256,
            Self::TLS_AES_128_GCM_SHA256,
        ]
    }

    /// Recommended list for the version class of `version`.
    pub fn recommended(version: ProtocolVersion) -> &'static [CipherSuite] {
        if version.is_tls13() {
            Self::recommended_tls13()
        } else {
            Self::recommended_tls12()
        }
    }
}

impl fmt::Debug for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "CipherSuite(0x{:04x})", self.0),
        }
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown CipherSuite (0x{:04X})", self.0),
        }
    }
}

impl From<u16> for CipherSuite {
    fn from(value: u16) -> Self {
        CipherSuite(value)
    }
}
