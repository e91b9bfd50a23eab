use std::fmt;

use crate::codec::{expect_empty, read_u16, read_u16_prefixed, write_u16_prefixed};
use crate::error::FormatErrorKind;
use crate::types::ProtocolVersion;
use crate::Error;

use super::extensions::*;

/// Handshake message an extension block belongs to.
///
/// Selects the wire shape for extensions whose body differs by message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageContext {
    ClientHello,
    ServerHello,
    HelloRetryRequest,
    EncryptedExtensions,
    NewSessionTicket,
}

macro_rules! extension_types {
    ($($variant:ident = $code:literal, $name:literal;)+) => {
        /// Registered TLS extension type codes.
        ///
        /// Codes without a variant are carried as [`ExtensionType::Unknown`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExtensionType {
            $($variant,)+
            Unknown(u16),
        }

        impl ExtensionType {
            pub fn from_u16(value: u16) -> Self {
                match value {
                    $($code => ExtensionType::$variant,)+
                    _ => ExtensionType::Unknown(value),
                }
            }

            pub fn as_u16(&self) -> u16 {
                match self {
                    $(ExtensionType::$variant => $code,)+
                    ExtensionType::Unknown(value) => *value,
                }
            }

            /// IANA registry name, `None` for unknown codes.
            pub fn name(&self) -> Option<&'static str> {
                match self {
                    $(ExtensionType::$variant => Some($name),)+
                    ExtensionType::Unknown(_) => None,
                }
            }

            /// Every named type, in code order.
            pub fn all() -> &'static [ExtensionType] {
                &[$(ExtensionType::$variant,)+]
            }
        }
    };
}

extension_types! {
    ServerName = 0x0000, "server_name";
    MaxFragmentLength = 0x0001, "max_fragment_length";
    ClientCertificateUrl = 0x0002, "client_certificate_url";
    TrustedCaKeys = 0x0003, "trusted_ca_keys";
    TruncatedHmac = 0x0004, "truncated_hmac";
    StatusRequest = 0x0005, "status_request";
    UserMapping = 0x0006, "user_mapping";
    ClientAuthz = 0x0007, "client_authz";
    ServerAuthz = 0x0008, "server_authz";
    CertType = 0x0009, "cert_type";
    SupportedGroups = 0x000A, "supported_groups";
    EcPointFormats = 0x000B, "ec_point_formats";
    Srp = 0x000C, "srp";
    SignatureAlgorithms = 0x000D, "signature_algorithms";
    UseSrtp = 0x000E, "use_srtp";
    Heartbeat = 0x000F, "heartbeat";
    ApplicationLayerProtocolNegotiation = 0x0010, "application_layer_protocol_negotiation";
    StatusRequestV2 = 0x0011, "status_request_v2";
    SignedCertificateTimestamp = 0x0012, "signed_certificate_timestamp";
    ClientCertificateType = 0x0013, "client_certificate_type";
    ServerCertificateType = 0x0014, "server_certificate_type";
    Padding = 0x0015, "padding";
    EncryptThenMac = 0x0016, "encrypt_then_mac";
    ExtendedMasterSecret = 0x0017, "extended_master_secret";
    TokenBinding = 0x0018, "token_binding";
    CachedInfo = 0x0019, "cached_info";
    SessionTicket = 0x0023, "session_ticket";
    PreSharedKey = 0x0029, "pre_shared_key";
    EarlyData = 0x002A, "early_data";
    SupportedVersions = 0x002B, "supported_versions";
    Cookie = 0x002C, "cookie";
    PskKeyExchangeModes = 0x002D, "psk_key_exchange_modes";
    CertificateAuthorities = 0x002F, "certificate_authorities";
    OidFilters = 0x0030, "oid_filters";
    PostHandshakeAuth = 0x0031, "post_handshake_auth";
    SignatureAlgorithmsCert = 0x0032, "signature_algorithms_cert";
    KeyShare = 0x0033, "key_share";
    RenegotiationInfo = 0x00FF, "renegotiation_info";
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown(0x{:04x})", self.as_u16()),
        }
    }
}

impl ExtensionType {
    /// Whether this extension may appear in a handshake of `version`.
    ///
    /// Extensions defined by RFC 8446 only exist in TLS 1.3. Everything
    /// else, unknown types included, is allowed in any version.
    pub fn is_applicable_for_version(&self, version: ProtocolVersion) -> bool {
        match self {
            ExtensionType::PreSharedKey
            | ExtensionType::EarlyData
            | ExtensionType::SupportedVersions
            | ExtensionType::Cookie
            | ExtensionType::PskKeyExchangeModes
            | ExtensionType::OidFilters
            | ExtensionType::PostHandshakeAuth
            | ExtensionType::KeyShare => version.is_tls13(),
            _ => true,
        }
    }
}

/// A decoded extension.
///
/// Bodies of types not known here, or not defined for the message they were
/// found in, are kept verbatim in [`Extension::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    ServerName(ServerName),
    SupportedGroups(SupportedGroups),
    SignatureAlgorithms(SignatureAlgorithms),
    Alpn(Alpn),
    KeyShareClientHello(KeyShareClientHello),
    KeyShareServerHello(KeyShareServerHello),
    KeyShareHelloRetryRequest(KeyShareHelloRetryRequest),
    PreSharedKeyClientHello(PreSharedKeyClientHello),
    PreSharedKeyServerHello(PreSharedKeyServerHello),
    EarlyData(EarlyData),
    SupportedVersionsClientHello(SupportedVersionsClientHello),
    SupportedVersionsServerHello(SupportedVersionsServerHello),
    PskKeyExchangeModes(PskKeyExchangeModes),
    RenegotiationInfo(RenegotiationInfo),
    Unknown { extension_type: u16, data: Vec<u8> },
}

impl Extension {
    pub fn extension_type(&self) -> ExtensionType {
        match self {
            Extension::ServerName(_) => ExtensionType::ServerName,
            Extension::SupportedGroups(_) => ExtensionType::SupportedGroups,
            Extension::SignatureAlgorithms(_) => ExtensionType::SignatureAlgorithms,
            Extension::Alpn(_) => ExtensionType::ApplicationLayerProtocolNegotiation,
            Extension::KeyShareClientHello(_)
            | Extension::KeyShareServerHello(_)
            | Extension::KeyShareHelloRetryRequest(_) => ExtensionType::KeyShare,
            Extension::PreSharedKeyClientHello(_) | Extension::PreSharedKeyServerHello(_) => {
                ExtensionType::PreSharedKey
            }
            Extension::EarlyData(_) => ExtensionType::EarlyData,
            Extension::SupportedVersionsClientHello(_)
            | Extension::SupportedVersionsServerHello(_) => ExtensionType::SupportedVersions,
            Extension::PskKeyExchangeModes(_) => ExtensionType::PskKeyExchangeModes,
            Extension::RenegotiationInfo(_) => ExtensionType::RenegotiationInfo,
            Extension::Unknown { extension_type, .. } => ExtensionType::from_u16(*extension_type),
        }
    }

    pub fn is_applicable_for_version(&self, version: ProtocolVersion) -> bool {
        self.extension_type().is_applicable_for_version(version)
    }

    /// Body bytes, without the type and length header.
    pub fn encode_body(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        self.encode_body_into(&mut out)?;
        Ok(out)
    }

    fn encode_body_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        match self {
            Extension::ServerName(e) => e.encode_into(out),
            Extension::SupportedGroups(e) => e.encode_into(out),
            Extension::SignatureAlgorithms(e) => e.encode_into(out),
            Extension::Alpn(e) => e.encode_into(out),
            Extension::KeyShareClientHello(e) => e.encode_into(out),
            Extension::KeyShareServerHello(e) => e.encode_into(out),
            Extension::KeyShareHelloRetryRequest(e) => e.encode_into(out),
            Extension::PreSharedKeyClientHello(e) => e.encode_into(out),
            Extension::PreSharedKeyServerHello(e) => e.encode_into(out),
            Extension::EarlyData(e) => {
                e.encode_into(out);
                Ok(())
            }
            Extension::SupportedVersionsClientHello(e) => e.encode_into(out),
            Extension::SupportedVersionsServerHello(e) => e.encode_into(out),
            Extension::PskKeyExchangeModes(e) => e.encode_into(out),
            Extension::RenegotiationInfo(e) => e.encode_into(out),
            Extension::Unknown { data, .. } => {
                out.extend_from_slice(data);
                Ok(())
            }
        }
    }

    /// Append the full `type | length | body` record.
    ///
    /// On error `out` is left as it was.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        let start = out.len();
        out.extend_from_slice(&self.extension_type().as_u16().to_be_bytes());
        let res = write_u16_prefixed(out, "extension", |out| self.encode_body_into(out));
        if res.is_err() {
            out.truncate(start);
        }
        res
    }

    /// Decode one extension body found in a `ctx` message.
    pub fn decode(
        extension_type: ExtensionType,
        data: &[u8],
        ctx: MessageContext,
    ) -> Result<Self, Error> {
        use MessageContext::*;

        let ext = match (extension_type, ctx) {
            (ExtensionType::ServerName, ClientHello | ServerHello | EncryptedExtensions) => {
                Extension::ServerName(ServerName::decode(data)?)
            }
            (ExtensionType::SupportedGroups, ClientHello | EncryptedExtensions) => {
                Extension::SupportedGroups(SupportedGroups::decode(data)?)
            }
            (ExtensionType::SignatureAlgorithms, ClientHello) => {
                Extension::SignatureAlgorithms(SignatureAlgorithms::decode(data)?)
            }
            (
                ExtensionType::ApplicationLayerProtocolNegotiation,
                ClientHello | ServerHello | EncryptedExtensions,
            ) => Extension::Alpn(Alpn::decode(data)?),
            (ExtensionType::KeyShare, ClientHello) => {
                Extension::KeyShareClientHello(KeyShareClientHello::decode(data)?)
            }
            (ExtensionType::KeyShare, ServerHello) => {
                Extension::KeyShareServerHello(KeyShareServerHello::decode(data)?)
            }
            (ExtensionType::KeyShare, HelloRetryRequest) => {
                Extension::KeyShareHelloRetryRequest(KeyShareHelloRetryRequest::decode(data)?)
            }
            (ExtensionType::PreSharedKey, ClientHello) => {
                Extension::PreSharedKeyClientHello(PreSharedKeyClientHello::decode(data)?)
            }
            (ExtensionType::PreSharedKey, ServerHello) => {
                Extension::PreSharedKeyServerHello(PreSharedKeyServerHello::decode(data)?)
            }
            (
                ExtensionType::EarlyData,
                ClientHello | ServerHello | EncryptedExtensions | NewSessionTicket,
            ) => Extension::EarlyData(EarlyData::decode(data, ctx)?),
            (ExtensionType::SupportedVersions, ClientHello) => {
                Extension::SupportedVersionsClientHello(SupportedVersionsClientHello::decode(
                    data,
                )?)
            }
            (ExtensionType::SupportedVersions, ServerHello | HelloRetryRequest) => {
                Extension::SupportedVersionsServerHello(SupportedVersionsServerHello::decode(
                    data,
                )?)
            }
            (ExtensionType::PskKeyExchangeModes, ClientHello) => {
                Extension::PskKeyExchangeModes(PskKeyExchangeModes::decode(data)?)
            }
            (ExtensionType::RenegotiationInfo, ClientHello | ServerHello) => {
                Extension::RenegotiationInfo(RenegotiationInfo::decode(data)?)
            }
            _ => Extension::Unknown {
                extension_type: extension_type.as_u16(),
                data: data.to_vec(),
            },
        };

        Ok(ext)
    }
}

/// Encode an extension block: a 16-bit total length and the records.
///
/// Fails with [`Error::InvalidArgument`] if any body or the block as a whole
/// is too long for its length prefix.
pub fn encode_extensions(extensions: &[Extension]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    write_u16_prefixed(&mut out, "extensions", |out| {
        for ext in extensions {
            ext.encode_into(out)?;
        }
        Ok(())
    })?;
    Ok(out)
}

/// Decode a length-prefixed extension block from a `ctx` message.
///
/// The block must be consumed exactly. A type appearing twice is rejected.
pub fn decode_extensions(input: &[u8], ctx: MessageContext) -> Result<Vec<Extension>, Error> {
    const CTX: &str = "extensions";

    let (rest, mut block) = read_u16_prefixed(input, CTX)?;
    expect_empty(rest, CTX)?;

    let mut seen: Vec<u16> = Vec::new();
    let mut out = Vec::new();
    while !block.is_empty() {
        let (r, ty) = read_u16(block, CTX)?;
        let (r, data) = read_u16_prefixed(r, CTX)?;
        block = r;

        if seen.contains(&ty) {
            trace!("Duplicate extension 0x{:04x} in {:?}", ty, ctx);
            return Err(Error::format(FormatErrorKind::DuplicateExtension(ty), CTX));
        }
        seen.push(ty);

        out.push(Extension::decode(ExtensionType::from_u16(ty), data, ctx)?);
    }

    Ok(out)
}
