use tls_negotiation::message::extensions::*;
use tls_negotiation::message::{decode_extensions, encode_extensions};
use tls_negotiation::message::{Extension, ExtensionType, MessageContext};
use tls_negotiation::psk::PskMode;
use tls_negotiation::types::{NamedGroup, ProtocolVersion, SignatureScheme};
use tls_negotiation::{Error, FormatErrorKind};

#[test]
fn key_share_wire_shapes() {
    let _ = env_logger::try_init();

    let entry = KeyShareEntry::new(NamedGroup::X25519, vec![0x01, 0x02]);

    let client = KeyShareClientHello::new(vec![entry.clone()]);
    assert_eq!(
        client.encode().unwrap(),
        [
            0x00, 0x06, // client_shares length
            0x00, 0x1D, // x25519
            0x00, 0x02, // key_exchange length
            0x01, 0x02, // key_exchange
        ]
    );

    let server = KeyShareServerHello::new(entry);
    assert_eq!(
        server.encode().unwrap(),
        [
            0x00, 0x1D, // x25519
            0x00, 0x02, // key_exchange length
            0x01, 0x02, // key_exchange
        ]
    );
}

#[test]
fn renegotiation_info_initial() {
    let _ = env_logger::try_init();

    let info = RenegotiationInfo::initial();
    assert_eq!(info.encode().unwrap(), [0x00]);

    let decoded = RenegotiationInfo::decode(&[0x00]).unwrap();
    assert!(decoded.renegotiated_connection().is_empty());
}

#[test]
fn declared_length_overrun() {
    let _ = env_logger::try_init();

    // Declares 4 bytes, carries 2.
    let err = RenegotiationInfo::decode(&[0x04, 0xAA, 0xBB]).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(matches!(
        err.format_kind(),
        Some(FormatErrorKind::LengthOverrun { .. })
    ));

    let block = [
        0x00, 0x08, // Extensions length
        0x00, 0x0A, // ExtensionType::SupportedGroups
        0x00, 0x10, // Extension length, past the block
        0x00, 0x02, 0x00, 0x17,
    ];
    let err = decode_extensions(&block, MessageContext::ClientHello).unwrap_err();
    assert!(err.format_kind().is_some());
}

#[test]
fn client_hello_block_roundtrip() {
    let _ = env_logger::try_init();

    let extensions = vec![
        Extension::ServerName(ServerName::new(b"example.com".to_vec())),
        Extension::SupportedGroups(SupportedGroups::new([
            NamedGroup::X25519,
            NamedGroup::Secp256r1,
        ])),
        Extension::SignatureAlgorithms(SignatureAlgorithms::new(vec![
            SignatureScheme::ECDSA_SECP256R1_SHA256,
            SignatureScheme::RSA_PSS_RSAE_SHA256,
        ])),
        Extension::Alpn(Alpn::new(&["h2", "http/1.1"]).unwrap()),
        Extension::SupportedVersionsClientHello(SupportedVersionsClientHello::new(vec![
            ProtocolVersion::Tls1_3,
            ProtocolVersion::Tls1_2,
        ])),
        Extension::PskKeyExchangeModes(PskKeyExchangeModes::new([PskMode::PskDheKe])),
        Extension::KeyShareClientHello(KeyShareClientHello::new(vec![KeyShareEntry::new(
            NamedGroup::X25519,
            vec![0x55; 32],
        )])),
        Extension::EarlyData(EarlyData::ClientHello),
        Extension::RenegotiationInfo(RenegotiationInfo::initial()),
        Extension::PreSharedKeyClientHello(PreSharedKeyClientHello::new(
            vec![PskIdentity::new(b"ticket".to_vec(), 0x01020304)],
            vec![PskBinder::new(vec![0xEE; 32]).unwrap()],
        )),
    ];

    let wire = encode_extensions(&extensions).unwrap();
    let decoded = decode_extensions(&wire, MessageContext::ClientHello).unwrap();
    assert_eq!(decoded, extensions);
    assert_eq!(encode_extensions(&decoded).unwrap(), wire);
}

#[test]
fn server_hello_block_roundtrip() {
    let _ = env_logger::try_init();

    let extensions = vec![
        Extension::SupportedVersionsServerHello(SupportedVersionsServerHello::new(
            ProtocolVersion::Tls1_3,
        )),
        Extension::KeyShareServerHello(KeyShareServerHello::new(KeyShareEntry::new(
            NamedGroup::Secp256r1,
            vec![0x04; 65],
        ))),
        Extension::PreSharedKeyServerHello(PreSharedKeyServerHello::new(0)),
    ];

    let wire = encode_extensions(&extensions).unwrap();
    let decoded = decode_extensions(&wire, MessageContext::ServerHello).unwrap();
    assert_eq!(decoded, extensions);
}

#[test]
fn new_session_ticket_early_data() {
    let _ = env_logger::try_init();

    let ext = Extension::EarlyData(EarlyData::NewSessionTicket {
        max_early_data_size: 16384,
    });
    assert_eq!(ext.encode_body().unwrap(), [0x00, 0x00, 0x40, 0x00]);

    let wire = encode_extensions(&[ext.clone()]).unwrap();
    let decoded = decode_extensions(&wire, MessageContext::NewSessionTicket).unwrap();
    assert_eq!(decoded, [ext]);
}

#[test]
fn unknown_extensions_kept_verbatim() {
    let _ = env_logger::try_init();

    let block = [
        0x00, 0x07, // Extensions length
        0x7A, 0x7A, // GREASE type
        0x00, 0x03, // Extension length
        0x01, 0x02, 0x03,
    ];
    let decoded = decode_extensions(&block, MessageContext::ClientHello).unwrap();
    assert_eq!(
        decoded,
        [Extension::Unknown {
            extension_type: 0x7A7A,
            data: vec![1, 2, 3],
        }]
    );
    assert_eq!(decoded[0].extension_type(), ExtensionType::Unknown(0x7A7A));
    assert_eq!(encode_extensions(&decoded).unwrap(), block);
}

#[test]
fn duplicate_extension_rejected() {
    let _ = env_logger::try_init();

    let block = [
        0x00, 0x0A, // Extensions length
        0x00, 0xFF, 0x00, 0x01, 0x00, // renegotiation_info
        0x00, 0xFF, 0x00, 0x01, 0x00, // renegotiation_info again
    ];
    let err = decode_extensions(&block, MessageContext::ClientHello).unwrap_err();
    assert_eq!(
        err.format_kind(),
        Some(FormatErrorKind::DuplicateExtension(0x00FF))
    );
}

#[test]
fn trailing_bytes_after_block() {
    let _ = env_logger::try_init();

    let block = [
        0x00, 0x00, // Extensions length
        0xFF, // stray
    ];
    let err = decode_extensions(&block, MessageContext::ClientHello).unwrap_err();
    assert_eq!(err.format_kind(), Some(FormatErrorKind::TrailingData(1)));
}

#[test]
fn version_applicability() {
    let _ = env_logger::try_init();

    assert!(KeyShareClientHello::is_applicable_for_version(
        ProtocolVersion::Tls1_3
    ));
    assert!(!KeyShareClientHello::is_applicable_for_version(
        ProtocolVersion::Tls1_2
    ));
    assert!(RenegotiationInfo::is_applicable_for_version(
        ProtocolVersion::Tls1_2
    ));
    assert!(ServerName::is_applicable_for_version(ProtocolVersion::Tls1_2));
    assert!(ServerName::is_applicable_for_version(ProtocolVersion::Tls1_3));
}

#[test]
fn oversized_fields_fail_to_encode() {
    let _ = env_logger::try_init();

    let key_share = KeyShareServerHello::new(KeyShareEntry {
        group: NamedGroup::X25519,
        key_exchange: vec![0xAA; 65538],
    });
    assert!(matches!(key_share.encode(), Err(Error::InvalidArgument(_))));

    let server_name = ServerName {
        host_names: vec![vec![b'a'; 70000]],
    };
    assert!(matches!(server_name.encode(), Err(Error::InvalidArgument(_))));

    let psk = PreSharedKeyClientHello::new(
        vec![PskIdentity {
            identity: vec![0; 65536],
            obfuscated_ticket_age: 0,
        }],
        vec![],
    );
    assert!(matches!(psk.encode(), Err(Error::InvalidArgument(_))));

    // A body that fits on its own can still overflow the block.
    let big = Extension::Unknown {
        extension_type: 0xFF01,
        data: vec![0; 40000],
    };
    let other = Extension::Unknown {
        extension_type: 0xFF02,
        data: vec![0; 40000],
    };
    assert!(encode_extensions(&[big.clone()]).is_ok());
    let err = encode_extensions(&[big, other]).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let too_big = Extension::KeyShareServerHello(key_share);
    assert!(matches!(
        encode_extensions(&[too_big]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn registered_types_keep_their_names() {
    let _ = env_logger::try_init();

    let block = [
        0x00, 0x0A, // Extensions length
        0x00, 0x17, 0x00, 0x00, // extended_master_secret
        0x00, 0x0B, 0x00, 0x02, 0x01, 0x00, // ec_point_formats: uncompressed
    ];
    let decoded = decode_extensions(&block, MessageContext::ServerHello).unwrap();
    assert_eq!(decoded[0].extension_type(), ExtensionType::ExtendedMasterSecret);
    assert_eq!(decoded[1].extension_type(), ExtensionType::EcPointFormats);
    assert_eq!(decoded[0].extension_type().to_string(), "extended_master_secret");
    assert_eq!(encode_extensions(&decoded).unwrap(), block);

    for (code, ty) in [
        (0x0023, ExtensionType::SessionTicket),
        (0x002C, ExtensionType::Cookie),
        (0x0031, ExtensionType::PostHandshakeAuth),
        (0x0032, ExtensionType::SignatureAlgorithmsCert),
    ] {
        assert_eq!(ExtensionType::from_u16(code), ty);
        assert_eq!(ty.as_u16(), code);
    }
    assert!(!ExtensionType::Cookie.is_applicable_for_version(ProtocolVersion::Tls1_2));
    assert!(ExtensionType::ExtendedMasterSecret.is_applicable_for_version(ProtocolVersion::Tls1_2));
}
