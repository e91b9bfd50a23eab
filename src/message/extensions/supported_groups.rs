use crate::codec::{expect_empty, read_u16_prefixed, u16_values, write_u16_prefixed};
use crate::message::ExtensionType;
use crate::negotiation::negotiate_groups;
use crate::types::NamedGroup;
use crate::Error;

use super::ExtensionData;

const CTX: &str = "supported_groups";

/// SupportedGroups extension (RFC 8446 Section 4.2.7, RFC 8422 Section 5.1.1).
///
/// The sender's key exchange groups in preference order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SupportedGroups {
    groups: Vec<NamedGroup>,
}

impl SupportedGroups {
    pub fn new(groups: impl IntoIterator<Item = NamedGroup>) -> Self {
        let mut ext = SupportedGroups::default();
        for g in groups {
            ext.add(g);
        }
        ext
    }

    pub fn groups(&self) -> &[NamedGroup] {
        &self.groups
    }

    /// Append a group unless already present.
    pub fn add(&mut self, group: NamedGroup) -> &mut Self {
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
        self
    }

    /// Remove a group. Returns whether it was present.
    pub fn remove(&mut self, group: NamedGroup) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| *g != group);
        self.groups.len() != before
    }

    pub fn contains(&self, group: NamedGroup) -> bool {
        self.groups.contains(&group)
    }

    /// Elliptic curve groups, in list order.
    pub fn ec_groups(&self) -> Vec<NamedGroup> {
        self.groups.iter().copied().filter(|g| g.is_ec()).collect()
    }

    /// Finite field groups, in list order.
    pub fn dhe_groups(&self) -> Vec<NamedGroup> {
        self.groups.iter().copied().filter(|g| g.is_dhe()).collect()
    }

    /// Treat this list as the peer's and keep the groups also in `local`,
    /// preserving peer order.
    pub fn negotiate(&self, local: &[NamedGroup]) -> Vec<NamedGroup> {
        negotiate_groups(local, &self.groups)
    }
}

impl ExtensionData for SupportedGroups {
    const TYPE: ExtensionType = ExtensionType::SupportedGroups;

    fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        write_u16_prefixed(out, CTX, |out| {
            for group in &self.groups {
                out.extend_from_slice(&group.as_u16().to_be_bytes());
            }
            Ok(())
        })
    }

    fn decode(data: &[u8]) -> Result<Self, Error> {
        let (rest, body) = read_u16_prefixed(data, CTX)?;
        expect_empty(rest, CTX)?;

        // Unknown groups are skipped, duplicates collapse.
        let groups = u16_values(body, CTX)?
            .into_iter()
            .map(NamedGroup::from_u16)
            .filter(|g| g.is_known());

        Ok(SupportedGroups::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatErrorKind;
    use crate::types::ProtocolVersion;

    #[test]
    fn test_supported_groups_extension() {
        let ext = SupportedGroups::new([NamedGroup::X25519, NamedGroup::Secp256r1]);

        let serialized = ext.encode().unwrap();

        let expected = [
            0x00, 0x04, // Groups length (4 bytes)
            0x00, 0x1D, // X25519 (0x001D)
            0x00, 0x17, // secp256r1 (0x0017)
        ];

        assert_eq!(serialized, expected);

        let parsed = SupportedGroups::decode(&serialized).unwrap();

        assert_eq!(parsed, ext);
    }

    #[test]
    fn test_supported_groups_parse_skips_unknown() {
        // 0x000A -> list length = 10 bytes (5 groups)
        // groups: 0x001D (X25519), 0x0017 (P-256), 0xFAFA (GREASE), 0x0100 (ffdhe2048), 0x1234 (unknown)
        let bytes = [0, 10, 0, 29, 0, 23, 0xFA, 0xFA, 1, 0, 0x12, 0x34];

        let parsed = SupportedGroups::decode(&bytes).expect("parse SupportedGroups");

        assert_eq!(
            parsed.groups(),
            &[
                NamedGroup::X25519,
                NamedGroup::Secp256r1,
                NamedGroup::Ffdhe2048
            ]
        );
    }

    #[test]
    fn odd_length_is_rejected() {
        let bytes = [0x00, 0x03, 0x00, 0x1D, 0x00];
        let err = SupportedGroups::decode(&bytes).unwrap_err();
        assert_eq!(err.format_kind(), Some(FormatErrorKind::OddLength(3)));
    }

    #[test]
    fn overrun_is_rejected() {
        let bytes = [0x00, 0x06, 0x00, 0x1D];
        let err = SupportedGroups::decode(&bytes).unwrap_err();
        assert!(matches!(
            err.format_kind(),
            Some(FormatErrorKind::LengthOverrun { declared: 6, .. })
        ));
    }

    #[test]
    fn add_remove_and_filters() {
        let mut ext = SupportedGroups::default();
        ext.add(NamedGroup::X25519)
            .add(NamedGroup::Ffdhe2048)
            .add(NamedGroup::X25519)
            .add(NamedGroup::Secp384r1);
        assert_eq!(ext.groups().len(), 3);
        assert_eq!(ext.ec_groups(), [NamedGroup::X25519, NamedGroup::Secp384r1]);
        assert_eq!(ext.dhe_groups(), [NamedGroup::Ffdhe2048]);

        assert!(ext.remove(NamedGroup::X25519));
        assert!(!ext.remove(NamedGroup::X25519));
        assert!(!ext.contains(NamedGroup::X25519));
    }

    #[test]
    fn negotiate_keeps_peer_order() {
        let peer = SupportedGroups::new([
            NamedGroup::Secp384r1,
            NamedGroup::X25519,
            NamedGroup::X448,
        ]);
        let local = [
            NamedGroup::X25519,
            NamedGroup::Secp256r1,
            NamedGroup::Secp384r1,
        ];
        assert_eq!(
            peer.negotiate(&local),
            [NamedGroup::Secp384r1, NamedGroup::X25519]
        );
    }

    #[test]
    fn applicable_everywhere() {
        assert!(SupportedGroups::is_applicable_for_version(ProtocolVersion::Tls1_2));
        assert!(SupportedGroups::is_applicable_for_version(ProtocolVersion::Tls1_3));
    }
}
