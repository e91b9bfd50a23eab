use crate::message::extensions::{KeyShareClientHello, KeyShareEntry};
use crate::types::NamedGroup;
use crate::Config;

/// Groups in `peer` that also appear in `local`, in peer order.
pub fn negotiate_groups(local: &[NamedGroup], peer: &[NamedGroup]) -> Vec<NamedGroup> {
    let mut out: Vec<NamedGroup> = Vec::new();
    for g in peer {
        if local.contains(g) && !out.contains(g) {
            out.push(*g);
        }
    }
    out
}

/// Key exchange group negotiation against a local group list.
#[derive(Debug, Clone)]
pub struct GroupNegotiator {
    local_groups: Vec<NamedGroup>,
}

impl GroupNegotiator {
    pub fn new(local_groups: Vec<NamedGroup>) -> Self {
        GroupNegotiator { local_groups }
    }

    pub fn from_config(config: &Config) -> Self {
        GroupNegotiator::new(config.named_groups().to_vec())
    }

    pub fn local_groups(&self) -> &[NamedGroup] {
        &self.local_groups
    }

    /// Every common group, ranked by the peer.
    pub fn negotiate(&self, peer: &[NamedGroup]) -> Vec<NamedGroup> {
        let groups = negotiate_groups(&self.local_groups, peer);
        debug!("Common groups in peer order: {:?}", groups);
        groups
    }

    /// The peer's most preferred common group.
    pub fn select(&self, peer: &[NamedGroup]) -> Option<NamedGroup> {
        let group = self.negotiate(peer).first().copied();
        if group.is_none() {
            debug!("No common key exchange group");
        }
        group
    }

    /// First client key share for a locally supported group, in client order.
    ///
    /// `None` means the server has to send a HelloRetryRequest (or fail).
    pub fn select_key_share<'a>(&self, shares: &'a KeyShareClientHello) -> Option<&'a KeyShareEntry> {
        let entry = shares
            .entries
            .iter()
            .find(|e| self.local_groups.contains(&e.group));
        match entry {
            Some(e) => debug!("Selected key share for {}", e.group),
            None => debug!("No usable key share among {}", shares.entries.len()),
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use NamedGroup::*;

    #[test]
    fn peer_order_is_kept() {
        let local = [X25519, Secp256r1, Secp384r1];
        let peer = [Secp384r1, X25519, X448];
        assert_eq!(negotiate_groups(&local, &peer), [Secp384r1, X25519]);
    }

    #[test]
    fn select_first_common() {
        let n = GroupNegotiator::new(vec![Secp256r1, X25519]);
        assert_eq!(n.select(&[Ffdhe2048, X25519, Secp256r1]), Some(X25519));
        assert_eq!(n.select(&[Ffdhe2048]), None);
        assert!(n.negotiate(&[]).is_empty());
    }

    #[test]
    fn key_share_in_client_order() {
        let n = GroupNegotiator::new(vec![Secp256r1, X25519]);
        let shares = KeyShareClientHello::new(vec![
            KeyShareEntry::new(X448, vec![1; 56]),
            KeyShareEntry::new(X25519, vec![2; 32]),
            KeyShareEntry::new(Secp256r1, vec![3; 65]),
        ]);
        let chosen = n.select_key_share(&shares).unwrap();
        assert_eq!(chosen.group, X25519);

        let none = KeyShareClientHello::new(vec![KeyShareEntry::new(X448, vec![1; 56])]);
        assert!(n.select_key_share(&none).is_none());
    }
}
