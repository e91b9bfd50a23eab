use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::buffer::Buf;

/// A resumable session as seen by the PSK store.
///
/// Owned by the caller. The store only keeps a weak handle, so dropping the
/// last `Arc` makes the session unreachable through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PskSession {
    pub session_id: Vec<u8>,
    pub psk_identity: Vec<u8>,
}

impl PskSession {
    pub fn new(session_id: impl Into<Vec<u8>>, psk_identity: impl Into<Vec<u8>>) -> Self {
        PskSession {
            session_id: session_id.into(),
            psk_identity: psk_identity.into(),
        }
    }
}

/// Identity to secret map with an optional session link per identity.
///
/// No internal locking. Share across handshakes behind the caller's own
/// synchronization.
#[derive(Debug, Default)]
pub struct PskStore {
    keys: HashMap<Vec<u8>, Buf>,
    sessions: HashMap<Vec<u8>, Weak<PskSession>>,
}

impl PskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the secret for `identity`.
    pub fn register(&mut self, identity: impl Into<Vec<u8>>, psk: &[u8]) -> &mut Self {
        let identity = identity.into();
        trace!("Register PSK identity of {} bytes", identity.len());
        self.keys.insert(identity, Buf::from_slice(psk));
        self
    }

    pub fn get(&self, identity: &[u8]) -> Option<&[u8]> {
        self.keys.get(identity).map(|b| b.as_ref())
    }

    pub fn contains(&self, identity: &[u8]) -> bool {
        self.keys.contains_key(identity)
    }

    /// Remove `identity` and its session link. Returns whether it was present.
    pub fn remove(&mut self, identity: &[u8]) -> bool {
        self.sessions.remove(identity);
        self.keys.remove(identity).is_some()
    }

    /// Link a caller-owned session to a registered identity.
    ///
    /// Returns false, and links nothing, if the identity is not registered.
    pub fn bind_session(&mut self, identity: &[u8], session: &Arc<PskSession>) -> bool {
        if !self.keys.contains_key(identity) {
            return false;
        }
        self.sessions
            .insert(identity.to_vec(), Arc::downgrade(session));
        true
    }

    /// The session linked to `identity`, if it is still alive.
    pub fn session(&self, identity: &[u8]) -> Option<Arc<PskSession>> {
        self.sessions.get(identity).and_then(Weak::upgrade)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_get_remove() {
        let mut store = PskStore::new();
        store.register(b"a".to_vec(), &[1; 32]).register(b"b".to_vec(), &[2; 32]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b"a"), Some(&[1u8; 32][..]));

        store.register(b"a".to_vec(), &[3; 32]);
        assert_eq!(store.get(b"a"), Some(&[3u8; 32][..]));
        assert_eq!(store.len(), 2);

        assert!(store.remove(b"a"));
        assert!(!store.remove(b"a"));
        assert!(!store.contains(b"a"));
        assert_eq!(store.get(b"a"), None);
    }

    #[test]
    fn remove_drops_session_link() {
        let mut store = PskStore::new();
        store.register(b"id".to_vec(), &[7; 16]);
        let session = Arc::new(PskSession::new(b"sid".to_vec(), b"id".to_vec()));
        assert!(store.bind_session(b"id", &session));
        assert_eq!(store.session(b"id").as_deref(), Some(&*session));

        store.remove(b"id");
        assert!(store.session(b"id").is_none());

        // Re-registering does not bring the old link back.
        store.register(b"id".to_vec(), &[7; 16]);
        assert!(store.session(b"id").is_none());
    }

    #[test]
    fn bind_requires_identity() {
        let mut store = PskStore::new();
        let session = Arc::new(PskSession::new(vec![1], vec![2]));
        assert!(!store.bind_session(b"missing", &session));
        assert!(store.session(b"missing").is_none());
    }

    #[test]
    fn dropped_session_is_unreachable() {
        let mut store = PskStore::new();
        store.register(b"id".to_vec(), &[0; 32]);
        let session = Arc::new(PskSession::new(vec![1], b"id".to_vec()));
        store.bind_session(b"id", &session);
        drop(session);
        assert!(store.session(b"id").is_none());
        assert!(store.contains(b"id"));
    }
}
