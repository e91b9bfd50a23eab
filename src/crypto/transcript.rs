use crate::buffer::Buf;
use crate::crypto::provider::{CryptoProvider, HashContext};
use crate::types::HashAlgorithm;

/// Running hash over the handshake messages.
///
/// Every derivation that needs "the transcript so far" takes a
/// [`snapshot`](Transcript::snapshot) at that point. The running hash is not
/// consumed, so later messages keep extending it.
pub struct Transcript {
    hash: HashAlgorithm,
    ctx: Box<dyn HashContext>,
}

impl Transcript {
    pub fn new(provider: &CryptoProvider, hash: HashAlgorithm) -> Self {
        Transcript {
            hash,
            ctx: provider.hash_provider.create_hash(hash),
        }
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    /// Append a full handshake message (header included).
    pub fn update(&mut self, message: &[u8]) {
        self.ctx.update(message);
    }

    /// Hash of everything added so far.
    pub fn snapshot(&self) -> Buf {
        let mut out = Buf::new();
        self.ctx.clone_and_finalize(&mut out);
        out
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("hash", &self.hash)
            .finish()
    }
}
