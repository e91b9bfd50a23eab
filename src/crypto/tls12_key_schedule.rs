//! TLS 1.2 key derivation (RFC 5246 Section 8.1, 6.3 and 7.4.9, RFC 7627).
//!
//! ```text
//! master_secret = PRF(pre_master_secret, "master secret",
//!                     ClientHello.random + ServerHello.random)[0..47]
//! key_block     = PRF(master_secret, "key expansion",
//!                     server_random + client_random)
//! verify_data   = PRF(master_secret, finished_label,
//!                     Hash(handshake_messages))[0..11]
//! ```

use subtle::ConstantTimeEq;

use crate::buffer::Buf;
use crate::crypto::CryptoProvider;
use crate::types::{CipherSuite, HashAlgorithm, Role};
use crate::Error;

/// Length of the TLS 1.2 master secret.
pub const MASTER_SECRET_LEN: usize = 48;

/// Length of TLS 1.2 Finished verify_data.
pub const VERIFY_DATA_LEN: usize = 12;

const RANDOM_LEN: usize = 32;

/// PRF ladder for one TLS 1.2 handshake.
#[derive(Debug, Clone, Copy)]
pub struct Tls12KeySchedule<'a> {
    provider: &'a CryptoProvider,
    hash: HashAlgorithm,
}

impl<'a> Tls12KeySchedule<'a> {
    /// Key schedule using the SHA-256 PRF.
    pub fn new(provider: &'a CryptoProvider) -> Self {
        Self::with_hash(provider, HashAlgorithm::SHA256)
    }

    pub fn with_hash(provider: &'a CryptoProvider, hash: HashAlgorithm) -> Self {
        Tls12KeySchedule { provider, hash }
    }

    /// Key schedule using the PRF hash of the negotiated suite.
    pub fn for_cipher_suite(provider: &'a CryptoProvider, suite: CipherSuite) -> Self {
        Self::with_hash(provider, suite.hash_algorithm())
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    fn prf(&self, secret: &[u8], label: &str, seed: &[u8], len: usize) -> Result<Buf, Error> {
        let mut out = Buf::new();
        let mut scratch = Buf::new();
        self.provider
            .prf_provider
            .prf_tls12(secret, label, seed, &mut out, len, &mut scratch, self.hash)
            .map_err(Error::Crypto)?;
        Ok(out)
    }

    /// 48-byte master secret from the pre-master secret and both hello randoms.
    pub fn master_secret(
        &self,
        pre_master_secret: &[u8],
        client_random: &[u8],
        server_random: &[u8],
    ) -> Result<Buf, Error> {
        check_random(client_random, "client random")?;
        check_random(server_random, "server random")?;
        trace!("TLS 1.2 master secret");

        let mut seed = Vec::with_capacity(RANDOM_LEN * 2);
        seed.extend_from_slice(client_random);
        seed.extend_from_slice(server_random);
        self.prf(pre_master_secret, "master secret", &seed, MASTER_SECRET_LEN)
    }

    /// Extended master secret (RFC 7627) bound to the session hash.
    pub fn extended_master_secret(
        &self,
        pre_master_secret: &[u8],
        session_hash: &[u8],
    ) -> Result<Buf, Error> {
        trace!("TLS 1.2 extended master secret");
        self.prf(
            pre_master_secret,
            "extended master secret",
            session_hash,
            MASTER_SECRET_LEN,
        )
    }

    /// Key block for the record layer. The seed puts the server random first.
    pub fn key_block(
        &self,
        master_secret: &[u8],
        client_random: &[u8],
        server_random: &[u8],
        len: usize,
    ) -> Result<Buf, Error> {
        check_random(client_random, "client random")?;
        check_random(server_random, "server random")?;
        trace!("TLS 1.2 key expansion");

        let mut seed = Vec::with_capacity(RANDOM_LEN * 2);
        seed.extend_from_slice(server_random);
        seed.extend_from_slice(client_random);
        self.prf(master_secret, "key expansion", &seed, len)
    }

    /// Finished verify_data for `role` over a transcript hash snapshot.
    pub fn verify_data(
        &self,
        master_secret: &[u8],
        role: Role,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        let label = match role {
            Role::Client => "client finished",
            Role::Server => "server finished",
        };
        trace!("TLS 1.2 {}", label);
        self.prf(master_secret, label, transcript_hash, VERIFY_DATA_LEN)
    }

    /// Recompute verify_data and compare it with `received` in constant time.
    pub fn verify_finished(
        &self,
        master_secret: &[u8],
        role: Role,
        transcript_hash: &[u8],
        received: &[u8],
    ) -> Result<bool, Error> {
        let expected = self.verify_data(master_secret, role, transcript_hash)?;
        let ok: bool = expected.ct_eq(received).into();
        if !ok {
            debug!("TLS 1.2 {:?} Finished mismatch", role);
        }
        Ok(ok)
    }
}

fn check_random(random: &[u8], what: &str) -> Result<(), Error> {
    if random.len() != RANDOM_LEN {
        return Err(Error::InvalidArgument(format!(
            "{} must be {} bytes, got {}",
            what,
            RANDOM_LEN,
            random.len()
        )));
    }
    Ok(())
}
