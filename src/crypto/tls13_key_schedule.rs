//! TLS 1.3 Key Schedule (RFC 8446 Section 7.1)
//!
//! ```text
//!              0
//!              |
//!              v
//!    PSK ->  HKDF-Extract = Early Secret
//!              |
//!              +-----> Derive-Secret(., "ext binder" | "res binder", "")
//!              |                     = binder_key
//!              |
//!              +-----> Derive-Secret(., "c e traffic", ClientHello)
//!              |                     = client_early_traffic_secret
//!              |
//!              +-----> Derive-Secret(., "e exp master", ClientHello)
//!              |                     = early_exporter_master_secret
//!              v
//!        Derive-Secret(., "derived", "")
//!              |
//!              v
//!    (EC)DHE -> HKDF-Extract = Handshake Secret
//!              |
//!              +-----> Derive-Secret(., "c hs traffic",
//!              |                     ClientHello...ServerHello)
//!              |                     = client_handshake_traffic_secret
//!              |
//!              +-----> Derive-Secret(., "s hs traffic",
//!              |                     ClientHello...ServerHello)
//!              |                     = server_handshake_traffic_secret
//!              v
//!        Derive-Secret(., "derived", "")
//!              |
//!              v
//!    0 -> HKDF-Extract = Master Secret
//!              |
//!              +-----> Derive-Secret(., "c ap traffic",
//!              |                     ClientHello...server Finished)
//!              |                     = client_application_traffic_secret_0
//!              |
//!              +-----> Derive-Secret(., "s ap traffic",
//!              |                     ClientHello...server Finished)
//!              |                     = server_application_traffic_secret_0
//!              |
//!              +-----> Derive-Secret(., "exp master",
//!              |                     ClientHello...server Finished)
//!              |                     = exporter_master_secret
//!              |
//!              +-----> Derive-Secret(., "res master",
//!                                    ClientHello...client Finished)
//!                                    = resumption_master_secret
//! ```
//!
//! The three extract stages are distinct types. A traffic secret can only be
//! derived from the stage that owns its label, and a stage can only be built
//! from the one before it, so the chain cannot be walked out of order.
//!
//! Every `transcript_hash` argument is a snapshot of the running transcript
//! hash taken at the boundary named in the diagram. Passing a snapshot from
//! the wrong point yields a well-formed but useless secret, so callers should
//! take snapshots through [`Transcript`](crate::crypto::Transcript).

use subtle::ConstantTimeEq;

use crate::buffer::Buf;
use crate::crypto::CryptoProvider;
use crate::types::{CipherSuite, HashAlgorithm, Role};
use crate::Error;

macro_rules! stage {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(Buf);

        impl $name {
            /// Raw secret bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

stage!(
    /// Output of the first extract, keyed by the PSK (or zeros).
    EarlySecret
);
stage!(
    /// Output of the second extract, keyed by the (EC)DHE shared secret.
    HandshakeSecret
);
stage!(
    /// Output of the final extract.
    MasterSecret
);

/// HKDF ladder for one TLS 1.3 handshake.
#[derive(Debug, Clone, Copy)]
pub struct Tls13KeySchedule<'a> {
    provider: &'a CryptoProvider,
    hash: HashAlgorithm,
}

impl<'a> Tls13KeySchedule<'a> {
    pub fn new(provider: &'a CryptoProvider, hash: HashAlgorithm) -> Self {
        Tls13KeySchedule { provider, hash }
    }

    /// Key schedule for a negotiated TLS 1.3 suite.
    pub fn for_cipher_suite(
        provider: &'a CryptoProvider,
        suite: CipherSuite,
    ) -> Result<Self, Error> {
        if !suite.is_tls13() {
            return Err(Error::InvalidArgument(format!(
                "{} is not a TLS 1.3 cipher suite",
                suite
            )));
        }
        Ok(Self::new(provider, suite.hash_algorithm()))
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    fn hash_len(&self) -> usize {
        self.hash.output_len()
    }

    fn extract(&self, salt: &[u8], ikm: &[u8]) -> Result<Buf, Error> {
        let mut out = Buf::new();
        self.provider
            .hkdf_provider
            .hkdf_extract(self.hash, salt, ikm, &mut out)
            .map_err(Error::Crypto)?;
        Ok(out)
    }

    fn expand_label(
        &self,
        secret: &[u8],
        label: &[u8],
        context: &[u8],
        len: usize,
    ) -> Result<Buf, Error> {
        let mut out = Buf::new();
        self.provider
            .hkdf_provider
            .hkdf_expand_label(self.hash, secret, label, context, &mut out, len)
            .map_err(Error::Crypto)?;
        Ok(out)
    }

    fn empty_hash(&self) -> Buf {
        self.provider.digest(self.hash, &[])
    }

    fn check_transcript(&self, transcript_hash: &[u8]) -> Result<(), Error> {
        if transcript_hash.len() != self.hash_len() {
            return Err(Error::InvalidArgument(format!(
                "transcript hash is {} bytes, {} needs {}",
                transcript_hash.len(),
                self.hash,
                self.hash_len()
            )));
        }
        Ok(())
    }

    /// Derive-Secret(secret, label, Messages) with `transcript_hash` standing
    /// in for Transcript-Hash(Messages).
    pub fn derive_secret(
        &self,
        secret: &[u8],
        label: &[u8],
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        self.check_transcript(transcript_hash)?;
        self.expand_label(secret, label, transcript_hash, self.hash_len())
    }

    /// Derive-Secret(secret, "derived", "") used as the salt of the next extract.
    fn derived(&self, secret: &[u8]) -> Result<Buf, Error> {
        let empty = self.empty_hash();
        self.derive_secret(secret, b"derived", &empty)
    }

    // ------------------------------------------------------------------------
    // Early secret
    // ------------------------------------------------------------------------

    /// Early Secret = HKDF-Extract(0, PSK). Without a PSK a zero key is used.
    pub fn early_secret(&self, psk: Option<&[u8]>) -> Result<EarlySecret, Error> {
        trace!("Early secret (psk: {})", psk.is_some());
        let zeros = Buf::from(vec![0u8; self.hash_len()]);
        let ikm = psk.unwrap_or(&zeros[..]);
        Ok(EarlySecret(self.extract(&[], ikm)?))
    }

    /// Key for PSK binders. External PSKs use "ext binder", resumption PSKs
    /// use "res binder".
    pub fn binder_key(&self, early: &EarlySecret, external: bool) -> Result<Buf, Error> {
        let label: &[u8] = if external { b"ext binder" } else { b"res binder" };
        trace!("Binder key (external: {})", external);
        let empty = self.empty_hash();
        self.derive_secret(&early.0, label, &empty)
    }

    /// 0-RTT traffic secret over the ClientHello.
    pub fn client_early_traffic_secret(
        &self,
        early: &EarlySecret,
        client_hello_hash: &[u8],
    ) -> Result<Buf, Error> {
        trace!("Client early traffic secret");
        self.derive_secret(&early.0, b"c e traffic", client_hello_hash)
    }

    /// Early exporter secret over the ClientHello.
    pub fn early_exporter_master_secret(
        &self,
        early: &EarlySecret,
        client_hello_hash: &[u8],
    ) -> Result<Buf, Error> {
        trace!("Early exporter master secret");
        self.derive_secret(&early.0, b"e exp master", client_hello_hash)
    }

    // ------------------------------------------------------------------------
    // Handshake secret
    // ------------------------------------------------------------------------

    /// Handshake Secret = HKDF-Extract(Derive-Secret(early, "derived", ""), (EC)DHE).
    pub fn handshake_secret(
        &self,
        early: &EarlySecret,
        shared_secret: &[u8],
    ) -> Result<HandshakeSecret, Error> {
        trace!("Handshake secret");
        let salt = self.derived(&early.0)?;
        Ok(HandshakeSecret(self.extract(&salt, shared_secret)?))
    }

    /// Traffic secret for `role` over ClientHello...ServerHello.
    pub fn handshake_traffic_secret(
        &self,
        handshake: &HandshakeSecret,
        role: Role,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        let label: &[u8] = match role {
            Role::Client => b"c hs traffic",
            Role::Server => b"s hs traffic",
        };
        trace!("{:?} handshake traffic secret", role);
        self.derive_secret(&handshake.0, label, transcript_hash)
    }

    pub fn client_handshake_traffic_secret(
        &self,
        handshake: &HandshakeSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        self.handshake_traffic_secret(handshake, Role::Client, transcript_hash)
    }

    pub fn server_handshake_traffic_secret(
        &self,
        handshake: &HandshakeSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        self.handshake_traffic_secret(handshake, Role::Server, transcript_hash)
    }

    // ------------------------------------------------------------------------
    // Master secret
    // ------------------------------------------------------------------------

    /// Master Secret = HKDF-Extract(Derive-Secret(handshake, "derived", ""), 0).
    pub fn master_secret(&self, handshake: &HandshakeSecret) -> Result<MasterSecret, Error> {
        trace!("Master secret");
        let salt = self.derived(&handshake.0)?;
        let zeros = Buf::from(vec![0u8; self.hash_len()]);
        Ok(MasterSecret(self.extract(&salt, &zeros)?))
    }

    /// Traffic secret for `role` over ClientHello...server Finished.
    pub fn application_traffic_secret(
        &self,
        master: &MasterSecret,
        role: Role,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        let label: &[u8] = match role {
            Role::Client => b"c ap traffic",
            Role::Server => b"s ap traffic",
        };
        trace!("{:?} application traffic secret", role);
        self.derive_secret(&master.0, label, transcript_hash)
    }

    pub fn client_application_traffic_secret(
        &self,
        master: &MasterSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        self.application_traffic_secret(master, Role::Client, transcript_hash)
    }

    pub fn server_application_traffic_secret(
        &self,
        master: &MasterSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        self.application_traffic_secret(master, Role::Server, transcript_hash)
    }

    /// Exporter master secret over ClientHello...server Finished.
    pub fn exporter_master_secret(
        &self,
        master: &MasterSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        trace!("Exporter master secret");
        self.derive_secret(&master.0, b"exp master", transcript_hash)
    }

    /// Resumption master secret over ClientHello...client Finished.
    pub fn resumption_master_secret(
        &self,
        master: &MasterSecret,
        transcript_hash: &[u8],
    ) -> Result<Buf, Error> {
        trace!("Resumption master secret");
        self.derive_secret(&master.0, b"res master", transcript_hash)
    }

    // ------------------------------------------------------------------------
    // Post-handshake
    // ------------------------------------------------------------------------

    /// PSK for a NewSessionTicket (RFC 8446 Section 4.6.1).
    pub fn resumption_psk(
        &self,
        resumption_master_secret: &[u8],
        ticket_nonce: &[u8],
    ) -> Result<Buf, Error> {
        trace!("Resumption PSK");
        self.expand_label(
            resumption_master_secret,
            b"resumption",
            ticket_nonce,
            self.hash_len(),
        )
    }

    /// application_traffic_secret_N+1 (RFC 8446 Section 7.2).
    pub fn next_application_traffic_secret(&self, current: &[u8]) -> Result<Buf, Error> {
        trace!("Application traffic secret update");
        self.expand_label(current, b"traffic upd", &[], self.hash_len())
    }

    /// Record protection key and IV from a traffic secret (RFC 8446 Section 7.3).
    ///
    /// Returns (key, iv).
    pub fn traffic_keys(
        &self,
        traffic_secret: &[u8],
        key_len: usize,
        iv_len: usize,
    ) -> Result<(Buf, Buf), Error> {
        trace!("Traffic keys");
        let key = self.expand_label(traffic_secret, b"key", &[], key_len)?;
        let iv = self.expand_label(traffic_secret, b"iv", &[], iv_len)?;
        Ok((key, iv))
    }

    /// TLS 1.3 Exporter (RFC 8446 Section 7.5)
    ///
    /// ```text
    /// TLS-Exporter(label, context_value, key_length) =
    ///     HKDF-Expand-Label(Derive-Secret(Secret, label, ""),
    ///                       "exporter", Hash(context_value), key_length)
    /// ```
    pub fn export_keying_material(
        &self,
        exporter_master_secret: &[u8],
        label: &[u8],
        context: &[u8],
        len: usize,
    ) -> Result<Buf, Error> {
        trace!("Exporter");
        let empty = self.empty_hash();
        let secret = self.derive_secret(exporter_master_secret, label, &empty)?;
        let context_hash = self.provider.digest(self.hash, context);
        self.expand_label(&secret, b"exporter", &context_hash, len)
    }

    // ------------------------------------------------------------------------
    // Finished
    // ------------------------------------------------------------------------

    /// finished_key = HKDF-Expand-Label(base_key, "finished", "", Hash.length)
    pub fn finished_key(&self, base_key: &[u8]) -> Result<Buf, Error> {
        self.expand_label(base_key, b"finished", &[], self.hash_len())
    }

    /// verify_data = HMAC(finished_key, transcript_hash)
    ///
    /// `base_key` is the sender's handshake traffic secret.
    pub fn verify_data(&self, base_key: &[u8], transcript_hash: &[u8]) -> Result<Buf, Error> {
        self.check_transcript(transcript_hash)?;
        let finished_key = self.finished_key(base_key)?;
        let mut out = Buf::new();
        self.provider
            .hmac_provider
            .hmac(self.hash, &finished_key, transcript_hash, &mut out)
            .map_err(Error::Crypto)?;
        Ok(out)
    }

    /// Recompute verify_data and compare it with `received` in constant time.
    pub fn verify_finished(
        &self,
        base_key: &[u8],
        transcript_hash: &[u8],
        received: &[u8],
    ) -> Result<bool, Error> {
        let expected = self.verify_data(base_key, transcript_hash)?;
        let ok: bool = expected.ct_eq(received).into();
        if !ok {
            debug!("TLS 1.3 Finished mismatch");
        }
        Ok(ok)
    }
}

#[cfg(all(test, feature = "rust-crypto"))]
mod tests {
    use super::*;
    use crate::crypto::rust_crypto;

    // RFC 8448 Section 3, simple 1-RTT handshake.
    const EARLY_SECRET: [u8; 32] = [
        0x33, 0xad, 0x0a, 0x1c, 0x60, 0x7e, 0xc0, 0x3b, 0x09, 0xe6, 0xcd, 0x98, 0x93, 0x68, 0x0c,
        0xe2, 0x10, 0xad, 0xf3, 0x00, 0xaa, 0x1f, 0x26, 0x60, 0xe1, 0xb2, 0x2e, 0x10, 0xf1, 0x70,
        0xf9, 0x2a,
    ];
    const DERIVED: [u8; 32] = [
        0x6f, 0x26, 0x15, 0xa1, 0x08, 0xc7, 0x02, 0xc5, 0x67, 0x8f, 0x54, 0xfc, 0x9d, 0xba, 0xb6,
        0x97, 0x16, 0xc0, 0x76, 0x18, 0x9c, 0x48, 0x25, 0x0c, 0xeb, 0xea, 0xc3, 0x57, 0x6c, 0x36,
        0x11, 0xba,
    ];
    const ECDHE: [u8; 32] = [
        0x8b, 0xd4, 0x05, 0x4f, 0xb5, 0x5b, 0x9d, 0x63, 0xfd, 0xfb, 0xac, 0xf9, 0xf0, 0x4b, 0x9f,
        0x0d, 0x35, 0xe6, 0xd6, 0x3f, 0x53, 0x75, 0x63, 0xef, 0xd4, 0x62, 0x72, 0x90, 0x0f, 0x89,
        0x49, 0x2d,
    ];
    const HANDSHAKE_SECRET: [u8; 32] = [
        0x1d, 0xc8, 0x26, 0xe9, 0x36, 0x06, 0xaa, 0x6f, 0xdc, 0x0a, 0xad, 0xc1, 0x2f, 0x74, 0x1b,
        0x01, 0x04, 0x6a, 0xa6, 0xb9, 0x9f, 0x69, 0x1e, 0xd2, 0x21, 0xa9, 0xf0, 0xca, 0x04, 0x3f,
        0xbe, 0xac,
    ];

    #[test]
    fn rfc8448_early_and_handshake() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA256);

        let early = ks.early_secret(None).unwrap();
        assert_eq!(early.as_bytes(), &EARLY_SECRET);

        let derived = ks.derived(early.as_bytes()).unwrap();
        assert_eq!(&*derived, &DERIVED);

        let hs = ks.handshake_secret(&early, &ECDHE).unwrap();
        assert_eq!(hs.as_bytes(), &HANDSHAKE_SECRET);
    }

    #[test]
    fn zero_psk_equals_no_psk() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA256);
        let a = ks.early_secret(None).unwrap();
        let b = ks.early_secret(Some(&[0u8; 32][..])).unwrap();
        assert_eq!(a, b);
        let c = ks.early_secret(Some(&b"external psk"[..])).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn traffic_secrets_depend_on_role_and_transcript() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA256);
        let early = ks.early_secret(None).unwrap();
        let hs = ks.handshake_secret(&early, &ECDHE).unwrap();
        let master = ks.master_secret(&hs).unwrap();

        let t1 = provider.digest(HashAlgorithm::SHA256, b"ClientHello ServerHello");
        let t2 = provider.digest(HashAlgorithm::SHA256, b"... server Finished");

        let c_hs = ks.client_handshake_traffic_secret(&hs, &t1).unwrap();
        let s_hs = ks.server_handshake_traffic_secret(&hs, &t1).unwrap();
        assert_ne!(c_hs, s_hs);

        let c_ap = ks.client_application_traffic_secret(&master, &t2).unwrap();
        let s_ap = ks.server_application_traffic_secret(&master, &t2).unwrap();
        assert_ne!(c_ap, s_ap);
        assert_eq!(c_ap.len(), 32);

        let c_ap_other = ks.client_application_traffic_secret(&master, &t1).unwrap();
        assert_ne!(c_ap, c_ap_other);

        let exp = ks.exporter_master_secret(&master, &t2).unwrap();
        let res = ks.resumption_master_secret(&master, &t2).unwrap();
        assert_ne!(exp, res);
    }

    #[test]
    fn transcript_length_checked() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA384);
        let early = ks.early_secret(None).unwrap();
        let hs = ks.handshake_secret(&early, &[7; 48]).unwrap();
        let err = ks
            .client_handshake_traffic_secret(&hs, &[0; 32])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn finished_round_trip() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA256);
        let base = [0x42; 32];
        let transcript = provider.digest(HashAlgorithm::SHA256, b"transcript");

        let vd = ks.verify_data(&base, &transcript).unwrap();
        assert_eq!(vd.len(), 32);
        assert!(ks.verify_finished(&base, &transcript, &vd).unwrap());

        let mut bad = vd.to_vec();
        bad[31] ^= 0x01;
        assert!(!ks.verify_finished(&base, &transcript, &bad).unwrap());

        let mut other_base = base;
        other_base[0] ^= 0x01;
        assert!(!ks.verify_finished(&other_base, &transcript, &vd).unwrap());
    }

    #[test]
    fn post_handshake_derivations() {
        let provider = rust_crypto::default_provider();
        let ks =
            Tls13KeySchedule::for_cipher_suite(&provider, CipherSuite::TLS_AES_256_GCM_SHA384)
                .unwrap();
        assert_eq!(ks.hash_algorithm(), HashAlgorithm::SHA384);

        let secret = [0x01; 48];
        let (key, iv) = ks.traffic_keys(&secret, 32, 12).unwrap();
        assert_eq!(key.len(), 32);
        assert_eq!(iv.len(), 12);

        let next = ks.next_application_traffic_secret(&secret).unwrap();
        assert_eq!(next.len(), 48);
        assert_ne!(&*next, &secret[..]);

        let psk0 = ks.resumption_psk(&secret, &[0]).unwrap();
        let psk1 = ks.resumption_psk(&secret, &[1]).unwrap();
        assert_ne!(psk0, psk1);

        let a = ks.export_keying_material(&secret, b"EXPORTER-test", b"", 20).unwrap();
        let b = ks.export_keying_material(&secret, b"EXPORTER-test", b"ctx", 20).unwrap();
        assert_eq!(a.len(), 20);
        assert_ne!(a, b);

        assert!(Tls13KeySchedule::for_cipher_suite(
            &provider,
            CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256
        )
        .is_err());
    }

    #[test]
    fn binder_keys_differ() {
        let provider = rust_crypto::default_provider();
        let ks = Tls13KeySchedule::new(&provider, HashAlgorithm::SHA256);
        let early = ks.early_secret(Some(&b"psk"[..])).unwrap();
        let ext = ks.binder_key(&early, true).unwrap();
        let res = ks.binder_key(&early, false).unwrap();
        assert_ne!(ext, res);
    }
}
