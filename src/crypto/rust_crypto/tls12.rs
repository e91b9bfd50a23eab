//! TLS 1.2 PRF using RustCrypto.

use crate::buffer::Buf;
use crate::crypto::provider::PrfProvider;
use crate::types::HashAlgorithm;

use super::hmac;

/// PRF provider implementation for TLS 1.2.
#[derive(Debug)]
pub(super) struct RustCryptoPrfProvider;

impl PrfProvider for RustCryptoPrfProvider {
    fn prf_tls12(
        &self,
        secret: &[u8],
        label: &str,
        seed: &[u8],
        out: &mut Buf,
        output_len: usize,
        scratch: &mut Buf,
        hash: HashAlgorithm,
    ) -> Result<(), String> {
        if !label.is_ascii() {
            return Err(format!("PRF label must be ASCII: {:?}", label));
        }

        // PRF(secret, label, seed) = P_hash(secret, label + seed)
        scratch.clear();
        scratch.extend_from_slice(label.as_bytes());
        scratch.extend_from_slice(seed);

        hmac::p_hash(hash, secret, scratch, out, output_len)
    }
}

/// Static instance of the PRF provider.
pub(super) static PRF_PROVIDER: RustCryptoPrfProvider = RustCryptoPrfProvider;

#[cfg(test)]
mod tests {
    use super::*;

    // TLS 1.2 PRF-SHA256 vector published by the IETF TLS WG
    // (https://www.ietf.org/mail-archive/web/tls/current/msg03416.html).
    const SECRET: [u8; 16] = [
        0x9b, 0xbe, 0x43, 0x6b, 0xa9, 0x40, 0xf0, 0x17, 0xb1, 0x76, 0x52, 0x84, 0x9a, 0x71, 0xdb,
        0x35,
    ];
    const SEED: [u8; 16] = [
        0xa0, 0xba, 0x9f, 0x93, 0x6c, 0xda, 0x31, 0x18, 0x27, 0xa6, 0xf7, 0x96, 0xff, 0xd5, 0x19,
        0x8c,
    ];
    const OUTPUT_HEAD: [u8; 16] = [
        0xe3, 0xf2, 0x29, 0xba, 0x72, 0x7b, 0xe1, 0x7b, 0x8d, 0x12, 0x26, 0x20, 0x55, 0x7c, 0xd4,
        0x53,
    ];

    #[test]
    fn prf_sha256_vector() {
        let mut out = Buf::new();
        let mut scratch = Buf::new();
        PRF_PROVIDER
            .prf_tls12(
                &SECRET,
                "test label",
                &SEED,
                &mut out,
                100,
                &mut scratch,
                HashAlgorithm::SHA256,
            )
            .unwrap();
        assert_eq!(out.len(), 100);
        assert_eq!(&out[..16], &OUTPUT_HEAD);
    }

    #[test]
    fn non_ascii_label_rejected() {
        let mut out = Buf::new();
        let mut scratch = Buf::new();
        let res = PRF_PROVIDER.prf_tls12(
            &SECRET,
            "m\u{e4}ster",
            &SEED,
            &mut out,
            48,
            &mut scratch,
            HashAlgorithm::SHA256,
        );
        assert!(res.is_err());
    }
}
