//! HKDF (RFC 5869) using RustCrypto.

use hkdf::Hkdf;
use sha2::{Sha256, Sha384, Sha512};

use crate::buffer::Buf;
use crate::crypto::provider::HkdfProvider;
use crate::types::HashAlgorithm;

macro_rules! extract_into {
    ($digest:ty, $salt:expr, $ikm:expr, $out:expr) => {{
        // An empty salt is treated as HashLen zeros, which is what `None` does.
        let salt = if $salt.is_empty() { None } else { Some($salt) };
        let (prk, _) = Hkdf::<$digest>::extract(salt, $ikm);
        $out.extend_from_slice(&prk[..]);
    }};
}

macro_rules! expand_into {
    ($digest:ty, $prk:expr, $info:expr, $okm:expr) => {{
        let hk = Hkdf::<$digest>::from_prk($prk).map_err(|e| format!("Invalid PRK: {:?}", e))?;
        hk.expand($info, $okm)
            .map_err(|e| format!("HKDF expand failed: {:?}", e))?;
    }};
}

/// HKDF provider implementation using RustCrypto.
#[derive(Debug)]
pub(super) struct RustCryptoHkdfProvider;

impl HkdfProvider for RustCryptoHkdfProvider {
    fn hkdf_extract(
        &self,
        hash: HashAlgorithm,
        salt: &[u8],
        ikm: &[u8],
        out: &mut Buf,
    ) -> Result<(), String> {
        out.clear();
        match hash {
            HashAlgorithm::SHA256 => extract_into!(Sha256, salt, ikm, out),
            HashAlgorithm::SHA384 => extract_into!(Sha384, salt, ikm, out),
            HashAlgorithm::SHA512 => extract_into!(Sha512, salt, ikm, out),
        }
        Ok(())
    }

    fn hkdf_expand(
        &self,
        hash: HashAlgorithm,
        prk: &[u8],
        info: &[u8],
        out: &mut Buf,
        output_len: usize,
    ) -> Result<(), String> {
        out.clear();
        let mut okm = Buf::from(vec![0u8; output_len]);
        match hash {
            HashAlgorithm::SHA256 => expand_into!(Sha256, prk, info, &mut okm),
            HashAlgorithm::SHA384 => expand_into!(Sha384, prk, info, &mut okm),
            HashAlgorithm::SHA512 => expand_into!(Sha512, prk, info, &mut okm),
        }
        out.extend_from_slice(&okm);
        Ok(())
    }
}

/// Static instance of the HKDF provider.
pub(super) static HKDF_PROVIDER: RustCryptoHkdfProvider = RustCryptoHkdfProvider;

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 5869 Appendix A.1
    const IKM: [u8; 22] = [0x0b; 22];
    const SALT: [u8; 13] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
    ];
    const INFO: [u8; 10] = [0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9];

    const PRK: [u8; 32] = [
        0x07, 0x77, 0x09, 0x36, 0x2c, 0x2e, 0x32, 0xdf, 0x0d, 0xdc, 0x3f, 0x0d, 0xc4, 0x7b, 0xba,
        0x63, 0x90, 0xb6, 0xc7, 0x3b, 0xb5, 0x0f, 0x9c, 0x31, 0x22, 0xec, 0x84, 0x4a, 0xd7, 0xc2,
        0xb3, 0xe5,
    ];
    const OKM: [u8; 42] = [
        0x3c, 0xb2, 0x5f, 0x25, 0xfa, 0xac, 0xd5, 0x7a, 0x90, 0x43, 0x4f, 0x64, 0xd0, 0x36, 0x2f,
        0x2a, 0x2d, 0x2d, 0x0a, 0x90, 0xcf, 0x1a, 0x5a, 0x4c, 0x5d, 0xb0, 0x2d, 0x56, 0xec, 0xc4,
        0xc5, 0xbf, 0x34, 0x00, 0x72, 0x08, 0xd5, 0xb8, 0x87, 0x18, 0x58, 0x65,
    ];

    #[test]
    fn rfc5869_case1() {
        let mut prk = Buf::new();
        HKDF_PROVIDER
            .hkdf_extract(HashAlgorithm::SHA256, &SALT, &IKM, &mut prk)
            .unwrap();
        assert_eq!(&*prk, &PRK);

        let mut okm = Buf::new();
        HKDF_PROVIDER
            .hkdf_expand(HashAlgorithm::SHA256, &prk, &INFO, &mut okm, 42)
            .unwrap();
        assert_eq!(&*okm, &OKM);
    }

    #[test]
    fn extract_output_is_hash_len() {
        for (hash, len) in [
            (HashAlgorithm::SHA256, 32),
            (HashAlgorithm::SHA384, 48),
            (HashAlgorithm::SHA512, 64),
        ] {
            let mut prk = Buf::new();
            HKDF_PROVIDER.hkdf_extract(hash, &[], &IKM, &mut prk).unwrap();
            assert_eq!(prk.len(), len);

            // An empty salt is HashLen zeros.
            let mut zeros = Buf::new();
            HKDF_PROVIDER
                .hkdf_extract(hash, &vec![0; len], &IKM, &mut zeros)
                .unwrap();
            assert_eq!(prk, zeros);
        }
    }

    #[test]
    fn expand_too_long() {
        let mut okm = Buf::new();
        // SHA-256 can produce at most 255 * 32 bytes.
        let res = HKDF_PROVIDER.hkdf_expand(HashAlgorithm::SHA256, &PRK, &[], &mut okm, 255 * 32 + 1);
        assert!(res.is_err());
    }

    #[test]
    fn prk_length_follows_hash() {
        let mut prk = Buf::new();
        HKDF_PROVIDER
            .hkdf_extract(HashAlgorithm::SHA384, &[], &IKM, &mut prk)
            .unwrap();
        assert_eq!(prk.len(), 48);
        HKDF_PROVIDER
            .hkdf_extract(HashAlgorithm::SHA512, &[], &IKM, &mut prk)
            .unwrap();
        assert_eq!(prk.len(), 64);
    }
}
