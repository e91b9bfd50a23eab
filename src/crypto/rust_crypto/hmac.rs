//! HMAC and the TLS 1.2 P_hash expansion using RustCrypto.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::buffer::Buf;
use crate::crypto::provider::HmacProvider;
use crate::types::HashAlgorithm;

macro_rules! hmac_into {
    ($digest:ty, $key:expr, $parts:expr, $out:expr) => {{
        let mut mac = Hmac::<$digest>::new_from_slice($key)
            .map_err(|_| "Invalid HMAC key length".to_string())?;
        for p in $parts {
            mac.update(p);
        }
        $out.clear();
        $out.extend_from_slice(&mac.finalize().into_bytes());
    }};
}

/// HMAC over the concatenation of `parts`.
pub(super) fn hmac_parts(
    hash: HashAlgorithm,
    key: &[u8],
    parts: &[&[u8]],
    out: &mut Buf,
) -> Result<(), String> {
    match hash {
        HashAlgorithm::SHA256 => hmac_into!(Sha256, key, parts, out),
        HashAlgorithm::SHA384 => hmac_into!(Sha384, key, parts, out),
        HashAlgorithm::SHA512 => hmac_into!(Sha512, key, parts, out),
    }
    Ok(())
}

/// Compute the TLS 1.2 P_hash expansion (RFC 5246 Section 5).
pub(super) fn p_hash(
    hash_alg: HashAlgorithm,
    secret: &[u8],
    full_seed: &[u8],
    out: &mut Buf,
    output_len: usize,
) -> Result<(), String> {
    out.clear();

    // A(1) = HMAC_hash(secret, A(0)) where A(0) = seed
    let mut a = Buf::new();
    hmac_parts(hash_alg, secret, &[full_seed], &mut a)?;

    let mut block = Buf::new();
    while out.len() < output_len {
        // HMAC_hash(secret, A(i) + seed)
        hmac_parts(hash_alg, secret, &[&a[..], full_seed], &mut block)?;

        let remaining = output_len - out.len();
        let to_copy = std::cmp::min(remaining, block.len());
        out.extend_from_slice(&block[..to_copy]);

        if out.len() < output_len {
            // A(i+1) = HMAC_hash(secret, A(i))
            let mut next = Buf::new();
            hmac_parts(hash_alg, secret, &[&a[..]], &mut next)?;
            a = next;
        }
    }

    Ok(())
}

/// HMAC provider implementation.
#[derive(Debug)]
pub(super) struct RustCryptoHmacProvider;

impl HmacProvider for RustCryptoHmacProvider {
    fn hmac(
        &self,
        hash: HashAlgorithm,
        key: &[u8],
        data: &[u8],
        out: &mut Buf,
    ) -> Result<(), String> {
        hmac_parts(hash, key, &[data], out)
    }
}

/// Static instance of the HMAC provider.
pub(super) static HMAC_PROVIDER: RustCryptoHmacProvider = RustCryptoHmacProvider;

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2.
    #[test]
    fn rfc4231_case2_sha256() {
        let mut out = Buf::new();
        HMAC_PROVIDER
            .hmac(
                HashAlgorithm::SHA256,
                b"Jefe",
                b"what do ya want for nothing?",
                &mut out,
            )
            .unwrap();
        let expected = [
            0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95,
            0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9,
            0x64, 0xec, 0x38, 0x43,
        ];
        assert_eq!(&*out, &expected);
    }

    #[test]
    fn p_hash_truncates_to_length() {
        let mut out = Buf::new();
        p_hash(HashAlgorithm::SHA256, b"secret", b"seed", &mut out, 100).unwrap();
        assert_eq!(out.len(), 100);

        let mut short = Buf::new();
        p_hash(HashAlgorithm::SHA256, b"secret", b"seed", &mut short, 12).unwrap();
        assert_eq!(&short[..], &out[..12]);
    }
}
