use crate::codec::{expect_empty, read_u16, read_u16_prefixed, write_u16_prefixed};
use crate::types::SignatureScheme;
use crate::Error;

const CTX: &str = "certificate_verify";

/// CertificateVerify handshake body: the signature scheme and the signature.
///
/// The same layout is TLS 1.2's DigitallySigned struct, so both versions
/// share this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVerify {
    pub scheme: SignatureScheme,
    pub signature: Vec<u8>,
}

impl CertificateVerify {
    pub fn new(scheme: SignatureScheme, signature: Vec<u8>) -> Self {
        CertificateVerify { scheme, signature }
    }

    pub fn signature_algorithm(&self) -> SignatureScheme {
        self.scheme
    }

    pub fn set_signature_algorithm(&mut self, scheme: SignatureScheme) {
        self.scheme = scheme;
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn set_signature(&mut self, signature: Vec<u8>) {
        self.signature = signature;
    }

    pub fn parse(data: &[u8]) -> Result<CertificateVerify, Error> {
        let (rest, scheme) = read_u16(data, CTX)?;
        let (rest, signature) = read_u16_prefixed(rest, CTX)?;
        expect_empty(rest, CTX)?;
        Ok(CertificateVerify {
            scheme: SignatureScheme::from_u16(scheme),
            signature: signature.to_vec(),
        })
    }

    /// Fails if the signature is longer than the 16-bit length allows.
    pub fn serialize(&self, out: &mut Vec<u8>) -> Result<(), Error> {
        let start = out.len();
        out.extend_from_slice(&self.scheme.as_u16().to_be_bytes());
        let res = write_u16_prefixed(out, CTX, |out| {
            out.extend_from_slice(&self.signature);
            Ok(())
        });
        if res.is_err() {
            out.truncate(start);
        }
        res
    }
}
