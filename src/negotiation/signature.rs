use crate::types::{KeyType, SignatureScheme};

/// First peer scheme a local key of `key_type` can sign with.
///
/// An RSA key serves both PKCS#1 and RSA-PSS-RSAE schemes. ECDSA keys only
/// match the scheme for their curve.
pub fn select_signature_scheme(
    key_type: KeyType,
    peer_schemes: &[SignatureScheme],
) -> Option<SignatureScheme> {
    let scheme = peer_schemes
        .iter()
        .copied()
        .find(|s| s.is_compatible_with(key_type));
    match scheme {
        Some(s) => debug!("Selected signature scheme {} for {:?} key", s, key_type),
        None => debug!("No peer signature scheme fits a {:?} key", key_type),
    }
    scheme
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignatureScheme::*;

    #[test]
    fn rsa_accepts_pss() {
        let peer = [ECDSA_SECP256R1_SHA256, RSA_PSS_RSAE_SHA256, RSA_PKCS1_SHA256];
        assert_eq!(
            select_signature_scheme(KeyType::Rsa, &peer),
            Some(RSA_PSS_RSAE_SHA256)
        );
    }

    #[test]
    fn ecdsa_bound_to_curve() {
        let peer = [ECDSA_SECP256R1_SHA256, RSA_PKCS1_SHA256];
        assert_eq!(select_signature_scheme(KeyType::EcdsaP384, &peer), None);
        assert_eq!(
            select_signature_scheme(KeyType::EcdsaP256, &peer),
            Some(ECDSA_SECP256R1_SHA256)
        );
    }

    #[test]
    fn pss_pss_not_for_rsae_key() {
        assert_eq!(
            select_signature_scheme(KeyType::Rsa, &[RSA_PSS_PSS_SHA256, ED25519]),
            None
        );
    }
}
