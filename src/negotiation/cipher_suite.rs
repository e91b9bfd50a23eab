use crate::types::{CipherSuite, ProtocolVersion};
use crate::Config;

/// Server-preference cipher suite negotiation for one protocol version.
#[derive(Debug, Clone)]
pub struct CipherSuiteNegotiator {
    version: ProtocolVersion,
    server_cipher_suites: Vec<CipherSuite>,
}

impl CipherSuiteNegotiator {
    /// `None` selects the recommended list for `version`.
    pub fn new(version: ProtocolVersion, server_cipher_suites: Option<Vec<CipherSuite>>) -> Self {
        let server_cipher_suites = server_cipher_suites
            .unwrap_or_else(|| CipherSuite::recommended(version).to_vec());
        CipherSuiteNegotiator {
            version,
            server_cipher_suites,
        }
    }

    /// Use the configured list matching the class of `version`.
    pub fn from_config(config: &Config, version: ProtocolVersion) -> Self {
        let suites = if version.is_tls13() {
            config.tls13_cipher_suites()
        } else {
            config.tls12_cipher_suites()
        };
        CipherSuiteNegotiator::new(version, Some(suites.to_vec()))
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    pub fn set_version(&mut self, version: ProtocolVersion) {
        self.version = version;
    }

    pub fn server_cipher_suites(&self) -> &[CipherSuite] {
        &self.server_cipher_suites
    }

    pub fn set_server_cipher_suites(&mut self, suites: Vec<CipherSuite>) {
        self.server_cipher_suites = suites;
    }

    /// Append `suite` as the least preferred, unless already listed.
    pub fn add_server_cipher_suite(&mut self, suite: CipherSuite) {
        if !self.server_cipher_suites.contains(&suite) {
            self.server_cipher_suites.push(suite);
        }
    }

    /// Highest-preference local suite that the client also offered.
    ///
    /// Suites outside the version's id range are ignored on both sides.
    pub fn negotiate(&self, client_cipher_suites: &[CipherSuite]) -> Option<CipherSuite> {
        let tls13 = self.version.is_tls13();

        let selected = self
            .server_cipher_suites
            .iter()
            .filter(|s| s.is_tls13() == tls13)
            .find(|s| {
                client_cipher_suites
                    .iter()
                    .any(|c| c.is_tls13() == tls13 && c == *s)
            })
            .copied();

        match selected {
            Some(suite) => debug!("Negotiated cipher suite {} for {}", suite, self.version),
            None => debug!(
                "No common cipher suite for {} ({} local, {} offered)",
                self.version,
                self.server_cipher_suites.len(),
                client_cipher_suites.len()
            ),
        }

        selected
    }

    pub fn is_cipher_suite_secure(&self, suite: CipherSuite) -> bool {
        suite.is_secure()
    }
}
