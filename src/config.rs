use crate::crypto::CryptoProvider;
use crate::psk::PskMode;
use crate::types::{CipherSuite, NamedGroup, ProtocolVersion};
use crate::Error;

#[cfg(feature = "rust-crypto")]
use crate::crypto::rust_crypto;

/// Negotiation configuration.
///
/// Holds the local preference lists the negotiators work from and the crypto
/// provider used by the key schedules and the CertificateVerify signer.
#[derive(Debug, Clone)]
pub struct Config {
    versions: Vec<ProtocolVersion>,
    tls12_cipher_suites: Vec<CipherSuite>,
    tls13_cipher_suites: Vec<CipherSuite>,
    named_groups: Vec<NamedGroup>,
    psk_preferred_mode: PskMode,
    require_preferred_psk_mode: bool,
    crypto_provider: CryptoProvider,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            versions: ProtocolVersion::recommended().to_vec(),
            tls12_cipher_suites: CipherSuite::recommended_tls12().to_vec(),
            tls13_cipher_suites: CipherSuite::recommended_tls13().to_vec(),
            named_groups: NamedGroup::recommended(ProtocolVersion::Tls1_3).to_vec(),
            psk_preferred_mode: PskMode::PskDheKe,
            require_preferred_psk_mode: false,
            crypto_provider: None,
        }
    }

    /// Supported protocol versions, most preferred first.
    #[inline(always)]
    pub fn versions(&self) -> &[ProtocolVersion] {
        &self.versions
    }

    /// Whether `version` is enabled.
    pub fn supports_version(&self, version: ProtocolVersion) -> bool {
        self.versions.contains(&version)
    }

    /// Server preference list for TLS 1.2 and earlier.
    #[inline(always)]
    pub fn tls12_cipher_suites(&self) -> &[CipherSuite] {
        &self.tls12_cipher_suites
    }

    /// Server preference list for TLS 1.3.
    #[inline(always)]
    pub fn tls13_cipher_suites(&self) -> &[CipherSuite] {
        &self.tls13_cipher_suites
    }

    /// The suite list that applies to `version`.
    pub fn cipher_suites(&self, version: ProtocolVersion) -> &[CipherSuite] {
        if version.is_tls13() {
            &self.tls13_cipher_suites
        } else {
            &self.tls12_cipher_suites
        }
    }

    /// Locally supported key exchange groups.
    #[inline(always)]
    pub fn named_groups(&self) -> &[NamedGroup] {
        &self.named_groups
    }

    /// PSK key exchange mode picked when the peer offers it.
    #[inline(always)]
    pub fn psk_preferred_mode(&self) -> PskMode {
        self.psk_preferred_mode
    }

    /// Refuse PSK negotiation when the peer does not offer the preferred mode.
    #[inline(always)]
    pub fn require_preferred_psk_mode(&self) -> bool {
        self.require_preferred_psk_mode
    }

    /// Cryptographic provider.
    ///
    /// Provides hashing, HMAC, HKDF, the TLS 1.2 PRF and signatures.
    #[inline(always)]
    pub fn crypto_provider(&self) -> &CryptoProvider {
        &self.crypto_provider
    }
}

/// Builder for [`Config`].
#[derive(Debug)]
pub struct ConfigBuilder {
    versions: Vec<ProtocolVersion>,
    tls12_cipher_suites: Vec<CipherSuite>,
    tls13_cipher_suites: Vec<CipherSuite>,
    named_groups: Vec<NamedGroup>,
    psk_preferred_mode: PskMode,
    require_preferred_psk_mode: bool,
    crypto_provider: Option<CryptoProvider>,
}

impl ConfigBuilder {
    /// Set the supported protocol versions, most preferred first.
    ///
    /// Defaults to TLS 1.3 then TLS 1.2.
    pub fn versions(mut self, versions: Vec<ProtocolVersion>) -> Self {
        self.versions = versions;
        self
    }

    /// Set the TLS 1.2 server preference list.
    ///
    /// Defaults to [`CipherSuite::recommended_tls12()`].
    pub fn tls12_cipher_suites(mut self, suites: Vec<CipherSuite>) -> Self {
        self.tls12_cipher_suites = suites;
        self
    }

    /// Set the TLS 1.3 server preference list.
    ///
    /// Defaults to [`CipherSuite::recommended_tls13()`].
    pub fn tls13_cipher_suites(mut self, suites: Vec<CipherSuite>) -> Self {
        self.tls13_cipher_suites = suites;
        self
    }

    /// Set the locally supported key exchange groups.
    ///
    /// Defaults to the recommended TLS 1.3 groups.
    pub fn named_groups(mut self, groups: Vec<NamedGroup>) -> Self {
        self.named_groups = groups;
        self
    }

    /// Set the preferred PSK key exchange mode.
    ///
    /// Defaults to `psk_dhe_ke`.
    pub fn psk_preferred_mode(mut self, mode: PskMode) -> Self {
        self.psk_preferred_mode = mode;
        self
    }

    /// Set whether PSK negotiation fails when the peer lacks the preferred mode.
    ///
    /// Defaults to false.
    pub fn require_preferred_psk_mode(mut self, require: bool) -> Self {
        self.require_preferred_psk_mode = require;
        self
    }

    /// Set a custom crypto provider.
    ///
    /// If not set, the process default is used, then the RustCrypto provider
    /// when the `rust-crypto` feature is enabled.
    pub fn with_crypto_provider(mut self, provider: CryptoProvider) -> Self {
        self.crypto_provider = Some(provider);
        self
    }

    /// Build the configuration.
    ///
    /// Returns `Error::InvalidArgument` if no version is enabled, if an
    /// enabled version class has no cipher suites, if a suite sits in the
    /// wrong version list, or if no crypto provider can be found.
    ///
    /// The crypto provider is selected in the following priority order:
    /// 1. Explicit provider set via `with_crypto_provider()`
    /// 2. Default provider installed via `CryptoProvider::install_default()`
    /// 3. RustCrypto provider (if `rust-crypto` feature is enabled)
    pub fn build(self) -> Result<Config, Error> {
        let crypto_provider = self
            .crypto_provider
            .or_else(|| CryptoProvider::get_default().cloned())
            .or_else(|| {
                #[cfg(feature = "rust-crypto")]
                {
                    Some(rust_crypto::default_provider())
                }
                #[cfg(not(feature = "rust-crypto"))]
                {
                    None
                }
            })
            .ok_or_else(|| {
                Error::InvalidArgument(
                    "No crypto provider available. Either set one explicitly, install \
                     a default via CryptoProvider::install_default(), or enable the \
                     'rust-crypto' feature."
                        .to_string(),
                )
            })?;

        if self.versions.is_empty() {
            return Err(Error::InvalidArgument("No protocol version enabled".into()));
        }
        for v in &self.versions {
            if !v.is_known() {
                return Err(Error::InvalidArgument(format!("Unknown protocol version {}", v)));
            }
            if !v.is_secure() {
                warn!("Insecure protocol version enabled: {}", v);
            }
        }

        let has_tls13 = self.versions.iter().any(|v| v.is_tls13());
        let has_legacy = self.versions.iter().any(|v| !v.is_tls13());

        if has_tls13 && self.tls13_cipher_suites.is_empty() {
            return Err(Error::InvalidArgument("TLS 1.3 enabled without cipher suites".into()));
        }
        if has_legacy && self.tls12_cipher_suites.is_empty() {
            return Err(Error::InvalidArgument("TLS 1.2 enabled without cipher suites".into()));
        }
        if let Some(s) = self.tls13_cipher_suites.iter().find(|s| !s.is_tls13()) {
            return Err(Error::InvalidArgument(format!("{} is not a TLS 1.3 suite", s)));
        }
        if let Some(s) = self.tls12_cipher_suites.iter().find(|s| s.is_tls13()) {
            return Err(Error::InvalidArgument(format!("{} is a TLS 1.3 suite", s)));
        }
        for s in self.tls12_cipher_suites.iter().chain(&self.tls13_cipher_suites) {
            if !s.is_secure() {
                warn!("Insecure cipher suite configured: {}", s);
            }
        }

        Ok(Config {
            versions: self.versions,
            tls12_cipher_suites: self.tls12_cipher_suites,
            tls13_cipher_suites: self.tls13_cipher_suites,
            named_groups: self.named_groups,
            psk_preferred_mode: self.psk_preferred_mode,
            require_preferred_psk_mode: self.require_preferred_psk_mode,
            crypto_provider,
        })
    }
}
