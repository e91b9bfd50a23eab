use crate::message::extensions::{PreSharedKeyClientHello, PskIdentity, PskKeyExchangeModes};
use crate::{Config, Error};

use super::{PskMode, PskStore};

/// Server-side choice of PSK identity and key exchange mode.
///
/// Identities are matched in the client's order. The first offered identity
/// the store knows wins.
#[derive(Debug)]
pub struct PskNegotiator<'a> {
    store: &'a PskStore,
    preferred_mode: PskMode,
    require_preferred_mode: bool,
    negotiated_psk: Option<Vec<u8>>,
    negotiated_mode: Option<PskMode>,
}

impl<'a> PskNegotiator<'a> {
    /// Prefers [`PskMode::PskDheKe`] without requiring it.
    pub fn new(store: &'a PskStore) -> Self {
        PskNegotiator {
            store,
            preferred_mode: PskMode::PskDheKe,
            require_preferred_mode: false,
            negotiated_psk: None,
            negotiated_mode: None,
        }
    }

    /// Take the mode preferences from `config`.
    pub fn from_config(store: &'a PskStore, config: &Config) -> Self {
        let mut n = PskNegotiator::new(store);
        n.preferred_mode = config.psk_preferred_mode();
        n.require_preferred_mode = config.require_preferred_psk_mode();
        n
    }

    /// Index of the first offered identity present in the store.
    pub fn select_best_psk(&self, offered: &[PskIdentity]) -> Option<usize> {
        let found = offered
            .iter()
            .position(|id| self.store.contains(&id.identity));
        match found {
            Some(i) => debug!("Selected PSK identity #{} of {}", i, offered.len()),
            None => debug!("No offered PSK identity matches ({} offered)", offered.len()),
        }
        found
    }

    /// Pick a mode from the raw values the peer sent.
    ///
    /// The preferred mode wins if offered. Otherwise, unless the preferred
    /// mode is required, the first recognised mode is taken.
    pub fn select_best_psk_mode(&self, peer_modes: &[u8]) -> Option<PskMode> {
        if peer_modes.contains(&self.preferred_mode.as_u8()) {
            debug!("Selected preferred PSK mode {}", self.preferred_mode);
            return Some(self.preferred_mode);
        }

        if self.require_preferred_mode {
            debug!(
                "Peer did not offer required PSK mode {}",
                self.preferred_mode
            );
            return None;
        }

        let mode = peer_modes.iter().find_map(|&m| PskMode::from_u8(m));
        match mode {
            Some(m) => debug!("Selected PSK mode {}", m),
            None => debug!("No usable PSK mode offered"),
        }
        mode
    }

    /// Fails with [`Error::InvalidArgument`] for an unknown mode value.
    pub fn set_preferred_mode(&mut self, mode: u8) -> Result<(), Error> {
        self.preferred_mode = PskMode::try_from(mode)?;
        Ok(())
    }

    pub fn preferred_mode(&self) -> PskMode {
        self.preferred_mode
    }

    pub fn set_require_preferred_mode(&mut self, required: bool) {
        self.require_preferred_mode = required;
    }

    pub fn is_preferred_mode_required(&self) -> bool {
        self.require_preferred_mode
    }

    pub fn set_negotiated_psk(&mut self, identity: Option<Vec<u8>>) {
        self.negotiated_psk = identity;
    }

    pub fn negotiated_psk(&self) -> Option<&[u8]> {
        self.negotiated_psk.as_deref()
    }

    /// Secret of the negotiated identity, if it is still registered.
    pub fn negotiated_secret(&self) -> Option<&'a [u8]> {
        let store = self.store;
        self.negotiated_psk
            .as_deref()
            .and_then(|id| store.get(id))
    }

    pub fn set_negotiated_mode(&mut self, mode: Option<PskMode>) {
        self.negotiated_mode = mode;
    }

    pub fn negotiated_mode(&self) -> Option<PskMode> {
        self.negotiated_mode
    }

    /// Both an identity and a mode have been recorded.
    pub fn is_successful(&self) -> bool {
        self.negotiated_psk.is_some() && self.negotiated_mode.is_some()
    }

    /// Run both selections over a ClientHello's extensions.
    ///
    /// On success the identity and mode are recorded and the identity index
    /// for the server's pre_shared_key extension is returned. On failure
    /// nothing is recorded.
    pub fn negotiate(
        &mut self,
        psk: &PreSharedKeyClientHello,
        modes: &PskKeyExchangeModes,
    ) -> Option<u16> {
        self.negotiated_psk = None;
        self.negotiated_mode = None;

        let index = self.select_best_psk(&psk.identities)?;
        let mode = self.select_best_psk_mode(&modes.ke_modes)?;
        let selected = u16::try_from(index).ok()?;

        self.negotiated_psk = Some(psk.identities[index].identity.clone());
        self.negotiated_mode = Some(mode);
        Some(selected)
    }
}
