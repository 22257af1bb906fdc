use crate::{error::ResolveError, profile::NetworkProfile, registry::Registry};
use ethnet_types::H256;

/// Identity a node advertises during the peer handshake and signs transactions with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChainIdentity {
    /// P2P swarm identifier.
    pub network_id: u64,
    /// Replay protection identifier, always the profile's own.
    pub chain_id: u64,
    pub genesis_hash: H256,
}

impl ChainIdentity {
    /// Identity of `profile`, with `network_id_override` replacing only the network id.
    #[must_use]
    pub fn of(profile: &NetworkProfile, network_id_override: Option<u64>) -> Self {
        Self {
            network_id: network_id_override.unwrap_or(profile.default_network_id),
            chain_id: profile.chain_id,
            genesis_hash: profile.genesis_hash,
        }
    }

    /// Whether a peer advertising `network_id` and `genesis_hash` belongs to the same swarm.
    #[must_use]
    pub fn admits(&self, network_id: u64, genesis_hash: &H256) -> bool {
        self.network_id == network_id && self.genesis_hash == *genesis_hash
    }
}

impl Registry {
    /// Profile named by `selection`, the default profile when nothing is selected.
    ///
    /// # Errors
    /// Fails with [`ResolveError::UnknownNetwork`] when the name is not registered.
    pub fn select(&self, selection: Option<&str>) -> Result<&NetworkProfile, ResolveError> {
        match selection.map(str::trim).filter(|name| !name.is_empty()) {
            None => Ok(self.default_profile()),
            Some(name) => {
                self.lookup_by_name(name).ok_or_else(|| ResolveError::UnknownNetwork(name.into()))
            },
        }
    }

    /// Resolves the `(network id, chain id, genesis hash)` triple for a network selection.
    ///
    /// An explicit network id override only changes the P2P network id, never the chain id
    /// or the rules in force.
    ///
    /// # Errors
    /// Fails with [`ResolveError::UnknownNetwork`] when the name is not registered.
    pub fn resolve(
        &self,
        selection: Option<&str>,
        network_id_override: Option<u64>,
    ) -> Result<ChainIdentity, ResolveError> {
        let profile = self.select(selection)?;
        Ok(ChainIdentity::of(profile, network_id_override))
    }
}
