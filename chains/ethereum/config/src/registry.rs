use crate::{
    checkpoint::{Checkpoint, CheckpointOracleConfig, OracleDefect},
    error::RegistryError,
    fork::ScheduleDefect,
    networks,
    profile::NetworkProfile,
};
use arc_swap::ArcSwap;
use ethnet_types::H256;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

/// Immutable table of known networks, indexed by registry key and by name.
///
/// A `Registry` only exists once every profile passed validation, so lookups never have to
/// deal with a partially valid configuration.
#[derive(Clone, Debug)]
pub struct Registry {
    profiles: Vec<NetworkProfile>,
    by_genesis: HashMap<H256, usize>,
    by_name: HashMap<String, usize>,
    aliases: BTreeMap<String, String>,
    default: usize,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Compiled-in network table, with mainnet as the default network.
    ///
    /// # Errors
    /// Fails only if the compiled-in tables are inconsistent.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut builder = Self::builder().default_network(networks::DEFAULT_NETWORK);
        for profile in networks::builtin_profiles() {
            builder = builder.profile(profile);
        }
        for (alias, network) in networks::BUILTIN_ALIASES {
            builder = builder.alias(*alias, *network);
        }
        builder.build()
    }

    /// Network registered under `genesis_hash`. A network sharing its genesis block with
    /// another one is only found under its own [`NetworkProfile::registry_key`].
    #[must_use]
    pub fn lookup_by_genesis(&self, genesis_hash: &H256) -> Option<&NetworkProfile> {
        self.by_genesis.get(genesis_hash).map(|index| &self.profiles[*index])
    }

    /// Case-insensitive lookup by network name or alias.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<&NetworkProfile> {
        let name = name.to_ascii_lowercase();
        let name = self.aliases.get(&name).unwrap_or(&name);
        self.by_name.get(name).map(|index| &self.profiles[*index])
    }

    #[must_use]
    pub fn default_profile(&self) -> &NetworkProfile {
        &self.profiles[self.default]
    }

    /// Profiles in registration order.
    #[must_use]
    pub fn profiles(&self) -> &[NetworkProfile] {
        &self.profiles
    }

    /// `(alias, network)` pairs, ordered by alias.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.aliases.iter().map(|(alias, network)| (alias.as_str(), network.as_str()))
    }

    #[must_use]
    pub fn trusted_checkpoint(&self, genesis_hash: &H256) -> Option<&Checkpoint> {
        self.lookup_by_genesis(genesis_hash)?.trusted_checkpoint.as_ref()
    }

    #[must_use]
    pub fn checkpoint_oracle(&self, genesis_hash: &H256) -> Option<&CheckpointOracleConfig> {
        self.lookup_by_genesis(genesis_hash)?.checkpoint_oracle.as_ref()
    }
}

/// Collects profiles and aliases, then validates all of them at once in [`Self::build`].
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    profiles: Vec<NetworkProfile>,
    aliases: Vec<(String, String)>,
    default: Option<String>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn profile(mut self, profile: NetworkProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>, network: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), network.into()));
        self
    }

    /// Network used when no selection is made, the first registered profile if unset.
    #[must_use]
    pub fn default_network(mut self, network: impl Into<String>) -> Self {
        self.default = Some(network.into());
        self
    }

    /// Validates every profile and builds the registry.
    ///
    /// # Errors
    /// Returns the first configuration defect found, no registry is produced in that case.
    pub fn build(self) -> Result<Registry, RegistryError> {
        self.try_build().map_err(|error| {
            tracing::error!(%error, "invalid network registry");
            error
        })
    }

    fn try_build(self) -> Result<Registry, RegistryError> {
        if self.profiles.is_empty() {
            return Err(RegistryError::EmptyRegistry);
        }

        let mut by_genesis = HashMap::with_capacity(self.profiles.len());
        let mut by_name = HashMap::with_capacity(self.profiles.len());
        let mut profiles = Vec::with_capacity(self.profiles.len());
        for (index, mut profile) in self.profiles.into_iter().enumerate() {
            profile.name = profile.name.trim().to_ascii_lowercase();
            if profile.name.is_empty() {
                return Err(RegistryError::UnnamedNetwork { index });
            }
            check_profile(&profile)?;

            if by_name.insert(profile.name.clone(), index).is_some() {
                return Err(RegistryError::DuplicateName { network: profile.name });
            }
            let key = profile.lookup_key();
            if let Some(existing) = by_genesis.insert(key, index) {
                let existing: &NetworkProfile = &profiles[existing];
                return Err(RegistryError::DuplicateGenesis {
                    network: profile.name,
                    existing: existing.name.clone(),
                    genesis: key,
                });
            }
            profiles.push(profile);
        }

        let mut aliases = BTreeMap::new();
        for (alias, network) in self.aliases {
            let alias = alias.to_ascii_lowercase();
            let network = network.to_ascii_lowercase();
            if by_name.contains_key(&alias) || aliases.contains_key(&alias) {
                return Err(RegistryError::AliasConflict { alias, network });
            }
            if !by_name.contains_key(&network) {
                return Err(RegistryError::UnknownAliasTarget { alias, network });
            }
            aliases.insert(alias, network);
        }

        let default = match self.default {
            Some(name) => {
                let name = name.to_ascii_lowercase();
                match by_name.get(&name) {
                    Some(index) => *index,
                    None => return Err(RegistryError::UnknownDefault { network: name }),
                }
            },
            None => 0,
        };

        tracing::debug!(
            networks = profiles.len(),
            aliases = aliases.len(),
            default = %profiles[default].name,
            "network registry built"
        );
        Ok(Registry { profiles, by_genesis, by_name, aliases, default })
    }
}

fn check_profile(profile: &NetworkProfile) -> Result<(), RegistryError> {
    let network = || profile.name.clone();
    profile.fork_schedule.check_order().map_err(|defect| match defect {
        ScheduleDefect::Duplicate(fork) => {
            RegistryError::DuplicateFork { network: network(), fork }
        },
        ScheduleDefect::Inversion { previous, previous_block, fork, block } => {
            RegistryError::NonMonotonicSchedule {
                network: network(),
                previous,
                previous_block,
                fork,
                block,
            }
        },
    })?;
    if let Some(oracle) = &profile.checkpoint_oracle {
        oracle.check().map_err(|defect| match defect {
            OracleDefect::InvalidThreshold { threshold, signers } => {
                RegistryError::InvalidThreshold { network: network(), threshold, signers }
            },
            OracleDefect::DuplicateSigner(signer) => {
                RegistryError::DuplicateSigner { network: network(), signer }
            },
        })?;
    }
    Ok(())
}

/// Registry handle shared between readers that can be swapped for a new snapshot at runtime.
///
/// Readers always observe a complete registry: a replacement is fully built and validated
/// before it is published.
#[derive(Debug)]
pub struct SharedRegistry {
    registry: ArcSwap<Registry>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry: ArcSwap::from_pointee(registry) }
    }

    /// Current snapshot, unaffected by later replacements.
    #[must_use]
    pub fn load(&self) -> Arc<Registry> {
        self.registry.load_full()
    }

    /// Publishes `registry` and returns the snapshot it replaced.
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        tracing::info!(networks = registry.profiles.len(), "replacing network registry");
        self.registry.swap(Arc::new(registry))
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
