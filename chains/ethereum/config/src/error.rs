use crate::fork::Fork;
use ethnet_types::{Address, H256};

/// Configuration defect found while building a [`crate::Registry`]. Every variant names the
/// offending network, by position when it has no name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry has no networks")]
    EmptyRegistry,
    #[error("network #{index} has no name")]
    UnnamedNetwork { index: usize },
    #[error("network {network}: genesis hash {genesis:?} already registered by {existing}")]
    DuplicateGenesis { network: String, existing: String, genesis: H256 },
    #[error("network {network}: name already registered")]
    DuplicateName { network: String },
    #[error("network {network}: fork {fork} is listed twice")]
    DuplicateFork { network: String, fork: Fork },
    #[error("network {network}: fork {fork} at {block} activates before {previous} at {previous_block}")]
    NonMonotonicSchedule {
        network: String,
        previous: Fork,
        previous_block: u64,
        fork: Fork,
        block: u64,
    },
    #[error("network {network}: checkpoint oracle threshold {threshold} outside 1..={signers}")]
    InvalidThreshold { network: String, threshold: usize, signers: usize },
    #[error("network {network}: checkpoint oracle signer {signer:?} listed twice")]
    DuplicateSigner { network: String, signer: Address },
    #[error("default network {network} is not registered")]
    UnknownDefault { network: String },
    #[error("alias {alias} shadows the registered network {network}")]
    AliasConflict { alias: String, network: String },
    #[error("alias {alias} points at unknown network {network}")]
    UnknownAliasTarget { alias: String, network: String },
}

/// Failure to turn a network selection into a chain identity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

/// Failure to load a registry from a JSON document.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed registry document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] RegistryError),
}
