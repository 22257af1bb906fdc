use super::{BaseForks, ETHERSOCIAL_GENESIS_HASH, SOCIAL_GENESIS_HASH};
use crate::{engine::ConsensusEngine, profile::NetworkProfile};

#[must_use]
pub fn social() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(0),
        eip150: Some(0),
        eip155: Some(0),
        eip158: Some(0),
        ..BaseForks::default()
    };
    NetworkProfile {
        name: "social".into(),
        genesis_hash: SOCIAL_GENESIS_HASH,
        registry_key: None,
        chain_id: 28,
        default_network_id: 28,
        fork_schedule: forks.activations().collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: false,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}

/// Network id 1 as on mainnet, told apart by its chain id.
#[must_use]
pub fn ethersocial() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(0),
        eip150: Some(0),
        eip155: Some(0),
        eip158: Some(0),
        byzantium: Some(600_000),
        ..BaseForks::default()
    };
    NetworkProfile {
        name: "ethersocial".into(),
        genesis_hash: ETHERSOCIAL_GENESIS_HASH,
        registry_key: None,
        chain_id: 31102,
        default_network_id: 1,
        fork_schedule: forks.activations().collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: false,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}
