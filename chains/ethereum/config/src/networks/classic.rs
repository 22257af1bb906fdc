use super::{
    BaseForks, CLASSIC_REGISTRY_KEY, KOTTI_GENESIS_HASH, MAINNET_GENESIS_HASH, MORDOR_GENESIS_HASH,
};
use crate::{engine::ConsensusEngine, profile::NetworkProfile};

/// Ethereum Classic: follows mainnet history up to the DAO block but opposes the DAO fork.
#[must_use]
pub fn classic() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(1_150_000),
        dao_fork: Some(1_920_000),
        eip150: Some(2_500_000),
        eip155: Some(3_000_000),
        eip158: Some(8_772_000),
        byzantium: Some(8_772_000),
        constantinople: Some(9_573_000),
        petersburg: Some(9_573_000),
        istanbul: Some(10_500_839),
    };
    NetworkProfile {
        name: "classic".into(),
        genesis_hash: MAINNET_GENESIS_HASH,
        registry_key: Some(CLASSIC_REGISTRY_KEY),
        chain_id: 61,
        default_network_id: 1,
        fork_schedule: forks.activations().collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: false,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}

/// Proof-of-work test network of the classic family.
#[must_use]
pub fn mordor() -> NetworkProfile {
    let forks = BaseForks {
        constantinople: Some(301_243),
        petersburg: Some(301_243),
        istanbul: Some(999_983),
        ..BaseForks::from_genesis()
    };
    NetworkProfile {
        name: "mordor".into(),
        genesis_hash: MORDOR_GENESIS_HASH,
        registry_key: None,
        chain_id: 63,
        default_network_id: 7,
        fork_schedule: forks.activations().collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: false,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}

/// Clique test network of the classic family.
#[must_use]
pub fn kotti() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(0),
        dao_fork: None,
        eip150: Some(0),
        eip155: Some(0),
        eip158: Some(716_617),
        byzantium: Some(716_617),
        constantinople: Some(1_705_549),
        petersburg: Some(1_705_549),
        istanbul: Some(2_200_013),
    };
    NetworkProfile {
        name: "kotti".into(),
        genesis_hash: KOTTI_GENESIS_HASH,
        registry_key: None,
        chain_id: 6,
        default_network_id: 6,
        fork_schedule: forks.activations().collect(),
        consensus_engine: ConsensusEngine::clique(15, 30_000),
        dao_fork_support: false,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}
