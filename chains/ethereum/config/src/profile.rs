use crate::{
    checkpoint::{self, Checkpoint, CheckpointOracleConfig, CheckpointVerdict},
    engine::ConsensusEngine,
    fork::{Fork, ForkSchedule, RuleSet},
};
use ethnet_types::{crypto::Crypto, Signature, H256};

/// Everything a node needs to know about one network: how it is identified and which
/// protocol rules it runs at every height.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NetworkProfile {
    pub name: String,
    /// Hash of block 0, advertised during the peer handshake.
    pub genesis_hash: H256,
    /// Key the registry indexes this network under when its genesis block is shared with
    /// another network, the genesis hash otherwise.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub registry_key: Option<H256>,
    /// Replay protection identifier, never changed by runtime flags.
    pub chain_id: u64,
    /// P2P network identifier used unless overridden.
    pub default_network_id: u64,
    pub fork_schedule: ForkSchedule,
    pub consensus_engine: ConsensusEngine,
    /// Whether the node supports or opposes the DAO hard fork, independently of the
    /// `DaoFork` marker being scheduled.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dao_fork_support: bool,
    /// Hash of the EIP-150 fork block, needed by header only clients.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub eip150_hash: Option<H256>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub trusted_checkpoint: Option<Checkpoint>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub checkpoint_oracle: Option<CheckpointOracleConfig>,
}

impl NetworkProfile {
    /// Key under which [`crate::Registry::lookup_by_genesis`] finds this network.
    #[must_use]
    pub fn lookup_key(&self) -> H256 {
        self.registry_key.unwrap_or(self.genesis_hash)
    }

    #[must_use]
    pub fn dao_fork_block(&self) -> Option<u64> {
        self.fork_schedule.activation(Fork::DaoFork)
    }

    /// Every fork marker scheduled at or below `block`, in schedule order.
    #[must_use]
    pub fn active_forks(&self, block: u64) -> Vec<Fork> {
        self.fork_schedule.active_at(block)
    }

    #[must_use]
    pub fn current_rules(&self, block: u64) -> RuleSet {
        RuleSet::new(self.chain_id, &self.fork_schedule, self.dao_fork_support, block)
    }

    #[must_use]
    pub fn verify_checkpoint<C: Crypto>(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[(H256, Signature)],
    ) -> CheckpointVerdict {
        checkpoint::verify::<C>(self, checkpoint, signatures)
    }
}

/// Every fork active on `profile` at `block`, in schedule order.
#[must_use]
pub fn active_forks(profile: &NetworkProfile, block: u64) -> Vec<Fork> {
    profile.active_forks(block)
}

/// Rule set in force on `profile` at `block`.
#[must_use]
pub fn current_rules(profile: &NetworkProfile, block: u64) -> RuleSet {
    profile.current_rules(block)
}
