//! Network registry and chain identity for Ethereum family nodes.
//!
//! The [`Registry`] maps genesis hashes and names to [`NetworkProfile`]s. A profile answers
//! which protocol rules are in force at any block height, which identity a node advertises to
//! its peers, and which signers may publish light client checkpoints.

mod checkpoint;
mod engine;
mod error;
#[cfg(feature = "serde")]
mod file;
mod fork;
mod identity;
pub mod networks;
mod profile;
mod registry;

pub use checkpoint::{
    verify, Checkpoint, CheckpointOracleConfig, CheckpointVerdict, OracleDefect, Rejection,
};
pub use engine::{CliqueConfig, ConsensusEngine, EthashConfig};
#[cfg(feature = "serde")]
pub use error::LoadError;
pub use error::{RegistryError, ResolveError};
#[cfg(feature = "serde")]
pub use file::RegistryFile;
pub use fork::{
    cmp_activation, Fork, ForkActivation, ForkSchedule, ForkSet, GasTable, RuleSet,
    ScheduleDefect, SignatureScheme,
};
pub use identity::ChainIdentity;
pub use profile::{active_forks, current_rules, NetworkProfile};
pub use registry::{Registry, RegistryBuilder, SharedRegistry};

pub use ethnet_types::{crypto::Crypto, Address, Signature, H256};

#[cfg(feature = "default-crypto")]
pub use ethnet_types::crypto::DefaultCrypto;
