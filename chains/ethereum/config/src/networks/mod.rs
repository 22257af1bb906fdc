//! Compiled-in network table.
//!
//! Profiles are plain values built on demand; nothing here is mutable global state.

mod classic;
mod community;
mod ethereum;

use crate::fork::{Fork, ForkActivation};
use ethnet_types::H256;
use hex_literal::hex;

pub use classic::{classic, kotti, mordor};
pub use community::{ethersocial, social};
pub use ethereum::{
    goerli, mainnet, mainnet_checkpoint_oracle, mainnet_trusted_checkpoint, rinkeby, ropsten,
    yolov1,
};

pub const DEFAULT_NETWORK: &str = "mainnet";

/// `(alias, network)` pairs registered by [`crate::Registry::builtin`].
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[("testnet", "ropsten")];

pub const MAINNET_GENESIS_HASH: H256 =
    H256(hex!("d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"));
pub const ROPSTEN_GENESIS_HASH: H256 =
    H256(hex!("41941023680923e0fe4d74a34bdac8141f2540e3ae90623718e47d66d1ca4a2d"));
pub const RINKEBY_GENESIS_HASH: H256 =
    H256(hex!("6341fd3daf94b748c72ced5a5b26028f2474f5f00d824504e4fa37a75767e177"));
pub const GOERLI_GENESIS_HASH: H256 =
    H256(hex!("bf7e331f7f7c1dd2e05159666b3bf8bc7a8a3a9eb1d518969eab529dd9b88c1a"));
pub const YOLOV1_GENESIS_HASH: H256 =
    H256(hex!("c3fd235071f24f93865b0850bd2a2119b30f7224d18a0e34c7bbf549ad7e3d36"));
/// Classic shares its genesis block with mainnet and is registered under
/// keccak256(mainnet genesis hash || 61 as 8 bytes big endian) instead.
pub const CLASSIC_REGISTRY_KEY: H256 =
    H256(hex!("b33cc88217eabe8f1e264c3ba347c9512c9bd3760c8dbb5085fb127892391491"));
pub const MORDOR_GENESIS_HASH: H256 =
    H256(hex!("a68ebde7932eccb177d38d55dcc6461a019dd795a681e59b5a3e4f3a7259a3f1"));
pub const KOTTI_GENESIS_HASH: H256 =
    H256(hex!("14c2283285a88fe5fce9bf5c573ab03d6616695d717b12a127188bcacfc743c4"));
pub const SOCIAL_GENESIS_HASH: H256 =
    H256(hex!("ba8314d5c2ebddaf58eb882b364b27cbfa4d3402dacd32b60986754ac25cfe8d"));
pub const ETHERSOCIAL_GENESIS_HASH: H256 =
    H256(hex!("310dd3c4ae84dd89f1b46cfdd5e26c8f904dfddddc73f323b468127272e20e9f"));

/// Every compiled-in profile, mainnet first.
#[must_use]
pub fn builtin_profiles() -> Vec<crate::NetworkProfile> {
    vec![
        mainnet(),
        classic(),
        ropsten(),
        rinkeby(),
        goerli(),
        kotti(),
        mordor(),
        social(),
        ethersocial(),
        yolov1(),
    ]
}

/// Heights of the forks shared by every network, `None` for forks the network never
/// scheduled. Later forks are appended by the caller.
#[derive(Clone, Copy, Default)]
struct BaseForks {
    homestead: Option<u64>,
    dao_fork: Option<u64>,
    eip150: Option<u64>,
    eip155: Option<u64>,
    eip158: Option<u64>,
    byzantium: Option<u64>,
    constantinople: Option<u64>,
    petersburg: Option<u64>,
    istanbul: Option<u64>,
}

impl BaseForks {
    /// Every fork up to and including Petersburg active from genesis.
    const fn from_genesis() -> Self {
        Self {
            homestead: Some(0),
            dao_fork: None,
            eip150: Some(0),
            eip155: Some(0),
            eip158: Some(0),
            byzantium: Some(0),
            constantinople: Some(0),
            petersburg: Some(0),
            istanbul: None,
        }
    }

    fn activations(self) -> impl Iterator<Item = ForkActivation> {
        [
            (Fork::Homestead, self.homestead),
            (Fork::DaoFork, self.dao_fork),
            (Fork::Eip150, self.eip150),
            (Fork::Eip155, self.eip155),
            (Fork::Eip158, self.eip158),
            (Fork::Byzantium, self.byzantium),
            (Fork::Constantinople, self.constantinople),
            (Fork::Petersburg, self.petersburg),
            (Fork::Istanbul, self.istanbul),
        ]
        .into_iter()
        .map(|(fork, block)| ForkActivation { fork, block })
    }
}
