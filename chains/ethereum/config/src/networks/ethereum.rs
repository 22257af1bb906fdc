use super::{
    BaseForks, GOERLI_GENESIS_HASH, MAINNET_GENESIS_HASH, RINKEBY_GENESIS_HASH,
    ROPSTEN_GENESIS_HASH, YOLOV1_GENESIS_HASH,
};
use crate::{
    checkpoint::{Checkpoint, CheckpointOracleConfig},
    engine::ConsensusEngine,
    fork::{Fork, ForkActivation},
    profile::NetworkProfile,
};
use ethnet_types::{Address, H160, H256};
use hex_literal::hex;

const MARTIN: Address = H160(hex!("78d1aD571A1A09D60D9BBf25894b44e4C8859595"));
const ZSOLT: Address = H160(hex!("286834935f4A8Cfb4FF4C77D5770C2775aE2b0E7"));
const GARY: Address = H160(hex!("b86e2B0Ab5A4B1373e40c51A7C712c70Ba2f9f8E"));
const GUILLAUME: Address = H160(hex!("0DF8fa387C602AE62559cC4aFa4972A7045d6707"));

#[must_use]
pub fn mainnet_trusted_checkpoint() -> Checkpoint {
    Checkpoint {
        section_index: 333,
        section_head: H256(hex!(
            "b80784cbe88077e5911b446765edc814dd67ca3f6bdd33b6ec72d66058df4a11"
        )),
        cht_root: H256(hex!("4da9cde840dd3de39916620f7a97674c5747a89a9359e6b918e134d199a8dd45")),
        bloom_root: H256(hex!(
            "dd0f4fef7fa2a5cc05d49568e38f15dab24098ffc7677a2e35d1a8d67f5458af"
        )),
    }
}

#[must_use]
pub fn mainnet_checkpoint_oracle() -> CheckpointOracleConfig {
    CheckpointOracleConfig {
        address: H160(hex!("9a9070028361F7AAbeB3f2F2Dc07F82C4a98A02a")),
        signers: vec![
            H160(hex!("1b2C260efc720BE89101890E4Db589b44E950527")),
            MARTIN,
            ZSOLT,
            GARY,
            GUILLAUME,
        ],
        threshold: 2,
    }
}

#[must_use]
pub fn mainnet() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(1_150_000),
        dao_fork: Some(1_920_000),
        eip150: Some(2_463_000),
        eip155: Some(2_675_000),
        eip158: Some(2_675_000),
        byzantium: Some(4_370_000),
        constantinople: Some(7_280_000),
        petersburg: Some(7_280_000),
        istanbul: Some(9_069_000),
    };
    NetworkProfile {
        name: "mainnet".into(),
        genesis_hash: MAINNET_GENESIS_HASH,
        registry_key: None,
        chain_id: 1,
        default_network_id: 1,
        fork_schedule: forks
            .activations()
            .chain([ForkActivation::at(Fork::MuirGlacier, 9_200_000)])
            .collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: true,
        eip150_hash: Some(H256(hex!(
            "2086799aeebeae135c246c65021c82b4e15a2c451340993aacfd2751886514f0"
        ))),
        trusted_checkpoint: Some(mainnet_trusted_checkpoint()),
        checkpoint_oracle: Some(mainnet_checkpoint_oracle()),
    }
}

/// Proof-of-work test network, also known as `testnet`.
#[must_use]
pub fn ropsten() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(0),
        dao_fork: None,
        eip150: Some(0),
        eip155: Some(10),
        eip158: Some(10),
        byzantium: Some(1_700_000),
        constantinople: Some(4_230_000),
        petersburg: Some(4_939_394),
        istanbul: Some(6_485_846),
    };
    NetworkProfile {
        name: "ropsten".into(),
        genesis_hash: ROPSTEN_GENESIS_HASH,
        registry_key: None,
        chain_id: 3,
        default_network_id: 3,
        fork_schedule: forks
            .activations()
            .chain([ForkActivation::at(Fork::MuirGlacier, 7_117_117)])
            .collect(),
        consensus_engine: ConsensusEngine::ethash(),
        dao_fork_support: true,
        eip150_hash: Some(ROPSTEN_GENESIS_HASH),
        trusted_checkpoint: Some(Checkpoint {
            section_index: 262,
            section_head: H256(hex!(
                "12b068f285789b966a983b632266484f1bc93803df6c78773538a5777f57a236"
            )),
            cht_root: H256(hex!(
                "14000a1407e866f174f3a20fe9f271acd704bcf929b5205d83b70a1bba8c82c2"
            )),
            bloom_root: H256(hex!(
                "2f4f4a34a55e35d0691c79a79e39b6f661259345080fb880da5195c11c2413be"
            )),
        }),
        checkpoint_oracle: Some(CheckpointOracleConfig {
            address: H160(hex!("EF79475013f154E6A65b54cB2742867791bf0B84")),
            signers: vec![
                H160(hex!("32162F3581E88a5f62e8A61892B42C46E2c18f7b")),
                MARTIN,
                ZSOLT,
                GARY,
                GUILLAUME,
            ],
            threshold: 2,
        }),
    }
}

#[must_use]
pub fn rinkeby() -> NetworkProfile {
    let forks = BaseForks {
        homestead: Some(1),
        dao_fork: None,
        eip150: Some(2),
        eip155: Some(3),
        eip158: Some(3),
        byzantium: Some(1_035_301),
        constantinople: Some(3_660_663),
        petersburg: Some(4_321_234),
        istanbul: Some(5_435_345),
    };
    NetworkProfile {
        name: "rinkeby".into(),
        genesis_hash: RINKEBY_GENESIS_HASH,
        registry_key: None,
        chain_id: 4,
        default_network_id: 4,
        fork_schedule: forks
            .activations()
            .chain([ForkActivation::unscheduled(Fork::MuirGlacier)])
            .collect(),
        consensus_engine: ConsensusEngine::clique(15, 30_000),
        dao_fork_support: true,
        eip150_hash: Some(H256(hex!(
            "9b095b36c15eaf13044373aef8ee0bd3a382a5abb92e402afa44b8249c3a90e9"
        ))),
        trusted_checkpoint: Some(Checkpoint {
            section_index: 220,
            section_head: H256(hex!(
                "9513befa126a83c96a6408ee8b34502699094a49b2bf1064b2de31b010a03798"
            )),
            cht_root: H256(hex!(
                "490a17d3bfbfc9bca9de087c5ee9c9f69dc2359cad9c1fe68cab639fdbcfccee"
            )),
            bloom_root: H256(hex!(
                "56bf5fda940ca4ca8346e42ef86f9092c82268c304c03c4093b21c1aa07190fc"
            )),
        }),
        checkpoint_oracle: Some(CheckpointOracleConfig {
            address: H160(hex!("ebe8eFA441B9302A0d7eaECc277c09d20D684540")),
            signers: vec![
                H160(hex!("d9c9cd5f6779558b6e0ed4e6acf6b1947e7fa1f3")),
                MARTIN,
                ZSOLT,
                GARY,
            ],
            threshold: 2,
        }),
    }
}

#[must_use]
pub fn goerli() -> NetworkProfile {
    let forks = BaseForks { istanbul: Some(1_561_651), ..BaseForks::from_genesis() };
    NetworkProfile {
        name: "goerli".into(),
        genesis_hash: GOERLI_GENESIS_HASH,
        registry_key: None,
        chain_id: 5,
        default_network_id: 5,
        fork_schedule: forks
            .activations()
            .chain([ForkActivation::unscheduled(Fork::MuirGlacier)])
            .collect(),
        consensus_engine: ConsensusEngine::clique(15, 30_000),
        dao_fork_support: true,
        eip150_hash: None,
        trusted_checkpoint: Some(Checkpoint {
            section_index: 105,
            section_head: H256(hex!(
                "695f5b67d1985fb13d177c56d20ded0622d7f63a1623959fb4b5c5e38dc6bbee"
            )),
            cht_root: H256(hex!(
                "4c281ef1ca63e6f9bb4ce8e46e80e478787c91da95c3727550ee418886dd6415"
            )),
            bloom_root: H256(hex!(
                "a02463cc6ee54f12990e9adb019e34696ad1efe2694cf07187d7ce0802cd653d"
            )),
        }),
        checkpoint_oracle: Some(CheckpointOracleConfig {
            address: H160(hex!("18CA0E045F0D772a851BC7e48357Bcaab0a0795D")),
            signers: vec![
                H160(hex!("4769bcaD07e3b938B7f43EB7D278Bc7Cb9efFb38")),
                MARTIN,
                ZSOLT,
                GARY,
                GUILLAUME,
            ],
            threshold: 2,
        }),
    }
}

/// Short lived clique network for testing upcoming EIPs. Network id and chain id are the same
/// large number.
#[must_use]
pub fn yolov1() -> NetworkProfile {
    let forks = BaseForks { istanbul: Some(0), ..BaseForks::from_genesis() };
    NetworkProfile {
        name: "yolov1".into(),
        genesis_hash: YOLOV1_GENESIS_HASH,
        registry_key: None,
        chain_id: 133_519_467_574_833,
        default_network_id: 133_519_467_574_833,
        fork_schedule: forks
            .activations()
            .chain([
                ForkActivation::unscheduled(Fork::MuirGlacier),
                ForkActivation::at(Fork::YoloV1, 0),
            ])
            .collect(),
        consensus_engine: ConsensusEngine::clique(15, 30_000),
        dao_fork_support: true,
        eip150_hash: None,
        trusted_checkpoint: None,
        checkpoint_oracle: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracles_share_core_signers() {
        for profile in [mainnet(), ropsten(), rinkeby(), goerli()] {
            let oracle = profile.checkpoint_oracle.unwrap();
            assert_eq!(oracle.threshold, 2);
            assert!(oracle.is_signer(&MARTIN), "{}", profile.name);
            assert!(oracle.is_signer(&GARY), "{}", profile.name);
        }
        assert!(!rinkeby().checkpoint_oracle.unwrap().is_signer(&GUILLAUME));
    }

    #[test]
    fn ropsten_pins_genesis_as_eip150_block() {
        let ropsten = ropsten();
        assert_eq!(ropsten.eip150_hash, Some(ropsten.genesis_hash));
        assert_eq!(ropsten.fork_schedule.activation(Fork::Eip150), Some(0));
    }

    #[test]
    fn yolov1_enables_everything_at_genesis() {
        let rules = yolov1().current_rules(0);
        assert!(rules.is_istanbul());
        assert!(rules.is_active(Fork::YoloV1));
        assert!(!rules.is_active(Fork::MuirGlacier));
    }
}
