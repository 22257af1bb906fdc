//! Property tests over the compiled-in registry and the checkpoint quorum.

use ethnet_config::{
    networks, Checkpoint, CheckpointOracleConfig, CheckpointVerdict, DefaultCrypto, Fork,
    Registry, Rejection, H256,
};
use ethnet_types::{
    crypto::{Keypair, Signer},
    Address, Signature,
};
use proptest::prelude::*;

fn registry() -> Registry {
    Registry::builtin().unwrap()
}

fn profile_index() -> impl Strategy<Value = usize> {
    0..networks::builtin_profiles().len()
}

/// Heights clustered around the real fork blocks as well as anywhere in `u64`.
fn height() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..12_000_000, any::<u64>()]
}

fn signers() -> Vec<Keypair> {
    (1..=5u8).map(|i| Keypair::from_bytes([i; 32]).unwrap()).collect()
}

fn oracle(signers: &[Keypair], threshold: usize) -> CheckpointOracleConfig {
    CheckpointOracleConfig {
        address: Address::repeat_byte(0x42),
        signers: signers.iter().map(Keypair::address).collect(),
        threshold,
    }
}

fn checkpoint(section_index: u64) -> Checkpoint {
    Checkpoint {
        section_index,
        section_head: H256::repeat_byte(1),
        cht_root: H256::repeat_byte(2),
        bloom_root: H256::repeat_byte(3),
    }
}

fn sign(keypair: &Keypair, message: H256) -> (H256, Signature) {
    (message, keypair.sign_prehash(message, None).unwrap())
}

proptest! {
    #[test]
    fn genesis_lookup_round_trips(index in profile_index()) {
        let registry = registry();
        let profile = &registry.profiles()[index];
        prop_assert_eq!(registry.lookup_by_genesis(&profile.lookup_key()), Some(profile));
        let others = registry
            .profiles()
            .iter()
            .filter(|other| other.lookup_key() == profile.lookup_key())
            .count();
        prop_assert_eq!(others, 1);
    }

    #[test]
    fn active_forks_never_retract(index in profile_index(), a in height(), b in height()) {
        let registry = registry();
        let profile = &registry.profiles()[index];
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let before = profile.active_forks(low);
        let after = profile.active_forks(high);
        for fork in &before {
            prop_assert!(after.contains(fork), "{} lost {} at {}", profile.name, fork, high);
        }
        let rules = (profile.current_rules(low), profile.current_rules(high));
        prop_assert!(rules.0.forks.is_subset(rules.1.forks));
    }

    #[test]
    fn unscheduled_forks_stay_inactive(index in profile_index(), block in height()) {
        let registry = registry();
        let profile = &registry.profiles()[index];
        let active = profile.active_forks(block);
        for entry in profile.fork_schedule.iter().filter(|entry| entry.block.is_none()) {
            prop_assert!(!active.contains(&entry.fork));
        }
        prop_assert!(!active.contains(&Fork::Ewasm));
    }

    #[test]
    fn override_only_changes_network_id(index in profile_index(), network_id in any::<u64>()) {
        let registry = registry();
        let profile = &registry.profiles()[index];

        let overridden = registry.resolve(Some(profile.name.as_str()), Some(network_id)).unwrap();
        prop_assert_eq!(overridden.network_id, network_id);
        prop_assert_eq!(overridden.chain_id, profile.chain_id);
        prop_assert_eq!(overridden.genesis_hash, profile.genesis_hash);

        let plain = registry.resolve(Some(profile.name.as_str()), None).unwrap();
        prop_assert_eq!(plain.network_id, profile.default_network_id);
        prop_assert_eq!(plain.chain_id, profile.chain_id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn quorum_accepts_iff_threshold_is_met(
        threshold in 1usize..=5,
        chosen in proptest::sample::subsequence((0..5).collect::<Vec<usize>>(), 0..=5),
        repeat in any::<bool>(),
    ) {
        let keys = signers();
        let oracle = oracle(&keys, threshold);
        let message = oracle.signing_hash::<DefaultCrypto>(&checkpoint(7));

        let mut signatures: Vec<_> = chosen.iter().map(|i| sign(&keys[*i], message)).collect();
        if repeat {
            signatures.extend(chosen.iter().map(|i| sign(&keys[*i], message)));
        }
        let outsider = Keypair::from_bytes([0x77; 32]).unwrap();
        signatures.push(sign(&outsider, message));

        let verdict = oracle.verify::<DefaultCrypto>(&checkpoint(7), &signatures);
        if chosen.len() >= threshold {
            prop_assert!(verdict.is_accepted());
        } else {
            prop_assert_eq!(
                verdict,
                CheckpointVerdict::Reject(Rejection::InsufficientQuorum {
                    have: chosen.len(),
                    need: threshold,
                })
            );
        }
    }

    #[test]
    fn dropping_a_vote_from_a_minimal_quorum_rejects(
        threshold in 1usize..=5,
        dropped in 0usize..5,
    ) {
        let keys = signers();
        let oracle = oracle(&keys, threshold);
        let message = oracle.signing_hash::<DefaultCrypto>(&checkpoint(9));
        let minimal: Vec<_> = keys[..threshold].iter().map(|key| sign(key, message)).collect();
        prop_assert!(oracle.verify::<DefaultCrypto>(&checkpoint(9), &minimal).is_accepted());

        let mut reduced = minimal.clone();
        reduced.remove(dropped % threshold);
        prop_assert_eq!(
            oracle.verify::<DefaultCrypto>(&checkpoint(9), &reduced),
            CheckpointVerdict::Reject(Rejection::InsufficientQuorum {
                have: threshold - 1,
                need: threshold,
            })
        );
    }
}
