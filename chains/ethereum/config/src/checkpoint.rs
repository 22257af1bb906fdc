//! Light client trust anchors and the M-of-N signer quorum allowed to publish new ones.

use crate::profile::NetworkProfile;
use ethnet_types::{crypto::Crypto, Address, Signature, H256};
use std::collections::BTreeSet;

/// Light client sync anchor: headers up to `section_index` are final and need not be
/// re-verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Checkpoint {
    pub section_index: u64,
    pub section_head: H256,
    pub cht_root: H256,
    pub bloom_root: H256,
}

impl Checkpoint {
    /// keccak256(section_index (8 bytes big endian) || section_head || cht_root || bloom_root)
    #[must_use]
    pub fn hash<C: Crypto>(&self) -> H256 {
        let mut buf = [0u8; 8 + 32 * 3];
        buf[0..8].copy_from_slice(&self.section_index.to_be_bytes());
        buf[8..40].copy_from_slice(self.section_head.as_bytes());
        buf[40..72].copy_from_slice(self.cht_root.as_bytes());
        buf[72..104].copy_from_slice(self.bloom_root.as_bytes());
        C::keccak256(buf)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section_head.is_zero() || self.cht_root.is_zero() || self.bloom_root.is_zero()
    }
}

/// Signer set of the on-chain checkpoint oracle of a network.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CheckpointOracleConfig {
    /// Address of the oracle contract.
    pub address: Address,
    pub signers: Vec<Address>,
    /// Number of distinct signers required to accept a checkpoint.
    pub threshold: usize,
}

/// Structural defects of an oracle configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OracleDefect {
    InvalidThreshold { threshold: usize, signers: usize },
    DuplicateSigner(Address),
}

impl CheckpointOracleConfig {
    /// Checks `1 <= threshold <= |signers|` and that signers are unique.
    ///
    /// # Errors
    /// Returns the first defect found.
    pub fn check(&self) -> Result<(), OracleDefect> {
        let mut unique = BTreeSet::new();
        for signer in &self.signers {
            if !unique.insert(*signer) {
                return Err(OracleDefect::DuplicateSigner(*signer));
            }
        }
        if self.threshold == 0 || self.threshold > self.signers.len() {
            return Err(OracleDefect::InvalidThreshold {
                threshold: self.threshold,
                signers: self.signers.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_signer(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    /// Digest an oracle signer signs to vote for `checkpoint`:
    /// keccak256(0x19 || 0x00 || oracle address || section_index (8 bytes BE) || checkpoint hash)
    #[must_use]
    pub fn signing_hash<C: Crypto>(&self, checkpoint: &Checkpoint) -> H256 {
        let mut buf = [0u8; 2 + 20 + 8 + 32];
        buf[0] = 0x19;
        buf[1] = 0x00;
        buf[2..22].copy_from_slice(self.address.as_bytes());
        buf[22..30].copy_from_slice(&checkpoint.section_index.to_be_bytes());
        buf[30..62].copy_from_slice(checkpoint.hash::<C>().as_bytes());
        C::keccak256(buf)
    }

    /// Counts the distinct authorized signers of `checkpoint` among `signatures`.
    ///
    /// Entries signed over another message, failing recovery, or recovering to an
    /// address outside the signer set are skipped. Repeated signers count once.
    #[must_use]
    pub fn verify<C: Crypto>(
        &self,
        checkpoint: &Checkpoint,
        signatures: &[(H256, Signature)],
    ) -> CheckpointVerdict {
        let expected = self.signing_hash::<C>(checkpoint);
        let mut approvals = BTreeSet::new();
        for (index, (message, signature)) in signatures.iter().enumerate() {
            if *message != expected {
                tracing::debug!(index, %message, "signature is not over the proposed checkpoint");
                continue;
            }
            let signer = match C::secp256k1_ecdsa_recover(signature, *message) {
                Ok(signer) => signer,
                Err(error) => {
                    tracing::debug!(index, ?error, "invalid checkpoint signature");
                    continue;
                },
            };
            if !self.is_signer(&signer) {
                tracing::debug!(index, ?signer, "checkpoint signed by unknown signer");
                continue;
            }
            approvals.insert(signer);
        }

        if approvals.len() >= self.threshold {
            tracing::info!(
                section = checkpoint.section_index,
                approvals = approvals.len(),
                threshold = self.threshold,
                "checkpoint accepted"
            );
            CheckpointVerdict::Accept { signers: approvals.into_iter().collect() }
        } else {
            tracing::warn!(
                section = checkpoint.section_index,
                approvals = approvals.len(),
                threshold = self.threshold,
                "checkpoint rejected, not enough signatures"
            );
            CheckpointVerdict::Reject(Rejection::InsufficientQuorum {
                have: approvals.len(),
                need: self.threshold,
            })
        }
    }
}

/// Reason a proposed checkpoint was not accepted. Both are expected outcomes, the caller
/// falls back to a full sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("network has no checkpoint oracle")]
    NoOracleConfigured,
    #[error("insufficient signatures: have {have}, need {need}")]
    InsufficientQuorum { have: usize, need: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckpointVerdict {
    /// Accepted, with the distinct authorized signers in ascending order.
    Accept { signers: Vec<Address> },
    Reject(Rejection),
}

impl CheckpointVerdict {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }
}

/// Verifies `checkpoint` against the oracle quorum configured for `profile`.
#[must_use]
pub fn verify<C: Crypto>(
    profile: &NetworkProfile,
    checkpoint: &Checkpoint,
    signatures: &[(H256, Signature)],
) -> CheckpointVerdict {
    match &profile.checkpoint_oracle {
        Some(oracle) => oracle.verify::<C>(checkpoint, signatures),
        None => {
            tracing::warn!(network = %profile.name, "no checkpoint oracle configured");
            CheckpointVerdict::Reject(Rejection::NoOracleConfigured)
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::networks;
    use ethnet_types::{crypto::DefaultCrypto, RecoveryId, U256};
    use hex_literal::hex;

    /// Fake signature scheme: `r` carries the signer address, `s` the message hash, and
    /// `v == 1` marks a signature that fails to verify.
    pub struct FakeCrypto;

    impl Crypto for FakeCrypto {
        type Error = &'static str;

        fn keccak256_to(data: impl AsRef<[u8]>, output: &mut [u8; 32]) {
            DefaultCrypto::keccak256_to(data, output);
        }

        fn secp256k1_ecdsa_recover(
            signature: &Signature,
            message_hash: H256,
        ) -> Result<Address, Self::Error> {
            let mut s = [0u8; 32];
            signature.s.to_big_endian(&mut s);
            if signature.v.as_u64() == 1 || H256(s) != message_hash {
                return Err("bad signature");
            }
            let mut r = [0u8; 32];
            signature.r.to_big_endian(&mut r);
            Ok(Address::from_slice(&r[12..]))
        }
    }

    pub fn fake_sign(signer: Address, message: H256) -> (H256, Signature) {
        let mut r = [0u8; 32];
        r[12..].copy_from_slice(signer.as_bytes());
        let signature = Signature {
            v: RecoveryId::new(0),
            r: U256::from_big_endian(&r),
            s: U256::from_big_endian(message.as_bytes()),
        };
        (message, signature)
    }

    fn oracle() -> CheckpointOracleConfig {
        CheckpointOracleConfig {
            address: Address::from(hex!("9a9070028361F7AAbeB3f2F2Dc07F82C4a98A02a")),
            signers: (1..=5u8).map(Address::repeat_byte).collect(),
            threshold: 2,
        }
    }

    fn proposal() -> Checkpoint {
        Checkpoint {
            section_index: 400,
            section_head: H256::repeat_byte(0xaa),
            cht_root: H256::repeat_byte(0xbb),
            bloom_root: H256::repeat_byte(0xcc),
        }
    }

    #[test]
    fn checkpoint_hash_matches_known_vector() {
        let checkpoint = networks::mainnet_trusted_checkpoint();
        assert_eq!(
            checkpoint.hash::<DefaultCrypto>(),
            H256(hex!("154374061c8c5ea23cef55dce92960a4825ff0d4a3ab37a2bc906ded13857ae6"))
        );
        let oracle = networks::mainnet_checkpoint_oracle();
        assert_eq!(
            oracle.signing_hash::<DefaultCrypto>(&checkpoint),
            H256(hex!("52267e08b8362bfae7c6e85fd4caf3a61030e4be3b1d442539955af794375313"))
        );
    }

    #[test]
    fn empty_checkpoint() {
        assert!(Checkpoint::default().is_empty());
        assert!(!proposal().is_empty());
    }

    #[test]
    fn two_of_five_accepts() {
        let oracle = oracle();
        let message = oracle.signing_hash::<FakeCrypto>(&proposal());
        let signatures = [
            fake_sign(Address::repeat_byte(1), message),
            fake_sign(Address::repeat_byte(4), message),
        ];
        assert_eq!(
            oracle.verify::<FakeCrypto>(&proposal(), &signatures),
            CheckpointVerdict::Accept {
                signers: vec![Address::repeat_byte(1), Address::repeat_byte(4)]
            }
        );
    }

    #[test]
    fn unregistered_signer_is_not_counted() {
        let oracle = oracle();
        let message = oracle.signing_hash::<FakeCrypto>(&proposal());
        let signatures = [
            fake_sign(Address::repeat_byte(1), message),
            fake_sign(Address::repeat_byte(9), message),
        ];
        assert_eq!(
            oracle.verify::<FakeCrypto>(&proposal(), &signatures),
            CheckpointVerdict::Reject(Rejection::InsufficientQuorum { have: 1, need: 2 })
        );
    }

    #[test]
    fn repeated_signer_counts_once() {
        let oracle = oracle();
        let message = oracle.signing_hash::<FakeCrypto>(&proposal());
        let signatures = [
            fake_sign(Address::repeat_byte(2), message),
            fake_sign(Address::repeat_byte(2), message),
            fake_sign(Address::repeat_byte(2), message),
        ];
        assert_eq!(
            oracle.verify::<FakeCrypto>(&proposal(), &signatures),
            CheckpointVerdict::Reject(Rejection::InsufficientQuorum { have: 1, need: 2 })
        );
    }

    #[test]
    fn invalid_and_foreign_signatures_are_skipped() {
        let oracle = oracle();
        let message = oracle.signing_hash::<FakeCrypto>(&proposal());
        let mut broken = fake_sign(Address::repeat_byte(3), message);
        broken.1.v = RecoveryId::new(1);
        let other = Checkpoint { section_index: 401, ..proposal() };
        let foreign = fake_sign(
            Address::repeat_byte(5),
            oracle.signing_hash::<FakeCrypto>(&other),
        );
        let signatures = [broken, foreign, fake_sign(Address::repeat_byte(1), message)];
        assert_eq!(
            oracle.verify::<FakeCrypto>(&proposal(), &signatures),
            CheckpointVerdict::Reject(Rejection::InsufficientQuorum { have: 1, need: 2 })
        );
    }

    #[test]
    fn signature_order_is_irrelevant() {
        let oracle = oracle();
        let message = oracle.signing_hash::<FakeCrypto>(&proposal());
        let mut signatures = vec![
            fake_sign(Address::repeat_byte(9), message),
            fake_sign(Address::repeat_byte(3), message),
            fake_sign(Address::repeat_byte(5), message),
        ];
        let forward = oracle.verify::<FakeCrypto>(&proposal(), &signatures);
        signatures.reverse();
        assert_eq!(oracle.verify::<FakeCrypto>(&proposal(), &signatures), forward);
        assert!(forward.is_accepted());
    }

    #[test]
    fn oracle_check() {
        assert_eq!(oracle().check(), Ok(()));
        let zero = CheckpointOracleConfig { threshold: 0, ..oracle() };
        assert_eq!(zero.check(), Err(OracleDefect::InvalidThreshold { threshold: 0, signers: 5 }));
        let too_high = CheckpointOracleConfig { threshold: 6, ..oracle() };
        assert_eq!(
            too_high.check(),
            Err(OracleDefect::InvalidThreshold { threshold: 6, signers: 5 })
        );
        let mut duplicated = oracle();
        duplicated.signers.push(Address::repeat_byte(2));
        assert_eq!(duplicated.check(), Err(OracleDefect::DuplicateSigner(Address::repeat_byte(2))));
    }
}
