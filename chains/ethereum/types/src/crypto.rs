pub use crate::{
    signature::{RecoveryId, Signature},
    Address, H256,
};

/// cryptographic hash function and secp256k1 ECDSA signature recovery implementation
pub trait Crypto {
    type Error: core::fmt::Debug;

    fn keccak256_to(data: impl AsRef<[u8]>, output: &mut [u8; 32]);

    fn keccak256(data: impl AsRef<[u8]>) -> H256 {
        let mut hash = [0u8; 32];
        Self::keccak256_to(data, &mut hash);
        hash.into()
    }

    /// Verify and recover a `SECP256k1` ECDSA signature.
    ///
    /// - `signature` is signature passed in RSV format.
    /// - `message_hash` is the keccak256 hash of the message.
    ///
    /// # Errors
    /// Returns `Err` if the signature is bad, otherwise the recovered address.
    fn secp256k1_ecdsa_recover(
        signature: &Signature,
        message_hash: H256,
    ) -> Result<Address, Self::Error>;
}

pub trait Signer {
    type Error;

    /// Signs the keccak256 hash of an arbitrary message.
    ///
    /// # Errors
    /// Returns `Err` if the message can't be signed.
    fn sign<I: AsRef<[u8]>>(
        &self,
        message: I,
        chain_id: Option<u64>,
    ) -> Result<Signature, Self::Error>;

    /// Attempt to sign the given message digest, returning a digital signature
    /// on success, or an error if something went wrong.
    ///
    /// # Errors
    /// Returns `Err` if the message can't be signed.
    fn sign_prehash(&self, prehash: H256, chain_id: Option<u64>) -> Result<Signature, Self::Error>;
}

#[cfg(feature = "with-crypto")]
pub struct DefaultCrypto;

#[cfg(feature = "with-crypto")]
impl Crypto for DefaultCrypto {
    type Error = libsecp256k1::Error;

    fn keccak256_to(data: impl AsRef<[u8]>, output: &mut [u8; 32]) {
        use sha3::Digest;
        let mut hasher = sha3::Keccak256::new();
        hasher.update(data);
        hasher.finalize_into(output.into());
    }

    fn keccak256(data: impl AsRef<[u8]>) -> H256 {
        use sha3::Digest;
        let hash: [u8; 32] = sha3::Keccak256::digest(data).into();
        hash.into()
    }

    fn secp256k1_ecdsa_recover(
        signature: &Signature,
        message_hash: H256,
    ) -> Result<Address, Self::Error> {
        let mut sig = [0u8; 65];
        signature.to_raw_signature(&mut sig);
        let rid = libsecp256k1::RecoveryId::parse(sig[64])?;
        let sig = libsecp256k1::Signature::parse_overflowing_slice(&sig[0..64])?;
        let msg = libsecp256k1::Message::parse(message_hash.as_fixed_bytes());
        let pubkey = libsecp256k1::recover(&msg, &sig, &rid)?;
        // uncompress the key
        let uncompressed = pubkey.serialize();
        let hash = Self::keccak256(&uncompressed[1..]);
        Ok(Address::from(hash))
    }
}

#[cfg(feature = "with-crypto")]
pub struct Keypair {
    keypair: secp256k1::Keypair,
}

#[cfg(feature = "with-crypto")]
impl Keypair {
    /// Create a new private key from a slice of bytes.
    ///
    /// # Errors
    /// Returns `Err` if the slice is greater than secp256k1 curve order.
    pub fn from_bytes<I: AsRef<[u8]>>(bytes: I) -> Result<Self, secp256k1::Error> {
        let secret = secp256k1::SecretKey::from_slice(bytes.as_ref())?;
        let keypair = secret.keypair(secp256k1::SECP256K1);
        Ok(Self { keypair })
    }

    #[must_use]
    pub fn address(&self) -> Address {
        // uncompress the key
        let uncompressed = self.keypair.public_key().serialize_uncompressed();
        let hash = DefaultCrypto::keccak256(&uncompressed[1..]);
        Address::from(hash)
    }
}

#[cfg(feature = "with-crypto")]
impl Signer for Keypair {
    type Error = secp256k1::Error;

    fn sign<I: AsRef<[u8]>>(
        &self,
        msg: I,
        chain_id: Option<u64>,
    ) -> Result<Signature, Self::Error> {
        self.sign_prehash(DefaultCrypto::keccak256(msg.as_ref()), chain_id)
    }

    fn sign_prehash(&self, prehash: H256, chain_id: Option<u64>) -> Result<Signature, Self::Error> {
        use crate::U256;

        let msg = secp256k1::Message::from_digest(prehash.0);
        let sig = secp256k1::SECP256K1.sign_ecdsa_recoverable(&msg, &self.keypair.secret_key());
        let (recovery_id, compact) = sig.serialize_compact();
        let r = U256::from_big_endian(&compact[0..32]);
        let s = U256::from_big_endian(&compact[32..64]);
        let v = u64::try_from(recovery_id.to_i32())
            .map_err(|_| secp256k1::Error::InvalidRecoveryId)?
            & 1;

        // All signatures whose s-value is greater than secp256k1n/2 are invalid.
        // - https://github.com/ethereum/EIPs/blob/master/EIPS/eip-2.md
        let secp256k1_half_n = U256::from_big_endian(&secp256k1::constants::CURVE_ORDER) >> 1;
        if s > secp256k1_half_n {
            return Err(secp256k1::Error::IncorrectSignature);
        }
        let v = match chain_id {
            Some(chain_id) => RecoveryId::new(v)
                .as_eip155(chain_id)
                .ok_or(secp256k1::Error::InvalidRecoveryId)?,
            None => v + 27,
        };
        Ok(Signature { v: RecoveryId::new(v), r, s })
    }
}

#[cfg(all(test, feature = "with-crypto"))]
mod tests {
    use super::{Crypto, DefaultCrypto, Keypair, Signer};
    use crate::{Address, RecoveryId, Signature, H256, U256};
    use hex_literal::hex;

    fn signature(v: u64, r: [u8; 32], s: [u8; 32]) -> Signature {
        Signature {
            v: RecoveryId::new(v),
            r: U256::from_big_endian(&r),
            s: U256::from_big_endian(&s),
        }
    }

    #[test]
    fn keccak256_of_empty_input() {
        assert_eq!(
            DefaultCrypto::keccak256(b""),
            H256(hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"))
        );
    }

    #[test]
    fn ecdsa_recover_works() {
        let test_cases: [(Signature, H256, Address); 4] = [
            (
                signature(
                    0x00,
                    hex!("74ce2198225fb75ba25ff998f912ebc7ba8351056b3398a73eb2680cd8a0729a"),
                    hex!("426cff41ea4656f1517ebf685bc2841e9156eb5e9119833f822aef5d9ca36491"),
                ),
                hex!("2104564ddf4958472ccfa07c340edd45558294f4591a343f91554278eee74689").into(),
                hex!("677de87be1ecc2ba2f4003af7efcdcb406ff4d43").into(),
            ),
            (
                signature(
                    0x01,
                    hex!("7818d886a8ca01a6d80a240d3704090a525bb3440699defde67463d5e7094c2e"),
                    hex!("05c537ecebbe16f3203a62ed27d251aecb15e636e816686af7d96fccd1efe628"),
                ),
                hex!("9478c96651709feb4e3fea375f921faea701cfb66b5e43bdebde586d1aeb7047").into(),
                hex!("F531c7A28a3492390D4C47dBa6775FA76349DcFF").into(),
            ),
            (
                signature(
                    0x1b,
                    hex!("c58f3fd84bc6cd1633e0b8cba40cd2f6d8c0e4bd25a6c834baca0249666366aa"),
                    hex!("7ac31746b8f4542847fd695c93cd90fc0dffee1e0445848d27657d60f0279e31"),
                ),
                hex!("f5f18567b0a8dbd2f9c12eecc22545e2150f0683ccb2db2a0b37739dd9cb24e5").into(),
                hex!("2a65aca4d5fc5b5c859090a6c34d164135398226").into(),
            ),
            (
                signature(
                    0x1c,
                    hex!("c8fc04e29b0859a7f265b67af7d4c5c6bc9e3d5a8de4950f89fa71a12a3cf8ae"),
                    hex!("7dd15a10f9f2c8d1519a6044d880d04756798fc23923ff94f4823df8dc5b987a"),
                ),
                hex!("341467bdde941ac08fc0ced98fbbb0db1d9d393909fda333288843b49525faf0").into(),
                hex!("32be343b94f860124dc4fee278fdcbd38c102d88").into(),
            ),
        ];

        for (signature, msg_hash, expected_addr) in test_cases {
            let actual_addr = DefaultCrypto::secp256k1_ecdsa_recover(&signature, msg_hash).unwrap();
            assert_eq!(expected_addr, actual_addr);
        }
    }

    #[test]
    fn signed_prehash_recovers_signer() {
        let keypair =
            Keypair::from_bytes(hex!("fad9c8855b740a0b7ed4c221dbad0f33a83a49cad6b3fe8d5817ac83d38b6a19"))
                .unwrap();
        assert_eq!(keypair.address(), Address::from(hex!("96216849c49358b10257cb55b28ea603c874b05e")));

        let prehash = DefaultCrypto::keccak256(b"checkpoint");
        let signature = keypair.sign_prehash(prehash, None).unwrap();
        assert!(matches!(signature.v.as_u64(), 27 | 28));
        let recovered = DefaultCrypto::secp256k1_ecdsa_recover(&signature, prehash).unwrap();
        assert_eq!(recovered, keypair.address());

        let other = DefaultCrypto::keccak256(b"another checkpoint");
        let recovered = DefaultCrypto::secp256k1_ecdsa_recover(&signature, other).unwrap();
        assert_ne!(recovered, keypair.address());
    }

    #[test]
    fn eip155_signature_encodes_chain_id() {
        let keypair =
            Keypair::from_bytes(hex!("349593acb529f4bd0cda7ac620fab960130e248fd18e55a08df70d87263cf5af"))
                .unwrap();
        assert_eq!(keypair.address(), Address::from(hex!("2729b52d0214282beb1f37eb147f3ec32ad1da91")));
        let signature = keypair.sign(b"replay protected", Some(61)).unwrap();
        assert_eq!(signature.v.chain_id(), Some(61));
    }

    #[test]
    fn unencodable_chain_id_is_a_signing_error() {
        let keypair = Keypair::from_bytes([0x42; 32]).unwrap();
        assert_eq!(
            keypair.sign(b"replay protected", Some(u64::MAX)),
            Err(secp256k1::Error::InvalidRecoveryId)
        );
    }
}
