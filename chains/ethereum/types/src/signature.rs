use crate::U256;

/// Errors produced while decoding a raw signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature must be 65 bytes, got {0}")]
    InvalidLength(usize),
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u64),
    #[error("invalid hex encoding")]
    InvalidHex,
}

/// An ECDSA signature
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The ECDSA recovery id, this value encodes the parity of the y-coordinate of the secp256k1
    /// signature. May also encode the chain_id for EIP-155 signatures.
    pub v: RecoveryId,
    /// The ECDSA signature r
    pub r: U256,
    /// The ECDSA signature s
    pub s: U256,
}

impl Signature {
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_raw_signature(&self, output: &mut [u8; 65]) {
        self.r.to_big_endian(&mut output[0..32]);
        self.s.to_big_endian(&mut output[32..64]);
        output[64] = self.v.y_parity() as u8;
    }

    /// Decodes a signature from its 65 byte RSV representation.
    ///
    /// # Errors
    /// Returns `Err` if the input is not 65 bytes long or `v` is not a valid recovery id.
    pub fn from_raw_signature(raw: &[u8]) -> Result<Self, SignatureError> {
        if raw.len() != 65 {
            return Err(SignatureError::InvalidLength(raw.len()));
        }
        let v = u64::from(raw[64]);
        if !matches!(v, 0 | 1 | 27 | 28) {
            return Err(SignatureError::InvalidRecoveryId(v));
        }
        Ok(Self {
            v: RecoveryId::new(v),
            r: U256::from_big_endian(&raw[0..32]),
            s: U256::from_big_endian(&raw[32..64]),
        })
    }

    /// Decodes a `0x` prefixed hex encoded RSV signature.
    ///
    /// # Errors
    /// Returns `Err` if the string is not valid hex or not a valid raw signature.
    pub fn from_hex(value: &str) -> Result<Self, SignatureError> {
        let raw = const_hex::decode(value).map_err(|_| SignatureError::InvalidHex)?;
        Self::from_raw_signature(&raw)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let mut raw = [0u8; 65];
        self.to_raw_signature(&mut raw);
        serializer.serialize_str(&const_hex::encode_prefixed(raw))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&value).map_err(serde::de::Error::custom)
    }
}

/// The ECDSA recovery id, encodes the parity of the y-coordinate and for EIP-155 compatible
/// signatures also encodes the chain id
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoveryId(u64);

impl RecoveryId {
    #[must_use]
    pub fn new(v: u64) -> Self {
        debug_assert!(v >= 35 || matches!(v, 0 | 1 | 27 | 28));
        Self(v)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the parity (0 for even, 1 for odd) of the y-value of a secp256k1 signature.
    #[must_use]
    pub const fn y_parity(self) -> u64 {
        let v = self.as_u64();

        // if v is greather or equal to 35, it is an EIP-155 signature
        // [EIP-155]: https://eips.ethereum.org/EIPS/eip-155
        if v >= 35 {
            return (v - 35) & 1;
        }

        // 27 or 28, it is a legacy signature
        if v == 27 || v == 28 {
            return v - 27;
        }

        // otherwise, simply return the parity of the least significant bit
        v & 1
    }

    #[must_use]
    pub const fn chain_id(self) -> Option<u64> {
        let v = self.as_u64();
        if v >= 35 {
            Some((v - 35) >> 1)
        } else {
            None
        }
    }

    /// Applies [EIP155](https://github.com/ethereum/EIPs/blob/master/EIPS/eip-155.md), `None`
    /// when `chain_id` is too large to be encoded in `v`.
    #[must_use]
    pub const fn as_eip155(self, chain_id: u64) -> Option<u64> {
        match chain_id.checked_mul(2) {
            Some(doubled) => doubled.checked_add(35 + self.y_parity()),
            None => None,
        }
    }
}
