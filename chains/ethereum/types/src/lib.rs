pub mod crypto;
mod signature;

pub use primitive_types::{H160, H256, U256};
pub use signature::{RecoveryId, Signature, SignatureError};

/// 20 byte account identifier, the last 20 bytes of the keccak256 of the public key.
pub type Address = H160;
