/// Proof-of-work (ethash) engine parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EthashConfig {}

/// Proof-of-authority (clique) engine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CliqueConfig {
    /// Number of seconds between blocks.
    pub period: u64,
    /// Epoch length after which votes are reset and a checkpoint block is sealed.
    pub epoch: u64,
}

/// Consensus engine of a network, exactly one is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ConsensusEngine {
    #[cfg_attr(feature = "serde", serde(rename = "ethash"))]
    ProofOfWork(EthashConfig),
    #[cfg_attr(feature = "serde", serde(rename = "clique"))]
    ProofOfAuthority(CliqueConfig),
}

impl ConsensusEngine {
    #[must_use]
    pub const fn ethash() -> Self {
        Self::ProofOfWork(EthashConfig {})
    }

    #[must_use]
    pub const fn clique(period: u64, epoch: u64) -> Self {
        Self::ProofOfAuthority(CliqueConfig { period, epoch })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProofOfWork(_) => "ethash",
            Self::ProofOfAuthority(_) => "clique",
        }
    }
}
