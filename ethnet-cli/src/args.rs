use clap::Parser;
use std::path::PathBuf;

/// Inspect Ethereum network identities, fork schedules and light client checkpoints.
#[derive(Debug, Parser)]
#[clap(name = "ethnet", version)]
pub struct Opts {
    /// Network to operate on, the default network when omitted.
    #[clap(long, env = "ETHNET_CHAIN")]
    pub chain: Option<String>,
    /// Overrides the P2P network id of the selected network. The chain id is never affected.
    #[clap(long = "networkid", env = "ETHNET_NETWORKID")]
    pub network_id: Option<u64>,
    /// JSON registry replacing the compiled-in network table.
    #[clap(long, env = "ETHNET_REGISTRY")]
    pub registry: Option<PathBuf>,
    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Parser)]
pub enum Command {
    /// Network id, chain id and genesis hash the node would advertise.
    Identity,
    /// Fork schedule of the selected network, or the rules in force at a block.
    Forks(ForksOpts),
    /// Lists the registered networks.
    Networks(NetworksOpts),
    /// Trusted checkpoint and checkpoint oracle of the selected network.
    Checkpoint,
    /// Verifies a signed checkpoint against the oracle quorum of the selected network.
    VerifyCheckpoint(VerifyCheckpointOpts),
}

#[derive(Debug, Parser)]
pub struct ForksOpts {
    #[clap(long)]
    pub block: Option<u64>,
}

#[derive(Debug, Parser)]
pub struct NetworksOpts {
    /// Prints the whole registry as a JSON document usable with `--registry`.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct VerifyCheckpointOpts {
    /// JSON file holding the proposed checkpoint and its `(message, signature)` votes.
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags() {
        let opts =
            Opts::try_parse_from(["ethnet", "--chain", "classic", "--networkid", "42", "identity"])
                .unwrap();
        assert_eq!(opts.chain.as_deref(), Some("classic"));
        assert_eq!(opts.network_id, Some(42));
        assert!(opts.registry.is_none());
        assert!(matches!(opts.cmd, Command::Identity));
    }

    #[test]
    fn parses_subcommands() {
        let opts = Opts::try_parse_from(["ethnet", "forks", "--block", "1920000"]).unwrap();
        assert!(matches!(opts.cmd, Command::Forks(ForksOpts { block: Some(1_920_000) })));

        let opts = Opts::try_parse_from(["ethnet", "networks", "--json"]).unwrap();
        assert!(matches!(opts.cmd, Command::Networks(NetworksOpts { json: true })));

        let opts = Opts::try_parse_from(["ethnet", "verify-checkpoint", "votes.json"]).unwrap();
        let Command::VerifyCheckpoint(verify) = opts.cmd else {
            panic!("expected verify-checkpoint");
        };
        assert_eq!(verify.file, PathBuf::from("votes.json"));
    }

    #[test]
    fn rejects_malformed_network_id() {
        assert!(Opts::try_parse_from(["ethnet", "--networkid", "mainnet", "identity"]).is_err());
        assert!(Opts::try_parse_from(["ethnet", "--networkid", "-1", "identity"]).is_err());
    }

    #[test]
    fn requires_a_subcommand() {
        assert!(Opts::try_parse_from(["ethnet", "--chain", "goerli"]).is_err());
    }
}
