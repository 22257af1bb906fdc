use crate::args::{Command, ForksOpts, NetworksOpts, Opts};
use anyhow::{Context, Result};
use ethnet_config::{
    ChainIdentity, Checkpoint, CheckpointVerdict, DefaultCrypto, NetworkProfile, Registry,
    Rejection, Signature, H256,
};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read, Write},
};

/// Result of a command that completed without error.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The checkpoint did not reach its quorum, the node should fall back to a full sync.
    Rejected(Rejection),
}

/// Signed checkpoint proposal, as collected from the oracle contract.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckpointVotes {
    pub checkpoint: Checkpoint,
    pub signatures: Vec<Vote>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vote {
    pub message: H256,
    pub signature: Signature,
}

pub fn load_registry(opts: &Opts) -> Result<Registry> {
    let Some(path) = opts.registry.as_ref() else {
        return Ok(Registry::builtin()?);
    };
    let file = File::open(path)
        .with_context(|| format!("failed to open registry {}", path.display()))?;
    let registry = Registry::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to load registry {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        networks = registry.profiles().len(),
        "registry loaded"
    );
    Ok(registry)
}

pub fn run<W: Write>(opts: &Opts, registry: &Registry, out: &mut W) -> Result<Outcome> {
    let profile = registry.select(opts.chain.as_deref())?;
    match &opts.cmd {
        Command::Identity => identity(profile, opts.network_id, out)?,
        Command::Forks(forks_opts) => forks(profile, forks_opts, out)?,
        Command::Networks(networks_opts) => networks(registry, networks_opts, out)?,
        Command::Checkpoint => checkpoint(profile, out)?,
        Command::VerifyCheckpoint(verify_opts) => {
            let file = File::open(&verify_opts.file).with_context(|| {
                format!("failed to open checkpoint votes {}", verify_opts.file.display())
            })?;
            return verify_checkpoint(profile, BufReader::new(file), out);
        },
    }
    Ok(Outcome::Done)
}

fn identity<W: Write>(
    profile: &NetworkProfile,
    network_id: Option<u64>,
    out: &mut W,
) -> Result<()> {
    let identity = ChainIdentity::of(profile, network_id);
    writeln!(out, "network    {}", profile.name)?;
    writeln!(out, "networkId  {}", identity.network_id)?;
    writeln!(out, "chainId    {}", identity.chain_id)?;
    writeln!(out, "genesis    {:?}", identity.genesis_hash)?;
    writeln!(out, "engine     {}", profile.consensus_engine.name())?;
    Ok(())
}

fn forks<W: Write>(profile: &NetworkProfile, opts: &ForksOpts, out: &mut W) -> Result<()> {
    let Some(block) = opts.block else {
        for activation in profile.fork_schedule.iter() {
            match activation.block {
                Some(block) => writeln!(out, "{:<16}{block}", activation.fork)?,
                None => writeln!(out, "{:<16}-", activation.fork)?,
            }
        }
        return Ok(());
    };

    let rules = profile.current_rules(block);
    let active: Vec<_> = profile.active_forks(block).iter().map(ToString::to_string).collect();
    writeln!(out, "block      {block}")?;
    writeln!(out, "active     {}", active.join(" "))?;
    writeln!(out, "gasTable   {:?}", rules.gas_table())?;
    writeln!(out, "signature  {:?}", rules.signature_scheme())?;
    writeln!(out, "daoFork    {}", rules.dao_fork)?;
    match profile.fork_schedule.next_fork(block) {
        Some(next) => {
            writeln!(out, "next       {} at {}", next.fork, next.block.unwrap_or_default())?;
        },
        None => writeln!(out, "next       -")?,
    }
    Ok(())
}

fn networks<W: Write>(registry: &Registry, opts: &NetworksOpts, out: &mut W) -> Result<()> {
    if opts.json {
        writeln!(out, "{}", registry.to_json_pretty()?)?;
        return Ok(());
    }
    let default = &registry.default_profile().name;
    for profile in registry.profiles() {
        let marker = if &profile.name == default { "*" } else { " " };
        writeln!(
            out,
            "{marker} {:<12} networkId={:<16} chainId={:<16} {:?}",
            profile.name, profile.default_network_id, profile.chain_id, profile.genesis_hash
        )?;
    }
    for (alias, network) in registry.aliases() {
        writeln!(out, "  {alias} -> {network}")?;
    }
    Ok(())
}

fn checkpoint<W: Write>(profile: &NetworkProfile, out: &mut W) -> Result<()> {
    match &profile.trusted_checkpoint {
        Some(checkpoint) => {
            writeln!(out, "section    {}", checkpoint.section_index)?;
            writeln!(out, "head       {:?}", checkpoint.section_head)?;
            writeln!(out, "chtRoot    {:?}", checkpoint.cht_root)?;
            writeln!(out, "bloomRoot  {:?}", checkpoint.bloom_root)?;
            writeln!(out, "hash       {:?}", checkpoint.hash::<DefaultCrypto>())?;
        },
        None => writeln!(out, "{} has no trusted checkpoint", profile.name)?,
    }
    if let Some(oracle) = &profile.checkpoint_oracle {
        writeln!(out, "oracle     {:?}", oracle.address)?;
        writeln!(out, "threshold  {} of {}", oracle.threshold, oracle.signers.len())?;
        for signer in &oracle.signers {
            writeln!(out, "signer     {signer:?}")?;
        }
    }
    Ok(())
}

pub fn verify_checkpoint<R: Read, W: Write>(
    profile: &NetworkProfile,
    votes: R,
    out: &mut W,
) -> Result<Outcome> {
    let votes: CheckpointVotes =
        serde_json::from_reader(votes).context("malformed checkpoint votes")?;
    let signatures: Vec<_> =
        votes.signatures.iter().map(|vote| (vote.message, vote.signature)).collect();

    match profile.verify_checkpoint::<DefaultCrypto>(&votes.checkpoint, &signatures) {
        CheckpointVerdict::Accept { signers } => {
            writeln!(out, "accepted section {}", votes.checkpoint.section_index)?;
            for signer in signers {
                writeln!(out, "signer     {signer:?}")?;
            }
            Ok(Outcome::Done)
        },
        CheckpointVerdict::Reject(rejection) => {
            writeln!(out, "rejected: {rejection}")?;
            Ok(Outcome::Rejected(rejection))
        },
    }
}
