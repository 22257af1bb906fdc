//! JSON representation of a registry, for networks defined outside the compiled-in table.

use crate::{error::LoadError, profile::NetworkProfile, registry::Registry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry document:
///
/// ```json
/// { "default": "mainnet", "aliases": { "testnet": "ropsten" }, "networks": [ ... ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryFile {
    /// Defaults to the first network of the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
    pub networks: Vec<NetworkProfile>,
}

impl RegistryFile {
    /// Builds the registry with the same validation as the compiled-in table.
    ///
    /// # Errors
    /// Fails on the first configuration defect.
    pub fn into_registry(self) -> Result<Registry, LoadError> {
        let mut builder = Registry::builder();
        if let Some(default) = self.default {
            builder = builder.default_network(default);
        }
        for profile in self.networks {
            builder = builder.profile(profile);
        }
        for (alias, network) in self.aliases {
            builder = builder.alias(alias, network);
        }
        Ok(builder.build()?)
    }
}

impl From<&Registry> for RegistryFile {
    fn from(registry: &Registry) -> Self {
        Self {
            default: Some(registry.default_profile().name.clone()),
            aliases: registry
                .aliases()
                .map(|(alias, network)| (alias.to_string(), network.to_string()))
                .collect(),
            networks: registry.profiles().to_vec(),
        }
    }
}

impl Registry {
    /// Parses and validates a registry document.
    ///
    /// # Errors
    /// Fails if the document is malformed or describes an invalid registry.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        file.into_registry()
    }

    /// Parses and validates a registry document read from `reader`.
    ///
    /// # Errors
    /// Fails if the document is malformed or describes an invalid registry.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, LoadError> {
        let file: RegistryFile = serde_json::from_reader(reader)?;
        file.into_registry()
    }

    /// Serializes the registry back into its document form.
    ///
    /// # Errors
    /// Only fails if serialization itself fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&RegistryFile::from(self))
    }
}
