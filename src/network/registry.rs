//! In-memory registry of validated networks

use super::attach::NetworkLookup;
use super::subnet::validate_subnets;
use super::types::Network;
use crate::error::{Error, Result};
use crate::manifest::NetcheckConfig;
use ipnet::IpNet;
use std::collections::BTreeMap;

/// Validated networks keyed by name
#[derive(Debug, Default)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, Network>,
}

impl NetworkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every configured network in file order
    ///
    /// Each network is checked against the host's used ranges plus the
    /// subnets of the networks validated before it.
    pub fn from_config(config: &NetcheckConfig) -> Result<Self> {
        let mut registry = Self::new();
        let mut used = config.config.used_networks.clone();

        for net in &config.networks {
            let network = validate_subnets(net, &used)?;
            used.extend(network.subnets.iter().map(|s| s.subnet));
            registry.insert(network);
        }

        tracing::info!(
            networks = registry.len(),
            used_ranges = used.len(),
            "network registry loaded"
        );
        Ok(registry)
    }

    /// Add a network, replacing any previous one with the same name
    pub fn insert(&mut self, network: Network) {
        self.networks.insert(network.name.clone(), network);
    }

    /// Get a network by name
    pub fn get(&self, name: &str) -> Option<&Network> {
        self.networks.get(name)
    }

    /// Networks in name order
    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Every subnet claimed by a registered network
    pub fn used_networks(&self) -> Vec<IpNet> {
        self.networks
            .values()
            .flat_map(|n| n.subnets.iter().map(|s| s.subnet))
            .collect()
    }
}

impl NetworkLookup for NetworkRegistry {
    fn network(&self, name: &str) -> Result<Network> {
        self.get(name)
            .cloned()
            .ok_or_else(|| Error::NetworkNotFound(name.to_string()))
    }
}
