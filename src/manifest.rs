//! Configuration file parsing for netcheck
//!
//! Parses `netcheck.toml` configuration files using serde

use crate::error::{Error, Result};
use crate::network::NetworkConfig;
use ipnet::IpNet;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from a file
pub fn load(path: &Path) -> Result<NetcheckConfig> {
    let config = read(path)?;
    config.validate()?;
    Ok(config)
}

/// Load and merge multiple configuration files
///
/// Files are merged in order, with later files overriding earlier ones.
/// Networks with the same name are replaced as a whole.
pub fn load_merged(paths: &[PathBuf]) -> Result<NetcheckConfig> {
    let mut base: Option<NetcheckConfig> = None;

    for path in paths {
        let config = read(path)?;
        base = Some(match base {
            None => config,
            Some(b) => b.merge(config),
        });
    }

    let config = base.ok_or_else(|| {
        Error::ConfigValidation("No configuration files provided".into())
    })?;
    config.validate()?;
    Ok(config)
}

fn read(path: &Path) -> Result<NetcheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Root configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct NetcheckConfig {
    /// Global configuration settings
    #[serde(default)]
    pub config: GlobalConfig,

    /// Network definitions, validated in this order
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

impl NetcheckConfig {
    /// Validate the configuration structure
    ///
    /// Address checks are left to the network validators.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for net in &self.networks {
            if net.name.trim().is_empty() {
                return Err(Error::ConfigValidation("Network name is empty".into()));
            }
            if !names.insert(&net.name) {
                return Err(Error::ConfigValidation(format!(
                    "Duplicate network name: {}",
                    net.name
                )));
            }
        }

        if self.config.default_interface.is_empty() {
            return Err(Error::ConfigValidation(
                "default_interface must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Merge another config into this one
    pub fn merge(mut self, other: NetcheckConfig) -> NetcheckConfig {
        self.config = self.config.merge(other.config);

        for net in other.networks {
            if let Some(existing) = self.networks.iter_mut().find(|n| n.name == net.name) {
                *existing = net;
            } else {
                self.networks.push(net);
            }
        }

        self
    }
}

/// Global configuration settings
#[derive(Debug, Deserialize)]
pub struct GlobalConfig {
    /// Ranges already in use on the host (uplinks, VPNs, other runtimes)
    #[serde(default)]
    pub used_networks: Vec<IpNet>,

    /// Interface name used when an attachment does not name one
    #[serde(default = "default_interface")]
    pub default_interface: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            used_networks: Vec::new(),
            default_interface: default_interface(),
        }
    }
}

impl GlobalConfig {
    /// Merge another GlobalConfig into this one
    ///
    /// Used networks accumulate; other's interface name wins when set.
    fn merge(mut self, other: GlobalConfig) -> GlobalConfig {
        for net in other.used_networks {
            if !self.used_networks.contains(&net) {
                self.used_networks.push(net);
            }
        }
        if other.default_interface != default_interface() {
            self.default_interface = other.default_interface;
        }
        self
    }
}

fn default_interface() -> String {
    "eth0".into()
}
