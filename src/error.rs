//! Unified error types for netcheck

use ipnet::IpNet;
use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for netcheck operations
#[derive(Error, Debug)]
pub enum Error {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Config errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Subnet errors
    #[error("subnet is nil")]
    NilSubnet,

    #[error("subnet {subnet} invalid: {reason}")]
    InvalidSubnet { subnet: String, reason: String },

    #[error("subnet {subnet} is already used on the host or by another config ({used})")]
    SubnetConflict { subnet: IpNet, used: IpNet },

    #[error("gateway {gateway} not in subnet {subnet}")]
    GatewayOutOfRange { gateway: IpAddr, subnet: IpNet },

    #[error("subnet {0} has no usable address for a gateway")]
    SubnetTooSmall(IpNet),

    #[error("lease range start ip {ip} not in subnet {subnet}")]
    LeaseStartOutOfRange { ip: IpAddr, subnet: IpNet },

    #[error("lease range end ip {ip} not in subnet {subnet}")]
    LeaseEndOutOfRange { ip: IpAddr, subnet: IpNet },

    // Attachment errors
    #[error("namespace path is empty")]
    EmptyNamespacePath,

    #[error("container ID is empty")]
    EmptyContainerId,

    #[error("must specify at least one network")]
    NoNetworksSpecified,

    #[error("Network '{0}' not found")]
    NetworkNotFound(String),

    #[error("interface name on network {0} is empty")]
    EmptyInterfaceName(String),

    #[error("requested static ip {ip} not in any subnet on network {network}")]
    StaticIpNotInSubnet { ip: IpAddr, network: String },
}

/// Result type alias for netcheck operations
pub type Result<T> = std::result::Result<T, Error>;
