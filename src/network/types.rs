//! Network, subnet and attachment records
//!
//! `*Config` types are the unvalidated shapes read from configuration.
//! [`Subnet`] and [`Network`] are only produced by the validators and always
//! hold canonical, in-range addresses.

use super::cidr;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Optional DHCP-style bounds inside a subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseRange {
    /// First address handed out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ip: Option<IpAddr>,

    /// Last address handed out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ip: Option<IpAddr>,
}

/// Subnet as declared by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubnetConfig {
    /// Subnet in CIDR notation (e.g., "10.0.1.0/24"); a host address is accepted
    pub subnet: Option<String>,

    /// Gateway address (first usable address if not specified)
    #[serde(default)]
    pub gateway: Option<IpAddr>,

    /// Lease range for dynamic assignment
    #[serde(default)]
    pub lease_range: Option<LeaseRange>,
}

impl SubnetConfig {
    /// Create a subnet config from CIDR text with no gateway or lease range
    pub fn new(subnet: impl Into<String>) -> Self {
        Self {
            subnet: Some(subnet.into()),
            ..Default::default()
        }
    }

    /// Set an explicit gateway
    #[cfg(test)]
    pub fn with_gateway(mut self, gateway: IpAddr) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Set the lease range
    pub fn with_lease_range(mut self, start_ip: Option<IpAddr>, end_ip: Option<IpAddr>) -> Self {
        self.lease_range = Some(LeaseRange { start_ip, end_ip });
        self
    }
}

/// A validated subnet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subnet {
    /// Canonical network range
    pub subnet: IpNet,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<IpAddr>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lease_range: Option<LeaseRange>,
}

impl Subnet {
    /// Check whether the subnet's base address is IPv6
    ///
    /// IPv4-mapped subnets count as IPv4.
    pub fn is_ipv6(&self) -> bool {
        matches!(cidr::canonical_net(&self.subnet), IpNet::V6(_))
    }
}

fn default_driver() -> String {
    "bridge".into()
}

/// Network definition as declared by the user
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Network name
    pub name: String,

    /// Driver name, passed through to the backend
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Internal networks never get an auto-assigned gateway
    #[serde(default)]
    pub internal: bool,

    /// Subnets in declaration order
    #[serde(default)]
    pub subnets: Vec<SubnetConfig>,

    /// Free-form labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl NetworkConfig {
    /// Create an empty, non-internal bridge network
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver: default_driver(),
            internal: false,
            subnets: Vec::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Mark the network internal
    #[cfg(test)]
    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    /// Append a subnet
    #[cfg(test)]
    pub fn subnet(mut self, subnet: SubnetConfig) -> Self {
        self.subnets.push(subnet);
        self
    }
}

/// A validated network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub name: String,
    pub driver: String,
    pub internal: bool,

    /// True iff at least one subnet is IPv6
    pub ipv6_enabled: bool,

    pub subnets: Vec<Subnet>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Per-network options of an attachment request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerNetworkOptions {
    /// Interface name inside the container (e.g., "eth0")
    pub interface_name: String,

    /// Static addresses requested on this network
    #[serde(default)]
    pub static_ips: Vec<IpAddr>,

    /// DNS aliases, passed through to the backend
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl PerNetworkOptions {
    pub fn new(interface_name: impl Into<String>) -> Self {
        Self {
            interface_name: interface_name.into(),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn static_ip(mut self, ip: IpAddr) -> Self {
        self.static_ips.push(ip);
        self
    }
}

/// A container's request to join one or more networks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRequest {
    pub container_id: String,

    #[serde(default)]
    pub container_name: String,

    /// Options keyed by network name, visited in name order
    pub networks: BTreeMap<String, PerNetworkOptions>,
}

impl AttachmentRequest {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Default::default()
        }
    }

    /// Add or replace the options for a network
    #[cfg(test)]
    pub fn network(mut self, name: impl Into<String>, options: PerNetworkOptions) -> Self {
        self.networks.insert(name.into(), options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::subnet::validate_subnets;

    #[test]
    fn test_network_json_output() {
        let config = NetworkConfig::new("isolated")
            .internal(true)
            .subnet(SubnetConfig::new("10.89.0.0/24"));
        let network = validate_subnets(&config, &[]).unwrap();
        let json = serde_json::to_value(&network).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "isolated",
                "driver": "bridge",
                "internal": true,
                "ipv6_enabled": false,
                "subnets": [{ "subnet": "10.89.0.0/24" }],
            })
        );
    }
}
