//! Subnet and network validation
//!
//! Validation never mutates its input: each call returns a new validated
//! record, so a failed call leaves nothing half-normalized behind.

use super::types::{Network, NetworkConfig, Subnet, SubnetConfig};
use super::{cidr, conflict, gateway, lease};
use crate::error::{Error, Result};
use ipnet::IpNet;

/// Validate one subnet against the ranges already in use
///
/// Steps run in order and stop at the first failure: presence, CIDR
/// normalization, conflict detection, gateway resolution, lease range.
pub fn validate_subnet(
    config: &SubnetConfig,
    add_gateway: bool,
    used_networks: &[IpNet],
) -> Result<Subnet> {
    let text = match config.subnet.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(Error::NilSubnet),
    };

    let subnet = cidr::normalize_cidr(text)?;

    if let Some(used) = conflict::find_conflict(&subnet, used_networks) {
        return Err(Error::SubnetConflict { subnet, used });
    }

    let gateway = gateway::resolve_gateway(&subnet, config.gateway, add_gateway)?;

    let lease_range = config
        .lease_range
        .as_ref()
        .map(|range| lease::validate_lease_range(&subnet, range))
        .transpose()?;

    Ok(Subnet {
        subnet,
        gateway,
        lease_range,
    })
}

/// Validate every subnet of a network in declaration order
///
/// Internal networks do not get a default gateway. The returned network has
/// `ipv6_enabled` set when any of its subnets is IPv6.
pub fn validate_subnets(config: &NetworkConfig, used_networks: &[IpNet]) -> Result<Network> {
    let mut ipv6_enabled = false;
    let mut subnets = Vec::with_capacity(config.subnets.len());

    for subnet in &config.subnets {
        let subnet = validate_subnet(subnet, !config.internal, used_networks)?;
        if subnet.is_ipv6() {
            ipv6_enabled = true;
        }
        subnets.push(subnet);
    }

    Ok(Network {
        name: config.name.clone(),
        driver: config.driver.clone(),
        internal: config.internal,
        ipv6_enabled,
        subnets,
        labels: config.labels.clone(),
    })
}
