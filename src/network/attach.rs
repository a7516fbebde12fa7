//! Container attachment request validation

use super::cidr;
use super::types::{AttachmentRequest, Network, PerNetworkOptions};
use crate::error::{Error, Result};

/// Resolves a network name to its validated definition
pub trait NetworkLookup {
    fn network(&self, name: &str) -> Result<Network>;
}

impl<F> NetworkLookup for F
where
    F: Fn(&str) -> Result<Network>,
{
    fn network(&self, name: &str) -> Result<Network> {
        self(name)
    }
}

/// Validate a container's attachment request
///
/// The namespace path, container ID and network list are checked before any
/// network is looked up. Networks are visited in name order; lookup errors
/// are returned unchanged.
pub fn validate_attachment_request<L>(
    lookup: &L,
    namespace_path: &str,
    request: &AttachmentRequest,
) -> Result<()>
where
    L: NetworkLookup + ?Sized,
{
    if namespace_path.is_empty() {
        return Err(Error::EmptyNamespacePath);
    }
    if request.container_id.is_empty() {
        return Err(Error::EmptyContainerId);
    }
    if request.networks.is_empty() {
        return Err(Error::NoNetworksSpecified);
    }

    for (name, options) in &request.networks {
        let network = lookup.network(name)?;
        validate_per_network_options(&network, options)?;
    }

    Ok(())
}

/// Check the interface name and that every static IP is in one of the subnets
pub fn validate_per_network_options(network: &Network, options: &PerNetworkOptions) -> Result<()> {
    if options.interface_name.is_empty() {
        return Err(Error::EmptyInterfaceName(network.name.clone()));
    }

    for ip in &options.static_ips {
        let in_subnet = network
            .subnets
            .iter()
            .any(|s| cidr::contains(&s.subnet, ip));
        if !in_subnet {
            return Err(Error::StaticIpNotInSubnet {
                ip: *ip,
                network: network.name.clone(),
            });
        }
    }

    Ok(())
}
