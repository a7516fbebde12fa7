//! Gateway validation and default gateway derivation

use super::cidr;
use crate::error::{Error, Result};
use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Resolve the gateway for a canonical subnet
///
/// An explicit gateway must lie inside the subnet. Without one, the first
/// usable address is derived when `auto_assign` is set; otherwise the subnet
/// has no gateway.
pub fn resolve_gateway(
    subnet: &IpNet,
    explicit: Option<IpAddr>,
    auto_assign: bool,
) -> Result<Option<IpAddr>> {
    match explicit {
        Some(gateway) => {
            if !cidr::contains(subnet, &gateway) {
                return Err(Error::GatewayOutOfRange {
                    gateway,
                    subnet: *subnet,
                });
            }
            Ok(Some(cidr::normalize_ip(subnet, gateway)))
        }
        None if auto_assign => {
            let gateway = cidr::normalize_ip(subnet, first_ip_in_subnet(subnet)?);
            tracing::debug!(%subnet, %gateway, "assigned default gateway");
            Ok(Some(gateway))
        }
        None => Ok(None),
    }
}

/// First usable address of a subnet: the network address plus one
///
/// Point-to-point and host prefixes (/31, /32, /127, /128) have no usable
/// address.
pub fn first_ip_in_subnet(subnet: &IpNet) -> Result<IpAddr> {
    if subnet.max_prefix_len() - subnet.prefix_len() < 2 {
        return Err(Error::SubnetTooSmall(*subnet));
    }

    match subnet {
        IpNet::V4(net) => Ok(IpAddr::V4(Ipv4Addr::from(u32::from(net.network()) + 1))),
        IpNet::V6(net) => Ok(IpAddr::V6(Ipv6Addr::from(u128::from(net.network()) + 1))),
    }
}
