//! CIDR parsing and address-family helpers

use crate::error::{Error, Result};
use ipnet::{IpNet, Ipv4Net};
use std::net::IpAddr;

/// Parse CIDR text and truncate it to its network address
///
/// `10.0.1.7/24` becomes `10.0.1.0/24`.
pub fn normalize_cidr(text: &str) -> Result<IpNet> {
    let net: IpNet = text.parse().map_err(|e: ipnet::AddrParseError| {
        Error::InvalidSubnet {
            subnet: text.to_string(),
            reason: e.to_string(),
        }
    })?;

    let canonical = net.trunc();
    if canonical != net {
        tracing::debug!(input = %net, subnet = %canonical, "truncated host bits");
    }
    Ok(canonical)
}

/// Map an IPv4-mapped IPv6 subnet to its IPv4 form
///
/// `::ffff:10.0.0.0/120` becomes `10.0.0.0/24`. Subnets shorter than /96 or
/// outside `::ffff:0:0/96` are returned unchanged.
pub fn canonical_net(net: &IpNet) -> IpNet {
    let IpNet::V6(v6) = net else {
        return *net;
    };
    v6.network()
        .to_ipv4_mapped()
        .filter(|_| v6.prefix_len() >= 96)
        .and_then(|base| Ipv4Net::new(base, v6.prefix_len() - 96).ok())
        .map(IpNet::V4)
        .unwrap_or(*net)
}

/// Family-aware containment check
///
/// IPv4-mapped addresses and subnets are compared in their IPv4 form, so
/// `::ffff:10.0.0.5` is inside `10.0.0.0/24` and `10.0.0.5` is inside
/// `::ffff:10.0.0.0/120`.
pub fn contains(net: &IpNet, ip: &IpAddr) -> bool {
    canonical_net(net).contains(&ip.to_canonical())
}

/// Return `ip` in the representation of the subnet's address family
pub fn normalize_ip(net: &IpNet, ip: IpAddr) -> IpAddr {
    match (canonical_net(net), ip) {
        (IpNet::V4(_), IpAddr::V6(v6)) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        _ => ip,
    }
}
