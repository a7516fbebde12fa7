//! Overlap detection between subnets

use super::cidr::canonical_net;
use ipnet::IpNet;

/// Check whether two ranges share at least one address
///
/// IPv4-mapped IPv6 ranges are compared in their IPv4 form.
pub fn intersects(a: &IpNet, b: &IpNet) -> bool {
    let (a, b) = (canonical_net(a), canonical_net(b));
    a.contains(&b.network()) || b.contains(&a.network())
}

/// Return the first used range that overlaps `candidate`
pub fn find_conflict(candidate: &IpNet, used: &[IpNet]) -> Option<IpNet> {
    used.iter().find(|net| intersects(candidate, net)).copied()
}
