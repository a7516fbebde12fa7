//! Lease range validation

use super::cidr;
use super::types::LeaseRange;
use crate::error::{Error, Result};
use ipnet::IpNet;

/// Check each present bound of a lease range against its subnet
///
/// Bounds are checked independently; their relative order is not enforced.
pub fn validate_lease_range(subnet: &IpNet, range: &LeaseRange) -> Result<LeaseRange> {
    let start_ip = match range.start_ip {
        Some(ip) if !cidr::contains(subnet, &ip) => {
            return Err(Error::LeaseStartOutOfRange { ip, subnet: *subnet });
        }
        Some(ip) => Some(cidr::normalize_ip(subnet, ip)),
        None => None,
    };

    let end_ip = match range.end_ip {
        Some(ip) if !cidr::contains(subnet, &ip) => {
            return Err(Error::LeaseEndOutOfRange { ip, subnet: *subnet });
        }
        Some(ip) => Some(cidr::normalize_ip(subnet, ip)),
        None => None,
    };

    Ok(LeaseRange { start_ip, end_ip })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    fn range(start_ip: Option<IpAddr>, end_ip: Option<IpAddr>) -> LeaseRange {
        LeaseRange { start_ip, end_ip }
    }

    #[test]
    fn test_bounds_in_range() {
        let subnet: IpNet = "10.0.0.0/24".parse().unwrap();
        let lease = range(ip("10.0.0.100"), ip("10.0.0.200"));
        assert_eq!(validate_lease_range(&subnet, &lease).unwrap(), lease);
    }

    #[test]
    fn test_absent_bounds_are_unconstrained() {
        let subnet: IpNet = "10.0.0.0/24".parse().unwrap();
        let lease = LeaseRange::default();
        assert_eq!(validate_lease_range(&subnet, &lease).unwrap(), lease);

        let lease = range(None, ip("10.0.0.9"));
        assert_eq!(validate_lease_range(&subnet, &lease).unwrap(), lease);
    }

    #[test]
    fn test_start_checked_before_end() {
        let subnet: IpNet = "10.0.0.0/24".parse().unwrap();
        let lease = range(ip("10.0.1.1"), ip("10.0.2.1"));
        assert!(matches!(
            validate_lease_range(&subnet, &lease),
            Err(Error::LeaseStartOutOfRange { .. })
        ));

        let lease = range(ip("10.0.0.1"), ip("10.0.2.1"));
        assert!(matches!(
            validate_lease_range(&subnet, &lease),
            Err(Error::LeaseEndOutOfRange { .. })
        ));
    }

    #[test]
    fn test_ipv6_bounds() {
        let subnet: IpNet = "fd00:1::/64".parse().unwrap();
        let lease = range(ip("fd00:1::100"), ip("fd00:1::200"));
        assert_eq!(validate_lease_range(&subnet, &lease).unwrap(), lease);

        let lease = range(ip("fd00:2::100"), None);
        assert!(matches!(
            validate_lease_range(&subnet, &lease),
            Err(Error::LeaseStartOutOfRange { .. })
        ));

        let lease = range(None, ip("10.0.0.1"));
        assert!(matches!(
            validate_lease_range(&subnet, &lease),
            Err(Error::LeaseEndOutOfRange { .. })
        ));
    }

    #[test]
    fn test_reversed_bounds_allowed() {
        let subnet: IpNet = "10.0.0.0/24".parse().unwrap();
        let lease = range(ip("10.0.0.200"), ip("10.0.0.100"));
        assert!(validate_lease_range(&subnet, &lease).is_ok());
    }

    #[test]
    fn test_mapped_bounds_normalized() {
        let subnet: IpNet = "10.0.0.0/24".parse().unwrap();
        let lease = range(ip("::ffff:10.0.0.10"), None);
        let validated = validate_lease_range(&subnet, &lease).unwrap();
        assert_eq!(validated.start_ip, ip("10.0.0.10"));
    }

    #[test]
    fn test_bounds_in_mapped_subnet() {
        let subnet: IpNet = "::ffff:10.0.0.0/120".parse().unwrap();
        let lease = range(ip("::ffff:10.0.0.10"), ip("10.0.0.20"));
        let validated = validate_lease_range(&subnet, &lease).unwrap();
        assert_eq!(validated, range(ip("10.0.0.10"), ip("10.0.0.20")));
    }
}
