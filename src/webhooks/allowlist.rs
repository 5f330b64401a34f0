//! Source address allow-list for webhook deliveries.
//!
//! Linear sends webhooks from a small, published set of addresses. Checking
//! the peer address is an optional extra layer on top of signature and
//! freshness checks and never replaces them.

use std::net::{IpAddr, Ipv4Addr};

/// Addresses Linear delivers webhooks from.
pub const LINEAR_WEBHOOK_IPS: [Ipv4Addr; 6] = [
    Ipv4Addr::new(35, 231, 147, 226),
    Ipv4Addr::new(35, 243, 134, 228),
    Ipv4Addr::new(34, 140, 253, 14),
    Ipv4Addr::new(34, 38, 87, 206),
    Ipv4Addr::new(34, 134, 222, 122),
    Ipv4Addr::new(35, 222, 25, 142),
];

/// Returns `true` if `addr` is one of Linear's webhook source addresses.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`), which dual-stack listeners
/// report for IPv4 peers, are unwrapped first.
pub fn is_allowed_source(addr: IpAddr) -> bool {
    let v4 = match addr {
        IpAddr::V4(v4) => v4,
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => v4,
            None => return false,
        },
    };
    LINEAR_WEBHOOK_IPS.contains(&v4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn known_addresses_are_allowed() {
        for ip in LINEAR_WEBHOOK_IPS {
            assert!(is_allowed_source(IpAddr::V4(ip)), "{ip} should be allowed");
        }
    }

    #[test]
    fn other_addresses_are_rejected() {
        assert!(!is_allowed_source("127.0.0.1".parse().unwrap()));
        assert!(!is_allowed_source("35.231.147.227".parse().unwrap()));
        assert!(!is_allowed_source("::1".parse().unwrap()));
    }

    #[test]
    fn ipv4_mapped_ipv6_is_unwrapped() {
        let mapped = Ipv4Addr::new(34, 38, 87, 206).to_ipv6_mapped();
        assert!(is_allowed_source(IpAddr::V6(mapped)));

        let unmapped: Ipv6Addr = "2001:db8::1".parse().unwrap();
        assert!(!is_allowed_source(IpAddr::V6(unmapped)));
    }
}
