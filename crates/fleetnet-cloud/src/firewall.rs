//! Firewall rule construction from user port specifications

use crate::error::{NetworkError, Result};
use crate::model::{FirewallRule, OPEN_TO_ALL, Protocol};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const RANGE_SEPARATOR: char = '-';

/// A single port (`"80"`) or an inclusive range (`"8000-8010"`)
///
/// `from <= to` is not checked; the provider rejects inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub from: u16,
    pub to: u16,
}

impl PortSpec {
    pub fn single(port: u16) -> Self {
        Self {
            from: port,
            to: port,
        }
    }

    pub fn range(from: u16, to: u16) -> Self {
        Self { from, to }
    }

    /// Parse `"A"` or `"A-B"`
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        match spec.split_once(RANGE_SEPARATOR) {
            Some((from, to)) => Ok(Self {
                from: parse_port(spec, from)?,
                to: parse_port(spec, to)?,
            }),
            None => Ok(Self::single(parse_port(spec, spec)?)),
        }
    }
}

fn parse_port(spec: &str, half: &str) -> Result<u16> {
    half.trim().parse::<u16>().map_err(|e| {
        NetworkError::ConfigurationInvalid(format!("invalid port '{}' in '{}': {}", half, spec, e))
    })
}

impl FromStr for PortSpec {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}{}{}", self.from, RANGE_SEPARATOR, self.to)
        }
    }
}

impl FirewallRule {
    /// Ingress from anywhere for `protocol` on `ports`
    pub fn new(protocol: Protocol, ports: &PortSpec) -> Self {
        Self {
            protocol,
            from_port: ports.from,
            to_port: ports.to,
            source_cidr: OPEN_TO_ALL.to_string(),
        }
    }
}

/// Parse `spec` and build the matching rule
pub fn build_rule(protocol: Protocol, spec: &str) -> Result<FirewallRule> {
    Ok(FirewallRule::new(protocol, &PortSpec::parse(spec)?))
}

/// One rule per TCP spec followed by one rule per UDP spec
pub fn build_rules(tcp: &[PortSpec], udp: &[PortSpec]) -> Vec<FirewallRule> {
    tcp.iter()
        .map(|p| FirewallRule::new(Protocol::Tcp, p))
        .chain(udp.iter().map(|p| FirewallRule::new(Protocol::Udp, p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_port() {
        let rule = build_rule(Protocol::Tcp, "80").unwrap();
        assert_eq!(rule.from_port, 80);
        assert_eq!(rule.to_port, 80);
        assert_eq!(rule.protocol, Protocol::Tcp);
        assert_eq!(rule.source_cidr, "0.0.0.0/0");
    }

    #[test]
    fn test_port_range() {
        let rule = build_rule(Protocol::Udp, "8000-8010").unwrap();
        assert_eq!(rule.from_port, 8000);
        assert_eq!(rule.to_port, 8010);
        assert_eq!(rule.protocol, Protocol::Udp);
    }

    #[test]
    fn test_inverted_range_is_kept() {
        // 上下関係の検証は呼び出し側の責務
        let spec = PortSpec::parse("9000-8000").unwrap();
        assert_eq!(spec, PortSpec::range(9000, 8000));
    }

    #[test]
    fn test_non_numeric_half_is_rejected() {
        for bad in ["http", "80-x", "x-80", "", "80-", "70000", "-1"] {
            let err = PortSpec::parse(bad).unwrap_err();
            assert!(
                matches!(err, NetworkError::ConfigurationInvalid(_)),
                "expected ConfigurationInvalid for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        assert_eq!(PortSpec::single(443).to_string(), "443");
        assert_eq!(PortSpec::range(1, 2).to_string(), "1-2");
        assert_eq!("1-2".parse::<PortSpec>().unwrap(), PortSpec::range(1, 2));
    }

    #[test]
    fn test_build_rules_orders_tcp_before_udp() {
        let rules = build_rules(
            &[PortSpec::single(80), PortSpec::range(8000, 8010)],
            &[PortSpec::single(53)],
        );
        let summary: Vec<_> = rules
            .iter()
            .map(|r| (r.protocol, r.from_port, r.to_port))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Protocol::Tcp, 80, 80),
                (Protocol::Tcp, 8000, 8010),
                (Protocol::Udp, 53, 53),
            ]
        );
    }

    #[test]
    fn test_build_rules_empty() {
        assert!(build_rules(&[], &[]).is_empty());
    }
}
