//! CIDR block allocation for new networks

use crate::error::{NetworkError, Result};
use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// Picks an address block that does not collide with existing networks
pub trait CidrAllocator: Send + Sync {
    /// Return an unused block given the blocks already in use
    fn allocate(&self, existing: &[String]) -> Result<String>;
}

/// Prefix length of every allocated block
const BLOCK_PREFIX: u8 = 16;

/// Private ranges searched in order
const SEARCH_SPACES: [(Ipv4Addr, u8); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

/// Walks the /16 blocks of the RFC 1918 ranges in address order and returns
/// the first one that overlaps nothing in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialCidrAllocator;

impl SequentialCidrAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl CidrAllocator for SequentialCidrAllocator {
    fn allocate(&self, existing: &[String]) -> Result<String> {
        let occupied: Vec<Ipv4Net> = existing
            .iter()
            .filter_map(|block| match block.parse::<Ipv4Net>() {
                Ok(net) => Some(net.trunc()),
                Err(e) => {
                    tracing::warn!("Ignoring unparsable CIDR block '{}': {}", block, e);
                    None
                }
            })
            .collect();

        for (addr, prefix) in SEARCH_SPACES {
            let space = Ipv4Net::new(addr, prefix)
                .map_err(|e| NetworkError::ConfigurationInvalid(e.to_string()))?;
            let candidates = space
                .subnets(BLOCK_PREFIX)
                .map_err(|e| NetworkError::ConfigurationInvalid(e.to_string()))?;

            for candidate in candidates {
                if !occupied.iter().any(|used| overlaps(used, &candidate)) {
                    tracing::debug!("Allocated CIDR block {}", candidate);
                    return Ok(candidate.to_string());
                }
            }
        }

        Err(NetworkError::CidrExhausted)
    }
}

/// Two aligned blocks overlap iff one contains the other
pub fn overlaps(a: &Ipv4Net, b: &Ipv4Net) -> bool {
    a.contains(&b.network()) || b.contains(&a.network())
}
