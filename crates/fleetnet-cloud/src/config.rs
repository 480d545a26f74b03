//! Desired network substrate settings

use crate::firewall::PortSpec;
use crate::model::Tag;
use serde::{Deserialize, Serialize};

/// What the user asked for. Empty names mean "no preference".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstrateConfig {
    /// Network name or `vpc-...` ID
    pub network: String,

    /// Subnet name or ID
    pub subnet: String,

    /// Security group name or ID; empty means "create one per deployment"
    pub security_group: String,

    /// TCP ports to open
    pub ports: Vec<PortSpec>,

    /// UDP ports to open
    pub udp_ports: Vec<PortSpec>,

    /// Request an IPv6 block when creating the network
    pub enable_ipv6: bool,

    /// Extra tags for created resources
    pub tags: Vec<Tag>,
}

impl SubstrateConfig {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ..Default::default()
        }
    }

    pub fn has_ports(&self) -> bool {
        !self.ports.is_empty() || !self.udp_ports.is_empty()
    }
}
