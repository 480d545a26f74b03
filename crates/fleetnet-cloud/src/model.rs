//! Network substrate resources
//!
//! Provider-independent views of the resources a workload needs before it can
//! be deployed: a network (VPC), a subnet in it, and a security group bound to
//! it.

use serde::{Deserialize, Serialize};

/// Name of the tag holding a resource's human-readable name
pub const NAME_TAG: &str = "Name";

/// Source range of every generated ingress rule
pub const OPEN_TO_ALL: &str = "0.0.0.0/0";

/// Key/value tag attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Look up the `Name` tag in a tag list
pub fn name_from_tags(tags: &[Tag]) -> Option<String> {
    tags.iter()
        .find(|t| t.key == NAME_TAG)
        .map(|t| t.value.clone())
}

/// Virtual network (VPC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Provider-assigned identifier (`vpc-...`)
    pub id: String,

    /// Value of the `Name` tag, if any
    pub name: Option<String>,

    /// Primary IPv4 CIDR block
    pub cidr_block: String,

    /// Whether this is the account's default network for the region
    pub is_default: bool,

    /// Provider-assigned IPv6 block, if IPv6 was enabled
    pub ipv6_cidr_block: Option<String>,

    pub tags: Vec<Tag>,
}

impl Network {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Address-range partition of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,

    /// Owning network
    pub network_id: String,

    pub cidr_block: String,

    /// Whether this is the default subnet of its availability zone
    pub default_for_az: bool,

    pub availability_zone: Option<String>,

    pub name: Option<String>,

    pub tags: Vec<Tag>,
}

impl Subnet {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Stateful firewall attached to a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub id: String,
    pub name: String,

    /// Owning network
    pub network_id: String,

    /// Ingress rules in provider order
    pub ingress: Vec<FirewallRule>,
}

/// IP protocol of a firewall rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    /// Provider wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }

    /// Parse a provider wire name; anything other than tcp/udp is rejected
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tcp" | "6" => Some(Self::Tcp),
            "udp" | "17" => Some(Self::Udp),
            _ => None,
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One allow-ingress entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub protocol: Protocol,
    pub from_port: u16,
    pub to_port: u16,
    pub source_cidr: String,
}
