//! Remote network API trait definition

use crate::error::ProviderResult;
use crate::model::{FirewallRule, Network, SecurityGroup, Subnet, Tag};
use async_trait::async_trait;

/// How a describe call selects resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Every resource of the kind visible to the account
    All,
    /// Resources whose name matches (the `Name` tag for networks and subnets,
    /// the group name for security groups)
    ByName(String),
    /// The resource with this provider identifier
    ById(String),
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::All => write!(f, "all"),
            Lookup::ByName(name) => write!(f, "name '{}'", name),
            Lookup::ById(id) => write!(f, "id '{}'", id),
        }
    }
}

/// Parameters of a network creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNetworkRequest {
    pub cidr_block: String,
    pub tags: Vec<Tag>,

    /// Ask the provider for an auto-assigned IPv6 block
    pub ipv6: bool,
}

/// Parameters of a subnet creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubnetRequest {
    pub network_id: String,
    pub cidr_block: String,
    pub tags: Vec<Tag>,
}

/// Parameters of a security group creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSecurityGroupRequest {
    pub name: String,
    pub description: String,
    pub network_id: String,
}

/// Remote network API abstraction
///
/// Each method is exactly one remote call. Implementations classify provider
/// failures into [`crate::ProviderError`] and never retry: the create and
/// authorize calls are not idempotent.
#[async_trait]
pub trait NetworkApi: Send + Sync {
    /// Returns the provider name (e.g., "aws")
    fn name(&self) -> &str;

    async fn describe_networks(&self, lookup: &Lookup) -> ProviderResult<Vec<Network>>;

    /// Describe subnets, always restricted to one parent network
    async fn describe_subnets(&self, network_id: &str, lookup: &Lookup)
    -> ProviderResult<Vec<Subnet>>;

    async fn describe_security_groups(&self, lookup: &Lookup)
    -> ProviderResult<Vec<SecurityGroup>>;

    /// Create a network and return its provider identifier
    async fn create_network(&self, request: &CreateNetworkRequest) -> ProviderResult<String>;

    /// Create a subnet and return its provider identifier
    async fn create_subnet(&self, request: &CreateSubnetRequest) -> ProviderResult<String>;

    /// Create a security group and return its provider identifier
    async fn create_security_group(
        &self,
        request: &CreateSecurityGroupRequest,
    ) -> ProviderResult<String>;

    /// Authorize all `rules` on the group in one batched call
    async fn authorize_ingress(&self, group_id: &str, rules: &[FirewallRule])
    -> ProviderResult<()>;
}
