//! In-memory `NetworkApi` that records every call

use async_trait::async_trait;
use fleetnet_cloud::model::name_from_tags;
use fleetnet_cloud::{
    CreateNetworkRequest, CreateSecurityGroupRequest, CreateSubnetRequest, FirewallRule, Lookup,
    Network, NetworkApi, ProviderError, ProviderErrorKind, ProviderResult, SecurityGroup, Subnet,
    Tag,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    DescribeNetworks(Lookup),
    DescribeSubnets(String, Lookup),
    DescribeSecurityGroups(Lookup),
    CreateNetwork(CreateNetworkRequest),
    CreateSubnet(CreateSubnetRequest),
    CreateSecurityGroup(CreateSecurityGroupRequest),
    AuthorizeIngress(String, Vec<FirewallRule>),
}

#[derive(Default)]
pub struct FakeState {
    pub networks: Vec<Network>,
    pub subnets: Vec<Subnet>,
    pub groups: Vec<SecurityGroup>,
    pub calls: Vec<Call>,
    /// Operation name → error returned instead of doing the work
    pub failures: HashMap<&'static str, ProviderError>,
    /// ID lookups without a match fail like EC2 does instead of returning []
    pub strict_ids: bool,
    /// Created groups never show up in describe calls
    pub hide_created_groups: bool,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_network(self, network: Network) -> Self {
        self.state().networks.push(network);
        self
    }

    pub fn with_subnet(self, subnet: Subnet) -> Self {
        self.state().subnets.push(subnet);
        self
    }

    pub fn with_group(self, group: SecurityGroup) -> Self {
        self.state().groups.push(group);
        self
    }

    pub fn strict_ids(self) -> Self {
        self.state().strict_ids = true;
        self
    }

    pub fn hide_created_groups(self) -> Self {
        self.state().hide_created_groups = true;
        self
    }

    pub fn fail_on(self, operation: &'static str, error: ProviderError) -> Self {
        self.state().failures.insert(operation, error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }
}

impl FakeState {
    fn record(&mut self, call: Call, operation: &'static str) -> ProviderResult<()> {
        self.calls.push(call);
        match self.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{:04}", prefix, self.next_id)
    }

    fn missing_id<T>(&self, found: Vec<T>, code: &str, id: &str) -> ProviderResult<Vec<T>> {
        if found.is_empty() && self.strict_ids {
            return Err(ProviderError::new(
                ProviderErrorKind::NotFound,
                format!("The ID '{}' does not exist", id),
            )
            .with_code(code));
        }
        Ok(found)
    }
}

#[async_trait]
impl NetworkApi for FakeApi {
    fn name(&self) -> &str {
        "fake"
    }

    async fn describe_networks(&self, lookup: &Lookup) -> ProviderResult<Vec<Network>> {
        let mut state = self.state();
        state.record(Call::DescribeNetworks(lookup.clone()), "describe_networks")?;
        let found: Vec<Network> = state
            .networks
            .iter()
            .filter(|n| match lookup {
                Lookup::All => true,
                Lookup::ByName(name) => n.name.as_deref() == Some(name.as_str()),
                Lookup::ById(id) => &n.id == id,
            })
            .cloned()
            .collect();
        match lookup {
            Lookup::ById(id) => state.missing_id(found, "InvalidVpcID.NotFound", id),
            _ => Ok(found),
        }
    }

    async fn describe_subnets(
        &self,
        network_id: &str,
        lookup: &Lookup,
    ) -> ProviderResult<Vec<Subnet>> {
        let mut state = self.state();
        state.record(
            Call::DescribeSubnets(network_id.to_string(), lookup.clone()),
            "describe_subnets",
        )?;
        let found: Vec<Subnet> = state
            .subnets
            .iter()
            .filter(|s| s.network_id == network_id)
            .filter(|s| match lookup {
                Lookup::All => true,
                Lookup::ByName(name) => s.name.as_deref() == Some(name.as_str()),
                Lookup::ById(id) => &s.id == id,
            })
            .cloned()
            .collect();
        match lookup {
            Lookup::ById(id) => state.missing_id(found, "InvalidSubnetID.NotFound", id),
            _ => Ok(found),
        }
    }

    async fn describe_security_groups(&self, lookup: &Lookup) -> ProviderResult<Vec<SecurityGroup>> {
        let mut state = self.state();
        state.record(
            Call::DescribeSecurityGroups(lookup.clone()),
            "describe_security_groups",
        )?;
        let found: Vec<SecurityGroup> = state
            .groups
            .iter()
            .filter(|g| match lookup {
                Lookup::All => true,
                Lookup::ByName(name) => &g.name == name,
                Lookup::ById(id) => &g.id == id,
            })
            .cloned()
            .collect();
        match lookup {
            Lookup::ById(id) => state.missing_id(found, "InvalidGroup.NotFound", id),
            _ => Ok(found),
        }
    }

    async fn create_network(&self, request: &CreateNetworkRequest) -> ProviderResult<String> {
        let mut state = self.state();
        state.record(Call::CreateNetwork(request.clone()), "create_network")?;
        let id = state.next_id("vpc");
        state.networks.push(Network {
            id: id.clone(),
            name: name_from_tags(&request.tags),
            cidr_block: request.cidr_block.clone(),
            is_default: false,
            ipv6_cidr_block: request.ipv6.then(|| "2600:1f18:abcd:1200::/56".to_string()),
            tags: request.tags.clone(),
        });
        Ok(id)
    }

    async fn create_subnet(&self, request: &CreateSubnetRequest) -> ProviderResult<String> {
        let mut state = self.state();
        state.record(Call::CreateSubnet(request.clone()), "create_subnet")?;
        let id = state.next_id("subnet");
        state.subnets.push(Subnet {
            id: id.clone(),
            network_id: request.network_id.clone(),
            cidr_block: request.cidr_block.clone(),
            default_for_az: false,
            availability_zone: Some("ap-northeast-1a".to_string()),
            name: name_from_tags(&request.tags),
            tags: request.tags.clone(),
        });
        Ok(id)
    }

    async fn create_security_group(
        &self,
        request: &CreateSecurityGroupRequest,
    ) -> ProviderResult<String> {
        let mut state = self.state();
        state.record(
            Call::CreateSecurityGroup(request.clone()),
            "create_security_group",
        )?;
        if !state.networks.iter().any(|n| n.id == request.network_id) {
            return Err(ProviderError::new(
                ProviderErrorKind::NotFound,
                format!("The vpc ID '{}' does not exist", request.network_id),
            )
            .with_code("InvalidVpcID.NotFound"));
        }
        if state
            .groups
            .iter()
            .any(|g| g.name == request.name && g.network_id == request.network_id)
        {
            return Err(ProviderError::new(
                ProviderErrorKind::Duplicate,
                format!("The security group '{}' already exists", request.name),
            )
            .with_code("InvalidGroup.Duplicate"));
        }
        let id = state.next_id("sg");
        if !state.hide_created_groups {
            state.groups.push(SecurityGroup {
                id: id.clone(),
                name: request.name.clone(),
                network_id: request.network_id.clone(),
                ingress: Vec::new(),
            });
        }
        Ok(id)
    }

    async fn authorize_ingress(&self, group_id: &str, rules: &[FirewallRule]) -> ProviderResult<()> {
        let mut state = self.state();
        state.record(
            Call::AuthorizeIngress(group_id.to_string(), rules.to_vec()),
            "authorize_ingress",
        )?;
        match state.groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.ingress.extend_from_slice(rules);
                Ok(())
            }
            None => Err(ProviderError::new(
                ProviderErrorKind::NotFound,
                format!("The security group '{}' does not exist", group_id),
            )
            .with_code("InvalidGroup.NotFound")),
        }
    }
}

#[allow(dead_code)]
pub fn network(id: &str, name: Option<&str>, cidr: &str, is_default: bool) -> Network {
    Network {
        id: id.to_string(),
        name: name.map(|s| s.to_string()),
        cidr_block: cidr.to_string(),
        is_default,
        ipv6_cidr_block: None,
        tags: name
            .map(|n| vec![Tag::new("Name", n)])
            .unwrap_or_default(),
    }
}

#[allow(dead_code)]
pub fn subnet(id: &str, network_id: &str, name: Option<&str>, default_for_az: bool) -> Subnet {
    Subnet {
        id: id.to_string(),
        network_id: network_id.to_string(),
        cidr_block: "10.0.0.0/24".to_string(),
        default_for_az,
        availability_zone: Some("ap-northeast-1a".to_string()),
        name: name.map(|s| s.to_string()),
        tags: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn group(id: &str, name: &str, network_id: &str) -> SecurityGroup {
    SecurityGroup {
        id: id.to_string(),
        name: name.to_string(),
        network_id: network_id.to_string(),
        ingress: Vec::new(),
    }
}
