//! `NetworkApi` over the EC2 API

use crate::convert::{
    filter, ip_permission, name_filter, network_from_vpc, security_group_from_ec2,
    subnet_from_ec2, tag_specification,
};
use crate::error::{from_sdk_error, provider_error};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::ResourceType;
use fleetnet_cloud::{
    CreateNetworkRequest, CreateSecurityGroupRequest, CreateSubnetRequest, FirewallRule, Lookup,
    Network, NetworkApi, ProviderResult, SecurityGroup, Subnet,
};
use tracing::{debug, info};

/// EC2-backed network API
pub struct Ec2NetworkApi {
    client: Client,
}

impl Ec2NetworkApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS credential and region chain.
    ///
    /// SDK retries are disabled: creates are not idempotent and every call
    /// must happen at most once.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).retry_config(RetryConfig::disabled());
        if let Some(region) = region {
            loader = loader.region(aws_sdk_ec2::config::Region::new(region.to_string()));
        }
        let config = loader.load().await;
        debug!(region = ?config.region(), "loaded AWS configuration");

        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl NetworkApi for Ec2NetworkApi {
    fn name(&self) -> &str {
        "aws"
    }

    async fn describe_networks(&self, lookup: &Lookup) -> ProviderResult<Vec<Network>> {
        debug!(%lookup, "describing VPCs");
        let mut req = self.client.describe_vpcs();
        req = match lookup {
            Lookup::All => req,
            Lookup::ByName(name) => req.filters(name_filter(name)),
            Lookup::ById(id) => req.vpc_ids(id),
        };

        let resp = req.send().await.map_err(from_sdk_error)?;
        Ok(resp.vpcs().iter().map(network_from_vpc).collect())
    }

    async fn describe_subnets(
        &self,
        network_id: &str,
        lookup: &Lookup,
    ) -> ProviderResult<Vec<Subnet>> {
        debug!(network_id, %lookup, "describing subnets");
        let mut req = self
            .client
            .describe_subnets()
            .filters(filter("vpc-id", network_id));
        req = match lookup {
            Lookup::All => req,
            Lookup::ByName(name) => req.filters(name_filter(name)),
            Lookup::ById(id) => req.subnet_ids(id),
        };

        let resp = req.send().await.map_err(from_sdk_error)?;
        Ok(resp.subnets().iter().map(subnet_from_ec2).collect())
    }

    async fn describe_security_groups(
        &self,
        lookup: &Lookup,
    ) -> ProviderResult<Vec<SecurityGroup>> {
        debug!(%lookup, "describing security groups");
        let mut req = self.client.describe_security_groups();
        req = match lookup {
            Lookup::All => req,
            Lookup::ByName(name) => req.filters(filter("group-name", name)),
            Lookup::ById(id) => req.group_ids(id),
        };

        let resp = req.send().await.map_err(from_sdk_error)?;
        Ok(resp
            .security_groups()
            .iter()
            .map(security_group_from_ec2)
            .collect())
    }

    async fn create_network(&self, request: &CreateNetworkRequest) -> ProviderResult<String> {
        let resp = self
            .client
            .create_vpc()
            .cidr_block(&request.cidr_block)
            .amazon_provided_ipv6_cidr_block(request.ipv6)
            .tag_specifications(tag_specification(ResourceType::Vpc, &request.tags))
            .send()
            .await
            .map_err(from_sdk_error)?;

        let id = resp
            .vpc()
            .and_then(|v| v.vpc_id())
            .ok_or_else(|| provider_error(None, "no VPC returned from create operation"))?;
        info!(vpc_id = id, cidr = %request.cidr_block, "created VPC");
        Ok(id.to_string())
    }

    async fn create_subnet(&self, request: &CreateSubnetRequest) -> ProviderResult<String> {
        let resp = self
            .client
            .create_subnet()
            .vpc_id(&request.network_id)
            .cidr_block(&request.cidr_block)
            .tag_specifications(tag_specification(ResourceType::Subnet, &request.tags))
            .send()
            .await
            .map_err(from_sdk_error)?;

        let id = resp
            .subnet()
            .and_then(|s| s.subnet_id())
            .ok_or_else(|| provider_error(None, "no subnet returned from create operation"))?;
        info!(subnet_id = id, vpc_id = %request.network_id, "created subnet");
        Ok(id.to_string())
    }

    async fn create_security_group(
        &self,
        request: &CreateSecurityGroupRequest,
    ) -> ProviderResult<String> {
        let resp = self
            .client
            .create_security_group()
            .group_name(&request.name)
            .description(&request.description)
            .vpc_id(&request.network_id)
            .send()
            .await
            .map_err(from_sdk_error)?;

        let id = resp.group_id().ok_or_else(|| {
            provider_error(None, "no security group returned from create operation")
        })?;
        info!(group_id = id, name = %request.name, vpc_id = %request.network_id, "created security group");
        Ok(id.to_string())
    }

    async fn authorize_ingress(&self, group_id: &str, rules: &[FirewallRule]) -> ProviderResult<()> {
        self.client
            .authorize_security_group_ingress()
            .group_id(group_id)
            .set_ip_permissions(Some(rules.iter().map(ip_permission).collect()))
            .send()
            .await
            .map_err(from_sdk_error)?;

        info!(group_id, rules = rules.len(), "authorized ingress");
        Ok(())
    }
}
