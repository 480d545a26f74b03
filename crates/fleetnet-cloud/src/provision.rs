//! Network and security group creation
//!
//! Every call here is a billable remote mutation. Nothing is retried and
//! nothing is rolled back: a failure part way through leaves whatever was
//! already created in place.

use crate::cidr::CidrAllocator;
use crate::config::SubstrateConfig;
use crate::error::{NetworkError, Result};
use crate::firewall::{PortSpec, build_rules};
use crate::model::{Network, SecurityGroup, Subnet};
use crate::network::get_network_by_id;
use crate::provider::{
    CreateNetworkRequest, CreateSecurityGroupRequest, CreateSubnetRequest, Lookup, NetworkApi,
};
use crate::security_group::get_security_group_by_id;
use crate::subnet::get_subnet_by_id;
use crate::tags::build_tags;
use chrono::{DateTime, Utc};

/// Security group name unique per deployment: workload name + UTC nanoseconds
pub fn unique_group_name(workload: &str, now: DateTime<Utc>) -> String {
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
    format!("{}{}", workload, nanos)
}

/// Create a fresh security group for `workload` in `network_id` opening
/// `tcp` and `udp` ports to everyone.
///
/// Orphaned groups are left behind if a later step fails.
pub async fn create_security_group(
    api: &dyn NetworkApi,
    workload: &str,
    network_id: &str,
    tcp: &[PortSpec],
    udp: &[PortSpec],
) -> Result<SecurityGroup> {
    let request = CreateSecurityGroupRequest {
        name: unique_group_name(workload, Utc::now()),
        description: format!("security group for {}", workload),
        network_id: network_id.to_string(),
    };

    let group_id = api.create_security_group(&request).await.map_err(|e| {
        NetworkError::from_provider(
            format!(
                "unable to create security group '{}' in VPC '{}'",
                request.name, network_id
            ),
            e,
        )
    })?;
    tracing::info!(
        "Created security group {} ({}) with VPC {}",
        request.name,
        group_id,
        network_id
    );

    let rules = build_rules(tcp, udp);
    if rules.is_empty() {
        tracing::debug!("No ports configured, skipping ingress authorization");
    } else {
        api.authorize_ingress(&group_id, &rules).await.map_err(|e| {
            NetworkError::from_provider(
                format!("unable to set security group '{}' ingress", request.name),
                e,
            )
        })?;
        tracing::info!("Authorized {} ingress rules on {}", rules.len(), group_id);
    }

    get_security_group_by_id(api, &group_id)
        .await
        .map_err(|e| match e {
            NetworkError::NotFound(_) => {
                NetworkError::NotFound("failed creating security group".to_string())
            }
            other => other,
        })
}

/// Outcome of [`create_network`].
///
/// The network exists once this value exists; the subnet step may still have
/// failed, and that failure is carried here instead of hiding the network.
#[derive(Debug)]
pub struct NetworkProvisioning {
    pub network: Network,
    pub subnet: Result<Subnet>,
}

impl NetworkProvisioning {
    /// Collapse into the pair, surfacing a subnet failure as the error
    pub fn into_result(self) -> Result<(Network, Subnet)> {
        let subnet = self.subnet?;
        Ok((self.network, subnet))
    }
}

/// Create the network named in `config` on an unused CIDR block, then one
/// subnet spanning the whole block.
pub async fn create_network(
    api: &dyn NetworkApi,
    allocator: &dyn CidrAllocator,
    config: &SubstrateConfig,
) -> Result<NetworkProvisioning> {
    if config.network.is_empty() {
        return Err(NetworkError::ConfigurationInvalid(
            "specify vpc name".to_string(),
        ));
    }

    let existing = api
        .describe_networks(&Lookup::All)
        .await
        .map_err(|e| NetworkError::from_provider("unable to describe VPCs", e))?;
    let occupied: Vec<String> = existing.into_iter().map(|n| n.cidr_block).collect();
    let cidr_block = allocator.allocate(&occupied)?;

    let request = CreateNetworkRequest {
        cidr_block,
        tags: build_tags(&config.tags, &config.network),
        ipv6: config.enable_ipv6,
    };
    let network_id = api.create_network(&request).await.map_err(|e| {
        NetworkError::from_provider(format!("unable to create VPC '{}'", config.network), e)
    })?;
    tracing::info!(
        "Created VPC {} ({}) with CIDR {}",
        config.network,
        network_id,
        request.cidr_block
    );

    // 作成レスポンスではなく、返された ID で引き直す
    let network = get_network_by_id(api, &network_id).await?;
    let subnet = create_subnet(api, &network, config).await;

    Ok(NetworkProvisioning { network, subnet })
}

async fn create_subnet(
    api: &dyn NetworkApi,
    network: &Network,
    config: &SubstrateConfig,
) -> Result<Subnet> {
    let subnet_name = if config.subnet.is_empty() {
        &config.network
    } else {
        &config.subnet
    };

    let request = CreateSubnetRequest {
        network_id: network.id.clone(),
        cidr_block: network.cidr_block.clone(),
        tags: build_tags(&config.tags, subnet_name),
    };
    let subnet_id = api.create_subnet(&request).await.map_err(|e| {
        NetworkError::from_provider(
            format!("unable to create subnet '{}' in VPC '{}'", subnet_name, network.id),
            e,
        )
    })?;
    tracing::info!(
        "Created subnet {} ({}) in VPC {}",
        subnet_name,
        subnet_id,
        network.id
    );

    get_subnet_by_id(api, &network.id, &subnet_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unique_group_name() {
        let now = Utc.timestamp_opt(1_700_000_000, 123).unwrap();
        assert_eq!(unique_group_name("web", now), "web1700000000000000123");
    }

    #[test]
    fn test_unique_group_names_differ_over_time() {
        let a = Utc.timestamp_opt(1_700_000_000, 1).unwrap();
        let b = Utc.timestamp_opt(1_700_000_000, 2).unwrap();
        assert_ne!(unique_group_name("web", a), unique_group_name("web", b));
    }
}
