//! Network substrate preparation
//!
//! Sequences the resolvers and provisioners the way a deployment needs them:
//! network, then subnet, then security group. Each stage needs the IDs of the
//! previous one, so nothing runs concurrently.

use crate::action::{Action, Plan, ResourceKind};
use crate::cidr::CidrAllocator;
use crate::config::SubstrateConfig;
use crate::error::{NetworkError, Result};
use crate::model::{Network, SecurityGroup, Subnet};
use crate::network::resolve_network;
use crate::provider::NetworkApi;
use crate::provision::{create_network, create_security_group};
use crate::security_group::resolve_security_group;
use crate::subnet::resolve_subnet;
use serde::Serialize;

/// Everything a workload needs to be deployed into
#[derive(Debug, Clone, Serialize)]
pub struct Substrate {
    /// Provider the resources live in (e.g., "aws")
    pub provider: String,

    pub network: Network,
    pub subnet: Subnet,
    pub security_group: SecurityGroup,

    /// What was reused and what was created, in order
    pub applied: Plan,
}

/// Resolve what exists and create what is missing.
///
/// A missing network is created together with its subnet. A configured
/// security group must already exist in the network; without one, a fresh
/// group is created for `workload`.
pub async fn ensure_substrate(
    api: &dyn NetworkApi,
    allocator: &dyn CidrAllocator,
    config: &SubstrateConfig,
    workload: &str,
) -> Result<Substrate> {
    tracing::debug!("Preparing substrate for {} on {}", workload, api.name());
    let mut actions = Vec::new();

    let (network, subnet) = match resolve_network(api, &config.network).await? {
        Some(network) => {
            actions.push(Action::reuse(
                ResourceKind::Network,
                &network.id,
                format!("use vpc {}", network.display_name()),
            ));
            let subnet = resolve_subnet(api, &network.id, &config.subnet).await?;
            actions.push(Action::reuse(
                ResourceKind::Subnet,
                &subnet.id,
                format!("use subnet {}", subnet.display_name()),
            ));
            (network, subnet)
        }
        None => {
            check_group_can_follow_new_network(config)?;

            let (network, subnet) = create_network(api, allocator, config)
                .await?
                .into_result()?;
            actions.push(Action::create(
                ResourceKind::Network,
                &network.id,
                format!("created vpc {} ({})", config.network, network.cidr_block),
            ));
            actions.push(Action::create(
                ResourceKind::Subnet,
                &subnet.id,
                format!("created subnet {}", subnet.display_name()),
            ));
            (network, subnet)
        }
    };

    let security_group = if config.security_group.is_empty() {
        let group =
            create_security_group(api, workload, &network.id, &config.ports, &config.udp_ports)
                .await?;
        actions.push(Action::create(
            ResourceKind::SecurityGroup,
            &group.id,
            format!("created security group {}", group.name),
        ));
        group
    } else {
        let group = resolve_security_group(api, &config.security_group, &network).await?;
        actions.push(Action::reuse(
            ResourceKind::SecurityGroup,
            &group.id,
            format!("use security group {}", group.name),
        ));
        group
    };

    Ok(Substrate {
        provider: api.name().to_string(),
        network,
        subnet,
        security_group,
        applied: Plan::new(actions),
    })
}

/// Work out what [`ensure_substrate`] would do without mutating anything
pub async fn plan_substrate(
    api: &dyn NetworkApi,
    config: &SubstrateConfig,
    workload: &str,
) -> Result<Plan> {
    tracing::debug!("Planning substrate for {} on {}", workload, api.name());
    let mut actions = Vec::new();

    let network = resolve_network(api, &config.network).await?;
    match &network {
        Some(network) => {
            actions.push(Action::reuse(
                ResourceKind::Network,
                &network.id,
                format!("use vpc {}", network.display_name()),
            ));
            let subnet = resolve_subnet(api, &network.id, &config.subnet).await?;
            actions.push(Action::reuse(
                ResourceKind::Subnet,
                &subnet.id,
                format!("use subnet {}", subnet.display_name()),
            ));
        }
        None => {
            check_group_can_follow_new_network(config)?;

            actions.push(Action::create(
                ResourceKind::Network,
                &config.network,
                format!("create vpc {} on an unused CIDR block", config.network),
            ));
            let subnet_name = if config.subnet.is_empty() {
                &config.network
            } else {
                &config.subnet
            };
            actions.push(Action::create(
                ResourceKind::Subnet,
                subnet_name,
                format!("create subnet {} spanning the vpc", subnet_name),
            ));
        }
    }

    match network {
        Some(network) if !config.security_group.is_empty() => {
            let group = resolve_security_group(api, &config.security_group, &network).await?;
            actions.push(Action::reuse(
                ResourceKind::SecurityGroup,
                &group.id,
                format!("use security group {}", group.name),
            ));
        }
        _ => {
            let rules = config.ports.len() + config.udp_ports.len();
            actions.push(Action::create(
                ResourceKind::SecurityGroup,
                workload,
                format!(
                    "create security group for {} with {} ingress rules",
                    workload, rules
                ),
            ));
        }
    }

    Ok(Plan::new(actions))
}

/// A named security group can never belong to a network that does not exist
/// yet; catch that before paying for the network.
fn check_group_can_follow_new_network(config: &SubstrateConfig) -> Result<()> {
    if config.security_group.is_empty() {
        return Ok(());
    }
    Err(NetworkError::ConfigurationInvalid(format!(
        "security group '{}' cannot belong to vpc '{}', which does not exist yet",
        config.security_group, config.network
    )))
}
