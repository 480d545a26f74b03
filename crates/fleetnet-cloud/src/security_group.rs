//! Security group resolution

use crate::error::{NetworkError, Result};
use crate::model::{Network, SecurityGroup};
use crate::provider::{Lookup, NetworkApi};

/// Resolve the security group `name` (a group name or a group ID) and make
/// sure it belongs to `network`.
///
/// Unlike [`crate::resolve_network`], absence is an error: groups are only
/// ever created explicitly.
pub async fn resolve_security_group(
    api: &dyn NetworkApi,
    name: &str,
    network: &Network,
) -> Result<SecurityGroup> {
    tracing::debug!("Getting security groups named {}", name);
    let mut groups = describe(api, &Lookup::ByName(name.to_string())).await?;

    if groups.is_empty() {
        tracing::debug!("No security groups named {}, trying it as a group id", name);
        let lookup = Lookup::ById(name.to_string());
        groups = match api.describe_security_groups(&lookup).await {
            Ok(groups) => groups,
            Err(e) if e.is_absent() => Vec::new(),
            Err(e) => {
                return Err(NetworkError::from_provider(
                    format!("get security group with id '{}'", name),
                    e,
                ));
            }
        };
    }

    let Some(first_network) = groups.first().map(|g| g.network_id.clone()) else {
        return Err(NetworkError::NotFound(format!(
            "security group '{}' not found",
            name
        )));
    };

    groups
        .into_iter()
        .find(|g| g.network_id == network.id)
        .ok_or_else(|| NetworkError::Mismatch {
            group: name.to_string(),
            expected: network.id.clone(),
            actual: first_network,
        })
}

/// Fetch one security group by its provider identifier
pub async fn get_security_group_by_id(api: &dyn NetworkApi, id: &str) -> Result<SecurityGroup> {
    describe(api, &Lookup::ById(id.to_string()))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NetworkError::NotFound(format!("security group '{}' not found", id)))
}

async fn describe(api: &dyn NetworkApi, lookup: &Lookup) -> Result<Vec<SecurityGroup>> {
    api.describe_security_groups(lookup).await.map_err(|e| {
        NetworkError::from_provider(format!("unable to describe security groups by {}", lookup), e)
    })
}
