//! Subnet resolution

use crate::error::{NetworkError, Result};
use crate::model::Subnet;
use crate::provider::{Lookup, NetworkApi};
use crate::select::pick_preferred;

/// Resolve a subnet of `network_id`.
///
/// A non-empty `name` is tried as a `Name` tag first and then as a literal
/// subnet ID. Among several matches for a name, the default subnet of its
/// availability zone wins; otherwise the first listed is used.
pub async fn resolve_subnet(api: &dyn NetworkApi, network_id: &str, name: &str) -> Result<Subnet> {
    let subnets = if name.is_empty() {
        tracing::debug!("Getting subnets of vpc {}", network_id);
        describe(api, network_id, &Lookup::All).await?
    } else {
        tracing::debug!("Getting subnets of vpc {} named {}", network_id, name);
        let by_name = describe(api, network_id, &Lookup::ByName(name.to_string())).await?;
        if by_name.is_empty() {
            tracing::debug!("No subnets named {}, trying it as a subnet id", name);
            describe_absent_as_empty(api, network_id, &Lookup::ById(name.to_string())).await?
        } else {
            by_name
        }
    };

    let picked = if name.is_empty() {
        subnets.into_iter().next()
    } else {
        pick_preferred(subnets, |s| s.default_for_az)
    };

    picked.ok_or_else(|| {
        if name.is_empty() {
            NetworkError::NotFound(
                "no subnets found to associate security group with".to_string(),
            )
        } else {
            NetworkError::NotFound(format!(
                "no subnets with name '{}' found to associate security group with",
                name
            ))
        }
    })
}

/// Fetch one subnet of `network_id` by its provider identifier
pub async fn get_subnet_by_id(api: &dyn NetworkApi, network_id: &str, id: &str) -> Result<Subnet> {
    describe(api, network_id, &Lookup::ById(id.to_string()))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NetworkError::NotFound(format!("subnet '{}' not found", id)))
}

async fn describe(api: &dyn NetworkApi, network_id: &str, lookup: &Lookup) -> Result<Vec<Subnet>> {
    api.describe_subnets(network_id, lookup).await.map_err(|e| {
        NetworkError::from_provider(format!("unable to describe subnets by {}", lookup), e)
    })
}

/// ID lookups of something that is not a subnet ID come back as provider
/// errors; those mean "no such subnet" here.
async fn describe_absent_as_empty(
    api: &dyn NetworkApi,
    network_id: &str,
    lookup: &Lookup,
) -> Result<Vec<Subnet>> {
    match api.describe_subnets(network_id, lookup).await {
        Ok(subnets) => Ok(subnets),
        Err(e) if e.is_absent() => {
            tracing::debug!("Subnet lookup by {} found nothing: {}", lookup, e);
            Ok(Vec::new())
        }
        Err(e) => Err(NetworkError::from_provider(
            format!("unable to describe subnets by {}", lookup),
            e,
        )),
    }
}
