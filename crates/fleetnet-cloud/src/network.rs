//! Network (VPC) resolution

use crate::error::{NetworkError, Result};
use crate::model::Network;
use crate::provider::{Lookup, NetworkApi};
use crate::select::pick_preferred;

/// Prefix of provider network identifiers
pub const NETWORK_ID_PREFIX: &str = "vpc-";

/// Whether `s` looks like a network identifier rather than a name
pub fn is_network_id(s: &str) -> bool {
    s.starts_with(NETWORK_ID_PREFIX)
}

/// Resolve the network to deploy into.
///
/// With a non-empty `name`, networks tagged with that name are looked up
/// first, then (only if `name` is ID-shaped) the network with that ID.
/// `Ok(None)` means nothing matched and the caller should create the
/// network.
///
/// With an empty `name`, the account's default network is returned, or the
/// first one listed if none is flagged default.
pub async fn resolve_network(api: &dyn NetworkApi, name: &str) -> Result<Option<Network>> {
    if name.is_empty() {
        tracing::debug!("No vpc name specified, listing all vpcs");
        let networks = describe(api, &Lookup::All).await?;
        let network = pick_preferred(networks, |n| n.is_default)
            .ok_or_else(|| NetworkError::NotFound("no VPCs found".to_string()))?;
        if network.is_default {
            tracing::debug!("Picking default vpc {}", network.id);
        } else {
            tracing::debug!("No default vpc found, picking {}", network.id);
        }
        return Ok(Some(network));
    }

    tracing::debug!("Getting vpcs filtered by name {}", name);
    let mut networks = describe(api, &Lookup::ByName(name.to_string())).await?;

    if networks.is_empty() {
        if !is_network_id(name) {
            tracing::debug!("No vpcs with name {} found", name);
            return Ok(None);
        }

        tracing::debug!("Getting vpcs filtered by id {}", name);
        networks = describe(api, &Lookup::ById(name.to_string())).await?;
    }

    tracing::debug!(
        "Found {} vpcs that match the criteria {}",
        networks.len(),
        name
    );

    networks
        .into_iter()
        .next()
        .map(Some)
        .ok_or_else(|| NetworkError::NotFound(format!("no VPC with name or ID '{}' found", name)))
}

/// Fetch one network by its provider identifier
pub async fn get_network_by_id(api: &dyn NetworkApi, id: &str) -> Result<Network> {
    describe(api, &Lookup::ById(id.to_string()))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NetworkError::NotFound(format!("VPC '{}' not found", id)))
}

async fn describe(api: &dyn NetworkApi, lookup: &Lookup) -> Result<Vec<Network>> {
    api.describe_networks(lookup)
        .await
        .map_err(|e| NetworkError::from_provider(format!("unable to describe VPCs by {}", lookup), e))
}
