//! fleetnet Cloud Network Substrate
//!
//! This crate resolves and provisions the network substrate a workload needs
//! before it can be deployed into a cloud account: a virtual network (VPC),
//! a subnet, and a security group.
//!
//! Desired settings are names or IDs supplied by the user; actual cloud state
//! may be partial, ambiguous, or absent. Resolvers reconcile the two
//! read-only, provisioners create what is missing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  fleetnet CLI                    │
//! │              (fleetnet plan / up)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                fleetnet-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │ substrate: network → subnet → sec group  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Resolvers   │  │ Provisioners │            │
//! │  └──────────────┘  └──────────────┘            │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          trait NetworkApi { ... }         │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ fleetnet-     │
//!           │ cloud-aws     │
//!           └───────────────┘
//! ```

pub mod action;
pub mod cidr;
pub mod config;
pub mod error;
pub mod firewall;
pub mod model;
pub mod network;
pub mod provider;
pub mod provision;
pub mod security_group;
pub mod select;
pub mod subnet;
pub mod substrate;
pub mod tags;

// Re-exports
pub use action::{Action, ActionType, Plan, PlanSummary, ResourceKind};
pub use cidr::{CidrAllocator, SequentialCidrAllocator};
pub use config::SubstrateConfig;
pub use error::{NetworkError, ProviderError, ProviderErrorKind, ProviderResult, Result};
pub use firewall::{PortSpec, build_rule, build_rules};
pub use model::{FirewallRule, Network, Protocol, SecurityGroup, Subnet, Tag};
pub use network::resolve_network;
pub use provider::{
    CreateNetworkRequest, CreateSecurityGroupRequest, CreateSubnetRequest, Lookup, NetworkApi,
};
pub use provision::{NetworkProvisioning, create_network, create_security_group};
pub use security_group::resolve_security_group;
pub use subnet::resolve_subnet;
pub use substrate::{Substrate, ensure_substrate, plan_substrate};
pub use tags::build_tags;
