//! fleetnet AWS provider
//!
//! Implements [`fleetnet_cloud::NetworkApi`] on top of `aws-sdk-ec2`.
//! EC2 error codes are classified into [`fleetnet_cloud::ProviderErrorKind`]
//! at this boundary.
//!
//! ```no_run
//! # async fn run() -> fleetnet_cloud::Result<()> {
//! use fleetnet_cloud::resolve_network;
//! use fleetnet_cloud_aws::Ec2NetworkApi;
//!
//! let api = Ec2NetworkApi::from_env(Some("ap-northeast-1")).await;
//! let network = resolve_network(&api, "my-vpc").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod convert;
pub mod error;

pub use client::Ec2NetworkApi;
pub use error::classify_code;
