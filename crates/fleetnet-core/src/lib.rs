//! fleetnet Core
//!
//! `net.kdl` のプロジェクト設定モデルとパーサー。
//! パース結果は検証済みの [`Project`] で、ネットワーク設定は
//! そのまま `fleetnet-cloud` の [`fleetnet_cloud::SubstrateConfig`] として渡せる。

pub mod error;
pub mod model;
pub mod parser;

pub use error::{ProjectError, Result};
pub use model::Project;
pub use parser::{parse_kdl_file, parse_kdl_string};
