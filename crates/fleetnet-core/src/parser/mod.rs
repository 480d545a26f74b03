//! KDLパーサー
//!
//! fleetnet の KDL 設定ファイルをパースします。

mod network;

pub use network::parse_network;

use crate::error::{ProjectError, Result};
use crate::model::Project;
use kdl::KdlDocument;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// KDLファイルをパースしてProjectを生成
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<Project> {
    let content = fs::read_to_string(path.as_ref())?;
    let name = path
        .as_ref()
        .canonicalize()
        .ok()
        .as_deref()
        .and_then(|p| p.parent())
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();
    debug!(path = %path.as_ref().display(), "parsing config file");
    parse_kdl_string(&content, name)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str, default_name: String) -> Result<Project> {
    let doc: KdlDocument = content.parse()?;

    let mut project = Project {
        name: default_name,
        ..Default::default()
    };
    let mut seen_network = false;

    for node in doc.nodes() {
        match node.name().value() {
            "project" => {
                if let Some(name) = node.entries().first().and_then(|e| e.value().as_string()) {
                    project.name = name.to_string();
                }
            }
            "region" => {
                project.region = node
                    .entries()
                    .first()
                    .and_then(|e| e.value().as_string())
                    .map(|s| s.to_string());
            }
            "network" => {
                if seen_network {
                    return Err(ProjectError::InvalidConfig(
                        "only one network block is allowed".to_string(),
                    ));
                }
                project.network = parse_network(node)?;
                seen_network = true;
            }
            other => {
                warn!(node = other, "unknown top-level node, ignoring");
            }
        }
    }

    Ok(project)
}
