//! network ノードのパース

use crate::error::Result;
use fleetnet_cloud::{NetworkError, PortSpec, SubstrateConfig, Tag};
use kdl::{KdlEntry, KdlNode};
use tracing::warn;

/// network ノードをパース
///
/// 名前は省略可能（省略時はデフォルト VPC を使う）。
pub fn parse_network(node: &KdlNode) -> Result<SubstrateConfig> {
    let mut config = SubstrateConfig {
        network: first_string(node).unwrap_or_default(),
        ..Default::default()
    };

    let Some(children) = node.children() else {
        return Ok(config);
    };

    for child in children.nodes() {
        match child.name().value() {
            "subnet" => {
                config.subnet = first_string(child).unwrap_or_default();
            }
            "security-group" | "security_group" => {
                config.security_group = first_string(child).unwrap_or_default();
            }
            "ipv6" | "enable-ipv6" | "enable_ipv6" => {
                config.enable_ipv6 = child
                    .entries()
                    .first()
                    .and_then(|e| e.value().as_bool())
                    .unwrap_or(true);
            }
            "ports" => {
                config.ports = parse_ports(child)?;
            }
            "udp-ports" | "udp_ports" => {
                config.udp_ports = parse_ports(child)?;
            }
            "tags" => {
                // 例: tags { team "infra" }
                if let Some(tags) = child.children() {
                    for tag in tags.nodes() {
                        let value = first_string(tag).unwrap_or_default();
                        config.tags.push(Tag::new(tag.name().value(), value));
                    }
                }
            }
            other => {
                warn!(node = other, "unknown node in network block, ignoring");
            }
        }
    }

    Ok(config)
}

fn first_string(node: &KdlNode) -> Option<String> {
    node.entries()
        .first()
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

/// 引数のポート指定をすべて検証する
///
/// `"80"`, `"8000-8010"`, `443` のいずれも受け付ける。
fn parse_ports(node: &KdlNode) -> Result<Vec<PortSpec>> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .map(parse_port_entry)
        .collect()
}

fn parse_port_entry(entry: &KdlEntry) -> Result<PortSpec> {
    // 整数も文字列と同じ検証を通す
    let spec = match (entry.value().as_string(), entry.value().as_integer()) {
        (Some(spec), _) => spec.to_string(),
        (None, Some(port)) => port.to_string(),
        (None, None) => {
            return Err(NetworkError::ConfigurationInvalid(format!(
                "port must be a string or an integer: {}",
                entry.value()
            ))
            .into());
        }
    };
    Ok(PortSpec::parse(&spec)?)
}
