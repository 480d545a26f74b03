use colored::Colorize;
use fleetnet_core::Project;
use std::path::Path;

pub fn handle(config_path: &Path, project: &Project) {
    let network = &project.network;
    let or_unset = |value: &str, unset: &str| {
        if value.is_empty() {
            unset.dimmed().to_string()
        } else {
            value.cyan().to_string()
        }
    };
    let join = |ports: &[fleetnet_cloud::PortSpec]| {
        ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!(
        "設定ファイル: {}",
        config_path.display().to_string().cyan()
    );
    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!("  プロジェクト: {}", project.name.cyan());
    println!(
        "  リージョン: {}",
        or_unset(project.region.as_deref().unwrap_or(""), "(AWS の設定に従う)")
    );
    println!("  vpc: {}", or_unset(&network.network, "(デフォルト VPC)"));
    println!("  subnet: {}", or_unset(&network.subnet, "(先頭のサブネット)"));
    println!(
        "  security-group: {}",
        or_unset(&network.security_group, "(ワークロードごとに作成)")
    );
    if network.has_ports() {
        println!("  tcp: {}", join(&network.ports));
        println!("  udp: {}", join(&network.udp_ports));
    }
    if network.enable_ipv6 {
        println!("  ipv6: 有効");
    }
    for tag in &network.tags {
        println!("  tag: {}={}", tag.key, tag.value);
    }
}
