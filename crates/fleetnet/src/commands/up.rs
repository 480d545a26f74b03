use crate::utils;
use colored::Colorize;
use fleetnet_cloud::{NetworkApi, SequentialCidrAllocator, ensure_substrate, plan_substrate};
use fleetnet_core::Project;

pub async fn handle(
    project: &Project,
    region: Option<&str>,
    workload: Option<String>,
    yes: bool,
) -> anyhow::Result<()> {
    let workload = utils::workload_name(project, workload);
    println!("{}", "ネットワーク基盤を準備します...".blue().bold());
    println!("ワークロード: {}", workload.cyan());

    let api = utils::connect(project, region).await;
    println!("プロバイダー: {}", api.name().cyan());
    let plan = plan_substrate(&api, &project.network, &workload).await?;

    println!();
    utils::print_plan(&plan);

    if !plan.has_changes() {
        println!("{}", "✓ 作成が必要なリソースはありません".green());
    }

    // 確認（--yesが指定されていない場合）
    if !yes {
        if plan.has_changes() {
            println!();
            println!("実行するには --yes オプションを指定してください");
        }
        return Ok(());
    }

    let substrate =
        ensure_substrate(&api, &SequentialCidrAllocator, &project.network, &workload).await?;

    println!();
    println!("{}", "✓ ネットワーク基盤の準備が完了しました".green().bold());
    println!(
        "  vpc:            {} ({})",
        substrate.network.id.cyan(),
        substrate.network.cidr_block
    );
    println!(
        "  subnet:         {} ({})",
        substrate.subnet.id.cyan(),
        substrate.subnet.cidr_block
    );
    println!(
        "  security-group: {} ({})",
        substrate.security_group.id.cyan(),
        substrate.security_group.name
    );
    println!("  {}", substrate.applied.summary());

    Ok(())
}
