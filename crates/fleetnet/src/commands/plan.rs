use crate::utils;
use colored::Colorize;
use fleetnet_cloud::{NetworkApi, plan_substrate};
use fleetnet_core::Project;

pub async fn handle(
    project: &Project,
    region: Option<&str>,
    workload: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let workload = utils::workload_name(project, workload);
    if !json {
        println!("{}", "ネットワーク基盤を確認中...".blue());
        println!("ワークロード: {}", workload.cyan());
    }

    let api = utils::connect(project, region).await;
    if !json {
        println!("プロバイダー: {}", api.name().cyan());
    }
    let plan = plan_substrate(&api, &project.network, &workload).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!();
    utils::print_plan(&plan);
    Ok(())
}
