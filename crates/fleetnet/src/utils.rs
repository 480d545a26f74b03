use anyhow::Context;
use colored::Colorize;
use fleetnet_cloud::{ActionType, NetworkApi, Plan};
use fleetnet_cloud_aws::Ec2NetworkApi;
use fleetnet_core::Project;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 設定ファイルを探してパースする
pub fn load_project(explicit: Option<&Path>) -> anyhow::Result<(PathBuf, Project)> {
    let path = fleetnet_config::resolve_config_file(explicit)?;
    let project = fleetnet_core::parse_kdl_file(&path)
        .with_context(|| format!("{} の読み込みに失敗しました", path.display()))?;
    Ok((path, project))
}

/// リージョンの決定: --region > 設定ファイル > AWS の環境設定
pub async fn connect(project: &Project, region: Option<&str>) -> Ec2NetworkApi {
    let region = region.or(project.region.as_deref());
    let api = Ec2NetworkApi::from_env(region).await;
    debug!(provider = api.name(), region = ?region, "connected");
    api
}

pub fn workload_name(project: &Project, workload: Option<String>) -> String {
    workload.unwrap_or_else(|| project.default_workload().to_string())
}

pub fn print_plan(plan: &Plan) {
    for action in &plan.actions {
        let marker = match action.action_type {
            ActionType::Create => "+".green().bold(),
            ActionType::Reuse => "=".dimmed(),
        };
        println!(
            "  {} {:<15} {} ({})",
            marker,
            action.resource_kind.to_string(),
            action.resource_id.cyan(),
            action.description
        );
    }
    println!();
    println!("{}", plan.summary().to_string().bold());
}
