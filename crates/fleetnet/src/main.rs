mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fleetnet")]
#[command(about = "ワークロードの VPC・サブネット・セキュリティグループを用意する", long_about = None)]
struct Cli {
    /// 設定ファイルのパス（省略時は net.kdl を探索）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// AWS リージョン（設定ファイルの region より優先）
    #[arg(long, global = true)]
    region: Option<String>,

    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 何が再利用され、何が作成されるかを表示（変更なし）
    Plan {
        /// ワークロード名（省略時はプロジェクト名）
        #[arg(short, long)]
        workload: Option<String>,
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// 足りないリソースを作成
    Up {
        /// ワークロード名（セキュリティグループ名の元になる）
        #[arg(short, long)]
        workload: Option<String>,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// 設定を検証
    Validate,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr に出力
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("fleetnet {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (config_path, project) = utils::load_project(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan { workload, json } => {
            commands::plan::handle(&project, cli.region.as_deref(), workload, json).await?;
        }
        Commands::Up { workload, yes } => {
            commands::up::handle(&project, cli.region.as_deref(), workload, yes).await?;
        }
        Commands::Validate => {
            commands::validate::handle(&config_path, &project);
        }
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }

    Ok(())
}
