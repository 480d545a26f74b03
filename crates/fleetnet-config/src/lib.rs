pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// 設定ファイルパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "FLEETNET_CONFIG_PATH";

const CANDIDATES: [&str; 4] = ["net.local.kdl", ".net.local.kdl", "net.kdl", ".net.kdl"];

/// プロジェクトのnet.kdlファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 FLEETNET_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: net.local.kdl, .net.local.kdl, net.kdl, .net.kdl
/// 3. ./.fleetnet/ ディレクトリ内: 同様の順序
/// 4. ~/.config/fleetnet/net.kdl (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;

    // 2. カレントディレクトリで検索
    if let Some(path) = first_existing(&current_dir) {
        return Ok(path);
    }

    // 3. ./.fleetnet/ ディレクトリで検索
    let net_dir = current_dir.join(".fleetnet");
    if net_dir.is_dir()
        && let Some(path) = first_existing(&net_dir)
    {
        return Ok(path);
    }

    // 4. グローバル設定ファイル (~/.config/fleetnet/net.kdl)
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("fleetnet").join("net.kdl");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// `--config` 指定があればそれを、なければ [`find_config_file`] の結果を返す
pub fn resolve_config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => Err(ConfigError::ExplicitPathNotFound(path.to_path_buf())),
        None => find_config_file(),
    }
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| dir.join(filename))
        .find(|path| path.exists())
}
