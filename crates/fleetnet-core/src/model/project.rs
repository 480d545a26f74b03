//! プロジェクト設定モデル

use fleetnet_cloud::SubstrateConfig;
use serde::{Deserialize, Serialize};

/// `net.kdl` 1 ファイル分の設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// プロジェクト名（`project` ノード、未指定ならディレクトリ名）
    pub name: String,

    /// AWS リージョン（未指定なら環境の設定に従う）
    pub region: Option<String>,

    /// ネットワーク基盤の設定
    pub network: SubstrateConfig,
}

impl Project {
    /// セキュリティグループ名の元になるワークロード名
    pub fn default_workload(&self) -> &str {
        &self.name
    }
}
