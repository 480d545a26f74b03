use fleetnet_cloud::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    /// ポート指定などネットワーク設定値の検証エラー
    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type Result<T> = std::result::Result<T, ProjectError>;
