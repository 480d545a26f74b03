//! モデル定義

mod project;

pub use project::*;
