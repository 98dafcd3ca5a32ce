//! 集計ライブラリのエラー型

use std::path::PathBuf;

/// 結果表・設定ファイルの読み込みエラー
///
/// 対戦の欠損や分母0はエラーにしない（[`crate::filter::MissingCombination`] 参照）。
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// 入力ファイルが存在しない
    #[error("data unavailable: {} not found", path.display())]
    DataUnavailable { path: PathBuf },

    /// CSVとして読めない
    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// 設定ファイルとして読めない
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StatsResult<T> = Result<T, StatsError>;
