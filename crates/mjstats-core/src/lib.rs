//! 麻雀エージェント対戦結果の集計
//!
//! 結果表・引き分け詳細表を読み込み、勝率・信頼区間・二項検定・引き分け特性を
//! 集計して、論文用レポートと図の系列データを作る。
//!
//! - [`table`]: CSV（.gz 可）の読み込み
//! - [`filter`]: 対戦・構成による行の選択
//! - [`stats`]: 勝率・信頼区間・二項検定・記述統計
//! - [`aggregate`]: 構成をまたいだ集計
//! - [`draws`]: 引き分け特性とリシャッフル
//! - [`classify`]: 引き分けの分類
//! - [`report`]: テキストレポート
//! - [`charts`]: 図の系列データ

pub mod aggregate;
pub mod charts;
pub mod classify;
pub mod config;
pub mod draws;
pub mod error;
pub mod filter;
pub mod report;
pub mod stats;
pub mod table;
pub mod types;

pub use classify::{DrawType, ProgressThresholds};
pub use config::AnalysisConfig;
pub use error::{StatsError, StatsResult};
pub use report::{DrawSummary, PaperReport};
pub use types::{
    DrawDetailRow, MatchupGroup, NervousnessConfig, OverlapCategory, Pairing, ResultRow, Strategy,
};
