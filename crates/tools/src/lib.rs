//! 対戦結果レポート・図の生成ツール
//!
//! 集計そのものは `mjstats-core` が持ち、ここには各バイナリが共有する
//! 入出力・ロガー初期化とPNG描画を置く。

pub mod common;
pub mod render;
