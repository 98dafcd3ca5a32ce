//! 結果表1行の引き分け特性とリシャッフルの結果

use serde::Serialize;

use crate::stats::percent;
use crate::types::ResultRow;

/// カテゴリの件数と、その行の引き分けに占める割合
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct CategoryShare {
    pub count: u32,
    pub pct: f64,
}

impl CategoryShare {
    fn of(count: u32, draws: u32) -> Self {
        Self {
            count,
            pct: percent(f64::from(count), f64::from(draws)),
        }
    }
}

/// 1行の引き分けの進捗カテゴリ
///
/// カテゴリはシミュレータの記録どおりで排他ではない。`similar` と `*_ahead` の
/// 両方に数えられる局があるため、割合の合計は100%にならないことがある。
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DrawProfile {
    pub draws: u32,
    /// 両者とも進捗70%以上
    pub both_high: CategoryShare,
    /// 両者とも70%未満
    pub both_stuck: CategoryShare,
    /// 進捗差が15ポイント以内
    pub similar: CategoryShare,
    /// 片側カテゴリ2つの合計
    pub asymmetric: CategoryShare,
    pub p1_ahead: CategoryShare,
    pub p2_ahead: CategoryShare,
    pub avg_p1_progress: f64,
    pub avg_p2_progress: f64,
}

impl DrawProfile {
    pub fn from_row(row: &ResultRow) -> Self {
        let draws = row.draws;
        Self {
            draws,
            both_high: CategoryShare::of(row.draw_both_high_progress, draws),
            both_stuck: CategoryShare::of(row.draw_both_stuck, draws),
            similar: CategoryShare::of(row.draw_similar_progress, draws),
            asymmetric: CategoryShare::of(
                row.draw_p1_stuck_p2_ahead + row.draw_p2_stuck_p1_ahead,
                draws,
            ),
            p1_ahead: CategoryShare::of(row.draw_p2_stuck_p1_ahead, draws),
            p2_ahead: CategoryShare::of(row.draw_p1_stuck_p2_ahead, draws),
            avg_p1_progress: avg_or_zero(row.draw_avg_p1_progress),
            avg_p2_progress: avg_or_zero(row.draw_avg_p2_progress),
        }
    }
}

/// 空欄・NaN は0として扱う
fn avg_or_zero(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0)
}

/// 1回以上リシャッフルした対局のその後
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReshuffleResolution {
    pub games_reshuffled: u32,
    pub wins_after_reshuffle: u32,
    /// リシャッフル後に勝敗がついた割合
    pub resolution_pct: f64,
    /// 再び引き分けた割合
    pub drew_again_pct: f64,
}

impl ReshuffleResolution {
    pub fn from_row(row: &ResultRow) -> Self {
        let resolution_pct =
            percent(f64::from(row.wins_after_reshuffle), f64::from(row.games_reshuffled));
        let drew_again_pct = if row.games_reshuffled == 0 { 0.0 } else { 100.0 - resolution_pct };
        Self {
            games_reshuffled: row.games_reshuffled,
            wins_after_reshuffle: row.wins_after_reshuffle,
            resolution_pct,
            drew_again_pct,
        }
    }

    pub fn has_reshuffles(&self) -> bool {
        self.games_reshuffled > 0
    }
}
