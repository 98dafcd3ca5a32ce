//! 1つの対戦を構成をまたいで集計する

use serde::Serialize;

use crate::stats::{binomial_p_greater, mean, median, win_rate};
use crate::types::{NervousnessConfig, ResultRow};

/// 構成ごとの勝率帯（3つは重ならない）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WinRateBand {
    Below,
    Clustered,
    Above,
}

/// 中央の帯の境界（両端を含む）
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BandBounds {
    pub low: f64,
    pub high: f64,
}

impl Default for BandBounds {
    fn default() -> Self {
        Self { low: 52.0, high: 68.0 }
    }
}

impl BandBounds {
    pub fn classify(self, rate: f64) -> WinRateBand {
        if rate < self.low {
            WinRateBand::Below
        } else if rate <= self.high {
            WinRateBand::Clustered
        } else {
            WinRateBand::Above
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BestConfig {
    pub config: NervousnessConfig,
    pub win_rate: f64,
    pub decisive_games: u32,
    pub draw_pct: f64,
}

/// 1つの対戦の全構成にわたる P1 勝率の分布
///
/// 決着局のない構成は勝率を持たないので除く。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfigSpread {
    /// 決着局のない構成も含めた行数
    pub configurations: usize,
    pub win_rates: Vec<f64>,
    pub draw_rates: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub bounds: BandBounds,
    pub below: usize,
    pub clustered: usize,
    pub above: usize,
    pub best: BestConfig,
}

impl ConfigSpread {
    pub fn from_rows(rows: &[&ResultRow], bounds: BandBounds) -> Option<Self> {
        let decisive: Vec<&ResultRow> =
            rows.iter().copied().filter(|r| r.decisive_games > 0).collect();
        let first = decisive.first()?;

        let win_rates: Vec<f64> = decisive.iter().map(|r| r.p1_win_rate()).collect();
        let draw_rates: Vec<f64> = decisive.iter().map(|r| r.draw_pct).collect();

        let mut best = *first;
        for &r in &decisive[1..] {
            if r.p1_win_rate() > best.p1_win_rate() {
                best = r;
            }
        }

        let (mut below, mut clustered, mut above) = (0, 0, 0);
        for &wr in &win_rates {
            match bounds.classify(wr) {
                WinRateBand::Below => below += 1,
                WinRateBand::Clustered => clustered += 1,
                WinRateBand::Above => above += 1,
            }
        }

        Some(Self {
            configurations: rows.len(),
            min: win_rates.iter().copied().fold(f64::INFINITY, f64::min),
            max: win_rates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: mean(&win_rates),
            median: median(&win_rates),
            win_rates,
            draw_rates,
            bounds,
            below,
            clustered,
            above,
            best: BestConfig {
                config: best.config_name,
                win_rate: best.p1_win_rate(),
                decisive_games: best.decisive_games,
                draw_pct: best.draw_pct,
            },
        })
    }

    pub fn counted(&self) -> usize {
        self.win_rates.len()
    }
}

/// 全構成の勝敗を合算したもの。構成ごとでは決着局が少なすぎる対戦で使う
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PooledResult {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub total_games: u32,
    pub decisive: u32,
    pub win_rate: f64,
    pub p_value: f64,
}

impl PooledResult {
    pub fn from_rows(rows: &[&ResultRow]) -> Self {
        let p1_wins: u32 = rows.iter().map(|r| r.p1_wins).sum();
        let p2_wins: u32 = rows.iter().map(|r| r.p2_wins).sum();
        let total_games: u32 = rows.iter().map(|r| r.total_games).sum();
        let decisive = p1_wins + p2_wins;
        Self {
            p1_wins,
            p2_wins,
            total_games,
            decisive,
            win_rate: win_rate(p1_wins, decisive),
            p_value: binomial_p_greater(p1_wins, decisive),
        }
    }
}
