//! 図ごとの系列データ
//!
//! 描画ライブラリに依存しない純粋な導出のみを置く。PNG化は `tools::render`。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{DrawTypeCounts, ProgressThresholds};
use crate::draws::DrawProfile;
use crate::filter::{baseline_row, row_or_default, rows_for};
use crate::stats::{BoxStats, Histogram, ci95_half_width, mean, median, percent, std_dev};
use crate::types::{
    DRAW_TABLE_PAIRINGS, DrawDetailRow, MatchupGroup, NervousnessConfig, OverlapCategory,
    Pairing, ResultRow, STRATEGIC_PAIRINGS, Strategy, WIN_RATE_PAIRINGS,
};

/// 進捗差ヒストグラムのビン数
pub const DIFF_BINS: usize = 30;
/// 合計進捗ヒストグラムのビン数
pub const SUM_BINS: usize = 20;
/// ヒートマップの1辺のセル数（幅10%）
pub const HEATMAP_CELLS: usize = 10;

// ---------------------------------------------------------------------------
// 結果表から導出する図
// ---------------------------------------------------------------------------

/// 勝率棒グラフの1対戦分
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinRateBar {
    pub pairing: Pairing,
    pub p1_rate: f64,
    pub p2_rate: f64,
    pub p1_ci: f64,
    pub p2_ci: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WinRateChart {
    pub bars: Vec<WinRateBar>,
}

impl WinRateChart {
    /// 欠けている対戦は0で埋める（警告は `row_or_default` が出す）
    pub fn from_rows(rows: &[ResultRow], config: NervousnessConfig) -> Self {
        let bars = WIN_RATE_PAIRINGS
            .iter()
            .map(|&pairing| {
                let r = row_or_default(rows, pairing, config);
                WinRateBar {
                    pairing,
                    p1_rate: r.p1_win_rate(),
                    p2_rate: r.p2_win_rate(),
                    p1_ci: ci95_half_width(r.p1_wins, r.decisive_games),
                    p2_ci: ci95_half_width(r.p2_wins, r.decisive_games),
                }
            })
            .collect();
        Self { bars }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawBar {
    pub pairing: Pairing,
    pub group: MatchupGroup,
    pub draw_pct: f64,
    pub overlap_pct: f64,
}

/// 引き分け率（上段）とパターン重なり率（下段）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawAnalysisChart {
    pub bars: Vec<DrawBar>,
}

impl DrawAnalysisChart {
    pub fn from_rows(rows: &[ResultRow], config: NervousnessConfig) -> Self {
        let bars = DRAW_TABLE_PAIRINGS
            .iter()
            .map(|&pairing| {
                let r = row_or_default(rows, pairing, config);
                DrawBar {
                    pairing,
                    group: pairing.group(),
                    draw_pct: r.draw_pct,
                    overlap_pct: r.draw_pattern_overlap_pct,
                }
            })
            .collect();
        Self { bars }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NervousnessSeries {
    pub pairing: Pairing,
    /// 構成ごとの平均引き分け率。行のない構成は含めない
    pub points: Vec<(NervousnessConfig, f64)>,
}

/// 神経質さの構成ごとの引き分け率（戦略エージェント同士の3対戦）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NervousnessChart {
    pub series: Vec<NervousnessSeries>,
}

impl NervousnessChart {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        let series = STRATEGIC_PAIRINGS
            .iter()
            .map(|&pairing| {
                let points = NervousnessConfig::ALL
                    .iter()
                    .filter_map(|&config| {
                        let draws: Vec<f64> =
                            rows_for(rows, pairing, config).iter().map(|r| r.draw_pct).collect();
                        (!draws.is_empty()).then(|| (config, mean(&draws)))
                    })
                    .collect();
                NervousnessSeries { pairing, points }
            })
            .collect();
        Self { series }
    }
}

/// 進捗平面の領域とその割合
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionLabel {
    pub name: &'static str,
    pub pct: f64,
    /// ラベルを置く位置（進捗%座標）
    pub x: f64,
    pub y: f64,
}

/// Bayesian 同士の平均進捗点と4領域
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressRegionChart {
    pub avg_p1: f64,
    pub avg_p2: f64,
    pub threshold: f64,
    pub regions: Vec<RegionLabel>,
}

impl ProgressRegionChart {
    /// 基準構成の行がなければ `None`（図は作らない）
    pub fn from_rows(
        rows: &[ResultRow],
        config: NervousnessConfig,
        thresholds: ProgressThresholds,
    ) -> Option<Self> {
        let row = baseline_row(rows, Pairing::new(Strategy::Bayesian, Strategy::Bayesian), config)?;
        let p = DrawProfile::from_row(row);
        let (hi, lo) = (85.0, 40.0);
        Some(Self {
            avg_p1: p.avg_p1_progress,
            avg_p2: p.avg_p2_progress,
            threshold: thresholds.high,
            regions: vec![
                RegionLabel { name: "Both High", pct: p.both_high.pct, x: hi, y: hi },
                RegionLabel { name: "P1 Ahead / P2 Stuck", pct: p.p1_ahead.pct, x: hi, y: lo },
                RegionLabel { name: "P2 Ahead / P1 Stuck", pct: p.p2_ahead.pct, x: lo, y: hi },
                RegionLabel { name: "Both Stuck", pct: p.both_stuck.pct, x: lo, y: lo },
            ],
        })
    }
}

/// 積み上げ棒の1本（単位はすべて全対局に対する%）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReshuffleBar {
    pub pairing: Pairing,
    pub won_before: f64,
    pub won_after: f64,
    pub drew: f64,
}

impl ReshuffleBar {
    fn from_row(pairing: Pairing, row: Option<&ResultRow>) -> Self {
        let Some(r) = row else {
            return Self { pairing, won_before: 0.0, won_after: 0.0, drew: 0.0 };
        };
        let won_after = if r.games_reshuffled > 0 {
            percent(f64::from(r.wins_after_reshuffle), f64::from(r.total_games))
        } else {
            0.0
        };
        Self {
            pairing,
            won_before: 100.0 - r.reshuffle_pct,
            won_after,
            drew: r.draw_pct,
        }
    }

    pub fn total(&self) -> f64 {
        self.won_before + self.won_after + self.drew
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReshuffleChart {
    pub bars: Vec<ReshuffleBar>,
}

impl ReshuffleChart {
    pub fn from_rows(rows: &[ResultRow], config: NervousnessConfig) -> Self {
        let bars = DRAW_TABLE_PAIRINGS
            .iter()
            .map(|&pairing| ReshuffleBar::from_row(pairing, baseline_row(rows, pairing, config)))
            .collect();
        Self { bars }
    }
}

// ---------------------------------------------------------------------------
// 引き分け詳細表から導出する図
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// 色付けに使うパターン重なり率
    pub overlap: f64,
}

/// P1 進捗 vs P2 進捗
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressScatter {
    pub points: Vec<ScatterPoint>,
    pub threshold: f64,
}

impl ProgressScatter {
    pub fn from_details(rows: &[DrawDetailRow], thresholds: ProgressThresholds) -> Self {
        Self {
            points: rows
                .iter()
                .map(|r| ScatterPoint {
                    x: r.player_progress,
                    y: r.opponent_progress,
                    overlap: r.overlap_pct,
                })
                .collect(),
            threshold: thresholds.high,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchupBox {
    pub pairing: Pairing,
    pub stats: BoxStats,
}

/// 進捗差（P1 - P2）の分布と対戦別の箱ひげ
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressDifferences {
    pub histogram: Histogram,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// 中央値の昇順
    pub by_matchup: Vec<MatchupBox>,
}

impl ProgressDifferences {
    pub fn from_details(rows: &[DrawDetailRow]) -> Self {
        let diffs: Vec<f64> = rows.iter().map(DrawDetailRow::progress_diff).collect();

        let mut groups: BTreeMap<Pairing, Vec<f64>> = BTreeMap::new();
        for r in rows {
            groups.entry(r.pairing()).or_default().push(r.progress_diff());
        }
        let mut by_matchup: Vec<MatchupBox> = groups
            .into_iter()
            .filter_map(|(pairing, v)| BoxStats::from_values(&v).map(|stats| MatchupBox { pairing, stats }))
            .collect();
        by_matchup.sort_by(|a, b| a.stats.median.total_cmp(&b.stats.median));

        Self {
            histogram: Histogram::auto(&diffs, DIFF_BINS),
            mean: mean(&diffs),
            median: median(&diffs),
            std_dev: std_dev(&diffs),
            by_matchup,
        }
    }
}

/// 10x10 の2次元ヒストグラム。`counts[x][y]`、x が P1 進捗
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressHeatmap {
    pub counts: [[usize; HEATMAP_CELLS]; HEATMAP_CELLS],
    pub threshold: f64,
}

impl ProgressHeatmap {
    pub const CELL_WIDTH: f64 = 100.0 / HEATMAP_CELLS as f64;

    /// [0, 100] の外は数えない。100 ちょうどは最後のセル
    pub fn from_details(rows: &[DrawDetailRow], thresholds: ProgressThresholds) -> Self {
        let mut counts = [[0usize; HEATMAP_CELLS]; HEATMAP_CELLS];
        for r in rows {
            if let (Some(x), Some(y)) = (cell(r.player_progress), cell(r.opponent_progress)) {
                counts[x][y] += 1;
            }
        }
        Self { counts, threshold: thresholds.high }
    }

    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

fn cell(v: f64) -> Option<usize> {
    if !(0.0..=100.0).contains(&v) {
        return None;
    }
    Some(((v / ProgressHeatmap::CELL_WIDTH).floor() as usize).min(HEATMAP_CELLS - 1))
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlapPanel {
    pub category: OverlapCategory,
    pub count: usize,
    pub p1_box: Option<BoxStats>,
    pub p2_box: Option<BoxStats>,
    pub p1_mean: f64,
    pub p2_mean: f64,
}

/// 重なり率カテゴリ別の進捗（箱ひげ・平均・件数）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlapPanels {
    /// [`OverlapCategory::ALL`] の順、空のカテゴリも含む
    pub panels: Vec<OverlapPanel>,
    pub threshold: f64,
}

impl OverlapPanels {
    pub fn from_details(rows: &[DrawDetailRow], thresholds: ProgressThresholds) -> Self {
        let panels = OverlapCategory::ALL
            .iter()
            .map(|&category| {
                let (p1, p2): (Vec<f64>, Vec<f64>) = rows
                    .iter()
                    .filter(|r| r.overlap_category == category)
                    .map(|r| (r.player_progress, r.opponent_progress))
                    .unzip();
                OverlapPanel {
                    category,
                    count: p1.len(),
                    p1_box: BoxStats::from_values(&p1),
                    p2_box: BoxStats::from_values(&p2),
                    p1_mean: mean(&p1),
                    p2_mean: mean(&p2),
                }
            })
            .collect();
        Self { panels, threshold: thresholds.high }
    }

    /// 件数のあるカテゴリだけ（円グラフ用）
    pub fn non_empty(&self) -> impl Iterator<Item = &OverlapPanel> {
        self.panels.iter().filter(|p| p.count > 0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SymmetryPoint {
    pub sum: f64,
    pub abs_diff: f64,
    pub overlap: f64,
}

/// 進捗の合計と非対称度、合計の分布、引き分けタイプ
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SymmetryChart {
    pub points: Vec<SymmetryPoint>,
    pub sum_histogram: Histogram,
    pub draw_types: DrawTypeCounts,
    pub thresholds: ProgressThresholds,
}

impl SymmetryChart {
    pub fn from_details(rows: &[DrawDetailRow], thresholds: ProgressThresholds) -> Self {
        let points: Vec<SymmetryPoint> = rows
            .iter()
            .map(|r| SymmetryPoint {
                sum: r.progress_sum(),
                abs_diff: r.progress_diff().abs(),
                overlap: r.overlap_pct,
            })
            .collect();
        let sums: Vec<f64> = points.iter().map(|p| p.sum).collect();
        Self {
            sum_histogram: Histogram::auto(&sums, SUM_BINS),
            draw_types: DrawTypeCounts::tally(
                rows.iter().map(|r| (r.player_progress, r.opponent_progress)),
                thresholds,
            ),
            points,
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DrawType;
    use crate::stats::win_rate;

    use crate::types::Strategy::{Bayesian, Greedy, PureRandom, RandomCommit};

    fn result(p1: Strategy, p2: Strategy, config: NervousnessConfig, wins: u32, losses: u32) -> ResultRow {
        let mut r = ResultRow::zeroed(Pairing::new(p1, p2), config);
        r.p1_wins = wins;
        r.p2_wins = losses;
        r.decisive_games = wins + losses;
        r.draws = 100;
        r.total_games = wins + losses + 100;
        r.p1_win_rate_decisive = win_rate(wins, wins + losses);
        r.draw_pct = crate::stats::percent(100.0, f64::from(r.total_games));
        r
    }

    fn detail(p1: Strategy, p2: Strategy, a: f64, b: f64, overlap: f64) -> DrawDetailRow {
        DrawDetailRow {
            p1_type: p1,
            p2_type: p2,
            player_progress: a,
            opponent_progress: b,
            overlap_pct: overlap,
            overlap_category: OverlapCategory::from_pct(overlap),
            final_turn: 50,
        }
    }

    #[test]
    fn win_rate_bars_fill_missing_pairings_with_zero() {
        let rows = vec![result(Bayesian, Greedy, NervousnessConfig::Neither, 55, 45)];
        let chart = WinRateChart::from_rows(&rows, NervousnessConfig::Neither);
        assert_eq!(chart.bars.len(), WIN_RATE_PAIRINGS.len());
        let bg = &chart.bars[1];
        assert_eq!(bg.pairing, Pairing::new(Bayesian, Greedy));
        assert_eq!(bg.p1_rate, 55.0);
        assert_eq!(bg.p2_rate, 45.0);
        assert!((bg.p1_ci - 9.750876883644876).abs() < 1e-9);
        assert!((bg.p1_ci - bg.p2_ci).abs() < 1e-9);
        for bar in chart.bars.iter().filter(|b| b.pairing != bg.pairing) {
            assert_eq!((bar.p1_rate, bar.p2_rate, bar.p1_ci), (0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn draw_bars_are_grouped_by_strategy_kind() {
        let chart = DrawAnalysisChart::from_rows(&[], NervousnessConfig::Neither);
        let groups: Vec<MatchupGroup> = chart.bars.iter().map(|b| b.group).collect();
        assert_eq!(groups[0], MatchupGroup::Strategic);
        assert_eq!(groups[3], MatchupGroup::Mixed);
        assert_eq!(groups[8], MatchupGroup::Baseline);
    }

    #[test]
    fn nervousness_averages_rows_sharing_a_label() {
        let mut a = result(Bayesian, Bayesian, NervousnessConfig::Both, 0, 0);
        a.draw_pct = 90.0;
        let mut b = result(Bayesian, Bayesian, NervousnessConfig::Both, 0, 0);
        b.draw_pct = 80.0;
        let mut c = result(Bayesian, Bayesian, NervousnessConfig::Neither, 0, 0);
        c.draw_pct = 95.0;
        let chart = NervousnessChart::from_rows(&[a, b, c]);
        assert_eq!(
            chart.series[0].points,
            vec![(NervousnessConfig::Neither, 95.0), (NervousnessConfig::Both, 85.0)]
        );
        assert!(chart.series[1].points.is_empty());
    }

    #[test]
    fn region_shares_come_from_the_draw_profile() {
        let mut bb = result(Bayesian, Bayesian, NervousnessConfig::Neither, 0, 0);
        bb.draw_both_high_progress = 2;
        bb.draw_p2_stuck_p1_ahead = 47;
        bb.draw_avg_p1_progress = Some(71.2);
        let chart =
            ProgressRegionChart::from_rows(&[bb], NervousnessConfig::Neither, ProgressThresholds::default())
                .unwrap();
        assert_eq!(chart.regions[0].pct, 2.0);
        assert_eq!(chart.regions[1].pct, 47.0);
        assert_eq!(chart.avg_p1, 71.2);
        assert!(
            ProgressRegionChart::from_rows(&[], NervousnessConfig::Neither, ProgressThresholds::default())
                .is_none()
        );
    }

    #[test]
    fn reshuffle_bars() {
        let mut r = result(Bayesian, Greedy, NervousnessConfig::Neither, 10, 10);
        r.total_games = 200;
        r.reshuffle_pct = 95.0;
        r.games_reshuffled = 190;
        r.wins_after_reshuffle = 10;
        r.draw_pct = 90.0;
        let mut no_reshuffle = result(Greedy, Greedy, NervousnessConfig::Neither, 1, 1);
        no_reshuffle.reshuffle_pct = 0.0;
        no_reshuffle.wins_after_reshuffle = 5;
        let chart = ReshuffleChart::from_rows(&[r, no_reshuffle], NervousnessConfig::Neither);

        let bg = &chart.bars[1];
        assert_eq!(bg.won_before, 5.0);
        assert_eq!(bg.won_after, 5.0);
        assert_eq!(bg.drew, 90.0);
        assert_eq!(chart.bars[2].won_after, 0.0);
        assert_eq!(chart.bars[2].won_before, 100.0);
        // 欠損は全て0
        assert_eq!(chart.bars[0].total(), 0.0);
    }

    #[test]
    fn differences_sorted_by_median() {
        let rows = vec![
            detail(Bayesian, Greedy, 80.0, 20.0, 90.0),
            detail(Bayesian, Greedy, 70.0, 30.0, 90.0),
            detail(RandomCommit, PureRandom, 10.0, 40.0, 10.0),
            detail(Greedy, Greedy, 50.0, 50.0, 100.0),
        ];
        let d = ProgressDifferences::from_details(&rows);
        let order: Vec<Pairing> = d.by_matchup.iter().map(|m| m.pairing).collect();
        assert_eq!(
            order,
            vec![
                Pairing::new(RandomCommit, PureRandom),
                Pairing::new(Greedy, Greedy),
                Pairing::new(Bayesian, Greedy)
            ]
        );
        assert_eq!(d.histogram.counts.len(), DIFF_BINS);
        assert_eq!(d.histogram.counts.iter().sum::<usize>(), 4);
        assert_eq!(d.mean, (60.0 + 40.0 - 30.0 + 0.0) / 4.0);
        assert_eq!(d.median, 20.0);
    }

    #[test]
    fn heatmap_cells_and_edges() {
        let rows = vec![
            detail(Bayesian, Bayesian, 100.0, 100.0, 100.0),
            detail(Bayesian, Bayesian, 0.0, 9.99, 100.0),
            detail(Bayesian, Bayesian, 10.0, 95.0, 100.0),
            detail(Bayesian, Bayesian, 101.0, 50.0, 100.0),
        ];
        let h = ProgressHeatmap::from_details(&rows, ProgressThresholds::default());
        assert_eq!(h.counts[9][9], 1);
        assert_eq!(h.counts[0][0], 1);
        assert_eq!(h.counts[1][9], 1);
        assert_eq!(h.total(), 3);
        assert_eq!(h.max(), 1);
    }

    #[test]
    fn overlap_panels_keep_every_category() {
        let rows = vec![
            detail(Bayesian, Greedy, 80.0, 60.0, 100.0),
            detail(Bayesian, Greedy, 60.0, 40.0, 100.0),
            detail(Bayesian, Greedy, 30.0, 30.0, 10.0),
        ];
        let panels = OverlapPanels::from_details(&rows, ProgressThresholds::default());
        assert_eq!(panels.panels.len(), OverlapCategory::ALL.len());
        let exact = &panels.panels[4];
        assert_eq!(exact.category, OverlapCategory::Exact);
        assert_eq!(exact.count, 2);
        assert_eq!(exact.p1_mean, 70.0);
        assert_eq!(exact.p2_box.unwrap().median, 50.0);
        assert!(panels.panels[1].p1_box.is_none());
        assert_eq!(panels.non_empty().count(), 2);
    }

    #[test]
    fn symmetry_counts_draw_types() {
        let rows = vec![
            detail(Bayesian, Greedy, 80.0, 75.0, 100.0),
            detail(Bayesian, Greedy, 75.0, 10.0, 100.0),
            detail(Bayesian, Greedy, 72.0, 20.0, 100.0),
        ];
        let s = SymmetryChart::from_details(&rows, ProgressThresholds::default());
        assert_eq!(s.points[0].sum, 155.0);
        assert_eq!(s.points[1].abs_diff, 65.0);
        assert_eq!(s.sum_histogram.counts.len(), SUM_BINS);
        assert_eq!(
            s.draw_types.ranked(),
            vec![(DrawType::P1Ahead, 2), (DrawType::BothHigh, 1)]
        );
    }
}
