//! 結果表から論文本文・表・アブストラクトに載せる数値を算出する
//!
//! `PaperReport::build` で全セクションを計算し、`render` でテキスト化する。
//! JSON出力は `serde_json` でそのままシリアライズする。

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Lines, ValueRange};
use crate::aggregate::{ConfigSpread, PooledResult};
use crate::config::AnalysisConfig;
use crate::draws::{DrawProfile, ReshuffleResolution};
use crate::filter::{baseline_row, rows_for_pairing, rows_with_config};
use crate::stats::{Significance, binomial_p_greater, ci95_half_width};
use crate::types::{
    BASELINE_PAIRINGS, DRAW_TABLE_PAIRINGS, NervousnessConfig, Pairing, ResultRow,
    STRATEGIC_PAIRINGS, Strategy,
};

use crate::types::Strategy::{Bayesian, Greedy, PureRandom, RandomCommit};

const BAYESIAN_VS_GREEDY: Pairing = Pairing::new(Bayesian, Greedy);
const BAYESIAN_VS_RANDOM_COMMIT: Pairing = Pairing::new(Bayesian, RandomCommit);
const BAYESIAN_VS_PURE_RANDOM: Pairing = Pairing::new(Bayesian, PureRandom);
const GREEDY_VS_RANDOM_COMMIT: Pairing = Pairing::new(Greedy, RandomCommit);
const GREEDY_VS_PURE_RANDOM: Pairing = Pairing::new(Greedy, PureRandom);
const BAYESIAN_SELF_PLAY: Pairing = Pairing::new(Bayesian, Bayesian);
const GREEDY_SELF_PLAY: Pairing = Pairing::new(Greedy, Greedy);

/// リシャッフル率を並べる対戦（戦略エージェントを含む6組）
const RESHUFFLE_PAIRINGS: usize = 6;

// ---------------------------------------------------------------------------
// セクションごとの値
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BasicCounts {
    /// 表の全行数
    pub configurations: usize,
    pub total_games: u64,
    /// 基準構成の行数
    pub baseline_configurations: usize,
}

/// 基準構成1行分の直接対決
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeadToHead {
    pub pairing: Pairing,
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub decisive_games: u32,
    /// 決着局に対する P1 勝率（%）
    pub win_rate: f64,
    /// 95%信頼区間の半幅（%ポイント）
    pub ci95: f64,
    pub draw_pct: f64,
    /// 片側二項検定（H0: p=0.5）
    pub p_value: f64,
    pub significance: Significance,
}

impl HeadToHead {
    pub fn from_row(row: &ResultRow) -> Self {
        let p_value = binomial_p_greater(row.p1_wins, row.decisive_games);
        Self {
            pairing: row.pairing(),
            p1_wins: row.p1_wins,
            p2_wins: row.p2_wins,
            decisive_games: row.decisive_games,
            win_rate: row.p1_win_rate(),
            ci95: ci95_half_width(row.p1_wins, row.decisive_games),
            draw_pct: row.draw_pct,
            p_value,
            significance: Significance::from_p_value(p_value),
        }
    }
}

/// Table 1 の1行
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawTableEntry {
    pub pairing: Pairing,
    pub label: String,
    pub draw_pct: f64,
    pub overlap_pct: f64,
    pub reshuffle_pct: f64,
}

/// ラベル付きの1値（`B-G: 97.0%` のような列挙用）
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// ラベル付きの値の列とその範囲
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabeledRange {
    pub values: Vec<LabeledValue>,
    pub range: Option<ValueRange>,
}

impl LabeledRange {
    fn collect<I: IntoIterator<Item = (String, f64)>>(items: I) -> Self {
        let values: Vec<LabeledValue> =
            items.into_iter().map(|(label, value)| LabeledValue { label, value }).collect();
        let raw: Vec<f64> = values.iter().map(|v| v.value).collect();
        Self {
            range: ValueRange::of(&raw),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// レポート本体
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaperReport {
    pub baseline: NervousnessConfig,
    pub basic: BasicCounts,
    /// Bayesian vs Greedy（基準構成）
    pub primary: Option<HeadToHead>,
    /// Bayesian vs Greedy の全構成数（決着局なしの行を含む）
    pub primary_configurations: usize,
    pub primary_spread: Option<ConfigSpread>,
    pub bayesian_vs_random_commit: Option<HeadToHead>,
    pub bayesian_vs_pure_random: PooledResult,
    pub greedy_vs_random_commit: Option<HeadToHead>,
    pub greedy_vs_pure_random: PooledResult,
    pub bayesian_self_play: Option<HeadToHead>,
    pub greedy_self_play: Option<HeadToHead>,
    pub draw_table: Vec<DrawTableEntry>,
    pub strategic_overlap: LabeledRange,
    pub baseline_overlap: LabeledRange,
    /// Bayesian vs Bayesian の引き分け時進捗
    pub progress_at_draw: Option<DrawProfile>,
    pub reshuffle_rates: LabeledRange,
    /// Bayesian vs Greedy のリシャッフル後の決着。リシャッフルが無ければ `None`
    pub reshuffle_resolution: Option<ReshuffleResolution>,
    pub strategic_draw_rates: Option<ValueRange>,
    /// Table 1 全体の引き分け率範囲
    pub all_draw_rates: Option<ValueRange>,
}

impl PaperReport {
    pub fn build(rows: &[ResultRow], config: &AnalysisConfig) -> Self {
        let baseline = config.baseline;

        // 基準構成の行は一度だけ引く（欠損の警告も1回ずつ）
        let lookup: BTreeMap<Pairing, &ResultRow> = DRAW_TABLE_PAIRINGS
            .iter()
            .filter_map(|&p| baseline_row(rows, p, baseline).map(|r| (p, r)))
            .collect();
        let head_to_head = |p: Pairing| lookup.get(&p).map(|r| HeadToHead::from_row(r));

        let basic = BasicCounts {
            configurations: rows.len(),
            total_games: rows.iter().map(|r| u64::from(r.total_games)).sum(),
            baseline_configurations: rows_with_config(rows, baseline).len(),
        };

        let primary_rows = rows_for_pairing(rows, BAYESIAN_VS_GREEDY);
        let primary_spread = ConfigSpread::from_rows(&primary_rows, config.bands);

        let draw_table: Vec<DrawTableEntry> = DRAW_TABLE_PAIRINGS
            .iter()
            .filter_map(|p| lookup.get(p))
            .map(|r| DrawTableEntry {
                pairing: r.pairing(),
                label: r.pairing().long_label(),
                draw_pct: r.draw_pct,
                overlap_pct: r.draw_pattern_overlap_pct,
                reshuffle_pct: r.reshuffle_pct,
            })
            .collect();

        let overlap_of = |pairings: &[Pairing]| {
            LabeledRange::collect(pairings.iter().filter_map(|p| {
                lookup.get(p).map(|r| (p.short_label(), r.draw_pattern_overlap_pct))
            }))
        };

        let reshuffle_rates = LabeledRange::collect(
            DRAW_TABLE_PAIRINGS[..RESHUFFLE_PAIRINGS]
                .iter()
                .filter_map(|p| lookup.get(p).map(|r| (p.long_label(), r.reshuffle_pct))),
        );

        let strategic_draws: Vec<f64> =
            STRATEGIC_PAIRINGS.iter().filter_map(|p| lookup.get(p)).map(|r| r.draw_pct).collect();
        let all_draws: Vec<f64> = draw_table.iter().map(|e| e.draw_pct).collect();

        Self {
            baseline,
            basic,
            primary: head_to_head(BAYESIAN_VS_GREEDY),
            primary_configurations: primary_rows.len(),
            primary_spread,
            bayesian_vs_random_commit: head_to_head(BAYESIAN_VS_RANDOM_COMMIT),
            bayesian_vs_pure_random: PooledResult::from_rows(&rows_for_pairing(
                rows,
                BAYESIAN_VS_PURE_RANDOM,
            )),
            greedy_vs_random_commit: head_to_head(GREEDY_VS_RANDOM_COMMIT),
            greedy_vs_pure_random: PooledResult::from_rows(&rows_for_pairing(
                rows,
                GREEDY_VS_PURE_RANDOM,
            )),
            bayesian_self_play: head_to_head(BAYESIAN_SELF_PLAY),
            greedy_self_play: head_to_head(GREEDY_SELF_PLAY),
            draw_table,
            strategic_overlap: overlap_of(&STRATEGIC_PAIRINGS[..]),
            baseline_overlap: overlap_of(&BASELINE_PAIRINGS[..]),
            progress_at_draw: lookup.get(&BAYESIAN_SELF_PLAY).map(|r| DrawProfile::from_row(r)),
            reshuffle_rates,
            reshuffle_resolution: lookup
                .get(&BAYESIAN_VS_GREEDY)
                .map(|r| ReshuffleResolution::from_row(r))
                .filter(ReshuffleResolution::has_reshuffles),
            strategic_draw_rates: ValueRange::of(&strategic_draws),
            all_draw_rates: ValueRange::of(&all_draws),
        }
    }

    /// レポート全文。同じ入力からは常に同じ文字列になる。
    pub fn render(&self) -> String {
        let mut out = Lines::default();
        out.banner("MAHJONG AI PAPER - STATISTICS FOR RESULTS SECTION");

        self.render_basic(&mut out);
        self.render_primary(&mut out);
        self.render_bayesian_baselines(&mut out);
        self.render_greedy_baselines(&mut out);
        self.render_self_play(&mut out);
        self.render_draw_table(&mut out);
        self.render_overlap(&mut out);
        self.render_progress(&mut out);
        self.render_reshuffle(&mut out);
        self.render_discussion(&mut out);
        self.render_abstract(&mut out);

        out.finish()
    }

    fn render_basic(&self, out: &mut Lines) {
        out.blank();
        out.banner("BASIC STATISTICS");
        out.push(format!("Total configurations: {}", self.basic.configurations));
        out.push(format!("Total games: {}", self.basic.total_games));
        out.push(format!(
            "'{}' configurations: {}",
            self.baseline.tick_label(),
            self.basic.baseline_configurations
        ));
    }

    fn render_primary(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.1.1: BAYESIAN VS GREEDY (PRIMARY RESULT)");
        if let Some(h) = &self.primary {
            out.blank();
            out.push(format!("{} configuration:", self.baseline.tick_label()));
            out.push(format!("  Bayesian wins: {}", h.p1_wins));
            out.push(format!("  Greedy wins: {}", h.p2_wins));
            out.push(format!("  Win rate: {:.1}% (95% CI ±{:.1})", h.win_rate, h.ci95));
            out.push(format!("  Total decisive games: {}", h.decisive_games));
            out.push(format!("  Draw rate: {:.1}%", h.draw_pct));
            out.push(format!("  P-value (binomial test, H0: p=0.5): {:.4}", h.p_value));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"The Bayesian agent achieved a {:.1}% win rate",
                h.win_rate
            ));
            out.push(format!(
                "     against the Greedy agent in decisive games ({} configuration:",
                self.baseline.tick_label().to_lowercase()
            ));
            out.push(format!(
                "     {} wins vs. {} losses, {} binomial test)\"",
                h.p1_wins, h.p2_wins, h.significance
            ));
        }

        out.blank();
        out.sub_banner("ALL BAYESIAN VS GREEDY CONFIGURATIONS");
        out.blank();
        out.push(format!("Total Bayesian vs Greedy configurations: {}", self.primary_configurations));
        let Some(s) = &self.primary_spread else {
            return;
        };
        out.blank();
        out.push("Win rate statistics:");
        out.push(format!("  Minimum: {:.1}%", s.min));
        out.push(format!("  Maximum: {:.1}%", s.max));
        out.push(format!("  Mean: {:.1}%", s.mean));
        out.push(format!("  Median: {:.1}%", s.median));
        out.blank();
        out.push("Distribution:");
        out.push(format!("  Below {:.0}%: {} configs", s.bounds.low, s.below));
        out.push(format!(
            "  {:.0}-{:.0}% range: {} configs",
            s.bounds.low, s.bounds.high, s.clustered
        ));
        out.push(format!("  Above {:.0}%: {} configs", s.bounds.high, s.above));
        out.blank();
        out.push(format!(
            "  → PAPER TEXT: \"Across all {} nervousness configurations,",
            self.primary_configurations
        ));
        out.push(format!(
            "     Bayesian win rates ranged from {:.1}% to {:.1}%,",
            s.min, s.max
        ));
        out.push(format!(
            "     with most configurations clustered around {:.0}-{:.0}%.\"",
            s.bounds.low, s.bounds.high
        ));
        out.blank();
        out.push(format!("  Highest win rate config: {}", s.best.config));
        out.push(format!("    Win rate: {:.1}%", s.best.win_rate));
        out.push(format!("    Decisive games: {}", s.best.decisive_games));
        out.push(format!("    Draw rate: {:.1}%", s.best.draw_pct));
    }

    fn render_bayesian_baselines(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.1.2: BAYESIAN VS BASELINES");
        if let Some(h) = &self.bayesian_vs_random_commit {
            out.blank();
            out.push("Bayesian vs Random-Commit:");
            out.push(format!("  P1 wins: {}", h.p1_wins));
            out.push(format!("  P2 wins: {}", h.p2_wins));
            out.push(format!("  Decisive games: {}", h.decisive_games));
            out.push(format!("  Win rate: {:.1}% (95% CI ±{:.1})", h.win_rate, h.ci95));
            out.push(format!("  Draw rate: {:.1}%", h.draw_pct));
            out.push(format!("  P-value: {:.6}", h.p_value));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"vs. Random-Commit: {:.1}% win rate",
                h.win_rate
            ));
            out.push(format!(
                "     in decisive games ({}/{} wins, {})\"",
                h.p1_wins,
                h.decisive_games,
                self.baseline.tick_label().to_lowercase()
            ));
        }
        render_pooled(out, "Bayesian", &self.bayesian_vs_pure_random);
    }

    fn render_greedy_baselines(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.1.3: GREEDY VS BASELINES");
        if let Some(h) = &self.greedy_vs_random_commit {
            out.blank();
            out.push("Greedy vs Random-Commit:");
            out.push(format!("  P1 wins: {}", h.p1_wins));
            out.push(format!("  Decisive games: {}", h.decisive_games));
            out.push(format!("  Win rate: {:.1}% (95% CI ±{:.1})", h.win_rate, h.ci95));
            out.push(format!("  P-value: {:.6}", h.p_value));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"vs. Random-Commit: {:.1}% win rate",
                h.win_rate
            ));
            out.push(format!("     in decisive games ({}/{} wins)\"", h.p1_wins, h.decisive_games));
        }
        render_pooled(out, "Greedy", &self.greedy_vs_pure_random);
    }

    fn render_self_play(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.1.4: SELF-PLAY RESULTS");
        if let Some(h) = &self.bayesian_self_play {
            out.blank();
            out.push("Bayesian vs Bayesian:");
            out.push(format!("  P1 wins: {}", h.p1_wins));
            out.push(format!("  P2 wins: {}", h.p2_wins));
            out.push(format!("  Decisive games: {}", h.decisive_games));
            out.push(format!("  P1 win rate: {:.1}%", h.win_rate));
            out.push(format!("  Draw rate: {:.1}%", h.draw_pct));
            out.push(format!("  P-value: {:.6}", h.p_value));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"Bayesian vs. Bayesian yielded {:.1}% P1 wins",
                h.win_rate
            ));
            out.push(format!(
                "     in the '{}' configuration ({}/{} decisive games)\"",
                self.baseline.tick_label().to_lowercase(),
                h.p1_wins,
                h.decisive_games
            ));
        }
        if let Some(h) = &self.greedy_self_play {
            out.blank();
            out.push("Greedy vs Greedy:");
            out.push(format!("  P1 wins: {}", h.p1_wins));
            out.push(format!("  Decisive games: {}", h.decisive_games));
            out.push(format!("  P1 win rate: {:.1}%", h.win_rate));
            out.push(format!("  Draw rate: {:.1}%", h.draw_pct));
            out.push(format!("  P-value: {:.6}", h.p_value));
            out.blank();
            out.push("  → PAPER TEXT: \"Greedy vs. Greedy showed similar patterns");
            out.push(format!(
                "     ({:.1}% P1 wins, {:.1}% draw rates)\"",
                h.win_rate, h.draw_pct
            ));
        }
    }

    fn render_draw_table(&self, out: &mut Lines) {
        out.blank();
        out.banner("TABLE 1: DRAW RATES AND CHARACTERISTICS");
        out.blank();
        out.push(format!(
            "{:<30} {:<12} {:<12} {:<12}",
            "Pairing", "Draw Rate", "Overlap", "Reshuffle"
        ));
        out.push("-".repeat(66));
        for e in &self.draw_table {
            out.push(format!(
                "{:<30} {:>6.1}%      {:>6.1}%      {:>6.1}%",
                e.label, e.draw_pct, e.overlap_pct, e.reshuffle_pct
            ));
        }
    }

    fn render_overlap(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.3.1: PATTERN OVERLAP IN DRAWS");
        out.blank();
        out.push("Strategic agent pattern overlap:");
        for v in &self.strategic_overlap.values {
            out.push(format!("  {}: {:.1}%", v.label, v.value));
        }
        out.blank();
        out.push(format!("Range: {}", range1(self.strategic_overlap.range)));
        if let Some(r) = self.strategic_overlap.range {
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"In {:.0}-{:.0}% of draws between strategic agents",
                r.min, r.max
            ));
            out.push("     (Bayesian/Greedy), both players were pursuing the same hand pattern.\"");
            out.push(format!("  → OR: \"In {:.1}-{:.1}% of draws\"", r.min, r.max));
        }

        out.blank();
        out.push("Baseline agent pattern overlap:");
        for v in &self.baseline_overlap.values {
            out.push(format!("  {}: {:.1}%", v.label, v.value));
        }
        out.blank();
        out.push(format!("Range: {}", range1(self.baseline_overlap.range)));
        if let Some(r) = self.baseline_overlap.range {
            out.blank();
            out.push("  → PAPER TEXT: \"pattern overlap dropped dramatically when both");
            out.push(format!(
                "     players were non-strategic ({:.0}-{:.0}%)\"",
                r.min, r.max
            ));
        }
    }

    fn render_progress(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.3.2: PROGRESS AT DRAW");
        let Some(p) = &self.progress_at_draw else {
            return;
        };
        out.blank();
        out.push(format!(
            "Bayesian vs Bayesian ({}):",
            self.baseline.tick_label().to_lowercase()
        ));
        out.push(format!("Total draws: {}", p.draws));
        out.blank();
        out.push("Progress categories:");
        out.push(format!(
            "  Both high (≥70%): {} draws ({:.1}%)",
            p.both_high.count, p.both_high.pct
        ));
        out.push(format!(
            "  Both stuck (<70%): {} draws ({:.1}%)",
            p.both_stuck.count, p.both_stuck.pct
        ));
        out.push(format!(
            "  Similar (within 15%): {} draws ({:.1}%)",
            p.similar.count, p.similar.pct
        ));
        out.push(format!(
            "  Asymmetric: {} draws ({:.1}%)",
            p.asymmetric.count, p.asymmetric.pct
        ));
        out.push(format!("    - P1 ahead, P2 stuck: {}", p.p1_ahead.count));
        out.push(format!("    - P2 ahead, P1 stuck: {}", p.p2_ahead.count));
        out.blank();
        out.push("Average final progress:");
        out.push(format!("  P1: {:.1}%", p.avg_p1_progress));
        out.push(format!("  P2: {:.1}%", p.avg_p2_progress));
        out.blank();
        out.push("  → PAPER TEXT:");
        out.push(format!(
            "     \"Both high progress (≥70%): {:.1}% of draws",
            p.both_high.pct
        ));
        out.push(format!("      ({}/{})\"", p.both_high.count, p.draws));
        out.push(format!("     \"Both stuck (<70%): {:.1}% of draws", p.both_stuck.pct));
        out.push(format!("      ({}/{})\"", p.both_stuck.count, p.draws));
        out.push(format!(
            "     \"Similar progress (within 15%): {:.1}% of draws",
            p.similar.pct
        ));
        out.push(format!("      ({}/{})\"", p.similar.count, p.draws));
        out.push(format!(
            "     \"Asymmetric progress: {:.1}% of draws\"",
            p.asymmetric.pct
        ));
        out.push(format!(
            "     \"Average final progress at draw: P1 = {:.1}%,",
            p.avg_p1_progress
        ));
        out.push(format!("      P2 = {:.1}%\"", p.avg_p2_progress));
    }

    fn render_reshuffle(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 4.3.3: RESHUFFLE ANALYSIS");
        out.blank();
        out.push("Reshuffle rates:");
        for v in &self.reshuffle_rates.values {
            out.push(format!("  {}: {:.1}%", v.label, v.value));
        }
        if let Some(r) = self.reshuffle_rates.range {
            out.blank();
            out.push(format!("Range for strategic/mixed: {:.0}%-{:.0}%", r.min, r.max));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"{:.0}-{:.0}% of games reshuffled at least once\"",
                r.min, r.max
            ));
        }

        if let Some(r) = &self.reshuffle_resolution {
            out.blank();
            out.push("Resolution after reshuffle (Bayesian vs Greedy):");
            out.push(format!("  Games reshuffled: {}", r.games_reshuffled));
            out.push(format!("  Wins after reshuffle: {}", r.wins_after_reshuffle));
            out.push(format!("  Resolution rate: {:.1}%", r.resolution_pct));
            out.push(format!("  Drew again: {:.1}%", r.drew_again_pct));
            out.blank();
            out.push(format!(
                "  → PAPER TEXT: \"Of reshuffled games, only {:.0}%",
                r.resolution_pct
            ));
            out.push("     resolved to a winner\"");
            out.push(format!(
                "     \"{:.0}% of reshuffled games drew again\"",
                r.drew_again_pct
            ));
        }
    }

    fn render_discussion(&self, out: &mut Lines) {
        out.blank();
        out.banner("SECTION 5: DRAW RATE RANGES FOR DISCUSSION");
        out.blank();
        out.push("Draw rates for strategic matchups:");
        out.push(format!("  Range: {}", range1(self.strategic_draw_rates)));
        if let Some(r) = self.strategic_draw_rates {
            out.blank();
            out.push("  → PAPER TEXT (Discussion): \"the extremely high draw rates");
            out.push(format!(
                "     ({:.1}-{:.1}% for strategic agents)\"",
                r.min, r.max
            ));
        }
    }

    fn render_abstract(&self, out: &mut Lines) {
        out.blank();
        out.banner("ABSTRACT STATISTICS");
        let Some(h) = &self.primary else {
            return;
        };
        out.blank();
        out.push("For abstract:");
        out.push(format!("  Primary win rate: {:.1}%", h.win_rate));
        if let Some(s) = &self.primary_spread {
            out.push(format!("  Win rate range: {:.1}%-{:.1}%", s.min, s.max));
            out.push(format!(
                "  Most configs cluster: {:.0}-{:.0}% ({}/{} configs)",
                s.bounds.low,
                s.bounds.high,
                s.clustered,
                s.counted()
            ));
        }
        if let Some(r) = self.all_draw_rates {
            out.push(format!("  Draw rates: {:.0}-{:.0}%", r.min, r.max));
        }
        if let Some(r) = self.strategic_overlap.range {
            out.push(format!("  Pattern overlap (strategic): {:.0}-{:.0}%", r.min, r.max));
        }
    }
}

/// 全構成合算の対 Pure Random 成績
fn render_pooled(out: &mut Lines, player: &str, pooled: &PooledResult) {
    out.blank();
    out.push(format!("{player} vs Pure Random (all configurations):"));
    out.push(format!("  Total P1 wins: {}", pooled.p1_wins));
    out.push(format!("  Total P2 wins: {}", pooled.p2_wins));
    out.push(format!("  Total decisive: {}", pooled.decisive));
    out.push(format!("  Win rate: {:.1}%", pooled.win_rate));
    out.push(format!("  P-value: {:.6e}", pooled.p_value));
    out.blank();
    out.push(format!(
        "  → PAPER TEXT: \"vs. Pure Random: {:.0}% win rate across all configurations",
        pooled.win_rate
    ));
    out.push(format!(
        "     ({}/{} total wins, {} losses)\"",
        pooled.p1_wins, pooled.decisive, pooled.p2_wins
    ));
}

fn range1(r: Option<ValueRange>) -> String {
    match r {
        Some(r) => format!("{:.1}% - {:.1}%", r.min, r.max),
        None => "n/a".to_string(),
    }
}
