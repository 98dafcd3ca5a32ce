//! 引き分け詳細表のサマリテキスト

use serde::Serialize;

use super::{Lines, RULE_WIDTH};
use crate::classify::{ProgressThresholds, Quadrant};
use crate::stats::{mean, median, percent, std_dev};
use crate::types::DrawDetailRow;

/// 片側プレイヤーの進捗の要約
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl ProgressSummary {
    fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            median: median(values),
            std_dev: std_dev(values),
        }
    }
}

/// 4象限の件数（`high` の閾値だけで分ける）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuadrantCounts {
    pub both_high: usize,
    pub both_stuck: usize,
    pub p1_ahead: usize,
    pub p2_ahead: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawSummary {
    pub draws: usize,
    pub p1: ProgressSummary,
    pub p2: ProgressSummary,
    /// |P1 - P2| の平均
    pub abs_diff_mean: f64,
    pub abs_diff_median: f64,
    pub overlap_mean: f64,
    /// 重なり率 100% 以上の件数
    pub exact_matches: usize,
    pub avg_final_turn: f64,
    pub high_threshold: f64,
    pub quadrants: QuadrantCounts,
}

impl DrawSummary {
    pub fn from_details(rows: &[DrawDetailRow], thresholds: ProgressThresholds) -> Self {
        let p1: Vec<f64> = rows.iter().map(|r| r.player_progress).collect();
        let p2: Vec<f64> = rows.iter().map(|r| r.opponent_progress).collect();
        let abs_diff: Vec<f64> = rows.iter().map(|r| r.progress_diff().abs()).collect();
        let overlap: Vec<f64> = rows.iter().map(|r| r.overlap_pct).collect();
        let turns: Vec<f64> = rows.iter().map(|r| f64::from(r.final_turn)).collect();

        let mut quadrants = QuadrantCounts::default();
        for r in rows {
            match Quadrant::classify(r.player_progress, r.opponent_progress, thresholds.high) {
                Quadrant::BothHigh => quadrants.both_high += 1,
                Quadrant::BothStuck => quadrants.both_stuck += 1,
                Quadrant::P1Ahead => quadrants.p1_ahead += 1,
                Quadrant::P2Ahead => quadrants.p2_ahead += 1,
            }
        }

        Self {
            draws: rows.len(),
            p1: ProgressSummary::of(&p1),
            p2: ProgressSummary::of(&p2),
            abs_diff_mean: mean(&abs_diff),
            abs_diff_median: median(&abs_diff),
            overlap_mean: mean(&overlap),
            exact_matches: overlap.iter().filter(|&&o| o >= 100.0).count(),
            avg_final_turn: mean(&turns),
            high_threshold: thresholds.high,
            quadrants,
        }
    }

    fn share(&self, count: usize) -> f64 {
        percent(count as f64, self.draws as f64)
    }

    pub fn render(&self) -> String {
        let mut out = Lines::default();
        out.banner("DRAW GAME ANALYSIS SUMMARY");
        out.blank();
        out.push(format!("Total draw games analyzed: {}", self.draws));

        for (name, s) in [("Player 1", &self.p1), ("Player 2", &self.p2)] {
            out.blank();
            out.push(format!("{name} Average Progress: {:.1}%", s.mean));
            out.push(format!("{name} Median Progress: {:.1}%", s.median));
            out.push(format!("{name} Std Dev: {:.1}%", s.std_dev));
        }

        out.blank();
        out.push(format!("Average Progress Difference: {:.1}%", self.abs_diff_mean));
        out.push(format!("Median Progress Difference: {:.1}%", self.abs_diff_median));

        out.blank();
        out.push(format!("Average Pattern Overlap: {:.1}%", self.overlap_mean));
        out.push(format!(
            "Exact Pattern Matches: {} ({:.1}%)",
            self.exact_matches,
            self.share(self.exact_matches)
        ));

        out.blank();
        out.push(format!("Average Turns to Draw: {:.1}", self.avg_final_turn));

        let q = &self.quadrants;
        let t = self.high_threshold;
        out.blank();
        out.push("Quadrant Analysis:");
        out.push(format!(
            "  Both High (≥{t:.0}%): {} ({:.1}%)",
            q.both_high,
            self.share(q.both_high)
        ));
        out.push(format!(
            "  Both Stuck (<{t:.0}%): {} ({:.1}%)",
            q.both_stuck,
            self.share(q.both_stuck)
        ));
        out.push(format!("  P1 Ahead: {} ({:.1}%)", q.p1_ahead, self.share(q.p1_ahead)));
        out.push(format!("  P2 Ahead: {} ({:.1}%)", q.p2_ahead, self.share(q.p2_ahead)));

        out.blank();
        out.push("=".repeat(RULE_WIDTH));
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OverlapCategory, Strategy};

    fn detail(p1: f64, p2: f64, overlap: f64, turn: u32) -> DrawDetailRow {
        DrawDetailRow {
            p1_type: Strategy::Bayesian,
            p2_type: Strategy::Greedy,
            player_progress: p1,
            opponent_progress: p2,
            overlap_pct: overlap,
            overlap_category: OverlapCategory::from_pct(overlap),
            final_turn: turn,
        }
    }

    #[test]
    fn summary_of_four_draws() {
        let rows = vec![
            detail(80.0, 75.0, 100.0, 60),
            detail(40.0, 30.0, 50.0, 70),
            detail(90.0, 20.0, 100.0, 65),
            detail(10.0, 70.0, 10.0, 45),
        ];
        let s = DrawSummary::from_details(&rows, ProgressThresholds::default());
        assert_eq!(s.draws, 4);
        assert_eq!(s.p1.mean, 55.0);
        assert_eq!(s.p1.median, 60.0);
        assert_eq!(s.abs_diff_mean, (5.0 + 10.0 + 70.0 + 60.0) / 4.0);
        assert_eq!(s.exact_matches, 2);
        assert_eq!(s.avg_final_turn, 60.0);
        assert_eq!(
            s.quadrants,
            QuadrantCounts { both_high: 1, both_stuck: 1, p1_ahead: 1, p2_ahead: 1 }
        );

        let text = s.render();
        assert!(text.contains("Total draw games analyzed: 4"));
        assert!(text.contains("Exact Pattern Matches: 2 (50.0%)"));
        assert!(text.contains("  Both High (≥70%): 1 (25.0%)"));
        assert!(text.contains("Average Turns to Draw: 60.0"));
        assert!(text.ends_with(&format!("{}\n", "=".repeat(RULE_WIDTH))));
    }

    #[test]
    fn empty_details_render_zeros() {
        let s = DrawSummary::from_details(&[], ProgressThresholds::default());
        let text = s.render();
        assert!(text.contains("Total draw games analyzed: 0"));
        assert!(text.contains("  P1 Ahead: 0 (0.0%)"));
    }
}
