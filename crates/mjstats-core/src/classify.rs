//! 引き分け1局を両者の最終進捗で分類する

use std::fmt;

use serde::{Deserialize, Serialize};

/// 進捗のしきい値（%）。下限を含む（ちょうど `high` は high）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressThresholds {
    pub mid: f64,
    pub high: f64,
}

impl Default for ProgressThresholds {
    fn default() -> Self {
        Self { mid: 50.0, high: 70.0 }
    }
}

/// 引き分けの5分類
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawType {
    BothStuck,
    BothMid,
    BothHigh,
    P1Ahead,
    P2Ahead,
}

impl DrawType {
    pub const ALL: [DrawType; 5] = [
        DrawType::BothStuck,
        DrawType::BothMid,
        DrawType::BothHigh,
        DrawType::P1Ahead,
        DrawType::P2Ahead,
    ];

    /// どの進捗の組もちょうど1つの型になる。
    ///
    /// どちらかが `high` 以上なら high / ahead。両者とも `high` 未満のとき、
    /// 両者が `[mid, high)` なら both mid、それ以外（片方だけ `mid` 未満も含む）は both stuck。
    /// ラベルもこの畳み込みに合わせて "<70%" とする。
    pub fn classify(p1: f64, p2: f64, t: ProgressThresholds) -> Self {
        match (p1 >= t.high, p2 >= t.high) {
            (true, true) => DrawType::BothHigh,
            (true, false) => DrawType::P1Ahead,
            (false, true) => DrawType::P2Ahead,
            (false, false) if p1 >= t.mid && p2 >= t.mid => DrawType::BothMid,
            (false, false) => DrawType::BothStuck,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrawType::BothStuck => "Both Stuck / Split (<70%)",
            DrawType::BothMid => "Both Mid (50-70%)",
            DrawType::BothHigh => "Both High (≥70%)",
            DrawType::P1Ahead => "P1 Ahead",
            DrawType::P2Ahead => "P2 Ahead",
        }
    }
}

impl fmt::Display for DrawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// high しきい値だけで分ける4象限（要約用）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    BothHigh,
    BothStuck,
    P1Ahead,
    P2Ahead,
}

impl Quadrant {
    pub fn classify(p1: f64, p2: f64, high: f64) -> Self {
        match (p1 >= high, p2 >= high) {
            (true, true) => Quadrant::BothHigh,
            (true, false) => Quadrant::P1Ahead,
            (false, true) => Quadrant::P2Ahead,
            (false, false) => Quadrant::BothStuck,
        }
    }
}

/// 型ごとの件数
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DrawTypeCounts {
    pub both_stuck: usize,
    pub both_mid: usize,
    pub both_high: usize,
    pub p1_ahead: usize,
    pub p2_ahead: usize,
}

impl DrawTypeCounts {
    pub fn tally<I: IntoIterator<Item = (f64, f64)>>(pairs: I, t: ProgressThresholds) -> Self {
        let mut counts = Self::default();
        for (p1, p2) in pairs {
            *counts.get_mut(DrawType::classify(p1, p2, t)) += 1;
        }
        counts
    }

    pub fn get(&self, ty: DrawType) -> usize {
        match ty {
            DrawType::BothStuck => self.both_stuck,
            DrawType::BothMid => self.both_mid,
            DrawType::BothHigh => self.both_high,
            DrawType::P1Ahead => self.p1_ahead,
            DrawType::P2Ahead => self.p2_ahead,
        }
    }

    fn get_mut(&mut self, ty: DrawType) -> &mut usize {
        match ty {
            DrawType::BothStuck => &mut self.both_stuck,
            DrawType::BothMid => &mut self.both_mid,
            DrawType::BothHigh => &mut self.both_high,
            DrawType::P1Ahead => &mut self.p1_ahead,
            DrawType::P2Ahead => &mut self.p2_ahead,
        }
    }

    pub fn total(&self) -> usize {
        DrawType::ALL.iter().map(|&t| self.get(t)).sum()
    }

    /// 件数の多い順（同数は `ALL` の順）。0件は除く
    pub fn ranked(&self) -> Vec<(DrawType, usize)> {
        let mut v: Vec<(DrawType, usize)> =
            DrawType::ALL.iter().map(|&t| (t, self.get(t))).filter(|&(_, c)| c > 0).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1));
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: ProgressThresholds = ProgressThresholds { mid: 50.0, high: 70.0 };

    #[test]
    fn boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(DrawType::classify(70.0, 69.9, T), DrawType::P1Ahead);
        assert_eq!(DrawType::classify(69.9, 70.0, T), DrawType::P2Ahead);
        assert_eq!(DrawType::classify(70.0, 70.0, T), DrawType::BothHigh);
        assert_eq!(DrawType::classify(50.0, 50.0, T), DrawType::BothMid);
        assert_eq!(DrawType::classify(49.9, 49.9, T), DrawType::BothStuck);
        assert_eq!(DrawType::classify(0.0, 0.0, T), DrawType::BothStuck);
        assert_eq!(DrawType::classify(100.0, 0.0, T), DrawType::P1Ahead);
    }

    #[test]
    fn split_low_mid_pairs_are_stuck() {
        assert_eq!(DrawType::classify(40.0, 60.0, T), DrawType::BothStuck);
        assert_eq!(DrawType::classify(69.0, 10.0, T), DrawType::BothStuck);
    }

    #[test]
    fn stuck_label_covers_split_pairs() {
        let ty = DrawType::classify(49.0, 69.0, T);
        assert_eq!(ty, DrawType::BothStuck);
        // 片方が 69% の行に "<50%" と書かない
        assert!(!ty.label().contains("<50%"));
        assert!(ty.label().contains("Split"));
    }

    #[test]
    fn every_grid_point_gets_exactly_one_type() {
        let mut pairs = Vec::new();
        let mut x = 0.0;
        while x <= 100.0 {
            let mut y = 0.0;
            while y <= 100.0 {
                pairs.push((x, y));
                y += 0.5;
            }
            x += 0.5;
        }
        for &(p1, p2) in &pairs {
            let ty = DrawType::classify(p1, p2, T);
            let hits = [
                p1 < 50.0 && p2 < 50.0,
                (50.0..70.0).contains(&p1) && (50.0..70.0).contains(&p2),
                p1 >= 70.0 && p2 >= 70.0,
                p1 >= 70.0 && p2 < 70.0,
                p1 < 70.0 && p2 >= 70.0,
            ];
            // 5つの条件は重ならない
            assert!(hits.iter().filter(|&&h| h).count() <= 1, "({p1}, {p2})");
            if let Some(i) = hits.iter().position(|&h| h) {
                assert_eq!(ty, DrawType::ALL[i], "({p1}, {p2})");
            }
        }
        let counts = DrawTypeCounts::tally(pairs.iter().copied(), T);
        assert_eq!(counts.total(), pairs.len());
    }

    #[test]
    fn quadrants_split_at_high_only() {
        assert_eq!(Quadrant::classify(70.0, 70.0, 70.0), Quadrant::BothHigh);
        assert_eq!(Quadrant::classify(55.0, 20.0, 70.0), Quadrant::BothStuck);
        assert_eq!(Quadrant::classify(80.0, 20.0, 70.0), Quadrant::P1Ahead);
        assert_eq!(Quadrant::classify(20.0, 80.0, 70.0), Quadrant::P2Ahead);
    }

    #[test]
    fn ranked_counts_drop_empty_types() {
        let counts = DrawTypeCounts::tally([(80.0, 20.0), (90.0, 10.0), (10.0, 10.0)], T);
        assert_eq!(counts.ranked(), vec![(DrawType::P1Ahead, 2), (DrawType::BothStuck, 1)]);
    }
}
