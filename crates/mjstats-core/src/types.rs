//! 結果表の行型と、行を引くための列挙型

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 戦略・構成ラベル
// ---------------------------------------------------------------------------

/// エージェントの戦略（`player1_type` / `player2_type` 列の値）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Bayesian,
    Greedy,
    RandomCommit,
    PureRandom,
}

impl Strategy {
    pub const ALL: [Strategy; 4] =
        [Strategy::Bayesian, Strategy::Greedy, Strategy::RandomCommit, Strategy::PureRandom];

    /// 列の値（`random_commit` など）
    pub fn key(self) -> &'static str {
        match self {
            Strategy::Bayesian => "bayesian",
            Strategy::Greedy => "greedy",
            Strategy::RandomCommit => "random_commit",
            Strategy::PureRandom => "pure_random",
        }
    }

    /// 図の短縮ラベル（`B`, `RC` など）
    pub fn short(self) -> &'static str {
        match self {
            Strategy::Bayesian => "B",
            Strategy::Greedy => "G",
            Strategy::RandomCommit => "RC",
            Strategy::PureRandom => "PR",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Strategy::Bayesian => "Bayesian",
            Strategy::Greedy => "Greedy",
            Strategy::RandomCommit => "Random-C",
            Strategy::PureRandom => "Pure Rand",
        }
    }

    /// 目標の手役に向けて打つ戦略か（Bayesian / Greedy）
    pub fn is_strategic(self) -> bool {
        matches!(self, Strategy::Bayesian | Strategy::Greedy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 神経質さ（nervousness）を有効にした側
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NervousnessConfig {
    Neither,
    P1Only,
    P2Only,
    Both,
}

impl NervousnessConfig {
    /// 図の並び順
    pub const ALL: [NervousnessConfig; 4] = [
        NervousnessConfig::Neither,
        NervousnessConfig::P1Only,
        NervousnessConfig::P2Only,
        NervousnessConfig::Both,
    ];

    pub fn key(self) -> &'static str {
        match self {
            NervousnessConfig::Neither => "neither",
            NervousnessConfig::P1Only => "p1_only",
            NervousnessConfig::P2Only => "p2_only",
            NervousnessConfig::Both => "both",
        }
    }

    pub fn tick_label(self) -> &'static str {
        match self {
            NervousnessConfig::Neither => "Neither Nervous",
            NervousnessConfig::P1Only => "P1 Only Nervous",
            NervousnessConfig::P2Only => "P2 Only Nervous",
            NervousnessConfig::Both => "Both Nervous",
        }
    }

    pub fn index(self) -> usize {
        match self {
            NervousnessConfig::Neither => 0,
            NervousnessConfig::P1Only => 1,
            NervousnessConfig::P2Only => 2,
            NervousnessConfig::Both => 3,
        }
    }
}

impl fmt::Display for NervousnessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for NervousnessConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NervousnessConfig::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("unknown nervousness config: {s}"))
    }
}

// ---------------------------------------------------------------------------
// 結果表
// ---------------------------------------------------------------------------

/// （対戦, 構成）ごとの対局バッチ1件
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub player1_type: Strategy,
    pub player2_type: Strategy,
    pub config_name: NervousnessConfig,
    pub total_games: u32,
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub draws: u32,
    pub decisive_games: u32,
    pub p1_win_rate_decisive: f64,
    pub p2_win_rate_decisive: f64,
    pub draw_pct: f64,
    pub draw_pattern_overlap_pct: f64,
    pub reshuffle_pct: f64,
    pub games_reshuffled: u32,
    pub wins_after_reshuffle: u32,
    pub draw_both_high_progress: u32,
    pub draw_both_stuck: u32,
    pub draw_similar_progress: u32,
    pub draw_p1_stuck_p2_ahead: u32,
    pub draw_p2_stuck_p1_ahead: u32,
    /// 引き分けが無いバッチでは空欄になる
    #[serde(default)]
    pub draw_avg_p1_progress: Option<f64>,
    #[serde(default)]
    pub draw_avg_p2_progress: Option<f64>,
}

impl ResultRow {
    /// 欠けている組み合わせの代わりに使う0の行
    pub fn zeroed(pairing: Pairing, config: NervousnessConfig) -> Self {
        Self {
            player1_type: pairing.p1,
            player2_type: pairing.p2,
            config_name: config,
            total_games: 0,
            p1_wins: 0,
            p2_wins: 0,
            draws: 0,
            decisive_games: 0,
            p1_win_rate_decisive: 0.0,
            p2_win_rate_decisive: 0.0,
            draw_pct: 0.0,
            draw_pattern_overlap_pct: 0.0,
            reshuffle_pct: 0.0,
            games_reshuffled: 0,
            wins_after_reshuffle: 0,
            draw_both_high_progress: 0,
            draw_both_stuck: 0,
            draw_similar_progress: 0,
            draw_p1_stuck_p2_ahead: 0,
            draw_p2_stuck_p1_ahead: 0,
            draw_avg_p1_progress: None,
            draw_avg_p2_progress: None,
        }
    }

    pub fn pairing(&self) -> Pairing {
        Pairing::new(self.player1_type, self.player2_type)
    }

    /// 勝数から計算し直した P1 勝率（%）
    pub fn p1_win_rate(&self) -> f64 {
        crate::stats::win_rate(self.p1_wins, self.decisive_games)
    }

    pub fn p2_win_rate(&self) -> f64 {
        crate::stats::win_rate(self.p2_wins, self.decisive_games)
    }
}

/// 順序付きの戦略ペア。`p1` が先に書かれた側
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub p1: Strategy,
    pub p2: Strategy,
}

impl Pairing {
    pub const fn new(p1: Strategy, p2: Strategy) -> Self {
        Self { p1, p2 }
    }

    /// `B-RC` 形式
    pub fn short_label(self) -> String {
        format!("{}-{}", self.p1.short(), self.p2.short())
    }

    /// `Bayesian vs. Random-C` 形式
    pub fn long_label(self) -> String {
        format!("{} vs. {}", self.p1.display_name(), self.p2.display_name())
    }

    pub fn group(self) -> MatchupGroup {
        match (self.p1.is_strategic(), self.p2.is_strategic()) {
            (true, true) => MatchupGroup::Strategic,
            (false, false) => MatchupGroup::Baseline,
            _ => MatchupGroup::Mixed,
        }
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.p1, self.p2)
    }
}

/// 対戦の戦略性による区分（引き分け図の色分け）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchupGroup {
    Strategic,
    /// 片方だけ戦略的
    Mixed,
    Baseline,
}

impl MatchupGroup {
    pub fn legend(self) -> &'static str {
        match self {
            MatchupGroup::Strategic => "Both Strategic",
            MatchupGroup::Mixed => "One Strategic",
            MatchupGroup::Baseline => "Both Baseline",
        }
    }
}

// ---------------------------------------------------------------------------
// 引き分け詳細表
// ---------------------------------------------------------------------------

/// パターン重なり率の区分（図の並び順）
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OverlapCategory {
    #[serde(rename = "0-24%")]
    Low,
    #[serde(rename = "25-49%")]
    Partial,
    #[serde(rename = "50-74%")]
    Half,
    #[serde(rename = "75-99%")]
    High,
    #[serde(rename = "100% (Exact)")]
    Exact,
}

impl OverlapCategory {
    pub const ALL: [OverlapCategory; 5] = [
        OverlapCategory::Low,
        OverlapCategory::Partial,
        OverlapCategory::Half,
        OverlapCategory::High,
        OverlapCategory::Exact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OverlapCategory::Low => "0-24%",
            OverlapCategory::Partial => "25-49%",
            OverlapCategory::Half => "50-74%",
            OverlapCategory::High => "75-99%",
            OverlapCategory::Exact => "100% (Exact)",
        }
    }

    /// 100以上は Exact
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 100.0 {
            OverlapCategory::Exact
        } else if pct >= 75.0 {
            OverlapCategory::High
        } else if pct >= 50.0 {
            OverlapCategory::Half
        } else if pct >= 25.0 {
            OverlapCategory::Partial
        } else {
            OverlapCategory::Low
        }
    }
}

impl fmt::Display for OverlapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 引き分け1局。読み込み後の進捗は%
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawDetailRow {
    pub p1_type: Strategy,
    pub p2_type: Strategy,
    pub player_progress: f64,
    pub opponent_progress: f64,
    pub overlap_pct: f64,
    pub overlap_category: OverlapCategory,
    pub final_turn: u32,
}

impl DrawDetailRow {
    pub fn pairing(&self) -> Pairing {
        Pairing::new(self.p1_type, self.p2_type)
    }

    /// 符号付きの進捗差（P1 - P2）
    pub fn progress_diff(&self) -> f64 {
        self.player_progress - self.opponent_progress
    }

    pub fn progress_sum(&self) -> f64 {
        self.player_progress + self.opponent_progress
    }
}

// ---------------------------------------------------------------------------
// レポート・図で使う対戦の組
// ---------------------------------------------------------------------------

use Strategy::{Bayesian, Greedy, PureRandom, RandomCommit};

/// 引き分け表の全対戦。戦略的な対戦が先
pub const DRAW_TABLE_PAIRINGS: [Pairing; 9] = [
    Pairing::new(Bayesian, Bayesian),
    Pairing::new(Bayesian, Greedy),
    Pairing::new(Greedy, Greedy),
    Pairing::new(Bayesian, RandomCommit),
    Pairing::new(Greedy, RandomCommit),
    Pairing::new(Bayesian, PureRandom),
    Pairing::new(RandomCommit, RandomCommit),
    Pairing::new(RandomCommit, PureRandom),
    Pairing::new(PureRandom, PureRandom),
];

/// 勝率図に載せる対戦（少なくとも片方が戦略的）
pub const WIN_RATE_PAIRINGS: [Pairing; 7] = [
    Pairing::new(Bayesian, Bayesian),
    Pairing::new(Bayesian, Greedy),
    Pairing::new(Bayesian, RandomCommit),
    Pairing::new(Bayesian, PureRandom),
    Pairing::new(Greedy, Greedy),
    Pairing::new(Greedy, RandomCommit),
    Pairing::new(Greedy, PureRandom),
];

pub const STRATEGIC_PAIRINGS: [Pairing; 3] = [
    Pairing::new(Bayesian, Bayesian),
    Pairing::new(Bayesian, Greedy),
    Pairing::new(Greedy, Greedy),
];

pub const BASELINE_PAIRINGS: [Pairing; 3] = [
    Pairing::new(RandomCommit, RandomCommit),
    Pairing::new(RandomCommit, PureRandom),
    Pairing::new(PureRandom, PureRandom),
];
