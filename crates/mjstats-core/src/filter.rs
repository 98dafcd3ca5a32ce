//! 対戦・構成による行の選択

use std::fmt;

use crate::types::{NervousnessConfig, Pairing, ResultRow};

/// 結果表に行がない（対戦, 構成）
///
/// 呼び出し側は0の行で続行する。ここでは警告の内容だけを持つ。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingCombination {
    pub pairing: Pairing,
    pub config: Option<NervousnessConfig>,
}

impl fmt::Display for MissingCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.config {
            Some(config) => write!(f, "No data for {} ({config})", self.pairing),
            None => write!(f, "No data for {}", self.pairing),
        }
    }
}

impl MissingCombination {
    pub fn warn(self) {
        log::warn!("{self}");
    }
}

/// `pairing` の全構成の行（表の順）
pub fn rows_for_pairing(rows: &[ResultRow], pairing: Pairing) -> Vec<&ResultRow> {
    rows.iter()
        .filter(|r| r.player1_type == pairing.p1 && r.player2_type == pairing.p2)
        .collect()
}

pub fn rows_for(
    rows: &[ResultRow],
    pairing: Pairing,
    config: NervousnessConfig,
) -> Vec<&ResultRow> {
    rows.iter()
        .filter(|r| {
            r.player1_type == pairing.p1 && r.player2_type == pairing.p2 && r.config_name == config
        })
        .collect()
}

pub fn rows_with_config(rows: &[ResultRow], config: NervousnessConfig) -> Vec<&ResultRow> {
    rows.iter().filter(|r| r.config_name == config).collect()
}

/// 最初に一致した行
pub fn find_row(
    rows: &[ResultRow],
    pairing: Pairing,
    config: NervousnessConfig,
) -> Result<&ResultRow, MissingCombination> {
    rows.iter()
        .find(|r| {
            r.player1_type == pairing.p1 && r.player2_type == pairing.p2 && r.config_name == config
        })
        .ok_or(MissingCombination {
            pairing,
            config: Some(config),
        })
}

/// [`find_row`] と同じだが、欠損は警告して `None`
pub fn baseline_row(
    rows: &[ResultRow],
    pairing: Pairing,
    config: NervousnessConfig,
) -> Option<&ResultRow> {
    match find_row(rows, pairing, config) {
        Ok(row) => Some(row),
        Err(missing) => {
            missing.warn();
            None
        }
    }
}

/// 欠損なら警告して0の行
pub fn row_or_default(
    rows: &[ResultRow],
    pairing: Pairing,
    config: NervousnessConfig,
) -> ResultRow {
    baseline_row(rows, pairing, config)
        .cloned()
        .unwrap_or_else(|| ResultRow::zeroed(pairing, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strategy::{self, *};

    fn row(p1: Strategy, p2: Strategy, c: NervousnessConfig, wins: u32) -> ResultRow {
        let mut r = ResultRow::zeroed(Pairing::new(p1, p2), c);
        r.p1_wins = wins;
        r
    }

    #[test]
    fn pairing_is_order_sensitive() {
        let rows = vec![
            row(Bayesian, Greedy, NervousnessConfig::Neither, 1),
            row(Greedy, Bayesian, NervousnessConfig::Neither, 2),
            row(Bayesian, Greedy, NervousnessConfig::Both, 3),
        ];
        let bg = rows_for_pairing(&rows, Pairing::new(Bayesian, Greedy));
        assert_eq!(bg.iter().map(|r| r.p1_wins).collect::<Vec<_>>(), vec![1, 3]);

        let gb = rows_for(&rows, Pairing::new(Greedy, Bayesian), NervousnessConfig::Neither);
        assert_eq!(gb.len(), 1);
        assert_eq!(gb[0].p1_wins, 2);

        assert_eq!(rows_with_config(&rows, NervousnessConfig::Neither).len(), 2);
    }

    #[test]
    fn first_match_wins() {
        let rows = vec![
            row(Bayesian, Greedy, NervousnessConfig::Neither, 5),
            row(Bayesian, Greedy, NervousnessConfig::Neither, 6),
        ];
        let r = find_row(&rows, Pairing::new(Bayesian, Greedy), NervousnessConfig::Neither).unwrap();
        assert_eq!(r.p1_wins, 5);
    }

    #[test]
    fn missing_combination_defaults_to_zero() {
        let rows = vec![row(Bayesian, Greedy, NervousnessConfig::Neither, 5)];
        let pairing = Pairing::new(PureRandom, PureRandom);

        let missing = find_row(&rows, pairing, NervousnessConfig::Neither).unwrap_err();
        assert_eq!(missing.to_string(), "No data for pure_random vs pure_random (neither)");
        assert!(baseline_row(&rows, pairing, NervousnessConfig::Neither).is_none());

        let fallback = row_or_default(&rows, pairing, NervousnessConfig::Neither);
        assert_eq!(fallback, ResultRow::zeroed(pairing, NervousnessConfig::Neither));
        assert_eq!(fallback.p1_win_rate_decisive, 0.0);
    }
}
