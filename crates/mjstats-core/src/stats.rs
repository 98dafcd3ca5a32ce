//! 勝率・二項分布の信頼区間・有意性検定と、要約・箱ひげ用の記述統計
//!
//! 比率はすべて分母0なら0を返す。

use std::fmt;

use serde::Serialize;

/// 両側95%正規区間のz値
pub const Z_95: f64 = 1.96;

/// `100 * part / whole`。`whole` が0なら0
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 0.0 } else { 100.0 * part / whole }
}

/// 決着局での勝率（%）
pub fn win_rate(wins: u32, decisive: u32) -> f64 {
    percent(f64::from(wins), f64::from(decisive))
}

/// `wins / n` の95%正規近似区間の半幅（%ポイント）
///
/// `1.96 * sqrt(p * (1 - p) / n) * 100`
pub fn ci95_half_width(wins: u32, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    ci95_half_width_from_rate(win_rate(wins, n), n)
}

/// %で与えた率に対する同じ区間
pub fn ci95_half_width_from_rate(rate_pct: f64, n: u32) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = (rate_pct / 100.0).clamp(0.0, 1.0);
    Z_95 * (p * (1.0 - p) / f64::from(n)).sqrt() * 100.0
}

/// 片側の正確二項検定（H0: p = 0.5, H1: p > 0.5）
///
/// `X ~ Binomial(n, 0.5)` の `P(X >= wins)` を返す。確率質量は対数で足し合わせるので
/// 大きな `n` でもアンダーフローしない。`n == 0` は1。
pub fn binomial_p_greater(wins: u32, n: u32) -> f64 {
    if n == 0 || wins == 0 {
        return 1.0;
    }
    if wins > n {
        return 0.0;
    }

    let ln_half_pow_n = f64::from(n) * 0.5_f64.ln();

    // ln C(n, wins)
    let mut ln_choose = 0.0;
    for k in 0..wins {
        ln_choose += f64::from(n - k).ln() - f64::from(k + 1).ln();
    }

    let mut ln_terms = Vec::with_capacity((n - wins + 1) as usize);
    for k in wins..=n {
        ln_terms.push(ln_choose + ln_half_pow_n);
        if k < n {
            ln_choose += f64::from(n - k).ln() - f64::from(k + 1).ln();
        }
    }

    let max = ln_terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = ln_terms.iter().map(|t| (t - max).exp()).sum();
    (max + sum.ln()).exp().clamp(0.0, 1.0)
}

/// レポート文中の有意性の書き方
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Significance {
    Below001,
    Below01,
    Below05,
    NotSignificant(f64),
}

impl Significance {
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.001 {
            Significance::Below001
        } else if p < 0.01 {
            Significance::Below01
        } else if p < 0.05 {
            Significance::Below05
        } else {
            Significance::NotSignificant(p)
        }
    }

    pub fn is_significant(self) -> bool {
        !matches!(self, Significance::NotSignificant(_))
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Significance::Below001 => f.write_str("p < 0.001"),
            Significance::Below01 => f.write_str("p < 0.01"),
            Significance::Below05 => f.write_str("p < 0.05"),
            Significance::NotSignificant(p) => write!(f, "p = {p:.3}"),
        }
    }
}

// ---------------------------------------------------------------------------
// 記述統計
// ---------------------------------------------------------------------------

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 標本標準偏差（分母 n - 1）。2件未満は0
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// 線形補間の分位点（ソート済み入力）
pub fn quantile_sorted(v: &[f64], q: f64) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let pos = (v.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    v[lo] + (v[hi] - v[lo]) * (pos - lo as f64)
}

pub fn median(values: &[f64]) -> f64 {
    quantile_sorted(&sorted(values), 0.5)
}

/// 箱ひげ図の5数要約。ひげは Tukey（1.5 IQR）
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: usize,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let v = sorted(values);
        let q1 = quantile_sorted(&v, 0.25);
        let q3 = quantile_sorted(&v, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - 1.5 * iqr;
        let hi_fence = q3 + 1.5 * iqr;
        let inside: Vec<f64> = v.iter().copied().filter(|x| (lo_fence..=hi_fence).contains(x)).collect();
        Some(Self {
            count: v.len(),
            q1,
            median: quantile_sorted(&v, 0.5),
            q3,
            whisker_low: inside.first().copied().unwrap_or(q1),
            whisker_high: inside.last().copied().unwrap_or(q3),
            outliers: v.len() - inside.len(),
        })
    }
}

/// `[lo, hi]` の等幅ヒストグラム。最後のビンは右端を含む
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// 範囲外の値は数えない
    pub fn with_range(values: &[f64], lo: f64, hi: f64, bins: usize) -> Self {
        let mut counts = vec![0usize; bins];
        if bins > 0 && hi > lo {
            let width = (hi - lo) / bins as f64;
            for &v in values {
                if !(lo..=hi).contains(&v) {
                    continue;
                }
                let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
                counts[idx] += 1;
            }
        }
        Self { lo, hi, counts }
    }

    /// 範囲はデータから取る。全て同じ値なら前後に0.5広げる
    pub fn auto(values: &[f64], bins: usize) -> Self {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() {
            return Self { lo: 0.0, hi: 1.0, counts: vec![0; bins] };
        }
        if lo == hi {
            return Self::with_range(values, lo - 0.5, hi + 0.5, bins);
        }
        Self::with_range(values, lo, hi, bins)
    }

    pub fn bin_width(&self) -> f64 {
        if self.counts.is_empty() { 0.0 } else { (self.hi - self.lo) / self.counts.len() as f64 }
    }

    /// 各ビンの `(左端, 右端, 件数)`
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        let w = self.bin_width();
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.lo + w * i as f64, self.lo + w * (i + 1) as f64, c))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn win_rate_guards_zero() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(3, 0), 0.0);
        assert!(close(win_rate(55, 100), 55.0, 1e-12));
        assert!(close(win_rate(1, 3), 100.0 / 3.0, 1e-12));
    }

    #[test]
    fn whole_percentages_are_exact() {
        // 表示・比較で 55.00000000000001 にならないこと
        assert_eq!(win_rate(55, 100), 55.0);
        assert_eq!(win_rate(45, 100), 45.0);
        assert_eq!(percent(7.0, 10.0), 70.0);
        assert_eq!(percent(29.0, 100.0), 29.0);
    }

    #[test]
    fn half_width_matches_closed_form() {
        assert_eq!(ci95_half_width(0, 0), 0.0);
        assert!(close(ci95_half_width(55, 100), 9.750876883644876, 1e-9));
        assert_eq!(ci95_half_width(100, 100), 0.0);
        assert_eq!(ci95_half_width(0, 50), 0.0);
        for (w, n) in [(1u32, 7u32), (12, 20), (300, 512)] {
            let p = f64::from(w) / f64::from(n);
            let expected = 1.96 * (p * (1.0 - p) / f64::from(n)).sqrt() * 100.0;
            assert!(close(ci95_half_width(w, n), expected, 1e-9));
        }
        assert!(close(ci95_half_width_from_rate(55.0, 100), 9.750876883644876, 1e-9));
    }

    #[test]
    fn exact_binomial_reference_values() {
        assert!(close(binomial_p_greater(55, 100), 0.184_100_808_663_348, 1e-9));
        assert!(close(binomial_p_greater(60, 100), 0.028_443_966_820_490, 1e-9));
        assert!(close(binomial_p_greater(50, 100), 0.539_794_618_693_589, 1e-9));
        assert!(close(binomial_p_greater(7, 10), 0.171_875, 1e-12));
        assert!(close(binomial_p_greater(30, 40), 0.001_110_716_886_614_682, 1e-12));
        assert!(binomial_p_greater(100, 100) < 1e-29);
        assert_eq!(binomial_p_greater(0, 10), 1.0);
        assert_eq!(binomial_p_greater(0, 0), 1.0);
    }

    #[test]
    fn binomial_p_is_monotone_in_wins() {
        for n in [1u32, 2, 9, 40, 333] {
            let mut prev = f64::INFINITY;
            for w in 0..=n {
                let p = binomial_p_greater(w, n);
                assert!((0.0..=1.0).contains(&p));
                assert!(p <= prev + 1e-12, "n={n} w={w}: {p} > {prev}");
                prev = p;
            }
        }
    }

    #[test]
    fn large_samples_do_not_underflow_to_nan() {
        let p = binomial_p_greater(6000, 10000);
        assert!(p.is_finite());
        assert!(p >= 0.0 && p < 1e-80);
        assert!(close(binomial_p_greater(5000, 10000), 0.5039893230696256, 1e-6));
    }

    #[test]
    fn significance_buckets() {
        assert_eq!(Significance::from_p_value(0.0).to_string(), "p < 0.001");
        assert_eq!(Significance::from_p_value(0.0009).to_string(), "p < 0.001");
        assert_eq!(Significance::from_p_value(0.001).to_string(), "p < 0.01");
        assert_eq!(Significance::from_p_value(0.049).to_string(), "p < 0.05");
        assert_eq!(Significance::from_p_value(0.05).to_string(), "p = 0.050");
        assert_eq!(Significance::from_p_value(0.184_100_8).to_string(), "p = 0.184");
        assert!(!Significance::from_p_value(0.3).is_significant());
    }

    #[test]
    fn descriptive_stats() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert!(close(mean(&v), 2.5, 1e-12));
        assert!(close(median(&v), 2.5, 1e-12));
        assert!(close(std_dev(&v), 1.2909944487358056, 1e-12));
        assert_eq!(std_dev(&[5.0]), 0.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert!(close(median(&[3.0, 1.0, 2.0]), 2.0, 1e-12));
    }

    #[test]
    fn box_stats_flag_outliers() {
        let v = [1.0, 2.0, 3.0, 4.0, 100.0];
        let b = BoxStats::from_values(&v).unwrap();
        assert_eq!(b.count, 5);
        assert!(close(b.q1, 2.0, 1e-12));
        assert!(close(b.median, 3.0, 1e-12));
        assert!(close(b.q3, 4.0, 1e-12));
        assert_eq!(b.whisker_low, 1.0);
        assert_eq!(b.whisker_high, 4.0);
        assert_eq!(b.outliers, 1);
        assert!(BoxStats::from_values(&[]).is_none());
    }

    #[test]
    fn histogram_closes_last_bin() {
        let h = Histogram::with_range(&[0.0, 9.99, 10.0, 95.0, 100.0, 101.0], 0.0, 100.0, 10);
        assert_eq!(h.counts, vec![2, 1, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert!(close(h.bin_width(), 10.0, 1e-12));
        assert_eq!(h.max_count(), 2);

        let flat = Histogram::auto(&[3.0, 3.0], 4);
        assert_eq!(flat.counts.iter().sum::<usize>(), 2);
        assert!(close(flat.lo, 2.5, 1e-12));

        let empty = Histogram::auto(&[], 5);
        assert_eq!(empty.counts, vec![0; 5]);
    }
}
