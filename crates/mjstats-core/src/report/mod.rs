//! 論文向けテキストレポート
//!
//! - [`paper`]: 結果表からの統計レポート（本文・表・アブストラクト用の数値）
//! - [`draw_summary`]: 引き分け詳細表からのサマリ

pub mod draw_summary;
pub mod paper;

use serde::Serialize;

pub use draw_summary::DrawSummary;
pub use paper::PaperReport;

/// セクション見出しの罫線幅
pub(crate) const RULE_WIDTH: usize = 80;

/// 値の最小・最大
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// 空なら `None`
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values[1..]
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }
}

/// 行バッファ。`render()` 系はすべてこれに書き込んで最後に連結する。
#[derive(Default)]
pub(crate) struct Lines(Vec<String>);

impl Lines {
    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    pub(crate) fn blank(&mut self) {
        self.0.push(String::new());
    }

    /// `====` で挟んだ見出し
    pub(crate) fn banner(&mut self, title: &str) {
        self.push("=".repeat(RULE_WIDTH));
        self.push(title);
        self.push("=".repeat(RULE_WIDTH));
    }

    /// `----` で挟んだ小見出し
    pub(crate) fn sub_banner(&mut self, title: &str) {
        self.push("-".repeat(RULE_WIDTH));
        self.push(title);
        self.push("-".repeat(RULE_WIDTH));
    }

    pub(crate) fn finish(self) -> String {
        let mut out = self.0.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_of_values() {
        assert_eq!(ValueRange::of(&[]), None);
        assert_eq!(
            ValueRange::of(&[3.0, 1.0, 2.0]),
            Some(ValueRange { min: 1.0, max: 3.0 })
        );
    }

    #[test]
    fn lines_end_with_newline() {
        let mut l = Lines::default();
        l.banner("T");
        l.blank();
        let s = l.finish();
        assert!(s.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(s.ends_with("\n\n"));
    }
}
