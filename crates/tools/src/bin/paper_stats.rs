/// 論文の結果節に載せる統計値の出力
///
/// 使い方:
///   # 既定の結果表（res/player_comparison_results.csv）
///   paper_stats
///
///   # 結果表を指定（複数なら連結）
///   paper_stats runs/a/player_comparison_results.csv.gz runs/b/player_comparison_results.csv
///
///   # JSON出力モード
///   paper_stats --json
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mjstats_core::table::load_results_many;
use mjstats_core::{AnalysisConfig, PaperReport};
use tools::common::io::write_text;
use tools::common::logging::{Target, init_logger};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(about = "対戦結果表から論文用の統計値を出力")]
struct Cli {
    /// 結果表CSV（.gz 可）。複数なら引数順に連結
    #[arg(default_value = "res/player_comparison_results.csv", num_args = 1..)]
    results: Vec<PathBuf>,

    /// JSON出力モード
    #[arg(long)]
    json: bool,

    /// 設定ファイル（toml / yaml / json）
    #[arg(long)]
    config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// 出力
// ---------------------------------------------------------------------------

fn print_text(report: &PaperReport) -> Result<()> {
    write_text("-", &report.render()).context("failed to write report")
}

fn print_json(report: &PaperReport) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    write_text("-", &json).context("failed to write report")
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    // JSON は標準出力を汚さない
    init_logger(if cli.json { Target::Stderr } else { Target::Stdout });

    let config = AnalysisConfig::load(cli.config.as_deref())
        .with_context(|| "failed to load analysis config")?;
    let rows = load_results_many(&cli.results).with_context(|| {
        let names: Vec<String> = cli.results.iter().map(|p| p.display().to_string()).collect();
        format!("failed to load results table {}", names.join(", "))
    })?;
    log::debug!("{} rows, baseline '{}'", rows.len(), config.baseline);

    let report = PaperReport::build(&rows, &config);
    if cli.json { print_json(&report) } else { print_text(&report) }
}
