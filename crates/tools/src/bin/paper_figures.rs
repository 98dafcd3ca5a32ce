/// 結果表から論文用の図（PNG）を生成
///
/// 使い方:
///   paper_figures
///   paper_figures res/player_comparison_results.csv --out-dir plots
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use mjstats_core::charts::{
    DrawAnalysisChart, NervousnessChart, ProgressRegionChart, ReshuffleChart, WinRateChart,
};
use mjstats_core::table::load_results_many;
use mjstats_core::AnalysisConfig;
use tools::common::io::ensure_dir;
use tools::common::logging::{Target, init_logger};
use tools::render::{Chart, render_all};

#[derive(Parser)]
#[command(about = "対戦結果表から論文用の図を生成")]
struct Cli {
    /// 結果表CSV（.gz 可）。複数なら引数順に連結
    #[arg(default_value = "res/player_comparison_results.csv", num_args = 1..)]
    results: Vec<PathBuf>,

    /// 出力ディレクトリ（無ければ作成）
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,

    /// 設定ファイル（toml / yaml / json）
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logger(Target::Stdout);
    let cli = Cli::parse();

    let config = AnalysisConfig::load(cli.config.as_deref())
        .with_context(|| "failed to load analysis config")?;
    let rows = load_results_many(&cli.results).with_context(|| {
        let names: Vec<String> = cli.results.iter().map(|p| p.display().to_string()).collect();
        format!("failed to load results table {}", names.join(", "))
    })?;
    let baseline_rows = rows.iter().filter(|r| r.config_name == config.baseline).count();
    log::info!("Total rows: {}", rows.len());
    log::info!("'{}' rows: {}", config.baseline.tick_label(), baseline_rows);

    ensure_dir(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    // ---------------------------------------------------------------------------
    // 系列データ
    // ---------------------------------------------------------------------------
    let win_rates = WinRateChart::from_rows(&rows, config.baseline);
    let draws = DrawAnalysisChart::from_rows(&rows, config.baseline);
    let nervousness = NervousnessChart::from_rows(&rows);
    let regions = ProgressRegionChart::from_rows(&rows, config.baseline, config.progress);
    let reshuffle = ReshuffleChart::from_rows(&rows, config.baseline);

    let mut charts = vec![
        Chart::WinRates(&win_rates),
        Chart::DrawAnalysis(&draws),
        Chart::Nervousness(&nervousness),
    ];
    match &regions {
        Some(r) => charts.push(Chart::ProgressRegions(r)),
        None => log::warn!("skipping progress-region chart: no bayesian vs bayesian row"),
    }
    charts.push(Chart::Reshuffle(&reshuffle));

    let failed = render_all(&charts, &cli.out_dir, config.chart);
    if failed > 0 {
        bail!("{failed} of {} charts failed to render", charts.len());
    }
    log::info!("{} figures written to {}", charts.len(), cli.out_dir.display());
    Ok(())
}
