/// 引き分け詳細表の可視化と要約
///
/// 使い方:
///   # 最新の comparison_results_* を使う
///   draw_viz
///
///   # CSVを指定（出力は <CSVのディレクトリ>/visualizations/）
///   draw_viz comparison_results_20250101_120000/pattern_overlap_details.csv
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;

use mjstats_core::charts::{
    OverlapPanels, ProgressDifferences, ProgressHeatmap, ProgressScatter, SymmetryChart,
};
use mjstats_core::table::load_draw_details;
use mjstats_core::{AnalysisConfig, DrawSummary};
use tools::common::io::{RESULTS_DIR_PREFIX, ensure_dir, latest_results_dir, write_text};
use tools::common::logging::{Target, init_logger};
use tools::render::{Chart, render_all};

const DETAILS_FILE: &str = "pattern_overlap_details.csv";
const OUTPUT_DIR: &str = "visualizations";
const SUMMARY_FILE: &str = "draw_analysis_summary.txt";

#[derive(Parser)]
#[command(about = "引き分け対局の進捗・パターン重なりを可視化")]
struct Cli {
    /// 引き分け詳細CSV。省略時は最新の結果ディレクトリから探す
    details: Option<PathBuf>,

    /// 設定ファイル（toml / yaml / json）
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_details(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    match latest_results_dir(Path::new(".")) {
        Some(dir) => Ok(dir.join(DETAILS_FILE)),
        None => bail!(
            "no {RESULTS_DIR_PREFIX}* directory found; pass the path to {DETAILS_FILE}"
        ),
    }
}

fn main() -> Result<()> {
    init_logger(Target::Stdout);
    let cli = Cli::parse();

    let config = AnalysisConfig::load(cli.config.as_deref())
        .with_context(|| "failed to load analysis config")?;
    let csv_path = resolve_details(cli.details)?;
    log::info!("Loading data from: {}", csv_path.display());
    let rows = load_draw_details(&csv_path)
        .with_context(|| format!("failed to load draw details {}", csv_path.display()))?;
    log::info!("Loaded {} draw games", rows.len());

    let out_dir = csv_path.parent().unwrap_or(Path::new(".")).join(OUTPUT_DIR);
    ensure_dir(&out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    // ---------------------------------------------------------------------------
    // 図
    // ---------------------------------------------------------------------------
    let t = config.progress;
    let scatter = ProgressScatter::from_details(&rows, t);
    let differences = ProgressDifferences::from_details(&rows);
    let heatmap = ProgressHeatmap::from_details(&rows, t);
    let overlap = OverlapPanels::from_details(&rows, t);
    let symmetry = SymmetryChart::from_details(&rows, t);
    let charts = [
        Chart::ProgressScatter(&scatter),
        Chart::ProgressDifferences(&differences),
        Chart::ProgressHeatmap(&heatmap),
        Chart::OverlapPanels(&overlap),
        Chart::Symmetry(&symmetry),
    ];
    let failed = render_all(&charts, &out_dir, config.chart);

    // ---------------------------------------------------------------------------
    // 要約（図の成否に関わらず出す）
    // ---------------------------------------------------------------------------
    let summary = DrawSummary::from_details(&rows, t).render();
    write_text("-", &summary).context("failed to write summary")?;
    let summary_path = out_dir.join(SUMMARY_FILE);
    write_text(&summary_path, &summary)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    log::info!("Saved: {}", summary_path.display());

    if failed > 0 {
        bail!("{failed} of {} charts failed to render", charts.len());
    }
    log::info!("Files saved to: {}", out_dir.display());
    Ok(())
}
