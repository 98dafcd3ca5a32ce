//! 図のPNG出力（plotters / BitMapBackend）
//!
//! 系列データは `mjstats_core::charts` で作り、ここでは描画だけを行う。
//! `plots` feature が無効なビルドでは [`render_png`] は常にエラーを返す。

use std::path::Path;

use mjstats_core::charts::{
    DrawAnalysisChart, NervousnessChart, OverlapPanels, ProgressDifferences, ProgressHeatmap,
    ProgressRegionChart, ProgressScatter, ReshuffleChart, SymmetryChart, WinRateChart,
};
use mjstats_core::config::ChartSize;

#[cfg(feature = "plots")]
mod draws;
#[cfg(feature = "plots")]
mod figures;
#[cfg(feature = "plots")]
mod primitives;

pub type RenderResult = Result<(), Box<dyn std::error::Error>>;

/// 出力対象の図
#[derive(Clone, Copy, Debug)]
pub enum Chart<'a> {
    WinRates(&'a WinRateChart),
    DrawAnalysis(&'a DrawAnalysisChart),
    Nervousness(&'a NervousnessChart),
    ProgressRegions(&'a ProgressRegionChart),
    Reshuffle(&'a ReshuffleChart),
    ProgressScatter(&'a ProgressScatter),
    ProgressDifferences(&'a ProgressDifferences),
    ProgressHeatmap(&'a ProgressHeatmap),
    OverlapPanels(&'a OverlapPanels),
    Symmetry(&'a SymmetryChart),
}

impl Chart<'_> {
    /// 出力ファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            Chart::WinRates(_) => "fig_winrates.png",
            Chart::DrawAnalysis(_) => "fig_drawanalysis.png",
            Chart::Nervousness(_) => "fig_nervousness.png",
            Chart::ProgressRegions(_) => "fig_progress_histogram.png",
            Chart::Reshuffle(_) => "fig_reshuffle.png",
            Chart::ProgressScatter(_) => "draw_progress_scatter.png",
            Chart::ProgressDifferences(_) => "draw_progress_differences.png",
            Chart::ProgressHeatmap(_) => "draw_progress_heatmap.png",
            Chart::OverlapPanels(_) => "draw_progress_by_overlap.png",
            Chart::Symmetry(_) => "draw_symmetry_analysis.png",
        }
    }
}

#[cfg(feature = "plots")]
pub fn render_png(chart: Chart<'_>, path: &Path, size: ChartSize) -> RenderResult {
    match chart {
        Chart::WinRates(c) => figures::win_rates(c, path, size),
        Chart::DrawAnalysis(c) => figures::draw_analysis(c, path, size),
        Chart::Nervousness(c) => figures::nervousness(c, path, size),
        Chart::ProgressRegions(c) => figures::progress_regions(c, path, size),
        Chart::Reshuffle(c) => figures::reshuffle(c, path, size),
        Chart::ProgressScatter(c) => draws::progress_scatter(c, path, size),
        Chart::ProgressDifferences(c) => draws::progress_differences(c, path, size),
        Chart::ProgressHeatmap(c) => draws::progress_heatmap(c, path, size),
        Chart::OverlapPanels(c) => draws::overlap_panels(c, path, size),
        Chart::Symmetry(c) => draws::symmetry(c, path, size),
    }
}

#[cfg(not(feature = "plots"))]
pub fn render_png(_chart: Chart<'_>, _path: &Path, _size: ChartSize) -> RenderResult {
    Err("plots feature is not enabled".into())
}

/// 図をまとめて書き出す。失敗した図はログに残して次へ進み、失敗数を返す。
pub fn render_all(charts: &[Chart<'_>], out_dir: &Path, size: ChartSize) -> usize {
    let mut failed = 0;
    for chart in charts {
        let path = out_dir.join(chart.file_name());
        match render_png(*chart, &path, size) {
            Ok(()) => log::info!("Saved: {}", path.display()),
            Err(e) => {
                log::error!("failed to render {}: {e}", path.display());
                failed += 1;
            }
        }
    }
    failed
}
