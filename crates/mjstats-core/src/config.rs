//! 集計設定と設定ファイル

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::BandBounds;
use crate::classify::ProgressThresholds;
use crate::error::{StatsError, StatsResult};
use crate::types::NervousnessConfig;

/// 図のピクセルサイズ
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self { width: 1400, height: 800 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// 主要な数値を取る構成
    pub baseline: NervousnessConfig,
    pub bands: BandBounds,
    pub progress: ProgressThresholds,
    pub chart: ChartSize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            baseline: NervousnessConfig::Neither,
            bands: BandBounds::default(),
            progress: ProgressThresholds::default(),
            chart: ChartSize::default(),
        }
    }
}

/// ファイル上の形。全キー省略可で、指定したものだけ既定値を上書きする
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfigFile {
    #[serde(default)]
    pub baseline: Option<NervousnessConfig>,
    #[serde(default)]
    pub band_low: Option<f64>,
    #[serde(default)]
    pub band_high: Option<f64>,
    #[serde(default)]
    pub progress_mid: Option<f64>,
    #[serde(default)]
    pub progress_high: Option<f64>,
    #[serde(default)]
    pub chart_width: Option<u32>,
    #[serde(default)]
    pub chart_height: Option<u32>,
}

/// 拡張子で形式を選ぶ（toml / yaml / yml / json）
pub fn load_config_file<P: AsRef<Path>>(path: P) -> StatsResult<AnalysisConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StatsError::DataUnavailable { path: path.to_path_buf() });
    }
    let data = std::fs::read_to_string(path)?;
    let invalid = |message: String| StatsError::Config {
        path: path.to_path_buf(),
        message,
    };
    let ext = path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase());
    match ext.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&data).map_err(|e| invalid(e.to_string())),
        Some("json") => serde_json::from_str(&data).map_err(|e| invalid(e.to_string())),
        _ => toml::from_str(&data).map_err(|e| invalid(e.to_string())),
    }
}

impl AnalysisConfig {
    /// 既定値にファイルの値を重ねる。範囲が逆転するしきい値は警告して捨てる
    pub fn merged(file: Option<AnalysisConfigFile>) -> Self {
        let mut out = Self::default();
        let Some(f) = file else {
            return out;
        };
        if let Some(b) = f.baseline {
            out.baseline = b;
        }
        if let Some(x) = f.band_low {
            out.bands.low = x;
        }
        if let Some(x) = f.band_high {
            out.bands.high = x;
        }
        if let Some(x) = f.progress_mid {
            out.progress.mid = x;
        }
        if let Some(x) = f.progress_high {
            out.progress.high = x;
        }
        if let Some(x) = f.chart_width {
            out.chart.width = x;
        }
        if let Some(x) = f.chart_height {
            out.chart.height = x;
        }

        let defaults = Self::default();
        if !(out.bands.low.is_finite() && out.bands.high.is_finite() && out.bands.low <= out.bands.high) {
            log::warn!(
                "invalid win-rate band {}..{}; reset to {}..{}",
                out.bands.low,
                out.bands.high,
                defaults.bands.low,
                defaults.bands.high
            );
            out.bands = defaults.bands;
        }
        if !(out.progress.mid.is_finite()
            && out.progress.high.is_finite()
            && out.progress.mid <= out.progress.high)
        {
            log::warn!(
                "invalid progress thresholds mid={} high={}; reset to defaults",
                out.progress.mid,
                out.progress.high
            );
            out.progress = defaults.progress;
        }
        if out.chart.width == 0 || out.chart.height == 0 {
            log::warn!("chart size must be non-zero; reset to defaults");
            out.chart = defaults.chart;
        }
        out
    }

    pub fn load(path: Option<&Path>) -> StatsResult<Self> {
        let file = path.map(load_config_file).transpose()?;
        Ok(Self::merged(file))
    }
}
