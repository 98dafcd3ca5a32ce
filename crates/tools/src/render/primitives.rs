//! 配色と描画の部品

use std::f64::consts::PI;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use mjstats_core::config::ChartSize;
use mjstats_core::stats::BoxStats;
use mjstats_core::types::MatchupGroup;

use super::RenderResult;

pub type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
pub type Ctx<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub const FONT: &str = "sans-serif";

// ---------------------------------------------------------------------------
// 配色（色覚多様性に配慮した組み合わせ）
// ---------------------------------------------------------------------------

pub const BAYESIAN: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
pub const GREEDY: RGBColor = RGBColor(0xF7, 0x7F, 0x00);
pub const RANDOM_COMMIT: RGBColor = RGBColor(0x06, 0xA7, 0x7D);
pub const MIXED: RGBColor = RGBColor(0x6C, 0xB4, 0xEE);
pub const BASELINE: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);
pub const GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub const STEEL_BLUE: RGBColor = RGBColor(0x46, 0x82, 0xB4);
pub const CORAL: RGBColor = RGBColor(0xFF, 0x7F, 0x50);

pub const WON_BEFORE: RGBColor = RGBColor(0x2E, 0xCC, 0x71);
pub const WON_AFTER: RGBColor = RGBColor(0xF3, 0x9C, 0x12);
pub const DREW: RGBColor = RGBColor(0xE7, 0x4C, 0x3C);

/// 引き分けタイプ・カテゴリ用の5色
pub const CATEGORY: [RGBColor; 5] = [
    RGBColor(0xFF, 0x6B, 0x6B),
    RGBColor(0xFE, 0xCA, 0x57),
    RGBColor(0x48, 0xDB, 0xFB),
    RGBColor(0x1D, 0xD1, 0xA1),
    RGBColor(0xEE, 0x5A, 0x6F),
];

/// viridis から5点
pub const VIRIDIS: [RGBColor; 5] = [
    RGBColor(0x44, 0x01, 0x54),
    RGBColor(0x3B, 0x52, 0x8B),
    RGBColor(0x21, 0x90, 0x8C),
    RGBColor(0x5D, 0xC8, 0x63),
    RGBColor(0xFD, 0xE7, 0x25),
];

pub fn group_color(g: MatchupGroup) -> RGBColor {
    match g {
        MatchupGroup::Strategic => BAYESIAN,
        MatchupGroup::Mixed => MIXED,
        MatchupGroup::Baseline => BASELINE,
    }
}

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// 3点を結ぶカラーマップ。`t` は [0, 1] に丸める
fn ramp(stops: [RGBColor; 3], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    if t < 0.5 {
        lerp(stops[0], stops[1], t * 2.0)
    } else {
        lerp(stops[1], stops[2], (t - 0.5) * 2.0)
    }
}

/// 重なり率 0% は緑、100% は赤
pub fn overlap_color(pct: f64) -> RGBColor {
    ramp(
        [RGBColor(0x1A, 0x98, 0x50), RGBColor(0xFF, 0xFF, 0xBF), RGBColor(0xD7, 0x30, 0x27)],
        pct / 100.0,
    )
}

/// ヒートマップ（淡黄 → 橙 → 暗赤）
pub fn heat_color(t: f64) -> RGBColor {
    ramp(
        [RGBColor(0xFF, 0xFF, 0xCC), RGBColor(0xFD, 0x8D, 0x3C), RGBColor(0xBD, 0x00, 0x26)],
        t,
    )
}

// ---------------------------------------------------------------------------
// 部品
// ---------------------------------------------------------------------------

pub fn open_area(path: &Path, size: ChartSize) -> Result<Area<'_>, Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;
    Ok(root)
}

pub fn text_style(size: i32) -> TextStyle<'static> {
    (FONT, size).into_font().color(&BLACK)
}

/// 中央揃え・上端基準
pub fn tick_style(size: i32) -> TextStyle<'static> {
    text_style(size).pos(Pos::new(HPos::Center, VPos::Top))
}

/// 右揃え・縦中央基準（横向き箱ひげのカテゴリ名）
pub fn row_label_style(size: i32) -> TextStyle<'static> {
    text_style(size).pos(Pos::new(HPos::Right, VPos::Center))
}

/// 軸の外に複数行のラベルを置く。`anchor` はピクセル座標
pub fn draw_tick_labels(
    area: &Area<'_>,
    labels: &[((i32, i32), Vec<String>)],
    style: &TextStyle<'static>,
) -> RenderResult {
    let line_height = (style.font.get_size() * 1.3) as i32;
    for ((x, y), lines) in labels {
        for (i, line) in lines.iter().enumerate() {
            area.draw(&Text::new(line.clone(), (*x, *y + 6 + line_height * i as i32), style.clone()))?;
        }
    }
    Ok(())
}

/// 凡例だけに使う空の系列
pub fn legend_entry(ctx: &mut Ctx<'_, '_>, label: &str, color: RGBColor) -> RenderResult {
    ctx.draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
        .label(label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    Ok(())
}

pub fn hline(ctx: &mut Ctx<'_, '_>, y: f64, x0: f64, x1: f64, color: RGBColor) -> RenderResult {
    ctx.draw_series(std::iter::once(PathElement::new(vec![(x0, y), (x1, y)], color.mix(0.6))))?;
    Ok(())
}

pub fn vline(ctx: &mut Ctx<'_, '_>, x: f64, y0: f64, y1: f64, color: RGBColor) -> RenderResult {
    ctx.draw_series(std::iter::once(PathElement::new(vec![(x, y0), (x, y1)], color.mix(0.6))))?;
    Ok(())
}

/// 箱ひげ1本。`vertical` なら値がy軸、`at` はカテゴリ位置
pub fn draw_box(
    ctx: &mut Ctx<'_, '_>,
    b: &BoxStats,
    at: f64,
    half: f64,
    vertical: bool,
    fill: RGBColor,
) -> RenderResult {
    let pt = |pos: f64, val: f64| if vertical { (pos, val) } else { (val, pos) };
    ctx.draw_series(std::iter::once(Rectangle::new(
        [pt(at - half, b.q1), pt(at + half, b.q3)],
        fill.mix(0.8).filled(),
    )))?;
    ctx.draw_series(std::iter::once(Rectangle::new(
        [pt(at - half, b.q1), pt(at + half, b.q3)],
        BLACK.stroke_width(1),
    )))?;
    let lines = vec![
        vec![pt(at - half, b.median), pt(at + half, b.median)],
        vec![pt(at, b.whisker_low), pt(at, b.q1)],
        vec![pt(at, b.q3), pt(at, b.whisker_high)],
        vec![pt(at - half / 2.0, b.whisker_low), pt(at + half / 2.0, b.whisker_low)],
        vec![pt(at - half / 2.0, b.whisker_high), pt(at + half / 2.0, b.whisker_high)],
    ];
    ctx.draw_series(lines.into_iter().map(|l| PathElement::new(l, BLACK.stroke_width(1))))?;
    Ok(())
}

/// 円グラフ。12時の位置から反時計回りに並べる
pub fn draw_pie(area: &Area<'_>, title: &str, slices: &[(String, f64, RGBColor)]) -> RenderResult {
    let area = area.titled(title, (FONT, 22))?;
    let (w, h) = area.dim_in_pixel();
    let total: f64 = slices.iter().map(|s| s.1).sum();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    if total <= 0.0 {
        area.draw(&Text::new(
            "no data".to_string(),
            (cx as i32, cy as i32),
            text_style(16).pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;
        return Ok(());
    }
    let r = f64::from(w.min(h)) * 0.35;
    let at = |angle: f64, radius: f64| {
        let rad = angle * PI / 180.0;
        ((cx + radius * rad.cos()) as i32, (cy - radius * rad.sin()) as i32)
    };

    let mut start = 90.0;
    for (label, value, color) in slices {
        let sweep = value / total * 360.0;
        let steps = (sweep.ceil() as usize).max(1);
        let mut points = vec![(cx as i32, cy as i32)];
        points.extend((0..=steps).map(|i| at(start + sweep * i as f64 / steps as f64, r)));
        area.draw(&Polygon::new(points, color.filled()))?;

        let mid = start + sweep / 2.0;
        let style = text_style(14).pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            format!("{:.1}%", value / total * 100.0),
            at(mid, r * 0.6),
            style.clone(),
        ))?;
        area.draw(&Text::new(label.clone(), at(mid, r * 1.2), style))?;
        start += sweep;
    }
    Ok(())
}
