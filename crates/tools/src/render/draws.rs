//! 引き分け詳細表の図

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use mjstats_core::charts::{
    OverlapPanels, ProgressDifferences, ProgressHeatmap, ProgressScatter, SymmetryChart,
};
use mjstats_core::config::ChartSize;
use mjstats_core::stats::{BoxStats, Histogram};

use super::RenderResult;
use super::primitives::*;

fn centered(size: i32) -> TextStyle<'static> {
    text_style(size).pos(Pos::new(HPos::Center, VPos::Center))
}

fn draw_legend<'a, 'b: 'a>(ctx: &mut Ctx<'a, 'b>, pos: SeriesLabelPosition) -> RenderResult {
    ctx.configure_series_labels()
        .position(pos)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

/// 重なり率の色の凡例（0/50/100%）
fn overlap_legend(ctx: &mut Ctx<'_, '_>) -> RenderResult {
    for pct in [0.0, 50.0, 100.0] {
        let color = overlap_color(pct);
        ctx.draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
            .label(format!("Pattern Overlap {pct:.0}%"))
            .legend(move |(x, y)| Circle::new((x + 8, y), 5, color.filled()));
    }
    Ok(())
}

fn histogram_bars(ctx: &mut Ctx<'_, '_>, hist: &Histogram, color: RGBColor) -> RenderResult {
    ctx.draw_series(hist.bins().map(|(l, r, c)| {
        Rectangle::new([(l, 0.0), (r, c as f64)], color.mix(0.7).filled())
    }))?;
    ctx.draw_series(hist.bins().map(|(l, r, c)| {
        Rectangle::new([(l, 0.0), (r, c as f64)], BLACK.stroke_width(1))
    }))?;
    Ok(())
}

/// 濃いセル（最大の半分超）は白字
fn text_is_light(count: usize, max: usize) -> bool {
    count * 2 > max
}

fn count_axis(hist: &Histogram) -> std::ops::Range<f64> {
    0.0..(hist.max_count().max(1) as f64 * 1.1)
}

pub fn progress_scatter(chart: &ProgressScatter, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            format!("Draw Progress: P1 vs P2 ({} draws)", chart.points.len()),
            (FONT, 24),
        )
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..105f64, 0f64..105f64)?;
    ctx.configure_mesh()
        .x_desc("P1 Final Progress (%)")
        .y_desc("P2 Final Progress (%)")
        .draw()?;

    ctx.draw_series(chart.points.iter().map(|p| {
        Circle::new((p.x, p.y), 4, overlap_color(p.overlap).mix(0.6).filled())
    }))?;

    ctx.draw_series(LineSeries::new(vec![(0.0, 0.0), (100.0, 100.0)], BLACK.mix(0.3)))?
        .label("Equal Progress")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.3)));
    hline(&mut ctx, chart.threshold, 0.0, 105.0, GRAY)?;
    vline(&mut ctx, chart.threshold, 0.0, 105.0, GRAY)?;

    let t = chart.threshold;
    let labels = [
        ("Both High", (t + 100.0) / 2.0, (t + 100.0) / 2.0),
        ("P1 Ahead", (t + 100.0) / 2.0, t / 2.0),
        ("P2 Ahead", t / 2.0, (t + 100.0) / 2.0),
        ("Both Stuck", t / 2.0, t / 2.0),
    ];
    ctx.draw_series(labels.iter().map(|&(name, x, y)| Text::new(name, (x, y), centered(16))))?;

    overlap_legend(&mut ctx)?;
    draw_legend(&mut ctx, SeriesLabelPosition::UpperLeft)?;
    root.present()?;
    Ok(())
}

pub fn progress_differences(chart: &ProgressDifferences, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let panels = root.split_evenly((1, 2));

    // 左: 差の分布
    let hist = &chart.histogram;
    let mut left = ChartBuilder::on(&panels[0])
        .margin(15)
        .caption("Distribution of Progress Difference (P1 - P2)", (FONT, 20))
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(hist.lo..hist.hi, count_axis(hist))?;
    left.configure_mesh()
        .x_desc("Progress Difference (%)")
        .y_desc("Number of Draws")
        .draw()?;
    histogram_bars(&mut left, hist, STEEL_BLUE)?;
    let y_top = count_axis(hist).end;
    if (hist.lo..=hist.hi).contains(&0.0) {
        vline(&mut left, 0.0, 0.0, y_top, BLACK)?;
    }
    left.draw_series(std::iter::once(PathElement::new(
        vec![(chart.mean, 0.0), (chart.mean, y_top)],
        RED.stroke_width(2),
    )))?
    .label(format!("Mean = {:.1}%", chart.mean))
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    draw_legend(&mut left, SeriesLabelPosition::UpperRight)?;

    let (w, _) = panels[0].dim_in_pixel();
    let stats = [
        format!("Mean: {:.2}%", chart.mean),
        format!("Median: {:.2}%", chart.median),
        format!("Std Dev: {:.2}%", chart.std_dev),
    ];
    for (i, line) in stats.iter().enumerate() {
        panels[0].draw(&Text::new(
            line.clone(),
            (w as i32 - 230, 70 + 20 * i as i32),
            text_style(14),
        ))?;
    }

    // 右: 対戦別の箱ひげ（横向き）
    let n = chart.by_matchup.len().max(1);
    let mut right = ChartBuilder::on(&panels[1])
        .margin(15)
        .caption("Progress Difference by Matchup", (FONT, 20))
        .x_label_area_size(45)
        .y_label_area_size(110)
        .build_cartesian_2d(-100f64..100f64, -0.5f64..(n as f64 - 0.5))?;
    right
        .configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Progress Difference (P1 - P2) (%)")
        .draw()?;
    vline(&mut right, 0.0, -0.5, n as f64 - 0.5, BLACK)?;
    for (i, m) in chart.by_matchup.iter().enumerate() {
        draw_box(&mut right, &m.stats, i as f64, 0.3, false, CORAL)?;
    }
    let labels: Vec<(i32, i32, String)> = chart
        .by_matchup
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let (x, y) = right.backend_coord(&(-100.0, i as f64));
            (x, y, m.pairing.short_label())
        })
        .collect();
    for (x, y, label) in labels {
        panels[1].draw(&Text::new(label, (x - 8, y), row_label_style(14)))?;
    }

    root.present()?;
    Ok(())
}

pub fn progress_heatmap(chart: &ProgressHeatmap, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption("Draw Progress Heatmap (P1 vs P2)", (FONT, 24))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..100f64, 0f64..100f64)?;
    ctx.configure_mesh()
        .disable_mesh()
        .x_desc("P1 Final Progress (%)")
        .y_desc("P2 Final Progress (%)")
        .draw()?;

    let max = chart.max();
    let w = ProgressHeatmap::CELL_WIDTH;
    let cells: Vec<(f64, f64, usize)> = chart
        .counts
        .iter()
        .enumerate()
        .flat_map(|(x, col)| {
            col.iter().enumerate().map(move |(y, &c)| (x as f64 * w, y as f64 * w, c))
        })
        .collect();

    ctx.draw_series(cells.iter().map(|&(x, y, c)| {
        let t = if max == 0 { 0.0 } else { c as f64 / max as f64 };
        Rectangle::new([(x, y), (x + w, y + w)], heat_color(t).filled())
    }))?;
    ctx.draw_series(cells.iter().filter(|c| c.2 > 0).map(|&(x, y, c)| {
        // 濃いセルは白字
        let color: &'static RGBColor = if text_is_light(c, max) { &WHITE } else { &BLACK };
        Text::new(c.to_string(), (x + w / 2.0, y + w / 2.0), centered(13).color(color))
    }))?;

    ctx.draw_series(std::iter::once(PathElement::new(
        vec![(chart.threshold, 0.0), (chart.threshold, 100.0)],
        BLUE.stroke_width(2),
    )))?
    .label(format!("{:.0}% threshold", chart.threshold))
    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    ctx.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, chart.threshold), (100.0, chart.threshold)],
        BLUE.stroke_width(2),
    )))?;
    draw_legend(&mut ctx, SeriesLabelPosition::UpperLeft)?;
    root.present()?;
    Ok(())
}

/// 箱ひげパネル（カテゴリ順）。空のカテゴリは箱を描かない
fn category_boxes<'a>(
    area: &Area<'_>,
    title: &str,
    boxes: impl Iterator<Item = (&'a str, Option<&'a BoxStats>)>,
    threshold: f64,
    fill: RGBColor,
) -> RenderResult {
    let boxes: Vec<(&str, Option<&BoxStats>)> = boxes.collect();
    let n = boxes.len().max(1);
    let mut ctx = ChartBuilder::on(area)
        .margin(15)
        .caption(title, (FONT, 18))
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..105f64)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Final Progress (%)")
        .draw()?;
    hline(&mut ctx, threshold, -0.5, n as f64 - 0.5, RED)?;
    for (i, (_, b)) in boxes.iter().enumerate() {
        if let Some(b) = b {
            draw_box(&mut ctx, b, i as f64, 0.3, true, fill)?;
        }
    }
    let labels: Vec<((i32, i32), Vec<String>)> = boxes
        .iter()
        .enumerate()
        .map(|(i, (label, _))| (ctx.backend_coord(&(i as f64, 0.0)), vec![label.to_string()]))
        .collect();
    draw_tick_labels(area, &labels, &tick_style(12))
}

pub fn overlap_panels(chart: &OverlapPanels, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let panels = root.split_evenly((2, 2));

    category_boxes(
        &panels[0],
        "P1 Progress by Pattern Overlap",
        chart.panels.iter().map(|p| (p.category.label(), p.p1_box.as_ref())),
        chart.threshold,
        STEEL_BLUE,
    )?;
    category_boxes(
        &panels[1],
        "P2 Progress by Pattern Overlap",
        chart.panels.iter().map(|p| (p.category.label(), p.p2_box.as_ref())),
        chart.threshold,
        CORAL,
    )?;

    // 平均進捗（P1/P2 並べて）
    let n = chart.panels.len().max(1);
    let mut ctx = ChartBuilder::on(&panels[2])
        .margin(15)
        .caption("Average Progress by Pattern Overlap", (FONT, 18))
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..100f64)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Average Final Progress (%)")
        .draw()?;
    let w = 0.35;
    ctx.draw_series(chart.panels.iter().enumerate().map(|(i, p)| {
        let x = i as f64;
        Rectangle::new([(x - w, 0.0), (x, p.p1_mean)], STEEL_BLUE.filled())
    }))?
    .label("P1")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], STEEL_BLUE.filled()));
    ctx.draw_series(chart.panels.iter().enumerate().map(|(i, p)| {
        let x = i as f64;
        Rectangle::new([(x, 0.0), (x + w, p.p2_mean)], CORAL.filled())
    }))?
    .label("P2")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], CORAL.filled()));
    hline(&mut ctx, chart.threshold, -0.5, n as f64 - 0.5, RED)?;
    let labels: Vec<((i32, i32), Vec<String>)> = chart
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| (ctx.backend_coord(&(i as f64, 0.0)), vec![p.category.label().to_string()]))
        .collect();
    draw_legend(&mut ctx, SeriesLabelPosition::UpperLeft)?;
    draw_tick_labels(&panels[2], &labels, &tick_style(12))?;

    // 件数の円グラフ（色はカテゴリ位置で固定）
    let slices: Vec<(String, f64, RGBColor)> = chart
        .panels
        .iter()
        .zip(VIRIDIS)
        .filter(|(p, _)| p.count > 0)
        .map(|(p, color)| (format!("{} (n={})", p.category.label(), p.count), p.count as f64, color))
        .collect();
    draw_pie(&panels[3], "Distribution of Draws by Pattern Overlap", &slices)?;

    root.present()?;
    Ok(())
}

pub fn symmetry(chart: &SymmetryChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let panels = root.split_evenly((2, 2));

    // 合計進捗 vs 非対称度
    let mut ctx = ChartBuilder::on(&panels[0])
        .margin(15)
        .caption("Total Progress vs Asymmetry", (FONT, 18))
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..200f64, 0f64..100f64)?;
    ctx.configure_mesh()
        .x_desc("P1 + P2 Progress (%)")
        .y_desc("|P1 - P2| (%)")
        .draw()?;
    ctx.draw_series(chart.points.iter().map(|p| {
        Circle::new((p.sum, p.abs_diff), 3, overlap_color(p.overlap).mix(0.6).filled())
    }))?;
    ctx.draw_series(std::iter::once(PathElement::new(vec![(0.0, 20.0), (200.0, 20.0)], RED.mix(0.5))))?
        .label("Asymmetric (>20%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.mix(0.5)));
    draw_legend(&mut ctx, SeriesLabelPosition::UpperRight)?;

    // 合計進捗の分布
    let hist = &chart.sum_histogram;
    let mut ctx = ChartBuilder::on(&panels[1])
        .margin(15)
        .caption("Distribution of Total Progress", (FONT, 18))
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(hist.lo..hist.hi, count_axis(hist))?;
    ctx.configure_mesh()
        .x_desc("P1 + P2 Progress (%)")
        .y_desc("Number of Draws")
        .draw()?;
    histogram_bars(&mut ctx, hist, MIXED)?;
    let both_high = chart.thresholds.high * 2.0;
    if (hist.lo..=hist.hi).contains(&both_high) {
        let top = count_axis(hist).end;
        ctx.draw_series(std::iter::once(PathElement::new(
            vec![(both_high, 0.0), (both_high, top)],
            RED.stroke_width(2),
        )))?
        .label(format!("Both at {:.0}%", chart.thresholds.high))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
        draw_legend(&mut ctx, SeriesLabelPosition::UpperLeft)?;
    }

    // 引き分けタイプ（件数の多い順、横棒）
    let ranked = chart.draw_types.ranked();
    let n = ranked.len().max(1);
    let top = ranked.first().map_or(1, |r| r.1.max(1)) as f64 * 1.15;
    let mut ctx = ChartBuilder::on(&panels[2])
        .margin(15)
        .caption("Draw Type Classification", (FONT, 18))
        .x_label_area_size(40)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..top, -0.5f64..(n as f64 - 0.5))?;
    ctx.configure_mesh()
        .disable_y_mesh()
        .y_label_formatter(&|_| String::new())
        .x_desc("Number of Draws")
        .draw()?;
    ctx.draw_series(ranked.iter().enumerate().map(|(i, &(ty, c))| {
        let y = i as f64;
        Rectangle::new([(0.0, y - 0.35), (c as f64, y + 0.35)], CATEGORY[ty as usize].filled())
    }))?;
    let label_style = text_style(13).pos(Pos::new(HPos::Left, VPos::Center));
    ctx.draw_series(ranked.iter().enumerate().map(|(i, &(_, c))| {
        Text::new(c.to_string(), (c as f64 + top * 0.01, i as f64), label_style.clone())
    }))?;
    let labels: Vec<(i32, i32, &str)> = ranked
        .iter()
        .enumerate()
        .map(|(i, (ty, _))| {
            let (x, y) = ctx.backend_coord(&(0.0, i as f64));
            (x, y, ty.label())
        })
        .collect();
    for (x, y, label) in labels {
        panels[2].draw(&Text::new(label, (x - 8, y), row_label_style(13)))?;
    }

    let slices: Vec<(String, f64, RGBColor)> = ranked
        .iter()
        .map(|&(ty, c)| (ty.label().to_string(), c as f64, CATEGORY[ty as usize]))
        .collect();
    draw_pie(&panels[3], "Draw Type Distribution", &slices)?;

    root.present()?;
    Ok(())
}
