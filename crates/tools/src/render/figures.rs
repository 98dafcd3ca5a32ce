//! 結果表の図（勝率・引き分け・神経質さ・進捗領域・リシャッフル）

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use mjstats_core::charts::{
    DrawAnalysisChart, NervousnessChart, ProgressRegionChart, ReshuffleChart, WinRateChart,
};
use mjstats_core::config::ChartSize;
use mjstats_core::types::{MatchupGroup, NervousnessConfig};

use super::RenderResult;
use super::primitives::*;

const BAR_WIDTH: f64 = 0.35;

/// 0..n のカテゴリ軸の範囲
fn category_range(n: usize) -> std::ops::Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

pub fn win_rates(chart: &WinRateChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let n = chart.bars.len();
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption("Win Rates in Decisive Games", (FONT, 26))
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(n), 0f64..100f64)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Win Rate in Decisive Games (%)")
        .draw()?;

    hline(&mut ctx, 50.0, -0.5, n as f64 - 0.5, GRAY)?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, b)| {
        let x = i as f64;
        Rectangle::new([(x - BAR_WIDTH, 0.0), (x, b.p1_rate)], BAYESIAN.filled())
    }))?
    .label("P1/Winner")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], BAYESIAN.filled()));
    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, b)| {
        let x = i as f64;
        Rectangle::new([(x, 0.0), (x + BAR_WIDTH, b.p2_rate)], GREEDY.filled())
    }))?
    .label("P2/Loser")
    .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], GREEDY.filled()));

    // 95% 信頼区間
    let half = BAR_WIDTH / 2.0;
    ctx.draw_series(chart.bars.iter().enumerate().flat_map(|(i, b)| {
        let x = i as f64;
        [
            ErrorBar::new_vertical(
                x - half,
                (b.p1_rate - b.p1_ci).max(0.0),
                b.p1_rate,
                (b.p1_rate + b.p1_ci).min(100.0),
                BLACK.stroke_width(1),
                6,
            ),
            ErrorBar::new_vertical(
                x + half,
                (b.p2_rate - b.p2_ci).max(0.0),
                b.p2_rate,
                (b.p2_rate + b.p2_ci).min(100.0),
                BLACK.stroke_width(1),
                6,
            ),
        ]
    }))?;

    let labels: Vec<((i32, i32), Vec<String>)> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| {
            (
                ctx.backend_coord(&(i as f64, 0.0)),
                vec![
                    b.pairing.p1.display_name().to_string(),
                    format!("vs {}", b.pairing.p2.display_name()),
                ],
            )
        })
        .collect();

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    draw_tick_labels(&root, &labels, &tick_style(14))?;
    root.present()?;
    Ok(())
}

pub fn draw_analysis(chart: &DrawAnalysisChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let panels = root.split_evenly((2, 1));
    let n = chart.bars.len();

    let panel_defs: [(&str, &str, fn(&mjstats_core::charts::DrawBar) -> f64); 2] = [
        ("(A) Draw Rates by Agent Pairing", "Draw Rate (%)", |b| b.draw_pct),
        ("(B) Pattern Overlap in Draws", "Pattern Overlap in Draws (%)", |b| b.overlap_pct),
    ];

    for (idx, (area, (title, y_desc, value))) in panels.iter().zip(panel_defs).enumerate() {
        let mut ctx = ChartBuilder::on(area)
            .margin(15)
            .caption(title, (FONT, 20))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(category_range(n), 0f64..100f64)?;
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_desc(y_desc)
            .draw()?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, b)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, value(b))], group_color(b.group).filled())
        }))?;

        if idx == 0 {
            for g in [MatchupGroup::Strategic, MatchupGroup::Mixed, MatchupGroup::Baseline] {
                legend_entry(&mut ctx, g.legend(), group_color(g))?;
            }
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::LowerLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        } else {
            hline(&mut ctx, 50.0, -0.5, n as f64 - 0.5, GRAY)?;
            let labels: Vec<((i32, i32), Vec<String>)> = chart
                .bars
                .iter()
                .enumerate()
                .map(|(i, b)| (ctx.backend_coord(&(i as f64, 0.0)), vec![b.pairing.short_label()]))
                .collect();
            draw_tick_labels(area, &labels, &tick_style(14))?;
        }
    }
    root.present()?;
    Ok(())
}

pub fn nervousness(chart: &NervousnessChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let values = chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let lowest = values.fold(f64::INFINITY, f64::min);
    // 既定の表示範囲は 75-100%。それより低い値があれば広げる
    let y_min = if lowest.is_finite() && lowest < 75.0 { (lowest - 5.0).floor().max(0.0) } else { 75.0 };

    let configs = NervousnessConfig::ALL;
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption("Draw Rate by Nervousness Configuration", (FONT, 26))
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.3f64..(configs.len() as f64 - 0.7), y_min..100f64)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Draw Rate (%)")
        .draw()?;

    let colors = [BAYESIAN, RANDOM_COMMIT, GREEDY];
    for (series, color) in chart.series.iter().zip(colors) {
        let points: Vec<(f64, f64)> =
            series.points.iter().map(|(c, v)| (c.index() as f64, *v)).collect();
        ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(series.pairing.long_label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        ctx.draw_series(points.into_iter().map(|p| Circle::new(p, 5, color.filled())))?;
    }

    let labels: Vec<((i32, i32), Vec<String>)> = configs
        .iter()
        .map(|c| {
            let words: Vec<String> = c.tick_label().rsplitn(2, ' ').map(str::to_string).collect();
            // "P1 Only Nervous" -> ["P1 Only", "Nervous"]
            (ctx.backend_coord(&(c.index() as f64, y_min)), words.into_iter().rev().collect())
        })
        .collect();

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    draw_tick_labels(&root, &labels, &tick_style(14))?;
    root.present()?;
    Ok(())
}

pub fn progress_regions(chart: &ProgressRegionChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption("Progress at Draw: Bayesian vs Bayesian", (FONT, 24))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..100f64, 0f64..100f64)?;
    ctx.configure_mesh()
        .x_desc("P1 Final Progress (%)")
        .y_desc("P2 Final Progress (%)")
        .draw()?;

    hline(&mut ctx, chart.threshold, 0.0, 100.0, GRAY)?;
    vline(&mut ctx, chart.threshold, 0.0, 100.0, GRAY)?;

    ctx.draw_series(LineSeries::new(vec![(0.0, 0.0), (100.0, 100.0)], BLACK.mix(0.3)))?
        .label("Equal Progress")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.3)));

    let style = text_style(16).pos(Pos::new(HPos::Center, VPos::Center));
    ctx.draw_series(chart.regions.iter().map(|r| {
        Text::new(format!("{} ({:.1}%)", r.name, r.pct), (r.x, r.y), style.clone())
    }))?;

    ctx.draw_series(std::iter::once(Circle::new(
        (chart.avg_p1, chart.avg_p2),
        9,
        RED.filled(),
    )))?
    .label(format!("Average (P1={:.1}%, P2={:.1}%)", chart.avg_p1, chart.avg_p2))
    .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

pub fn reshuffle(chart: &ReshuffleChart, path: &Path, size: ChartSize) -> RenderResult {
    let root = open_area(path, size)?;
    let n = chart.bars.len();
    let y_max = chart.bars.iter().map(|b| b.total()).fold(105.0, f64::max);
    let mut ctx = ChartBuilder::on(&root)
        .margin(20)
        .caption("Game Outcomes: Before vs After Reshuffle", (FONT, 26))
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(category_range(n), 0f64..y_max)?;
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_| String::new())
        .y_desc("Percentage of Games (%)")
        .draw()?;

    let w = 0.35;
    let segments: [(&str, RGBColor); 3] = [
        ("Won Before Reshuffle", WON_BEFORE),
        ("Won After Reshuffle", WON_AFTER),
        ("Drew After Reshuffle", DREW),
    ];
    for (k, (label, color)) in segments.into_iter().enumerate() {
        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, b)| {
            let stack = [b.won_before, b.won_after, b.drew];
            let bottom: f64 = stack[..k].iter().sum();
            let x = i as f64;
            Rectangle::new([(x - w, bottom), (x + w, bottom + stack[k])], color.filled())
        }))?
        .label(label)
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    let labels: Vec<((i32, i32), Vec<String>)> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| (ctx.backend_coord(&(i as f64, 0.0)), vec![b.pairing.short_label()]))
        .collect();

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    draw_tick_labels(&root, &labels, &tick_style(14))?;
    root.present()?;
    Ok(())
}
