// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! SVG charts of share tables, Lorenz curves, /8 histograms, and Hilbert maps.
//!
//! Every function validates its input, renders the whole chart, and writes it to `path`. Failures are
//! reported as [`crate::Error::ChartError`].

use std::f64::consts::PI;
use std::path::Path;

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use tracing::info;

use crate::distribution::ShareEntry;
use crate::hilbert::HilbertMap;
use crate::histogram::OctetHistogram;

pub mod error;

pub use error::Error;

use crate::Result;

static SIZE: (u32, u32) = (1200, 800);
static SQUARE_SIZE: (u32, u32) = (1000, 1000);
static FONT: &str = "sans-serif";

/// Vertical bars of the entries' percentages, labeled with the percentage on top of each bar.
pub fn bar_chart(title: &str, entries: &[ShareEntry], path: &Path) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::InvalidData("no entries to draw".to_string()).into());
    }
    let labels: Vec<String> = entries.iter().map(ShareEntry::label).collect();
    let max = entries.iter().map(|x| x.percentage).fold(0.0, f64::max);
    let y_max = (max * 1.15).max(1.0);

    let drawing_area = SVGBackend::new(path, SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| Error::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, (FONT, 30))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(70)
        .build_cartesian_2d((0..entries.len()).into_segmented(), 0.0..y_max)
        .map_err(|e| Error::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(entries.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Share (%)")
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style((FONT, 14))
        .draw()
        .map_err(|e| Error::Drawing(e.to_string()))?;

    let style = Palette99::pick(0).filled();
    chart
        .draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), entry.percentage)],
                style,
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(|e| Error::Drawing(e.to_string()))?;
    chart
        .draw_series(entries.iter().enumerate().map(|(i, entry)| {
            Text::new(
                format!("{:.1}%", entry.percentage),
                (SegmentValue::CenterOf(i), entry.percentage + y_max * 0.03),
                (FONT, 14).into_font(),
            )
        }))
        .map_err(|e| Error::Drawing(e.to_string()))?;

    drawing_area.present().map_err(|e| Error::Drawing(e.to_string()))?;
    info!("Wrote bar chart to '{}'.", path.display());

    Ok(())
}

/// Pie of the entries' percentages with a legend on the right side.
pub fn pie_chart(title: &str, entries: &[ShareEntry], path: &Path) -> Result<()> {
    let total: f64 = entries.iter().map(|x| x.percentage).sum();
    if entries.is_empty() || total <= 0.0 {
        return Err(Error::InvalidData("no entries to draw".to_string()).into());
    }

    let drawing_area = SVGBackend::new(path, SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| Error::DrawingArea(e.to_string()))?;
    let drawing_area = drawing_area
        .titled(title, (FONT, 30))
        .map_err(|e| Error::DrawingArea(e.to_string()))?;
    let (pie_area, legend_area) = drawing_area.split_horizontally(SIZE.0 * 3 / 5);

    let (width, height) = pie_area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = (width.min(height) as f64 / 2.0) * 0.85;

    // Start at 12 o'clock and go clockwise
    let mut start = -PI / 2.0;
    for (i, entry) in entries.iter().enumerate() {
        let sweep = entry.percentage / total * 2.0 * PI;
        let end = start + sweep;
        let color = Palette99::pick(i);

        pie_area
            .draw(&Polygon::new(wedge(center, radius, start, end), color.filled()))
            .map_err(|e| Error::Drawing(e.to_string()))?;

        if entry.percentage >= 2.0 {
            let middle = start + sweep / 2.0;
            let position = point_on_circle(center, radius * 0.7, middle);
            pie_area
                .draw(&Text::new(
                    format!("{:.1}%", entry.percentage),
                    (position.0 - 20, position.1 - 7),
                    (FONT, 16).into_font(),
                ))
                .map_err(|e| Error::Drawing(e.to_string()))?;
        }
        start = end;
    }

    for (i, entry) in entries.iter().enumerate() {
        let y = 40 + i as i32 * 30;
        legend_area
            .draw(&Rectangle::new([(10, y), (30, y + 20)], Palette99::pick(i).filled()))
            .map_err(|e| Error::Drawing(e.to_string()))?;
        legend_area
            .draw(&Text::new(
                format!("{} ({})", entry.label(), entry.count),
                (40, y + 3),
                (FONT, 16).into_font(),
            ))
            .map_err(|e| Error::Drawing(e.to_string()))?;
    }

    drawing_area.present().map_err(|e| Error::Drawing(e.to_string()))?;
    info!("Wrote pie chart to '{}'.", path.display());

    Ok(())
}

fn point_on_circle(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

fn wedge(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
    // One vertex per degree at least
    let steps = (((end - start) / (PI / 180.0)).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push(point_on_circle(center, radius, angle));
    }
    points
}

/// Lorenz curves of one or more distributions against the line of perfect equality.
pub fn lorenz_chart(title: &str, curves: &[(String, Vec<(f64, f64)>)], path: &Path) -> Result<()> {
    if curves.iter().all(|(_, points)| points.is_empty()) {
        return Err(Error::InvalidData("no Lorenz curve points to draw".to_string()).into());
    }

    let drawing_area = SVGBackend::new(path, SQUARE_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| Error::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, (FONT, 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(|e| Error::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Cumulative share of entities")
        .y_desc("Cumulative share of resolvers")
        .label_style((FONT, 14))
        .draw()
        .map_err(|e| Error::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(vec![(0.0, 0.0), (1.0, 1.0)], &BLACK))
        .map_err(|e| Error::Drawing(e.to_string()))?
        .label("Perfect equality")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    for (i, (name, points)) in curves.iter().enumerate().filter(|(_, (_, points))| !points.is_empty()) {
        let color = Palette99::pick(i + 1).to_rgba();
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| Error::Drawing(e.to_string()))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, 16))
        .draw()
        .map_err(|e| Error::Drawing(e.to_string()))?;

    drawing_area.present().map_err(|e| Error::Drawing(e.to_string()))?;
    info!("Wrote Lorenz chart to '{}'.", path.display());

    Ok(())
}

/// One bar per first octet with at least one observation.
pub fn histogram_chart(title: &str, histogram: &OctetHistogram, path: &Path) -> Result<()> {
    if histogram.is_empty() {
        return Err(Error::InvalidData("no buckets to draw".to_string()).into());
    }
    let y_max = histogram.max_count() + histogram.max_count() / 10 + 1;

    let drawing_area = SVGBackend::new(path, SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| Error::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, (FONT, 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0u32..256u32, 0usize..y_max)
        .map_err(|e| Error::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(17)
        .x_desc("First octet")
        .y_desc("Resolvers")
        .label_style((FONT, 14))
        .draw()
        .map_err(|e| Error::Drawing(e.to_string()))?;

    let style = Palette99::pick(0).filled();
    chart
        .draw_series(histogram.buckets.iter().map(|bucket| {
            let octet = bucket.octet as u32;
            Rectangle::new([(octet, 0), (octet + 1, bucket.count)], style)
        }))
        .map_err(|e| Error::Drawing(e.to_string()))?;

    drawing_area.present().map_err(|e| Error::Drawing(e.to_string()))?;
    info!("Wrote histogram chart to '{}'.", path.display());

    Ok(())
}

/// Scatter plot of a Hilbert map without axes.
pub fn hilbert_chart(title: &str, map: &HilbertMap, path: &Path) -> Result<()> {
    if map.is_empty() {
        return Err(Error::InvalidData("no points to draw".to_string()).into());
    }
    let side = map.curve.side() as u32;

    let drawing_area = SVGBackend::new(path, SQUARE_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| Error::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(title, (FONT, 30))
        .margin(20)
        .build_cartesian_2d(0u32..side, 0u32..side)
        .map_err(|e| Error::ChartConfig(e.to_string()))?;

    let style = Palette99::pick(0).mix(0.5).filled();
    chart
        .draw_series(map.points.iter().map(|point| Circle::new((point.x, point.y), 1, style)))
        .map_err(|e| Error::Drawing(e.to_string()))?;

    drawing_area.present().map_err(|e| Error::Drawing(e.to_string()))?;
    info!("Wrote Hilbert map with {} points to '{}'.", map.len(), path.display());

    Ok(())
}
