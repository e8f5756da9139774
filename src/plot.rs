//! Demand charts
//!
//! Envelope charts (mean line inside the min/max band) over representative
//! days, month comparisons or a full span, and the day x hour distribution
//! heatmap. All charts are SVG files.

use std::{error::Error, path::Path};

use plotters::prelude::*;

use crate::{
    profile::{DayHourGrid, HOURS_PER_DAY},
    range::DateRange,
    reduce::Envelope,
    table::TimeTable,
};

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("got {tables} tables for {labels} labels, a one-to-one pairing is required")]
    LengthMismatch { tables: usize, labels: usize },
}

type Result<T> = std::result::Result<T, Box<dyn Error>>;

const SUBPLOT_WIDTH: u32 = 420;
const SUBPLOT_HEIGHT: u32 = 300;

fn check_pairing(tables: &[TimeTable], labels: &[&str]) -> std::result::Result<(), PlotError> {
    if tables.len() != labels.len() {
        return Err(PlotError::LengthMismatch {
            tables: tables.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}

fn tableau(i: usize) -> RGBColor {
    let color = colorous::TABLEAU10[i % colorous::TABLEAU10.len()];
    RGBColor(color.r, color.g, color.b)
}

// Contiguous (hours-from-range-start, value) runs, split at missing entries
// so gaps stay gaps instead of being bridged
fn segments(
    range: &DateRange,
    envelope: &Envelope,
    values: &[Option<f64>],
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = vec![];
    let mut run: Vec<(f64, f64)> = vec![];
    for (&t, value) in envelope.time.iter().zip(values.iter()) {
        match value {
            Some(v) => run.push((range.hours_from_start(t), *v)),
            None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
            None => (),
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

fn value_bounds(envelopes: &[Envelope]) -> Option<(f64, f64)> {
    let values: Vec<f64> = envelopes
        .iter()
        .flat_map(|e| e.min.iter().chain(e.max.iter()))
        .flatten()
        .copied()
        .collect();
    if values.is_empty() {
        return None;
    }
    Some((
        values.iter().cloned().fold(f64::INFINITY, f64::min),
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    ))
}

/// Grid of envelope charts, one row per table and one column per date range
///
/// Used both for representative-day comparisons (24h ranges) and for
/// month/week comparisons; y scale is shared across the whole grid. A range
/// selecting no rows leaves its panel empty.
pub fn plot_envelope_grid<P: AsRef<Path>>(
    path: P,
    tables: &[TimeTable],
    labels: &[&str],
    ranges: &[DateRange],
    y_desc: &str,
) -> Result<()> {
    check_pairing(tables, labels)?;
    let (n_rows, n_cols) = (tables.len(), ranges.len());
    let envelopes: Vec<Vec<Envelope>> = tables
        .iter()
        .map(|table| {
            let envelope = Envelope::of(table);
            ranges.iter().map(|range| envelope.between(range)).collect()
        })
        .collect();
    let bounds = value_bounds(
        &envelopes
            .iter()
            .flat_map(|row| row.iter().cloned())
            .collect::<Vec<_>>(),
    );

    let root = SVGBackend::new(
        path.as_ref(),
        (SUBPLOT_WIDTH * n_cols as u32, SUBPLOT_HEIGHT * n_rows as u32),
    )
    .into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((n_rows, n_cols));

    for (i, (row, &label)) in envelopes.iter().zip(labels.iter()).enumerate() {
        let rgb = tableau(i);
        for (j, (envelope, range)) in row.iter().zip(ranges.iter()).enumerate() {
            let area = &areas[i * n_cols + j];
            let (y_min, y_max) = match bounds {
                Some((lo, hi)) if hi > lo => (lo, hi),
                Some((lo, _)) => (lo, lo + 1f64),
                // nothing to draw anywhere, leave the panels blank
                None => break,
            };
            let mut chart = ChartBuilder::on(area)
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 30)
                .caption(
                    range.start().format("%B %d").to_string(),
                    ("sans-serif", 16),
                )
                .margin(8)
                .build_cartesian_2d(0f64..range.span_hours().max(1f64), y_min..y_max)?;
            let mut mesh = chart.configure_mesh();
            mesh.x_desc("Time (h)");
            if j == 0 {
                mesh.y_desc(y_desc);
            }
            mesh.draw()?;

            // min/max band
            for (lo_run, hi_run) in segments(range, envelope, &envelope.min)
                .into_iter()
                .zip(segments(range, envelope, &envelope.max))
            {
                let polygon: Vec<(f64, f64)> = lo_run
                    .iter()
                    .copied()
                    .chain(hi_run.iter().rev().copied())
                    .collect();
                chart.draw_series(std::iter::once(Polygon::new(polygon, rgb.mix(0.2))))?;
            }
            for run in segments(range, envelope, &envelope.min) {
                chart.draw_series(LineSeries::new(run, rgb.stroke_width(1)))?;
            }
            for run in segments(range, envelope, &envelope.max) {
                chart.draw_series(LineSeries::new(run, rgb.stroke_width(1)))?;
            }
            for (k, run) in segments(range, envelope, &envelope.mean).into_iter().enumerate() {
                let series = chart.draw_series(LineSeries::new(run, rgb.stroke_width(3)))?;
                if j == 0 && k == 0 {
                    series.label(label).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(3))
                    });
                }
            }
            if j == 0 {
                chart
                    .configure_series_labels()
                    .border_style(&BLACK)
                    .background_style(&WHITE.mix(0.8))
                    .position(SeriesLabelPosition::UpperLeft)
                    .draw()?;
            }
        }
    }
    root.present()?;
    Ok(())
}

/// One full-span envelope panel per table, e.g. a whole simulated year
pub fn plot_envelope_span<P: AsRef<Path>>(
    path: P,
    tables: &[TimeTable],
    labels: &[&str],
    range: &DateRange,
    y_desc: &str,
) -> Result<()> {
    plot_envelope_grid(path, tables, labels, std::slice::from_ref(range), y_desc)
}

/// Day x hour-of-day heatmap of one unit profile
pub fn plot_day_hour_heatmap<P: AsRef<Path>>(path: P, grid: &DayHourGrid) -> Result<()> {
    let root = SVGBackend::new(path.as_ref(), (2 * SUBPLOT_WIDTH, SUBPLOT_HEIGHT))
        .into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .set_label_area_size(LabelAreaPosition::Left, 50)
        .set_label_area_size(LabelAreaPosition::Bottom, 30)
        .caption(grid.label(), ("sans-serif", 16))
        .margin(8)
        .build_cartesian_2d(
            0f64..grid.n_days().max(1) as f64,
            0f64..HOURS_PER_DAY as f64,
        )?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Days")
        .y_desc("Hours")
        .draw()?;

    let (lo, hi) = match grid.value_range() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => (lo, lo + 1f64),
        // all cells missing, nothing to draw
        None => return Ok(root.present()?),
    };
    // reversed so low demand is blue and high demand red
    let gradient = colorous::RED_YELLOW_BLUE;
    chart.draw_series(grid.rows().enumerate().flat_map(|(day, row)| {
        row.iter().enumerate().filter_map(move |(hour, cell)| {
            cell.map(|value| {
                let color = gradient.eval_continuous(1f64 - (value - lo) / (hi - lo));
                Rectangle::new(
                    [
                        (day as f64, hour as f64),
                        (day as f64 + 1f64, hour as f64 + 1f64),
                    ],
                    RGBColor(color.r, color.g, color.b).filled(),
                )
            })
        })
    }))?;
    root.present()?;
    Ok(())
}
