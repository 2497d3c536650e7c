//! PNG charts: line charts of the selected fields of each family, and bar
//! charts of the overview comparisons.

use crate::report;
use anyhow::{Context, Result};
use ecovision_core::{error::EcovisionError, overview::Comparison};
use ecovision_schemas::{
    record::{AirRecord, MetricRecord, NoiseRecord, SoilRecord, WaterRecord},
    selection::Family,
    series::Series,
};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const EMPTY_SELECTION: &str = "Select at least one parameter to show the chart.";

const CHART_SIZE: (u32, u32) = (1024, 600);
const AXIS_TIME_FORMAT: &str = "%d %H:%M";

/// Fields charted when the command line does not choose any.
pub fn default_fields(family: Family) -> &'static [&'static str] {
    match family {
        Family::Air => &["pm25", "pm10"],
        Family::Water => &["tds_mg_per_l", "turbidity_NTU"],
        Family::Soil => &["heavy_metals_ppm", "organic_matter_percent"],
        Family::Noise => &["db", "peak_db"],
    }
}

pub fn fields_of(family: Family) -> &'static [&'static str] {
    match family {
        Family::Air => AirRecord::FIELDS,
        Family::Water => WaterRecord::FIELDS,
        Family::Soil => SoilRecord::FIELDS,
        Family::Noise => NoiseRecord::FIELDS,
    }
}

/// Rejects requested names that no selected family carries.
pub fn validate_fields(families: &[Family], requested: &[String]) -> Result<(), EcovisionError> {
    for field in requested {
        if !families.iter().any(|f| fields_of(*f).contains(&field.as_str())) {
            let expected: Vec<&str> = families.iter().flat_map(|f| fields_of(*f).iter().copied()).collect();
            let family_names: Vec<&str> = families.iter().map(|f| f.name()).collect();
            return Err(EcovisionError::UnknownField {
                family: family_names.join("/"),
                field: field.clone(),
                expected: expected.join(", "),
            });
        }
    }
    Ok(())
}

/// Fields to chart for `family`: the defaults when nothing was requested,
/// otherwise the requested names this family carries, in request order.
pub fn chart_fields(family: Family, requested: Option<&[String]>) -> Vec<&'static str> {
    match requested {
        None => default_fields(family).to_vec(),
        Some(names) => names
            .iter()
            .filter_map(|name| fields_of(family).iter().copied().find(|f| *f == name.as_str()))
            .collect(),
    }
}

pub fn chart_path<R: MetricRecord>(dir: &Path, series: &Series<R>) -> PathBuf {
    dir.join(format!(
        "{}_{}_last_{}h.png",
        series.city().file_stem(),
        R::FAMILY.slug(),
        series.len()
    ))
}

/// Draws one line per field over the window. Returns `None` without touching the
/// filesystem when there is nothing to draw.
pub fn render_chart<R: MetricRecord>(
    dir: &Path,
    series: &Series<R>,
    fields: &[&'static str],
) -> Result<Option<PathBuf>> {
    if fields.is_empty() || series.is_empty() {
        return Ok(None);
    }

    let columns: Vec<(&str, Vec<f64>)> = fields
        .iter()
        .filter_map(|f| series.column(f).map(|c| (*f, c)))
        .collect();
    let max_value = columns
        .iter()
        .flat_map(|(_, c)| c.iter().copied())
        .fold(0.0, f64::max);
    let min_value = columns
        .iter()
        .flat_map(|(_, c)| c.iter().copied())
        .fold(max_value, f64::min)
        .min(0.0);

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;
    let path = chart_path(dir, series);
    let family = R::FAMILY;
    let timestamps: Vec<String> = series
        .records()
        .iter()
        .map(|r| r.timestamp().format(AXIS_TIME_FORMAT).to_string())
        .collect();
    let last_index = series.len() - 1;

    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} - {}", report::heading(family), series.city()),
                ("sans-serif", 32).into_font(),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0usize..last_index.max(1), min_value..max_value * 1.1 + 1.0)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .x_labels(12)
            .x_label_formatter(&|i| timestamps.get(*i).cloned().unwrap_or_default())
            .draw()?;

        let colors = [BLUE, RED, GREEN, MAGENTA, CYAN, BLACK];
        for (i, (field, column)) in columns.iter().enumerate() {
            let color = colors[i % colors.len()];
            chart
                .draw_series(LineSeries::new(
                    column.iter().copied().enumerate(),
                    color.stroke_width(2),
                ))?
                .label(report::label(family, field))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        root.present()?;
    }

    debug!(family = %family, path = %path.display(), fields = fields.len(), "rendered chart");
    Ok(Some(path))
}

pub fn comparison_chart_path(dir: &Path, comparison: &Comparison) -> PathBuf {
    let stem: String = comparison
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    dir.join(format!("overview_{}.png", stem))
}

/// One bar per place, best place highlighted.
pub fn render_comparison_chart(dir: &Path, comparison: &Comparison) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory: {}", dir.display()))?;
    let path = comparison_chart_path(dir, comparison);
    let names: Vec<&str> = comparison.entries.iter().map(|(name, _)| *name).collect();
    let best = comparison.best().map(|(name, _)| name);
    let top = comparison.max_value() * 1.1 + 1.0;

    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(comparison.title, ("sans-serif", 32).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0u32..(names.len() as u32).saturating_sub(1)).into_segmented(),
                0f64..top,
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(comparison.indicator)
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    names.get(*i as usize).map(|n| n.to_string()).unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        for (i, (name, value)) in comparison.entries.iter().enumerate() {
            let color = if Some(*name) == best { GREEN } else { BLUE };
            chart.draw_series(
                Histogram::vertical(&chart)
                    .style(color.mix(0.7).filled())
                    .margin(20)
                    .data(std::iter::once((i as u32, *value))),
            )?;
        }
        root.present()?;
    }

    debug!(title = comparison.title, path = %path.display(), "rendered comparison chart");
    Ok(path)
}
