//! Plain-text rendering of dashboard panels and the conservation overview.

use ecovision_core::{
    analysis::{self, FieldSummary},
    dashboard::FamilyPanel,
    evaluation,
    overview::{Comparison, Trend},
};
use ecovision_schemas::{
    record::{MetricRecord, TIMESTAMP_FORMAT},
    rule::{Assessment, Condition},
    selection::Family,
    series::Series,
};
use std::fmt::Write;

const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const BAR_WIDTH: f64 = 40.0;

pub fn heading(family: Family) -> &'static str {
    match family {
        Family::Air => "Air Quality",
        Family::Water => "Water Quality",
        Family::Soil => "Soil Monitoring",
        Family::Noise => "Noise Monitoring",
    }
}

/// Display labels with units, in panel order.
pub fn labels(family: Family) -> &'static [(&'static str, &'static str)] {
    match family {
        Family::Air => &[
            ("aqi", "AQI"),
            ("pm25", "PM2.5 (µg/m³)"),
            ("pm10", "PM10 (µg/m³)"),
            ("co", "CO (ppm)"),
            ("no2", "NO₂ (ppb)"),
            ("so2", "SO₂ (ppb)"),
            ("o3", "O₃ (ppb)"),
        ],
        Family::Water => &[
            ("ph", "pH"),
            ("tds_mg_per_l", "TDS (mg/L)"),
            ("turbidity_NTU", "Turbidity (NTU)"),
            ("do_mg_per_l", "Dissolved O₂ (mg/L)"),
            ("nitrates_mg_per_l", "Nitrates (mg/L)"),
            ("lead_ppb", "Lead (ppb)"),
        ],
        Family::Soil => &[
            ("ph", "pH"),
            ("heavy_metals_ppm", "Heavy metals (ppm)"),
            ("pesticides_ppm", "Pesticides (ppm)"),
            ("organic_matter_percent", "Organic matter (%)"),
        ],
        Family::Noise => &[
            ("db", "Current dB"),
            ("peak_db", "Peak dB (last hour)"),
            ("exposure_index", "Exposure index"),
        ],
    }
}

pub fn label(family: Family, field: &str) -> String {
    labels(family)
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| field.to_string())
}

fn success_line(family: Family) -> &'static str {
    match family {
        Family::Air => "✅ Air quality within safe thresholds.",
        Family::Water => "✅ Water parameters within safe thresholds.",
        Family::Soil => "✅ Soil parameters look OK.",
        Family::Noise => "✅ Noise levels within safe thresholds.",
    }
}

/// Whole numbers print without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// "⚠️ " followed by every advisory detail, or the family's success line.
pub fn alert_block(assessment: &Assessment) -> String {
    if assessment.is_safe() {
        return success_line(assessment.family).to_string();
    }
    let details: Vec<&str> = assessment
        .advisories
        .iter()
        .map(|a| a.detail.as_str())
        .collect();
    format!("⚠️ {}", details.join(" "))
}

pub fn render_panel<R: MetricRecord>(panel: &FamilyPanel<R>, show_table: bool) -> String {
    let family = R::FAMILY;
    let mut out = String::new();
    let _ = writeln!(out, "\n--- {} ---", heading(family));

    match panel.series.latest() {
        Some(latest) => {
            for (field, label) in labels(family) {
                if let Some(value) = latest.value(field) {
                    let _ = writeln!(out, "  {:<22} {}", label, format_value(value));
                }
            }
            let _ = writeln!(
                out,
                "  {:<22} {}",
                "Last Update",
                latest.timestamp().format(LAST_UPDATE_FORMAT)
            );
        }
        None => {
            let _ = writeln!(out, "  No readings in this window.");
        }
    }

    let _ = writeln!(out, "\n{}", alert_block(&panel.assessment));
    for line in breach_hours(&panel.series, &panel.assessment) {
        let _ = writeln!(out, "  {}", line);
    }

    if !panel.summary.is_empty() {
        let _ = writeln!(out);
        out.push_str(&render_summary(family, &panel.summary));
    }
    if show_table {
        let _ = writeln!(out);
        out.push_str(&render_table(panel.series.records()));
    }
    out
}

fn upper_limits(condition: &Condition, limits: &mut Vec<(String, f64)>) {
    match condition {
        Condition::Above { field, limit } => limits.push((field.clone(), *limit)),
        Condition::AnyOf { conditions } => {
            for nested in conditions {
                upper_limits(nested, limits);
            }
        }
        Condition::Outside { .. } => {}
    }
}

/// For every breached upper limit, how many hours of the window exceeded it.
pub fn breach_hours<R: MetricRecord>(series: &Series<R>, assessment: &Assessment) -> Vec<String> {
    let breached = assessment.messages();
    let mut lines = Vec::new();
    for rule in evaluation::rules_for(R::FAMILY) {
        if !breached.contains(&rule.message.as_str()) {
            continue;
        }
        let mut limits = Vec::new();
        upper_limits(&rule.condition, &mut limits);
        for (field, limit) in limits {
            lines.push(format!(
                "{} above {} for {} of {} hours",
                label(R::FAMILY, &field),
                format_value(limit),
                analysis::hours_above(series, &field, limit),
                series.len()
            ));
        }
    }
    lines
}

pub fn render_summary(family: Family, summary: &[FieldSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<22} {:>10} {:>10} {:>10}",
        "Window summary", "min", "mean", "max"
    );
    for row in summary {
        let _ = writeln!(
            out,
            "  {:<22} {:>10} {:>10.2} {:>10}",
            label(family, row.field),
            format_value(row.min),
            row.mean,
            format_value(row.max)
        );
    }
    out
}

/// Raw rows, one line per hour, each column right-aligned to its widest cell.
pub fn render_table<R: MetricRecord>(records: &[R]) -> String {
    let header = R::header();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            std::iter::once(record.timestamp().format(TIMESTAMP_FORMAT).to_string())
                .chain(record.values().into_iter().map(|(_, v)| format_value(v)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(name.chars().count(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };
    let _ = writeln!(out, "  {}", line(header.clone()));
    for row in &rows {
        let _ = writeln!(out, "  {}", line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// A horizontal text bar chart of one comparison plus its tip.
pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} ({})", comparison.title, comparison.indicator);

    let max = comparison.max_value();
    let name_width = comparison
        .entries
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, value) in &comparison.entries {
        let len = if max > 0.0 {
            (value / max * BAR_WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {:<bar$}  {}",
            name,
            "█".repeat(len),
            format_value(*value),
            width = name_width,
            bar = BAR_WIDTH as usize
        );
    }

    if let Some((name, value)) = comparison.best() {
        let direction = match comparison.trend {
            Trend::LowerIsBetter => "lowest",
            Trend::HigherIsBetter => "highest",
        };
        let _ = writeln!(
            out,
            "  Best: {} ({} {}, {})",
            name,
            direction,
            comparison.indicator,
            format_value(value)
        );
    }
    let _ = writeln!(out, "✅ {}", comparison.tip);
    out
}
