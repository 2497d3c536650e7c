//! CSV export of generated series.
//!
//! A single series exports as a plain table. Several series export as named
//! blocks, each introduced by a `### {name} ###` marker line and followed by a
//! blank line.

use crate::error::EcovisionError;
use csv::Writer;
use ecovision_schemas::{
    city::City,
    record::MetricRecord,
    selection::{Category, Window},
    series::Series,
};
use std::fs;
use std::path::Path;

const MARKER_EDGE: &str = "###";

/// One named block of a multi-series export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSection {
    pub name: String,
    pub body: String,
}

/// A block recovered from an export payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSection {
    pub name: Option<String>,
    pub fields: Vec<String>,
    pub rows: usize,
}

/// Renders a series as a header row plus one row per record.
pub fn format_series<R: MetricRecord>(series: &Series<R>) -> Result<String, EcovisionError> {
    let label = R::FAMILY.name();
    let mut writer = Writer::from_writer(Vec::new());

    if series.is_empty() {
        writer
            .write_record(R::header())
            .map_err(|e| EcovisionError::CsvError(label.to_string(), e))?;
    }
    for record in series.records() {
        writer
            .serialize(record)
            .map_err(|e| EcovisionError::CsvError(label.to_string(), e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EcovisionError::CsvError(label.to_string(), e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|e| EcovisionError::ExportEncoding(label.to_string(), e))
}

pub fn section<R: MetricRecord>(name: &str, series: &Series<R>) -> Result<ExportSection, EcovisionError> {
    Ok(ExportSection {
        name: name.to_string(),
        body: format_series(series)?,
    })
}

pub fn marker(name: &str) -> String {
    format!("{} {} {}", MARKER_EDGE, name, MARKER_EDGE)
}

/// Joins named blocks into one payload.
pub fn format_sections(sections: &[ExportSection]) -> String {
    let mut payload = String::new();
    for section in sections {
        payload.push_str(&marker(&section.name));
        payload.push('\n');
        payload.push_str(&section.body);
        if !section.body.ends_with('\n') {
            payload.push('\n');
        }
        payload.push('\n');
    }
    payload
}

fn parse_marker(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(MARKER_EDGE)?
        .strip_suffix(MARKER_EDGE)
        .map(str::trim)
}

/// Splits an export payload back into its blocks.
///
/// A payload without markers yields one unnamed block.
pub fn parse_sections(payload: &str) -> Result<Vec<ParsedSection>, EcovisionError> {
    let mut blocks: Vec<(Option<String>, Vec<&str>)> = Vec::new();

    for line in payload.lines() {
        if let Some(name) = parse_marker(line) {
            blocks.push((Some(name.to_string()), Vec::new()));
            continue;
        }
        match blocks.last_mut() {
            Some((_, lines)) => lines.push(line),
            None => blocks.push((None, vec![line])),
        }
    }

    blocks
        .into_iter()
        .filter(|(name, lines)| name.is_some() || lines.iter().any(|l| !l.trim().is_empty()))
        .map(|(name, lines)| parse_block(name, &lines))
        .collect()
}

fn parse_block(name: Option<String>, lines: &[&str]) -> Result<ParsedSection, EcovisionError> {
    let label = name.clone().unwrap_or_else(|| "export".to_string());
    let body: Vec<&str> = lines.iter().copied().filter(|l| !l.trim().is_empty()).collect();
    let text = body.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let fields = reader
        .headers()
        .map_err(|e| EcovisionError::CsvError(label.clone(), e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = 0;
    for record in reader.records() {
        record.map_err(|e| EcovisionError::CsvError(label.clone(), e))?;
        rows += 1;
    }

    Ok(ParsedSection { name, fields, rows })
}

/// File name for an export of `category` over `window` hours.
pub fn export_file_name(city: &City, category: Category, window: Window) -> String {
    match category {
        Category::All => format!("{}_env_data_last_{}h.csv", city.file_stem(), window.hours()),
        Category::Single(family) => format!(
            "{}_{}_last_{}h.csv",
            city.file_stem(),
            family.slug(),
            window.hours()
        ),
    }
}

pub fn write_export(path: &Path, payload: &str) -> Result<(), EcovisionError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| EcovisionError::FileIO(parent.display().to_string(), e))?;
    }
    fs::write(path, payload).map_err(|e| EcovisionError::FileIO(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::{fixed_now, seeded};
    use crate::generation::{generate_air, generate_noise, generate_water};
    use ecovision_schemas::record::{AirRecord, NoiseRecord, WaterRecord};
    use ecovision_schemas::selection::Family;

    #[test]
    fn single_series_round_trips_header_and_rows() {
        let mut rng = seeded(1);
        let series = generate_water(&City::Delhi, Window::TwoDays, fixed_now(), &mut rng);
        let payload = format_series(&series).unwrap();

        assert!(payload.starts_with("timestamp,ph,tds_mg_per_l,turbidity_NTU,"));
        let sections = parse_sections(&payload).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, None);
        assert_eq!(sections[0].fields, WaterRecord::header());
        assert_eq!(sections[0].rows, 48);
    }

    #[test]
    fn named_sections_are_recoverable() {
        let mut rng = seeded(2);
        let air = generate_air(&City::Mumbai, Window::Day, fixed_now(), &mut rng);
        let noise = generate_noise(&City::Mumbai, Window::Day, fixed_now(), &mut rng);

        let payload = format_sections(&[
            section(Family::Air.name(), &air).unwrap(),
            section(Family::Noise.name(), &noise).unwrap(),
        ]);
        assert!(payload.starts_with("### Air ###\ntimestamp,pm25,"));
        assert!(payload.contains("\n\n### Noise ###\n"));

        let sections = parse_sections(&payload).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name.as_deref(), Some("Air"));
        assert_eq!(sections[0].fields, AirRecord::header());
        assert_eq!(sections[0].rows, 24);
        assert_eq!(sections[1].name.as_deref(), Some("Noise"));
        assert_eq!(sections[1].fields, NoiseRecord::header());
        assert_eq!(sections[1].rows, 24);
    }

    #[test]
    fn timestamps_use_export_layout() {
        let mut rng = seeded(4);
        let series = generate_noise(&City::Delhi, Window::Day, fixed_now(), &mut rng);
        let payload = format_series(&series).unwrap();
        let last_row = payload.lines().last().unwrap();
        assert!(last_row.starts_with("2025-06-05 17:00:00,"));
    }

    #[test]
    fn empty_series_still_has_header() {
        let series: Series<NoiseRecord> = Series::new(City::Delhi, Vec::new());
        let payload = format_series(&series).unwrap();
        assert_eq!(payload.trim_end(), "timestamp,db,peak_db,exposure_index");
    }

    #[test]
    fn file_names_follow_selection() {
        assert_eq!(
            export_file_name(&City::Delhi, Category::Single(Family::Soil), Window::TwoDays),
            "Delhi_soil_last_48h.csv"
        );
        assert_eq!(
            export_file_name(&City::from("Other"), Category::All, Window::Day),
            "Other_env_data_last_24h.csv"
        );
    }

    #[test]
    fn write_export_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        write_export(&path, "timestamp,db\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "timestamp,db\n");
    }
}
