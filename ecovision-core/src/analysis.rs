use ecovision_schemas::{record::MetricRecord, series::Series};
use serde::Serialize;

/// Window statistics of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: &'static str,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub latest: f64,
}

/// Min, mean, max and latest value of every field of a series, in column order.
/// An empty series has no summaries.
pub fn summarize<R: MetricRecord>(series: &Series<R>) -> Vec<FieldSummary> {
    let Some(latest) = series.latest() else {
        return Vec::new();
    };

    R::FIELDS
        .iter()
        .filter_map(|&field| {
            let column = series.column(field)?;
            let latest_value = latest.value(field)?;
            let (min, max, sum) = column.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
                |(min, max, sum), v| (min.min(*v), max.max(*v), sum + *v),
            );
            Some(FieldSummary {
                field,
                min,
                mean: sum / column.len() as f64,
                max,
                latest: latest_value,
            })
        })
        .collect()
}

/// Count of records whose value of `field` lies strictly above `limit`.
pub fn hours_above<R: MetricRecord>(series: &Series<R>, field: &str, limit: f64) -> usize {
    series
        .records()
        .iter()
        .filter_map(|r| r.value(field))
        .filter(|v| *v > limit)
        .count()
}
