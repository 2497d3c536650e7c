use crate::city::City;
use crate::record::MetricRecord;
use serde::Serialize;

/// Hourly records of one metric family for one city, oldest first.
///
/// A series is only ever built whole; there is no mutable access to its records.
#[derive(Debug, Clone, Serialize)]
pub struct Series<R> {
    city: City,
    records: Vec<R>,
}

impl<R: MetricRecord> Series<R> {
    pub fn new(city: City, records: Vec<R>) -> Self {
        Self { city, records }
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The most recent record, which drives the dashboard panel and alerts.
    pub fn latest(&self) -> Option<&R> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of one field across the whole window, or `None` for an unknown field.
    pub fn column(&self, field: &str) -> Option<Vec<f64>> {
        if !R::FIELDS.contains(&field) {
            return None;
        }
        self.records.iter().map(|r| r.value(field)).collect()
    }
}
