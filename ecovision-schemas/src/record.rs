use crate::selection::Family;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Textual layout used for timestamps in exports and reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Common view over the per-family record types.
///
/// `FIELDS` lists the numeric columns in their declared order; the CSV header of
/// a family is `timestamp` followed by exactly these names.
pub trait MetricRecord: Serialize + Clone {
    const FAMILY: Family;
    const FIELDS: &'static [&'static str];

    fn timestamp(&self) -> NaiveDateTime;

    /// Looks up a numeric field by its column name.
    fn value(&self, field: &str) -> Option<f64>;

    fn header() -> Vec<&'static str> {
        std::iter::once("timestamp")
            .chain(Self::FIELDS.iter().copied())
            .collect()
    }

    fn values(&self) -> Vec<(&'static str, f64)> {
        Self::FIELDS
            .iter()
            .filter_map(|field| self.value(field).map(|v| (*field, v)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub pm25: u32,
    pub pm10: u32,
    pub co: f64,
    pub no2: u32,
    pub so2: u32,
    pub o3: u32,
    pub aqi: u32,
}

impl MetricRecord for AirRecord {
    const FAMILY: Family = Family::Air;
    const FIELDS: &'static [&'static str] = &["pm25", "pm10", "co", "no2", "so2", "o3", "aqi"];

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn value(&self, field: &str) -> Option<f64> {
        match field {
            "pm25" => Some(self.pm25 as f64),
            "pm10" => Some(self.pm10 as f64),
            "co" => Some(self.co),
            "no2" => Some(self.no2 as f64),
            "so2" => Some(self.so2 as f64),
            "o3" => Some(self.o3 as f64),
            "aqi" => Some(self.aqi as f64),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub ph: f64,
    pub tds_mg_per_l: u32,
    #[serde(rename = "turbidity_NTU")]
    pub turbidity_ntu: f64,
    pub do_mg_per_l: f64,
    pub nitrates_mg_per_l: f64,
    pub lead_ppb: f64,
}

impl MetricRecord for WaterRecord {
    const FAMILY: Family = Family::Water;
    const FIELDS: &'static [&'static str] = &[
        "ph",
        "tds_mg_per_l",
        "turbidity_NTU",
        "do_mg_per_l",
        "nitrates_mg_per_l",
        "lead_ppb",
    ];

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn value(&self, field: &str) -> Option<f64> {
        match field {
            "ph" => Some(self.ph),
            "tds_mg_per_l" => Some(self.tds_mg_per_l as f64),
            "turbidity_NTU" => Some(self.turbidity_ntu),
            "do_mg_per_l" => Some(self.do_mg_per_l),
            "nitrates_mg_per_l" => Some(self.nitrates_mg_per_l),
            "lead_ppb" => Some(self.lead_ppb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub ph: f64,
    pub heavy_metals_ppm: f64,
    pub pesticides_ppm: f64,
    pub organic_matter_percent: f64,
}

impl MetricRecord for SoilRecord {
    const FAMILY: Family = Family::Soil;
    const FIELDS: &'static [&'static str] = &[
        "ph",
        "heavy_metals_ppm",
        "pesticides_ppm",
        "organic_matter_percent",
    ];

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn value(&self, field: &str) -> Option<f64> {
        match field {
            "ph" => Some(self.ph),
            "heavy_metals_ppm" => Some(self.heavy_metals_ppm),
            "pesticides_ppm" => Some(self.pesticides_ppm),
            "organic_matter_percent" => Some(self.organic_matter_percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub db: u32,
    pub peak_db: u32,
    pub exposure_index: f64,
}

impl MetricRecord for NoiseRecord {
    const FAMILY: Family = Family::Noise;
    const FIELDS: &'static [&'static str] = &["db", "peak_db", "exposure_index"];

    fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn value(&self, field: &str) -> Option<f64> {
        match field {
            "db" => Some(self.db as f64),
            "peak_db" => Some(self.peak_db as f64),
            "exposure_index" => Some(self.exposure_index),
            _ => None,
        }
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    #[test]
    fn header_starts_with_timestamp() {
        assert_eq!(
            WaterRecord::header(),
            vec![
                "timestamp",
                "ph",
                "tds_mg_per_l",
                "turbidity_NTU",
                "do_mg_per_l",
                "nitrates_mg_per_l",
                "lead_ppb"
            ]
        );
        assert_eq!(NoiseRecord::header().len(), 4);
    }

    #[test]
    fn every_declared_field_resolves() {
        let record = SoilRecord {
            timestamp: at(9),
            ph: 6.4,
            heavy_metals_ppm: 120.5,
            pesticides_ppm: 0.125,
            organic_matter_percent: 3.2,
        };
        assert_eq!(record.values().len(), SoilRecord::FIELDS.len());
        assert_eq!(record.value("pesticides_ppm"), Some(0.125));
        assert_eq!(record.value("lead_ppb"), None);
    }

    #[test]
    fn serializes_with_export_column_names() {
        let record = WaterRecord {
            timestamp: at(13),
            ph: 7.1,
            tds_mg_per_l: 320,
            turbidity_ntu: 2.5,
            do_mg_per_l: 6.0,
            nitrates_mg_per_l: 1.2,
            lead_ppb: 3.4,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], "2025-03-14 13:00:00");
        assert_eq!(json["turbidity_NTU"], 2.5);

        let back: WaterRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
