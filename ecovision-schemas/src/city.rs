use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Starting values used to shape the synthetic series of one city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityBaseline {
    /// Fine particulate matter, µg/m³.
    pub pm25: f64,
    /// Total dissolved solids, mg/L.
    pub tds: i64,
    /// Ambient sound level, dB.
    pub db: f64,
}

/// Baseline applied to any city without a dedicated entry.
pub const DEFAULT_BASELINE: CityBaseline = CityBaseline {
    pm25: 80.0,
    tds: 250,
    db: 60.0,
};

const BANGALORE_BASELINE: CityBaseline = CityBaseline {
    pm25: 80.0,
    tds: 200,
    db: 60.0,
};

const DELHI_BASELINE: CityBaseline = CityBaseline {
    pm25: 140.0,
    tds: 400,
    db: 70.0,
};

const MUMBAI_BASELINE: CityBaseline = CityBaseline {
    pm25: 90.0,
    tds: 350,
    db: 65.0,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum City {
    Bangalore,
    Delhi,
    Mumbai,
    Other(String),
}

impl City {
    pub const KNOWN: [City; 3] = [City::Bangalore, City::Delhi, City::Mumbai];

    pub fn name(&self) -> &str {
        match self {
            City::Bangalore => "Bangalore",
            City::Delhi => "Delhi",
            City::Mumbai => "Mumbai",
            City::Other(name) => name,
        }
    }

    pub fn baseline(&self) -> CityBaseline {
        match self {
            City::Bangalore => BANGALORE_BASELINE,
            City::Delhi => DELHI_BASELINE,
            City::Mumbai => MUMBAI_BASELINE,
            City::Other(_) => DEFAULT_BASELINE,
        }
    }

    /// Name with path-hostile characters replaced, for export file names.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .name()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            "Other".to_string()
        } else {
            stem
        }
    }
}

impl Default for City {
    fn default() -> Self {
        City::Bangalore
    }
}

impl From<&str> for City {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if let Some(known) = City::KNOWN
            .iter()
            .find(|city| city.name().eq_ignore_ascii_case(trimmed))
        {
            return known.clone();
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "bengaluru" => City::Bangalore,
            "new delhi" => City::Delhi,
            "" => City::Other("Other".to_string()),
            _ => City::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for City {
    fn from(value: String) -> Self {
        City::from(value.as_str())
    }
}

impl From<City> for String {
    fn from(city: City) -> Self {
        city.name().to_string()
    }
}

impl FromStr for City {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(City::from(s))
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
