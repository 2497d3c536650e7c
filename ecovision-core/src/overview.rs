//! Static conservation comparisons across cities and agricultural zones.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    LowerIsBetter,
    HigherIsBetter,
}

/// A named comparison of one indicator across places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub title: &'static str,
    pub indicator: &'static str,
    pub trend: Trend,
    pub entries: Vec<(&'static str, f64)>,
    pub tip: &'static str,
}

impl Comparison {
    /// The place with the best value for this indicator.
    pub fn best(&self) -> Option<(&'static str, f64)> {
        let better = |a: f64, b: f64| match self.trend {
            Trend::LowerIsBetter => a < b,
            Trend::HigherIsBetter => a > b,
        };
        self.entries
            .iter()
            .copied()
            .fold(None, |best, (name, value)| match best {
                Some((_, current)) if !better(value, current) => best,
                _ => Some((name, value)),
            })
    }

    pub fn max_value(&self) -> f64 {
        self.entries.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }
}

pub fn air_quality() -> Comparison {
    Comparison {
        title: "Air Quality Index",
        indicator: "AQI Level",
        trend: Trend::LowerIsBetter,
        entries: vec![
            ("Delhi", 180.0),
            ("Mumbai", 110.0),
            ("Bangalore", 90.0),
            ("Chennai", 95.0),
            ("Kolkata", 130.0),
        ],
        tip: "Use public transport, plant trees, and reduce industrial emissions to improve air quality.",
    }
}

pub fn water_purity() -> Comparison {
    Comparison {
        title: "Water Purity Levels",
        indicator: "Purity %",
        trend: Trend::HigherIsBetter,
        entries: vec![
            ("Delhi", 60.0),
            ("Mumbai", 70.0),
            ("Bangalore", 85.0),
            ("Chennai", 80.0),
            ("Kolkata", 65.0),
        ],
        tip: "Promote rainwater harvesting and avoid dumping waste into water bodies.",
    }
}

pub fn soil_quality() -> Comparison {
    Comparison {
        title: "Soil Quality Index",
        indicator: "Soil Index",
        trend: Trend::HigherIsBetter,
        entries: vec![
            ("Punjab", 82.0),
            ("Maharashtra", 68.0),
            ("Karnataka", 75.0),
            ("Tamil Nadu", 70.0),
            ("Bihar", 65.0),
        ],
        tip: "Prevent soil erosion, reduce chemical fertilizers, and practice crop rotation.",
    }
}

pub fn all_comparisons() -> Vec<Comparison> {
    vec![air_quality(), water_purity(), soil_quality()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_respects_trend() {
        assert_eq!(air_quality().best(), Some(("Bangalore", 90.0)));
        assert_eq!(water_purity().best(), Some(("Bangalore", 85.0)));
        assert_eq!(soil_quality().best(), Some(("Punjab", 82.0)));
    }

    #[test]
    fn max_value_scales_bars() {
        assert_eq!(air_quality().max_value(), 180.0);
        assert_eq!(all_comparisons().len(), 3);
    }
}
