use crate::selection::Family;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Breached when the field is strictly greater than `limit`.
    Above { field: String, limit: f64 },
    /// Breached when the field lies outside the inclusive `[min, max]` band.
    Outside { field: String, min: f64, max: f64 },
    /// Breached when any nested condition is breached.
    AnyOf { conditions: Vec<Condition> },
}

impl Condition {
    pub fn above(field: &str, limit: f64) -> Self {
        Condition::Above {
            field: field.to_string(),
            limit,
        }
    }

    pub fn outside(field: &str, min: f64, max: f64) -> Self {
        Condition::Outside {
            field: field.to_string(),
            min,
            max,
        }
    }
}

/// A fixed threshold check over the latest record of a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    /// Short advisory text, e.g. "PM2.5 unhealthy".
    pub message: String,
    /// Longer explanation shown in the alert block.
    pub detail: String,
    pub condition: Condition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Breach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub message: String,
    pub detail: String,
    pub severity: Severity,
}

/// Outcome of running a family's rule set against its latest record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub family: Family,
    pub advisories: Vec<Advisory>,
}

impl Assessment {
    pub fn is_safe(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.advisories.iter().map(|a| a.message.as_str()).collect()
    }
}
