//! Threshold checks over the latest record of a series.

use ecovision_schemas::{
    record::MetricRecord,
    rule::{Advisory, Assessment, Condition, Severity, ThresholdRule},
    selection::Family,
    series::Series,
};

fn rule(message: &str, detail: &str, condition: Condition) -> ThresholdRule {
    ThresholdRule {
        message: message.to_string(),
        detail: detail.to_string(),
        condition,
    }
}

/// The fixed rule set of a family, in evaluation order.
pub fn rules_for(family: Family) -> Vec<ThresholdRule> {
    match family {
        Family::Air => vec![
            rule("PM2.5 unhealthy", "PM2.5 is above 150 (Unhealthy).", Condition::above("pm25", 150.0)),
            rule("PM10 unhealthy", "PM10 is above 200 (Unhealthy).", Condition::above("pm10", 200.0)),
            rule("AQI unhealthy", "AQI is above 150 (Unhealthy).", Condition::above("aqi", 150.0)),
        ],
        Family::Water => vec![
            rule("pH out of safe range", "pH outside safe range (6.5-8.5).", Condition::outside("ph", 6.5, 8.5)),
            rule("TDS very high", "TDS is very high (>1000 mg/L).", Condition::above("tds_mg_per_l", 1000.0)),
            rule("Lead concentration unsafe", "Lead concentration > 10 ppb (unsafe).", Condition::above("lead_ppb", 10.0)),
        ],
        Family::Soil => vec![
            rule("High heavy metals", "High heavy metals in soil (>100 ppm).", Condition::above("heavy_metals_ppm", 100.0)),
            rule("Pesticide residue high", "Pesticide residue high (>1 ppm).", Condition::above("pesticides_ppm", 1.0)),
        ],
        Family::Noise => vec![
            rule(
                "Noise level high",
                "Noise level high (dB > 70).",
                Condition::AnyOf {
                    conditions: vec![Condition::above("db", 70.0), Condition::above("peak_db", 90.0)],
                },
            ),
            rule("Exposure index high", "Exposure index high.", Condition::above("exposure_index", 85.0)),
        ],
    }
}

/// Whether `condition` is breached by `record`.
///
/// Fields are looked up by column name; a name the record does not carry never
/// breaches.
pub fn is_breached<R: MetricRecord>(condition: &Condition, record: &R) -> bool {
    match condition {
        Condition::Above { field, limit } => record.value(field).map_or(false, |v| v > *limit),
        Condition::Outside { field, min, max } => {
            record.value(field).map_or(false, |v| v < *min || v > *max)
        }
        Condition::AnyOf { conditions } => conditions.iter().any(|c| is_breached(c, record)),
    }
}

/// Runs the family's rule set against a single record.
pub fn evaluate<R: MetricRecord>(record: &R) -> Assessment {
    let rules = rules_for(R::FAMILY);
    debug_assert!(
        rules.iter().all(|r| condition_fields(&r.condition).iter().all(|f| R::FIELDS.contains(f))),
        "rule set for {} references a field the record does not carry",
        R::FAMILY
    );

    let advisories = rules
        .into_iter()
        .filter(|r| is_breached(&r.condition, record))
        .map(|r| Advisory {
            message: r.message,
            detail: r.detail,
            severity: Severity::Breach,
        })
        .collect();

    Assessment {
        family: R::FAMILY,
        advisories,
    }
}

/// Assesses the latest record of a series; an empty series is safe.
pub fn assess<R: MetricRecord>(series: &Series<R>) -> Assessment {
    match series.latest() {
        Some(record) => evaluate(record),
        None => Assessment {
            family: R::FAMILY,
            advisories: Vec::new(),
        },
    }
}

fn condition_fields(condition: &Condition) -> Vec<&str> {
    match condition {
        Condition::Above { field, .. } | Condition::Outside { field, .. } => vec![field.as_str()],
        Condition::AnyOf { conditions } => conditions.iter().flat_map(condition_fields).collect(),
    }
}
