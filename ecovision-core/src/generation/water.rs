use super::round_to;
use crate::timeline::hourly_timestamps;
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City, record::WaterRecord, selection::Window, series::Series,
};
use rand::Rng;

const TDS_FLOOR: i64 = 50;
const TURBIDITY_FLOOR: f64 = 0.5;
const DISSOLVED_OXYGEN_FLOOR: f64 = 2.0;

/// Generates an hourly water quality series for `city`.
///
/// Readings are independent per hour; only total dissolved solids depend on the
/// city baseline.
pub fn generate_water<R: Rng + ?Sized>(
    city: &City,
    window: Window,
    now: NaiveDateTime,
    rng: &mut R,
) -> Series<WaterRecord> {
    let base_tds = city.baseline().tds;

    let records = hourly_timestamps(window, now)
        .into_iter()
        .map(|timestamp| {
            let ph = round_to(7.0 + rng.gen_range(-0.5..=0.6), 2);
            let tds = (base_tds + rng.gen_range(-80..=120)).max(TDS_FLOOR);
            let turbidity = round_to(rng.gen_range(0.5..=10.0_f64).max(TURBIDITY_FLOOR), 2);
            let dissolved_oxygen = round_to(rng.gen_range(4.0..=9.0_f64).max(DISSOLVED_OXYGEN_FLOOR), 2);
            let nitrates = round_to(rng.gen_range(0.1..=10.0), 2);
            let lead = round_to(rng.gen_range(0.0..=50.0), 2);

            WaterRecord {
                timestamp,
                ph,
                tds_mg_per_l: tds as u32,
                turbidity_ntu: turbidity,
                do_mg_per_l: dissolved_oxygen,
                nitrates_mg_per_l: nitrates,
                lead_ppb: lead,
            }
        })
        .collect();

    Series::new(city.clone(), records)
}
