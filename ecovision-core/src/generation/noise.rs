use super::{diurnal, round_to};
use crate::timeline::hourly_timestamps;
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City, record::NoiseRecord, selection::Window, series::Series,
};
use rand::Rng;

const DB_FLOOR: f64 = 30.0;
const EXPOSURE_FLOOR: f64 = 30.0;

/// Generates an hourly noise series for `city`.
pub fn generate_noise<R: Rng + ?Sized>(
    city: &City,
    window: Window,
    now: NaiveDateTime,
    rng: &mut R,
) -> Series<NoiseRecord> {
    let base_db = city.baseline().db;

    let records = hourly_timestamps(window, now)
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let level = base_db + rng.gen_range(-15..=20) as f64 + diurnal(i, 5.0, 2.0);
            let db = level.max(DB_FLOOR) as u32;
            let peak_db = db + rng.gen_range(0..=20);
            let exposure_index = round_to((db as f64 * rng.gen_range(0.8..=1.2)).max(EXPOSURE_FLOOR), 1);

            NoiseRecord {
                timestamp,
                db,
                peak_db,
                exposure_index,
            }
        })
        .collect();

    Series::new(city.clone(), records)
}
