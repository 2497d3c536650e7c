use super::{diurnal, round_to};
use crate::timeline::hourly_timestamps;
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City, record::AirRecord, selection::Window, series::Series,
};
use rand::Rng;

const PM25_FLOOR: i64 = 5;
const PM10_FLOOR: i64 = 10;
const CO_FLOOR: f64 = 0.1;
const AQI_CAP: f64 = 500.0;

/// Generates an hourly air quality series for `city`.
pub fn generate_air<R: Rng + ?Sized>(
    city: &City,
    window: Window,
    now: NaiveDateTime,
    rng: &mut R,
) -> Series<AirRecord> {
    let base_pm25 = city.baseline().pm25;

    let records = hourly_timestamps(window, now)
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let shaped = base_pm25 + diurnal(i, 30.0, 3.0) + rng.gen_range(-25..=25) as f64;
            let pm25 = (shaped as i64).max(PM25_FLOOR);
            let pm25_f = pm25 as f64;

            let pm10 = ((pm25_f * rng.gen_range(1.0..=1.5)) as i64).max(PM10_FLOOR);
            let co = round_to((rng.gen_range(0.3..=2.5) + pm25_f / 200.0).max(CO_FLOOR), 2);
            let no2 = (20.0 + pm25_f * 0.3 + rng.gen_range(-10..=20) as f64).max(0.0) as u32;
            let so2 = 5 + rng.gen_range(0..=30);
            let o3 = 20 + rng.gen_range(0..=100);
            let aqi = ((pm25_f / 12.0) * 50.0 * rng.gen_range(0.9..=1.1)).min(AQI_CAP) as u32;

            AirRecord {
                timestamp,
                pm25: pm25 as u32,
                pm10: pm10 as u32,
                co,
                no2,
                so2,
                o3,
                aqi,
            }
        })
        .collect();

    Series::new(city.clone(), records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::{decimals, fixed_now, seeded};
    use rand::rngs::mock::StepRng;

    #[test]
    fn air_values_respect_floors_and_caps() {
        for seed in 0..20 {
            let mut rng = seeded(seed);
            let series = generate_air(&City::Delhi, Window::ThreeDays, fixed_now(), &mut rng);
            assert_eq!(series.len(), 72);
            for record in series.records() {
                assert!(record.pm25 >= 5);
                assert!(record.pm10 >= 10);
                assert!(record.co >= 0.1);
                assert!(decimals(record.co) <= 2, "co {} has too many decimals", record.co);
                assert!(record.aqi <= 500);
                assert!((5..=35).contains(&record.so2));
                assert!((20..=120).contains(&record.o3));
            }
        }
    }

    #[test]
    fn pm10_tracks_pm25() {
        let mut rng = seeded(7);
        let series = generate_air(&City::Mumbai, Window::Day, fixed_now(), &mut rng);
        for record in series.records() {
            let upper = (record.pm25 as f64 * 1.5) as u32;
            assert!(record.pm10 >= record.pm25);
            assert!(record.pm10 <= upper.max(10));
        }
    }

    #[test]
    fn low_stub_draws_hit_lower_bounds() {
        // All-zero bits make every range draw return its lower end.
        let mut rng = StepRng::new(0, 0);
        let series = generate_air(&City::from("Atlantis"), Window::Day, fixed_now(), &mut rng);
        let first = &series.records()[0];
        // 80 + 30 * sin(0) - 25
        assert_eq!(first.pm25, 55);
        assert_eq!(first.pm10, 55);
        assert_eq!(first.so2, 5);
        assert_eq!(first.o3, 20);
    }
}
