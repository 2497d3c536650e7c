use super::round_to;
use crate::timeline::hourly_timestamps;
use chrono::NaiveDateTime;
use ecovision_schemas::{
    city::City, record::SoilRecord, selection::Window, series::Series,
};
use rand::Rng;

/// Generates an hourly soil series. Soil readings carry no city-specific baseline.
pub fn generate_soil<R: Rng + ?Sized>(
    city: &City,
    window: Window,
    now: NaiveDateTime,
    rng: &mut R,
) -> Series<SoilRecord> {
    let records = hourly_timestamps(window, now)
        .into_iter()
        .map(|timestamp| SoilRecord {
            timestamp,
            ph: round_to(6.0 + rng.gen_range(-1.0..=1.0), 2),
            heavy_metals_ppm: round_to(rng.gen_range(0.0..=200.0), 2),
            pesticides_ppm: round_to(rng.gen_range(0.0..=5.0), 3),
            organic_matter_percent: round_to(rng.gen_range(1.0..=8.0), 2),
        })
        .collect();

    Series::new(city.clone(), records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::test_support::{decimals, fixed_now, seeded};

    #[test]
    fn soil_values_stay_in_range() {
        let mut rng = seeded(11);
        let series = generate_soil(&City::Mumbai, Window::ThreeDays, fixed_now(), &mut rng);
        assert_eq!(series.len(), 72);
        for record in series.records() {
            assert!((5.0..=7.0).contains(&record.ph));
            assert!((0.0..=200.0).contains(&record.heavy_metals_ppm));
            assert!((0.0..=5.0).contains(&record.pesticides_ppm));
            assert!((1.0..=8.0).contains(&record.organic_matter_percent));
            assert!(decimals(record.pesticides_ppm) <= 3);
            assert!(decimals(record.organic_matter_percent) <= 2);
        }
    }
}
