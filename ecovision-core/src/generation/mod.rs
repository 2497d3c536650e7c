//! Synthetic metric generators.
//!
//! Each generator walks the hourly timestamps of a window and draws one record per
//! hour from the injected random source. Values are bounded and rounded to the
//! precision of their column; the draws themselves are not reproducible unless the
//! caller passes a seeded generator.

pub mod air;
pub mod noise;
pub mod soil;
pub mod water;

pub use air::generate_air;
pub use noise::generate_noise;
pub use soil::generate_soil;
pub use water::generate_water;

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Additive sine term shaping a series over its sample index.
pub(crate) fn diurnal(index: usize, amplitude: f64, divisor: f64) -> f64 {
    amplitude * (index as f64 / divisor).sin()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 5)
            .and_then(|d| d.and_hms_opt(17, 42, 9))
            .unwrap()
    }

    pub fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Number of decimals needed to print `value` exactly, capped at 6.
    pub fn decimals(value: f64) -> usize {
        (0..=6)
            .find(|d| {
                let factor = 10f64.powi(*d as i32);
                ((value * factor).round() - value * factor).abs() < 1e-6
            })
            .unwrap_or(7)
    }
}
