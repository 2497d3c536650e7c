use chrono::{Duration, Local, NaiveDateTime, Timelike};
use ecovision_schemas::selection::Window;

/// Truncates an instant to the top of its hour.
pub fn truncate_to_hour(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_minute(0))
        .unwrap_or(instant)
}

/// Returns `window.hours()` ascending hourly timestamps, the last being `now`
/// truncated to the hour.
pub fn hourly_timestamps(window: Window, now: NaiveDateTime) -> Vec<NaiveDateTime> {
    let end = truncate_to_hour(now);
    let hours = window.hours() as i64;
    (0..hours)
        .rev()
        .map(|offset| end - Duration::hours(offset))
        .collect()
}

/// The local wall-clock instant used as "now" for a dashboard request.
pub fn current_time() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, 250))
            .unwrap()
    }

    #[test]
    fn sequences_are_hour_spaced_and_end_at_current_hour() {
        let now = instant(1, 47, 12);
        for window in Window::ALL {
            let stamps = hourly_timestamps(window, now);
            assert_eq!(stamps.len(), window.hours());
            assert_eq!(*stamps.last().unwrap(), truncate_to_hour(now));
            for pair in stamps.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::hours(1));
            }
        }
    }

    #[test]
    fn sequences_cross_midnight() {
        let stamps = hourly_timestamps(Window::Day, instant(1, 5, 0));
        let first = stamps[0];
        assert_eq!(first.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(first.hour(), 2);
    }

    #[test]
    fn truncation_clears_sub_hour_components() {
        let truncated = truncate_to_hour(instant(13, 59, 59));
        assert_eq!((truncated.hour(), truncated.minute(), truncated.second()), (13, 0, 0));
        assert_eq!(truncated.nanosecond(), 0);
    }
}
