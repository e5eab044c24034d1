use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// The leaderboard day rolls over at midnight UTC-05:00, all year round.
/// Daylight saving is not applied.
pub const RESET_UTC_OFFSET_HOURS: i64 = -5;

/// Absolute-time boundaries of one calendar day in the reset zone.
/// `start` is 00:00:00.000 and `end` is 23:59:59.999 of that day, both
/// expressed as UTC instants so they compare directly against stored
/// timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Returns the boundaries of the calendar day that `now` falls into under
/// the fixed reset offset.
///
/// The instant is shifted into the reset zone's wall clock, truncated to
/// midnight, then shifted back. An instant at exactly local midnight belongs
/// to the new day.
pub fn day_window_at(now: DateTime<Utc>) -> DayWindow {
    let offset = Duration::hours(RESET_UTC_OFFSET_HOURS);
    let local_date = (now + offset).date_naive();
    let local_midnight = Utc.from_utc_datetime(&local_date.and_time(NaiveTime::MIN));
    let start = local_midnight - offset;
    let end = start + Duration::days(1) - Duration::milliseconds(1);
    DayWindow { start, end }
}

/// The calendar date that `now` falls into under the reset offset. Used to
/// key day-scoped content such as the daily quote.
pub fn reset_zone_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(RESET_UTC_OFFSET_HOURS)).date_naive()
}

#[cfg(test)]
mod test {
    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap() + Duration::milliseconds(ms as i64)
    }

    #[test]
    fn test_window_bounds_for_afternoon_instant() {
        // 15:00 UTC is 10:00 in the reset zone, so the day is March 1st
        // there and the window runs 05:00 UTC to 04:59:59.999 UTC next day.
        let window = day_window_at(utc(2026, 3, 1, 15, 0, 0, 0));
        assert_eq!(window.start, utc(2026, 3, 1, 5, 0, 0, 0));
        assert_eq!(window.end, utc(2026, 3, 2, 4, 59, 59, 999));
    }

    #[test]
    fn test_early_utc_hours_belong_to_previous_local_day() {
        // 03:00 UTC is 22:00 of the previous day in the reset zone.
        let window = day_window_at(utc(2026, 3, 2, 3, 0, 0, 0));
        assert_eq!(window.start, utc(2026, 3, 1, 5, 0, 0, 0));
    }

    #[test]
    fn test_same_local_day_yields_identical_window() {
        let morning = day_window_at(utc(2026, 3, 1, 5, 0, 0, 0));
        let evening = day_window_at(utc(2026, 3, 2, 4, 59, 59, 999));
        assert_eq!(morning, evening);
    }

    #[test]
    fn test_local_midnight_starts_a_new_window() {
        let before = day_window_at(utc(2026, 3, 2, 4, 59, 59, 999));
        let at_midnight = day_window_at(utc(2026, 3, 2, 5, 0, 0, 0));
        assert_ne!(before, at_midnight);
        assert_eq!(at_midnight.start, utc(2026, 3, 2, 5, 0, 0, 0));
    }

    #[test]
    fn test_window_spans_a_full_day_minus_one_milli() {
        let window = day_window_at(utc(2026, 8, 7, 12, 0, 0, 0));
        assert_eq!(
            window.end - window.start,
            Duration::days(1) - Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_reset_zone_date_lags_utc_in_the_early_hours() {
        assert_eq!(
            reset_zone_date(utc(2026, 3, 2, 3, 0, 0, 0)),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            reset_zone_date(utc(2026, 3, 2, 12, 0, 0, 0)),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }
}
