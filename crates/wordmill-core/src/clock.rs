//! Drill-day clock
//!
//! A drill session that runs past midnight still belongs to the evening it
//! started in, so the drill day rolls over at 06:00 rather than midnight.
//! Everything that partitions words by "picked today" or measures how
//! recently a bundle was introduced goes through this module.

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, Utc};

/// Hour at which a new drill day starts.
pub const DAY_ROLLOVER_HOUR: u32 = 6;

/// How long a bundle counts as "recently introduced", in months.
pub const RECENCY_WINDOW_MONTHS: u32 = 6;

/// The drill date containing `now`. Between midnight and 06:00 this is
/// still the previous calendar date.
pub fn drill_date(now: DateTime<Utc>) -> NaiveDate {
    (now - Duration::hours(DAY_ROLLOVER_HOUR as i64)).date_naive()
}

/// The instant the current drill day started (06:00 on [`drill_date`]).
pub fn drill_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let rollover =
        NaiveTime::from_hms_opt(DAY_ROLLOVER_HOUR, 0, 0).expect("06:00:00 is a valid time");
    drill_date(now).and_time(rollover).and_utc()
}

/// Whether a pick timestamp falls inside the current drill day.
pub fn picked_today(last_picked: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    last_picked >= drill_day_start(now)
}

/// Bundles introduced after this date count as recent.
pub fn recency_cutoff(now: DateTime<Utc>) -> NaiveDate {
    drill_date(now)
        .checked_sub_months(Months::new(RECENCY_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_drill_date_rolls_over_at_six() {
        let before = utc(2026, 3, 10, 5, 59);
        let after = utc(2026, 3, 10, 6, 0);

        assert_eq!(drill_date(before), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(drill_date(after), NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
    }

    #[test]
    fn test_picked_today_boundary() {
        let now = utc(2026, 3, 10, 21, 0);

        // Picked just after the rollover = today
        assert!(picked_today(utc(2026, 3, 10, 6, 0), now));
        // Picked at 02:00 the same calendar day = previous drill day
        assert!(!picked_today(utc(2026, 3, 10, 2, 0), now));
        // Never picked (epoch) = not today
        assert!(!picked_today(DateTime::UNIX_EPOCH, now));
    }

    #[test]
    fn test_late_night_session_stays_in_yesterday() {
        // At 01:30 the drill day started yesterday at 06:00
        let now = utc(2026, 3, 11, 1, 30);
        assert_eq!(drill_day_start(now), utc(2026, 3, 10, 6, 0));
        assert!(picked_today(utc(2026, 3, 10, 23, 45), now));
    }

    #[test]
    fn test_recency_cutoff() {
        let now = utc(2026, 8, 20, 12, 0);
        assert_eq!(recency_cutoff(now), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
    }
}
