//! Daily refresh policy for persisted catalogs.
//!
//! This is not a TTL. Only the hour of day of the last write and of the
//! current time are compared. With the boundary at 08:00, a catalog
//! written yesterday at 10:00 is
//! still fresh today at 09:00, and one written at 07:00 is stale at any
//! time from 08:00 on, whichever day it was written.

use chrono::Timelike;

/// Decides whether a persisted catalog must be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    refresh_hour: u32,
}

impl RefreshPolicy {
    pub fn new(refresh_hour: u32) -> Self {
        Self { refresh_hour }
    }

    pub fn refresh_hour(&self) -> u32 {
        self.refresh_hour
    }

    /// Stale iff the write happened before the boundary hour and the
    /// current time is at or after it.
    pub fn is_stale(&self, written: &impl Timelike, now: &impl Timelike) -> bool {
        written.hour() < self.refresh_hour && now.hour() >= self.refresh_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn written_before_read_after_is_stale() {
        let policy = RefreshPolicy::new(8);
        assert!(policy.is_stale(&at(7, 59), &at(8, 0)));
        assert!(policy.is_stale(&at(0, 0), &at(23, 59)));
    }

    #[test]
    fn written_after_boundary_is_fresh() {
        let policy = RefreshPolicy::new(8);
        assert!(!policy.is_stale(&at(8, 0), &at(9, 0)));
        assert!(!policy.is_stale(&at(22, 0), &at(10, 0)));
    }

    #[test]
    fn read_before_boundary_is_fresh() {
        let policy = RefreshPolicy::new(8);
        assert!(!policy.is_stale(&at(3, 0), &at(7, 59)));
    }

    #[test]
    fn ignores_calendar_day() {
        use chrono::NaiveDate;

        let policy = RefreshPolicy::new(8);
        let last_year = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert!(!policy.is_stale(&last_year, &today));
    }

    #[test]
    fn hour_zero_never_stale() {
        let policy = RefreshPolicy::new(0);
        assert!(!policy.is_stale(&at(0, 0), &at(23, 0)));
    }
}
