//! # Clock Port
//!
//! Time source for everything that stamps or filters by date. The core never
//! reads the system clock directly; callers pass a `Clock`.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Local calendar day of `now()`.
    fn today(&self) -> NaiveDate {
        local_date(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Calendar day of an instant in the machine's local time zone.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_fixed_clock_today_uses_local_calendar() {
        let noon = Local
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let clock = FixedClock(noon);

        assert_eq!(clock.now(), noon);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(
            local_date(noon - Duration::days(1)),
            NaiveDate::from_ymd_opt(2026, 3, 13).unwrap()
        );
    }
}
