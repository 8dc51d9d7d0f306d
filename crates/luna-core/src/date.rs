//! Local-calendar date helpers.
//!
//! All dates in the tracker are plain calendar days ([`NaiveDate`]). Values
//! coming from the wall clock are reduced to the *local* year/month/day
//! before they enter the system, so no UTC shift can move a record onto a
//! neighbouring day.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// Wire and display format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| DateError::Invalid {
        input: trimmed.to_string(),
    })
}

/// Parse a date, substituting `fallback` for empty or malformed input.
pub fn parse_date_or(input: &str, fallback: NaiveDate) -> NaiveDate {
    match parse_date(input) {
        Ok(date) => date,
        Err(err) => {
            if err != DateError::Empty {
                tracing::warn!(%err, fallback = %format_date(fallback), "substituting reference date");
            }
            fallback
        }
    }
}

/// Parse a `YYYY-MM` month into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32), DateError> {
    let invalid = || DateError::InvalidMonth {
        input: input.trim().to_string(),
    };
    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    Ok((year, month))
}

/// Whole-day difference `a - b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

/// Move a date by a signed number of days. `None` if the result leaves
/// chrono's representable range.
pub fn offset_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Calendar day of a zoned timestamp, read from its local fields.
pub fn date_of<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Today's date on the local calendar.
pub fn local_today() -> NaiveDate {
    date_of(&Local::now())
}

/// The user-controlled "today".
///
/// Decoupled from the wall clock so entries can be made retroactively or a
/// future day can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTime {
    date: NaiveDate,
}

impl ReferenceTime {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Reference pinned to the local calendar's today.
    pub fn today() -> Self {
        Self::new(local_today())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Shift by whole days. Out-of-range shifts leave the reference unchanged.
    pub fn shift(&mut self, days: i64) -> NaiveDate {
        match offset_days(self.date, days) {
            Some(next) => self.date = next,
            None => tracing::warn!(days, "reference shift out of range; ignored"),
        }
        self.date
    }

    pub fn set(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// The day before the reference, used by "ended yesterday" actions.
    pub fn yesterday(&self) -> NaiveDate {
        self.date.pred_opt().unwrap_or(self.date)
    }
}

impl Default for ReferenceTime {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn format_pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_date(""), Err(DateError::Empty));
        assert!(matches!(parse_date("2024-13-01"), Err(DateError::Invalid { .. })));
        assert!(matches!(parse_date("yesterday"), Err(DateError::Invalid { .. })));
    }

    #[test]
    fn parse_or_falls_back_to_reference() {
        let fallback = d("2024-06-01");
        assert_eq!(parse_date_or("", fallback), fallback);
        assert_eq!(parse_date_or("not-a-date", fallback), fallback);
        assert_eq!(parse_date_or("2024-01-02", fallback), d("2024-01-02"));
    }

    #[test]
    fn days_between_spans_dst_and_leap_days() {
        assert_eq!(days_between(d("2024-03-31"), d("2024-03-30")), 1);
        assert_eq!(days_between(d("2024-03-01"), d("2024-02-28")), 2);
        assert_eq!(days_between(d("2024-01-01"), d("2024-01-20")), -19);
    }

    #[test]
    fn date_of_uses_local_fields() {
        // 23:30 on Jan 1st at UTC+9 is still Jan 1st locally.
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(date_of(&at), d("2024-01-01"));
    }

    #[test]
    fn parse_month_validates() {
        assert_eq!(parse_month("2024-02"), Ok((2024, 2)));
        assert!(parse_month("2024-00").is_err());
        assert!(parse_month("2024").is_err());
    }

    #[test]
    fn reference_shifts_by_whole_days() {
        let mut reference = ReferenceTime::new(d("2024-01-31"));
        assert_eq!(reference.shift(1), d("2024-02-01"));
        assert_eq!(reference.shift(-2), d("2024-01-30"));
        assert_eq!(reference.yesterday(), d("2024-01-29"));
    }

    #[test]
    fn reference_ignores_out_of_range_shift() {
        let mut reference = ReferenceTime::new(NaiveDate::MAX);
        assert_eq!(reference.shift(1), NaiveDate::MAX);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (-50_000i64..50_000).prop_map(|n| offset_days(d("2000-01-01"), n).unwrap())
    }

    proptest! {
        #[test]
        fn format_parse_round_trip(date in any_date()) {
            prop_assert_eq!(parse_date(&format_date(date)), Ok(date));
        }

        #[test]
        fn days_between_is_antisymmetric(a in any_date(), b in any_date()) {
            prop_assert_eq!(days_between(a, a), 0);
            prop_assert_eq!(days_between(a, b), -days_between(b, a));
        }

        #[test]
        fn offset_then_diff_is_identity(a in any_date(), n in -1_000i64..1_000) {
            let shifted = offset_days(a, n).unwrap();
            prop_assert_eq!(days_between(shifted, a), n);
        }
    }
}
