//! Month grid for the calendar view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::projector::period_status;
use crate::cycle::{CycleStore, Flow};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The month currently shown, independent of the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    pub month: u32,
}

impl MonthCursor {
    /// `None` for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Move by a signed number of months. `None` once the target falls
    /// outside the calendar's year range.
    pub fn add_months(self, delta: i32) -> Option<Self> {
        let total = (self.month as i32 - 1).checked_add(delta)?;
        let year = self.year.checked_add(total.div_euclid(12))?;
        Self::new(year, (total.rem_euclid(12) + 1) as u32)
    }

    pub fn prev(self) -> Option<Self> {
        self.add_months(-1)
    }

    pub fn next(self) -> Option<Self> {
        self.add_months(1)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }

    /// Every date of the month in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let Some(first) = self.first_day() else {
            return Vec::new();
        };
        first
            .iter_days()
            .take_while(|d| d.month() == self.month)
            .collect()
    }
}

/// Size of the love marker drawn on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveTier {
    None,
    Single,
    Few,
    Many,
}

impl LoveTier {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => LoveTier::None,
            1 => LoveTier::Single,
            2..=5 => LoveTier::Few,
            _ => LoveTier::Many,
        }
    }
}

/// One day of the grid, already decorated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub flow: Option<Flow>,
    pub is_reference: bool,
    pub intimacy: bool,
    pub love_count: u32,
    pub love_tier: LoveTier,
    /// A log exists but nothing else marks the day.
    pub has_plain_log: bool,
}

/// Sunday-first month grid. Leading `None`s pad the first week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub cursor: MonthCursor,
    pub title: String,
    pub cells: Vec<Option<DayCell>>,
}

impl CalendarMonth {
    pub fn build(
        cursor: MonthCursor,
        store: &CycleStore,
        reference: NaiveDate,
        safety_limit: i64,
    ) -> Self {
        let days = cursor.days();
        let leading = days
            .first()
            .map(|d| d.weekday().num_days_from_sunday() as usize)
            .unwrap_or(0);

        let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(leading + days.len());
        cells.resize(leading, None);

        for date in days {
            let flow = period_status(store, date, safety_limit);
            let log = store.log(date);
            let love_count = log.map(|l| l.love_count).unwrap_or(0);
            let intimacy = log.is_some_and(|l| l.intimacy);
            let is_reference = date == reference;
            let has_plain_log =
                log.is_some() && flow.is_none() && !is_reference && !intimacy && love_count == 0;

            cells.push(Some(DayCell {
                date,
                flow,
                is_reference,
                intimacy,
                love_count,
                love_tier: LoveTier::from_count(love_count),
                has_plain_log,
            }));
        }

        Self {
            cursor,
            title: format!("{} {}", cursor.name(), cursor.year),
            cells,
        }
    }

    /// Cells split into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }
}
