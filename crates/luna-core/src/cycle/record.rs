use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::days_between;

/// One menstrual period: the first day of flow and, once known, the first
/// day without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub start_date: NaiveDate,
    /// Exclusive. `None` while the period is still open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl CycleRecord {
    pub fn open(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
        }
    }

    pub fn closed(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: Some(end_date),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Whether `date` is a bleeding day of this record.
    ///
    /// Closed records cover `[start, end)`. Open records cover the first
    /// `safety_limit` days from the start and then expire.
    pub fn covers(&self, date: NaiveDate, safety_limit: i64) -> bool {
        match self.end_date {
            Some(end) => date >= self.start_date && date < end,
            None => {
                let offset = days_between(date, self.start_date);
                (0..safety_limit).contains(&offset)
            }
        }
    }

    /// End date precedes start date.
    pub(crate) fn is_inverted(&self) -> bool {
        self.end_date.is_some_and(|end| end < self.start_date)
    }
}
