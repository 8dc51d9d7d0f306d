use chrono::NaiveDate;

use crate::cycle::{CycleStore, Flow};

/// Flow to display for `date`.
///
/// An explicit flow in the day's log wins. Otherwise every record is
/// checked, not just the one active for the reference date: a day inside
/// any closed record's `[start, end)` or any open record's safety window
/// shows as Medium.
pub fn period_status(store: &CycleStore, date: NaiveDate, safety_limit: i64) -> Option<Flow> {
    if let Some(flow) = store.log(date).and_then(|log| log.flow) {
        return Some(flow);
    }

    store
        .cycles()
        .iter()
        .take_while(|c| c.start_date <= date)
        .any(|c| c.covers(date, safety_limit))
        .then_some(Flow::Medium)
}
