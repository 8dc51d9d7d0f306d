//! Calendar projection: per-day flow status and the month grid.

mod month;
mod projector;

pub use month::{CalendarMonth, DayCell, LoveTier, MonthCursor};
pub use projector::period_status;
