//! Cycle records, daily logs and the store that owns them.

mod log;
mod record;
mod store;

pub use log::{DailyLog, Flow, LogChange, LogEntry, MOODS, SYMPTOMS};
pub use record::CycleRecord;
pub use store::{CycleStore, EndOutcome, Snapshot, StartOutcome};
