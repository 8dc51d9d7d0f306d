//! # Luna Core Library
//!
//! Core logic for the Luna menstrual cycle tracker. Every operation is
//! available through the `luna` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Cycle store**: ordered period records plus a per-date log map, with the
//!   start/end merge rules applied on every mutation
//! - **Phase engine**: recomputes the phase for a user-controlled reference
//!   date on every query
//! - **Calendar**: per-day flow projection and a Sunday-first month grid
//! - **Insights**: a static phrase table with optional remote generation
//! - **Storage**: full-snapshot JSON persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: session object that applies mutations and persists them
//! - [`PhaseEngine`]: stateless phase inference
//! - [`CycleStore`]: the records and logs
//! - [`Config`]: application configuration management
//! - [`InsightProvider`]: trait for insight text sources

pub mod calendar;
pub mod cycle;
pub mod date;
pub mod error;
pub mod insight;
pub mod phase;
pub mod storage;
pub mod tracker;

pub use calendar::{period_status, CalendarMonth, DayCell, LoveTier, MonthCursor};
pub use cycle::{
    CycleRecord, CycleStore, DailyLog, EndOutcome, Flow, LogChange, LogEntry, Snapshot,
    StartOutcome, MOODS, SYMPTOMS,
};
pub use date::ReferenceTime;
pub use error::{ConfigError, CoreError, DateError, InsightError, StorageError};
pub use insight::{insight_provider, FallbackInsights, InsightProvider, InsightRequest};
pub use phase::{
    AwaitingReason, CyclePhase, CycleRules, CycleStatus, PhaseEngine, PhaseInfo, PhaseState,
};
pub use storage::{Config, JsonFileStore, MemoryStore, SnapshotStore};
pub use tracker::{EndStamp, Tracker};
