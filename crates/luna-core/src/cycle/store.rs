//! In-memory cycle collection and daily log map.
//!
//! The store owns both halves of the persisted state. Phase inference reads
//! both, so they are always handed to persistence together as one
//! [`Snapshot`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::log::{DailyLog, Flow, LogChange};
use super::record::CycleRecord;
use crate::date::{days_between, format_date};

/// Persisted form of the store: the ordered cycle list plus the log map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub cycles: Vec<CycleRecord>,
    #[serde(default)]
    pub logs: BTreeMap<NaiveDate, DailyLog>,
}

/// What `start_period` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StartOutcome {
    /// A new open record was created.
    Inserted { start_date: NaiveDate },
    /// An existing nearby record was moved back to an earlier start.
    MovedEarlier { from: NaiveDate, to: NaiveDate },
    /// A nearby record already starts on or before this date.
    AlreadyRecorded { start_date: NaiveDate },
}

impl StartOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, StartOutcome::AlreadyRecorded { .. })
    }
}

/// What `end_period` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EndOutcome {
    /// Nothing to end.
    NoActiveCycle,
    /// Ended on (or before) its own start day: treated as a mis-tap and removed.
    Removed { start_date: NaiveDate },
    /// End date stamped.
    Closed {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    /// The latest cycle's bleeding is already over; its record is left as is.
    NotOngoing { start_date: NaiveDate },
}

impl EndOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, EndOutcome::NoActiveCycle | EndOutcome::NotOngoing { .. })
    }
}

/// Cycle records sorted ascending and unique by start date, plus at most one
/// log per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStore {
    cycles: Vec<CycleRecord>,
    logs: BTreeMap<NaiveDate, DailyLog>,
}

impl CycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted data, re-establishing the collection
    /// invariants the file may have lost.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let Snapshot { mut cycles, logs } = snapshot;

        let before = cycles.len();
        cycles.retain(|c| !c.is_inverted());
        cycles.sort_by_key(|c| c.start_date);
        cycles.dedup_by_key(|c| c.start_date);
        if cycles.len() != before {
            tracing::warn!(
                dropped = before - cycles.len(),
                "dropped inverted or duplicate cycle records"
            );
        }

        let logs = logs
            .into_iter()
            .map(|(date, mut log)| {
                log.date = date;
                (date, log)
            })
            .collect();

        Self { cycles, logs }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cycles: self.cycles.clone(),
            logs: self.logs.clone(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn cycles(&self) -> &[CycleRecord] {
        &self.cycles
    }

    pub fn logs(&self) -> &BTreeMap<NaiveDate, DailyLog> {
        &self.logs
    }

    pub fn log(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// The record with the latest start on or before `date`.
    pub fn latest_started_by(&self, date: NaiveDate) -> Option<&CycleRecord> {
        let idx = self.cycles.partition_point(|c| c.start_date <= date);
        idx.checked_sub(1).and_then(|i| self.cycles.get(i))
    }

    /// First record whose start lies strictly within `gap` days of `date`.
    fn nearby_index(&self, date: NaiveDate, gap: i64) -> Option<usize> {
        self.cycles
            .iter()
            .position(|c| days_between(date, c.start_date).abs() < gap)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a period start on `on`.
    ///
    /// A start within `min_gap` days of an existing record refers to that
    /// record: an earlier date moves its start back, a later or equal date is
    /// ignored. Otherwise a new open record is inserted. Whenever the
    /// collection changes, the day's flow is set to Medium and the rest of
    /// its log is kept.
    pub fn start_period(&mut self, on: NaiveDate, min_gap: i64) -> StartOutcome {
        let outcome = match self.nearby_index(on, min_gap) {
            Some(idx) => {
                let existing = &mut self.cycles[idx];
                if on < existing.start_date {
                    let from = existing.start_date;
                    existing.start_date = on;
                    StartOutcome::MovedEarlier { from, to: on }
                } else {
                    StartOutcome::AlreadyRecorded {
                        start_date: existing.start_date,
                    }
                }
            }
            None => {
                self.cycles.push(CycleRecord::open(on));
                StartOutcome::Inserted { start_date: on }
            }
        };

        if outcome.changed() {
            self.cycles.sort_by_key(|c| c.start_date);
            self.upsert_log(on, [LogChange::Flow(Some(Flow::Medium))]);
        }
        tracing::debug!(date = %format_date(on), ?outcome, "start_period");
        outcome
    }

    /// Close the active record on `on`.
    ///
    /// `active_start` identifies the active record by its start date. Ending
    /// on or before the start day deletes the record instead.
    pub fn end_period(&mut self, on: NaiveDate, active_start: Option<NaiveDate>) -> EndOutcome {
        let Some(start) = active_start else {
            return EndOutcome::NoActiveCycle;
        };
        let Some(idx) = self.cycles.iter().position(|c| c.start_date == start) else {
            return EndOutcome::NoActiveCycle;
        };

        let outcome = if on <= start {
            self.cycles.remove(idx);
            EndOutcome::Removed { start_date: start }
        } else {
            self.cycles[idx].end_date = Some(on);
            EndOutcome::Closed {
                start_date: start,
                end_date: on,
            }
        };
        tracing::debug!(date = %format_date(on), ?outcome, "end_period");
        outcome
    }

    /// Merge field changes into the log for `date`, creating it if needed.
    pub fn upsert_log<I>(&mut self, date: NaiveDate, changes: I) -> &DailyLog
    where
        I: IntoIterator<Item = LogChange>,
    {
        let log = self
            .logs
            .entry(date)
            .or_insert_with(|| DailyLog::new(date));
        for change in changes {
            log.apply(change);
        }
        log
    }
}

impl From<Snapshot> for CycleStore {
    fn from(snapshot: Snapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
