//! Session object tying the store, the reference date and persistence
//! together.
//!
//! Every mutation that changes the store writes the whole snapshot exactly
//! once. Mutations that turn out to be no-ops never write. A failed write
//! rolls the in-memory store back, so memory never runs ahead of disk.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarMonth, MonthCursor};
use crate::cycle::{CycleStore, DailyLog, EndOutcome, LogChange, LogEntry, Snapshot, StartOutcome};
use crate::date::{format_date, ReferenceTime};
use crate::error::StorageError;
use crate::phase::{CycleRules, CycleStatus, PhaseEngine};
use crate::storage::SnapshotStore;

/// Which day an "end period" action stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndStamp {
    #[default]
    Today,
    Yesterday,
}

pub struct Tracker<S: SnapshotStore> {
    store: CycleStore,
    engine: PhaseEngine,
    reference: ReferenceTime,
    persistence: S,
}

impl<S: SnapshotStore> Tracker<S> {
    /// Load the saved snapshot and start at `reference`.
    pub fn open(persistence: S, rules: CycleRules, reference: ReferenceTime) -> Self {
        let store = CycleStore::from(persistence.load());
        tracing::debug!(
            cycles = store.cycles().len(),
            logs = store.logs().len(),
            reference = %format_date(reference.date()),
            "tracker opened"
        );
        Self {
            store,
            engine: PhaseEngine::new(rules),
            reference,
            persistence,
        }
    }

    /// Default rules, reference pinned to local today.
    pub fn new(persistence: S) -> Self {
        Self::open(persistence, CycleRules::default(), ReferenceTime::today())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn reference(&self) -> NaiveDate {
        self.reference.date()
    }

    pub fn rules(&self) -> CycleRules {
        self.engine.rules()
    }

    pub fn store(&self) -> &CycleStore {
        &self.store
    }

    pub fn status(&self) -> CycleStatus {
        self.engine.status(&self.store, self.reference.date())
    }

    pub fn log(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.store.log(date)
    }

    pub fn calendar(&self, month: MonthCursor) -> CalendarMonth {
        CalendarMonth::build(
            month,
            &self.store,
            self.reference.date(),
            self.engine.rules().safety_period_limit_days,
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    // ── Reference date ───────────────────────────────────────────────

    pub fn shift_reference(&mut self, days: i64) -> NaiveDate {
        self.reference.shift(days)
    }

    pub fn set_reference(&mut self, date: NaiveDate) {
        self.reference.set(date);
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record a period start on the reference date.
    pub fn start_period(&mut self) -> Result<StartOutcome, StorageError> {
        let before = self.store.clone();
        let outcome = self
            .store
            .start_period(self.reference.date(), self.engine.rules().min_cycle_gap_days);
        if outcome.changed() {
            self.persist_or_restore(before)?;
        }
        Ok(outcome)
    }

    /// End the period of the cycle active at the reference date. Only a
    /// period still ongoing at the reference date can be ended; a finished
    /// one keeps its recorded end.
    pub fn end_period(&mut self, stamp: EndStamp) -> Result<EndOutcome, StorageError> {
        let reference = self.reference.date();
        let on = match stamp {
            EndStamp::Today => reference,
            EndStamp::Yesterday => self.reference.yesterday(),
        };
        let Some(active_start) = self
            .engine
            .active_cycle(&self.store, reference)
            .map(|c| c.start_date)
        else {
            return Ok(EndOutcome::NoActiveCycle);
        };
        if !self.status().period_ongoing {
            tracing::debug!(start = %format_date(active_start), "period already over");
            return Ok(EndOutcome::NotOngoing {
                start_date: active_start,
            });
        }

        let before = self.store.clone();
        let outcome = self.store.end_period(on, Some(active_start));
        if outcome.changed() {
            self.persist_or_restore(before)?;
        }
        Ok(outcome)
    }

    /// One more tap of the love counter for the reference date.
    pub fn add_love(&mut self) -> Result<u32, StorageError> {
        let date = self.reference.date();
        let before = self.store.clone();
        let count = self.store.upsert_log(date, [LogChange::AddLove(1)]).love_count;
        self.persist_or_restore(before)?;
        Ok(count)
    }

    pub fn toggle_intimacy(&mut self) -> Result<bool, StorageError> {
        let date = self.reference.date();
        let before = self.store.clone();
        let intimacy = self.store.upsert_log(date, [LogChange::ToggleIntimacy]).intimacy;
        self.persist_or_restore(before)?;
        Ok(intimacy)
    }

    /// Save the full form for `date`. The love counter is left alone.
    pub fn save_log(&mut self, date: NaiveDate, entry: LogEntry) -> Result<DailyLog, StorageError> {
        self.apply(date, entry.into_changes())
    }

    /// Apply arbitrary field changes to the log for `date`.
    pub fn apply<I>(&mut self, date: NaiveDate, changes: I) -> Result<DailyLog, StorageError>
    where
        I: IntoIterator<Item = LogChange>,
    {
        let before = self.store.clone();
        let after = self.store.upsert_log(date, changes).clone();
        if before.log(date) != Some(&after) {
            tracing::debug!(date = %format_date(date), "log updated");
            self.persist_or_restore(before)?;
        }
        Ok(after)
    }

    /// Write the current store; on failure put `before` back.
    fn persist_or_restore(&mut self, before: CycleStore) -> Result<(), StorageError> {
        if let Err(e) = self.persistence.save(&self.store.snapshot()) {
            tracing::warn!(error = %e, "save failed, rolling back");
            self.store = before;
            return Err(e);
        }
        Ok(())
    }
}
