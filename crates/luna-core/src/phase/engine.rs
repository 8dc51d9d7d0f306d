//! Phase inference.
//!
//! Every query recomputes from the store and a reference date; nothing is
//! cached between calls.
//!
//! ## Classification order
//!
//! ```text
//! period ongoing                      -> Menstrual
//! open record past the safety limit   -> Awaiting(StaleOpenRecord)
//! cycle day < 14                      -> Follicular
//! cycle day 14..=15                   -> Ovulation
//! cycle day > 15                      -> Luteal (no upper bound)
//! ```

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::{CycleRecord, CycleStore};
use crate::date::days_between;

/// First cycle day classified as ovulation.
pub const OVULATION_START_DAY: i64 = 14;
/// Last cycle day classified as ovulation.
pub const OVULATION_END_DAY: i64 = 15;

/// Tunable day counts used by the store and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRules {
    /// Starts closer than this to an existing record refer to that record.
    pub min_cycle_gap_days: i64,
    /// Days an open record counts as bleeding before it expires.
    pub safety_period_limit_days: i64,
}

impl Default for CycleRules {
    fn default() -> Self {
        Self {
            min_cycle_gap_days: 15,
            safety_period_limit_days: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl CyclePhase {
    pub const ALL: [CyclePhase; 4] = [
        CyclePhase::Menstrual,
        CyclePhase::Follicular,
        CyclePhase::Ovulation,
        CyclePhase::Luteal,
    ];

    /// Successor in the cycle; Luteal wraps to Menstrual.
    pub fn next(self) -> Self {
        match self {
            CyclePhase::Menstrual => CyclePhase::Follicular,
            CyclePhase::Follicular => CyclePhase::Ovulation,
            CyclePhase::Ovulation => CyclePhase::Luteal,
            CyclePhase::Luteal => CyclePhase::Menstrual,
        }
    }

    /// Classification by cycle day alone, for days outside a period.
    pub fn for_day(cycle_day: i64) -> Self {
        if cycle_day < OVULATION_START_DAY {
            CyclePhase::Follicular
        } else if cycle_day <= OVULATION_END_DAY {
            CyclePhase::Ovulation
        } else {
            CyclePhase::Luteal
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulation => "Ovulation",
            CyclePhase::Luteal => "Luteal",
        };
        f.write_str(s)
    }
}

/// Why no phase can be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwaitingReason {
    /// Nothing has been recorded yet.
    NoRecords,
    /// Records exist, but all of them start after the reference date.
    NoEarlierRecord,
    /// The active record was never closed and has outlived the safety limit.
    StaleOpenRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhaseState {
    Active { phase: CyclePhase },
    Awaiting { reason: AwaitingReason },
}

impl PhaseState {
    pub fn phase(&self) -> Option<CyclePhase> {
        match self {
            PhaseState::Active { phase } => Some(*phase),
            PhaseState::Awaiting { .. } => None,
        }
    }
}

/// Result of classifying one date against one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReading {
    /// 1-based; floored at 1 when the date precedes the record.
    pub cycle_day: i64,
    pub period_ongoing: bool,
    pub phase: PhaseState,
}

/// Everything the home view needs for the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStatus {
    pub reference: NaiveDate,
    pub active_cycle: Option<CycleRecord>,
    pub cycle_day: Option<i64>,
    pub period_ongoing: bool,
    pub phase: PhaseState,
    pub love_count: u32,
    pub intimacy: bool,
}

impl CycleStatus {
    pub fn current_phase(&self) -> Option<CyclePhase> {
        self.phase.phase()
    }
}

/// Stateless phase inference over a [`CycleStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseEngine {
    rules: CycleRules,
}

impl PhaseEngine {
    pub fn new(rules: CycleRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> CycleRules {
        self.rules
    }

    /// The most recent record starting on or before `reference`.
    pub fn active_cycle<'a>(&self, store: &'a CycleStore, reference: NaiveDate) -> Option<&'a CycleRecord> {
        store.latest_started_by(reference)
    }

    /// Classify `date` against `record`.
    ///
    /// A date before the record's start reads as cycle day 1, Follicular.
    pub fn classify(&self, record: &CycleRecord, date: NaiveDate) -> DayReading {
        let cycle_day = (days_between(date, record.start_date) + 1).max(1);
        let period_ongoing = record.covers(date, self.rules.safety_period_limit_days);

        let phase = if period_ongoing {
            PhaseState::Active {
                phase: CyclePhase::Menstrual,
            }
        } else if record.is_open() && cycle_day > self.rules.safety_period_limit_days {
            PhaseState::Awaiting {
                reason: AwaitingReason::StaleOpenRecord,
            }
        } else {
            PhaseState::Active {
                phase: CyclePhase::for_day(cycle_day),
            }
        };

        DayReading {
            cycle_day,
            period_ongoing,
            phase,
        }
    }

    /// Full status for `reference`.
    pub fn status(&self, store: &CycleStore, reference: NaiveDate) -> CycleStatus {
        let (love_count, intimacy) = store
            .log(reference)
            .map(|log| (log.love_count, log.intimacy))
            .unwrap_or_default();

        let Some(active) = self.active_cycle(store, reference) else {
            let reason = if store.is_empty() {
                AwaitingReason::NoRecords
            } else {
                AwaitingReason::NoEarlierRecord
            };
            return CycleStatus {
                reference,
                active_cycle: None,
                cycle_day: None,
                period_ongoing: false,
                phase: PhaseState::Awaiting { reason },
                love_count,
                intimacy,
            };
        };

        let reading = self.classify(active, reference);
        CycleStatus {
            reference,
            active_cycle: Some(*active),
            cycle_day: Some(reading.cycle_day),
            period_ongoing: reading.period_ongoing,
            phase: reading.phase,
            love_count,
            intimacy,
        }
    }
}
