//! Cycle-phase inference engine.

mod engine;
mod info;

pub use engine::{
    AwaitingReason, CyclePhase, CycleRules, CycleStatus, DayReading, PhaseEngine, PhaseState,
    OVULATION_END_DAY, OVULATION_START_DAY,
};
pub use info::PhaseInfo;
