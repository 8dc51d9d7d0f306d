use serde::Serialize;

use super::engine::{CyclePhase, PhaseState};

/// Display metadata for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseInfo {
    pub name: &'static str,
    pub season: &'static str,
    pub description: &'static str,
    pub days_range: &'static str,
}

const MENSTRUAL: PhaseInfo = PhaseInfo {
    name: "Menstrual",
    season: "winter",
    description: "The winter of the cycle. Your body is asking for rest and warmth; curl up like a hibernating bear.",
    days_range: "during recorded period",
};

const FOLLICULAR: PhaseInfo = PhaseInfo {
    name: "Follicular",
    season: "spring",
    description: "The spring of the cycle. Estrogen rises like spring rain and your energy is quietly sprouting.",
    days_range: "after period - day 13",
};

const OVULATION: PhaseInfo = PhaseInfo {
    name: "Ovulation",
    season: "summer",
    description: "The summer of the cycle. Radiant and magnetic, as bright as midsummer sun.",
    days_range: "day 14 - 15",
};

const LUTEAL: PhaseInfo = PhaseInfo {
    name: "Luteal",
    season: "autumn",
    description: "The autumn of the cycle. Feelings turn tender like falling leaves as the body slows toward the next round.",
    days_range: "day 16 - 28",
};

const AWAITING: PhaseInfo = PhaseInfo {
    name: "Unknown",
    season: "-",
    description: "A few more records are needed to learn your rhythm.",
    days_range: "-",
};

impl PhaseInfo {
    pub fn of(phase: CyclePhase) -> &'static PhaseInfo {
        match phase {
            CyclePhase::Menstrual => &MENSTRUAL,
            CyclePhase::Follicular => &FOLLICULAR,
            CyclePhase::Ovulation => &OVULATION,
            CyclePhase::Luteal => &LUTEAL,
        }
    }

    pub fn of_state(state: &PhaseState) -> &'static PhaseInfo {
        match state.phase() {
            Some(phase) => Self::of(phase),
            None => &AWAITING,
        }
    }
}
