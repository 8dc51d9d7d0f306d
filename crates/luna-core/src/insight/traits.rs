use serde::{Deserialize, Serialize};

use crate::error::InsightError;
use crate::phase::{CyclePhase, CycleStatus};

/// Input for a daily insight line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// `None` while the tracker is awaiting records.
    pub phase: Option<CyclePhase>,
    pub cycle_day: i64,
    pub symptoms: Vec<String>,
    pub moods: Vec<String>,
}

impl InsightRequest {
    /// Build from a status and whatever was logged for the reference day.
    pub fn from_status<'a, S, M>(status: &CycleStatus, symptoms: S, moods: M) -> Self
    where
        S: IntoIterator<Item = &'a String>,
        M: IntoIterator<Item = &'a String>,
    {
        Self {
            phase: status.current_phase(),
            cycle_day: status.cycle_day.unwrap_or(1),
            symptoms: symptoms.into_iter().cloned().collect(),
            moods: moods.into_iter().cloned().collect(),
        }
    }
}

/// Every source of insight text implements this trait.
///
/// Providers must not touch tracker state; a failure only ever costs the
/// insight line.
pub trait InsightProvider: Send + Sync {
    /// Unique identifier (e.g. "static", "gemini").
    fn name(&self) -> &str;

    /// Produce a short line of text for the request.
    fn generate(&self, request: &InsightRequest) -> Result<String, InsightError>;
}
