//! Per-day log entries.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical mood tags offered by the log form.
pub const MOODS: &[&str] = &[
    "happy",
    "sensitive",
    "energetic",
    "tired",
    "anxious",
    "calm",
    "irritable",
];

/// Canonical symptom tags offered by the log form.
pub const SYMPTOMS: &[&str] = &[
    "cramps",
    "headache",
    "bloating",
    "acne",
    "backache",
    "cravings",
    "insomnia",
];

/// Flow intensity for a bleeding day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flow {
    Light,
    Medium,
    Heavy,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Light => "Light",
            Flow::Medium => "Medium",
            Flow::Heavy => "Heavy",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Flow::Light),
            "medium" => Ok(Flow::Medium),
            "heavy" => Ok(Flow::Heavy),
            other => Err(format!("unknown flow '{other}' (expected light, medium or heavy)")),
        }
    }
}

/// Everything recorded for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,
    #[serde(default)]
    pub mood: BTreeSet<String>,
    #[serde(default)]
    pub symptoms: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub love_count: u32,
    #[serde(default)]
    pub intimacy: bool,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            flow: None,
            mood: BTreeSet::new(),
            symptoms: BTreeSet::new(),
            note: None,
            love_count: 0,
            intimacy: false,
        }
    }

    /// Apply one field change in place.
    pub fn apply(&mut self, change: LogChange) {
        match change {
            LogChange::Flow(flow) => self.flow = flow,
            LogChange::Mood(mood) => self.mood = mood,
            LogChange::Symptoms(symptoms) => self.symptoms = symptoms,
            LogChange::Note(note) => self.note = note.filter(|n| !n.trim().is_empty()),
            LogChange::AddLove(n) => self.love_count = self.love_count.saturating_add(n),
            LogChange::ToggleIntimacy => self.intimacy = !self.intimacy,
            LogChange::SetIntimacy(on) => self.intimacy = on,
        }
    }

    /// True when the entry carries anything besides its date.
    pub fn has_content(&self) -> bool {
        self.flow.is_some()
            || !self.mood.is_empty()
            || !self.symptoms.is_empty()
            || self.note.is_some()
            || self.love_count > 0
            || self.intimacy
    }
}

/// A single field-level edit. Overwrites for flow, mood, symptoms and
/// note; additive for love; toggle or set for intimacy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogChange {
    Flow(Option<Flow>),
    Mood(BTreeSet<String>),
    Symptoms(BTreeSet<String>),
    Note(Option<String>),
    AddLove(u32),
    ToggleIntimacy,
    SetIntimacy(bool),
}

/// The full per-day form. Saving it replaces every field it names and
/// leaves the love counter alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub flow: Option<Flow>,
    pub mood: BTreeSet<String>,
    pub symptoms: BTreeSet<String>,
    pub note: Option<String>,
    pub intimacy: bool,
}

impl LogEntry {
    /// Prefill from an existing log, as the form does when reopened.
    pub fn from_log(log: &DailyLog) -> Self {
        Self {
            flow: log.flow,
            mood: log.mood.clone(),
            symptoms: log.symptoms.clone(),
            note: log.note.clone(),
            intimacy: log.intimacy,
        }
    }

    pub fn into_changes(self) -> Vec<LogChange> {
        vec![
            LogChange::Flow(self.flow),
            LogChange::Mood(self.mood),
            LogChange::Symptoms(self.symptoms),
            LogChange::Note(self.note),
            LogChange::SetIntimacy(self.intimacy),
        ]
    }
}
