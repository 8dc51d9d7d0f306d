use std::sync::Mutex;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

use super::traits::{InsightProvider, InsightRequest};
use crate::error::InsightError;
use crate::phase::CyclePhase;

/// Line shown while there is no phase to talk about.
pub const AWAITING_INSIGHT: &str = "Be kind to yourself today while we wait for your body's next signal.";

const MENSTRUAL: [&str; 5] = [
    "Hot water bottle or a hug: today you deserve all the warmth there is.",
    "Like the moon, you are allowed to rest without guilt.",
    "Let yourself slow down on this gentle winter day.",
    "You don't have to get much done today. Looking after yourself is achievement enough.",
    "Brew a cup of ginger tea and warm yourself from the inside out.",
];

const FOLLICULAR: [&str; 5] = [
    "Can you feel it? Your energy is waking up like spring buds.",
    "Your skin has a glow today that comes from the inside.",
    "A good day to try something new; the world is waiting to be explored.",
    "Your mood is as light as a breeze. Enjoy this moment.",
    "Creativity is coming back. Any new ideas you want to try?",
];

const OVULATION: [&str; 5] = [
    "You are radiant today, and confidence is your best look.",
    "Full marks for charm! As bright as the midsummer sun.",
    "Work or play, today you handle it all with ease.",
    "Listen to your body and let your enthusiasm out.",
    "You are at the peak of your energy. Nothing can stop you.",
];

const LUTEAL: [&str; 5] = [
    "Feeling tired is fine. It's your body reminding you to slow down.",
    "Feelings are as tender as autumn leaves; be patient with yourself.",
    "Run a warm bath, read a favourite book, enjoy the quiet.",
    "You don't have to be perfect all the time. You are lovely as you are.",
    "Give your feelings somewhere to go, even if that's just daydreaming.",
];

/// Five canned phrases per phase.
pub fn phrases(phase: CyclePhase) -> &'static [&'static str] {
    match phase {
        CyclePhase::Menstrual => &MENSTRUAL,
        CyclePhase::Follicular => &FOLLICULAR,
        CyclePhase::Ovulation => &OVULATION,
        CyclePhase::Luteal => &LUTEAL,
    }
}

/// Local phrase table. Never fails.
#[derive(Debug)]
pub struct StaticInsights {
    rng: Mutex<Mcg128Xsl64>,
}

impl StaticInsights {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(Mcg128Xsl64::from_entropy()),
        }
    }

    /// Deterministic choice sequence (for tests).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(Mcg128Xsl64::seed_from_u64(seed)),
        }
    }

    /// Pick a phrase for `phase`, or the awaiting line.
    pub fn pick(&self, phase: Option<CyclePhase>) -> &'static str {
        let Some(phase) = phase else {
            return AWAITING_INSIGHT;
        };
        let table = phrases(phase);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        table.choose(&mut *rng).copied().unwrap_or(AWAITING_INSIGHT)
    }
}

impl Default for StaticInsights {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightProvider for StaticInsights {
    fn name(&self) -> &str {
        "static"
    }

    fn generate(&self, request: &InsightRequest) -> Result<String, InsightError> {
        Ok(self.pick(request.phase).to_string())
    }
}
