//! Remote insight generation through the Gemini `generateContent` API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::traits::{InsightProvider, InsightRequest};
use crate::error::InsightError;
use crate::phase::CyclePhase;
use crate::storage::InsightsConfig;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini-backed provider.
///
/// Each call spins up a current-thread runtime and blocks on the request, so
/// it must not be called from inside an async context.
pub struct GeminiInsights {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiInsights {
    /// Build with an explicit key.
    pub fn new(api_key: impl Into<String>, config: &InsightsConfig) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    /// Build from configuration, reading the key from `config.api_key_env`.
    ///
    /// # Errors
    ///
    /// `Disabled` when remote insights are off, `MissingCredential` when the
    /// key variable is unset or empty.
    pub fn from_config(config: &InsightsConfig) -> Result<Self, InsightError> {
        if !config.ai_enabled {
            return Err(InsightError::Disabled);
        }
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InsightError::MissingCredential(config.api_key_env.clone()))?;
        Self::new(api_key, config)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Prompt text for a request.
    pub fn prompt(request: &InsightRequest) -> String {
        let phase = request
            .phase
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let symptoms = if request.symptoms.is_empty() {
            String::new()
        } else {
            format!("She feels: {}.", request.symptoms.join(", "))
        };
        let moods = if request.moods.is_empty() {
            String::new()
        } else {
            format!("Her mood today: {}.", request.moods.join(", "))
        };
        let focus = match request.phase {
            Some(CyclePhase::Menstrual) => "She is menstruating: focus on rest and warmth.",
            Some(CyclePhase::Follicular) | Some(CyclePhase::Ovulation) => {
                "She is in a high-energy phase: celebrate her vitality."
            }
            Some(CyclePhase::Luteal) => {
                "She is in the luteal phase: soothe her feelings and suggest something comforting."
            }
            None => "Her phase is not known yet: offer gentle encouragement.",
        };

        format!(
            "You are a caring, knowledgeable and gentle companion for women's health.\n\
             \n\
             Context:\n\
             - Current phase: {phase}\n\
             - Cycle day: {day} (day 1 is the first day of the period)\n\
             - {symptoms}\n\
             - {moods}\n\
             \n\
             Task: write a short, warm and comforting daily whisper of at most two sentences. \
             {focus} Sound like a close friend, not a doctor.",
            day = request.cycle_day,
        )
    }

    async fn request(&self, prompt: String) -> Result<String, InsightError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(InsightError::Status {
                status: resp.status().as_u16(),
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        let text = text.trim();
        if text.is_empty() {
            return Err(InsightError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

impl InsightProvider for GeminiInsights {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, request: &InsightRequest) -> Result<String, InsightError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.request(Self::prompt(request)))
    }
}
