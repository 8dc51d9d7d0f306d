//! Daily insight text.
//!
//! The static phrase table is always available. Remote generation is an
//! opt-in layer on top of it and can only ever affect the insight line.

mod fallback;
mod gemini;
mod static_table;
mod traits;

pub use fallback::FallbackInsights;
pub use gemini::GeminiInsights;
pub use static_table::{phrases, StaticInsights, AWAITING_INSIGHT};
pub use traits::{InsightProvider, InsightRequest};

use crate::storage::InsightsConfig;

/// Build the provider chain for `config`.
///
/// Remote generation is used only when enabled and a key is present;
/// otherwise the chain is the static table alone.
pub fn insight_provider(config: &InsightsConfig) -> FallbackInsights {
    if !config.ai_enabled {
        return FallbackInsights::local(StaticInsights::new());
    }
    match GeminiInsights::from_config(config) {
        Ok(remote) => FallbackInsights::with_primary(Box::new(remote), StaticInsights::new()),
        Err(err) => {
            tracing::warn!(error = %err, "remote insights unavailable; using static phrases");
            FallbackInsights::local(StaticInsights::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_config_is_local_only() {
        let insights = insight_provider(&InsightsConfig::default());
        assert_eq!(insights.primary_name(), "static");
    }

    #[test]
    fn enabled_without_key_degrades_to_local() {
        let config = InsightsConfig {
            ai_enabled: true,
            api_key_env: "LUNA_TEST_DEFINITELY_UNSET".into(),
            ..InsightsConfig::default()
        };
        assert_eq!(insight_provider(&config).primary_name(), "static");
    }
}
