use super::static_table::StaticInsights;
use super::traits::{InsightProvider, InsightRequest};
use crate::error::InsightError;

/// Tries an optional primary provider and falls back to the static table on
/// any error. Never fails.
pub struct FallbackInsights {
    primary: Option<Box<dyn InsightProvider>>,
    fallback: StaticInsights,
}

impl FallbackInsights {
    /// Static table only.
    pub fn local(fallback: StaticInsights) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    pub fn with_primary(primary: Box<dyn InsightProvider>, fallback: StaticInsights) -> Self {
        Self {
            primary: Some(primary),
            fallback,
        }
    }

    /// Name of the provider that will be tried first.
    pub fn primary_name(&self) -> &str {
        self.primary
            .as_deref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Insight text for `request`.
    pub fn text(&self, request: &InsightRequest) -> String {
        if let Some(primary) = &self.primary {
            match primary.generate(request) {
                Ok(text) => return text,
                Err(err) => {
                    tracing::warn!(provider = primary.name(), error = %err, "insight provider failed; using static phrase");
                }
            }
        }
        self.fallback.pick(request.phase).to_string()
    }
}

impl InsightProvider for FallbackInsights {
    fn name(&self) -> &str {
        "fallback"
    }

    fn generate(&self, request: &InsightRequest) -> Result<String, InsightError> {
        Ok(self.text(request))
    }
}
