//! Insight generation with local fallback.

use std::sync::Arc;

use thiserror::Error;

use crate::generator::{DisabledGenerator, GeminiConfig, GeminiGenerator, TextGenerator};
use crate::insight::{build_prompt, fallback_insight, parse_insight, ParseError};
use crate::models::{Insight, InsightRequest};

#[derive(Debug, Error)]
pub enum InsightError {
    /// The generator answered, but not with a usable insight.
    #[error("insight generation failed: {0}")]
    Malformed(#[from] ParseError),
}

/// Turns check-ins into insights.
///
/// Exactly one generator call per request, never retried. When the generator
/// is unconfigured, unreachable, errors or answers with nothing, the local
/// fallback table answers instead. Text that comes back but can't be parsed is
/// an error for the caller to show.
#[derive(Clone)]
pub struct InsightService {
    generator: Arc<dyn TextGenerator>,
}

impl InsightService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Gemini when an API key is configured, fallback-only otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        match GeminiConfig::from_env() {
            Some(config) => {
                tracing::info!(model = %config.model, "Insight generation via Gemini");
                Ok(Self::new(Arc::new(GeminiGenerator::new(config)?)))
            }
            None => {
                tracing::warn!("No generator API key set, insights will use the local fallback");
                Ok(Self::fallback_only())
            }
        }
    }

    pub fn fallback_only() -> Self {
        Self::new(Arc::new(DisabledGenerator))
    }

    pub async fn generate(&self, request: &InsightRequest) -> Result<Insight, InsightError> {
        let prompt = build_prompt(&request.check_in, request.language.as_deref());

        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Generator unavailable, using fallback insight");
                return Ok(fallback_insight(&request.check_in));
            }
        };

        match parse_insight(&raw) {
            Ok(insight) => {
                tracing::info!(actions = insight.micro_actions.len(), "Generated insight");
                Ok(insight)
            }
            Err(e) => {
                tracing::error!(error = %e, raw_len = raw.len(), "Generator returned malformed insight");
                Err(e.into())
            }
        }
    }
}
