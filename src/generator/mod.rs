//! Text generation backends.
//!
//! The insight service only needs "prompt in, text out". Anything that goes
//! wrong on the way is a [`GenerateError`], which the service answers with the
//! local fallback.

mod gemini;

pub use gemini::{GeminiConfig, GeminiGenerator};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("text generator is not configured")]
    Unavailable,

    #[error("generator request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generator returned an empty response")]
    Empty,
}

/// A remote service that turns a prompt into free-form text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Generator used when no API key is configured. Always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Unavailable)
    }
}
