//! Decoding of generated insight text.

use thiserror::Error;

use crate::models::Insight;

const FENCE: &str = "```";

/// Failure to turn generated text into an [`Insight`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("generated text is empty")]
    Empty,

    #[error("generated text is not a valid insight: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the raw text returned by the generator.
///
/// Surrounding whitespace and an optional code fence (```` ``` ```` or
/// ```` ```json ````) are stripped before decoding. Only the structure is
/// checked; the content is taken as-is.
pub fn parse_insight(raw: &str) -> Result<Insight, ParseError> {
    let text = strip_fences(raw);
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

/// Remove a leading code fence with its optional language tag, and the
/// closing fence when present.
fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    let tag_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let rest = &rest[tag_len..];
    let rest = rest.strip_suffix(FENCE).unwrap_or(rest);
    rest.trim()
}
