use serde::{Deserialize, Serialize};

use super::vibe::Vibe;

/// One wellness self-report.
///
/// Check-ins are ephemeral: they exist only while an insight is being
/// generated and are persisted as part of a [`HistoryRecord`](super::HistoryRecord).
/// Text fields are free-form and may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// How the body feels.
    #[serde(default)]
    pub body: String,
    /// Emotional state.
    #[serde(default)]
    pub heart: String,
    /// Surroundings at the time of the check-in.
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub vibe: Option<Vibe>,
    /// Label of the breathing exercise chosen during the check-in, if any.
    #[serde(default)]
    pub breath_action: Option<String>,
}

/// Body of an insight generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    #[serde(flatten)]
    pub check_in: CheckIn,
    /// Response language hint, e.g. `en` or `es`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl From<CheckIn> for InsightRequest {
    fn from(check_in: CheckIn) -> Self {
        Self {
            check_in,
            language: None,
        }
    }
}

/// Opaque token that partitions history records.
///
/// This is not a credential. It identifies whose records to read and write,
/// nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    /// Returns `None` for blank tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
