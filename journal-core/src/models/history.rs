use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checkin::CheckIn;
use super::insight::{Insight, MicroAction};
use super::vibe::Vibe;

/// A completed check-in and the insight it produced, as persisted.
///
/// History is append-only: a record is written once when the check-in flow
/// finishes and never edited. The only way to remove records is clearing
/// everything for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub user_id: String,
    /// Assigned by the store at write time.
    pub timestamp: DateTime<Utc>,
    pub vibe: Option<Vibe>,
    pub body: String,
    pub heart: String,
    pub environment: String,
    pub reflection: String,
    pub breath_action: Option<String>,
    /// The main insight text.
    pub insight: String,
    #[serde(default)]
    pub micro_actions: Vec<MicroAction>,
    #[serde(default)]
    pub uplifting_quote: Option<String>,
}

/// Input for saving a history record.
///
/// Every field is optional at the wire level so the store can reject missing
/// `userId`/`vibe` with a readable message instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScanInput {
    pub user_id: Option<String>,
    pub vibe: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub heart: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub breath_action: Option<String>,
    #[serde(default)]
    pub insight: String,
    #[serde(default)]
    pub micro_actions: Vec<MicroAction>,
    #[serde(default)]
    pub uplifting_quote: Option<String>,
}

impl SaveScanInput {
    /// Combine a check-in and its insight into one record for `user_id`.
    pub fn from_parts(user_id: &str, check_in: &CheckIn, insight: &Insight) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            vibe: check_in.vibe.map(|v| v.label().to_string()),
            body: check_in.body.clone(),
            heart: check_in.heart.clone(),
            environment: check_in.environment.clone(),
            reflection: check_in.reflection.clone(),
            breath_action: check_in.breath_action.clone(),
            insight: insight.main_insight.clone(),
            micro_actions: insight.micro_actions.clone(),
            uplifting_quote: Some(insight.uplifting_quote.clone()),
        }
    }
}

/// Response body of the history save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveScanResponse {
    pub scan: HistoryRecord,
}

/// Response body of the history read endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanListResponse {
    pub scans: Vec<HistoryRecord>,
}

/// Response body of the history clear endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearScansResponse {
    pub deleted: usize,
}
