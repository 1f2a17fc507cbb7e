use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A supportive interpretation of a check-in.
///
/// Produced either by the text generator or by the local fallback table and
/// never mutated afterwards. The generator is asked for 2-3 micro-actions but
/// consumers must cope with any number, including none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub main_insight: String,
    pub micro_actions: Vec<MicroAction>,
    pub uplifting_quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_activity: Option<RecommendedActivity>,
}

/// A short, concrete coping behavior suggested alongside an insight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MicroAction {
    pub id: u32,
    /// Display label, e.g. "Hydration Pause (1 min)".
    pub text: String,
    /// One-line how-to.
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub icon: ActionIcon,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedActivity {
    pub title: String,
    pub duration: String,
    pub image: String,
}

/// Icon key attached to a micro-action.
///
/// The vocabulary is closed. Keys come from untrusted generated text, so
/// decoding never fails: known aliases map onto their canonical key and
/// anything else becomes [`ActionIcon::Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionIcon {
    Walk,
    Stretch,
    Water,
    Breath,
    Sun,
    Music,
    Pen,
    List,
    Eye,
    Clock,
    Moon,
    Refresh,
    #[default]
    Default,
}

impl ActionIcon {
    /// Canonical keys offered to the generator.
    pub const KEYS: [&'static str; 12] = [
        "walk", "stretch", "water", "breath", "sun", "music", "pen", "list", "eye", "clock",
        "moon", "refresh",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Stretch => "stretch",
            Self::Water => "water",
            Self::Breath => "breath",
            Self::Sun => "sun",
            Self::Music => "music",
            Self::Pen => "pen",
            Self::List => "list",
            Self::Eye => "eye",
            Self::Clock => "clock",
            Self::Moon => "moon",
            Self::Refresh => "refresh",
            Self::Default => "default",
        }
    }

    /// Resolve a raw key. Case and surrounding whitespace are ignored.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "walk" | "walking" => Self::Walk,
            "stretch" | "accessibility_new" => Self::Stretch,
            "water" | "water_drop" | "hydration" => Self::Water,
            "breath" | "breathing" | "air" => Self::Breath,
            "sun" => Self::Sun,
            "music" => Self::Music,
            "pen" => Self::Pen,
            "list" => Self::List,
            "eye" => Self::Eye,
            "clock" => Self::Clock,
            "moon" => Self::Moon,
            "refresh" => Self::Refresh,
            _ => Self::Default,
        }
    }

    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Walk => "👣",
            Self::Stretch => "🤸",
            Self::Water => "💧",
            Self::Breath => "🌬",
            Self::Sun => "☀",
            Self::Music => "🎵",
            Self::Pen => "✎",
            Self::List => "☰",
            Self::Eye => "👁",
            Self::Clock => "⏱",
            Self::Moon => "☾",
            Self::Refresh => "↻",
            Self::Default => "✦",
        }
    }
}

impl Serialize for ActionIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionIcon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values (null, numbers) are tolerated as well.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .map(ActionIcon::from_key)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_aliases_resolve_to_canonical_keys() {
        assert_eq!(ActionIcon::from_key("accessibility_new"), ActionIcon::Stretch);
        assert_eq!(ActionIcon::from_key("water_drop"), ActionIcon::Water);
        assert_eq!(ActionIcon::from_key("  AIR "), ActionIcon::Breath);
        assert_eq!(ActionIcon::from_key("Walking"), ActionIcon::Walk);
    }

    #[test]
    fn unknown_icon_decodes_to_default() {
        let action: MicroAction = serde_json::from_value(serde_json::json!({
            "id": 1,
            "text": "Respirar",
            "instruction": "Inhala",
            "icon": "respiración"
        }))
        .unwrap();
        assert_eq!(action.icon, ActionIcon::Default);
    }

    #[test]
    fn missing_or_null_icon_decodes_to_default() {
        let action: MicroAction =
            serde_json::from_value(serde_json::json!({ "id": 2, "text": "Pause", "icon": null }))
                .unwrap();
        assert_eq!(action.icon, ActionIcon::Default);
        assert_eq!(action.instruction, "");

        let action: MicroAction =
            serde_json::from_value(serde_json::json!({ "id": 3, "text": "Pause" })).unwrap();
        assert_eq!(action.icon, ActionIcon::Default);
    }

    #[test]
    fn icon_serializes_canonical_key() {
        let json = serde_json::to_value(ActionIcon::from_key("water_drop")).unwrap();
        assert_eq!(json, serde_json::json!("water"));
    }

    #[test]
    fn every_offered_key_is_known() {
        for key in ActionIcon::KEYS {
            assert_ne!(ActionIcon::from_key(key), ActionIcon::Default, "{key}");
            assert_eq!(ActionIcon::from_key(key).as_str(), key);
        }
    }

    #[test]
    fn recommended_activity_is_optional() {
        let insight: Insight = serde_json::from_value(serde_json::json!({
            "mainInsight": "Keep going.",
            "microActions": [],
            "upliftingQuote": "One breath at a time."
        }))
        .unwrap();
        assert!(insight.recommended_activity.is_none());

        let json = serde_json::to_value(&insight).unwrap();
        assert!(json.get("recommendedActivity").is_none());
    }
}
