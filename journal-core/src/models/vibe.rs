use serde::{Deserialize, Serialize};

/// A self-reported mood category.
///
/// The set is closed: every check-in carries at most one of these seven
/// vibes. Variants are declared from most positive to most negative, so the
/// derived `Ord` matches the order used for summaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vibe {
    #[serde(rename = "Hopeful / Inspired")]
    Hopeful,
    #[serde(rename = "Happy / Content")]
    Happy,
    #[serde(rename = "Calm / Peaceful")]
    Calm,
    #[serde(rename = "Neutral / Steady")]
    Neutral,
    #[serde(rename = "Thoughtful / Uncertain")]
    Thoughtful,
    #[serde(rename = "Sad / Low")]
    Sad,
    #[serde(rename = "Stressed / Frustrated")]
    Stressed,
}

impl Vibe {
    pub const ALL: [Vibe; 7] = [
        Self::Hopeful,
        Self::Happy,
        Self::Calm,
        Self::Neutral,
        Self::Thoughtful,
        Self::Sad,
        Self::Stressed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hopeful => "Hopeful / Inspired",
            Self::Happy => "Happy / Content",
            Self::Calm => "Calm / Peaceful",
            Self::Neutral => "Neutral / Steady",
            Self::Thoughtful => "Thoughtful / Uncertain",
            Self::Sad => "Sad / Low",
            Self::Stressed => "Stressed / Frustrated",
        }
    }

    /// Short name used in narrow summaries ("Hopeful", "Sad", ...).
    pub fn short_label(&self) -> &'static str {
        self.label().split('/').next().unwrap_or_default().trim()
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == s.trim())
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Hopeful => "✨",
            Self::Happy => "😊",
            Self::Calm => "😌",
            Self::Neutral => "😐",
            Self::Thoughtful => "🤔",
            Self::Sad => "😔",
            Self::Stressed => "😤",
        }
    }

    /// Ordinal position on the 7-point scale: 7 is most positive, 1 most negative.
    pub fn score(&self) -> u8 {
        match self {
            Self::Hopeful => 7,
            Self::Happy => 6,
            Self::Calm => 5,
            Self::Neutral => 4,
            Self::Thoughtful => 3,
            Self::Sad => 2,
            Self::Stressed => 1,
        }
    }
}

impl std::fmt::Display for Vibe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
