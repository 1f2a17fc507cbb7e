//! Prompt construction for insight generation.

use std::fmt::Write as _;

use crate::models::{ActionIcon, CheckIn};

/// Micro-actions the generator may choose from. It must not invent others.
pub const ACTION_CATALOG: [&str; 27] = [
    "Extended Exhale Breathing",
    "Unclench Check",
    "Orient to Safety",
    "Gentle Neck Roll",
    "Warm Sensation",
    "Label the Feeling",
    "Lower the Pace",
    "Light Exposure Reset",
    "Power Stretch",
    "Cold Water Splash",
    "Name One Intention",
    "Move One Joint",
    "Hydration Pause",
    "Music Micro-Boost",
    "Define Tiny Step",
    "2-Minute Rule",
    "Visual Finish",
    "Change Location",
    "Speak It Aloud",
    "Remove One Obstacle",
    "Celebrate Starting",
    "Physiological Sigh",
    "Dim Environment",
    "Body Scan Lite",
    "Write One Thought",
    "Slow Counting Breaths",
    "Gentle Self-Touch",
];

const NOT_SPECIFIED: &str = "not specified";

/// Render a check-in into the instruction prompt sent to the generator.
///
/// Check-in fields are embedded verbatim. `language` only affects the prose
/// values; keys and icon tokens are pinned to lower-case English.
pub fn build_prompt(check_in: &CheckIn, language: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a wellness coach with a background in psychology. \
         Your tone is supportive, non-judgmental and optimistic but realistic.\n\
         Analyze the user's check-in and offer a short, encouraging reflection.\n\n",
    );

    prompt.push_str("User check-in:\n");
    let _ = writeln!(prompt, "- Physical: {}", check_in.body);
    let _ = writeln!(prompt, "- Emotional: {}", check_in.heart);
    let _ = writeln!(prompt, "- Environment: {}", check_in.environment);
    let _ = writeln!(
        prompt,
        "- Breathing: {}",
        check_in.breath_action.as_deref().unwrap_or(NOT_SPECIFIED)
    );
    let _ = writeln!(prompt, "- Reflection: {}", check_in.reflection);
    let _ = writeln!(
        prompt,
        "- Vibe: {}",
        check_in.vibe.map(|v| v.label()).unwrap_or(NOT_SPECIFIED)
    );
    prompt.push('\n');

    let _ = writeln!(
        prompt,
        "Choose 2-3 micro-actions from this list only, never invent new ones: {}.",
        ACTION_CATALOG.join(", ")
    );
    let _ = writeln!(
        prompt,
        "Each micro-action needs an \"icon\" chosen from: {}.",
        ActionIcon::KEYS.join(", ")
    );
    prompt.push('\n');

    match language {
        Some(lang) if !lang.trim().is_empty() => {
            let _ = writeln!(
                prompt,
                "Write mainInsight, text, instruction and upliftingQuote in the language \"{}\". \
                 Do NOT translate JSON keys or icon values: they stay lowercase English tokens.",
                lang.trim()
            );
        }
        _ => prompt.push_str(
            "JSON keys and icon values are fixed lowercase English tokens.\n",
        ),
    }
    prompt.push('\n');

    prompt.push_str(
        "Return ONLY a JSON object with exactly this shape. No prose before or after it, \
         no markdown, no code fences:\n",
    );
    prompt.push_str(SCHEMA_EXAMPLE);

    prompt
}

const SCHEMA_EXAMPLE: &str = r#"{
  "mainInsight": "1-4 sentences blending psychology with optimism.",
  "microActions": [
    { "id": 1, "text": "Action name", "instruction": "Brief how-to", "icon": "breath" }
  ],
  "upliftingQuote": "A relevant uplifting quote."
}
"#;
