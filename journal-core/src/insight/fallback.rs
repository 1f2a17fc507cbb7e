//! Deterministic insight table used when the generator is unavailable.
//!
//! The vibe picks the main insight and three default micro-actions, then
//! keyword matches on the free text replace individual slots. The result is
//! always a complete [`Insight`].

use crate::models::{ActionIcon, CheckIn, Insight, MicroAction, RecommendedActivity, Vibe};

pub const DEFAULT_INSIGHT: &str = "It sounds like you're taking a meaningful moment for self-reflection. Your awareness is the first step toward balance.";
pub const CALM_INSIGHT: &str = "It's wonderful that you're in a space of ease. Take a moment to anchor this feeling so you can return to it later.";
pub const SAD_INSIGHT: &str = "It's completely valid to feel heavy right now. Be gentle with yourself—you don't have to 'fix' everything today.";
pub const STRESSED_INSIGHT: &str = "I notice you're feeling a bit pressured. Remember that it's okay to slow down; your productivity isn't your worth.";

pub const STRESSED_QUOTE: &str = "Pause. Breathe. You are more than your to-do list.";
pub const DEFAULT_QUOTE: &str = "Small steps lead to great journeys. You're doing enough.";

const ACTIVITY_IMAGE: &str =
    "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?auto=format&fit=crop&q=80&w=800";

/// Pre-authored main insight for a vibe.
///
/// Only Stressed, Sad and Calm have their own text; every other vibe, and a
/// missing one, gets the generic reflection.
pub fn main_insight_for(vibe: Option<Vibe>) -> &'static str {
    match vibe {
        Some(Vibe::Stressed) => STRESSED_INSIGHT,
        Some(Vibe::Sad) => SAD_INSIGHT,
        Some(Vibe::Calm) => CALM_INSIGHT,
        _ => DEFAULT_INSIGHT,
    }
}

/// Build the fallback insight for a check-in.
pub fn fallback_insight(check_in: &CheckIn) -> Insight {
    let body = check_in.body.to_lowercase();
    let heart = check_in.heart.to_lowercase();

    let mut actions = default_actions(check_in.vibe);

    if body.contains("tired") || body.contains("exhausted") {
        actions[1] = action(
            2,
            "Cold Water Splash (30 sec)",
            "Splash cool water on your face and wrists.",
            ActionIcon::Water,
        );
    }

    if heart.contains("lazy") || heart.contains("stuck") || body.contains("lazy") {
        actions[0] = action(
            1,
            "Define Tiny Step (30 sec)",
            "Name the smallest possible next step and nothing more.",
            ActionIcon::Stretch,
        );
        actions[2] = action(
            3,
            "2-Minute Rule",
            "Work on it for just two minutes, then decide whether to continue.",
            ActionIcon::Breath,
        );
    }

    let stressed = check_in.vibe == Some(Vibe::Stressed);

    Insight {
        main_insight: main_insight_for(check_in.vibe).to_string(),
        micro_actions: actions.into(),
        uplifting_quote: if stressed { STRESSED_QUOTE } else { DEFAULT_QUOTE }.to_string(),
        recommended_activity: Some(RecommendedActivity {
            title: if stressed {
                "Stress Release Yoga"
            } else {
                "Gentle Morning Flow"
            }
            .to_string(),
            duration: "15 min".to_string(),
            image: ACTIVITY_IMAGE.to_string(),
        }),
    }
}

fn default_actions(vibe: Option<Vibe>) -> [MicroAction; 3] {
    match vibe {
        Some(Vibe::Stressed) => [
            action(1, "Physiological Sigh (1 min)", "Two short inhales through the nose, one long exhale.", ActionIcon::Breath),
            action(2, "Gentle Neck Roll (1 min)", "Slowly roll your head in half circles, side to side.", ActionIcon::Stretch),
            action(3, "Lower the Pace (1 min)", "Do your next task at half speed on purpose.", ActionIcon::Stretch),
        ],
        Some(Vibe::Sad) => [
            action(1, "Label the Feeling (30 sec)", "Say to yourself: \"This is sadness, and it will pass.\"", ActionIcon::Stretch),
            action(2, "Light Exposure Reset (2 min)", "Step into daylight or sit by a bright window.", ActionIcon::Sun),
            action(3, "Warm Sensation (2 min)", "Hold a warm drink or place a hand over your heart.", ActionIcon::Stretch),
        ],
        Some(Vibe::Calm) => [
            action(1, "Unclench Check (30 sec)", "Release your jaw, shoulders and hands.", ActionIcon::Stretch),
            action(2, "Music Micro-Boost (2 min)", "Play one song that matches this calm.", ActionIcon::Music),
            action(3, "Same Last Action Nightly (30 sec)", "Pick one small ritual to repeat before bed.", ActionIcon::Moon),
        ],
        _ => [
            action(1, "Unclench Check (30 sec)", "Release your jaw, shoulders and hands.", ActionIcon::Stretch),
            action(2, "Hydration Pause (1 min)", "Drink a full glass of water slowly.", ActionIcon::Water),
            action(3, "Extended Exhale Breathing (1–2 min)", "Exhale for twice as long as you inhale.", ActionIcon::Breath),
        ],
    }
}

fn action(id: u32, text: &str, instruction: &str, icon: ActionIcon) -> MicroAction {
    MicroAction {
        id,
        text: text.to_string(),
        instruction: instruction.to_string(),
        icon,
    }
}
