use journal_core::insight::*;
use journal_core::models::*;
use speculate2::speculate;

fn check_in(body: &str, heart: &str, vibe: Option<Vibe>) -> CheckIn {
    CheckIn {
        body: body.to_string(),
        heart: heart.to_string(),
        environment: String::new(),
        reflection: String::new(),
        vibe,
        breath_action: None,
    }
}

speculate! {
    describe "fallback_insight" {
        it "produces a complete insight for an empty check-in without vibe" {
            let insight = fallback_insight(&CheckIn::default());

            assert!(!insight.main_insight.is_empty());
            assert!(!insight.uplifting_quote.is_empty());
            assert!((1..=3).contains(&insight.micro_actions.len()));
            assert_eq!(
                insight.micro_actions.iter().map(|a| a.id).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );
        }

        it "selects the pre-authored main insight for stressed, sad and calm" {
            let expected = [
                (Vibe::Calm, "It's wonderful that you're in a space of ease. Take a moment to anchor this feeling so you can return to it later."),
                (Vibe::Sad, "It's completely valid to feel heavy right now. Be gentle with yourself—you don't have to 'fix' everything today."),
                (Vibe::Stressed, "I notice you're feeling a bit pressured. Remember that it's okay to slow down; your productivity isn't your worth."),
            ];

            for (vibe, text) in expected {
                let insight = fallback_insight(&check_in("", "", Some(vibe)));
                assert_eq!(insight.main_insight, text, "{vibe}");
                assert_eq!(insight.micro_actions.len(), 3);
            }
        }

        it "gives the remaining vibes the generic reflection and actions" {
            let generic = "It sounds like you're taking a meaningful moment for self-reflection. Your awareness is the first step toward balance.";

            for vibe in [Vibe::Hopeful, Vibe::Happy, Vibe::Neutral, Vibe::Thoughtful] {
                let insight = fallback_insight(&check_in("", "", Some(vibe)));
                assert_eq!(insight.main_insight, generic, "{vibe}");
                assert_eq!(
                    insight.micro_actions.iter().map(|a| a.text.as_str()).collect::<Vec<_>>(),
                    vec![
                        "Unclench Check (30 sec)",
                        "Hydration Pause (1 min)",
                        "Extended Exhale Breathing (1–2 min)",
                    ],
                    "{vibe}"
                );
            }
            assert_eq!(main_insight_for(None), generic);
        }

        it "applies keyword overrides after the vibe defaults" {
            let insight = fallback_insight(&CheckIn {
                body: "I feel tired".to_string(),
                heart: "a bit stuck".to_string(),
                environment: "noisy office".to_string(),
                reflection: String::new(),
                vibe: Some(Vibe::Stressed),
                breath_action: None,
            });

            assert_eq!(insight.main_insight, STRESSED_INSIGHT);
            assert_eq!(insight.micro_actions[0].text, "Define Tiny Step (30 sec)");
            assert_eq!(insight.micro_actions[1].text, "Cold Water Splash (30 sec)");
            assert_eq!(insight.micro_actions[1].icon, ActionIcon::Water);
            assert_eq!(insight.micro_actions[2].text, "2-Minute Rule");
            assert_eq!(insight.uplifting_quote, STRESSED_QUOTE);
        }

        it "keeps vibe defaults in slots no keyword touches" {
            let insight = fallback_insight(&check_in("so tired", "", Some(Vibe::Sad)));

            assert_eq!(insight.micro_actions[0].text, "Label the Feeling (30 sec)");
            assert_eq!(insight.micro_actions[1].text, "Cold Water Splash (30 sec)");
            assert_eq!(insight.micro_actions[2].text, "Warm Sensation (2 min)");
        }
    }

    describe "parse_insight" {
        it "accepts the fallback's own encoding" {
            for vibe in Vibe::ALL.into_iter().map(Some).chain([None]) {
                let original = fallback_insight(&check_in("tired and lazy", "stuck", vibe));
                let encoded = serde_json::to_string_pretty(&original).unwrap();

                let decoded = parse_insight(&encoded).expect("fallback output must parse");
                assert_eq!(decoded, original);

                let fenced = parse_insight(&format!("```json\n{encoded}\n```")).unwrap();
                assert_eq!(fenced, original);
            }
        }

        it "surfaces syntax errors instead of panicking" {
            let encoded = serde_json::to_string(&fallback_insight(&CheckIn::default())).unwrap();
            let truncated = &encoded[..encoded.len() - 10];

            let err = parse_insight(truncated).unwrap_err();
            assert!(matches!(err, ParseError::Json(_)));
        }
    }
}
