//! Plain-text rendering of insights and history for the terminal.

use std::collections::BTreeMap;
use std::fmt::{Display, Write as _};

use chrono::{NaiveDate, TimeZone};

use crate::models::{HistoryRecord, Insight, Vibe};
use crate::stats::{CalendarMonth, Trend, TrendPoint};

const WEEKDAYS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// One bar per score, 1 (lowest) to 7 (highest).
const BARS: [char; 7] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇'];

/// Render an insight card.
///
/// Example output:
/// ```text
/// It sounds like you're taking a meaningful moment...
///
///   🤸 Unclench Check (30 sec)
///      Release your jaw, shoulders and hands.
///
/// “Small steps lead to great journeys. You're doing enough.”
/// ```
pub fn render_insight(insight: &Insight) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", insight.main_insight);

    for action in &insight.micro_actions {
        let _ = writeln!(out, "  {} {}", action.icon.glyph(), action.text);
        if !action.instruction.is_empty() {
            let _ = writeln!(out, "     {}", action.instruction);
        }
    }
    if !insight.micro_actions.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "“{}”", insight.uplifting_quote);
    if let Some(activity) = &insight.recommended_activity {
        let _ = writeln!(out, "\nTry next: {} ({})", activity.title, activity.duration);
    }
    out
}

/// One line per vibe with its count.
pub fn render_summary(counts: &BTreeMap<Vibe, usize>) -> String {
    let mut out = String::new();
    for (vibe, count) in counts {
        let _ = writeln!(out, "{} {:<10} {}", vibe.glyph(), vibe.short_label(), count);
    }
    out
}

/// Sparkline of recent scores followed by the trend label.
pub fn render_trend(points: &[TrendPoint], trend: Trend) -> String {
    if points.len() < 2 {
        return "Complete more scans to see your trend\n".to_string();
    }
    let line: String = points
        .iter()
        .map(|p| BARS[usize::from(p.score.clamp(1, 7)) - 1])
        .collect();
    format!("{}  {}\n", line, trend.label())
}

/// Month grid with weeks starting on Sunday. Days with a check-in show the
/// vibe glyph instead of the number.
pub fn render_calendar(month: &CalendarMonth) -> String {
    let mut out = String::new();

    if let Some(first) = NaiveDate::from_ymd_opt(month.year, month.month, 1) {
        let _ = writeln!(out, "{}", first.format("%B %Y"));
    }

    let header: Vec<String> = WEEKDAYS.iter().map(|d| format!("{:>2}", d)).collect();
    let _ = writeln!(out, "{}", header.join(" "));

    let cells: Vec<String> = (0..month.leading_blanks)
        .map(|_| "  ".to_string())
        .chain(month.days.iter().map(|day| match day.vibe {
            Some(_) => day.display(),
            None => format!("{:>2}", day.day),
        }))
        .collect();

    for week in cells.chunks(7) {
        let _ = writeln!(out, "{}", week.join(" "));
    }
    out
}

/// Compact history list, one line per record, headed by its id.
pub fn render_history<Tz>(records: &[HistoryRecord], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return "No check-ins yet\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let when = record.timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M");
        let vibe = record
            .vibe
            .map(|v| format!("{} {}", v.glyph(), v.label()))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "#{}  {}  {}", record.id, when, vibe);
        if !record.insight.is_empty() {
            let _ = writeln!(out, "    {}", record.insight);
        }
    }
    out
}

/// Full view of one saved check-in.
///
/// Example output:
/// ```text
/// Thursday, 2 April 2026 at 10:05
/// 😔 Sad / Low
///
/// "Be gentle with yourself."
///
/// Recommended actions
///   💧 Hydration Pause (1 min)
///      Drink a full glass of water slowly.
///
/// Body         heavy
/// Heart        down
/// Environment  home
/// Breathing    Box Breathing
///
/// “Small steps lead to great journeys.”
/// ```
pub fn render_scan_detail<Tz>(record: &HistoryRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let when = record.timestamp.with_timezone(tz);
    let _ = writeln!(out, "{}", when.format("%A, %-d %B %Y at %H:%M"));
    if let Some(vibe) = record.vibe {
        let _ = writeln!(out, "{} {}", vibe.glyph(), vibe.label());
    }

    if !record.insight.is_empty() {
        let _ = writeln!(out, "\n\"{}\"", record.insight);
    }

    if !record.micro_actions.is_empty() {
        let _ = writeln!(out, "\nRecommended actions");
        for action in &record.micro_actions {
            let _ = writeln!(out, "  {} {}", action.icon.glyph(), action.text);
            if !action.instruction.is_empty() {
                let _ = writeln!(out, "     {}", action.instruction);
            }
        }
    }

    let fields = [
        ("Body", Some(record.body.as_str())),
        ("Heart", Some(record.heart.as_str())),
        ("Environment", Some(record.environment.as_str())),
        ("Reflection", Some(record.reflection.as_str())),
        ("Breathing", record.breath_action.as_deref()),
    ];
    let filled: Vec<(&str, &str)> = fields
        .into_iter()
        .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
        .collect();
    if !filled.is_empty() {
        out.push('\n');
        for (name, value) in filled {
            let _ = writeln!(out, "{:<12} {}", name, value);
        }
    }

    if let Some(quote) = record.uplifting_quote.as_deref().filter(|q| !q.is_empty()) {
        let _ = writeln!(out, "\n“{}”", quote);
    }
    out
}
