//! Aggregation over a user's history.
//!
//! Every function takes records in the order the history store returns them,
//! newest first.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{HistoryRecord, Vibe};

/// Number of records plotted by [`trend_points`].
pub const TREND_WINDOW: usize = 7;

/// Count records per vibe. All seven vibes are present, zero included.
pub fn vibe_counts(records: &[HistoryRecord]) -> BTreeMap<Vibe, usize> {
    let mut counts: BTreeMap<Vibe, usize> = Vibe::ALL.into_iter().map(|v| (v, 0)).collect();
    for vibe in records.iter().filter_map(|r| r.vibe) {
        *counts.entry(vibe).or_default() += 1;
    }
    counts
}

/// Direction of the two most recent check-ins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Fewer than two records.
    Stable,
    Same,
    Improving,
    Declining,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "Stable",
            Self::Same => "Same as yesterday",
            Self::Improving => "Improving vibe",
            Self::Declining => "Declining vibe",
        }
    }
}

/// Compare the most recent record against the one before it.
///
/// This is a two-point comparison on purpose: no window, no smoothing. Only
/// identical vibes are [`Trend::Same`]; otherwise a record ranked no higher
/// than its predecessor counts as declining. A missing vibe ranks with
/// `Thoughtful / Uncertain`.
pub fn vibe_trend(records: &[HistoryRecord]) -> Trend {
    let [latest, previous, ..] = records else {
        return Trend::Stable;
    };

    if latest.vibe == previous.vibe {
        Trend::Same
    } else if trend_rank(latest.vibe) > trend_rank(previous.vibe) {
        Trend::Improving
    } else {
        Trend::Declining
    }
}

fn trend_rank(vibe: Option<Vibe>) -> u8 {
    vibe.unwrap_or(Vibe::Thoughtful).score()
}

/// Records without a vibe sit in the middle of the graph.
fn graph_score(vibe: Option<Vibe>) -> u8 {
    vibe.unwrap_or(Vibe::Neutral).score()
}

/// One plotted point of the trend graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    /// 1 (most negative) to 7 (most positive).
    pub score: u8,
    pub timestamp: DateTime<Utc>,
}

/// The most recent [`TREND_WINDOW`] records as graph points, oldest first.
pub fn trend_points(records: &[HistoryRecord]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .take(TREND_WINDOW)
        .map(|r| TrendPoint {
            score: graph_score(r.vibe),
            timestamp: r.timestamp,
        })
        .collect();
    points.reverse();
    points
}

/// A month laid out for a calendar grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a week starting on Sunday.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub vibe: Option<Vibe>,
}

impl CalendarDay {
    /// The vibe glyph, or the bare day number when nothing was recorded.
    pub fn display(&self) -> String {
        match self.vibe {
            Some(vibe) => vibe.glyph().to_string(),
            None => self.day.to_string(),
        }
    }
}

/// Bin records into the days of `year`/`month` as seen in `tz`.
///
/// Each day keeps one vibe: whichever matching record is scanned last.
/// Returns `None` for an invalid month.
pub fn calendar_month<Tz: TimeZone>(
    records: &[HistoryRecord],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let total_days = (next - first).num_days() as u32;

    let mut days: Vec<CalendarDay> = (1..=total_days)
        .map(|day| CalendarDay { day, vibe: None })
        .collect();

    for record in records {
        let date = record.timestamp.with_timezone(tz).date_naive();
        if date.year() == year && date.month() == month {
            days[(date.day() - 1) as usize].vibe = record.vibe;
        }
    }

    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
