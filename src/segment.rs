//! Best-effort recovery of per-day records from free-form itinerary text.
//!
//! Works on any text, generated or not. Prefer [`crate::itinerary::Itinerary`]
//! when the day records are available directly.

use crate::itinerary::Day;
use chrono::{NaiveDate, TimeDelta};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `Day <n>` followed by a colon or whitespace, allowing a closing `**`
/// between the two as in `**Day 1**:`
static DAY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern, compilation cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"\bDay (\d+)\**[:\s]").expect("day marker regex")
});

/// One segment of itinerary text anchored to a calendar date.
///
/// `day_number` is `None` only for the fallback entry produced when the text
/// has no day markers at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySegment {
    pub day_number: Option<u32>,
    pub date: NaiveDate,
    pub content: String,
}

struct Marker {
    day_number: u32,
    date: NaiveDate,
    start: usize,
    content_start: usize,
}

/// Splits `text` at day markers, in source order.
///
/// Day N is dated `start_date + (N - 1)` whatever its position in the text.
/// Duplicate day numbers are kept as separate segments. Text before the first
/// marker is dropped. Never fails: without markers the whole text becomes a
/// single undated-by-number segment on `start_date`.
pub fn segment_into_days(text: &str, start_date: NaiveDate) -> Vec<DaySegment> {
    let markers: Vec<Marker> = DAY_MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            // Numbers that overflow, or land outside chrono's range, are plain text.
            let day_number: u32 = caps[1].parse().ok()?;
            let date = date_for_day(start_date, day_number)?;
            Some(Marker {
                day_number,
                date,
                start: whole.start(),
                content_start: whole.end(),
            })
        })
        .collect();

    if markers.is_empty() {
        return vec![DaySegment {
            day_number: None,
            date: start_date,
            content: text.to_string(),
        }];
    }

    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
            DaySegment {
                day_number: Some(marker.day_number),
                date: marker.date,
                content: clean_content(&text[marker.content_start..end]).to_string(),
            }
        })
        .collect()
}

/// Dates day records that are already structured, skipping text parsing.
/// Days whose date cannot be represented are left out.
pub fn segments_from_days(days: &[Day], start_date: NaiveDate) -> Vec<DaySegment> {
    days.iter()
        .filter_map(|day| {
            Some(DaySegment {
                day_number: Some(day.day_number),
                date: date_for_day(start_date, day.day_number)?,
                content: day.content.clone(),
            })
        })
        .collect()
}

fn date_for_day(start_date: NaiveDate, day_number: u32) -> Option<NaiveDate> {
    let offset = TimeDelta::try_days(i64::from(day_number) - 1)?;
    start_date.checked_add_signed(offset)
}

/// Strips whitespace and markdown emphasis/heading marks left around a segment
/// (e.g. the `**` of `**Day 1:**`), plus the colon of a spaced `Day 1 : ...`.
fn clean_content(raw: &str) -> &str {
    let is_markup = |c: char| c.is_whitespace() || c == '*' || c == '#';
    raw.trim_start_matches(|c: char| is_markup(c) || c == ':')
        .trim_end_matches(is_markup)
}
