//! iCalendar (RFC 5545) export of segmented itineraries.

use crate::segment::DaySegment;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::fmt::Display;

const PRODID: &str = "-//trip-planner//itinerary export//EN";
const MAX_LINE_OCTETS: usize = 75;

/// A single all-day event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub date: NaiveDate,
    pub description: String,
}

impl CalendarEvent {
    pub fn from_segment(destination: &str, segment: &DaySegment) -> Self {
        let summary = match segment.day_number {
            Some(day) => format!("{destination} - Day {day}"),
            None => format!("{destination} - Trip plan"),
        };
        Self {
            summary,
            date: segment.date,
            description: segment.content.clone(),
        }
    }
}

impl Display for CalendarEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "   📅 All-day event on {}", self.date)?;
        if !self.description.is_empty() {
            writeln!(f, "   📝 {}", self.description.replace('\n', " / "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct IcsCalendar {
    events: Vec<CalendarEvent>,
}

impl IcsCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(destination: &str, segments: &[DaySegment]) -> Self {
        Self {
            events: segments
                .iter()
                .map(|segment| CalendarEvent::from_segment(destination, segment))
                .collect(),
        }
    }

    pub fn push_event(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Serializes the calendar. `generated_at` becomes every event's DTSTAMP.
    pub fn to_ics(&self, generated_at: DateTime<Utc>) -> String {
        let stamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::new();
        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{PRODID}"));
        push_line(&mut out, "CALSCALE:GREGORIAN");
        for (index, event) in self.events.iter().enumerate() {
            let start = event.date.format("%Y%m%d");
            // DTEND is exclusive for DATE values
            let end = event
                .date
                .checked_add_days(Days::new(1))
                .unwrap_or(event.date)
                .format("%Y%m%d");
            push_line(&mut out, "BEGIN:VEVENT");
            push_line(&mut out, &format!("UID:{start}-{index}@trip-planner"));
            push_line(&mut out, &format!("DTSTAMP:{stamp}"));
            push_line(&mut out, &format!("DTSTART;VALUE=DATE:{start}"));
            push_line(&mut out, &format!("DTEND;VALUE=DATE:{end}"));
            push_line(&mut out, &format!("SUMMARY:{}", escape_text(&event.summary)));
            push_line(
                &mut out,
                &format!("DESCRIPTION:{}", escape_text(&event.description)),
            );
            push_line(&mut out, "END:VEVENT");
        }
        push_line(&mut out, "END:VCALENDAR");
        out
    }
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Appends a content line, folded at 75 octets without splitting a character.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}
