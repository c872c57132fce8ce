// Free-text duration parsing and clock formatting

use crate::error::{Result, WaypostError};
use regex::Regex;
use std::sync::OnceLock;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Longest duration a single stay or leg can contribute, one week.
pub const MAX_DURATION_MINUTES: u32 = 7 * MINUTES_PER_DAY;

fn hour_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:个小时|小时|hours|hour|hrs|hr|h)")
            .expect("hour pattern is valid")
    })
}

fn minute_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(?:分钟|分|minutes|minute|mins|min|m)")
            .expect("minute pattern is valid")
    })
}

/// A unit must not run into more letters, so "3 months" is not 3 minutes.
fn unit_ends_word(text: &str, end: usize) -> bool {
    !text[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

fn clamp_minutes(minutes: f64) -> u32 {
    minutes.round().min(f64::from(MAX_DURATION_MINUTES)) as u32
}

/// Parse text like "1.5小时", "40分钟", "1 hour 30 minutes" or "25" into
/// minutes. Hour and minute parts add up; a bare integer counts as minutes.
/// Anything unrecognised is zero, and results are capped at
/// [`MAX_DURATION_MINUTES`].
pub fn parse_duration(text: &str) -> u32 {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }

    let mut matched = false;
    let mut total = 0.0_f64;

    for caps in hour_pattern().captures_iter(text) {
        if !unit_ends_word(text, caps.get(0).map_or(0, |m| m.end())) {
            continue;
        }
        if let Ok(hours) = caps[1].parse::<f64>() {
            total += hours * 60.0;
            matched = true;
        }
    }

    for caps in minute_pattern().captures_iter(text) {
        // A decimal hour like "1.5h" must not leak its fraction digits here
        let start = caps.get(1).map_or(0, |m| m.start());
        if text[..start].ends_with('.') {
            continue;
        }
        if !unit_ends_word(text, caps.get(0).map_or(0, |m| m.end())) {
            continue;
        }
        if let Ok(minutes) = caps[1].parse::<f64>() {
            total += minutes;
            matched = true;
        }
    }

    if matched {
        return clamp_minutes(total);
    }

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    text.parse::<f64>().map_or(0, clamp_minutes)
}

/// Render minutes since midnight as `HH:MM`, wrapping past midnight.
pub fn format_clock(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Parse `HH:MM` (or `H:MM`) into minutes since midnight.
pub fn parse_clock(text: &str) -> Result<u32> {
    let invalid = || WaypostError::InvalidClock(text.to_string());
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Render a span as "3h" or "3h 20m"; spans under an hour read "0h 45m".
pub fn format_span(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rest)
    }
}
