//! Cooldown durations as written in the pricing document.
//!
//! Accepted forms:
//! * an integer, read as seconds (`86400`);
//! * a string of `<n><unit>` groups with unit `s`, `m`, `h`, `d` or `w`
//!   (`"24h"`, `"1h30m"`), optionally prefixed with `-`.
//!
//! Negative values parse. The validator rejects them, so they get reported
//! together with every other violation.

use chrono::Duration;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Seconds(i64),
    Text(String),
}

impl From<Duration> for RawDuration {
    fn from(value: Duration) -> Self {
        RawDuration::Seconds(value.num_seconds())
    }
}

impl RawDuration {
    pub fn to_duration(&self) -> Result<Duration, String> {
        match self {
            RawDuration::Seconds(secs) => Duration::try_seconds(*secs)
                .ok_or_else(|| format!("{secs} seconds is out of range")),
            RawDuration::Text(text) => parse_duration(text),
        }
    }
}

fn unit_seconds(unit: char) -> Option<i64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(60 * 60),
        'd' => Some(24 * 60 * 60),
        'w' => Some(7 * 24 * 60 * 60),
        _ => None,
    }
}

/// Parses `"24h"`, `"1h30m"`, `"-2d"` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if body.is_empty() {
        return Err(format!("empty duration: '{s}'"));
    }
    if !body.starts_with(|ch: char| ch.is_ascii_digit()) {
        return Err(format!("duration '{s}' must start with a number"));
    }

    if let Ok(secs) = body.parse::<i64>() {
        return signed(secs, negative, s);
    }

    let mut total: i64 = 0;
    let mut digits = String::new();

    for ch in body.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let factor = unit_seconds(ch).ok_or_else(|| format!("unknown unit '{ch}' in '{s}'"))?;
        if digits.is_empty() {
            return Err(format!("unit '{ch}' without a number in '{s}'"));
        }
        let amount: i64 = digits
            .parse()
            .map_err(|e| format!("invalid number in '{s}': {e}"))?;
        total = amount
            .checked_mul(factor)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| format!("duration '{s}' is out of range"))?;
        digits.clear();
    }

    if !digits.is_empty() {
        return Err(format!("trailing number without unit in '{s}'"));
    }

    signed(total, negative, s)
}

fn signed(secs: i64, negative: bool, original: &str) -> Result<Duration, String> {
    let secs = if negative { secs.checked_neg() } else { Some(secs) };
    secs.and_then(Duration::try_seconds)
        .ok_or_else(|| format!("duration '{original}' is out of range"))
}
