//! Pure parsers for the fixed-format text fields the API emits.
//!
//! The Data API encodes upload timestamps as an RFC 3339 subset
//! (`2023-05-01T12:30:45Z`, always UTC, no fractional seconds) and video
//! lengths as an ISO 8601 duration subset (`PT1H2M3S`). Both grammars are
//! rigid enough that fixed-position extraction and a single forward scan are
//! the whole parser; no general tokenizer is involved. Everything in this
//! module is a free function over value types: same input, same output, no
//! state.

use crate::error::FieldError;

/// Broken-down UTC calendar time, as parsed from an API timestamp.
///
/// Plain calendar values: the full year and a 1-based month, not the
/// epoch-relative encoding C's `tm` uses. The trailing `Z` of the source
/// token means UTC and is passed through without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    /// Full calendar year (e.g. 2023).
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u8,
    /// Day of the month, 1-31.
    pub day: u8,
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Minute of the hour, 0-59.
    pub minute: u8,
    /// Second of the minute, 0-59.
    pub second: u8,
}

/// Length of a video, split into the components the API emits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VideoDuration {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl VideoDuration {
    /// Total length in seconds.
    ///
    /// Components are folded in as-is; the API occasionally emits
    /// unnormalized values like `PT90M` for livestream archives.
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

/// Parses a `YYYY-MM-DDTHH:MM:SSZ` timestamp into a [`CalendarTime`].
///
/// The grammar is a 20-byte fixed-width token, so every field lives at a
/// known position; anything else — wrong length, a separator out of place, a
/// non-digit where a digit belongs — is rejected. Out-of-range components
/// (month 13, hour 24, ...) are rejected rather than clamped.
pub fn parse_timestamp(text: &str) -> Result<CalendarTime, FieldError> {
    let b = text.as_bytes();
    if b.len() != 20
        || b[4] != b'-'
        || b[7] != b'-'
        || b[10] != b'T'
        || b[13] != b':'
        || b[16] != b':'
        || b[19] != b'Z'
    {
        return Err(FieldError::Timestamp {
            text: text.to_string(),
        });
    }

    let field = |range: std::ops::Range<usize>| -> Result<u32, FieldError> {
        let digits = &text[range];
        if !digits.bytes().all(|c| c.is_ascii_digit()) {
            return Err(FieldError::Timestamp {
                text: text.to_string(),
            });
        }
        Ok(digits.parse().expect("an all-digit run of at most 4 bytes fits in u32"))
    };

    let time = CalendarTime {
        year: field(0..4)? as i32,
        month: field(5..7)? as u8,
        day: field(8..10)? as u8,
        hour: field(11..13)? as u8,
        minute: field(14..16)? as u8,
        second: field(17..19)? as u8,
    };

    let out_of_range = |component: &'static str| FieldError::TimestampRange {
        text: text.to_string(),
        component,
    };
    if !(1..=12).contains(&time.month) {
        return Err(out_of_range("month"));
    }
    if !(1..=31).contains(&time.day) {
        return Err(out_of_range("day"));
    }
    if time.hour > 23 {
        return Err(out_of_range("hour"));
    }
    if time.minute > 59 {
        return Err(out_of_range("minute"));
    }
    if time.second > 59 {
        return Err(out_of_range("second"));
    }

    Ok(time)
}

/// States of the duration scan.
///
/// The grammar only ever produces hours, then minutes, then seconds, each at
/// most once, so the scan is a three-state machine that moves strictly
/// forward. Committing a unit out of order (or twice) has no legal
/// transition.
enum Seeking {
    Hours,
    Minutes,
    Seconds,
    End,
}

impl Seeking {
    fn commit(self, unit: u8, value: u32, out: &mut VideoDuration) -> Option<Self> {
        match (self, unit) {
            (Seeking::Hours, b'H') => {
                out.hours = value;
                Some(Seeking::Minutes)
            }
            (Seeking::Hours | Seeking::Minutes, b'M') => {
                out.minutes = value;
                Some(Seeking::Seconds)
            }
            (Seeking::Hours | Seeking::Minutes | Seeking::Seconds, b'S') => {
                out.seconds = value;
                Some(Seeking::End)
            }
            _ => None,
        }
    }
}

/// Parses an ISO 8601 `PT#H#M#S` duration into a [`VideoDuration`].
///
/// A date portion between `P` and `T` is accepted but ignored; the API's
/// video durations never carry one with a value. After the `T` marker, a
/// single forward pass accumulates each digit run and commits it at its unit
/// letter. Missing components default to zero, so `PT5M` and even a bare
/// `PT` are valid. A trailing digit run, a unit letter with no digits, or a
/// unit out of `H`, `M`, `S` order is a parse error.
pub fn parse_duration(text: &str) -> Result<VideoDuration, FieldError> {
    let malformed = || FieldError::Duration {
        text: text.to_string(),
    };

    let b = text.as_bytes();
    if b.first() != Some(&b'P') {
        return Err(malformed());
    }
    let marker = text.find('T').ok_or_else(malformed)?;

    let mut out = VideoDuration::default();
    let mut accum: Option<u32> = None;
    let mut state = Seeking::Hours;
    for &c in &b[marker + 1..] {
        match c {
            b'0'..=b'9' => {
                let digit = u32::from(c - b'0');
                accum = Some(
                    accum
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(malformed)?,
                );
            }
            b'H' | b'M' | b'S' => {
                let value = accum.take().ok_or_else(malformed)?;
                state = state.commit(c, value, &mut out).ok_or_else(malformed)?;
            }
            _ => return Err(malformed()),
        }
    }
    if accum.is_some() {
        // A digit run with no unit letter to commit it to.
        return Err(malformed());
    }

    Ok(out)
}

/// Parses a counter the API serializes as a JSON string (`"viewCount":
/// "12345"`).
pub fn parse_count(text: &str) -> Result<u64, FieldError> {
    let malformed = || FieldError::Counter {
        text: text.to_string(),
    };
    if text.is_empty() || !text.bytes().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }
    text.parse().map_err(|_| malformed())
}
