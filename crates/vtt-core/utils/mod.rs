//! Utility functions and shared types for VTT-RS core
//!
//! Contains the crate-wide error type and the WebVTT timestamp helpers used
//! by both the cue header scanner and the serializer.

pub mod errors;

pub use errors::CoreError;

/// Microseconds per millisecond
const US_PER_MS: i64 = 1_000;

/// Microseconds per second
const US_PER_SECOND: i64 = 1_000_000;

/// Microseconds per minute
const US_PER_MINUTE: i64 = 60 * US_PER_SECOND;

/// Microseconds per hour
const US_PER_HOUR: i64 = 60 * US_PER_MINUTE;

/// Parse a WebVTT timestamp (`[[HH:]MM:]SS.mmm`) to microseconds
///
/// Colon-separated components accumulate as `value * 60 + part`, so both
/// `MM:SS.mmm` and `HH:MM:SS.mmm` are accepted, as is a bare `SS.mmm`. The
/// fraction after the dot is read as a whole number of milliseconds.
///
/// # Example
///
/// ```rust
/// # use vtt_core::utils::parse_timestamp_us;
/// assert_eq!(parse_timestamp_us("00:01.500")?, 1_500_000);
/// assert_eq!(parse_timestamp_us("01:00:00.000")?, 3_600_000_000);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] if any component is empty, contains
/// anything but ASCII digits, or the value overflows.
pub fn parse_timestamp_us(timestamp: &str) -> Result<i64, CoreError> {
    let (clock, fraction) = match timestamp.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (timestamp, None),
    };

    let mut value: i64 = 0;
    for part in clock.split(':') {
        let part = parse_component(timestamp, part)?;
        value = value
            .checked_mul(60)
            .and_then(|v| v.checked_add(part))
            .ok_or_else(|| CoreError::invalid_time(timestamp, "value out of range"))?;
    }

    value = value
        .checked_mul(1_000)
        .ok_or_else(|| CoreError::invalid_time(timestamp, "value out of range"))?;
    if let Some(fraction) = fraction {
        value = value
            .checked_add(parse_component(timestamp, fraction)?)
            .ok_or_else(|| CoreError::invalid_time(timestamp, "value out of range"))?;
    }

    value
        .checked_mul(US_PER_MS)
        .ok_or_else(|| CoreError::invalid_time(timestamp, "value out of range"))
}

fn parse_component(timestamp: &str, part: &str) -> Result<i64, CoreError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::invalid_time(timestamp, "non-numeric component"));
    }
    part.parse()
        .map_err(|_| CoreError::invalid_time(timestamp, "value out of range"))
}

/// Format microseconds as the canonical `HHH:MM:SS.mmm` timestamp
///
/// Hours are zero-padded to at least three digits and never wrap at 24.
/// Sub-millisecond precision is truncated. Negative input formats as zero.
#[must_use]
pub fn format_timestamp_us(time_us: i64) -> String {
    let time_us = time_us.max(0);
    let hours = time_us / US_PER_HOUR;
    let minutes = (time_us % US_PER_HOUR) / US_PER_MINUTE;
    let seconds = (time_us % US_PER_MINUTE) / US_PER_SECOND;
    let millis = (time_us % US_PER_SECOND) / US_PER_MS;

    format!("{hours:03}:{minutes:02}:{seconds:02}.{millis:03}")
}
