//! ISO 8601 duration parsing and `HH:MM:SS` clock formatting.
//!
//! The provider reports video length as a designator string such as
//! `PT1H2M3S`, `PT45S` or `P1DT2H`. Live streams report `P0D`.
//!
//! Supported grammar: `P[nW][nD][T[nH][nM][nS]]` where every `n` may carry a
//! fractional part (`.` or `,`). Calendar designators (years, months) have
//! no fixed length in seconds and are rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;

/// Fractional digits kept per component; finer digits are dropped.
const FRACTION_DIGITS: usize = 18;
const FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(?:([0-9]+(?:[.,][0-9]+)?)W)?(?:([0-9]+(?:[.,][0-9]+)?)D)?(?:T(?:([0-9]+(?:[.,][0-9]+)?)H)?(?:([0-9]+(?:[.,][0-9]+)?)M)?(?:([0-9]+(?:[.,][0-9]+)?)S)?)?$",
    )
    .expect("duration pattern is valid")
});

/// Duration parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Unable to parse duration string {0:?}")]
    Invalid(String),

    #[error("Duration {0:?} is too large")]
    Overflow(String),
}

/// Parse a duration designator string into whole elapsed seconds.
///
/// Components are summed exactly in fixed point; sub-second fractions of the
/// total are truncated.
pub fn parse_duration(input: &str) -> Result<u64, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let caps = DURATION_RE.captures(input).ok_or_else(invalid)?;

    // "P" and "PT" match the pattern with every component absent.
    if caps.iter().skip(1).all(|c| c.is_none()) || input.ends_with('T') {
        return Err(invalid());
    }

    let units = [SECS_PER_WEEK, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE, 1];
    let mut total: u128 = 0;
    for (idx, unit) in units.into_iter().enumerate() {
        if let Some(m) = caps.get(idx + 1) {
            let scaled = scaled_seconds(m.as_str(), unit).ok_or_else(overflow)?;
            total = total.checked_add(scaled).ok_or_else(overflow)?;
        }
    }

    u64::try_from(total / FRACTION_SCALE).map_err(|_| overflow())
}

/// Seconds in `value` units of `unit`, scaled by [`FRACTION_SCALE`].
///
/// `value` is digits with an optional `.`/`,` fraction. `None` on overflow.
fn scaled_seconds(value: &str, unit: u64) -> Option<u128> {
    let (whole, fraction) = value
        .split_once(|c: char| c == '.' || c == ',')
        .unwrap_or((value, ""));
    let fraction = &fraction[..fraction.len().min(FRACTION_DIGITS)];

    let whole: u128 = whole.parse().ok()?;
    let fraction: u128 = format!("{fraction:0<FRACTION_DIGITS$}").parse().ok()?;

    whole
        .checked_mul(FRACTION_SCALE)?
        .checked_add(fraction)?
        .checked_mul(u128::from(unit))
}

/// Format a second count as zero-padded `HH:MM:SS`.
///
/// Hours are at least two digits wide and grow past 99 without capping.
#[must_use]
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / SECS_PER_HOUR;
    let minutes = (total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_seconds % SECS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Convert a duration designator string straight to `HH:MM:SS`.
pub fn format_duration(input: &str) -> Result<String, DurationError> {
    parse_duration(input).map(format_clock)
}
