//! Duration literals used in timeout configuration
//!
//! Defaults are written in the canonical form the host has always stored
//! (`5m0s`, `1h0m0s`, `1.5s`), so existing state does not show a diff.

use humantime::DurationError;
use std::time::Duration;

/// Units accepted in a literal; both micro signs are allowed.
const UNITS: &[&str] = &["ns", "us", "µs", "μs", "ms", "s", "m", "h"];

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration literal such as `10m`, `1h30m`, `5m0s`, `1.5h` or `300ms`.
///
/// Only the compact `<number><unit>` form is accepted: no whitespace, no
/// sign, and no word units like `minutes` or `days`.
pub fn parse_duration(value: &str) -> Result<Duration, DurationError> {
    check_literal(value)?;
    humantime::parse_duration(&value.replace('μ', "µ"))
}

fn check_literal(value: &str) -> Result<(), DurationError> {
    if let Some((offset, _)) = value
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '.'))
    {
        return Err(DurationError::InvalidCharacter(offset));
    }

    let mut unit_start = None;
    let end = std::iter::once((value.len(), '0'));
    for (i, c) in value.char_indices().chain(end) {
        let numeric = c.is_ascii_digit() || c == '.';
        match (unit_start, numeric) {
            (None, false) => unit_start = Some(i),
            (Some(start), true) => {
                let unit = &value[start..i];
                if !UNITS.contains(&unit) {
                    return Err(DurationError::UnknownUnit {
                        start,
                        end: i,
                        unit: unit.to_string(),
                        value: 0,
                    });
                }
                unit_start = None;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Canonical string form of a duration.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{}ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", fixed(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", fixed(nanos, NANOS_PER_MILLI));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = fixed(
        u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos()),
        NANOS_PER_SEC,
    );

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// `value / unit` with the fractional part trimmed of trailing zeros.
fn fixed(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let frac = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
