//! Parsing of WMS/WMTS time-dimension extents.
//!
//! Three forms are understood:
//! - `start/end/period` intervals, where the period is `PT[nH][nM][nS]`
//! - comma-separated lists of instants
//! - a single instant

use crate::{
    foundation::{
        core::{Instant, Resolution},
        error::{TimestepError, TimestepResult},
    },
    stepping::{ops, stepper::TimeStepper},
};

/// Turn a raw time extent into a stepper.
pub fn parse_time_extent(raw: &str) -> TimestepResult<TimeStepper> {
    let raw = raw.trim();

    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3 && parts[2].trim_start().starts_with('P') {
        let start = Instant::parse_iso8601(parts[0])?;
        let end = Instant::parse_iso8601(parts[1])?;
        let resolution = parse_period(parts[2].trim())?;
        return Ok(ops::restricted_regular(start, Some(end), resolution));
    }

    if raw.contains(',') {
        let times = raw
            .split(',')
            .map(Instant::parse_iso8601)
            .collect::<TimestepResult<Vec<_>>>()?;
        return ops::list(times);
    }

    ops::list(vec![Instant::parse_iso8601(raw)?])
}

/// Parse an ISO-8601 duration restricted to `PT[nH][nM][nS]`.
///
/// Day, week, month and year components are rejected.
pub fn parse_period(raw: &str) -> TimestepResult<Resolution> {
    let unsupported = || {
        TimestepError::malformed(format!(
            "unsupported period '{raw}' (expected PT[nH][nM][nS])"
        ))
    };

    let body = raw.strip_prefix("PT").ok_or_else(unsupported)?;
    let bytes = body.as_bytes();
    if bytes.is_empty() {
        return Err(unsupported());
    }

    let mut i = 0usize;
    // Units must appear in H, M, S order, each at most once.
    let mut next_unit = 0usize;
    let mut components = [0i64; 3];

    while i < bytes.len() {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start || i >= bytes.len() {
            return Err(unsupported());
        }
        let value: i64 = body[start..i].parse().map_err(|_| unsupported())?;

        let unit = match bytes[i] {
            b'H' => 0,
            b'M' => 1,
            b'S' => 2,
            _ => return Err(unsupported()),
        };
        if unit < next_unit {
            return Err(unsupported());
        }
        components[unit] = value;
        next_unit = unit + 1;
        i += 1;
    }

    let [h, m, s] = components;
    Resolution::from_hms(h, m, s).map_err(|_| unsupported())
}

#[cfg(test)]
#[path = "../../tests/unit/capabilities/extent.rs"]
mod tests;
