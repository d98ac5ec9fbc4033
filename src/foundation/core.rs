use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::foundation::error::{TimestepError, TimestepResult};
use crate::foundation::math::{ceil_to_resolution, floor_to_resolution};

/// A point in time, in milliseconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Instant(pub i64);

impl Instant {
    /// Instant from raw epoch milliseconds.
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Raw epoch milliseconds.
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Parse an ISO-8601 instant.
    ///
    /// Accepts RFC 3339 (`2020-01-01T00:00:00Z`, explicit offsets, fractional seconds),
    /// a naive `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC, and a bare `YYYY-MM-DD` date
    /// (UTC midnight).
    pub fn parse_iso8601(s: &str) -> TimestepResult<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.timestamp_millis()));
        }

        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(ndt.and_utc().timestamp_millis()));
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(ndt.and_utc().timestamp_millis()));
            }
        }

        Err(TimestepError::malformed(format!("invalid instant '{s}'")))
    }

    /// Shift by a signed number of milliseconds.
    pub fn offset(self, delta_ms: i64) -> Self {
        Self(self.0.saturating_add(delta_ms))
    }

    /// Largest multiple of `resolution` at or below this instant.
    pub fn floor_to(self, resolution: Resolution) -> Self {
        floor_to_resolution(self, resolution.millis())
    }

    /// Smallest multiple of `resolution` at or above this instant.
    pub fn ceil_to(self, resolution: Resolution) -> Self {
        ceil_to_resolution(self, resolution.millis())
    }

    /// UTC calendar view, `None` when outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }
}

/// Strictly positive grid spacing in milliseconds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Resolution(i64);

impl Resolution {
    /// Validated constructor; `ms` must be > 0.
    pub fn new(ms: i64) -> TimestepResult<Self> {
        if ms <= 0 {
            return Err(TimestepError::validation(format!(
                "resolution must be > 0 ms, was {ms}"
            )));
        }
        Ok(Self(ms))
    }

    /// Resolution from hour/minute/second components.
    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> TimestepResult<Self> {
        let secs = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .ok_or_else(|| TimestepError::validation("resolution overflows i64 milliseconds"))?;
        let ms = secs
            .checked_mul(1000)
            .ok_or_else(|| TimestepError::validation("resolution overflows i64 milliseconds"))?;
        Self::new(ms)
    }

    /// Spacing in milliseconds.
    pub const fn millis(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Resolution {
    type Error = TimestepError;

    fn try_from(ms: i64) -> TimestepResult<Self> {
        Self::new(ms)
    }
}

impl From<Resolution> for i64 {
    fn from(r: Resolution) -> Self {
        r.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
