//! Grid arithmetic on instants.
//!
//! A non-positive resolution is a no-op rather than an error: configuration derivation
//! calls these with resolutions it has not validated yet.

use crate::foundation::core::Instant;

/// Largest multiple of `resolution` that is `<= instant`.
///
/// Uses Euclidean remainder, so instants before the epoch floor downwards too.
pub fn floor_to_resolution(instant: Instant, resolution: i64) -> Instant {
    if resolution <= 0 {
        return instant;
    }
    let rem = instant.0.rem_euclid(resolution);
    Instant(instant.0.saturating_sub(rem))
}

/// Smallest multiple of `resolution` that is `>= instant`.
pub fn ceil_to_resolution(instant: Instant, resolution: i64) -> Instant {
    if resolution <= 0 {
        return instant;
    }
    let rem = instant.0.rem_euclid(resolution);
    if rem == 0 {
        instant
    } else {
        Instant(instant.0.saturating_add(resolution - rem))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
