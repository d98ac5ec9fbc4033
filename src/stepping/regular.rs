use crate::{
    foundation::core::{Instant, Resolution},
    stepping::stepper::Direction,
};

/// Unbounded grid `anchor + k * resolution` for every integer `k`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegularStepper {
    anchor: Instant,
    resolution: Resolution,
}

impl RegularStepper {
    pub fn new(anchor: Instant, resolution: Resolution) -> Self {
        Self { anchor, resolution }
    }

    pub fn anchor(&self) -> Instant {
        self.anchor
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Snap `d` onto the grid in direction `dir`.
    ///
    /// An instant already on the grid is returned unchanged when `allow_current` is set;
    /// otherwise the result moves one full step away from it.
    pub fn align_to_grid(&self, d: Instant, dir: Direction, allow_current: bool) -> Instant {
        let step = self.resolution.millis();
        let diff = i128::from(d.0) - i128::from(self.anchor.0);
        let rem = diff.rem_euclid(i128::from(step)) as i64;

        if rem == 0 {
            if allow_current {
                return d;
            }
            return match dir {
                Direction::Backward => Instant(d.0.saturating_sub(step)),
                Direction::Forward => Instant(d.0.saturating_add(step)),
            };
        }

        let previous = d.0.saturating_sub(rem);
        match dir {
            Direction::Backward => Instant(previous),
            Direction::Forward => Instant(previous.saturating_add(step)),
        }
    }

    pub(crate) fn previous_available(&self, d: Instant) -> Instant {
        self.align_to_grid(d, Direction::Backward, true)
    }

    pub(crate) fn next_available(&self, d: Instant) -> Instant {
        self.align_to_grid(d, Direction::Forward, true)
    }

    pub(crate) fn previous_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        let last = self.align_to_grid(d, Direction::Backward, false);
        let mut out = self.walk(last, n, Direction::Backward);
        out.reverse();
        out
    }

    pub(crate) fn next_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        let first = self.align_to_grid(d, Direction::Forward, false);
        self.walk(first, n, Direction::Forward)
    }

    pub(crate) fn times_for_interval(&self, start: Instant, end: Instant) -> Vec<Instant> {
        if end < start {
            return Vec::new();
        }
        let first = self.align_to_grid(start, Direction::Forward, true);
        let last = self.align_to_grid(end, Direction::Backward, true);
        if first > last {
            return Vec::new();
        }
        let count = last.0.saturating_sub(first.0) / self.resolution.millis() + 1;
        self.walk(first, count as usize, Direction::Forward)
    }

    fn walk(&self, from: Instant, n: usize, dir: Direction) -> Vec<Instant> {
        let step = match dir {
            Direction::Backward => -self.resolution.millis(),
            Direction::Forward => self.resolution.millis(),
        };
        (0..n)
            .map(|k| Instant(from.0.saturating_add(step.saturating_mul(k as i64))))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stepping/regular.rs"]
mod tests;
