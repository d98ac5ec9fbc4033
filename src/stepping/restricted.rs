use crate::{
    foundation::core::{Instant, Resolution},
    stepping::{regular::RegularStepper, stepper::TimeStepper},
};

/// Wraps another stepper and only answers with instants inside `[lower, upper]`.
///
/// A missing bound leaves that side open.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RestrictedStepper {
    inner: Box<TimeStepper>,
    lower: Option<Instant>,
    upper: Option<Instant>,
}

impl RestrictedStepper {
    pub fn new(inner: TimeStepper, lower: Option<Instant>, upper: Option<Instant>) -> Self {
        Self {
            inner: Box::new(inner),
            lower,
            upper,
        }
    }

    /// Restrict a regular grid anchored at `lower` with spacing `resolution`.
    pub fn over_grid(lower: Instant, upper: Option<Instant>, resolution: Resolution) -> Self {
        let grid = TimeStepper::Regular(RegularStepper::new(lower, resolution));
        Self::new(grid, Some(lower), upper)
    }

    pub fn inner(&self) -> &TimeStepper {
        &self.inner
    }

    pub fn lower(&self) -> Option<Instant> {
        self.lower
    }

    pub fn upper(&self) -> Option<Instant> {
        self.upper
    }

    pub fn within(&self, t: Instant) -> bool {
        self.lower.is_none_or(|l| t >= l) && self.upper.is_none_or(|u| t <= u)
    }

    pub(crate) fn previous_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        if clamp {
            let candidate = self.inner.previous_available(d, true);
            return self.clamped(d, candidate);
        }
        if self.within(d) {
            return self
                .inner
                .previous_available(d, false)
                .filter(|t| self.within(*t));
        }
        if self.upper.is_some_and(|u| d > u) {
            return self.previous_available(d, true);
        }
        None
    }

    pub(crate) fn next_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        if clamp {
            let candidate = self.inner.next_available(d, true);
            return self.clamped(d, candidate);
        }
        if self.within(d) {
            return self
                .inner
                .next_available(d, false)
                .filter(|t| self.within(*t));
        }
        if self.lower.is_some_and(|l| d < l) {
            return self.next_available(d, true);
        }
        None
    }

    pub(crate) fn previous_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        self.filtered(self.inner.previous_times(d, n))
    }

    pub(crate) fn next_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        self.filtered(self.inner.next_times(d, n))
    }

    pub(crate) fn times_for_interval(&self, start: Instant, end: Instant) -> Vec<Instant> {
        let start = self.lower.map_or(start, |l| start.max(l));
        let end = self.upper.map_or(end, |u| end.min(u));
        self.filtered(self.inner.times_for_interval(start, end))
    }

    pub(crate) fn start_time(&self) -> Option<Instant> {
        match (self.lower, self.inner.start_time()) {
            (Some(l), Some(s)) => Some(l.max(s)),
            (l, s) => l.or(s),
        }
    }

    pub(crate) fn end_time(&self) -> Option<Instant> {
        match (self.upper, self.inner.end_time()) {
            (Some(u), Some(e)) => Some(u.min(e)),
            (u, e) => u.or(e),
        }
    }

    /// Keep the inner answer when it lies inside the bounds, otherwise fall back to the
    /// available end nearest to `d` (ties go to the start).
    fn clamped(&self, d: Instant, candidate: Option<Instant>) -> Option<Instant> {
        if let Some(t) = candidate.filter(|t| self.within(*t)) {
            return Some(t);
        }

        let start = match self.lower {
            Some(l) => self.inner.next_available(l, true),
            None => self.inner.start_time(),
        };
        let end = match self.upper {
            Some(u) => self.inner.previous_available(u, true),
            None => self.inner.end_time(),
        };

        let distance = |t: Instant| (i128::from(t.0) - i128::from(d.0)).abs();
        let ordered = match (start, end) {
            (Some(s), Some(e)) if distance(e) < distance(s) => [Some(e), Some(s)],
            (s, e) => [s, e],
        };
        ordered.into_iter().flatten().find(|t| self.within(*t))
    }

    fn filtered(&self, times: Vec<Instant>) -> Vec<Instant> {
        times.into_iter().filter(|t| self.within(*t)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stepping/restricted.rs"]
mod tests;
