use crate::{
    foundation::core::{Instant, Resolution},
    stepping::{list::ListStepper, regular::RegularStepper, restricted::RestrictedStepper},
};

/// Search direction along the time axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Towards the past.
    Backward,
    /// Towards the future.
    Forward,
}

/// Availability model for one animated layer: which instants exist and how to move between them.
///
/// The set of variants is closed. `Restricted` wraps any stepper, including another
/// `Restricted`, and narrows it to a sub-range.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimeStepper {
    /// Explicit sorted list of instants.
    List(ListStepper),
    /// Unbounded `anchor + k * resolution` grid.
    Regular(RegularStepper),
    /// Another stepper clipped to optional lower/upper bounds.
    Restricted(RestrictedStepper),
}

impl TimeStepper {
    /// Greatest available instant `<= d`.
    ///
    /// Returns `d` itself when available. When nothing precedes `d`, `clamp = true` falls back
    /// to the earliest available instant and `clamp = false` yields `None`.
    pub fn previous_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        match self {
            Self::List(l) => l.previous_available(d, clamp),
            Self::Regular(r) => Some(r.previous_available(d)),
            Self::Restricted(r) => r.previous_available(d, clamp),
        }
    }

    /// Smallest available instant `>= d`; mirror of [`Self::previous_available`].
    pub fn next_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        match self {
            Self::List(l) => l.next_available(d, clamp),
            Self::Regular(r) => Some(r.next_available(d)),
            Self::Restricted(r) => r.next_available(d, clamp),
        }
    }

    /// Up to `n` available instants strictly before `d`, in increasing order.
    pub fn previous_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        match self {
            Self::List(l) => l.previous_times(d, n),
            Self::Regular(r) => r.previous_times(d, n),
            Self::Restricted(r) => r.previous_times(d, n),
        }
    }

    /// Up to `n` available instants after `d`, in increasing order.
    ///
    /// A list includes `d` itself when present; a grid never does.
    pub fn next_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        match self {
            Self::List(l) => l.next_times(d, n),
            Self::Regular(r) => r.next_times(d, n),
            Self::Restricted(r) => r.next_times(d, n),
        }
    }

    /// Every available instant `t` with `start <= t <= end`, in increasing order.
    pub fn times_for_interval(&self, start: Instant, end: Instant) -> Vec<Instant> {
        match self {
            Self::List(l) => l.times_for_interval(start, end),
            Self::Regular(r) => r.times_for_interval(start, end),
            Self::Restricted(r) => r.times_for_interval(start, end),
        }
    }

    /// Earliest instant of the domain, `None` when unbounded below.
    pub fn start_time(&self) -> Option<Instant> {
        match self {
            Self::List(l) => Some(l.start_time()),
            Self::Regular(_) => None,
            Self::Restricted(r) => r.start_time(),
        }
    }

    /// Latest instant of the domain, `None` when unbounded above.
    pub fn end_time(&self) -> Option<Instant> {
        match self {
            Self::List(l) => Some(l.end_time()),
            Self::Regular(_) => None,
            Self::Restricted(r) => r.end_time(),
        }
    }

    /// Whether `d` is one of the stepper's instants.
    pub fn is_available(&self, d: Instant) -> bool {
        self.previous_available(d, false) == Some(d)
    }

    /// Native grid spacing, if the stepper is (a restriction of) a regular grid.
    pub fn grid_resolution(&self) -> Option<Resolution> {
        match self {
            Self::List(_) => None,
            Self::Regular(r) => Some(r.resolution()),
            Self::Restricted(r) => r.inner().grid_resolution(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stepping/stepper.rs"]
mod tests;
