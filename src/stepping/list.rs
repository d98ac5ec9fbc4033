use crate::foundation::{
    core::Instant,
    error::{TimestepError, TimestepResult},
};

/// Stepper over an explicit, sorted, non-empty list of instants.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Instant>", into = "Vec<Instant>")]
pub struct ListStepper {
    times: Vec<Instant>, // sorted, never empty
}

impl ListStepper {
    /// Build from at least one instant. Input is sorted; duplicates are kept.
    pub fn new(mut times: Vec<Instant>) -> TimestepResult<Self> {
        if times.is_empty() {
            return Err(TimestepError::EmptyListStepper);
        }
        times.sort_unstable();
        Ok(Self { times })
    }

    pub fn times(&self) -> &[Instant] {
        &self.times
    }

    pub fn start_time(&self) -> Instant {
        self.times[0]
    }

    pub fn end_time(&self) -> Instant {
        self.times[self.times.len() - 1]
    }

    pub(crate) fn previous_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        if !clamp && d < self.start_time() {
            return None;
        }
        let idx = self.times.partition_point(|t| *t <= d);
        if idx == 0 {
            return Some(self.start_time());
        }
        Some(self.times[idx - 1])
    }

    pub(crate) fn next_available(&self, d: Instant, clamp: bool) -> Option<Instant> {
        if !clamp && d > self.end_time() {
            return None;
        }
        let idx = self.times.partition_point(|t| *t < d);
        if idx >= self.times.len() {
            return Some(self.end_time());
        }
        Some(self.times[idx])
    }

    pub(crate) fn previous_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        let idx = self.times.partition_point(|t| *t < d);
        let lo = idx.saturating_sub(n);
        self.times[lo..idx].to_vec()
    }

    pub(crate) fn next_times(&self, d: Instant, n: usize) -> Vec<Instant> {
        let idx = self.times.partition_point(|t| *t < d);
        let hi = idx.saturating_add(n).min(self.times.len());
        self.times[idx..hi].to_vec()
    }

    pub(crate) fn times_for_interval(&self, start: Instant, end: Instant) -> Vec<Instant> {
        if end < start {
            return Vec::new();
        }
        let lo = self.times.partition_point(|t| *t < start);
        let hi = self.times.partition_point(|t| *t <= end);
        self.times[lo..hi].to_vec()
    }
}

impl TryFrom<Vec<Instant>> for ListStepper {
    type Error = TimestepError;

    fn try_from(times: Vec<Instant>) -> TimestepResult<Self> {
        Self::new(times)
    }
}

impl From<ListStepper> for Vec<Instant> {
    fn from(l: ListStepper) -> Self {
        l.times
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stepping/list.rs"]
mod tests;
