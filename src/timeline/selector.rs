use crate::{
    foundation::core::{Instant, Resolution},
    stepping::stepper::{Direction, TimeStepper},
};

/// Picks the frame a layer shows at an animation instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSelector {
    pub direction: Direction,
    /// A selected instant at least this far from the animation instant is discarded.
    pub max_offset: Resolution,
}

impl FrameSelector {
    /// Observation layers show the latest frame at or before `t`.
    pub fn observation(max_offset: Resolution) -> Self {
        Self {
            direction: Direction::Backward,
            max_offset,
        }
    }

    /// Forecast layers show the first frame at or after `t`.
    pub fn forecast(max_offset: Resolution) -> Self {
        Self {
            direction: Direction::Forward,
            max_offset,
        }
    }

    pub fn select(&self, stepper: &TimeStepper, t: Instant) -> Option<Instant> {
        let selected = match self.direction {
            Direction::Backward => stepper.previous_available(t, false),
            Direction::Forward => stepper.next_available(t, false),
        }?;
        let offset = (i128::from(selected.0) - i128::from(t.0)).abs();
        (offset < i128::from(self.max_offset.millis())).then_some(selected)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/selector.rs"]
mod tests;
