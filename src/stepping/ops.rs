use crate::{
    foundation::{
        core::{Instant, Resolution},
        error::TimestepResult,
    },
    stepping::{
        list::ListStepper, regular::RegularStepper, restricted::RestrictedStepper,
        stepper::TimeStepper,
    },
};

pub fn list(times: Vec<Instant>) -> TimestepResult<TimeStepper> {
    Ok(TimeStepper::List(ListStepper::new(times)?))
}

pub fn regular(anchor: Instant, resolution: Resolution) -> TimeStepper {
    TimeStepper::Regular(RegularStepper::new(anchor, resolution))
}

pub fn restricted(inner: TimeStepper, lower: Option<Instant>, upper: Option<Instant>) -> TimeStepper {
    TimeStepper::Restricted(RestrictedStepper::new(inner, lower, upper))
}

/// Grid anchored at `start`, clipped to `[start, end]`.
pub fn restricted_regular(start: Instant, end: Option<Instant>, resolution: Resolution) -> TimeStepper {
    TimeStepper::Restricted(RestrictedStepper::over_grid(start, end, resolution))
}

#[cfg(test)]
#[path = "../../tests/unit/stepping/ops.rs"]
mod tests;
