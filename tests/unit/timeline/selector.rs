use super::*;
use crate::stepping::ops;

const MIN: i64 = 60_000;
const HOUR: i64 = 3_600_000;

fn hour() -> Resolution {
    Resolution::new(HOUR).unwrap()
}

#[test]
fn observation_looks_back_and_forecast_looks_ahead() {
    let grid = ops::regular(Instant(0), hour());
    let t = Instant(45 * MIN);
    assert_eq!(FrameSelector::observation(hour()).select(&grid, t), Some(Instant(0)));
    assert_eq!(FrameSelector::forecast(hour()).select(&grid, t), Some(Instant(HOUR)));
}

#[test]
fn distant_frames_are_dropped() {
    let sparse = ops::list(vec![Instant(0), Instant(5 * HOUR)]).unwrap();
    let sel = FrameSelector::observation(hour());
    assert_eq!(sel.select(&sparse, Instant(3 * HOUR)), None);
    assert_eq!(sel.select(&sparse, Instant(HOUR - 1)), Some(Instant(0)));
    // The bound is exclusive.
    assert_eq!(sel.select(&sparse, Instant(HOUR)), None);
}

#[test]
fn nothing_outside_list_range() {
    let l = ops::list(vec![Instant(0), Instant(HOUR)]).unwrap();
    assert_eq!(FrameSelector::forecast(hour()).select(&l, Instant(HOUR + 1)), None);
    assert_eq!(FrameSelector::observation(hour()).select(&l, Instant(-1)), None);
}
