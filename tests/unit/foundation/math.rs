use super::*;

#[test]
fn floor_and_ceil_positive() {
    assert_eq!(floor_to_resolution(Instant(125), 50), Instant(100));
    assert_eq!(ceil_to_resolution(Instant(125), 50), Instant(150));
    assert_eq!(floor_to_resolution(Instant(150), 50), Instant(150));
    assert_eq!(ceil_to_resolution(Instant(150), 50), Instant(150));
}

#[test]
fn negative_instants_use_mathematical_floor() {
    assert_eq!(floor_to_resolution(Instant(-1), 50), Instant(-50));
    assert_eq!(ceil_to_resolution(Instant(-1), 50), Instant(0));
    assert_eq!(floor_to_resolution(Instant(-100), 50), Instant(-100));
    assert_eq!(ceil_to_resolution(Instant(-101), 50), Instant(-100));
}

#[test]
fn degenerate_resolution_is_noop() {
    assert_eq!(floor_to_resolution(Instant(123), 0), Instant(123));
    assert_eq!(ceil_to_resolution(Instant(123), -10), Instant(123));
}

#[test]
fn value_equal_to_resolution_is_aligned() {
    // The value itself is one whole step.
    assert_eq!(floor_to_resolution(Instant(3_600_000), 3_600_000), Instant(3_600_000));
    assert_eq!(ceil_to_resolution(Instant(3_600_000), 3_600_000), Instant(3_600_000));
}

#[test]
fn floor_and_ceil_are_idempotent_and_bracket_input() {
    let resolutions = [1_i64, 7, 1000, 3_600_000];
    let xs = [
        -10_000_000_000_000_i64,
        -3_600_001,
        -1,
        0,
        1,
        59_999,
        1_577_836_800_123,
        10_000_000_000_000,
    ];
    for &r in &resolutions {
        for &x in &xs {
            let f = floor_to_resolution(Instant(x), r);
            let c = ceil_to_resolution(Instant(x), r);
            assert!(f.0 <= x && x <= c.0);
            assert!(c.0 - f.0 == 0 || c.0 - f.0 == r);
            assert_eq!(floor_to_resolution(f, r), f);
            assert_eq!(ceil_to_resolution(c, r), c);
        }
    }
}

#[test]
fn ceil_near_max_saturates() {
    assert_eq!(ceil_to_resolution(Instant(i64::MAX - 1), 1000), Instant(i64::MAX));
    assert_eq!(floor_to_resolution(Instant(i64::MIN), 7), Instant(i64::MIN));
}
