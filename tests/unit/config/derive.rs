use super::*;
use crate::capabilities::model::{CapabilitiesDocument, CapabilityLayer};
use serde_json::json;

const MIN: i64 = 60_000;
const HOUR: i64 = 3_600_000;
const T0: i64 = 1_577_836_800_000; // 2020-01-01T00:00:00Z

fn config(v: serde_json::Value) -> AnimationConfig {
    serde_json::from_value(v).unwrap()
}

fn store() -> CapabilityStore {
    CapabilityStore::new(vec![CapabilitiesDocument {
        url: "https://a.example/wms".into(),
        layers: vec![
            CapabilityLayer {
                name: "radar".into(),
                time_values: vec!["2019-12-31T21:00:00Z/2020-01-01T00:25:00Z/PT5M".into()],
            },
            CapabilityLayer {
                name: "nowcast".into(),
                time_values: vec!["2020-01-01T00:30:00Z/2020-01-01T03:00:00Z/PT15M".into()],
            },
            CapabilityLayer {
                name: "untimed".into(),
                time_values: Vec::new(),
            },
        ],
    }])
}

fn radar_config() -> AnimationConfig {
    config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToBeginTime": 3 * HOUR,
        "animationDeltaToEndTime": 6 * HOUR,
        "layers": [{
            "name": "radar",
            "capabilities": { "url": "https://a.example/wms", "layer": "radar" },
            "animation": {
                "beginTime": "auto",
                "endTime": "auto",
                "resolutionTime": 5 * MIN,
                "layers": [
                    { "layer": "nowcast", "beginTime": "join", "resolutionTime": 15 * MIN, "isForecast": true }
                ]
            }
        }]
    }))
}

fn derive(cfg: &AnimationConfig, now: i64) -> TimestepResult<AnimationSetup> {
    AnimationRangeDeriver::new(cfg, &store()).derive(Instant(now))
}

#[test]
fn derives_range_with_capability_substitution() {
    let cfg = radar_config();
    let setup = derive(&cfg, T0 + 30 * MIN).unwrap();

    let r = setup.range;
    assert_eq!(r.resolution.millis(), HOUR);
    assert_eq!(r.begin_date, Instant(T0 - 3 * HOUR));
    assert_eq!(r.end_date, Instant(T0 + 7 * HOUR));
    assert_eq!(r.forecast_begin_date, Instant(T0 + 30 * MIN));
    assert_eq!(r.observation_end_date, Instant(T0 - 30 * MIN));

    let radar = &setup.layers[0];
    assert_eq!(radar.time.begin_literal(), Some(Instant(T0 - 3 * HOUR)));
    assert_eq!(radar.time.end_literal(), Some(Instant(T0 + 25 * MIN)));
    assert!(radar.availability.is_some());

    let nowcast = &radar.sub_layers[0];
    assert_eq!(nowcast.time.begin_literal(), Some(Instant(T0 + 30 * MIN)));
    assert_eq!(nowcast.display_name("radar"), "radar_nowcast");

    // Input configuration is left as written.
    let anim = cfg.layers[0].animation.as_ref().unwrap();
    assert_eq!(anim.time.begin_time, Some(TimeValue::Auto));
    assert_eq!(anim.layers[0].time.begin_time, Some(TimeValue::Join));
}

#[test]
fn join_lands_strictly_after_parent_end() {
    // Parent ends exactly on the sub-layer grid: the joined begin moves one step on.
    let mut cfg = radar_config();
    let anim = cfg.layers[0].animation.as_mut().unwrap();
    anim.layers[0].time.resolution_time =
        Some(ResolutionValue::Literal(Resolution::new(5 * MIN).unwrap()));

    let setup = derive(&cfg, T0).unwrap();
    let parent_end = Instant(T0 + 25 * MIN);
    let joined = setup.layers[0].sub_layers[0].time.begin_literal().unwrap();
    assert!(joined > parent_end);
    assert_eq!(joined, Instant(T0 + 30 * MIN));
}

#[test]
fn zero_begin_delta_ceils_above_now() {
    let mut cfg = radar_config();
    cfg.animation_delta_to_begin_time = Some(0);
    let now = T0 + 30 * MIN;
    let setup = derive(&cfg, now).unwrap();
    assert_eq!(setup.range.begin_date, Instant(T0 + HOUR));
    assert!(setup.range.begin_date.0 >= now);
}

#[test]
fn non_positive_end_delta_collapses_forecast() {
    // Zero floors, any other delta ceils.
    for (delta, end) in [(0, T0), (-HOUR, T0), (-2 * HOUR - 1, T0 - HOUR)] {
        let mut cfg = radar_config();
        cfg.animation_delta_to_end_time = Some(delta);
        let r = derive(&cfg, T0 + 30 * MIN).unwrap().range;
        assert_eq!(r.end_date, Instant(end));
        assert_eq!(r.forecast_begin_date, r.end_date);
        assert_eq!(r.observation_end_date, Instant(end - HOUR));
    }
}

#[test]
fn literal_layer_bounds_drive_range_without_deltas() {
    let cfg = config(json!({
        "animationResolutionTime": HOUR,
        "layers": [
            { "name": "a", "animation": { "beginTime": T0 + 10 * MIN, "endTime": T0 + 2 * HOUR + 1 } },
            { "name": "b", "animation": { "beginTime": "2019-12-31T22:30:00Z", "endTime": T0 } },
            { "name": "still" }
        ]
    }));
    let r = derive(&cfg, T0 + 5 * HOUR).unwrap().range;
    assert_eq!(r.begin_date, Instant(T0 - 2 * HOUR));
    assert_eq!(r.end_date, Instant(T0 + 3 * HOUR));
    // No forecast layers: forecast begins at the next step after now.
    assert_eq!(r.forecast_begin_date, Instant(T0 + 5 * HOUR));
}

#[test]
fn forecast_layer_without_begin_uses_global_begin() {
    let cfg = config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToBeginTime": 2 * HOUR,
        "animationDeltaToEndTime": 2 * HOUR,
        "layers": [{ "name": "model", "animation": { "isForecast": true } }]
    }));
    let r = derive(&cfg, T0).unwrap().range;
    assert_eq!(r.begin_date, Instant(T0 - 2 * HOUR));
    assert_eq!(r.forecast_begin_date, r.begin_date);
}

#[test]
fn resolution_falls_back_to_largest_layer_resolution() {
    let cfg = config(json!({
        "animationDeltaToBeginTime": HOUR,
        "animationDeltaToEndTime": HOUR,
        "layers": [
            { "name": "a", "animation": { "resolutionTime": 10 * MIN } },
            {
                "name": "b",
                "capabilities": { "url": "https://a.example/wms", "layer": "nowcast" },
                "animation": { "resolutionTime": "auto" }
            }
        ]
    }));
    let setup = derive(&cfg, T0).unwrap();
    assert_eq!(setup.range.resolution.millis(), 15 * MIN);
    assert_eq!(setup.layers[1].time.resolution().map(Resolution::millis), Some(15 * MIN));

    let cfg = config(json!({
        "animationResolutionTime": 0,
        "animationDeltaToBeginTime": HOUR,
        "animationDeltaToEndTime": HOUR,
        "layers": [{ "name": "a", "animation": { "resolutionTime": 20 * MIN } }]
    }));
    assert_eq!(derive(&cfg, T0).unwrap().range.resolution.millis(), 20 * MIN);
}

#[test]
fn missing_inputs_are_reported() {
    let no_res = config(json!({
        "animationDeltaToBeginTime": HOUR,
        "layers": [{ "name": "a", "animation": {} }]
    }));
    assert!(matches!(derive(&no_res, T0), Err(TimestepError::MissingResolution)));

    let no_begin = config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToEndTime": HOUR,
        "layers": [{ "name": "a", "animation": { "beginTime": "auto" } }]
    }));
    assert!(matches!(derive(&no_begin, T0), Err(TimestepError::MissingBeginDate)));

    let no_end = config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToBeginTime": HOUR,
        "layers": [{ "name": "a", "animation": { "beginTime": T0 } }]
    }));
    assert!(matches!(derive(&no_end, T0), Err(TimestepError::MissingEndDate)));
}

#[test]
fn join_without_parent_capabilities_fails() {
    let cfg = config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToBeginTime": HOUR,
        "animationDeltaToEndTime": HOUR,
        "layers": [{
            "name": "a",
            "capabilities": { "url": "https://a.example/wms", "layer": "untimed" },
            "animation": { "layers": [{ "layer": "nowcast", "beginTime": "join" }] }
        }]
    }));
    let err = derive(&cfg, T0).unwrap_err();
    assert!(matches!(err, TimestepError::MissingCapabilityTime(_)));
}

#[test]
fn auto_without_capability_data_stays_unresolved() {
    let cfg = config(json!({
        "animationResolutionTime": HOUR,
        "animationDeltaToBeginTime": HOUR,
        "animationDeltaToEndTime": HOUR,
        "layers": [{
            "name": "a",
            "capabilities": { "url": "https://a.example/wms", "layer": "gone" },
            "animation": { "beginTime": "auto", "endTime": "auto", "isForecast": true }
        }]
    }));
    let setup = derive(&cfg, T0 + 1).unwrap();
    assert_eq!(setup.layers[0].time.begin_time, Some(TimeValue::Auto));
    assert!(setup.layers[0].availability.is_none());
    assert_eq!(setup.range.forecast_begin_date, Instant(T0 + HOUR));
}
