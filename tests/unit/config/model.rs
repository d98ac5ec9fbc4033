use super::*;

const T0: i64 = 1_577_836_800_000; // 2020-01-01T00:00:00Z

const SAMPLE: &str = r#"{
  "animationResolutionTime": 3600000,
  "animationDeltaToBeginTime": 10800000,
  "animationFrameRate": 2,
  "layers": [
    {
      "name": "radar",
      "capabilities": { "url": "https://a.example/wms", "layer": "radar" },
      "animation": {
        "beginTime": "auto",
        "endTime": "2020-01-01T00:00:00Z",
        "resolutionTime": 300000,
        "layers": [
          { "layer": "nowcast", "beginTime": "join", "resolutionTime": "PT15M", "isForecast": true }
        ]
      }
    },
    { "name": "background" }
  ]
}"#;

#[test]
fn parses_camel_case_shape() {
    let cfg = AnimationConfig::from_json_str(SAMPLE).unwrap();
    assert_eq!(cfg.animation_resolution_time, Some(3_600_000));
    assert_eq!(cfg.animation_delta_to_begin_time, Some(10_800_000));
    assert_eq!(cfg.animation_delta_to_end_time, None);
    assert_eq!(cfg.layers.len(), 2);

    let radar = cfg.layers[0].animation.as_ref().unwrap();
    assert_eq!(radar.time.begin_time, Some(TimeValue::Auto));
    assert_eq!(radar.time.end_literal(), Some(Instant(T0)));
    assert_eq!(radar.time.resolution().map(Resolution::millis), Some(300_000));
    assert!(!radar.time.is_forecast);

    let sub = &radar.layers[0];
    assert_eq!(sub.layer, "nowcast");
    assert_eq!(sub.name, None);
    assert_eq!(sub.time.begin_time, Some(TimeValue::Join));
    assert_eq!(sub.time.resolution().map(Resolution::millis), Some(900_000));
    assert!(sub.time.is_forecast);

    assert_eq!(cfg.animated_layers().count(), 1);
    cfg.validate().unwrap();
}

#[test]
fn time_values_serialize_back() {
    let v: Vec<TimeValue> = serde_json::from_str(r#"[0, "AUTO", "join", "2020-01-01"]"#).unwrap();
    assert_eq!(
        v,
        vec![
            TimeValue::Literal(Instant(0)),
            TimeValue::Auto,
            TimeValue::Join,
            TimeValue::Literal(Instant(T0)),
        ]
    );
    assert_eq!(
        serde_json::to_string(&v).unwrap(),
        format!(r#"[0,"auto","join",{T0}]"#)
    );
}

#[test]
fn bad_values_fail_to_parse() {
    assert!(serde_json::from_str::<TimeValue>(r#""soon""#).is_err());
    assert!(serde_json::from_str::<ResolutionValue>("0").is_err());
    assert!(serde_json::from_str::<ResolutionValue>(r#""P1D""#).is_err());
    assert_eq!(
        serde_json::from_str::<ResolutionValue>(r#""auto""#).unwrap(),
        ResolutionValue::Auto
    );
    let err = AnimationConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, TimestepError::Serde(_)));
}

#[test]
fn validate_rejects_structural_errors() {
    let mut cfg = AnimationConfig::from_json_str(SAMPLE).unwrap();
    cfg.layers[0].animation.as_mut().unwrap().time.begin_time = Some(TimeValue::Join);
    assert!(matches!(cfg.validate(), Err(TimestepError::Validation(_))));

    let mut cfg = AnimationConfig::from_json_str(SAMPLE).unwrap();
    cfg.layers[0].name = "  ".into();
    assert!(cfg.validate().is_err());

    let mut cfg = AnimationConfig::from_json_str(SAMPLE).unwrap();
    cfg.layers[0].animation.as_mut().unwrap().layers[0].layer = String::new();
    assert!(cfg.validate().is_err());

    let mut cfg = AnimationConfig::from_json_str(SAMPLE).unwrap();
    cfg.animation_frame_rate = Some(0);
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = AnimationConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, TimestepError::Other(_)));
    assert!(err.to_string().contains("does/not/exist.json"));
}
