use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;

use crate::{
    capabilities::extent::parse_period,
    foundation::{
        core::{Instant, Resolution},
        error::{TimestepError, TimestepResult},
    },
};

/// Top-level animation configuration, as edited by hand in JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Global frame step in ms; ignored unless > 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_resolution_time: Option<i64>,
    /// Begin is `now - delta`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_delta_to_begin_time: Option<i64>,
    /// End is `now + delta`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_delta_to_end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_frame_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zoom_level: Option<u32>,
    /// Capability refresh period in ms. Refreshing itself is the caller's job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_capabilities: Option<u64>,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilityRef {
    pub url: String,
    pub layer: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilityRef>,
    /// `None` for layers that are shown but never animated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<LayerAnimation>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerAnimation {
    #[serde(flatten)]
    pub time: AnimationLayerTimeConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<SubLayerConfig>,
}

/// A layer animated after its parent, usually the forecast continuation of an observation layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubLayerConfig {
    /// Capability layer name, looked up under the parent's capability url.
    pub layer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub time: AnimationLayerTimeConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationLayerTimeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_time: Option<ResolutionValue>,
    #[serde(default)]
    pub is_forecast: bool,
}

impl AnimationLayerTimeConfig {
    /// The literal resolution, if one is configured or has been substituted.
    pub fn resolution(&self) -> Option<Resolution> {
        match self.resolution_time {
            Some(ResolutionValue::Literal(r)) => Some(r),
            _ => None,
        }
    }

    pub fn begin_literal(&self) -> Option<Instant> {
        self.begin_time.and_then(TimeValue::literal)
    }

    pub fn end_literal(&self) -> Option<Instant> {
        self.end_time.and_then(TimeValue::literal)
    }
}

/// Begin/end time of a layer window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum TimeValue {
    Literal(Instant),
    /// Take the bound from the layer's capability time dimension.
    Auto,
    /// Start right after the parent layer's last capability instant.
    Join,
}

impl TimeValue {
    pub fn literal(self) -> Option<Instant> {
        match self {
            Self::Literal(t) => Some(t),
            _ => None,
        }
    }
}

/// Frame step of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum ResolutionValue {
    Literal(Resolution),
    /// Take the spacing of the capability grid.
    Auto,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RawValue {
    Millis(i64),
    Text(String),
}

impl TryFrom<RawValue> for TimeValue {
    type Error = TimestepError;

    fn try_from(raw: RawValue) -> TimestepResult<Self> {
        match raw {
            RawValue::Millis(ms) => Ok(Self::Literal(Instant(ms))),
            RawValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "auto" => Ok(Self::Auto),
                "join" => Ok(Self::Join),
                _ => Ok(Self::Literal(Instant::parse_iso8601(&s)?)),
            },
        }
    }
}

impl From<TimeValue> for RawValue {
    fn from(v: TimeValue) -> Self {
        match v {
            TimeValue::Literal(t) => Self::Millis(t.0),
            TimeValue::Auto => Self::Text("auto".to_string()),
            TimeValue::Join => Self::Text("join".to_string()),
        }
    }
}

impl TryFrom<RawValue> for ResolutionValue {
    type Error = TimestepError;

    fn try_from(raw: RawValue) -> TimestepResult<Self> {
        match raw {
            RawValue::Millis(ms) => Ok(Self::Literal(Resolution::new(ms)?)),
            RawValue::Text(s) if s.trim().eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            RawValue::Text(s) => Ok(Self::Literal(parse_period(s.trim())?)),
        }
    }
}

impl From<ResolutionValue> for RawValue {
    fn from(v: ResolutionValue) -> Self {
        match v {
            ResolutionValue::Literal(r) => Self::Millis(r.millis()),
            ResolutionValue::Auto => Self::Text("auto".to_string()),
        }
    }
}

impl AnimationConfig {
    pub fn from_json_str(s: &str) -> TimestepResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| TimestepError::serde(format!("parse animation config JSON: {e}")))
    }

    pub fn from_reader<R: std::io::Read>(r: R) -> TimestepResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TimestepError::serde(format!("parse animation config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> TimestepResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open animation config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Structural checks that do not need capability data.
    pub fn validate(&self) -> TimestepResult<()> {
        if self.animation_frame_rate == Some(0) {
            return Err(TimestepError::validation("animationFrameRate must be > 0"));
        }

        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(TimestepError::validation("layer name must be non-empty"));
            }
            if let Some(caps) = &layer.capabilities {
                if caps.url.trim().is_empty() || caps.layer.trim().is_empty() {
                    return Err(TimestepError::validation(format!(
                        "layer '{}' has an incomplete capabilities reference",
                        layer.name
                    )));
                }
            }
            let Some(anim) = &layer.animation else {
                continue;
            };
            if anim.time.begin_time == Some(TimeValue::Join)
                || anim.time.end_time == Some(TimeValue::Join)
            {
                return Err(TimestepError::validation(format!(
                    "layer '{}': 'join' is only allowed on sub-layers",
                    layer.name
                )));
            }
            for sub in &anim.layers {
                if sub.layer.trim().is_empty() {
                    return Err(TimestepError::validation(format!(
                        "layer '{}' has a sub-layer without a layer id",
                        layer.name
                    )));
                }
                if sub.time.end_time == Some(TimeValue::Join) {
                    return Err(TimestepError::validation(format!(
                        "sub-layer '{}': 'join' is only valid as begin time",
                        sub.layer
                    )));
                }
            }
        }
        Ok(())
    }

    /// Layers that take part in the animation.
    pub fn animated_layers(&self) -> impl Iterator<Item = (&LayerConfig, &LayerAnimation)> {
        self.layers
            .iter()
            .filter_map(|l| l.animation.as_ref().map(|a| (l, a)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
