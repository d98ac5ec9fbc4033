//! Per-layer animation windows and the observation/forecast grouping of layers.

use std::collections::BTreeMap;

use crate::{
    config::{
        derive::{AnimationSetup, GlobalAnimationRange, ResolvedLayer},
        model::{AnimationLayerTimeConfig, TimeValue},
    },
    foundation::core::{Instant, Resolution},
    stepping::{ops, stepper::TimeStepper},
    timeline::selector::FrameSelector,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LayerRole {
    Observation,
    Forecast,
}

/// Animation window and availability of one layer or sub-layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerTimeline {
    pub name: String,
    /// Name of the top-level layer; equal to `name` for top-level layers.
    pub parent: String,
    pub role: LayerRole,
    pub begin: Instant,
    pub end: Instant,
    pub resolution: Resolution,
    pub availability: TimeStepper,
    /// True when `availability` was synthesized from the window rather than read from capabilities.
    pub pseudo: bool,
}

impl LayerTimeline {
    pub fn selector(&self, global_resolution: Resolution) -> FrameSelector {
        let max_offset = self.resolution.max(global_resolution);
        match self.role {
            LayerRole::Observation => FrameSelector::observation(max_offset),
            LayerRole::Forecast => FrameSelector::forecast(max_offset),
        }
    }

    /// Frame shown at animation instant `t`, if any falls inside the layer window.
    pub fn frame_at(&self, t: Instant, global_resolution: Resolution) -> Option<Instant> {
        self.selector(global_resolution)
            .select(&self.availability, t)
            .filter(|f| *f >= self.begin && *f <= self.end)
    }

    /// Every available frame inside the window.
    pub fn frames(&self) -> Vec<Instant> {
        self.availability.times_for_interval(self.begin, self.end)
    }
}

/// A closed time range together with the layers animated in it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RangeGroup {
    pub begin: Instant,
    pub end: Instant,
    pub layers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationConstraints {
    pub global_range: GlobalAnimationRange,
    pub layers: Vec<LayerTimeline>,
    /// Top-level layer name to its members: the layer itself, then its sub-layers.
    pub timelines: BTreeMap<String, Vec<String>>,
    pub observation: RangeGroup,
    pub forecast: RangeGroup,
}

impl AnimationConstraints {
    pub fn from_setup(setup: &AnimationSetup) -> Self {
        let range = setup.range;
        let mut layers = Vec::new();
        let mut timelines = BTreeMap::new();
        let mut observation = RangeGroup {
            begin: range.begin_date,
            end: range.observation_end_date,
            layers: Vec::new(),
        };
        let mut forecast = RangeGroup {
            begin: range.forecast_begin_date,
            end: range.end_date,
            layers: Vec::new(),
        };

        for layer in &setup.layers {
            let role = if layer.time.is_forecast {
                LayerRole::Forecast
            } else {
                LayerRole::Observation
            };
            let top = build_timeline(
                &layer.name,
                &layer.name,
                role,
                &layer.time,
                layer.availability.as_ref(),
                &range,
            );
            let mut members = vec![top.name.clone()];
            match role {
                LayerRole::Observation => observation.layers.push(top.name.clone()),
                LayerRole::Forecast => forecast.layers.push(top.name.clone()),
            }
            layers.push(top);

            for sub in &layer.sub_layers {
                let name = sub.display_name(&layer.name);
                let tl = build_timeline(
                    &name,
                    &layer.name,
                    LayerRole::Forecast,
                    &sub.time,
                    sub.availability.as_ref(),
                    &range,
                );
                members.push(name.clone());
                forecast.layers.push(name);
                layers.push(tl);
            }

            warn_if_missing(layer);
            timelines.insert(layer.name.clone(), members);
        }

        Self {
            global_range: range,
            layers,
            timelines,
            observation,
            forecast,
        }
    }

    pub fn layer(&self, name: &str) -> Option<&LayerTimeline> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Frame of every layer at animation instant `t`, in layer order.
    pub fn frames_at(&self, t: Instant) -> Vec<(&str, Option<Instant>)> {
        let res = self.global_range.resolution;
        self.layers
            .iter()
            .map(|l| (l.name.as_str(), l.frame_at(t, res)))
            .collect()
    }
}

fn build_timeline(
    name: &str,
    parent: &str,
    role: LayerRole,
    time: &AnimationLayerTimeConfig,
    capability: Option<&TimeStepper>,
    range: &GlobalAnimationRange,
) -> LayerTimeline {
    let resolution = time.resolution().unwrap_or(range.resolution);

    let (default_begin, default_end) = match role {
        LayerRole::Forecast => (range.forecast_begin_date, range.end_date),
        LayerRole::Observation => (range.begin_date, range.forecast_begin_date),
    };
    let begin = literal_or(time.begin_time, default_begin).floor_to(resolution);
    let end = literal_or(time.end_time, default_end).ceil_to(resolution);

    let (availability, pseudo) = match capability {
        Some(stepper) => {
            tracing::debug!(layer = name, "using capability availability");
            (stepper.clone(), false)
        }
        None => {
            tracing::debug!(layer = name, %begin, %end, "using pseudo availability");
            (ops::restricted_regular(begin, Some(end), resolution), true)
        }
    };

    LayerTimeline {
        name: name.to_string(),
        parent: parent.to_string(),
        role,
        begin,
        end,
        resolution,
        availability,
        pseudo,
    }
}

fn literal_or(value: Option<TimeValue>, default: Instant) -> Instant {
    value.and_then(TimeValue::literal).unwrap_or(default)
}

fn warn_if_missing(layer: &ResolvedLayer) {
    if let (Some(caps), None) = (&layer.capabilities, &layer.availability) {
        tracing::warn!(
            layer = %layer.name,
            url = %caps.url,
            "no capability time data, animating over the configured window"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/constraints.rs"]
mod tests;
