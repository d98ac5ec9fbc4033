//! Derivation of the global animation range from configuration and capability data.
//!
//! The derivation is a pure function of `(config, capabilities, now)`. It never mutates the
//! configuration; substituted values live in the returned [`AnimationSetup`].

use crate::{
    capabilities::model::CapabilityStore,
    config::model::{
        AnimationConfig, AnimationLayerTimeConfig, CapabilityRef, LayerAnimation, LayerConfig,
        ResolutionValue, SubLayerConfig, TimeValue,
    },
    foundation::{
        core::{Instant, Resolution},
        error::{TimestepError, TimestepResult},
    },
    stepping::stepper::TimeStepper,
};

/// Animation-wide time window, built once per derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAnimationRange {
    pub begin_date: Instant,
    pub end_date: Instant,
    pub resolution: Resolution,
    pub forecast_begin_date: Instant,
    pub observation_end_date: Instant,
}

/// A top-level animated layer after capability substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLayer {
    pub name: String,
    pub capabilities: Option<CapabilityRef>,
    pub time: AnimationLayerTimeConfig,
    /// Availability advertised by the capabilities document, if any.
    pub availability: Option<TimeStepper>,
    pub sub_layers: Vec<ResolvedSubLayer>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSubLayer {
    pub layer: String,
    pub name: Option<String>,
    pub time: AnimationLayerTimeConfig,
    pub availability: Option<TimeStepper>,
}

impl ResolvedSubLayer {
    /// Configured name, or `"{parent}_{layer}"`.
    pub fn display_name(&self, parent: &str) -> String {
        match &self.name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => format!("{parent}_{}", self.layer),
        }
    }
}

/// Result of a derivation: the global range plus every animated layer with substituted times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSetup {
    pub range: GlobalAnimationRange,
    pub layers: Vec<ResolvedLayer>,
}

pub struct AnimationRangeDeriver<'a> {
    config: &'a AnimationConfig,
    capabilities: &'a CapabilityStore,
}

impl<'a> AnimationRangeDeriver<'a> {
    pub fn new(config: &'a AnimationConfig, capabilities: &'a CapabilityStore) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn derive(&self, now: Instant) -> TimestepResult<AnimationSetup> {
        let mut layers = self
            .config
            .animated_layers()
            .map(|(layer, anim)| self.collect_layer(layer, anim))
            .collect::<TimestepResult<Vec<_>>>()?;

        let resolution = self.global_resolution(&layers)?;

        for layer in &mut layers {
            substitute_capability_times(layer, resolution)?;
        }

        let range = compute_range(self.config, &layers, resolution, now)?;
        tracing::debug!(
            begin = %range.begin_date,
            end = %range.end_date,
            forecast_begin = %range.forecast_begin_date,
            resolution = range.resolution.millis(),
            "derived animation range"
        );
        Ok(AnimationSetup { range, layers })
    }

    fn collect_layer(
        &self,
        layer: &LayerConfig,
        anim: &LayerAnimation,
    ) -> TimestepResult<ResolvedLayer> {
        let availability = match &layer.capabilities {
            Some(caps) => self.lookup(&caps.url, &caps.layer)?,
            None => None,
        };

        let mut time = anim.time.clone();
        substitute_auto_resolution(&mut time, availability.as_ref());

        let sub_layers = anim
            .layers
            .iter()
            .map(|sub| self.collect_sub_layer(layer.capabilities.as_ref(), sub))
            .collect::<TimestepResult<Vec<_>>>()?;

        Ok(ResolvedLayer {
            name: layer.name.clone(),
            capabilities: layer.capabilities.clone(),
            time,
            availability,
            sub_layers,
        })
    }

    fn collect_sub_layer(
        &self,
        parent_caps: Option<&CapabilityRef>,
        sub: &SubLayerConfig,
    ) -> TimestepResult<ResolvedSubLayer> {
        let availability = match parent_caps {
            Some(caps) => self.lookup(&caps.url, &sub.layer)?,
            None => None,
        };
        let mut time = sub.time.clone();
        substitute_auto_resolution(&mut time, availability.as_ref());
        Ok(ResolvedSubLayer {
            layer: sub.layer.clone(),
            name: sub.name.clone(),
            time,
            availability,
        })
    }

    /// Capability stepper for `(url, layer)`; layers without a time dimension count as absent.
    fn lookup(&self, url: &str, layer: &str) -> TimestepResult<Option<TimeStepper>> {
        match self.capabilities.availability(url, layer) {
            Ok(Some(stepper)) => Ok(Some(stepper)),
            Ok(None) => {
                tracing::warn!(url, layer, "capability layer not found");
                Ok(None)
            }
            Err(TimestepError::MissingCapabilityTime(msg)) => {
                tracing::warn!(url, layer, "{msg}");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn global_resolution(&self, layers: &[ResolvedLayer]) -> TimestepResult<Resolution> {
        if let Some(ms) = self.config.animation_resolution_time.filter(|ms| *ms > 0) {
            return Resolution::new(ms);
        }
        layers
            .iter()
            .filter_map(|l| l.time.resolution())
            .max()
            .ok_or(TimestepError::MissingResolution)
    }
}

fn substitute_auto_resolution(time: &mut AnimationLayerTimeConfig, stepper: Option<&TimeStepper>) {
    if time.resolution_time != Some(ResolutionValue::Auto) {
        return;
    }
    time.resolution_time = stepper
        .and_then(TimeStepper::grid_resolution)
        .map(ResolutionValue::Literal);
}

fn substitute_capability_times(
    layer: &mut ResolvedLayer,
    global: Resolution,
) -> TimestepResult<()> {
    let layer_res = layer.time.resolution().unwrap_or(global);

    if let Some(stepper) = &layer.availability {
        substitute_auto_bounds(&mut layer.time, stepper, layer_res, &layer.name)?;
    }

    let parent_end = layer.availability.as_ref().and_then(TimeStepper::end_time);
    for sub in &mut layer.sub_layers {
        let sub_res = sub.time.resolution().unwrap_or(layer_res);
        if let Some(stepper) = &sub.availability {
            substitute_auto_bounds(&mut sub.time, stepper, sub_res, &sub.layer)?;
        }
        if sub.time.begin_time == Some(TimeValue::Join) {
            let end = parent_end.ok_or_else(|| {
                TimestepError::missing_capability(format!(
                    "sub-layer '{}' joins '{}' which has no capability end time",
                    sub.layer, layer.name
                ))
            })?;
            let joined = end.offset(1).ceil_to(sub_res);
            tracing::debug!(sub_layer = %sub.layer, begin = %joined, "joined parent capability end");
            sub.time.begin_time = Some(TimeValue::Literal(joined));
        }
    }
    Ok(())
}

fn substitute_auto_bounds(
    time: &mut AnimationLayerTimeConfig,
    stepper: &TimeStepper,
    resolution: Resolution,
    name: &str,
) -> TimestepResult<()> {
    if time.begin_time == Some(TimeValue::Auto) {
        let start = stepper.start_time().ok_or_else(|| {
            TimestepError::missing_capability(format!("layer '{name}' has no capability start"))
        })?;
        let begin = start.ceil_to(resolution);
        tracing::debug!(layer = name, %begin, "auto begin from capabilities");
        time.begin_time = Some(TimeValue::Literal(begin));
    }
    if time.end_time == Some(TimeValue::Auto) {
        let end = stepper.end_time().ok_or_else(|| {
            TimestepError::missing_capability(format!("layer '{name}' has no capability end"))
        })?;
        let end = end.floor_to(resolution);
        tracing::debug!(layer = name, %end, "auto end from capabilities");
        time.end_time = Some(TimeValue::Literal(end));
    }
    Ok(())
}

fn compute_range(
    config: &AnimationConfig,
    layers: &[ResolvedLayer],
    res: Resolution,
    now: Instant,
) -> TimestepResult<GlobalAnimationRange> {
    let begin_date = match config.animation_delta_to_begin_time {
        Some(0) => now.ceil_to(res),
        Some(delta) => now.offset(delta.saturating_neg()).floor_to(res),
        None => layers
            .iter()
            .filter_map(|l| l.time.begin_literal())
            .min()
            .map(|t| t.floor_to(res))
            .ok_or(TimestepError::MissingBeginDate)?,
    };

    let end_date = match config.animation_delta_to_end_time {
        Some(0) => now.floor_to(res),
        Some(delta) => now.offset(delta).ceil_to(res),
        None => layers
            .iter()
            .filter_map(|l| l.time.end_literal())
            .max()
            .map(|t| t.ceil_to(res))
            .ok_or(TimestepError::MissingEndDate)?,
    };

    let forecast_begin_date = match config.animation_delta_to_end_time {
        Some(delta) if delta <= 0 => end_date,
        _ => forecast_begin(layers, res, begin_date, now.ceil_to(res)),
    };

    Ok(GlobalAnimationRange {
        begin_date,
        end_date,
        resolution: res,
        forecast_begin_date,
        observation_end_date: forecast_begin_date.offset(-res.millis()),
    })
}

/// Earliest begin among forecast layers and forecast sub-layers, capped at `initial`.
fn forecast_begin(
    layers: &[ResolvedLayer],
    res: Resolution,
    global_begin: Instant,
    initial: Instant,
) -> Instant {
    let begin_of = |time: &AnimationLayerTimeConfig| match time.begin_time {
        None => Some(global_begin),
        Some(TimeValue::Literal(t)) => Some(t),
        Some(TimeValue::Auto | TimeValue::Join) => None,
    };

    let mut forecast_begin = initial;
    for layer in layers {
        let floor_res = layer.time.resolution().unwrap_or(res);
        let parent_forecast = layer.time.is_forecast;

        let own = parent_forecast.then(|| begin_of(&layer.time)).flatten();
        let subs = layer
            .sub_layers
            .iter()
            .filter(|s| parent_forecast || s.time.is_forecast)
            .filter_map(|s| begin_of(&s.time));

        for begin in own.into_iter().chain(subs) {
            forecast_begin = forecast_begin.min(begin.floor_to(floor_res));
        }
    }
    forecast_begin
}

#[cfg(test)]
#[path = "../../tests/unit/config/derive.rs"]
mod tests;
