//! Time-stepping and availability model for animated WMS/WMTS map layers.
//!
//! The crate answers two questions for a map-animation widget:
//!
//! 1. Which instants does a layer have data for, and how do you move between them?
//!    That is a [`TimeStepper`]: an explicit list, a regular grid, or a restriction of either.
//! 2. Which time window should the animation cover right now? That is
//!    [`AnimationRangeDeriver`], which combines an [`AnimationConfig`] with parsed
//!    capabilities ([`CapabilityStore`]) and the current time into an [`AnimationSetup`].
//!
//! Everything is synchronous and pure. Fetching capability documents, rendering, and the
//! playback loop belong to the caller.
//!
//! ```
//! use timestep::{Instant, parse_time_extent};
//!
//! let s = parse_time_extent("2020-01-01T00:00:00Z/2020-01-01T06:00:00Z/PT1H")?;
//! let t = Instant::parse_iso8601("2020-01-01T00:45:00Z")?;
//! let prev = s.previous_available(t, false).map(|i| i.to_string());
//! assert_eq!(prev.as_deref(), Some("2020-01-01T00:00:00.000Z"));
//! # Ok::<(), timestep::TimestepError>(())
//! ```
//!
//! See [`crate::guide`] for a walkthrough of configuration and derivation.
#![forbid(unsafe_code)]

mod capabilities;
mod config;
mod foundation;
mod stepping;
mod timeline;

/// Standalone walkthrough of the configuration format and the derivation steps.
pub mod guide;

pub use capabilities::extent::{parse_period, parse_time_extent};
pub use capabilities::model::{CapabilitiesDocument, CapabilityLayer, CapabilityStore};
pub use config::derive::{
    AnimationRangeDeriver, AnimationSetup, GlobalAnimationRange, ResolvedLayer, ResolvedSubLayer,
};
pub use config::loader::ConfigLoader;
pub use config::model::{
    AnimationConfig, AnimationLayerTimeConfig, CapabilityRef, LayerAnimation, LayerConfig,
    ResolutionValue, SubLayerConfig, TimeValue,
};
pub use foundation::core::{Instant, Resolution};
pub use foundation::error::{TimestepError, TimestepResult};
pub use foundation::math::{ceil_to_resolution, floor_to_resolution};
pub use stepping::list::ListStepper;
pub use stepping::ops::{list, regular, restricted, restricted_regular};
pub use stepping::regular::RegularStepper;
pub use stepping::restricted::RestrictedStepper;
pub use stepping::stepper::{Direction, TimeStepper};
pub use timeline::constraints::{AnimationConstraints, LayerRole, LayerTimeline, RangeGroup};
pub use timeline::selector::FrameSelector;
