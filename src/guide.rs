//! # Guide
//!
//! ## Steppers
//!
//! A [`TimeStepper`](crate::TimeStepper) is a closed enum:
//!
//! - [`List`](crate::TimeStepper::List): sorted explicit instants, usually from a capability
//!   time dimension such as `2020-01-01T00:00:00Z,2020-01-01T01:00:00Z`
//! - [`Regular`](crate::TimeStepper::Regular): `anchor + k * resolution` for every integer `k`
//! - [`Restricted`](crate::TimeStepper::Restricted): any stepper narrowed to `[lower, upper]`
//!
//! Queries take a `clamp` flag. With `clamp = false` a query that falls off the data returns
//! `None`; with `clamp = true` it snaps to the nearest end instead.
//!
//! [`parse_time_extent`](crate::parse_time_extent) turns a WMS time extent into a stepper.
//! Intervals (`start/end/PT1H`) become a restricted grid; periods are limited to hours,
//! minutes and seconds.
//!
//! ## Configuration
//!
//! An [`AnimationConfig`](crate::AnimationConfig) is plain JSON:
//!
//! ```json
//! {
//!   "animationResolutionTime": 3600000,
//!   "animationDeltaToBeginTime": 10800000,
//!   "animationDeltaToEndTime": 21600000,
//!   "layers": [
//!     {
//!       "name": "radar",
//!       "capabilities": { "url": "https://example.org/wms", "layer": "radar" },
//!       "animation": {
//!         "beginTime": "auto",
//!         "endTime": "auto",
//!         "resolutionTime": 300000,
//!         "layers": [{ "layer": "nowcast", "beginTime": "join", "isForecast": true }]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! `beginTime`/`endTime` accept epoch milliseconds, an ISO-8601 string, `"auto"` (read from the
//! layer's capabilities) or, for sub-layers, `"join"` (start right after the parent's last
//! capability instant). `resolutionTime` accepts milliseconds, a `PT..` period, or `"auto"`.
//!
//! ## Derivation
//!
//! [`AnimationRangeDeriver::derive`](crate::AnimationRangeDeriver::derive) runs once per
//! `(config, capabilities, now)`:
//!
//! 1. substitute `auto` resolutions, then pick the global resolution
//! 2. substitute `auto`/`join` times from capabilities
//! 3. compute begin and end, from the deltas around `now` or from the layer literals
//! 4. compute the forecast begin and the observation end
//!
//! [`ConfigLoader`](crate::ConfigLoader) keeps the latest result and swaps it on reload.
//! [`AnimationConstraints`](crate::AnimationConstraints) turns a setup into per-layer windows
//! and picks the frame each layer shows at an animation instant.
