//! `tc-traffic` — congestion modelling for candidate routes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`road`]    | `RoadType` ladder, sensitivities, floors, weather matrix   |
//! | [`curve`]   | weekday/weekend congestion curves, rush-hour transitions   |
//! | [`segment`] | `predict_segment` → `SegmentMetrics`, seeded incidents     |
//! | [`score`]   | `score_route`, weather penalties                           |
//!
//! Nothing here performs I/O or reads the clock: every function takes the
//! departure instant and the departure offset explicitly.

pub mod curve;
pub mod road;
pub mod score;
pub mod segment;

#[cfg(test)]
mod tests;

pub use curve::{time_factor, transition_multiplier};
pub use road::RoadType;
pub use score::{score_route, weather_penalty_secs};
pub use segment::{Incident, SegmentMetrics, calibrated_duration_secs, predict_segment};
