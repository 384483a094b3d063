//! `tc-core` — foundational types for the `trafcast` route engine.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and only a handful of external ones (`chrono`, `rand`,
//! `serde`, `thiserror`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`geo`]       | `GeoPoint`, haversine distance, bearings, offsets       |
//! | [`time`]      | `DepartureTime` (local civil time of a query)           |
//! | [`rng`]       | `SplitMix64`, the seeded generator behind incident rolls |
//! | [`color`]     | `SeverityColor` three-tier congestion indicator         |
//! | [`weather`]   | `Weather` observation, `WeatherTier` classification     |
//! | [`error`]     | `CoreError`, `CoreResult`                               |

pub mod color;
pub mod error;
pub mod geo;
pub mod rng;
pub mod time;
pub mod weather;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::SeverityColor;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use rng::SplitMix64;
pub use time::DepartureTime;
pub use weather::{Weather, WeatherTier};
