//! `tc-spatial` — candidate routes, the routing-provider seam, and
//! alternative-route discovery.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`route`]      | `CandidateRoute`, `Leg`, `Step`                            |
//! | [`provider`]   | `RouteProvider` trait, `RouteRequest`                      |
//! | [`osrm`]       | `OsrmClient` — HTTP implementation of `RouteProvider`      |
//! | [`retry`]      | `RetryPolicy` (exponential back-off, 4xx not retried)      |
//! | [`similarity`] | geometric similarity and heading-based diversity checks    |
//! | [`discover`]   | `AlternativeDiscoverer` — dedupe + offset-waypoint probes  |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                         |

pub mod discover;
pub mod error;
pub mod osrm;
pub mod provider;
pub mod retry;
pub mod route;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use discover::AlternativeDiscoverer;
pub use error::{SpatialError, SpatialResult};
pub use osrm::OsrmClient;
pub use provider::{RouteProvider, RouteRequest};
pub use retry::RetryPolicy;
pub use route::{CandidateRoute, Leg, Step};
