//! The routing-provider seam.
//!
//! # Pluggability
//!
//! Discovery talks to the outside world only through [`RouteProvider`], so
//! tests substitute scripted in-memory providers and deployments can point
//! at any OSRM-compatible server (see [`crate::OsrmClient`]).

use std::future::Future;

use tc_core::GeoPoint;

use crate::{CandidateRoute, SpatialResult};

/// One routing query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub origin:       GeoPoint,
    pub destination:  GeoPoint,
    /// Optional intermediate point the route must pass through.
    pub via:          Option<GeoPoint>,
    /// Ask the provider for its own alternatives as well as the best path.
    pub alternatives: bool,
}

impl RouteRequest {
    /// Direct request that also asks for provider alternatives.
    pub fn with_alternatives(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self { origin, destination, via: None, alternatives: true }
    }

    /// Single-route request forced through `via`.
    pub fn through(origin: GeoPoint, destination: GeoPoint, via: GeoPoint) -> Self {
        Self { origin, destination, via: Some(via), alternatives: false }
    }
}

/// Source of candidate routes.
///
/// Implementations return routes with geometry and per-step breakdowns.  A
/// query the provider cannot route is `Ok(vec![])`, not an error; errors are
/// reserved for transport and protocol failures.
///
/// # Thread safety
///
/// Futures must be `Send` so the engine can run discovery on a
/// multi-threaded runtime alongside the weather fetch.
pub trait RouteProvider: Send + Sync {
    fn routes(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = SpatialResult<Vec<CandidateRoute>>> + Send;
}
