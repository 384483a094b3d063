//! Alternative-route discovery.
//!
//! # Policy
//!
//! ```text
//! ① primary request (with provider alternatives), under RetryPolicy
//! ② sort by provider duration, keep each route distinct from those kept
//! ③ fewer than 3?  probe 8 offset waypoints around the midpoint,
//!                  3 concurrent requests per batch, no retries,
//!                  keep each probe route distinct from everything so far
//! ④ sort by provider duration, truncate to 3
//! ```
//!
//! A failed primary request is returned to the caller; a failed probe only
//! means "no candidate from that direction".  A provider that cannot route
//! at all yields an empty list.

use futures::future::join_all;

use tc_core::GeoPoint;

use crate::provider::{RouteProvider, RouteRequest};
use crate::retry::RetryPolicy;
use crate::similarity::is_distinct;
use crate::{CandidateRoute, SpatialResult};

/// Routes returned by [`AlternativeDiscoverer::discover`] at most.
pub const TARGET_ROUTES: usize = 3;
/// Probe requests issued concurrently.
pub const PROBE_BATCH: usize = 3;

/// N, NE, E, SE, S, SW, W, NW.
const PROBE_HEADINGS_DEG: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];
/// Probe offset as a share of the origin–destination span.
const PROBE_SPREAD: f64 = 0.25;
/// Floor on the probe offset so short trips still get distinct detours.
const MIN_PROBE_OFFSET_DEG: f64 = 0.01;

/// Finds up to [`TARGET_ROUTES`] geometrically distinct routes.
pub struct AlternativeDiscoverer<P: RouteProvider> {
    provider: P,
    retry:    RetryPolicy,
}

impl<P: RouteProvider> AlternativeDiscoverer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, retry: RetryPolicy::default() }
    }

    /// Replace the retry policy of the primary request.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Discover distinct routes from `origin` to `destination`, fastest
    /// first.
    pub async fn discover(
        &self,
        origin:      GeoPoint,
        destination: GeoPoint,
    ) -> SpatialResult<Vec<CandidateRoute>> {
        let request = RouteRequest::with_alternatives(origin, destination);
        let mut primary = self
            .retry
            .run("primary route request", || self.provider.routes(&request))
            .await?;
        primary.sort_by(|a, b| a.duration_secs.total_cmp(&b.duration_secs));

        let mut accepted: Vec<CandidateRoute> = Vec::with_capacity(TARGET_ROUTES);
        for route in primary {
            if accepted.len() == TARGET_ROUTES {
                break;
            }
            if is_distinct(&route, &accepted) {
                accepted.push(route);
            } else {
                log::debug!(
                    "dropping provider alternative ({:.0} m) as a duplicate corridor",
                    route.distance_m
                );
            }
        }

        if accepted.is_empty() {
            log::info!(
                "no route from {origin} to {destination} ({:.0} m apart)",
                origin.distance_m(destination)
            );
            return Ok(accepted);
        }

        if accepted.len() < TARGET_ROUTES {
            self.probe(origin, destination, &mut accepted).await;
        }

        accepted.sort_by(|a, b| a.duration_secs.total_cmp(&b.duration_secs));
        accepted.truncate(TARGET_ROUTES);
        log::debug!("discovered {} distinct route(s)", accepted.len());
        Ok(accepted)
    }

    async fn probe(&self, origin: GeoPoint, destination: GeoPoint, accepted: &mut Vec<CandidateRoute>) {
        let waypoints = probe_waypoints(origin, destination);

        for batch in waypoints.chunks(PROBE_BATCH) {
            if accepted.len() >= TARGET_ROUTES {
                break;
            }
            let requests: Vec<RouteRequest> = batch
                .iter()
                .map(|&via| RouteRequest::through(origin, destination, via))
                .collect();
            let results = join_all(requests.iter().map(|r| self.provider.routes(r))).await;

            for (via, result) in batch.iter().zip(results) {
                let route = match result {
                    Ok(routes) => routes.into_iter().next(),
                    Err(e) => {
                        log::debug!("waypoint probe via {via} failed: {e}");
                        None
                    }
                };
                let Some(route) = route else { continue };
                if accepted.len() < TARGET_ROUTES && is_distinct(&route, accepted) {
                    log::debug!("accepted detour via {via}");
                    accepted.push(route);
                }
            }
        }
    }
}

/// The eight detour waypoints around the origin–destination midpoint.
pub fn probe_waypoints(origin: GeoPoint, destination: GeoPoint) -> Vec<GeoPoint> {
    let mid = origin.midpoint(destination);
    let magnitude = (origin.planar_distance_deg(destination) * PROBE_SPREAD).max(MIN_PROBE_OFFSET_DEG);
    PROBE_HEADINGS_DEG
        .iter()
        .map(|&heading| mid.offset_deg(heading, magnitude))
        .collect()
}
