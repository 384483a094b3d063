//! Geometric similarity and diversity checks between candidate routes.
//!
//! # Coarse similarity
//!
//! Each route is reduced to at most [`MAX_SAMPLES`] evenly spaced
//! coordinates.  A sample of route A *matches* when some sample of route B
//! lies within [`MATCH_RADIUS_DEG`] (≈111 m) of it; the directional
//! similarity is `matches / samples`.  The reported similarity is the larger
//! of the two directions, so a short route lying entirely on a longer one
//! still counts as a duplicate.
//!
//! Neighbour lookups use an R-tree (via `rstar`) over `[lat, lon]`,
//! the same planar approximation the old node-snapping index used.
//!
//! # Corridor check
//!
//! Two routes that leave the origin on nearly the same heading and share a
//! good part of their samples are the same corridor even when the coarse
//! check alone would let them through.

use rstar::RTree;

use tc_core::GeoPoint;
use tc_core::geo::heading_difference;

use crate::CandidateRoute;

pub const MAX_SAMPLES: usize = 20;
/// ~111 m at the equator.
pub const MATCH_RADIUS_DEG: f64 = 0.001;
/// Above this similarity two routes are duplicates outright.
pub const DEDUP_SIMILARITY: f64 = 0.70;
/// Above this similarity, routes with matching headings are duplicates.
pub const CORRIDOR_SIMILARITY: f64 = 0.40;
pub const HEADING_TOLERANCE_DEG: f64 = 15.0;
/// Portion of the geometry used to measure a route's initial heading.
const HEADING_FRACTION: f64 = 0.2;

/// At most [`MAX_SAMPLES`] evenly spaced points, first and last included.
pub fn sample_points(geometry: &[GeoPoint]) -> Vec<GeoPoint> {
    let n = geometry.len();
    if n <= MAX_SAMPLES {
        return geometry.to_vec();
    }
    (0..MAX_SAMPLES)
        .map(|i| geometry[i * (n - 1) / (MAX_SAMPLES - 1)])
        .collect()
}

fn index(samples: &[GeoPoint]) -> RTree<[f64; 2]> {
    RTree::bulk_load(samples.iter().map(|p| [p.lat, p.lon]).collect())
}

fn directional(samples: &[GeoPoint], other: &RTree<[f64; 2]>) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let radius_2 = MATCH_RADIUS_DEG * MATCH_RADIUS_DEG;
    let matches = samples
        .iter()
        .filter(|p| other.locate_within_distance([p.lat, p.lon], radius_2).next().is_some())
        .count();
    matches as f64 / samples.len() as f64
}

/// Share of near-coincident samples, in `[0, 1]`.  Routes without geometry
/// are similar to nothing.
pub fn similarity(a: &CandidateRoute, b: &CandidateRoute) -> f64 {
    let sa = sample_points(&a.geometry);
    let sb = sample_points(&b.geometry);
    if sa.is_empty() || sb.is_empty() {
        return 0.0;
    }
    directional(&sa, &index(&sb)).max(directional(&sb, &index(&sa)))
}

/// Bearing from the first coordinate to the one 20 % of the way along the
/// geometry.  `None` for routes with fewer than two points.
pub fn initial_heading(route: &CandidateRoute) -> Option<f64> {
    let g = &route.geometry;
    if g.len() < 2 {
        return None;
    }
    let idx = ((g.len() as f64 * HEADING_FRACTION) as usize).clamp(1, g.len() - 1);
    Some(g[0].bearing_deg(g[idx]))
}

/// `true` when `a` and `b` should be treated as one corridor.
pub fn same_corridor(a: &CandidateRoute, b: &CandidateRoute) -> bool {
    let sim = similarity(a, b);
    if sim > DEDUP_SIMILARITY {
        return true;
    }
    match (initial_heading(a), initial_heading(b)) {
        (Some(ha), Some(hb)) => {
            heading_difference(ha, hb) < HEADING_TOLERANCE_DEG && sim > CORRIDOR_SIMILARITY
        }
        _ => false,
    }
}

/// `true` when `candidate` differs from every route in `accepted`.
pub fn is_distinct(candidate: &CandidateRoute, accepted: &[CandidateRoute]) -> bool {
    accepted.iter().all(|r| !same_corridor(candidate, r))
}
