//! Candidate-route data model.
//!
//! A [`CandidateRoute`] is one complete path as returned by the routing
//! provider.  It is never mutated after decoding: scoring, ranking and
//! prediction all produce new annotated values that borrow from it.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use tc_core::GeoPoint;

/// Placeholder some providers emit for roads without a name.
const UNNAMED_ROAD: &str = "Unnamed Road";

// ── Step ──────────────────────────────────────────────────────────────────────

/// A contiguous stretch of road with roughly uniform characteristics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Length in metres.
    pub distance_m: f64,
    /// Provider's free-flow travel time in seconds.
    pub duration_secs: f64,
    pub geometry: Vec<GeoPoint>,
    pub name: Option<String>,
    /// Route number, e.g. "A7".
    pub road_ref: Option<String>,
}

impl Step {
    /// The name to show for this step: its road name, else its route
    /// number.  `None` when the provider gave neither.
    pub fn road_name(&self) -> Option<&str> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != UNNAMED_ROAD);
        name.or_else(|| self.road_ref.as_deref().map(str::trim).filter(|r| !r.is_empty()))
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// The part of a route between two consecutive waypoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub steps: Vec<Step>,
}

// ── CandidateRoute ────────────────────────────────────────────────────────────

/// One alternative path from origin to destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    /// Full path, origin first.
    pub geometry: Vec<GeoPoint>,
    pub legs: Vec<Leg>,
    /// Total length in metres.
    pub distance_m: f64,
    /// Provider's total free-flow travel time in seconds.
    pub duration_secs: f64,
}

impl CandidateRoute {
    /// All steps of all legs, in travel order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> + '_ {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }

    /// The steps to model, or a single synthetic step spanning the whole
    /// route when the provider returned no step breakdown.
    pub fn steps_or_whole(&self) -> Vec<Cow<'_, Step>> {
        let steps: Vec<Cow<'_, Step>> = self.steps().map(Cow::Borrowed).collect();
        if steps.is_empty() {
            vec![Cow::Owned(self.as_single_step())]
        } else {
            steps
        }
    }

    /// The whole route collapsed into one unnamed step.
    pub fn as_single_step(&self) -> Step {
        Step {
            distance_m:    self.distance_m,
            duration_secs: self.duration_secs,
            geometry:      self.geometry.clone(),
            name:          None,
            road_ref:      None,
        }
    }

    /// Displayable road names of every step, in travel order, repeats kept.
    pub fn road_names(&self) -> Vec<&str> {
        self.steps().filter_map(Step::road_name).collect()
    }
}
