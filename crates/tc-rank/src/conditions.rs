//! Per-road condition summaries.
//!
//! Steps on the same named road are merged: delay and distance add up, and
//! the display fields (severity, speeds, incident) come from the worst step.
//! On a tie the step seen first keeps them.  Roads stay in travel order.

use serde::Serialize;

use tc_core::{DepartureTime, SeverityColor, Weather};
use tc_spatial::CandidateRoute;
use tc_traffic::{SegmentMetrics, predict_segment};

/// Conditions on one named road of a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadCondition {
    pub road_name: String,
    pub delay_secs: f64,
    /// Clear, moderate or heavy.
    pub severity: SeverityColor,
    pub predicted_speed_kmh: f64,
    pub base_speed_kmh: f64,
    pub distance_m: f64,
    pub incident: Option<&'static str>,
}

impl RoadCondition {
    fn from_step(road_name: &str, distance_m: f64, m: &SegmentMetrics) -> Self {
        Self {
            road_name:           road_name.to_owned(),
            delay_secs:          m.delay_secs,
            severity:            severity(m.color),
            predicted_speed_kmh: m.predicted_speed_kmh,
            base_speed_kmh:      m.base_speed_kmh,
            distance_m,
            incident:            m.incident_label(),
        }
    }

    fn merge(&mut self, other: RoadCondition) {
        self.delay_secs += other.delay_secs;
        self.distance_m += other.distance_m;
        if other.severity.rank() > self.severity.rank() {
            self.severity = other.severity;
            self.predicted_speed_kmh = other.predicted_speed_kmh;
            self.base_speed_kmh = other.base_speed_kmh;
        }
        if self.incident.is_none() {
            self.incident = other.incident;
        }
    }
}

/// `Neutral` has no bucket of its own.
fn severity(color: SeverityColor) -> SeverityColor {
    match color {
        SeverityColor::Neutral => SeverityColor::Clear,
        c => c,
    }
}

/// Conditions on every named road of `route` departing `offset_minutes`
/// after `at`.  Unnamed steps are skipped.
pub fn road_conditions(
    route:          &CandidateRoute,
    weather:        Option<&Weather>,
    at:             DepartureTime,
    offset_minutes: i64,
) -> Vec<RoadCondition> {
    let mut out: Vec<RoadCondition> = Vec::new();

    for step in route.steps() {
        let Some(name) = step.road_name() else { continue };
        let m = predict_segment(step.distance_m, step.duration_secs, weather, at, offset_minutes);
        let condition = RoadCondition::from_step(name, step.distance_m, &m);

        match out.iter_mut().find(|c| c.road_name == name) {
            Some(existing) => existing.merge(condition),
            None => out.push(condition),
        }
    }
    out
}
