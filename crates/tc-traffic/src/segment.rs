//! Per-segment speed model.
//!
//! # Pipeline
//!
//! ```text
//! free-flow speed ──► RoadType
//!        │
//!        × max(0.05, 1 − time_factor × sensitivity × transition)
//!        × weather multiplier [road][tier]
//!        × incident factor            (steps > 500 m, seeded roll)
//!        ▼
//!   max(·, floor)  = predicted speed
//! ```
//!
//! Durations are not taken from the provider.  Every step is timed against
//! a calibrated baseline of [`SECONDS_PER_METER`], stretched by how far the
//! predicted speed falls below the free-flow speed.

use serde::{Deserialize, Serialize};

use tc_core::{DepartureTime, SeverityColor, SplitMix64, Weather, WeatherTier};

use crate::RoadType;
use crate::curve::{time_factor, transition_multiplier};

/// 420 s over a 6.6 km reference trip.
pub const SECONDS_PER_METER: f64 = 420.0 / 6_600.0;
/// Shorter steps never roll for incidents.
pub const INCIDENT_MIN_DISTANCE_M: f64 = 500.0;

const MIN_REDUCTION: f64 = 0.05;
/// Predicted speed of a degenerate step.
const DEGENERATE_SPEED_KMH: f64 = 0.1;

/// Baseline travel time for `distance_m` metres.
#[inline]
pub fn calibrated_duration_secs(distance_m: f64) -> f64 {
    distance_m * SECONDS_PER_METER
}

/// A simulated slowdown on one segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Incident {
    /// Main roads, 5 % of long steps.
    Bottleneck,
    /// Congested highways, 2 % of long steps.
    Accident,
}

impl Incident {
    const BOTTLENECK_CHANCE: f64 = 0.05;
    const ACCIDENT_CHANCE: f64 = 0.02;
    /// Accidents only happen above this time factor.
    const ACCIDENT_MIN_FACTOR: f64 = 0.6;

    /// Speed multiplier while the incident lasts.
    pub fn speed_factor(self) -> f64 {
        match self {
            Incident::Bottleneck => 0.6,
            Incident::Accident   => 0.3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Incident::Bottleneck => "Bottleneck Delay",
            Incident::Accident   => "Accident Reported",
        }
    }

    /// The incident, if any, for a step of `distance_m` at `offset_minutes`.
    /// Same inputs, same answer.
    pub fn roll(road: RoadType, factor: f64, distance_m: f64, offset_minutes: i64) -> Option<Self> {
        if distance_m <= INCIDENT_MIN_DISTANCE_M {
            return None;
        }
        let roll = SplitMix64::for_segment(offset_minutes, distance_m).next_f64();
        match road {
            RoadType::Main if roll < Self::BOTTLENECK_CHANCE => Some(Incident::Bottleneck),
            RoadType::Highway if factor > Self::ACCIDENT_MIN_FACTOR && roll < Self::ACCIDENT_CHANCE => {
                Some(Incident::Accident)
            }
            _ => None,
        }
    }
}

/// Predicted behaviour of one step at one departure offset.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SegmentMetrics {
    pub predicted_speed_kmh: f64,
    /// Free-flow speed; 0 for a degenerate step.
    pub base_speed_kmh: f64,
    pub road_type: RoadType,
    /// Calibrated travel time at the predicted speed.
    pub duration_secs: f64,
    /// Time lost against the calibrated baseline, never negative.
    pub delay_secs: f64,
    pub color: SeverityColor,
    pub incident: Option<Incident>,
}

impl SegmentMetrics {
    /// Safe result for a step with no usable length or duration.
    pub fn degenerate() -> Self {
        Self {
            predicted_speed_kmh: DEGENERATE_SPEED_KMH,
            base_speed_kmh:      0.0,
            road_type:           RoadType::Narrow,
            duration_secs:       0.0,
            delay_secs:          0.0,
            color:               SeverityColor::Neutral,
            incident:            None,
        }
    }

    pub fn incident_label(&self) -> Option<&'static str> {
        self.incident.map(Incident::label)
    }
}

/// Severity of a predicted-to-free-flow speed ratio.
pub fn color_for_ratio(ratio: f64) -> SeverityColor {
    if ratio < 0.5 {
        SeverityColor::Heavy
    } else if ratio < 0.8 {
        SeverityColor::Moderate
    } else {
        SeverityColor::Clear
    }
}

/// Predict one step departing `offset_minutes` after `at`.
///
/// `free_flow_secs` is the provider's duration for the step; it only fixes
/// the free-flow speed and therefore the road class.
pub fn predict_segment(
    distance_m:     f64,
    free_flow_secs: f64,
    weather:        Option<&Weather>,
    at:             DepartureTime,
    offset_minutes: i64,
) -> SegmentMetrics {
    if free_flow_secs <= 0.0 || distance_m <= 0.0 {
        return SegmentMetrics::degenerate();
    }

    let base = distance_m / free_flow_secs * 3.6;
    let road = RoadType::classify(base);

    let t = at.plus_minutes(offset_minutes);
    let factor = time_factor(t);
    let reduction = (1.0 - factor * road.sensitivity() * transition_multiplier(t)).max(MIN_REDUCTION);
    let tier = WeatherTier::classify(weather);

    let mut predicted = base * reduction * road.weather_multiplier(tier);
    let incident = Incident::roll(road, factor, distance_m, offset_minutes);
    if let Some(i) = incident {
        predicted *= i.speed_factor();
    }
    let predicted = predicted.max(road.floor_speed_kmh());

    let calibrated = calibrated_duration_secs(distance_m);
    let duration = calibrated * base / predicted;

    SegmentMetrics {
        predicted_speed_kmh: predicted,
        base_speed_kmh:      base,
        road_type:           road,
        duration_secs:       duration,
        delay_secs:          (duration - calibrated).max(0.0),
        color:               color_for_ratio(predicted / base),
        incident,
    }
}
