//! Route scoring.  Lower is better.
//!
//! `score = Σ step delay + calibrated(route distance) + weather penalty`
//!
//! Step delays are computed for clear weather: weather enters the score
//! once, through the flat penalty.

use tc_core::{DepartureTime, Weather, WeatherTier};
use tc_spatial::CandidateRoute;

use crate::segment::{calibrated_duration_secs, predict_segment};

/// Flat penalty per weather tier, seconds.
pub fn weather_penalty_secs(tier: WeatherTier) -> f64 {
    match tier {
        WeatherTier::Clear   => 0.0,
        WeatherTier::Drizzle => 40.0,
        WeatherTier::Rain    => 120.0,
        WeatherTier::Storm   => 300.0,
    }
}

/// Score `route` for a departure `offset_minutes` after `at`.  A route
/// without a step breakdown is scored as one step.
pub fn score_route(
    route:          &CandidateRoute,
    weather:        Option<&Weather>,
    at:             DepartureTime,
    offset_minutes: i64,
) -> f64 {
    let delay: f64 = route
        .steps_or_whole()
        .iter()
        .map(|s| predict_segment(s.distance_m, s.duration_secs, None, at, offset_minutes).delay_secs)
        .sum();

    delay
        + calibrated_duration_secs(route.distance_m)
        + weather_penalty_secs(WeatherTier::classify(weather))
}
