//! The ranking pipeline.
//!
//! # Stages
//!
//! ```text
//! raw routes ─► score (offset 0) ─► corridor match + learned weight ─► sort
//!            ─► keep max_routes ─► buckets per offset ─► label + reason
//!            ─► road conditions of the top route at offset 0
//! ```
//!
//! Scores ignore weather speed effects (weather enters as a flat penalty);
//! buckets and road conditions apply them.  See `tc_traffic::score`.

use std::collections::BTreeMap;

use tc_core::{DepartureTime, SeverityColor, Weather, WeatherTier};
use tc_corridor::learner::adjust_score;
use tc_corridor::{Corridor, CorridorCatalog, WeightTable};
use tc_spatial::CandidateRoute;
use tc_traffic::{predict_segment, score_route};

use crate::conditions::{RoadCondition, road_conditions};
use crate::ranked::{ColoredSegment, PredictionBucket, RankedRoute, UiLabel, distance_km, format_duration};

/// Departure offsets bucketed for every ranked route.
pub const DEFAULT_OFFSETS: [i64; 3] = [0, 15, 30];
pub const DEFAULT_MAX_ROUTES: usize = 3;
/// Latest departure offset worth forecasting: one day ahead.
pub const MAX_OFFSET_MINUTES: i64 = 1_440;

const PEAK_SUFFIX: &str = " (peak)";
const WEATHER_SUFFIX: &str = " · weather delays";

/// Tunables of the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingOptions {
    pub max_routes:        usize,
    pub departure_offsets: Vec<i64>,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self { max_routes: DEFAULT_MAX_ROUTES, departure_offsets: DEFAULT_OFFSETS.to_vec() }
    }
}

/// Per-request inputs besides the routes themselves.
#[derive(Copy, Clone, Debug)]
pub struct RankingQuery<'a> {
    pub at:               DepartureTime,
    pub weather:          Option<&'a Weather>,
    pub origin_name:      Option<&'a str>,
    pub destination_name: Option<&'a str>,
}

impl<'a> RankingQuery<'a> {
    /// A query with no weather and no place names.
    pub fn at(at: DepartureTime) -> Self {
        Self { at, weather: None, origin_name: None, destination_name: None }
    }

    pub fn with_weather(mut self, weather: Option<&'a Weather>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_names(mut self, origin: Option<&'a str>, destination: Option<&'a str>) -> Self {
        self.origin_name = origin;
        self.destination_name = destination;
        self
    }
}

/// Ranked routes plus the road conditions of the best one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankingOutcome {
    pub routes:          Vec<RankedRoute>,
    pub road_conditions: Vec<RoadCondition>,
}

/// Scores, orders and annotates candidate routes.
#[derive(Clone, Debug, Default)]
pub struct RankingPipeline {
    catalog: CorridorCatalog,
    options: RankingOptions,
}

impl RankingPipeline {
    pub fn new(catalog: CorridorCatalog, options: RankingOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &CorridorCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &RankingOptions {
        &self.options
    }

    /// Rank `raw_routes` for `query`, using `weights` as the learned table.
    /// An empty input gives an empty outcome.
    pub fn rank(
        &self,
        raw_routes: Vec<CandidateRoute>,
        weights:    &WeightTable,
        query:      &RankingQuery<'_>,
    ) -> RankingOutcome {
        let corridor = self.find_corridor(query);

        struct Scored {
            route:          CandidateRoute,
            raw_score:      f64,
            score:          f64,
            confidence_pct: u8,
            corridor_route: Option<String>,
        }

        let mut scored: Vec<Scored> = raw_routes
            .into_iter()
            .map(|route| {
                let raw_score = score_route(&route, query.weather, query.at, 0);
                let road_names = route.road_names();
                let corridor_route = corridor
                    .and_then(|c| c.match_route(&road_names))
                    .map(|r| r.name.clone());
                let adj = adjust_score(weights, &road_names, raw_score, corridor_route.as_deref());
                Scored {
                    route,
                    raw_score,
                    score: adj.score,
                    confidence_pct: adj.confidence_pct,
                    corridor_route,
                }
            })
            .collect();

        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored.truncate(self.options.max_routes);

        let peak = corridor.is_some_and(|c| c.is_in_peak_hours(query.at));
        let wet = WeatherTier::classify(query.weather) > WeatherTier::Clear;

        let routes: Vec<RankedRoute> = scored
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let label = UiLabel::for_rank(i);
                let predictions = self.predict(&s.route, query.weather, query.at);
                let mut reason = label.reason().to_owned();
                if peak {
                    reason.push_str(PEAK_SUFFIX);
                }
                if wet {
                    reason.push_str(WEATHER_SUFFIX);
                }
                RankedRoute {
                    distance_km: distance_km(s.route.distance_m),
                    route: s.route,
                    ui_label: label,
                    ui_color: label.color(),
                    ui_reason: reason,
                    corridor_route: s.corridor_route,
                    score: s.score,
                    raw_score: s.raw_score,
                    confidence_pct: s.confidence_pct,
                    predictions,
                }
            })
            .collect();

        let road_conditions = routes
            .first()
            .map(|top| road_conditions(&top.route, query.weather, query.at, 0))
            .unwrap_or_default();

        if let Some(top) = routes.first() {
            log::debug!(
                "ranked {} route(s); best {:.0} s ({}), corridor route {:?}",
                routes.len(),
                top.score,
                top.ui_reason,
                top.corridor_route,
            );
        }

        RankingOutcome { routes, road_conditions }
    }

    fn find_corridor(&self, query: &RankingQuery<'_>) -> Option<&Corridor> {
        match (query.origin_name, query.destination_name) {
            (Some(o), Some(d)) => self.catalog.find_corridor(o, d),
            _ => None,
        }
    }

    fn predict(
        &self,
        route:   &CandidateRoute,
        weather: Option<&Weather>,
        at:      DepartureTime,
    ) -> BTreeMap<i64, PredictionBucket> {
        self.options
            .departure_offsets
            .iter()
            .map(|&offset| (offset, predict_at(route, weather, at, offset)))
            .collect()
    }
}

/// Forecast `route` departing `offset_minutes` after `at`.
pub fn predict_at(
    route:          &CandidateRoute,
    weather:        Option<&Weather>,
    at:             DepartureTime,
    offset_minutes: i64,
) -> PredictionBucket {
    let mut duration_secs = 0.0;
    let segments: Vec<ColoredSegment> = route
        .steps_or_whole()
        .iter()
        .map(|step| {
            let m = predict_segment(step.distance_m, step.duration_secs, weather, at, offset_minutes);
            duration_secs += m.duration_secs;
            ColoredSegment {
                geometry:  step.geometry.clone(),
                color:     m.color,
                road_name: step.road_name().map(str::to_owned),
                incident:  m.incident_label(),
            }
        })
        .collect();

    PredictionBucket {
        offset_minutes,
        duration_secs,
        formatted_duration: format_duration(duration_secs),
        color: segments.first().map_or(SeverityColor::Neutral, |s| s.color),
        segments,
    }
}
