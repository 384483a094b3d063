//! The `RouteEngine` facade.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;

use tc_core::{DepartureTime, GeoPoint, Weather};
use tc_corridor::{CorridorWeight, WeightLearner, WeightStore};
use tc_rank::{RankedRoute, RankingPipeline, RankingQuery, RoadCondition};
use tc_spatial::{AlternativeDiscoverer, OsrmClient, RouteProvider};

use crate::{EngineBuilder, EngineConfig, EngineResult, Geocoder, NominatimGeocoder, OpenMeteoClient, WeatherProvider};

/// Everything a route search returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Best first; empty when no route could be found.
    pub routes:          Vec<RankedRoute>,
    /// `None` when the weather service was unavailable.
    pub weather:         Option<Weather>,
    /// Per-road conditions of the best route, departing now.
    pub road_conditions: Vec<RoadCondition>,
}

// ── RouteEngine ───────────────────────────────────────────────────────────────

/// Route search, feedback training and geocoding behind one handle.
///
/// A search runs discovery and the weather lookup concurrently, then ranks
/// against a snapshot of the learned weights:
///
/// ```text
/// ┌ discover(origin, destination) ┐
/// │                               ├─► rank(routes, weights, weather) ─► RouteResponse
/// └ weather(origin)               ┘
/// ```
///
/// Upstream failures never surface to the caller: a failed discovery is an
/// empty route list, a failed weather lookup is `weather: None`, a failed
/// geocode is `None`.  Each is logged at `warn`.
///
/// Create via [`EngineBuilder`], or [`RouteEngine::from_config`] for the
/// HTTP providers.
pub struct RouteEngine<P, W, G, S>
where
    P: RouteProvider,
    W: WeatherProvider,
    G: Geocoder,
    S: WeightStore + 'static,
{
    pub(crate) discoverer: AlternativeDiscoverer<P>,
    pub(crate) weather:    W,
    pub(crate) geocoder:   G,
    pub(crate) pipeline:   RankingPipeline,
    pub(crate) learner:    Arc<WeightLearner<S>>,
}

/// An engine wired to OSRM, Open-Meteo and Nominatim.
pub type HttpRouteEngine<S> = RouteEngine<OsrmClient, OpenMeteoClient, NominatimGeocoder, S>;

impl<S: WeightStore + 'static> HttpRouteEngine<S> {
    /// Build the HTTP providers, corridor catalog, ranking options and retry
    /// policy from `config`.
    pub fn from_config(config: &EngineConfig, store: S) -> EngineResult<Self> {
        config.validate()?;
        let client = config.http_client()?;
        let providers = &config.providers;

        EngineBuilder::new(
            OsrmClient::new(client.clone(), providers.routing_url.as_str()),
            OpenMeteoClient::new(client.clone(), providers.weather_url.as_str()),
            NominatimGeocoder::new(client, providers.geocoding_url.as_str(), providers.country_codes.clone()),
            store,
        )
        .catalog(config.catalog()?)
        .options(config.ranking_options())
        .retry(config.retry_policy())
        .build()
    }
}

impl<P, W, G, S> RouteEngine<P, W, G, S>
where
    P: RouteProvider,
    W: WeatherProvider,
    G: Geocoder,
    S: WeightStore + 'static,
{
    /// Search departing now.  See [`get_route_at`](Self::get_route_at).
    pub async fn get_route(
        &self,
        origin:           GeoPoint,
        destination:      GeoPoint,
        origin_name:      Option<&str>,
        destination_name: Option<&str>,
    ) -> RouteResponse {
        self.get_route_at(DepartureTime::now(), origin, destination, origin_name, destination_name)
            .await
    }

    /// Discover, rank and annotate routes for a search made at `at`.  The
    /// place names, when both are given, select a known corridor.
    pub async fn get_route_at(
        &self,
        at:               DepartureTime,
        origin:           GeoPoint,
        destination:      GeoPoint,
        origin_name:      Option<&str>,
        destination_name: Option<&str>,
    ) -> RouteResponse {
        let (routes, weather) = tokio::join!(
            self.discoverer.discover(origin, destination),
            self.weather.current(origin),
        );

        let routes = routes.unwrap_or_else(|e| {
            log::warn!("route discovery {origin} → {destination} failed: {e}");
            Vec::new()
        });
        let weather = weather
            .inspect_err(|e| log::warn!("weather lookup at {origin} failed: {e}"))
            .ok();

        let weights = self.learner.snapshot();
        let query = RankingQuery::at(at)
            .with_weather(weather.as_ref())
            .with_names(origin_name, destination_name);
        let outcome = self.pipeline.rank(routes, &weights, &query);

        RouteResponse { routes: outcome.routes, weather, road_conditions: outcome.road_conditions }
    }

    /// Fold an observed trip into the weight of `corridor_route` on the
    /// blocking pool.  The update and persist complete even if the handle
    /// is dropped; awaiting it yields the new weight.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn train_model_off_feedback(
        &self,
        corridor_route:    &str,
        predicted_minutes: f64,
        actual_minutes:    f64,
    ) -> JoinHandle<Option<CorridorWeight>> {
        let learner = Arc::clone(&self.learner);
        let name = corridor_route.to_owned();
        tokio::task::spawn_blocking(move || learner.train(&name, predicted_minutes, actual_minutes))
    }

    /// Best match for a free-text place, or `None`.
    pub async fn geocode(&self, query: &str) -> Option<GeoPoint> {
        self.geocoder
            .geocode(query)
            .await
            .inspect_err(|e| log::warn!("geocoding {query:?} failed: {e}"))
            .ok()
            .flatten()
    }

    /// `"lat,lon"` as a coordinate, anything else through the geocoder.
    pub async fn resolve(&self, place: &str) -> Option<GeoPoint> {
        match place.parse::<GeoPoint>() {
            Ok(point) => Some(point),
            Err(_) => self.geocode(place).await,
        }
    }

    pub fn pipeline(&self) -> &RankingPipeline {
        &self.pipeline
    }

    pub fn learner(&self) -> &WeightLearner<S> {
        &self.learner
    }
}
