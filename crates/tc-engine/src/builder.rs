//! Fluent builder for constructing a [`RouteEngine`].

use std::sync::Arc;

use tc_corridor::{CorridorCatalog, WeightLearner, WeightStore};
use tc_rank::{MAX_OFFSET_MINUTES, RankingOptions, RankingPipeline};
use tc_spatial::{AlternativeDiscoverer, RetryPolicy, RouteProvider};

use crate::{EngineError, EngineResult, Geocoder, RouteEngine, WeatherProvider};

/// Fluent builder for [`RouteEngine<P, W, G, S>`].
///
/// # Required inputs
///
/// - `P: RouteProvider`: the routing service (e.g. [`tc_spatial::OsrmClient`])
/// - `W: WeatherProvider`: current weather at the origin
/// - `G: Geocoder`: place-name lookup
/// - `S: WeightStore`: where learned corridor weights live
///
/// # Optional inputs
///
/// | Method        | Default                       |
/// |---------------|-------------------------------|
/// | `.catalog(c)` | `CorridorCatalog::builtin()`  |
/// | `.options(o)` | 3 routes, offsets 0/15/30     |
/// | `.retry(r)`   | 3 attempts, 1 s base back-off |
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new(osrm, open_meteo, nominatim, store)
///     .retry(RetryPolicy::none())
///     .build()?;
/// let response = engine.get_route(origin, destination, None, None).await;
/// ```
pub struct EngineBuilder<P, W, G, S> {
    provider: P,
    weather:  W,
    geocoder: G,
    store:    S,
    catalog:  Option<CorridorCatalog>,
    options:  Option<RankingOptions>,
    retry:    Option<RetryPolicy>,
}

impl<P, W, G, S> EngineBuilder<P, W, G, S>
where
    P: RouteProvider,
    W: WeatherProvider,
    G: Geocoder,
    S: WeightStore + 'static,
{
    pub fn new(provider: P, weather: W, geocoder: G, store: S) -> Self {
        Self {
            provider,
            weather,
            geocoder,
            store,
            catalog: None,
            options: None,
            retry:   None,
        }
    }

    pub fn catalog(mut self, catalog: CorridorCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn options(mut self, options: RankingOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Retry policy for the primary routing request.  Waypoint probes are
    /// never retried.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Validate the options and return a ready engine.
    pub fn build(self) -> EngineResult<RouteEngine<P, W, G, S>> {
        let options = self.options.unwrap_or_default();
        if options.max_routes == 0 {
            return Err(EngineError::Config("max_routes must be at least 1".into()));
        }
        if options.departure_offsets.is_empty() {
            return Err(EngineError::Config("at least one departure offset is required".into()));
        }
        if let Some(bad) = options.departure_offsets.iter().find(|&&o| !(0..=MAX_OFFSET_MINUTES).contains(&o)) {
            return Err(EngineError::Config(format!(
                "departure offset {bad} is outside 0..={MAX_OFFSET_MINUTES} minutes"
            )));
        }

        let catalog = self.catalog.unwrap_or_else(CorridorCatalog::builtin);
        log::debug!(
            "engine ready: {} corridor(s), up to {} route(s), offsets {:?}",
            catalog.len(),
            options.max_routes,
            options.departure_offsets,
        );

        Ok(RouteEngine {
            discoverer: AlternativeDiscoverer::new(self.provider)
                .with_retry(self.retry.unwrap_or_default()),
            weather:    self.weather,
            geocoder:   self.geocoder,
            pipeline:   RankingPipeline::new(catalog, options),
            learner:    Arc::new(WeightLearner::new(self.store)),
        })
    }
}
