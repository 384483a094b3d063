//! `tc-engine` — the route engine's public surface.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`engine`]  | `RouteEngine`: `get_route`, `train_model_off_feedback`, `geocode` |
//! | [`builder`] | `EngineBuilder`                                            |
//! | [`config`]  | `EngineConfig` (TOML)                                      |
//! | [`weather`] | `WeatherProvider` trait, `OpenMeteoClient`                 |
//! | [`geocode`] | `Geocoder` trait, `NominatimGeocoder`                      |
//! | [`error`]   | `EngineError`, `EngineResult<T>`                           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_corridor::JsonFileWeightStore;
//! use tc_engine::{EngineConfig, HttpRouteEngine};
//!
//! let config = EngineConfig::default();
//! let store = JsonFileWeightStore::open(&config.weights.path)?;
//! let engine = HttpRouteEngine::from_config(&config, store)?;
//! let response = engine.get_route(origin, destination, Some("NUST"), Some("City Hall")).await;
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod weather;


pub use builder::EngineBuilder;
pub use config::EngineConfig;
pub use engine::{HttpRouteEngine, RouteEngine, RouteResponse};
pub use error::{EngineError, EngineResult};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use weather::{OpenMeteoClient, WeatherProvider};
