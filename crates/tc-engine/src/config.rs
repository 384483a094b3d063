//! TOML configuration.
//!
//! Every section and field is optional; an empty file is the default
//! configuration.
//!
//! ```toml
//! [providers]
//! routing_url   = "https://router.project-osrm.org"
//! geocoding_url = "https://nominatim.openstreetmap.org"
//! weather_url   = "https://api.open-meteo.com"
//! user_agent    = "trafcast/0.1"
//! country_codes = ["zw"]
//! timeout_secs  = 20
//!
//! [retry]
//! max_attempts  = 3
//! base_delay_ms = 1000
//!
//! [weights]
//! path = "corridor_weights.json"
//!
//! [corridors]
//! csv = "corridors.csv"        # built-in catalog when absent
//!
//! [ranking]
//! max_routes        = 3
//! departure_offsets = [0, 15, 30]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use tc_corridor::{CorridorCatalog, load_corridors_csv};
use tc_rank::{MAX_OFFSET_MINUTES, RankingOptions};
use tc_spatial::RetryPolicy;
use tc_spatial::osrm::DEFAULT_OSRM_URL;

use crate::geocode::DEFAULT_NOMINATIM_URL;
use crate::weather::DEFAULT_OPEN_METEO_URL;
use crate::{EngineError, EngineResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub providers: ProvidersConfig,
    pub retry:     RetryConfig,
    pub weights:   WeightsConfig,
    pub corridors: CorridorsConfig,
    pub ranking:   RankingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub routing_url:   String,
    pub geocoding_url: String,
    pub weather_url:   String,
    /// Sent with every request; Nominatim rejects anonymous clients.
    pub user_agent:    String,
    /// ISO 3166-1 alpha-2 codes that restrict geocoding results.
    pub country_codes: Vec<String>,
    pub timeout_secs:  u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            routing_url:   DEFAULT_OSRM_URL.to_owned(),
            geocoding_url: DEFAULT_NOMINATIM_URL.to_owned(),
            weather_url:   DEFAULT_OPEN_METEO_URL.to_owned(),
            user_agent:    concat!("trafcast/", env!("CARGO_PKG_VERSION")).to_owned(),
            country_codes: vec!["zw".to_owned()],
            timeout_secs:  20,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts:  u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3, base_delay_ms: 1_000 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    /// JSON weight blob; created on first training.
    pub path: PathBuf,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("corridor_weights.json") }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorsConfig {
    pub csv: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub max_routes:        usize,
    pub departure_offsets: Vec<i64>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        let defaults = RankingOptions::default();
        Self { max_routes: defaults.max_routes, departure_offsets: defaults.departure_offsets }
    }
}

impl EngineConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded engine configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        if self.retry.max_attempts == 0 {
            return Err(EngineError::Config("retry.max_attempts must be at least 1".into()));
        }
        if self.ranking.max_routes == 0 {
            return Err(EngineError::Config("ranking.max_routes must be at least 1".into()));
        }
        if self.ranking.departure_offsets.is_empty() {
            return Err(EngineError::Config("ranking.departure_offsets must not be empty".into()));
        }
        if let Some(bad) = self.ranking.departure_offsets.iter().find(|&&o| !(0..=MAX_OFFSET_MINUTES).contains(&o)) {
            return Err(EngineError::Config(format!(
                "ranking.departure_offsets: {bad} is outside 0..={MAX_OFFSET_MINUTES} minutes"
            )));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            base_delay:   Duration::from_millis(self.retry.base_delay_ms),
        }
    }

    pub fn ranking_options(&self) -> RankingOptions {
        let mut departure_offsets = self.ranking.departure_offsets.clone();
        departure_offsets.sort_unstable();
        departure_offsets.dedup();
        RankingOptions { max_routes: self.ranking.max_routes, departure_offsets }
    }

    /// The CSV catalog when one is configured, else the built-in one.
    pub fn catalog(&self) -> EngineResult<CorridorCatalog> {
        match &self.corridors.csv {
            Some(path) => Ok(load_corridors_csv(path)?),
            None => Ok(CorridorCatalog::builtin()),
        }
    }

    /// One HTTP client shared by all providers.
    pub fn http_client(&self) -> EngineResult<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(self.providers.user_agent.as_str())
            .timeout(Duration::from_secs(self.providers.timeout_secs))
            .build()?;
        Ok(client)
    }
}
