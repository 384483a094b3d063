//! Current-weather seam and the Open-Meteo client.

use std::future::Future;

use serde::Deserialize;

use tc_core::{GeoPoint, Weather};

use crate::{EngineError, EngineResult};

pub const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com";

const SERVICE: &str = "weather service";
const CURRENT_FIELDS: &str = "temperature_2m,precipitation,rain,weather_code,wind_speed_10m,is_day";

/// Source of the current weather at a point.
pub trait WeatherProvider: Send + Sync {
    fn current(&self, at: GeoPoint) -> impl Future<Output = EngineResult<Weather>> + Send;
}

// ── Response payload ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Deserialize)]
struct CurrentBlock {
    #[serde(default)]
    temperature_2m: f64,
    #[serde(default)]
    precipitation:  f64,
    #[serde(default)]
    rain:           f64,
    #[serde(default)]
    weather_code:   u16,
    #[serde(default)]
    wind_speed_10m: f64,
    is_day:         Option<u8>,
}

pub(crate) fn decode_forecast(body: ForecastResponse) -> EngineResult<Weather> {
    let current = body.current.ok_or_else(|| EngineError::Decode {
        service: SERVICE,
        reason:  "no `current` block".into(),
    })?;
    Ok(Weather {
        temperature_c:    current.temperature_2m,
        precipitation_mm: current.precipitation,
        rain_mm:          current.rain,
        code:             current.weather_code,
        wind_kmh:         current.wind_speed_10m,
        is_day:           current.is_day.map(|d| d != 0),
    })
}

// ── Client ────────────────────────────────────────────────────────────────────

/// [`WeatherProvider`] backed by the Open-Meteo forecast API.
#[derive(Clone, Debug)]
pub struct OpenMeteoClient {
    client:   reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn url_for(&self, at: GeoPoint) -> String {
        format!(
            "{}/v1/forecast?latitude={:.5}&longitude={:.5}&current={CURRENT_FIELDS}&forecast_days=1",
            self.base_url, at.lat, at.lon,
        )
    }
}

impl WeatherProvider for OpenMeteoClient {
    async fn current(&self, at: GeoPoint) -> EngineResult<Weather> {
        let url = self.url_for(at);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status { service: SERVICE, code: status.as_u16() });
        }
        let text = response.text().await?;
        let body: ForecastResponse = serde_json::from_str(&text)
            .map_err(|e| EngineError::Decode { service: SERVICE, reason: e.to_string() })?;
        decode_forecast(body)
    }
}
