//! Current-weather observation and its severity tier.
//!
//! Codes follow the WMO weather-interpretation table used by Open-Meteo:
//! 0 clear, 1–3 cloud, 51–55 drizzle, 61–65 rain, 80–82 showers, 95+
//! thunderstorm.

use serde::{Deserialize, Serialize};

/// A point-in-time weather observation at the trip origin.
///
/// Every field except `code` defaults to zero so partial observations
/// (`{"code": 96}`) deserialize cleanly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    /// Air temperature at 2 m, °C.
    pub temperature_c: f64,
    /// Total precipitation over the last hour, mm.
    pub precipitation_mm: f64,
    /// Rain component of precipitation, mm.
    pub rain_mm: f64,
    /// WMO weather code.
    pub code: u16,
    /// Wind speed at 10 m, km/h.
    pub wind_kmh: f64,
    /// `Some(true)` during daylight, when the provider reports it.
    pub is_day: Option<bool>,
}

impl Weather {
    /// Observation carrying only a weather code.
    pub fn from_code(code: u16) -> Self {
        Self { code, ..Self::default() }
    }
}

/// Driving-relevant severity derived from a weather code and rainfall.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherTier {
    #[default]
    Clear,
    Drizzle,
    Rain,
    Storm,
}

impl WeatherTier {
    /// Classify an optional observation.  No observation counts as clear.
    pub fn classify(weather: Option<&Weather>) -> Self {
        let Some(w) = weather else {
            return WeatherTier::Clear;
        };
        if w.code >= 95 {
            WeatherTier::Storm
        } else if w.code >= 61 || w.rain_mm > 2.0 {
            WeatherTier::Rain
        } else if w.code >= 51 || w.rain_mm > 0.5 {
            WeatherTier::Drizzle
        } else {
            WeatherTier::Clear
        }
    }

    /// Column index into per-road-type weather tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeatherTier::Clear   => "clear",
            WeatherTier::Drizzle => "drizzle",
            WeatherTier::Rain    => "rain",
            WeatherTier::Storm   => "storm",
        }
    }
}

impl std::fmt::Display for WeatherTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
