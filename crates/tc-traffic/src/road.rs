//! Road classes inferred from free-flow speed.
//!
//! The provider does not say what kind of road a step runs on, so the class
//! is read off the step's free-flow speed with a fixed threshold ladder.
//! Every per-class constant of the speed model lives here.

use serde::{Deserialize, Serialize};

use tc_core::WeatherTier;

/// Road class, fastest first.  The derived ordering follows the ladder.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadType {
    /// ≥ 80 km/h.
    Highway,
    /// ≥ 50 km/h.
    Main,
    /// ≥ 30 km/h.
    Local,
    /// Everything slower.
    Narrow,
}

impl RoadType {
    pub const HIGHWAY_MIN_KMH: f64 = 80.0;
    pub const MAIN_MIN_KMH: f64 = 50.0;
    pub const LOCAL_MIN_KMH: f64 = 30.0;

    /// Classify a free-flow speed in km/h.
    pub fn classify(speed_kmh: f64) -> Self {
        if speed_kmh >= Self::HIGHWAY_MIN_KMH {
            RoadType::Highway
        } else if speed_kmh >= Self::MAIN_MIN_KMH {
            RoadType::Main
        } else if speed_kmh >= Self::LOCAL_MIN_KMH {
            RoadType::Local
        } else {
            RoadType::Narrow
        }
    }

    /// Share of free-flow speed lost at full congestion.
    pub fn sensitivity(self) -> f64 {
        match self {
            RoadType::Highway => 0.4,
            RoadType::Main    => 0.6,
            RoadType::Local | RoadType::Narrow => 0.7,
        }
    }

    /// Predicted speed never drops below this, km/h.
    pub fn floor_speed_kmh(self) -> f64 {
        match self {
            RoadType::Highway => 20.0,
            RoadType::Main    => 10.0,
            RoadType::Local | RoadType::Narrow => 5.0,
        }
    }

    /// Speed multiplier for a weather tier.  Highways degrade least.
    pub fn weather_multiplier(self, tier: WeatherTier) -> f64 {
        const MATRIX: [[f64; 4]; 4] = [
            // clear drizzle rain  storm
            [1.0, 0.95, 0.85, 0.70], // highway
            [1.0, 0.90, 0.80, 0.60], // main
            [1.0, 0.90, 0.75, 0.50], // local
            [1.0, 0.85, 0.65, 0.40], // narrow
        ];
        MATRIX[self as usize][tier.index()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadType::Highway => "highway",
            RoadType::Main    => "main",
            RoadType::Local   => "local",
            RoadType::Narrow  => "narrow",
        }
    }
}

impl std::fmt::Display for RoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
