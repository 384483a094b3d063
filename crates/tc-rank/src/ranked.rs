//! Output types of the ranking pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

use tc_core::{GeoPoint, SeverityColor};
use tc_spatial::CandidateRoute;

/// Position label of a ranked route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UiLabel {
    Best,
    Alt,
    Slow,
}

impl UiLabel {
    /// Label for rank `index` (0 = best).  Anything past 2 is `Slow`.
    pub fn for_rank(index: usize) -> Self {
        match index {
            0 => UiLabel::Best,
            1 => UiLabel::Alt,
            _ => UiLabel::Slow,
        }
    }

    pub fn color(self) -> SeverityColor {
        match self {
            UiLabel::Best => SeverityColor::Clear,
            UiLabel::Alt  => SeverityColor::Moderate,
            UiLabel::Slow => SeverityColor::Heavy,
        }
    }

    /// First word of the route's reason line.
    pub fn reason(self) -> &'static str {
        match self {
            UiLabel::Best => "Fastest",
            UiLabel::Alt  => "Alternative",
            UiLabel::Slow => "Slower",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UiLabel::Best => "BEST",
            UiLabel::Alt  => "ALT",
            UiLabel::Slow => "SLOW",
        }
    }
}

impl std::fmt::Display for UiLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One step of a route drawn in its predicted color.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoredSegment {
    pub geometry: Vec<GeoPoint>,
    pub color: SeverityColor,
    pub road_name: Option<String>,
    pub incident: Option<&'static str>,
}

/// A route's forecast for one departure offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBucket {
    pub offset_minutes: i64,
    pub duration_secs: f64,
    pub formatted_duration: String,
    pub segments: Vec<ColoredSegment>,
    /// Color of the first segment; `Neutral` when there are none.
    pub color: SeverityColor,
}

/// A candidate route with everything the caller shows about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRoute {
    pub route: CandidateRoute,
    pub ui_label: UiLabel,
    pub ui_color: SeverityColor,
    pub ui_reason: String,
    /// Known corridor route this path was matched to, e.g. "via Cecil Ave".
    pub corridor_route: Option<String>,
    /// Score after learned weights and bottleneck penalties; lower is better.
    pub score: f64,
    /// Score before adjustment.
    pub raw_score: f64,
    pub confidence_pct: u8,
    pub distance_km: f64,
    /// Keyed by departure offset in minutes.
    pub predictions: BTreeMap<i64, PredictionBucket>,
}

impl RankedRoute {
    pub fn prediction(&self, offset_minutes: i64) -> Option<&PredictionBucket> {
        self.predictions.get(&offset_minutes)
    }
}

/// "7 min", or "1h 5m" past the hour.
pub fn format_duration(secs: f64) -> String {
    let minutes = (secs.max(0.0) / 60.0).round() as u64;
    if minutes > 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

/// Metres to kilometres, one decimal.
pub fn distance_km(distance_m: f64) -> f64 {
    (distance_m / 100.0).round() / 10.0
}
