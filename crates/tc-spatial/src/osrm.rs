//! OSRM HTTP client.
//!
//! Issues `GET {base}/route/v1/driving/{coords}` with GeoJSON geometries and
//! step breakdowns, and converts the response into [`CandidateRoute`]s.
//! OSRM's `NoRoute` answer (which arrives with HTTP 400) maps to an empty
//! route list rather than an error.

use serde::Deserialize;

use tc_core::GeoPoint;

use crate::provider::{RouteProvider, RouteRequest};
use crate::route::{CandidateRoute, Leg, Step};
use crate::{SpatialError, SpatialResult};

/// Public demo server; fine for development, rate-limited in practice.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

// ── Response payload ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(crate) struct OsrmRouteResponse {
    pub(crate) code:    String,
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) routes:  Vec<OsrmRoute>,
}

#[derive(Deserialize)]
pub(crate) struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs:     Vec<OsrmLeg>,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    name:     Option<String>,
    #[serde(rename = "ref", default)]
    road_ref: Option<String>,
}

impl From<OsrmGeometry> for Vec<GeoPoint> {
    fn from(g: OsrmGeometry) -> Self {
        g.coordinates.into_iter().map(GeoPoint::from_lon_lat).collect()
    }
}

impl From<OsrmRoute> for CandidateRoute {
    fn from(r: OsrmRoute) -> Self {
        let legs = r
            .legs
            .into_iter()
            .map(|leg| Leg {
                steps: leg
                    .steps
                    .into_iter()
                    .map(|s| Step {
                        distance_m:    s.distance,
                        duration_secs: s.duration,
                        geometry:      s.geometry.into(),
                        name:          s.name,
                        road_ref:      s.road_ref,
                    })
                    .collect(),
            })
            .collect();

        CandidateRoute {
            geometry:      r.geometry.into(),
            legs,
            distance_m:    r.distance,
            duration_secs: r.duration,
        }
    }
}

/// Convert a decoded payload into routes, honouring OSRM's status codes.
pub(crate) fn decode_response(body: OsrmRouteResponse) -> SpatialResult<Vec<CandidateRoute>> {
    match body.code.as_str() {
        "Ok" => Ok(body.routes.into_iter().map(CandidateRoute::from).collect()),
        "NoRoute" | "NoSegment" => Ok(vec![]),
        other => Err(SpatialError::Provider(
            body.message.unwrap_or_else(|| other.to_owned()),
        )),
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

/// [`RouteProvider`] backed by an OSRM server.
#[derive(Clone, Debug)]
pub struct OsrmClient {
    client:   reqwest::Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// Full request URL for `request`.
    pub fn url_for(&self, request: &RouteRequest) -> String {
        let mut coords = vec![request.origin];
        coords.extend(request.via);
        coords.push(request.destination);
        let coords = coords
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lon, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/driving/{coords}?overview=full&geometries=geojson&steps=true&alternatives={}",
            self.base_url, request.alternatives,
        )
    }
}

impl RouteProvider for OsrmClient {
    async fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>> {
        let url = self.url_for(request);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // NoRoute comes back as a 400 with a well-formed body.
            if let Ok(body) = serde_json::from_str::<OsrmRouteResponse>(&text) {
                if matches!(body.code.as_str(), "NoRoute" | "NoSegment") {
                    return Ok(vec![]);
                }
            }
            return Err(SpatialError::Status { code: status.as_u16() });
        }

        decode_response(serde_json::from_str(&text)?)
    }
}
