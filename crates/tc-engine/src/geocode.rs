//! Free-text place lookup.
//!
//! [`NominatimGeocoder`] asks for a single best match (`limit=1`),
//! restricted to the configured countries.  An empty query or an empty
//! result list is `Ok(None)`; only transport and payload problems are
//! errors.

use std::future::Future;

use serde::Deserialize;

use tc_core::GeoPoint;

use crate::{EngineError, EngineResult};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

const SERVICE: &str = "geocoding service";

/// Resolves a place name to a coordinate.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> impl Future<Output = EngineResult<Option<GeoPoint>>> + Send;
}

// ── Response payload ──────────────────────────────────────────────────────────

/// Nominatim reports coordinates as strings.
#[derive(Deserialize)]
pub(crate) struct Place {
    lat: String,
    lon: String,
}

pub(crate) fn decode_places(places: Vec<Place>) -> EngineResult<Option<GeoPoint>> {
    let Some(best) = places.into_iter().next() else {
        return Ok(None);
    };
    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().map_err(|e| EngineError::Decode {
            service: SERVICE,
            reason:  format!("{field} {value:?}: {e}"),
        })
    };
    Ok(Some(GeoPoint::new(parse("lat", &best.lat)?, parse("lon", &best.lon)?)))
}

// ── Client ────────────────────────────────────────────────────────────────────

/// [`Geocoder`] backed by a Nominatim server.
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client:        reqwest::Client,
    base_url:      String,
    country_codes: Vec<String>,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, country_codes: Vec<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url, country_codes }
    }

    /// The search request for `query`, with its parameters encoded.
    pub fn request_for(&self, query: &str) -> EngineResult<reqwest::Request> {
        let mut params = vec![("format", "json".to_owned()), ("q", query.to_owned()), ("limit", "1".to_owned())];
        if !self.country_codes.is_empty() {
            params.push(("countrycodes", self.country_codes.join(",")));
        }
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .build()?;
        Ok(request)
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> EngineResult<Option<GeoPoint>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let request = self.request_for(query)?;
        log::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Status { service: SERVICE, code: status.as_u16() });
        }
        let text = response.text().await?;
        let places: Vec<Place> = serde_json::from_str(&text)
            .map_err(|e| EngineError::Decode { service: SERVICE, reason: e.to_string() })?;
        decode_places(places)
    }
}
