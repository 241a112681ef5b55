//! Forward geocoding: convert a city name to a [`Location`].
//! Uses the Open-Meteo geocoding API - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::Location;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: Option<String>,
    country: Option<String>,
    admin1: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl GeocodingResult {
    fn into_location(self) -> Result<Location, WeatherError> {
        Ok(Location {
            name: self.name.ok_or_else(|| WeatherError::missing("results[0].name"))?,
            country: self
                .country
                .ok_or_else(|| WeatherError::missing("results[0].country"))?,
            region: self.admin1.unwrap_or_default(),
            latitude: self
                .latitude
                .ok_or_else(|| WeatherError::missing("results[0].latitude"))?,
            longitude: self
                .longitude
                .ok_or_else(|| WeatherError::missing("results[0].longitude"))?,
        })
    }
}

/// Resolves free-text city names against the geocoding endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve `city` to its single best match.
    ///
    /// The caller is expected to have rejected blank input already.
    #[instrument(skip(self), level = "info")]
    pub async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        let url = format!("{}/v1/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::LookupFailed(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!("Geocoding returned status {}", response.status());
            return Err(WeatherError::LookupFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        let first = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        let location = first.into_location()?;
        tracing::info!(
            "Geocoded {:?} to {} ({:.4}, {:.4})",
            city,
            location.display_name(),
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
