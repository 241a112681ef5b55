use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::WeatherError;
use crate::geocode::{Geocoder, DEFAULT_GEOCODING_URL};
use crate::normalize::{normalize, RawForecast};
use crate::types::{Location, WeatherView};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
precipitation,weather_code,cloud_cover,wind_speed_10m,wind_direction_10m";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";
const FORECAST_DAYS: &str = "7";

/// Endpoints and transport settings for [`WeatherProvider`]
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fetches and normalizes weather for a city.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    geocoder: Geocoder,
    forecast_url: String,
}

impl WeatherProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| WeatherError::LookupFailed(e.to_string()))?;

        Ok(Self {
            geocoder: Geocoder::new(client.clone(), &settings.geocoding_url),
            client: Arc::new(client),
            forecast_url: settings.forecast_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to a location.
    pub async fn resolve(&self, city: &str) -> Result<Location, WeatherError> {
        self.geocoder.resolve(city).await
    }

    /// Fetch the raw forecast for a coordinate pair.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<RawForecast, WeatherError> {
        let url = format!("{}/v1/forecast", self.forecast_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("wind_speed_unit", "ms"),
                ("timezone", "auto"),
                ("forecast_days", FORECAST_DAYS),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::ForecastFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!("Forecast returned status {}", response.status());
            return Err(WeatherError::ForecastFetchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json::<RawForecast>()
            .await
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))
    }

    /// Resolve `city`, fetch its forecast and normalize it.
    pub async fn fetch_complete(&self, city: &str) -> Result<WeatherView, WeatherError> {
        let location = self.resolve(city).await?;
        let raw = self
            .fetch_forecast(location.latitude, location.longitude)
            .await?;
        let view = normalize(&raw, location)?;
        tracing::info!("Weather data received for {}", view.location.name);
        Ok(view)
    }
}
