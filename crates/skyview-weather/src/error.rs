//! Weather pipeline error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    /// Geocoder returned no match; carries the query as typed.
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Location lookup failed: {0}")]
    LookupFailed(String),

    #[error("Forecast request failed: {0}")]
    ForecastFetchFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::CityNotFound(city) => {
                format!("City \"{}\" not found. Try another city name.", city)
            }
            Self::LookupFailed(_) => {
                "Location lookup failed. Check your connection and try again.".to_string()
            }
            Self::ForecastFetchFailed(_) => {
                "Failed to fetch weather data. Please try again.".to_string()
            }
            Self::MalformedResponse(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
        }
    }

    /// Whether the user can fix this by changing their query.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::CityNotFound(_))
    }

    pub(crate) fn missing(field: &str) -> Self {
        Self::MalformedResponse(format!("missing field `{}`", field))
    }
}
