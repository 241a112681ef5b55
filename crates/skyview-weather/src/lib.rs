//! Weather pipeline for SkyView
//!
//! Resolves city names via the Open-Meteo geocoding API, fetches forecasts
//! and normalizes them into a display-ready [`WeatherView`].

pub mod condition;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod provider;
pub mod types;

pub use condition::{code_to_text, condition_description, text_to_icon_category, IconCategory};
pub use error::WeatherError;
pub use geocode::Geocoder;
pub use normalize::{normalize, RawForecast};
pub use provider::{ProviderSettings, WeatherProvider};
pub use types::*;
