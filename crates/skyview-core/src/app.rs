use std::sync::Arc;

use skyview_weather::{WeatherError, WeatherProvider, WeatherView};
use tokio::sync::mpsc::UnboundedSender;

use crate::{AppError, Config, ConfigError, Dashboard};

/// Result of a spawned fetch, delivered back to the loop that owns the [`Dashboard`]
#[derive(Debug)]
pub struct FetchDone {
    pub request_id: u64,
    pub city: String,
    pub result: Result<WeatherView, AppError>,
}

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    provider: Arc<WeatherProvider>,
    dashboard: Dashboard,
    next_request: u64,
}

impl App {
    /// Create a new application instance from a loaded config
    pub fn new(config: Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let provider = WeatherProvider::new(config.weather.provider_settings())?;

        Ok(Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
            dashboard: Dashboard::new(),
            next_request: 0,
        })
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Try each configured startup city once, in order, keeping the first that loads.
    ///
    /// If every city fails the view is cleared and the last failure returned.
    pub async fn load_startup(&mut self) -> Result<(), AppError> {
        let cities = self.config.weather.default_cities.clone();
        tracing::info!("Loading startup weather, {} candidate cities", cities.len());

        match first_available(&self.provider, &cities).await {
            Ok(view) => {
                self.dashboard.show(view);
                Ok(())
            }
            Err(e) => {
                tracing::error!("All startup cities failed: {}", e);
                self.dashboard.clear(&e);
                Err(e)
            }
        }
    }

    /// User-initiated search. No retry; a failure leaves the current view in place.
    pub async fn search(&mut self, city: &str) -> Result<(), AppError> {
        match fetch_city(&self.provider, city).await {
            Ok(view) => {
                self.dashboard.show(view);
                Ok(())
            }
            Err(e) => {
                self.dashboard.fail(&e);
                Err(e)
            }
        }
    }

    /// Start a search in the background and report it on `tx` when done.
    ///
    /// In-flight requests are never cancelled; whichever completes last is
    /// applied last. Returns the request id.
    pub fn request_fetch(&mut self, tx: &UnboundedSender<FetchDone>, city: &str) -> u64 {
        self.next_request += 1;
        let request_id = self.next_request;
        let provider = Arc::clone(&self.provider);
        let city = city.to_string();
        let tx = tx.clone();

        tracing::debug!("Spawning fetch #{} for {:?}", request_id, city);
        tokio::spawn(async move {
            let result = fetch_city(&provider, &city).await;
            if tx
                .send(FetchDone {
                    request_id,
                    city,
                    result,
                })
                .is_err()
            {
                tracing::debug!("Fetch #{} finished after receiver closed", request_id);
            }
        });

        request_id
    }

    /// Apply a completed background fetch to the dashboard.
    pub fn apply(&mut self, done: FetchDone) {
        match &done.result {
            Ok(view) => tracing::info!(
                "Fetch #{} done: showing {}",
                done.request_id,
                view.location.name
            ),
            Err(AppError::Weather(e)) if e.is_user_correctable() => {
                tracing::info!("Fetch #{}: {}", done.request_id, e)
            }
            Err(e) => tracing::warn!("Fetch #{} for {:?} failed: {}", done.request_id, done.city, e),
        }
        self.dashboard.apply(done.result);
    }
}

/// Validate the query and run the full resolve, fetch and normalize pipeline.
pub async fn fetch_city(provider: &WeatherProvider, city: &str) -> Result<WeatherView, AppError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(AppError::EmptyQuery);
    }

    tracing::info!("Fetching weather for {:?}", city);
    Ok(provider.fetch_complete(city).await?)
}

/// Fetch the first city in `cities` that succeeds. Each is tried exactly once.
pub async fn first_available(
    provider: &WeatherProvider,
    cities: &[String],
) -> Result<WeatherView, AppError> {
    let mut last_error: Option<WeatherError> = None;

    for city in cities {
        match provider.fetch_complete(city).await {
            Ok(view) => return Ok(view),
            Err(e) => {
                tracing::warn!("{} failed ({}), trying next city", city, e);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) => Err(e.into()),
        None => Err(ConfigError::Invalid("no startup cities configured".into()).into()),
    }
}
