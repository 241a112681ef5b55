pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;

pub use app::{fetch_city, first_available, App, FetchDone};
pub use config::{Config, DisplayConfig, ValidationResult, WeatherConfig};
pub use dashboard::Dashboard;
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging.
///
/// Logs go to stderr so stdout stays clean for `--json` output.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::debug!("SkyView core initialized");
    Ok(())
}
