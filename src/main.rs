use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use skyview_core::{App, Config};

mod cli;
mod interactive;
mod output;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize core
    skyview_core::init()?;

    let (mut config, _warnings) = Config::load_validated(cli.config.as_deref())?;
    if let Some(hours) = cli.hours {
        config.display.hourly_window = hours;
    }

    // App::new validates again, so the --hours override is checked too
    let mut app = App::new(config)?;

    if cli.interactive {
        return interactive::run(app, cli.json).await;
    }

    let outcome = match cli.city.as_deref() {
        Some(city) => app.search(city).await,
        None => app.load_startup().await,
    };

    output::show(&app, Utc::now(), cli.json)?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!("Exiting after failed fetch: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
