use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use skyview_core::App;

use crate::render;

/// Print the dashboard as cards, or the view as JSON with errors on stderr.
pub fn show(app: &App, now: DateTime<Utc>, json: bool) -> Result<()> {
    let dashboard = app.dashboard();

    if json {
        if let Some(view) = dashboard.view() {
            let body = serde_json::to_string_pretty(view).context("Failed to serialize weather")?;
            println!("{}", body);
        }
        if let Some(error) = dashboard.error() {
            eprintln!("{}", error);
        }
        return Ok(());
    }

    print!(
        "{}",
        render::dashboard(dashboard, now, app.config().display.hourly_window)
    );
    Ok(())
}
