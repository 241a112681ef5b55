//! Plain-text cards for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use skyview_core::Dashboard;
use skyview_weather::{condition_description, WeatherView};

/// Rows shown under "The Next 7 Days" (today is excluded)
pub const FORECAST_ROWS: usize = 6;

/// Location, condition and headline numbers.
pub fn weather_card(view: &WeatherView) -> String {
    let current = &view.current;
    let condition = &current.condition;
    let mut out = String::new();

    let _ = writeln!(out, "📍 {}", view.location.display_name());
    let _ = writeln!(out, "{} {}", condition.icon().glyph(), condition.text);
    let _ = writeln!(
        out,
        "   {}",
        condition_description(&condition.text, current.temp_c)
    );
    let _ = writeln!(
        out,
        "   {}°C (feels like {}°C)",
        current.temp_c, current.feelslike_c
    );
    let _ = writeln!(
        out,
        "   Humidity {}% · Precipitation {} mm · Cloud cover {}%",
        current.humidity, current.precip_mm, current.cloud
    );
    out
}

/// Current temperature, wind, humidity and the coming week.
pub fn forecast_card(view: &WeatherView, now: DateTime<Utc>) -> String {
    let local = now.with_timezone(&view.local_offset());
    let current = &view.current;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}",
        local.format("%A, %B %-d"),
        local.format("%I:%M %p")
    );
    let _ = writeln!(out, "   {}°", current.temp_c);
    let _ = writeln!(out, "   Wind: {}, {} km/h", current.wind_dir, current.wind_kph);
    let _ = writeln!(out, "   Humidity: {}%", current.humidity);
    let _ = writeln!(out);
    let _ = writeln!(out, "The Next 7 Days");

    for day in view.next_days(FORECAST_ROWS) {
        let condition = &day.day.condition;
        let _ = writeln!(
            out,
            "  {:<10} {} {:<22} {:>3}° / {:>3}°",
            day.date.format("%A").to_string(),
            condition.icon().glyph(),
            condition.text,
            day.day.maxtemp_c,
            day.day.mintemp_c
        );
    }
    out
}

/// The hourly strip, starting at the current hour.
pub fn hourly_stats(view: &WeatherView, now: DateTime<Utc>, window: usize) -> String {
    let offset = view.local_offset();
    let mut out = String::new();

    let _ = writeln!(out, "Today's Hourly Forecast");
    let hours = view.upcoming_hours(now, window);
    if hours.is_empty() {
        let _ = writeln!(out, "  (no hourly data for the current time)");
        return out;
    }

    for hour in hours {
        let condition = &hour.condition;
        let _ = writeln!(
            out,
            "  {}  {:>3}°  {} {}",
            hour.time.with_timezone(&offset).format("%H:%M"),
            hour.temp_c,
            condition.icon().glyph(),
            condition.text
        );
    }
    out
}

/// Everything currently on the dashboard, including the last error.
pub fn dashboard(dashboard: &Dashboard, now: DateTime<Utc>, window: usize) -> String {
    let mut out = String::new();

    if let Some(view) = dashboard.view() {
        out.push_str(&weather_card(view));
        out.push('\n');
        out.push_str(&forecast_card(view, now));
        out.push('\n');
        out.push_str(&hourly_stats(view, now, window));
    }

    if let Some(error) = dashboard.error() {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "⚠ {}", error);
    }
    out
}
