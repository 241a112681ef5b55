use std::path::PathBuf;

use clap::Parser;

/// Terminal weather dashboard backed by Open-Meteo
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about)]
pub struct Cli {
    /// City to look up; omit to try the configured startup cities in order
    pub city: Option<String>,

    /// Print the normalized weather as JSON instead of cards
    #[arg(long)]
    pub json: bool,

    /// Keep prompting for cities until `q`
    #[arg(short, long)]
    pub interactive: bool,

    /// Number of hours in the hourly strip (overrides display.hourly_window)
    #[arg(long, value_name = "N")]
    pub hours: Option<usize>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Map prompt input to a city: a 1-based quick-pick number or free text.
pub fn pick_city(input: &str, quick_cities: &[String]) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=quick_cities.len()).contains(&n) => Some(quick_cities[n - 1].clone()),
        _ => Some(input.to_string()),
    }
}
