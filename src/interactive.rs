//! Prompt loop: searches run in the background while the prompt stays live.

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use skyview_core::{App, AppError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::cli::pick_city;
use crate::output;

pub async fn run(mut app: App, json: bool) -> Result<ExitCode> {
    if let Err(e) = app.load_startup().await {
        tracing::debug!("Startup chain exhausted: {}", e);
    }
    output::show(&app, Utc::now(), json)?;

    let quick_cities: Vec<String> = app
        .config()
        .weather
        .quick_cities
        .iter()
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect();
    print_menu(&quick_cities);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if matches!(input, "q" | "quit" | "exit") {
                    break;
                }
                match pick_city(input, &quick_cities) {
                    Some(city) => {
                        let id = app.request_fetch(&tx, &city);
                        println!("Searching for {} (#{})...", city, id);
                    }
                    None => println!("{}", AppError::EmptyQuery.user_message()),
                }
            }
            Some(done) = rx.recv() => {
                app.apply(done);
                output::show(&app, Utc::now(), json)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_menu(quick_cities: &[String]) {
    println!("Type a city name, a number for a quick pick, or q to quit.");
    for (i, city) in quick_cities.iter().enumerate() {
        println!("  {}. {}", i + 1, city);
    }
}
