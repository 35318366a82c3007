//! Rota CLI Application
//!
//! Command-line front end for the rota recurring-trip scheduler. The edge
//! resolves everything ambient exactly once: the reference date, the
//! holiday calendar, and the database path all come out of the global
//! flags before any command runs.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jiff::civil::Date;
use log::info;
use renderer::TerminalRenderer;
use rota_core::{params::ListPatterns, SchedulerBuilder, StaticHolidays};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        holidays_file,
        today,
        no_color,
        command,
    } = Args::parse();

    let today = match today {
        Some(text) => text
            .parse::<Date>()
            .with_context(|| format!("Invalid --today date: {text}"))?,
        None => jiff::Zoned::now().date(),
    };

    let mut builder = SchedulerBuilder::new().with_database_path(database_file);
    if let Some(path) = holidays_file {
        let holidays = StaticHolidays::from_file(&path)
            .with_context(|| format!("Failed to load holidays from {}", path.display()))?;
        builder = builder.with_exclusion_calendar(holidays);
    }
    let scheduler = builder
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Rota started (today = {today})");

    match command {
        Some(Pattern { command }) => {
            Cli::new(scheduler, renderer, today)
                .handle_pattern_command(command)
                .await
        }
        Some(Trip { command }) => {
            Cli::new(scheduler, renderer, today)
                .handle_trip_command(command)
                .await
        }
        Some(Sweep) => Cli::new(scheduler, renderer, today).handle_sweep().await,
        None => {
            Cli::new(scheduler, renderer, today)
                .list_patterns(&ListPatterns::default(), false)
                .await
        }
    }
}
