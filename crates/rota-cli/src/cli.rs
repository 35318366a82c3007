//! Command handlers bridging parsed arguments and the scheduler.
//!
//! Each handler converts its CLI argument structure into the core parameter
//! type, calls the matching `Scheduler` operation, and formats the result
//! through the core's Display wrappers. List and preview commands can emit
//! JSON instead when asked; everything else renders markdown through the
//! terminal renderer.

use anyhow::Result;
use jiff::civil::Date;
use log::debug;
use rota_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    params::ListPatterns,
    Scheduler, SchedulerError,
};

use crate::args::{PatternCommands, TripCommands};
use crate::renderer::TerminalRenderer;

/// CLI command dispatcher.
///
/// Owns the scheduler, the renderer, and the reference date every
/// date-sensitive operation is anchored to. The reference date is resolved
/// once in `main` so a whole invocation sees a single consistent "today".
pub struct Cli {
    scheduler: Scheduler,
    renderer: TerminalRenderer,
    today: Date,
}

impl Cli {
    /// Create a new command dispatcher.
    pub fn new(scheduler: Scheduler, renderer: TerminalRenderer, today: Date) -> Self {
        Self {
            scheduler,
            renderer,
            today,
        }
    }

    /// Dispatch a pattern subcommand.
    pub async fn handle_pattern_command(&self, command: PatternCommands) -> Result<()> {
        match command {
            PatternCommands::Create(args) => {
                let params = args.into();
                let (pattern, report) =
                    self.scheduler.create_pattern(&params, self.today).await?;
                debug!("Created pattern {} with {} trip(s)", pattern.id, report.created());
                self.renderer.render(&CreateResult::new(pattern).to_string())?;
                self.renderer.render(&report.to_string())
            }
            PatternCommands::List(args) => self.list_patterns(&(&args).into(), args.json).await,
            PatternCommands::Show(args) => {
                let params = args.into();
                let pattern = self
                    .scheduler
                    .get_pattern(&params)
                    .await?
                    .ok_or(SchedulerError::PatternNotFound { id: params.id })?;
                self.renderer.render(&pattern.to_string())
            }
            PatternCommands::Update(args) => {
                let params = args.into();
                let (pattern, reconcile) =
                    self.scheduler.update_pattern(&params, self.today).await?;
                self.renderer.render(&UpdateResult::new(pattern).to_string())?;
                self.renderer.render(&reconcile.to_string())?;
                if reconcile.is_empty_schedule() {
                    let warning = OperationStatus::warning(
                        "The updated schedule produces no future occurrences.".to_string(),
                    );
                    self.renderer.render(&warning.to_string())?;
                }
                Ok(())
            }
            PatternCommands::Deactivate(args) => {
                let (pattern, reconcile) = self
                    .scheduler
                    .deactivate_pattern(&args.into(), self.today)
                    .await?;
                let status = OperationStatus::success(format!(
                    "Deactivated pattern for '{}' (ID: {}); {} future trip(s) cancelled.",
                    pattern.rider, pattern.id, reconcile.cancelled
                ));
                self.renderer.render(&status.to_string())
            }
            PatternCommands::Reactivate(args) => {
                let (pattern, reconcile) = self
                    .scheduler
                    .reactivate_pattern(&args.into(), self.today)
                    .await?;
                let status = OperationStatus::success(format!(
                    "Reactivated pattern for '{}' (ID: {}); {} future trip(s) scheduled.",
                    pattern.rider, pattern.id, reconcile.created
                ));
                self.renderer.render(&status.to_string())
            }
            PatternCommands::Delete(args) => {
                let (pattern, cancelled) = self
                    .scheduler
                    .delete_pattern(&args.into(), self.today)
                    .await?;
                self.renderer
                    .render(&DeleteResult::new(pattern, cancelled).to_string())
            }
            PatternCommands::Preview(args) => {
                let params = (&args).into();
                let occurrences = self
                    .scheduler
                    .preview_occurrences(&params, self.today)
                    .await?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&occurrences.0)?);
                    Ok(())
                } else {
                    let heading =
                        format!("# Upcoming occurrences for pattern {}\n", params.id);
                    self.renderer.render(&heading)?;
                    self.renderer.render(&occurrences.to_string())
                }
            }
        }
    }

    /// Dispatch a trip subcommand.
    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Add(args) => {
                let trip = self.scheduler.add_trip(&args.into()).await?;
                self.renderer.render(&CreateResult::new(trip).to_string())
            }
            TripCommands::List(args) => {
                let trips = self.scheduler.list_trips(&(&args).into()).await?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&trips.0)?);
                    Ok(())
                } else {
                    self.renderer.render("# Trips\n")?;
                    self.renderer.render(&trips.to_string())
                }
            }
            TripCommands::Show(args) => {
                let params = args.into();
                let trip = self
                    .scheduler
                    .get_trip(&params)
                    .await?
                    .ok_or(SchedulerError::TripNotFound { id: params.id })?;
                self.renderer.render(&trip.to_string())
            }
            TripCommands::Update(args) => {
                let trip = self.scheduler.update_trip(&args.into()).await?;
                self.renderer.render(&UpdateResult::new(trip).to_string())
            }
        }
    }

    /// Run the periodic materialization sweep.
    pub async fn handle_sweep(&self) -> Result<()> {
        let report = self.scheduler.sweep(self.today).await?;
        self.renderer.render(&report.to_string())
    }

    /// List patterns, as markdown with a heading or as raw JSON.
    ///
    /// Also the default action when `rota` runs without a subcommand.
    pub async fn list_patterns(&self, params: &ListPatterns, json: bool) -> Result<()> {
        let summaries = self.scheduler.list_patterns(params).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&summaries.0)?);
            return Ok(());
        }

        let heading = if params.inactive {
            "# Inactive Patterns\n"
        } else {
            "# Active Patterns\n"
        };
        self.renderer.render(heading)?;
        self.renderer.render(&summaries.to_string())
    }
}
