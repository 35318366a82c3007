//! Command-line interface definitions using clap
//!
//! This module defines the complete CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! This module demonstrates the CLI side of the parameter wrapper pattern:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! Each command follows the same structure: a clap `Args` struct owns the
//! flag names, help text, and value enums, and a `From` conversion maps it
//! onto the corresponding framework-free parameter structure from
//! `rota_core::params`. Parsing of dates, times, and frequencies stays in
//! the core's `validate` methods; the CLI only ever hands over strings.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use rota_core::params::*;

/// Main command-line interface for the Rota trip scheduling tool
///
/// Rota manages recurring transportation requests: operators describe a
/// rider's repeating schedule once as a pattern, and the tool materializes
/// the concrete trips, keeps them reconciled when the pattern changes, and
/// tracks each trip through the dispatch workflow.
#[derive(Parser)]
#[command(version, about, name = "rota")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/rota/rota.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to a holidays file (one YYYY-MM-DD date per line, '#' comments)
    #[arg(long, global = true)]
    pub holidays_file: Option<PathBuf>,

    /// Override the reference date (YYYY-MM-DD). Defaults to the current
    /// civil date
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Rota CLI
///
/// The CLI is organized into three main command categories:
/// - `pattern`: Operations for managing recurrence patterns
/// - `trip`: Operations for individual trips and the dispatch workflow
/// - `sweep`: The periodic tick that tops up every active pattern
#[derive(Subcommand)]
pub enum Commands {
    /// Manage recurrence patterns
    #[command(alias = "p")]
    Pattern {
        #[command(subcommand)]
        command: PatternCommands,
    },
    /// Manage individual trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Materialize every active pattern through the horizon
    Sweep,
}

#[derive(Subcommand)]
pub enum PatternCommands {
    /// Create a new recurrence pattern
    #[command(alias = "c")]
    Create(CreatePatternArgs),
    /// List patterns with their trip counts
    #[command(aliases = ["l", "ls"])]
    List(ListPatternsArgs),
    /// Show details of a specific pattern
    #[command(alias = "s")]
    Show(ShowPatternArgs),
    /// Update a pattern and reconcile its future trips
    #[command(alias = "u")]
    Update(UpdatePatternArgs),
    /// Deactivate a pattern, cancelling its future scheduled trips
    #[command(alias = "d")]
    Deactivate(PatternIdArgs),
    /// Reactivate a pattern and rebuild its future trips
    #[command(alias = "r")]
    Reactivate(PatternIdArgs),
    /// Delete a pattern permanently
    #[command(alias = "rm")]
    Delete(DeletePatternArgs),
    /// Preview a pattern's next occurrences without creating trips
    #[command(alias = "pv")]
    Preview(PreviewPatternArgs),
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Add a one-off trip outside any pattern
    #[command(alias = "a")]
    Add(AddTripArgs),
    /// List trips in schedule order
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show details of a specific trip
    #[command(alias = "s")]
    Show(TripIdArgs),
    /// Update a trip's status or driver
    #[command(alias = "u")]
    Update(UpdateTripArgs),
}

/// Create a new recurrence pattern
///
/// The frequency is given as a kind plus its companion flags: `--days` for
/// weekly patterns, `--day-of-month` for monthly ones, and `--every` with
/// `--unit` for custom cadences.
#[derive(ClapArgs)]
pub struct CreatePatternArgs {
    /// Rider the recurring request belongs to
    pub rider: String,
    /// Pickup location
    #[arg(long)]
    pub pickup: String,
    /// Dropoff location
    #[arg(long)]
    pub dropoff: String,
    /// How often the pattern repeats
    #[arg(long, value_enum)]
    pub frequency: FrequencyArg,
    /// Weekdays for weekly patterns, e.g. 'mon,wed,fri'
    #[arg(long)]
    pub days: Option<String>,
    /// Day of the month (1-31) for monthly patterns
    #[arg(long)]
    pub day_of_month: Option<i8>,
    /// Repeat interval for custom patterns
    #[arg(long)]
    pub every: Option<u32>,
    /// Unit of the custom interval
    #[arg(long, value_enum)]
    pub unit: Option<IntervalUnitArg>,
    /// First date the pattern can produce an occurrence (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,
    /// Optional last date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
    /// Pickup time shared by every occurrence (HH:MM)
    #[arg(long)]
    pub start_time: String,
    /// Expected trip duration in minutes
    #[arg(long = "duration")]
    pub duration_minutes: u32,
    /// Optional cap on the total number of occurrences
    #[arg(long)]
    pub max_occurrences: Option<u32>,
    /// Skip occurrences falling on Saturday or Sunday
    #[arg(long)]
    pub skip_weekends: bool,
    /// Skip occurrences falling on a configured holiday
    #[arg(long)]
    pub skip_holidays: bool,
}

impl From<CreatePatternArgs> for CreatePattern {
    fn from(val: CreatePatternArgs) -> Self {
        CreatePattern {
            rider: val.rider,
            pickup: val.pickup,
            dropoff: val.dropoff,
            frequency: val.frequency.to_string(),
            days: val.days,
            day_of_month: val.day_of_month,
            interval: val.every,
            interval_unit: val.unit.map(|u| u.to_string()),
            start_date: val.start_date,
            end_date: val.end_date,
            start_time: val.start_time,
            duration_minutes: val.duration_minutes,
            max_occurrences: val.max_occurrences,
            skip_weekends: val.skip_weekends,
            skip_holidays: val.skip_holidays,
        }
    }
}

/// List patterns
///
/// Shows active patterns by default; `--inactive` switches to deactivated
/// ones. Each entry carries the pattern's schedule and its trip counts.
#[derive(ClapArgs)]
pub struct ListPatternsArgs {
    /// Show deactivated patterns instead of active ones
    #[arg(long)]
    pub inactive: bool,
    /// Only patterns whose rider contains this text
    #[arg(long)]
    pub rider: Option<String>,
    /// Emit the list as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListPatternsArgs> for ListPatterns {
    fn from(val: &ListPatternsArgs) -> Self {
        ListPatterns {
            inactive: val.inactive,
            rider: val.rider.clone(),
        }
    }
}

/// Show details of a specific pattern
#[derive(ClapArgs)]
pub struct ShowPatternArgs {
    /// Unique identifier of the pattern to show details for
    pub id: u64,
}

impl From<ShowPatternArgs> for Id {
    fn from(val: ShowPatternArgs) -> Self {
        Id { id: val.id }
    }
}

/// Generic pattern ID argument for deactivate and reactivate.
#[derive(ClapArgs)]
pub struct PatternIdArgs {
    /// Unique identifier of the pattern to operate on
    pub id: u64,
}

impl From<PatternIdArgs> for Id {
    fn from(val: PatternIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a pattern's schedule or route
///
/// The rider and start date are immutable; create a new pattern instead.
/// Changing the frequency requires restating it in full, companions
/// included. After the edit, future scheduled trips are reconciled against
/// the new schedule.
#[derive(ClapArgs)]
pub struct UpdatePatternArgs {
    /// Unique identifier of the pattern to update
    pub id: u64,
    /// Updated pickup location
    #[arg(long)]
    pub pickup: Option<String>,
    /// Updated dropoff location
    #[arg(long)]
    pub dropoff: Option<String>,
    /// New frequency kind
    #[arg(long, value_enum)]
    pub frequency: Option<FrequencyArg>,
    /// Weekdays for a new weekly frequency, e.g. 'mon,wed,fri'
    #[arg(long)]
    pub days: Option<String>,
    /// Day of the month (1-31) for a new monthly frequency
    #[arg(long)]
    pub day_of_month: Option<i8>,
    /// Repeat interval for a new custom frequency
    #[arg(long)]
    pub every: Option<u32>,
    /// Unit of the new custom interval
    #[arg(long, value_enum)]
    pub unit: Option<IntervalUnitArg>,
    /// Updated pickup time (HH:MM)
    #[arg(long)]
    pub start_time: Option<String>,
    /// Updated trip duration in minutes
    #[arg(long = "duration")]
    pub duration_minutes: Option<u32>,
    /// Updated last date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,
    /// Remove the end date so the pattern runs open-ended
    #[arg(long, conflicts_with = "end_date")]
    pub clear_end_date: bool,
    /// Updated cap on the total number of occurrences
    #[arg(long)]
    pub max_occurrences: Option<u32>,
    /// Remove the occurrence cap
    #[arg(long, conflicts_with = "max_occurrences")]
    pub clear_max_occurrences: bool,
    /// Updated weekend skipping (true or false)
    #[arg(long)]
    pub skip_weekends: Option<bool>,
    /// Updated holiday skipping (true or false)
    #[arg(long)]
    pub skip_holidays: Option<bool>,
}

impl From<UpdatePatternArgs> for UpdatePattern {
    fn from(val: UpdatePatternArgs) -> Self {
        UpdatePattern {
            id: val.id,
            pickup: val.pickup,
            dropoff: val.dropoff,
            frequency: val.frequency.map(|f| f.to_string()),
            days: val.days,
            day_of_month: val.day_of_month,
            interval: val.every,
            interval_unit: val.unit.map(|u| u.to_string()),
            start_time: val.start_time,
            duration_minutes: val.duration_minutes,
            end_date: val.end_date,
            clear_end_date: val.clear_end_date,
            max_occurrences: val.max_occurrences,
            clear_max_occurrences: val.clear_max_occurrences,
            skip_weekends: val.skip_weekends,
            skip_holidays: val.skip_holidays,
        }
    }
}

/// Delete a pattern permanently
#[derive(ClapArgs)]
pub struct DeletePatternArgs {
    /// Unique identifier of the pattern to permanently delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePatternArgs> for DeletePattern {
    fn from(val: DeletePatternArgs) -> Self {
        DeletePattern {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Preview a pattern's upcoming occurrences
///
/// Read-only: shows the next pickups the pattern would produce from today,
/// without creating any trips. Works on inactive patterns too.
#[derive(ClapArgs)]
pub struct PreviewPatternArgs {
    /// Unique identifier of the pattern to preview
    pub id: u64,
    /// How many upcoming occurrences to show
    #[arg(long, default_value = "10")]
    pub count: u32,
    /// Emit the preview as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&PreviewPatternArgs> for PreviewPattern {
    fn from(val: &PreviewPatternArgs) -> Self {
        PreviewPattern {
            id: val.id,
            count: val.count,
        }
    }
}

/// Add a one-off trip outside any pattern
#[derive(ClapArgs)]
pub struct AddTripArgs {
    /// Rider taking the trip
    pub rider: String,
    /// Pickup location
    #[arg(long)]
    pub pickup: String,
    /// Dropoff location
    #[arg(long)]
    pub dropoff: String,
    /// Service date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,
    /// Pickup time (HH:MM)
    #[arg(long)]
    pub time: String,
    /// Expected trip duration in minutes
    #[arg(long = "duration")]
    pub duration_minutes: u32,
    /// Optional driver assigned up front
    #[arg(long)]
    pub driver: Option<String>,
}

impl From<AddTripArgs> for AddTrip {
    fn from(val: AddTripArgs) -> Self {
        AddTrip {
            rider: val.rider,
            pickup: val.pickup,
            dropoff: val.dropoff,
            date: val.date,
            time: val.time,
            duration_minutes: val.duration_minutes,
            driver: val.driver,
        }
    }
}

/// List trips
#[derive(ClapArgs)]
pub struct ListTripsArgs {
    /// Only trips materialized from this pattern
    #[arg(long)]
    pub pattern: Option<u64>,
    /// Only trips in this status
    #[arg(long, value_enum)]
    pub status: Option<TripStatusArg>,
    /// Only trips on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// Only trips on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Only trips whose rider contains this text
    #[arg(long)]
    pub rider: Option<String>,
    /// Emit the list as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

impl From<&ListTripsArgs> for ListTrips {
    fn from(val: &ListTripsArgs) -> Self {
        ListTrips {
            pattern: val.pattern,
            status: val.status.map(|s| s.to_string()),
            from: val.from.clone(),
            to: val.to.clone(),
            rider: val.rider.clone(),
        }
    }
}

/// Generic trip ID argument.
#[derive(ClapArgs)]
pub struct TripIdArgs {
    /// Unique identifier of the trip to operate on
    pub id: u64,
}

impl From<TripIdArgs> for Id {
    fn from(val: TripIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a trip through the dispatch workflow
///
/// Status moves forward only: scheduled trips can start or be cancelled,
/// in-progress trips can complete. Drivers are assigned while the trip is
/// still scheduled; a cancel reason is only accepted together with
/// `--status cancelled`.
#[derive(ClapArgs)]
pub struct UpdateTripArgs {
    /// Unique identifier of the trip to update
    pub id: u64,
    /// New status for the trip
    #[arg(long, value_enum)]
    pub status: Option<TripStatusArg>,
    /// Driver to assign while the trip is still scheduled
    #[arg(long)]
    pub driver: Option<String>,
    /// Reason for a cancellation
    #[arg(long)]
    pub reason: Option<String>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            status: val.status.map(|s| s.to_string()),
            driver: val.driver,
            reason: val.reason,
        }
    }
}

/// Command-line argument representation of frequency kinds
///
/// Converts between user-friendly command arguments and the frequency kind
/// strings the core parameter validation expects. Companion flags carry the
/// kind-specific detail.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    /// Every day
    Daily,
    /// On chosen weekdays (requires --days)
    Weekly,
    /// On one day of the month (requires --day-of-month)
    Monthly,
    /// Every N days, weeks, or months (requires --every and --unit)
    Custom,
}

impl std::fmt::Display for FrequencyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyArg::Daily => write!(f, "daily"),
            FrequencyArg::Weekly => write!(f, "weekly"),
            FrequencyArg::Monthly => write!(f, "monthly"),
            FrequencyArg::Custom => write!(f, "custom"),
        }
    }
}

/// Command-line argument representation of custom interval units.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum IntervalUnitArg {
    Days,
    Weeks,
    Months,
}

impl std::fmt::Display for IntervalUnitArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalUnitArg::Days => write!(f, "days"),
            IntervalUnitArg::Weeks => write!(f, "weeks"),
            IntervalUnitArg::Months => write!(f, "months"),
        }
    }
}

/// Command-line argument representation of trip status values
///
/// Used both as the `--status` filter on trip listings and as the target
/// status in trip updates.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TripStatusArg {
    /// Waiting for dispatch
    Scheduled,
    /// Picked up by dispatch
    InProgress,
    /// Service delivered
    Completed,
    /// Called off
    Cancelled,
}

impl std::fmt::Display for TripStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatusArg::Scheduled => write!(f, "scheduled"),
            TripStatusArg::InProgress => write!(f, "in_progress"),
            TripStatusArg::Completed => write!(f, "completed"),
            TripStatusArg::Cancelled => write!(f, "cancelled"),
        }
    }
}
