//! Core library for the Rota recurring-trip scheduling application.
//!
//! This crate provides the core business logic for managing recurrence
//! patterns and the trips materialized from them: the expansion engine,
//! the materializer and reconciler, database operations, data models, and
//! error handling.
//!
//! # Display Architecture
//!
//! The crate implements a Display-based architecture for formatting output:
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Provide contextual and specialized
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! This separation allows the same data to be formatted differently depending
//! on context (lists vs. individual items, creation results vs. updates, etc.)
//! while maintaining consistency across all output.
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use rota_core::{params::CreatePattern, SchedulerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a scheduler instance
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Create a new pattern; its first trips materialize immediately
//! let mut create_params = CreatePattern::default();
//! create_params.rider = "Alice".to_string();
//! create_params.pickup = "12 Elm St".to_string();
//! create_params.dropoff = "County Clinic".to_string();
//! create_params.frequency = "weekly".to_string();
//! create_params.days = Some("mon,wed".to_string());
//! create_params.start_date = "2026-03-02".to_string();
//! create_params.start_time = "08:30".to_string();
//! create_params.duration_minutes = 45;
//!
//! let today = date(2026, 3, 1);
//! let (pattern, report) = scheduler.create_pattern(&create_params, today).await?;
//! println!("Created pattern: {}", pattern);
//! println!("{} trips scheduled", report.created());
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod scheduler;

// Re-export commonly used types
pub use calendar::{ExclusionCalendar, NoExclusions, StaticHolidays};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Occurrences, OperationStatus, PatternSummaries, Trips,
    UpdateResult,
};
pub use error::{Result, SchedulerError};
pub use models::{
    Frequency, MaterializeReport, Occurrence, PatternFilter, PatternStatus, PatternSummary,
    ReconcileReport, RecurrencePattern, SweepReport, Trip, TripFilter, TripStatus, WeekdaySet,
};
pub use params::{
    AddTrip, CreatePattern, DeletePattern, Id, ListPatterns, ListTrips, PreviewPattern,
    UpdatePattern, UpdateTrip,
};
pub use scheduler::{Scheduler, SchedulerBuilder, DEFAULT_HORIZON_DAYS};
