//! High-level scheduler API for recurrence patterns and trips.
//!
//! This module provides the main [`Scheduler`] interface for interacting
//! with the Rota scheduling system. The scheduler coordinates between the
//! application layers and the database, driving expansion, materialization,
//! and reconciliation for pattern operations.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Scheduler    │    │     Engine      │    │    Database     │
//! │ (pattern_ops,   │───▶│ (pure expansion)│    │   (via db/)     │
//! │  trip_ops)      │───▶─────────────────────▶│                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     Operation Surface    Occurrence Math        Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Scheduler`] instances with
//!   configuration (database path, horizon, exclusion calendar)
//! - [`pattern_ops`]: Pattern operations (create, list, update, preview,
//!   deactivate, sweep, etc.)
//! - [`trip_ops`]: Trip operations (ad hoc creation, listing, dispatch
//!   status updates)
//!
//! # Determinism
//!
//! Every operation that depends on the current date takes `today` as an
//! explicit parameter. The scheduler never reads a clock for schedule
//! arithmetic, so a whole day's worth of operations can be replayed in a
//! test against a pinned date.
//!
//! # Usage
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use rota_core::{params::CreatePattern, SchedulerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("rota.db"))
//!     .with_horizon_days(14)
//!     .build()
//!     .await?;
//!
//! let mut params = CreatePattern::default();
//! params.rider = "Avery Quinn".to_string();
//! params.pickup = "5 Mill Lane".to_string();
//! params.dropoff = "Riverside Dialysis".to_string();
//! params.frequency = "daily".to_string();
//! params.start_date = "2025-03-03".to_string();
//! params.start_time = "08:30".to_string();
//! params.duration_minutes = 45;
//!
//! let today = date(2025, 3, 1);
//! let (pattern, report) = scheduler.create_pattern(&params, today).await?;
//! println!("Pattern {} with {} trips", pattern.id, report.created());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::calendar::ExclusionCalendar;

pub mod builder;
pub mod pattern_ops;
pub mod trip_ops;


// Re-export the main types
pub use builder::SchedulerBuilder;

/// How far past "today" trips are materialized when no explicit horizon is
/// configured.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

/// Main scheduler interface for managing patterns and trips.
pub struct Scheduler {
    pub(crate) db_path: PathBuf,
    pub(crate) horizon_days: i64,
    pub(crate) calendar: Arc<dyn ExclusionCalendar>,
}

impl Scheduler {
    /// Creates a new scheduler with the given configuration.
    pub(crate) fn new(
        db_path: PathBuf,
        horizon_days: i64,
        calendar: Arc<dyn ExclusionCalendar>,
    ) -> Self {
        Self {
            db_path,
            horizon_days,
            calendar,
        }
    }

    /// The configured materialization horizon in days.
    pub fn horizon_days(&self) -> i64 {
        self.horizon_days
    }
}
