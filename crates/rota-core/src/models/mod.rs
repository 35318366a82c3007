//! Data models for recurrence patterns and trips.
//!
//! This module contains the core domain models of the scheduling system.
//! Display implementations for these models are located in
//! [`crate::display::models`] to maintain clean separation of concerns
//! between data structures and presentation logic.
//!
//! # Model Overview
//!
//! - [`RecurrencePattern`] is the reusable rule an operator defines once:
//!   who rides, where, and on which cadence. The frequency-specific fields
//!   live inside the [`Frequency`] variant so invalid combinations cannot
//!   be represented.
//! - [`Occurrence`] is one derived date/time instance of a pattern. It is
//!   never persisted on its own.
//! - [`Trip`] is a persisted, dispatchable record, either materialized from
//!   an occurrence or created ad hoc. Materialized trips carry the
//!   `(pattern_id, sequence_index)` idempotency key.
//! - [`PatternSummary`] augments a pattern with trip counts for list views.
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::Weekday;
//! use rota_core::models::{Frequency, WeekdaySet};
//!
//! let days = WeekdaySet::from_days([Weekday::Monday, Weekday::Wednesday]);
//! let frequency = Frequency::Weekly { days };
//!
//! assert_eq!(frequency.to_string(), "weekly on mon,wed");
//! assert_eq!(frequency.kind(), "weekly");
//! assert!(frequency.validate().is_ok());
//! ```

pub mod filters;
pub mod frequency;
pub mod occurrence;
pub mod pattern;
pub mod reports;
pub mod requests;
pub mod status;
pub mod summary;
pub mod trip;
pub mod weekday;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use filters::{PatternFilter, TripFilter};
pub use frequency::{Frequency, IntervalUnit};
pub use occurrence::Occurrence;
pub use pattern::RecurrencePattern;
pub use reports::{
    MaterializeReport, OccurrenceDisposition, OccurrenceOutcome, ReconcileReport, SweepReport,
};
pub use requests::{NewPatternRequest, NewTripRequest, UpdatePatternRequest, UpdateTripRequest};
pub use status::{PatternStatus, TripStatus};
pub use summary::{PatternSummary, TripCounts};
pub use trip::Trip;
pub use weekday::WeekdaySet;
