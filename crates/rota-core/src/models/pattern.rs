//! Recurrence pattern model definition and related functionality.

use jiff::civil::{Date, Time};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Frequency, PatternStatus};
use crate::error::{Result, SchedulerError};

/// A reusable, periodic transportation request.
///
/// The pattern itself never becomes a trip; the expansion engine turns it
/// into dated occurrences and the materializer persists those as trip
/// records. Field values are snapshotted onto trips at materialization
/// time, so later edits never retroactively change an existing trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrencePattern {
    /// Unique identifier for the pattern
    pub id: u64,

    /// Rider the recurring request belongs to
    pub rider: String,

    /// Pickup location
    pub pickup: String,

    /// Dropoff location
    pub dropoff: String,

    /// How the request repeats
    pub frequency: Frequency,

    /// First date the pattern can produce an occurrence; also anchors
    /// sequence numbering
    pub start_date: Date,

    /// Last date the pattern can produce an occurrence (inclusive)
    pub end_date: Option<Date>,

    /// Pickup time shared by every occurrence
    pub start_time: Time,

    /// Expected trip length in minutes
    pub duration_minutes: u32,

    /// Cap on the number of surviving occurrences over the pattern's life
    pub max_occurrences: Option<u32>,

    /// Drop occurrences landing on Saturday or Sunday
    pub skip_weekends: bool,

    /// Drop occurrences landing on an exclusion-calendar date
    pub skip_holidays: bool,

    /// Whether the pattern currently produces occurrences
    #[serde(default)]
    pub status: PatternStatus,

    /// Timestamp when the pattern was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the pattern was last modified (UTC)
    pub updated_at: Timestamp,
}

impl RecurrencePattern {
    /// Whether the pattern produces occurrences at all.
    pub fn is_active(&self) -> bool {
        self.status == PatternStatus::Active
    }

    /// Check structural validity.
    ///
    /// Runs at save time, before any expansion is attempted; a pattern that
    /// passes here can never make the expansion engine fail.
    pub fn validate(&self) -> Result<()> {
        validate_schedule_fields(
            &self.frequency,
            self.start_date,
            self.end_date,
            self.duration_minutes,
            self.max_occurrences,
        )
    }
}

/// Shared structural checks for pattern records and creation requests.
pub(crate) fn validate_schedule_fields(
    frequency: &Frequency,
    start_date: Date,
    end_date: Option<Date>,
    duration_minutes: u32,
    max_occurrences: Option<u32>,
) -> Result<()> {
    frequency.validate()?;

    if let Some(end) = end_date {
        if start_date > end {
            return Err(SchedulerError::invalid_input("end_date")
                .with_reason("End date must not be before the start date"));
        }
    }

    if duration_minutes == 0 {
        return Err(SchedulerError::invalid_input("duration_minutes")
            .with_reason("Duration must be at least one minute"));
    }

    if max_occurrences == Some(0) {
        return Err(SchedulerError::invalid_input("max_occurrences")
            .with_reason("Occurrence cap must be at least 1"));
    }

    Ok(())
}
