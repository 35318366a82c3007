//! Pattern summary types and functionality.

use jiff::civil::{Date, Time};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Frequency, PatternStatus, RecurrencePattern};

/// Trip counts accumulated for one pattern.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TripCounts {
    /// All trips ever materialized from the pattern
    pub total: u32,
    /// Trips still waiting for dispatch
    pub scheduled: u32,
    /// Trips that finished normally
    pub completed: u32,
    /// Trips cancelled by reconciliation or an operator
    pub cancelled: u32,
}

/// Summary information about a pattern with trip statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Pattern ID
    pub id: u64,
    /// Rider the recurring request belongs to
    pub rider: String,
    /// Pickup location
    pub pickup: String,
    /// Dropoff location
    pub dropoff: String,
    /// How the request repeats
    pub frequency: Frequency,
    /// First date the pattern can produce an occurrence
    pub start_date: Date,
    /// Last date the pattern can produce an occurrence (inclusive)
    pub end_date: Option<Date>,
    /// Pickup time shared by every occurrence
    pub start_time: Time,
    /// Pattern status
    pub status: PatternStatus,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Trip counts materialized from this pattern
    pub trips: TripCounts,
}

impl PatternSummary {
    /// Create a PatternSummary from a pattern and its trip counts
    pub fn from_pattern(pattern: RecurrencePattern, trips: TripCounts) -> Self {
        Self {
            id: pattern.id,
            rider: pattern.rider,
            pickup: pattern.pickup,
            dropoff: pattern.dropoff,
            frequency: pattern.frequency,
            start_date: pattern.start_date,
            end_date: pattern.end_date,
            start_time: pattern.start_time,
            status: pattern.status,
            created_at: pattern.created_at,
            updated_at: pattern.updated_at,
            trips,
        }
    }
}

impl From<&RecurrencePattern> for PatternSummary {
    fn from(pattern: &RecurrencePattern) -> Self {
        Self::from_pattern(pattern.clone(), TripCounts::default())
    }
}
