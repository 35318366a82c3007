//! Trip model definition and related functionality.

use jiff::civil::{Date, DateTime};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::TripStatus;

/// A concrete, persisted trip record.
///
/// Trips are either materialized from a pattern occurrence (carrying the
/// pattern id and sequence index) or created ad hoc (both null). Rider and
/// location fields are snapshots taken at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    /// Unique identifier for the trip
    pub id: u64,

    /// Pattern this trip was materialized from, if any
    pub pattern_id: Option<u64>,

    /// Occurrence ordinal within the pattern, if materialized
    pub sequence_index: Option<u32>,

    /// Rider the trip serves
    pub rider: String,

    /// Pickup location snapshot
    pub pickup: String,

    /// Dropoff location snapshot
    pub dropoff: String,

    /// Pickup date and time
    pub scheduled_at: DateTime,

    /// Expected trip length in minutes
    pub duration_minutes: u32,

    /// Current status of the trip
    pub status: TripStatus,

    /// Driver assigned by the dispatch workflow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,

    /// Why the trip was cancelled (set when status = Cancelled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,

    /// Timestamp when the trip was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the trip was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Trip {
    /// Calendar date the trip is scheduled on.
    pub fn date(&self) -> Date {
        self.scheduled_at.date()
    }

    /// Whether the trip was materialized from a recurrence pattern.
    pub fn is_recurring(&self) -> bool {
        self.pattern_id.is_some()
    }
}
