//! Status enumerations for patterns and trips.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of recurrence pattern statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternStatus {
    /// Pattern is active and produces occurrences
    #[default]
    Active,

    /// Pattern is deactivated; its desired future set is empty
    Inactive,
}

impl FromStr for PatternStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PatternStatus::Active),
            "inactive" => Ok(PatternStatus::Inactive),
            _ => Err(format!("Invalid pattern status: {s}")),
        }
    }
}

impl PatternStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternStatus::Active => "active",
            PatternStatus::Inactive => "inactive",
        }
    }
}

/// Type-safe enumeration of trip statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// Trip is booked and waiting for dispatch
    Scheduled,

    /// Trip is underway
    InProgress,

    /// Trip finished normally
    Completed,

    /// Trip was cancelled before it ran
    Cancelled,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(TripStatus::Scheduled),
            "inprogress" | "in_progress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            _ => Err(format!("Invalid trip status: {s}")),
        }
    }
}

impl TripStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// Returns a formatted string that includes both an icon and the status
    /// name. This method ensures consistent visual representation across
    /// all display contexts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rota_core::models::TripStatus;
    ///
    /// assert_eq!(TripStatus::Scheduled.with_icon(), "○ Scheduled");
    /// assert_eq!(TripStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(TripStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TripStatus::Cancelled.with_icon(), "✗ Cancelled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "○ Scheduled",
            TripStatus::InProgress => "➤ In Progress",
            TripStatus::Completed => "✓ Completed",
            TripStatus::Cancelled => "✗ Cancelled",
        }
    }

    /// Whether the dispatch workflow may move a trip from this status to
    /// `next`.
    ///
    /// Trips advance `Scheduled` → `InProgress` → `Completed`. Cancellation
    /// is only possible while the trip is still `Scheduled`; trips in any
    /// terminal status never change again.
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (TripStatus::Scheduled, TripStatus::InProgress)
                | (TripStatus::Scheduled, TripStatus::Cancelled)
                | (TripStatus::InProgress, TripStatus::Completed)
        )
    }

    /// Whether a trip in this status still occupies its occurrence slot.
    /// Only cancelled trips release the slot for re-materialization.
    pub fn is_live(&self) -> bool {
        !matches!(self, TripStatus::Cancelled)
    }
}
