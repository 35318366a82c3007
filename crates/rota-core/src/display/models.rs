//! Display implementations for domain models.
//!
//! All Display trait implementations for the core domain models live here,
//! separated from the model definitions to keep data structures and
//! presentation concerns apart. Output is markdown for rich terminal
//! display, with status icons and structured sections.

use std::fmt;

use super::datetime::{CivilClock, LocalDateTime};
use crate::models::{
    Occurrence, PatternStatus, PatternSummary, RecurrencePattern, Trip, TripStatus,
};

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecurrencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {} ({})", self.id, self.rider, self.frequency)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Route: {} → {}", self.pickup, self.dropoff)?;
        writeln!(
            f,
            "- Pickup: {} for {} min",
            self.start_time.strftime("%H:%M"),
            self.duration_minutes
        )?;
        match self.end_date {
            Some(end) => writeln!(f, "- Runs: {} through {end}", self.start_date)?,
            None => writeln!(f, "- Runs: from {}, open-ended", self.start_date)?,
        }
        if let Some(max) = self.max_occurrences {
            writeln!(f, "- Occurrence cap: {max}")?;
        }
        if self.skip_weekends {
            writeln!(f, "- Skips weekends")?;
        }
        if self.skip_holidays {
            writeln!(f, "- Skips holidays")?;
        }
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        Ok(())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.rider,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Route: {} → {}", self.pickup, self.dropoff)?;
        writeln!(
            f,
            "- Scheduled: {} for {} min",
            CivilClock(&self.scheduled_at),
            self.duration_minutes
        )?;
        match (self.pattern_id, self.sequence_index) {
            (Some(pattern_id), Some(sequence_index)) => {
                writeln!(f, "- Pattern: {pattern_id} (occurrence {sequence_index})")?;
            }
            _ => writeln!(f, "- Pattern: none (ad hoc)")?,
        }
        if let Some(driver) = &self.driver {
            writeln!(f, "- Driver: {driver}")?;
        }
        if let Some(reason) = &self.cancel_reason {
            writeln!(f, "- Cancelled: {reason}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for PatternSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trips = if self.trips.total > 0 {
            format!(
                " ({} scheduled / {} total trips)",
                self.trips.scheduled, self.trips.total
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){trips}", self.rider, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Route**: {} → {}", self.pickup, self.dropoff)?;
        writeln!(
            f,
            "- **Schedule**: {} at {}",
            self.frequency,
            self.start_time.strftime("%H:%M")
        )?;
        match self.end_date {
            Some(end) => writeln!(f, "- **Runs**: {} through {end}", self.start_date)?,
            None => writeln!(f, "- **Runs**: from {}, open-ended", self.start_date)?,
        }
        if self.status == PatternStatus::Inactive {
            writeln!(f, "- **Status**: {}", self.status)?;
        }
        writeln!(f)?; // Add blank line after each pattern

        Ok(())
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {} ({}) [occurrence {}]",
            CivilClock(&self.start),
            self.date.strftime("%a"),
            self.sequence_index
        )
    }
}
