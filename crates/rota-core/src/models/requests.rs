//! Request types for creating and updating models.

use jiff::civil::{Date, DateTime, Time};

use super::pattern::validate_schedule_fields;
use super::{Frequency, RecurrencePattern, TripStatus};
use crate::error::Result;

/// Validated field set for creating a recurrence pattern.
#[derive(Debug, Clone)]
pub struct NewPatternRequest {
    pub rider: String,
    pub pickup: String,
    pub dropoff: String,
    pub frequency: Frequency,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub start_time: Time,
    pub duration_minutes: u32,
    pub max_occurrences: Option<u32>,
    pub skip_weekends: bool,
    pub skip_holidays: bool,
}

impl NewPatternRequest {
    /// Check structural validity of the requested schedule.
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

impl TryFrom<crate::params::CreatePattern> for NewPatternRequest {
    type Error = crate::SchedulerError;

    /// Convert CreatePattern parameters into a validated NewPatternRequest.
    ///
    /// Parses the frequency companions and the date/time strings, then runs
    /// the same structural checks a stored pattern must satisfy, so an
    /// invalid pattern is rejected before anything is persisted.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for unparseable dates or times,
    ///   a malformed frequency, or out-of-range schedule fields
    fn try_from(params: crate::params::CreatePattern) -> Result<Self> {
        let (frequency, start_date, end_date, start_time) = params.validate()?;

        let request = Self {
            rider: params.rider,
            pickup: params.pickup,
            dropoff: params.dropoff,
            frequency,
            start_date,
            end_date,
            start_time,
            duration_minutes: params.duration_minutes,
            max_occurrences: params.max_occurrences,
            skip_weekends: params.skip_weekends,
            skip_holidays: params.skip_holidays,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Parameters for updating a pattern to reduce function argument count.
///
/// Rider and start date are deliberately absent: the rider is the pattern's
/// identity, and the start date anchors sequence numbering for trips that
/// already exist. Moving either means creating a new pattern.
#[derive(Debug, Default, Clone)]
pub struct UpdatePatternRequest {
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub frequency: Option<Frequency>,
    pub start_time: Option<Time>,
    pub duration_minutes: Option<u32>,
    pub end_date: Option<Date>,
    pub clear_end_date: bool,
    pub max_occurrences: Option<u32>,
    pub clear_max_occurrences: bool,
    pub skip_weekends: Option<bool>,
    pub skip_holidays: Option<bool>,
}

impl UpdatePatternRequest {
    /// Whether the request changes anything at all.
    pub fn has_changes(&self) -> bool {
        self.pickup.is_some()
            || self.dropoff.is_some()
            || self.frequency.is_some()
            || self.start_time.is_some()
            || self.duration_minutes.is_some()
            || self.end_date.is_some()
            || self.clear_end_date
            || self.max_occurrences.is_some()
            || self.clear_max_occurrences
            || self.skip_weekends.is_some()
            || self.skip_holidays.is_some()
    }

    /// Merge the requested edits into a pattern record.
    ///
    /// The caller re-validates the merged pattern before persisting it.
    pub fn apply(&self, pattern: &mut RecurrencePattern) {
        if let Some(pickup) = &self.pickup {
            pattern.pickup = pickup.clone();
        }
        if let Some(dropoff) = &self.dropoff {
            pattern.dropoff = dropoff.clone();
        }
        if let Some(frequency) = self.frequency {
            pattern.frequency = frequency;
        }
        if let Some(start_time) = self.start_time {
            pattern.start_time = start_time;
        }
        if let Some(duration) = self.duration_minutes {
            pattern.duration_minutes = duration;
        }
        if self.clear_end_date {
            pattern.end_date = None;
        } else if let Some(end_date) = self.end_date {
            pattern.end_date = Some(end_date);
        }
        if self.clear_max_occurrences {
            pattern.max_occurrences = None;
        } else if let Some(max) = self.max_occurrences {
            pattern.max_occurrences = Some(max);
        }
        if let Some(skip) = self.skip_weekends {
            pattern.skip_weekends = skip;
        }
        if let Some(skip) = self.skip_holidays {
            pattern.skip_holidays = skip;
        }
    }
}

impl TryFrom<crate::params::UpdatePattern> for UpdatePatternRequest {
    type Error = crate::SchedulerError;

    /// Convert UpdatePattern parameters into a validated
    /// UpdatePatternRequest.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unparseable frequency,
    ///   time, or end date
    fn try_from(params: crate::params::UpdatePattern) -> Result<Self> {
        let (frequency, start_time, end_date) = params.validate()?;

        Ok(Self {
            pickup: params.pickup,
            dropoff: params.dropoff,
            frequency,
            start_time,
            duration_minutes: params.duration_minutes,
            end_date,
            clear_end_date: params.clear_end_date,
            max_occurrences: params.max_occurrences,
            clear_max_occurrences: params.clear_max_occurrences,
            skip_weekends: params.skip_weekends,
            skip_holidays: params.skip_holidays,
        })
    }
}

/// Validated field set for creating an ad hoc trip.
#[derive(Debug, Clone)]
pub struct NewTripRequest {
    pub rider: String,
    pub pickup: String,
    pub dropoff: String,
    pub scheduled_at: DateTime,
    pub duration_minutes: u32,
    pub driver: Option<String>,
}

impl TryFrom<crate::params::AddTrip> for NewTripRequest {
    type Error = crate::SchedulerError;

    /// Convert AddTrip parameters into a validated NewTripRequest.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unparseable date-time or a
    ///   zero duration
    fn try_from(params: crate::params::AddTrip) -> Result<Self> {
        let scheduled_at = params.validate()?;

        Ok(Self {
            rider: params.rider,
            pickup: params.pickup,
            dropoff: params.dropoff,
            scheduled_at,
            duration_minutes: params.duration_minutes,
            driver: params.driver,
        })
    }
}

/// Parameters for updating a trip through the dispatch workflow.
#[derive(Debug, Default, Clone)]
pub struct UpdateTripRequest {
    pub status: Option<TripStatus>,
    pub driver: Option<String>,
    pub cancel_reason: Option<String>,
}

impl TryFrom<crate::params::UpdateTrip> for UpdateTripRequest {
    type Error = crate::SchedulerError;

    /// Convert UpdateTrip parameters into a validated UpdateTripRequest.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unknown status name or a
    ///   cancel reason supplied without a cancellation
    fn try_from(params: crate::params::UpdateTrip) -> Result<Self> {
        let status = params.validate()?;

        Ok(Self {
            status,
            driver: params.driver,
            cancel_reason: params.reason,
        })
    }
}
