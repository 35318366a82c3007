//! Parameter structures for Rota operations
//!
//! This module contains shared parameter structures that can be used across
//! different interfaces (CLI today, other front ends later) without
//! framework-specific derives or dependencies. These structures provide a
//! clean interface for passing data between different layers of the
//! application.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! This module implements a parameter wrapper pattern that enables clean
//! separation of concerns between the core domain logic and interface-specific
//! frameworks:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │ Request Models  │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│ (parsed, typed) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ### Benefits
//!
//! 1. **Separation of Concerns**: Core parameter structures remain independent
//!    of UI framework dependencies (clap, schemars).
//!
//! 2. **Interface Flexibility**: Each interface can add its own
//!    framework-specific derives without polluting core logic.
//!
//! 3. **Conditional Compilation**: Features like JSON schema generation can be
//!    enabled only where needed, keeping core lightweight.
//!
//! 4. **Type Safety**: Dates, times, frequencies, and statuses arrive as
//!    strings from the outside world; each parameter structure owns the
//!    parsing via its `validate` method, so the request models underneath
//!    only ever see well-formed values.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use jiff::civil::{Date, DateTime, Time};

use crate::error::{Result, SchedulerError};
use crate::models::{Frequency, IntervalUnit, TripStatus, WeekdaySet};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like showing a pattern, deactivating or reactivating
/// it, and showing a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new recurrence pattern.
///
/// The frequency arrives as a kind name plus its companion fields: `days`
/// for weekly patterns, `day_of_month` for monthly ones, and `interval` with
/// `interval_unit` for custom cadences. Companions that do not belong to the
/// chosen kind are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePattern {
    /// Rider the recurring request belongs to (required)
    pub rider: String,
    /// Pickup location (required)
    pub pickup: String,
    /// Dropoff location (required)
    pub dropoff: String,
    /// Frequency kind: 'daily', 'weekly', 'monthly', or 'custom'
    pub frequency: String,
    /// Weekdays for weekly patterns, e.g. 'mon,wed,fri'
    pub days: Option<String>,
    /// Day of the month (1-31) for monthly patterns
    pub day_of_month: Option<i8>,
    /// Repeat interval for custom patterns
    pub interval: Option<u32>,
    /// Unit of the custom interval: 'days', 'weeks', or 'months'
    pub interval_unit: Option<String>,
    /// First date the pattern can produce an occurrence (YYYY-MM-DD)
    pub start_date: String,
    /// Optional last date, inclusive (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Pickup time shared by every occurrence (HH:MM or HH:MM:SS)
    pub start_time: String,
    /// Expected trip duration in minutes
    pub duration_minutes: u32,
    /// Optional cap on the total number of occurrences
    pub max_occurrences: Option<u32>,
    /// Skip occurrences falling on Saturday or Sunday
    #[serde(default)]
    pub skip_weekends: bool,
    /// Skip occurrences falling on a configured holiday
    #[serde(default)]
    pub skip_holidays: bool,
}

impl CreatePattern {
    /// Validate creation parameters and return the parsed schedule fields.
    ///
    /// # Returns
    ///
    /// A tuple of the parsed frequency, start date, optional end date, and
    /// start time.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unknown frequency kind, a
    ///   missing companion field, or an unparseable date or time
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rota_core::params::CreatePattern;
    ///
    /// let mut params = CreatePattern::default();
    /// params.rider = "Avery".to_string();
    /// params.frequency = "weekly".to_string();
    /// params.days = Some("mon,thu".to_string());
    /// params.start_date = "2025-03-03".to_string();
    /// params.start_time = "08:30".to_string();
    /// params.duration_minutes = 45;
    /// let (frequency, start, end, time) = params.validate()?;
    /// assert!(end.is_none());
    /// # use rota_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<(Frequency, Date, Option<Date>, Time)> {
        let frequency = parse_frequency(
            &self.frequency,
            self.days.as_deref(),
            self.day_of_month,
            self.interval,
            self.interval_unit.as_deref(),
        )?;

        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = self
            .end_date
            .as_deref()
            .map(|s| parse_date("end_date", s))
            .transpose()?;
        let start_time = parse_time("start_time", &self.start_time)?;

        Ok((frequency, start_date, end_date, start_time))
    }
}

/// Parameters for listing patterns.
///
/// Controls whether to show deactivated or active patterns, with an
/// optional rider filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPatterns {
    /// Whether to show deactivated patterns instead of active ones
    #[serde(default)]
    pub inactive: bool,
    /// Only patterns whose rider contains this text
    pub rider: Option<String>,
}

/// Parameters for updating an existing pattern.
///
/// Allows partial updates to pattern properties. The rider and start date
/// cannot be changed; create a new pattern instead. Changing the frequency
/// requires restating it in full, companions included.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePattern {
    /// Pattern ID to update (required)
    pub id: u64,
    /// Updated pickup location
    pub pickup: Option<String>,
    /// Updated dropoff location
    pub dropoff: Option<String>,
    /// New frequency kind: 'daily', 'weekly', 'monthly', or 'custom'
    pub frequency: Option<String>,
    /// Weekdays for a new weekly frequency, e.g. 'mon,wed,fri'
    pub days: Option<String>,
    /// Day of the month (1-31) for a new monthly frequency
    pub day_of_month: Option<i8>,
    /// Repeat interval for a new custom frequency
    pub interval: Option<u32>,
    /// Unit of the new custom interval: 'days', 'weeks', or 'months'
    pub interval_unit: Option<String>,
    /// Updated pickup time (HH:MM or HH:MM:SS)
    pub start_time: Option<String>,
    /// Updated trip duration in minutes
    pub duration_minutes: Option<u32>,
    /// Updated last date, inclusive (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Remove the end date so the pattern runs open-ended
    #[serde(default)]
    pub clear_end_date: bool,
    /// Updated cap on the total number of occurrences
    pub max_occurrences: Option<u32>,
    /// Remove the occurrence cap
    #[serde(default)]
    pub clear_max_occurrences: bool,
    /// Updated weekend skipping
    pub skip_weekends: Option<bool>,
    /// Updated holiday skipping
    pub skip_holidays: Option<bool>,
}

impl UpdatePattern {
    /// Validate update parameters and return the parsed schedule fields.
    ///
    /// # Returns
    ///
    /// A tuple of the parsed frequency, start time, and end date, each
    /// present only if the update changes it.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - when nothing is being changed,
    ///   when frequency companions are given without a frequency, when a
    ///   field is both set and cleared, or for unparseable values
    pub fn validate(&self) -> Result<(Option<Frequency>, Option<Time>, Option<Date>)> {
        if !self.has_changes() {
            return Err(SchedulerError::invalid_input("update")
                .with_reason("No changes provided"));
        }

        let frequency = match self.frequency.as_deref() {
            Some(kind) => Some(parse_frequency(
                kind,
                self.days.as_deref(),
                self.day_of_month,
                self.interval,
                self.interval_unit.as_deref(),
            )?),
            None => {
                if self.days.is_some()
                    || self.day_of_month.is_some()
                    || self.interval.is_some()
                    || self.interval_unit.is_some()
                {
                    return Err(SchedulerError::invalid_input("frequency").with_reason(
                        "Changing days, day of month, or interval requires the frequency to be given",
                    ));
                }
                None
            }
        };

        if self.end_date.is_some() && self.clear_end_date {
            return Err(SchedulerError::invalid_input("end_date")
                .with_reason("Cannot both set and clear the end date"));
        }
        if self.max_occurrences.is_some() && self.clear_max_occurrences {
            return Err(SchedulerError::invalid_input("max_occurrences")
                .with_reason("Cannot both set and clear the occurrence cap"));
        }

        let start_time = self
            .start_time
            .as_deref()
            .map(|s| parse_time("start_time", s))
            .transpose()?;
        let end_date = self
            .end_date
            .as_deref()
            .map(|s| parse_date("end_date", s))
            .transpose()?;

        Ok((frequency, start_time, end_date))
    }

    /// Whether any field of the update is set.
    fn has_changes(&self) -> bool {
        self.pickup.is_some()
            || self.dropoff.is_some()
            || self.frequency.is_some()
            || self.days.is_some()
            || self.day_of_month.is_some()
            || self.interval.is_some()
            || self.interval_unit.is_some()
            || self.start_time.is_some()
            || self.duration_minutes.is_some()
            || self.end_date.is_some()
            || self.clear_end_date
            || self.max_occurrences.is_some()
            || self.clear_max_occurrences
            || self.skip_weekends.is_some()
            || self.skip_holidays.is_some()
    }
}

/// Parameters for previewing a pattern's upcoming occurrences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PreviewPattern {
    /// Pattern ID to preview
    pub id: u64,
    /// How many upcoming occurrences to show
    pub count: u32,
}

impl PreviewPattern {
    /// Validate preview parameters.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - when the requested count is zero
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(SchedulerError::invalid_input("count")
                .with_reason("Preview needs at least one occurrence"));
        }
        Ok(())
    }
}

/// Parameters for permanently deleting a pattern.
///
/// Requires explicit confirmation to prevent accidental deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePattern {
    /// Pattern ID to delete
    pub id: u64,
    /// Explicit confirmation that the pattern should be deleted
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for adding a one-off trip outside any pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddTrip {
    /// Rider taking the trip (required)
    pub rider: String,
    /// Pickup location (required)
    pub pickup: String,
    /// Dropoff location (required)
    pub dropoff: String,
    /// Service date (YYYY-MM-DD)
    pub date: String,
    /// Pickup time (HH:MM or HH:MM:SS)
    pub time: String,
    /// Expected trip duration in minutes
    pub duration_minutes: u32,
    /// Optional driver assigned up front
    pub driver: Option<String>,
}

impl AddTrip {
    /// Validate trip parameters and return the combined pickup date-time.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unparseable date or time,
    ///   or a zero duration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rota_core::params::AddTrip;
    ///
    /// let mut params = AddTrip::default();
    /// params.rider = "Avery".to_string();
    /// params.date = "2025-03-07".to_string();
    /// params.time = "14:15".to_string();
    /// params.duration_minutes = 30;
    /// let scheduled_at = params.validate()?;
    /// assert_eq!(scheduled_at.hour(), 14);
    /// # use rota_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<DateTime> {
        if self.duration_minutes == 0 {
            return Err(SchedulerError::invalid_input("duration_minutes")
                .with_reason("Duration must be at least one minute"));
        }

        let date = parse_date("date", &self.date)?;
        let time = parse_time("time", &self.time)?;

        Ok(date.to_datetime(time))
    }
}

/// Parameters for listing trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTrips {
    /// Only trips materialized from this pattern
    pub pattern: Option<u64>,
    /// Only trips in this status
    pub status: Option<String>,
    /// Only trips on or after this date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Only trips on or before this date (YYYY-MM-DD)
    pub to: Option<String>,
    /// Only trips whose rider contains this text
    pub rider: Option<String>,
}

/// Parameters for updating a trip through the dispatch workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTrip {
    /// Trip ID to update (required)
    pub id: u64,
    /// New status ('in_progress', 'completed', or 'cancelled')
    pub status: Option<String>,
    /// Driver to assign while the trip is still scheduled
    pub driver: Option<String>,
    /// Reason for a cancellation; only valid with status 'cancelled'
    pub reason: Option<String>,
}

impl UpdateTrip {
    /// Validate trip update parameters and return the parsed status.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unknown status name, or a
    ///   reason given without cancelling
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rota_core::params::UpdateTrip;
    /// use rota_core::models::TripStatus;
    ///
    /// let mut params = UpdateTrip::default();
    /// params.id = 1;
    /// params.status = Some("completed".to_string());
    /// let status = params.validate()?;
    /// assert_eq!(status, Some(TripStatus::Completed));
    ///
    /// // Invalid - a reason without a cancellation
    /// let mut params = UpdateTrip::default();
    /// params.id = 1;
    /// params.reason = Some("rider called".to_string());
    /// assert!(params.validate().is_err());
    /// # use rota_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<Option<TripStatus>> {
        let status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<TripStatus>().map_err(|_| {
                    SchedulerError::invalid_input("status").with_reason(format!(
                        "Invalid status: {s}. Must be 'scheduled', 'in_progress', 'completed', or 'cancelled'"
                    ))
                })
            })
            .transpose()?;

        if self.reason.is_some() && status != Some(TripStatus::Cancelled) {
            return Err(SchedulerError::invalid_input("reason")
                .with_reason("A cancel reason requires status 'cancelled'"));
        }

        Ok(status)
    }
}

/// Parse a frequency kind and its companion fields into a typed frequency.
fn parse_frequency(
    kind: &str,
    days: Option<&str>,
    day_of_month: Option<i8>,
    interval: Option<u32>,
    interval_unit: Option<&str>,
) -> Result<Frequency> {
    match kind {
        "daily" => Ok(Frequency::Daily),
        "weekly" => {
            let days = days.ok_or_else(|| {
                SchedulerError::invalid_input("days")
                    .with_reason("Weekly patterns require the weekdays, e.g. 'mon,wed,fri'")
            })?;
            let days = days
                .parse::<WeekdaySet>()
                .map_err(|e| SchedulerError::invalid_input("days").with_reason(e))?;
            Ok(Frequency::Weekly { days })
        }
        "monthly" => {
            let day_of_month = day_of_month.ok_or_else(|| {
                SchedulerError::invalid_input("day_of_month")
                    .with_reason("Monthly patterns require the day of the month")
            })?;
            Ok(Frequency::Monthly { day_of_month })
        }
        "custom" => {
            let interval = interval.ok_or_else(|| {
                SchedulerError::invalid_input("interval")
                    .with_reason("Custom patterns require the repeat interval")
            })?;
            let unit = interval_unit.ok_or_else(|| {
                SchedulerError::invalid_input("interval_unit")
                    .with_reason("Custom patterns require the interval unit")
            })?;
            let unit = unit
                .parse::<IntervalUnit>()
                .map_err(|e| SchedulerError::invalid_input("interval_unit").with_reason(e))?;
            Ok(Frequency::Custom { interval, unit })
        }
        other => Err(SchedulerError::invalid_input("frequency").with_reason(format!(
            "Invalid frequency: {other}. Must be 'daily', 'weekly', 'monthly', or 'custom'"
        ))),
    }
}

/// Parse a YYYY-MM-DD date, naming the offending field on failure.
fn parse_date(field: &'static str, value: &str) -> Result<Date> {
    value
        .parse::<Date>()
        .map_err(|e| SchedulerError::invalid_input(field).with_reason(e.to_string()))
}

/// Parse an HH:MM or HH:MM:SS time, naming the offending field on failure.
fn parse_time(field: &'static str, value: &str) -> Result<Time> {
    value
        .parse::<Time>()
        .map_err(|e| SchedulerError::invalid_input(field).with_reason(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::Weekday;

    fn weekly_params() -> CreatePattern {
        let mut params = CreatePattern::default();
        params.rider = "Avery Quinn".to_string();
        params.pickup = "5 Mill Lane".to_string();
        params.dropoff = "Riverside Dialysis".to_string();
        params.frequency = "weekly".to_string();
        params.days = Some("mon,thu".to_string());
        params.start_date = "2025-03-03".to_string();
        params.start_time = "08:30".to_string();
        params.duration_minutes = 45;
        params
    }

    #[test]
    fn test_create_pattern_validate_weekly() {
        let params = weekly_params();

        let (frequency, start_date, end_date, start_time) = params.validate().unwrap();
        match frequency {
            Frequency::Weekly { days } => {
                assert!(days.contains(Weekday::Monday));
                assert!(days.contains(Weekday::Thursday));
                assert!(!days.contains(Weekday::Friday));
            }
            other => panic!("Expected weekly frequency, got {other:?}"),
        }
        assert_eq!(start_date.to_string(), "2025-03-03");
        assert_eq!(end_date, None);
        assert_eq!(start_time.to_string(), "08:30:00");
    }

    #[test]
    fn test_create_pattern_validate_weekly_missing_days() {
        let mut params = weekly_params();
        params.days = None;

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "days"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_pattern_validate_unknown_frequency() {
        let mut params = weekly_params();
        params.frequency = "fortnightly".to_string();

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, reason } => {
                assert_eq!(field, "frequency");
                assert!(reason.contains("fortnightly"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_pattern_validate_bad_date() {
        let mut params = weekly_params();
        params.start_date = "03/03/2025".to_string();

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "start_date"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_pattern_validate_custom_needs_both_fields() {
        let mut params = weekly_params();
        params.frequency = "custom".to_string();
        params.interval = Some(3);
        params.interval_unit = None;

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "interval_unit"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_pattern_validate_no_changes() {
        let mut params = UpdatePattern::default();
        params.id = 1;

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "update"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_pattern_validate_companions_need_frequency() {
        let mut params = UpdatePattern::default();
        params.id = 1;
        params.days = Some("tue,fri".to_string());

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "frequency"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_pattern_validate_set_and_clear_end_date() {
        let mut params = UpdatePattern::default();
        params.id = 1;
        params.end_date = Some("2025-06-30".to_string());
        params.clear_end_date = true;

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "end_date"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_pattern_validate_new_frequency() {
        let mut params = UpdatePattern::default();
        params.id = 1;
        params.frequency = Some("custom".to_string());
        params.interval = Some(2);
        params.interval_unit = Some("weeks".to_string());

        let (frequency, start_time, end_date) = params.validate().unwrap();
        assert_eq!(
            frequency,
            Some(Frequency::Custom {
                interval: 2,
                unit: IntervalUnit::Weeks
            })
        );
        assert_eq!(start_time, None);
        assert_eq!(end_date, None);
    }

    #[test]
    fn test_add_trip_validate_combines_date_and_time() {
        let mut params = AddTrip::default();
        params.rider = "Avery Quinn".to_string();
        params.date = "2025-03-07".to_string();
        params.time = "14:15".to_string();
        params.duration_minutes = 30;

        let scheduled_at = params.validate().unwrap();
        assert_eq!(scheduled_at.to_string(), "2025-03-07T14:15:00");
    }

    #[test]
    fn test_add_trip_validate_zero_duration() {
        let mut params = AddTrip::default();
        params.date = "2025-03-07".to_string();
        params.time = "14:15".to_string();
        params.duration_minutes = 0;

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "duration_minutes"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_trip_validate_status() {
        let mut params = UpdateTrip::default();
        params.id = 1;
        params.status = Some("in_progress".to_string());

        assert_eq!(params.validate().unwrap(), Some(TripStatus::InProgress));
    }

    #[test]
    fn test_update_trip_validate_reason_requires_cancellation() {
        let mut params = UpdateTrip::default();
        params.id = 1;
        params.status = Some("completed".to_string());
        params.reason = Some("rider called".to_string());

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "reason"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_trip_validate_reason_with_cancellation() {
        let mut params = UpdateTrip::default();
        params.id = 1;
        params.status = Some("cancelled".to_string());
        params.reason = Some("rider called".to_string());

        assert_eq!(params.validate().unwrap(), Some(TripStatus::Cancelled));
    }

    #[test]
    fn test_preview_pattern_validate_zero_count() {
        let params = PreviewPattern { id: 1, count: 0 };

        match params.validate().unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "count"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }
}
