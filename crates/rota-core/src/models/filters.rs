//! Filter types for querying patterns and trips.

use jiff::civil::Date;

use super::{PatternStatus, TripStatus};
use crate::error::SchedulerError;

/// Filter options for querying patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    /// Filter by rider (case-insensitive partial match)
    pub rider_contains: Option<String>,

    /// Filter by pattern status (active/inactive)
    /// If None, defaults to showing only active patterns
    pub status: Option<PatternStatus>,

    /// Show all patterns regardless of status
    pub include_inactive: bool,
}

impl From<&crate::params::ListPatterns> for PatternFilter {
    /// Convert ListPatterns parameters to a PatternFilter for pattern
    /// queries.
    ///
    /// - `inactive: false` → Filter for active patterns only
    /// - `inactive: true` → Filter for deactivated patterns only
    fn from(params: &crate::params::ListPatterns) -> Self {
        Self {
            rider_contains: params.rider.clone(),
            status: Some(if params.inactive {
                PatternStatus::Inactive
            } else {
                PatternStatus::Active
            }),
            include_inactive: params.inactive,
        }
    }
}

/// Filter options for querying trips.
#[derive(Debug, Clone, Default)]
pub struct TripFilter {
    /// Only trips materialized from this pattern
    pub pattern_id: Option<u64>,

    /// Only trips in this status
    pub status: Option<TripStatus>,

    /// Only trips scheduled on or after this date
    pub from: Option<Date>,

    /// Only trips scheduled on or before this date
    pub to: Option<Date>,

    /// Filter by rider (case-insensitive partial match)
    pub rider_contains: Option<String>,
}

impl TryFrom<&crate::params::ListTrips> for TripFilter {
    type Error = SchedulerError;

    /// Convert ListTrips parameters to a TripFilter, parsing the status
    /// name and date bounds.
    ///
    /// # Errors
    ///
    /// * `SchedulerError::InvalidInput` - for an unknown status name or a
    ///   date that is not in `YYYY-MM-DD` form
    fn try_from(params: &crate::params::ListTrips) -> Result<Self, Self::Error> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<TripStatus>()
                    .map_err(|e| SchedulerError::invalid_input("status").with_reason(e))
            })
            .transpose()?;

        let parse_date = |field: &'static str, value: &str| {
            value
                .parse::<Date>()
                .map_err(|e| SchedulerError::invalid_input(field).with_reason(e.to_string()))
        };

        let from = params
            .from
            .as_deref()
            .map(|s| parse_date("from", s))
            .transpose()?;
        let to = params
            .to
            .as_deref()
            .map(|s| parse_date("to", s))
            .transpose()?;

        Ok(Self {
            pattern_id: params.pattern,
            status,
            from,
            to,
            rider_contains: params.rider.clone(),
        })
    }
}
