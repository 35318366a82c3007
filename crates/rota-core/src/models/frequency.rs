//! Recurrence frequency as a tagged variant.
//!
//! Modeling the frequency-specific fields inside their variant makes invalid
//! combinations (a weekly pattern with a day-of-month, a daily pattern with
//! an interval) unrepresentable instead of runtime-checked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WeekdaySet;
use crate::error::{Result, SchedulerError};

/// Unit for custom-interval recurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    /// Fixed day count between occurrences
    Days,
    /// Fixed week count between occurrences
    Weeks,
    /// Calendar-month arithmetic, preserving day-of-month where possible
    Months,
}

impl FromStr for IntervalUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "days" => Ok(IntervalUnit::Days),
            "week" | "weeks" => Ok(IntervalUnit::Weeks),
            "month" | "months" => Ok(IntervalUnit::Months),
            _ => Err(format!("Invalid interval unit: {s}")),
        }
    }
}

impl IntervalUnit {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalUnit::Days => "days",
            IntervalUnit::Weeks => "weeks",
            IntervalUnit::Months => "months",
        }
    }
}

/// How a recurrence pattern repeats over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    /// Every calendar day
    Daily,

    /// Every calendar day whose weekday is in the set
    Weekly { days: WeekdaySet },

    /// A fixed day of each month, clamped to the last day of short months
    Monthly { day_of_month: i8 },

    /// Every `interval` units from the start date
    Custom { interval: u32, unit: IntervalUnit },
}

impl Frequency {
    /// The frequency kind name used in database rows and CLI arguments.
    pub fn kind(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly { .. } => "weekly",
            Frequency::Monthly { .. } => "monthly",
            Frequency::Custom { .. } => "custom",
        }
    }

    /// Check the variant-specific value ranges.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidInput` for an empty weekly day set, a
    /// day-of-month outside 1..=31, or a zero custom interval.
    pub fn validate(&self) -> Result<()> {
        match self {
            Frequency::Daily => Ok(()),
            Frequency::Weekly { days } => {
                if days.is_empty() {
                    Err(SchedulerError::invalid_input("days")
                        .with_reason("Weekly patterns require at least one weekday"))
                } else {
                    Ok(())
                }
            }
            Frequency::Monthly { day_of_month } => {
                if (1..=31).contains(day_of_month) {
                    Ok(())
                } else {
                    Err(SchedulerError::invalid_input("day_of_month")
                        .with_reason("Day of month must be between 1 and 31"))
                }
            }
            Frequency::Custom { interval, .. } => {
                if *interval == 0 {
                    Err(SchedulerError::invalid_input("interval")
                        .with_reason("Custom interval must be at least 1"))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly { days } => write!(f, "weekly on {days}"),
            Frequency::Monthly { day_of_month } => {
                write!(f, "monthly on day {day_of_month}")
            }
            Frequency::Custom { interval, unit } => {
                write!(f, "every {interval} {}", unit.as_str())
            }
        }
    }
}
