//! Exclusion calendars supplying holiday dates.
//!
//! Holiday data is owned by an external collaborator; the scheduling core
//! only ever consumes a set of excluded dates for a range. The trait seam
//! keeps the engine deterministic and lets tests pin exclusions exactly.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use jiff::civil::Date;

use crate::error::{Result, SchedulerError};

/// Source of excluded dates for a date range.
pub trait ExclusionCalendar: Send + Sync {
    /// Excluded dates within `[start, end]`, both ends inclusive.
    fn exclusions_in(&self, start: Date, end: Date) -> HashSet<Date>;
}

/// Calendar with no exclusions at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusions;

impl ExclusionCalendar for NoExclusions {
    fn exclusions_in(&self, _start: Date, _end: Date) -> HashSet<Date> {
        HashSet::new()
    }
}

/// A fixed set of holiday dates.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    dates: HashSet<Date>,
}

impl StaticHolidays {
    /// Build a calendar from any iterator of dates.
    pub fn new<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = Date>,
    {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Load a calendar from a text file with one `YYYY-MM-DD` date per
    /// line. Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::FileSystem` when the file cannot be read
    /// and `SchedulerError::InvalidInput` for a line that is not a date.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SchedulerError::FileSystem {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dates = HashSet::new();
        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let date = line.parse::<Date>().map_err(|e| {
                SchedulerError::invalid_input("holidays")
                    .with_reason(format!("line {}: {}", index + 1, e))
            })?;
            dates.insert(date);
        }

        Ok(Self { dates })
    }

    /// Whether the calendar contains the given date.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    /// Number of dates in the calendar.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the calendar is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl ExclusionCalendar for StaticHolidays {
    fn exclusions_in(&self, start: Date, end: Date) -> HashSet<Date> {
        self.dates
            .iter()
            .copied()
            .filter(|date| *date >= start && *date <= end)
            .collect()
    }
}
