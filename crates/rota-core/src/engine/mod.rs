//! Recurrence expansion engine.
//!
//! [`expand`] turns a pattern plus a date window into the ordered list of
//! occurrences the pattern implies. The function is pure: no clock, no
//! I/O, and the same inputs always produce the same output, which is what
//! makes materialization idempotent and reconciliation replayable.
//!
//! # Sequence numbering
//!
//! Candidates are always generated from the pattern's start date, even
//! when the requested window begins later. Occurrences before the window
//! are counted but not emitted, so an occurrence keeps the same
//! `sequence_index` no matter which window it is observed through. That
//! stability is what the `(pattern_id, sequence_index)` idempotency key
//! relies on.
//!
//! # Filtering
//!
//! Weekend and holiday filters drop a candidate outright; nothing shifts
//! to a neighboring day. Dropped candidates consume neither a sequence
//! index nor a slot toward `max_occurrences`, which counts surviving
//! occurrences only.
//!
//! # Termination
//!
//! Generation stops at the first of: the window end, the pattern's end
//! date, or `max_occurrences` surviving occurrences. Date arithmetic that
//! would leave the representable calendar ends the series quietly instead
//! of failing.

use std::collections::HashSet;

use jiff::civil::Date;
use jiff::ToSpan;

use crate::error::Result;
use crate::models::{Frequency, IntervalUnit, Occurrence, RecurrencePattern, WeekdaySet};


/// Conservatively below jiff's span limits; any step this large leaves the
/// civil calendar anyway.
const MAX_DAY_STEP: i64 = 7_000_000;

/// Expand a pattern into its occurrences within `[window_start,
/// window_end]`, ascending by date.
///
/// `exclusions` is the holiday set consulted when the pattern sets
/// `skip_holidays`; callers obtain it from an
/// [`ExclusionCalendar`](crate::calendar::ExclusionCalendar) for a range
/// covering the window.
///
/// A backwards window yields an empty list.
///
/// # Errors
///
/// Returns `SchedulerError::InvalidInput` when the pattern is structurally
/// invalid. A pattern that passes [`RecurrencePattern::validate`] never
/// makes this function fail.
pub fn expand(
    pattern: &RecurrencePattern,
    window_start: Date,
    window_end: Date,
    exclusions: &HashSet<Date>,
) -> Result<Vec<Occurrence>> {
    pattern.validate()?;

    let mut occurrences = Vec::new();
    if window_end < window_start {
        return Ok(occurrences);
    }

    let mut candidates = Candidates::new(pattern);
    let mut survivors: u32 = 0;

    while let Some(date) = candidates.next_date() {
        if date > window_end {
            break;
        }
        if let Some(end) = pattern.end_date {
            if date > end {
                break;
            }
        }
        if is_filtered(pattern, date, exclusions) {
            continue;
        }

        let sequence_index = survivors;
        survivors += 1;

        if date >= window_start {
            occurrences.push(Occurrence {
                pattern_id: pattern.id,
                sequence_index,
                date,
                start: date.to_datetime(pattern.start_time),
            });
        }

        if let Some(max) = pattern.max_occurrences {
            if survivors >= max {
                break;
            }
        }
    }

    Ok(occurrences)
}

/// Whether a candidate date is dropped by the pattern's filters.
fn is_filtered(pattern: &RecurrencePattern, date: Date, exclusions: &HashSet<Date>) -> bool {
    if pattern.skip_weekends && WeekdaySet::WEEKEND.contains(date.weekday()) {
        return true;
    }
    if pattern.skip_holidays && exclusions.contains(&date) {
        return true;
    }
    false
}

/// Candidate date generator for one pattern, ascending and exhaustible.
enum Candidates {
    /// Fixed day stride from the start date, optionally keeping only
    /// matching weekdays (daily, weekly, custom day/week intervals).
    DayStep {
        next: Option<Date>,
        step_days: i64,
        weekdays: Option<WeekdaySet>,
    },
    /// A target day in successive months (monthly, custom month
    /// intervals). The day is re-clamped to each month's length.
    MonthStep {
        start: Date,
        anchor_day: i8,
        interval_months: i64,
        n: i64,
    },
}

impl Candidates {
    fn new(pattern: &RecurrencePattern) -> Self {
        let start = pattern.start_date;
        match pattern.frequency {
            Frequency::Daily => Candidates::DayStep {
                next: Some(start),
                step_days: 1,
                weekdays: None,
            },
            Frequency::Weekly { days } => Candidates::DayStep {
                next: Some(start),
                step_days: 1,
                weekdays: Some(days),
            },
            Frequency::Monthly { day_of_month } => Candidates::MonthStep {
                start,
                anchor_day: day_of_month,
                interval_months: 1,
                n: 0,
            },
            Frequency::Custom { interval, unit } => match unit {
                IntervalUnit::Days => Candidates::DayStep {
                    next: Some(start),
                    step_days: i64::from(interval),
                    weekdays: None,
                },
                IntervalUnit::Weeks => Candidates::DayStep {
                    next: Some(start),
                    step_days: i64::from(interval) * 7,
                    weekdays: None,
                },
                IntervalUnit::Months => Candidates::MonthStep {
                    start,
                    anchor_day: start.day(),
                    interval_months: i64::from(interval),
                    n: 0,
                },
            },
        }
    }

    /// The next candidate date, or `None` once the series leaves the
    /// representable calendar.
    fn next_date(&mut self) -> Option<Date> {
        match self {
            Candidates::DayStep {
                next,
                step_days,
                weekdays,
            } => loop {
                let current = (*next)?;
                *next = add_days(current, *step_days);
                match weekdays {
                    Some(set) if !set.contains(current.weekday()) => continue,
                    _ => return Some(current),
                }
            },
            Candidates::MonthStep {
                start,
                anchor_day,
                interval_months,
                n,
            } => loop {
                let months = n.checked_mul(*interval_months)?;
                *n = n.checked_add(1)?;
                let candidate = nth_month_day(*start, months, *anchor_day)?;
                // Only the start month can produce a date before the start.
                if candidate < *start {
                    continue;
                }
                return Some(candidate);
            },
        }
    }
}

/// Step `date` forward by `days`, or `None` past the calendar's edge.
pub(crate) fn add_days(date: Date, days: i64) -> Option<Date> {
    if days > MAX_DAY_STEP {
        return None;
    }
    date.checked_add(days.days()).ok()
}

/// The target day in the month `months` after `anchor`'s month, clamped to
/// that month's last day.
fn nth_month_day(anchor: Date, months: i64, day: i8) -> Option<Date> {
    let zero_based = (i64::from(anchor.year())) * 12 + i64::from(anchor.month()) - 1;
    let target = zero_based.checked_add(months)?;
    let year = i16::try_from(target.div_euclid(12)).ok()?;
    let month = (target.rem_euclid(12) + 1) as i8;
    let first = Date::new(year, month, 1).ok()?;
    let clamped = day.min(first.days_in_month());
    Date::new(year, month, clamped).ok()
}
