//! Converging stored trips onto a pattern's current schedule.
//!
//! Reconciliation runs after anything that changes what a pattern should
//! produce: an edit, a deactivation, or a reactivation. It diffs the trips
//! on file against a fresh expansion and applies cancel-then-create, never
//! rewriting a trip in place. A cancelled-and-recreated occurrence is a new
//! trip; dispatch state never leaks across the edit.

use std::collections::HashSet;

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::Transaction;

use crate::{
    calendar::ExclusionCalendar,
    engine,
    error::{Result, SchedulerError},
    models::{ReconcileReport, RecurrencePattern, TripStatus},
};

/// Reconciles a pattern's future trips inside the caller's transaction.
///
/// The desired set is the pattern's expansion from `today` out to the
/// horizon, stretched to cover the latest live trip already on file so a
/// previously materialized far-future occurrence takes part in the diff
/// instead of being ignored. Scheduled trips whose occurrence is gone are
/// cancelled with the given reason, then occurrences without a live trip
/// are filled in. Trips dated before today, and future trips in progress
/// or completed, are never touched; their slots stay claimed even when the
/// recomputed schedule disagrees, because dispatched history outranks it.
///
/// An inactive pattern has an empty desired set, which turns the diff into
/// a plain cancellation of every future scheduled trip.
pub(super) fn reconcile_in_tx(
    tx: &Transaction<'_>,
    pattern: &RecurrencePattern,
    today: Date,
    horizon_days: i64,
    calendar: &dyn ExclusionCalendar,
    reason: &str,
) -> Result<ReconcileReport> {
    let existing = super::Database::future_pattern_trips(tx, pattern.id, today)?;

    let mut window_end = engine::add_days(today, horizon_days.max(0)).unwrap_or(Date::MAX);
    for trip in &existing {
        if trip.status.is_live() && trip.date() > window_end {
            window_end = trip.date();
        }
    }

    let desired = if pattern.is_active() {
        let exclusions = calendar.exclusions_in(today, window_end);
        engine::expand(pattern, today, window_end, &exclusions)?
    } else {
        Vec::new()
    };

    let desired_keys: HashSet<(u32, Date)> = desired
        .iter()
        .map(|o| (o.sequence_index, o.date))
        .collect();

    let now_str = Timestamp::now().to_string();

    // Cancel pass: scheduled trips whose occurrence the schedule no longer
    // produces
    let mut cancelled: u32 = 0;
    for trip in &existing {
        if trip.status != TripStatus::Scheduled {
            continue;
        }
        let Some(sequence_index) = trip.sequence_index else {
            continue;
        };
        if desired_keys.contains(&(sequence_index, trip.date())) {
            continue;
        }
        if super::Database::cancel_scheduled_trip(tx, trip.id, reason, &now_str)? {
            cancelled += 1;
        }
    }

    // Create pass: desired occurrences whose slot is free after the
    // cancellations above
    let live = super::Database::live_sequence_indices(tx, pattern.id)?;

    let mut created: u32 = 0;
    for occurrence in &desired {
        if live.contains(&occurrence.sequence_index) {
            continue;
        }
        match super::Database::insert_occurrence_trip(tx, pattern, occurrence, &now_str) {
            Ok(_) => created += 1,
            Err(SchedulerError::DuplicateTrip { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(ReconcileReport {
        pattern_id: pattern.id,
        desired: desired.len() as u32,
        created,
        cancelled,
    })
}
