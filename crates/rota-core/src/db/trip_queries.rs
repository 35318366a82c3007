//! Trip CRUD operations and queries.

use std::collections::HashSet;

use jiff::civil::DateTime;
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Transaction};

use crate::{
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{
        NewTripRequest, Occurrence, RecurrencePattern, Trip, TripFilter, TripStatus,
        UpdateTripRequest,
    },
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (pattern_id, sequence_index, rider, pickup, dropoff, scheduled_at, duration_minutes, status, driver, cancel_reason, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const SELECT_TRIP_SQL: &str = "SELECT id, pattern_id, sequence_index, rider, pickup, dropoff, scheduled_at, duration_minutes, status, driver, cancel_reason, created_at, updated_at FROM trips WHERE id = ?1";
const UPDATE_TRIP_SQL: &str =
    "UPDATE trips SET status = ?1, driver = ?2, cancel_reason = ?3, updated_at = ?4 WHERE id = ?5";
const SELECT_LIVE_SEQUENCE_INDICES_SQL: &str = "SELECT sequence_index FROM trips WHERE pattern_id = ?1 AND status != 'cancelled' AND sequence_index IS NOT NULL";
const SELECT_FUTURE_PATTERN_TRIPS_SQL: &str = "SELECT id, pattern_id, sequence_index, rider, pickup, dropoff, scheduled_at, duration_minutes, status, driver, cancel_reason, created_at, updated_at FROM trips WHERE pattern_id = ?1 AND substr(scheduled_at, 1, 10) >= ?2 ORDER BY scheduled_at";
const CANCEL_SCHEDULED_TRIP_SQL: &str = "UPDATE trips SET status = 'cancelled', cancel_reason = ?1, updated_at = ?2 WHERE id = ?3 AND status = 'scheduled'";

// Base query for trip listing
const TRIP_COLUMNS: &str = "id, pattern_id, sequence_index, rider, pickup, dropoff, scheduled_at, duration_minutes, status, driver, cancel_reason, created_at, updated_at";

/// Reason recorded when a trip is cancelled without one being given.
const DEFAULT_CANCEL_REASON: &str = "cancelled by operator";

/// Whether a rusqlite error is a UNIQUE constraint violation.
fn is_unique_violation(error: &rusqlite::Error) -> bool {
    match error {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

impl super::Database {
    /// Helper function to construct a Trip from a database row
    pub(super) fn build_trip_from_row(row: &rusqlite::Row) -> rusqlite::Result<Trip> {
        let status_str: String = row.get(8)?;
        let status = status_str.parse::<TripStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                Type::Text,
                format!("Invalid trip status: {status_str}").into(),
            )
        })?;

        Ok(Trip {
            id: row.get::<_, i64>(0)? as u64,
            pattern_id: row.get::<_, Option<i64>>(1)?.map(|n| n as u64),
            sequence_index: row.get::<_, Option<i64>>(2)?.map(|n| n as u32),
            rider: row.get(3)?,
            pickup: row.get(4)?,
            dropoff: row.get(5)?,
            scheduled_at: row.get::<_, String>(6)?.parse::<DateTime>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            duration_minutes: row.get::<_, i64>(7)? as u32,
            status,
            driver: row.get(9)?,
            cancel_reason: row.get(10)?,
            created_at: row.get::<_, String>(11)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(12)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Inserts a trip for one expanded occurrence inside the caller's
    /// transaction.
    ///
    /// The occurrence slot may already hold a live trip; the partial unique
    /// index surfaces that as a constraint violation, which is mapped to
    /// `SchedulerError::DuplicateTrip` so callers can report the occurrence
    /// as already materialized.
    pub(super) fn insert_occurrence_trip(
        tx: &Transaction<'_>,
        pattern: &RecurrencePattern,
        occurrence: &Occurrence,
        now_str: &str,
    ) -> Result<u64> {
        let result = tx.execute(
            INSERT_TRIP_SQL,
            params![
                pattern.id as i64,
                i64::from(occurrence.sequence_index),
                &pattern.rider,
                &pattern.pickup,
                &pattern.dropoff,
                occurrence.start.to_string(),
                i64::from(pattern.duration_minutes),
                TripStatus::Scheduled.as_str(),
                None::<String>,
                None::<String>,
                now_str,
                now_str,
            ],
        );

        match result {
            Ok(_) => Ok(tx.last_insert_rowid() as u64),
            Err(e) if is_unique_violation(&e) => Err(SchedulerError::duplicate_trip(
                pattern.id,
                occurrence.sequence_index,
            )),
            Err(e) => Err(SchedulerError::database("Failed to insert trip").with_source(e)),
        }
    }

    /// Sequence indices of every non-cancelled trip the pattern has, past
    /// and future. These are the occurrence slots that are taken.
    pub(super) fn live_sequence_indices(
        tx: &Transaction<'_>,
        pattern_id: u64,
    ) -> Result<HashSet<u32>> {
        let mut stmt = tx
            .prepare(SELECT_LIVE_SEQUENCE_INDICES_SQL)
            .db_context("Failed to prepare query")?;

        let indices = stmt
            .query_map(params![pattern_id as i64], |row| {
                Ok(row.get::<_, i64>(0)? as u32)
            })
            .db_context("Failed to query live occurrences")?
            .collect::<std::result::Result<HashSet<_>, _>>()
            .db_context("Failed to fetch live occurrences")?;

        Ok(indices)
    }

    /// All of a pattern's trips scheduled on or after the given date, in
    /// schedule order.
    pub(super) fn future_pattern_trips(
        tx: &Transaction<'_>,
        pattern_id: u64,
        from: jiff::civil::Date,
    ) -> Result<Vec<Trip>> {
        let mut stmt = tx
            .prepare(SELECT_FUTURE_PATTERN_TRIPS_SQL)
            .db_context("Failed to prepare query")?;

        let trips = stmt
            .query_map(
                params![pattern_id as i64, from.to_string()],
                Self::build_trip_from_row,
            )
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        Ok(trips)
    }

    /// Cancels a single trip inside the caller's transaction, but only if
    /// it is still scheduled. Returns whether a row changed.
    pub(super) fn cancel_scheduled_trip(
        tx: &Transaction<'_>,
        trip_id: u64,
        reason: &str,
        now_str: &str,
    ) -> Result<bool> {
        let rows_affected = tx
            .execute(
                CANCEL_SCHEDULED_TRIP_SQL,
                params![reason, now_str, trip_id as i64],
            )
            .db_context("Failed to cancel trip")?;

        Ok(rows_affected > 0)
    }

    /// Creates a one-off trip that is not tied to any pattern.
    pub fn create_trip(&mut self, request: &NewTripRequest) -> Result<Trip> {
        if request.duration_minutes == 0 {
            return Err(SchedulerError::invalid_input("duration_minutes")
                .with_reason("Duration must be at least one minute"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_TRIP_SQL,
            params![
                None::<i64>,
                None::<i64>,
                &request.rider,
                &request.pickup,
                &request.dropoff,
                request.scheduled_at.to_string(),
                i64::from(request.duration_minutes),
                TripStatus::Scheduled.as_str(),
                request.driver.as_deref(),
                None::<String>,
                &now_str,
                &now_str,
            ],
        )
        .db_context("Failed to insert trip")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Trip {
            id,
            pattern_id: None,
            sequence_index: None,
            rider: request.rider.clone(),
            pickup: request.pickup.clone(),
            dropoff: request.dropoff.clone(),
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            status: TripStatus::Scheduled,
            driver: request.driver.clone(),
            cancel_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a trip by its ID.
    pub fn get_trip(&self, id: u64) -> Result<Option<Trip>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRIP_SQL)
            .db_context("Failed to prepare query")?;

        let trip = stmt
            .query_row(params![id as i64], Self::build_trip_from_row)
            .optional()
            .db_context("Failed to query trip")?;

        Ok(trip)
    }

    /// Lists trips with optional filtering, in schedule order.
    pub fn list_trips(&self, filter: Option<&TripFilter>) -> Result<Vec<Trip>> {
        let mut query = format!("SELECT {TRIP_COLUMNS} FROM trips");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(pattern_id) = f.pattern_id {
                conditions.push("pattern_id = ?");
                params_vec.push(Box::new(pattern_id as i64));
            }

            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }

            if let Some(from) = f.from {
                conditions.push("substr(scheduled_at, 1, 10) >= ?");
                params_vec.push(Box::new(from.to_string()));
            }

            if let Some(to) = f.to {
                conditions.push("substr(scheduled_at, 1, 10) <= ?");
                params_vec.push(Box::new(to.to_string()));
            }

            if let Some(ref rider) = f.rider_contains {
                conditions.push("rider LIKE ?");
                params_vec.push(Box::new(format!("%{rider}%")));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY scheduled_at");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let trips = stmt
            .query_map(&params_refs[..], Self::build_trip_from_row)
            .db_context("Failed to query trips")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trips")?;

        Ok(trips)
    }

    /// Updates a trip through the dispatch workflow.
    ///
    /// Status changes must follow the allowed transitions, so completed and
    /// cancelled trips are immutable. A driver can only be assigned or
    /// changed while the trip is still scheduled, and a cancel reason is
    /// only accepted together with a cancellation.
    pub fn update_trip(&mut self, trip_id: u64, request: &UpdateTripRequest) -> Result<Trip> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let trip = tx
            .query_row(
                SELECT_TRIP_SQL,
                params![trip_id as i64],
                Self::build_trip_from_row,
            )
            .optional()
            .db_context("Failed to query trip")?
            .ok_or(SchedulerError::TripNotFound { id: trip_id })?;

        // Check if there's anything to update
        if request.status.is_none() && request.driver.is_none() && request.cancel_reason.is_none() {
            return Ok(trip);
        }

        // Driver changes are only allowed while the trip is still waiting
        if request.driver.is_some() && trip.status != TripStatus::Scheduled {
            return Err(SchedulerError::invalid_input("driver")
                .with_reason("Driver can only be assigned while the trip is scheduled"));
        }

        let new_status = match request.status {
            Some(next) => {
                if !trip.status.can_transition_to(next) {
                    return Err(SchedulerError::invalid_input("status").with_reason(format!(
                        "Cannot move a {} trip to {}",
                        trip.status.as_str(),
                        next.as_str()
                    )));
                }
                next
            }
            None => trip.status,
        };

        // A cancel reason only makes sense on a cancellation
        if request.cancel_reason.is_some() && new_status != TripStatus::Cancelled {
            return Err(SchedulerError::invalid_input("reason")
                .with_reason("A cancel reason requires the trip to be cancelled"));
        }

        let new_driver = request.driver.clone().or_else(|| trip.driver.clone());
        let new_cancel_reason = if new_status == TripStatus::Cancelled {
            request
                .cancel_reason
                .clone()
                .or_else(|| Some(DEFAULT_CANCEL_REASON.to_string()))
        } else {
            None
        };

        let now = Timestamp::now();

        tx.execute(
            UPDATE_TRIP_SQL,
            params![
                new_status.as_str(),
                &new_driver,
                &new_cancel_reason,
                now.to_string(),
                trip_id as i64
            ],
        )
        .db_context("Failed to update trip")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Trip {
            status: new_status,
            driver: new_driver,
            cancel_reason: new_cancel_reason,
            updated_at: now,
            ..trip
        })
    }
}
