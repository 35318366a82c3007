//! Recurrence pattern CRUD operations and queries.

use jiff::civil::{Date, Time};
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, TransactionBehavior};

use crate::{
    calendar::ExclusionCalendar,
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{
        Frequency, IntervalUnit, NewPatternRequest, PatternFilter, PatternStatus, PatternSummary,
        ReconcileReport, RecurrencePattern, TripCounts, UpdatePatternRequest, WeekdaySet,
    },
};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PATTERN_SQL: &str = "INSERT INTO patterns (rider, pickup, dropoff, frequency, days_of_week, day_of_month, interval, interval_unit, start_date, end_date, start_time, duration_minutes, max_occurrences, skip_weekends, skip_holidays, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)";
pub(super) const SELECT_PATTERN_SQL: &str = "SELECT id, rider, pickup, dropoff, frequency, days_of_week, day_of_month, interval, interval_unit, start_date, end_date, start_time, duration_minutes, max_occurrences, skip_weekends, skip_holidays, status, created_at, updated_at FROM patterns WHERE id = ?1";
const CHECK_PATTERN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM patterns WHERE id = ?1)";
const UPDATE_PATTERN_SQL: &str = "UPDATE patterns SET pickup = ?1, dropoff = ?2, frequency = ?3, days_of_week = ?4, day_of_month = ?5, interval = ?6, interval_unit = ?7, start_time = ?8, duration_minutes = ?9, end_date = ?10, max_occurrences = ?11, skip_weekends = ?12, skip_holidays = ?13, updated_at = ?14 WHERE id = ?15";
const UPDATE_PATTERN_STATUS_SQL: &str =
    "UPDATE patterns SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const CANCEL_FUTURE_SCHEDULED_SQL: &str = "UPDATE trips SET status = 'cancelled', cancel_reason = ?1, updated_at = ?2 WHERE pattern_id = ?3 AND status = 'scheduled' AND substr(scheduled_at, 1, 10) >= ?4";
const DETACH_PATTERN_TRIPS_SQL: &str =
    "UPDATE trips SET pattern_id = NULL, sequence_index = NULL, updated_at = ?1 WHERE pattern_id = ?2";
const DELETE_PATTERN_SQL: &str = "DELETE FROM patterns WHERE id = ?1";

// Base queries for pattern listing
const PATTERN_SUMMARY_COLUMNS: &str = "id, rider, pickup, dropoff, frequency, days_of_week, day_of_month, interval, interval_unit, start_date, end_date, start_time, duration_minutes, max_occurrences, skip_weekends, skip_holidays, status, created_at, updated_at, total_trips, scheduled_trips, completed_trips, cancelled_trips";
const PATTERN_SUMMARIES_VIEW: &str = "pattern_summaries";
const ALL_PATTERN_SUMMARIES_VIEW: &str = "all_pattern_summaries";

/// Splits a frequency into its storage columns: kind, days of week, day of
/// month, interval, and interval unit.
fn frequency_columns(
    frequency: &Frequency,
) -> (
    &'static str,
    Option<String>,
    Option<i64>,
    Option<i64>,
    Option<&'static str>,
) {
    match frequency {
        Frequency::Daily => ("daily", None, None, None, None),
        Frequency::Weekly { days } => ("weekly", Some(days.to_string()), None, None, None),
        Frequency::Monthly { day_of_month } => {
            ("monthly", None, Some(i64::from(*day_of_month)), None, None)
        }
        Frequency::Custom { interval, unit } => (
            "custom",
            None,
            None,
            Some(i64::from(*interval)),
            Some(unit.as_str()),
        ),
    }
}

/// Rebuilds a frequency from its storage columns.
fn frequency_from_columns(
    kind: &str,
    days_of_week: Option<String>,
    day_of_month: Option<i64>,
    interval: Option<i64>,
    interval_unit: Option<String>,
) -> std::result::Result<Frequency, String> {
    match kind {
        "daily" => Ok(Frequency::Daily),
        "weekly" => {
            let days =
                days_of_week.ok_or_else(|| "weekly pattern is missing days_of_week".to_string())?;
            Ok(Frequency::Weekly {
                days: days.parse::<WeekdaySet>()?,
            })
        }
        "monthly" => {
            let day = day_of_month
                .ok_or_else(|| "monthly pattern is missing day_of_month".to_string())?;
            let day_of_month =
                i8::try_from(day).map_err(|_| format!("Invalid day_of_month: {day}"))?;
            Ok(Frequency::Monthly { day_of_month })
        }
        "custom" => {
            let interval =
                interval.ok_or_else(|| "custom pattern is missing interval".to_string())?;
            let unit = interval_unit
                .ok_or_else(|| "custom pattern is missing interval_unit".to_string())?;
            let interval =
                u32::try_from(interval).map_err(|_| format!("Invalid interval: {interval}"))?;
            Ok(Frequency::Custom {
                interval,
                unit: unit.parse::<IntervalUnit>()?,
            })
        }
        other => Err(format!("Invalid frequency kind: {other}")),
    }
}

impl super::Database {
    /// Helper function to construct a RecurrencePattern from a database row
    pub(super) fn build_pattern_from_row(
        row: &rusqlite::Row,
    ) -> rusqlite::Result<RecurrencePattern> {
        let kind: String = row.get(4)?;
        let frequency =
            frequency_from_columns(&kind, row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?)
                .map_err(|message| {
                    rusqlite::Error::FromSqlConversionFailure(4, Type::Text, message.into())
                })?;

        let status_str: String = row.get(16)?;
        let status = status_str.parse::<PatternStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                16,
                Type::Text,
                format!("Invalid pattern status: {status_str}").into(),
            )
        })?;

        Ok(RecurrencePattern {
            id: row.get::<_, i64>(0)? as u64,
            rider: row.get(1)?,
            pickup: row.get(2)?,
            dropoff: row.get(3)?,
            frequency,
            start_date: row
                .get::<_, String>(9)?
                .parse::<Date>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?,
            end_date: row
                .get::<_, Option<String>>(10)?
                .map(|s| s.parse::<Date>())
                .transpose()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
                })?,
            start_time: row.get::<_, String>(11)?.parse::<Time>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
            })?,
            duration_minutes: row.get::<_, i64>(12)? as u32,
            max_occurrences: row.get::<_, Option<i64>>(13)?.map(|n| n as u32),
            skip_weekends: row.get(14)?,
            skip_holidays: row.get(15)?,
            status,
            created_at: row.get::<_, String>(17)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(17, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(18)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(18, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Helper function to construct a PatternSummary from a summary view row
    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<PatternSummary> {
        let pattern = Self::build_pattern_from_row(row)?;
        let trips = TripCounts {
            total: row.get::<_, i64>(19)? as u32,
            scheduled: row.get::<_, i64>(20)? as u32,
            completed: row.get::<_, i64>(21)? as u32,
            cancelled: row.get::<_, i64>(22)? as u32,
        };
        Ok(PatternSummary::from_pattern(pattern, trips))
    }

    /// Creates a new recurrence pattern from a validated request.
    ///
    /// The pattern starts out active. No trips are materialized here; that
    /// is a separate step so callers control the horizon.
    pub fn create_pattern(&mut self, request: &NewPatternRequest) -> Result<RecurrencePattern> {
        request.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        let (kind, days_of_week, day_of_month, interval, interval_unit) =
            frequency_columns(&request.frequency);

        tx.execute(
            INSERT_PATTERN_SQL,
            params![
                &request.rider,
                &request.pickup,
                &request.dropoff,
                kind,
                days_of_week.as_deref(),
                day_of_month,
                interval,
                interval_unit,
                request.start_date.to_string(),
                request.end_date.map(|d| d.to_string()),
                request.start_time.to_string(),
                i64::from(request.duration_minutes),
                request.max_occurrences.map(i64::from),
                request.skip_weekends,
                request.skip_holidays,
                PatternStatus::Active.as_str(),
                &now_str,
                &now_str,
            ],
        )
        .db_context("Failed to insert pattern")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(RecurrencePattern {
            id,
            rider: request.rider.clone(),
            pickup: request.pickup.clone(),
            dropoff: request.dropoff.clone(),
            frequency: request.frequency,
            start_date: request.start_date,
            end_date: request.end_date,
            start_time: request.start_time,
            duration_minutes: request.duration_minutes,
            max_occurrences: request.max_occurrences,
            skip_weekends: request.skip_weekends,
            skip_holidays: request.skip_holidays,
            status: PatternStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a pattern by its ID.
    pub fn get_pattern(&self, id: u64) -> Result<Option<RecurrencePattern>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PATTERN_SQL)
            .db_context("Failed to prepare query")?;

        let pattern = stmt
            .query_row(params![id as i64], Self::build_pattern_from_row)
            .optional()
            .db_context("Failed to query pattern")?;

        Ok(pattern)
    }

    /// Lists patterns with optional filtering, including per-pattern trip
    /// counts from the summary views.
    pub fn list_patterns(&self, filter: Option<&PatternFilter>) -> Result<Vec<PatternSummary>> {
        // Choose the appropriate view based on whether inactive patterns
        // should show up at all
        let view_name = if filter.as_ref().is_some_and(|f| f.include_inactive) {
            ALL_PATTERN_SUMMARIES_VIEW
        } else {
            PATTERN_SUMMARIES_VIEW
        };

        let mut query = format!("SELECT {PATTERN_SUMMARY_COLUMNS} FROM {view_name}");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(ref rider) = f.rider_contains {
                conditions.push("rider LIKE ?");
                params_vec.push(Box::new(format!("%{rider}%")));
            }

            // Filter by specific status if provided
            if let Some(ref status) = f.status {
                conditions.push("status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], Self::build_summary_from_row)
            .db_context("Failed to query patterns")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch patterns")?;

        Ok(summaries)
    }

    /// Applies edits to a pattern and reconciles its future trips against
    /// the edited schedule, all in one transaction.
    ///
    /// Returns the updated pattern together with a report of the trips
    /// reconciliation created and cancelled.
    pub fn update_pattern(
        &mut self,
        id: u64,
        request: &UpdatePatternRequest,
        today: Date,
        horizon_days: i64,
        calendar: &dyn ExclusionCalendar,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let mut pattern = tx
            .query_row(
                SELECT_PATTERN_SQL,
                params![id as i64],
                Self::build_pattern_from_row,
            )
            .optional()
            .db_context("Failed to query pattern")?
            .ok_or(SchedulerError::PatternNotFound { id })?;

        request.apply(&mut pattern);
        pattern.validate()?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        let (kind, days_of_week, day_of_month, interval, interval_unit) =
            frequency_columns(&pattern.frequency);

        tx.execute(
            UPDATE_PATTERN_SQL,
            params![
                &pattern.pickup,
                &pattern.dropoff,
                kind,
                days_of_week.as_deref(),
                day_of_month,
                interval,
                interval_unit,
                pattern.start_time.to_string(),
                i64::from(pattern.duration_minutes),
                pattern.end_date.map(|d| d.to_string()),
                pattern.max_occurrences.map(i64::from),
                pattern.skip_weekends,
                pattern.skip_holidays,
                &now_str,
                id as i64,
            ],
        )
        .db_context("Failed to update pattern")?;

        pattern.updated_at = now;

        let report = super::reconcile::reconcile_in_tx(
            &tx,
            &pattern,
            today,
            horizon_days,
            calendar,
            super::REASON_PATTERN_UPDATED,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((pattern, report))
    }

    /// Deactivates a pattern and cancels its future scheduled trips.
    ///
    /// Trips dated before today, and future trips already in progress or
    /// completed, are left untouched.
    pub fn deactivate_pattern(
        &mut self,
        id: u64,
        today: Date,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_PATTERN_STATUS_SQL,
                params![
                    PatternStatus::Inactive.as_str(),
                    &now_str,
                    id as i64,
                    PatternStatus::Active.as_str()
                ],
            )
            .db_context("Failed to deactivate pattern")?;

        if rows_affected == 0 {
            // Check if pattern exists
            let exists: bool = tx
                .query_row(CHECK_PATTERN_EXISTS_SQL, params![id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to check pattern existence")?;

            if !exists {
                return Err(SchedulerError::PatternNotFound { id });
            }
            // Pattern exists but is already inactive; the cancel pass below
            // keeps the call idempotent.
        }

        let cancelled = tx
            .execute(
                CANCEL_FUTURE_SCHEDULED_SQL,
                params![
                    super::REASON_PATTERN_DEACTIVATED,
                    &now_str,
                    id as i64,
                    today.to_string()
                ],
            )
            .db_context("Failed to cancel scheduled trips")?;

        let pattern = tx
            .query_row(
                SELECT_PATTERN_SQL,
                params![id as i64],
                Self::build_pattern_from_row,
            )
            .db_context("Failed to query deactivated pattern")?;

        tx.commit().db_context("Failed to commit transaction")?;

        let report = ReconcileReport {
            pattern_id: id,
            desired: 0,
            created: 0,
            cancelled: cancelled as u32,
        };
        Ok((pattern, report))
    }

    /// Reactivates a pattern and rebuilds its future trips out to the
    /// reconcile window.
    pub fn reactivate_pattern(
        &mut self,
        id: u64,
        today: Date,
        horizon_days: i64,
        calendar: &dyn ExclusionCalendar,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let rows_affected = tx
            .execute(
                UPDATE_PATTERN_STATUS_SQL,
                params![
                    PatternStatus::Active.as_str(),
                    &now_str,
                    id as i64,
                    PatternStatus::Inactive.as_str()
                ],
            )
            .db_context("Failed to reactivate pattern")?;

        if rows_affected == 0 {
            // Check if pattern exists
            let exists: bool = tx
                .query_row(CHECK_PATTERN_EXISTS_SQL, params![id as i64], |row| {
                    row.get(0)
                })
                .db_context("Failed to check pattern existence")?;

            if !exists {
                return Err(SchedulerError::PatternNotFound { id });
            }
            // Pattern exists but is already active; reconciliation below
            // converges to the same trip set either way.
        }

        let pattern = tx
            .query_row(
                SELECT_PATTERN_SQL,
                params![id as i64],
                Self::build_pattern_from_row,
            )
            .db_context("Failed to query reactivated pattern")?;

        let report = super::reconcile::reconcile_in_tx(
            &tx,
            &pattern,
            today,
            horizon_days,
            calendar,
            super::REASON_PATTERN_UPDATED,
        )?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((pattern, report))
    }

    /// Permanently deletes a pattern. This operation cannot be undone.
    ///
    /// Future scheduled trips are cancelled first, then every trip the
    /// pattern produced is detached so it survives as a standalone
    /// historical record. Returns the deleted pattern and the number of
    /// trips cancelled on the way out.
    pub fn delete_pattern(&mut self, id: u64, today: Date) -> Result<(RecurrencePattern, u32)> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let pattern = tx
            .query_row(
                SELECT_PATTERN_SQL,
                params![id as i64],
                Self::build_pattern_from_row,
            )
            .optional()
            .db_context("Failed to query pattern")?
            .ok_or(SchedulerError::PatternNotFound { id })?;

        let now_str = Timestamp::now().to_string();
        let cancelled = tx
            .execute(
                CANCEL_FUTURE_SCHEDULED_SQL,
                params![
                    super::REASON_PATTERN_DELETED,
                    &now_str,
                    id as i64,
                    today.to_string()
                ],
            )
            .db_context("Failed to cancel scheduled trips")?;

        tx.execute(DETACH_PATTERN_TRIPS_SQL, params![&now_str, id as i64])
            .db_context("Failed to detach pattern trips")?;

        tx.execute(DELETE_PATTERN_SQL, params![id as i64])
            .db_context("Failed to delete pattern")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok((pattern, cancelled as u32))
    }
}
