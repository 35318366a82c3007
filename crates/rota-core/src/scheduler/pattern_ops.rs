//! Pattern operations for the Scheduler.
//!
//! Database work runs on the blocking thread pool; each operation opens its
//! own connection, which keeps the `Scheduler` itself cheap to share. The
//! SQLite unique index on `(pattern_id, sequence_index)` is what makes the
//! write paths here safe to run concurrently.

use jiff::civil::Date;
use tokio::task;

use super::Scheduler;
use crate::{
    db::Database,
    display,
    engine,
    error::{Result, SchedulerError},
    models::{
        MaterializeReport, NewPatternRequest, PatternFilter, ReconcileReport, RecurrencePattern,
        SweepReport, UpdatePatternRequest,
    },
    params::{CreatePattern, DeletePattern, Id, ListPatterns, PreviewPattern, UpdatePattern},
};

/// How far past "today" a preview is willing to look for occurrences. Ten
/// years of empty candidates means the pattern has nothing left to show.
const PREVIEW_SPAN_DAYS: i64 = 3660;

impl Scheduler {
    /// Creates a new pattern and materializes its trips out to the horizon.
    ///
    /// The pattern is validated and persisted first; the initial
    /// materialization then runs over `[today, today + horizon]`, so the
    /// returned report shows exactly which trips the new pattern produced
    /// right away.
    pub async fn create_pattern(
        &self,
        params: &CreatePattern,
        today: Date,
    ) -> Result<(RecurrencePattern, MaterializeReport)> {
        let request = NewPatternRequest::try_from(params.clone())?;

        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let horizon_end = self.horizon_end(today);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let pattern = db.create_pattern(&request)?;
            let report = db.materialize_pattern(pattern.id, today, horizon_end, &*calendar)?;
            Ok((pattern, report))
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a pattern by its ID.
    pub async fn get_pattern(&self, params: &Id) -> Result<Option<RecurrencePattern>> {
        let db_path = self.db_path.clone();
        let pattern_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_pattern(pattern_id)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists patterns as summaries with per-pattern trip counts.
    pub async fn list_patterns(
        &self,
        params: &ListPatterns,
    ) -> Result<display::PatternSummaries> {
        let db_path = self.db_path.clone();
        let filter = PatternFilter::from(params);

        let summaries = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_patterns(Some(&filter))
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(display::PatternSummaries(summaries))
    }

    /// Applies edits to a pattern and reconciles its future trips.
    ///
    /// An edit whose future desired set turns out empty is accepted, not
    /// rejected; the returned report's
    /// [`is_empty_schedule`](ReconcileReport::is_empty_schedule) flags it so
    /// front ends can warn the operator.
    pub async fn update_pattern(
        &self,
        params: &UpdatePattern,
        today: Date,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let pattern_id = params.id;
        let request = UpdatePatternRequest::try_from(params.clone())?;

        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let horizon_days = self.horizon_days;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_pattern(pattern_id, &request, today, horizon_days, &*calendar)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Deactivates a pattern, cancelling its future scheduled trips.
    ///
    /// Past trips and future trips already in progress or completed keep
    /// their status; the pattern record itself is retained.
    pub async fn deactivate_pattern(
        &self,
        params: &Id,
        today: Date,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let db_path = self.db_path.clone();
        let pattern_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.deactivate_pattern(pattern_id, today)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Reactivates a pattern and rebuilds its future trips from `today`.
    pub async fn reactivate_pattern(
        &self,
        params: &Id,
        today: Date,
    ) -> Result<(RecurrencePattern, ReconcileReport)> {
        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let horizon_days = self.horizon_days;
        let pattern_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.reactivate_pattern(pattern_id, today, horizon_days, &*calendar)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a pattern. This operation cannot be undone.
    ///
    /// Requires explicit confirmation via the `confirmed` field. Future
    /// scheduled trips are cancelled; every trip the pattern produced is
    /// detached and survives as a standalone historical record. Returns the
    /// deleted pattern and the number of trips cancelled.
    pub async fn delete_pattern(
        &self,
        params: &DeletePattern,
        today: Date,
    ) -> Result<(RecurrencePattern, u32)> {
        if !params.confirmed {
            return Err(SchedulerError::invalid_input("confirmed").with_reason(
                "Pattern deletion requires explicit confirmation. \
                 Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let db_path = self.db_path.clone();
        let pattern_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_pattern(pattern_id, today)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Previews a pattern's next occurrences from `today` without writing
    /// anything.
    ///
    /// Inactive patterns preview like active ones; the preview answers
    /// "what would this pattern produce", not "what will be materialized".
    pub async fn preview_occurrences(
        &self,
        params: &PreviewPattern,
        today: Date,
    ) -> Result<display::Occurrences> {
        params.validate()?;

        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let pattern_id = params.id;
        let count = params.count as usize;

        let occurrences = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let pattern = db
                .get_pattern(pattern_id)?
                .ok_or(SchedulerError::PatternNotFound { id: pattern_id })?;

            let window_end = engine::add_days(today, PREVIEW_SPAN_DAYS).unwrap_or(Date::MAX);
            let exclusions = calendar.exclusions_in(today, window_end);
            let mut occurrences = engine::expand(&pattern, today, window_end, &exclusions)?;
            occurrences.truncate(count);
            Ok::<_, SchedulerError>(occurrences)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(display::Occurrences(occurrences))
    }

    /// Materializes one pattern's trips out to the horizon.
    pub async fn materialize_pattern(
        &self,
        params: &Id,
        today: Date,
    ) -> Result<MaterializeReport> {
        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let horizon_end = self.horizon_end(today);
        let pattern_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.materialize_pattern(pattern_id, today, horizon_end, &*calendar)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// The periodic tick: materializes every active pattern through the
    /// horizon.
    ///
    /// Patterns are processed independently in pattern ID order; a failure
    /// inside one pattern's batch shows up in that pattern's report without
    /// stopping the others.
    pub async fn sweep(&self, today: Date) -> Result<SweepReport> {
        let db_path = self.db_path.clone();
        let calendar = self.calendar.clone();
        let horizon_end = self.horizon_end(today);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let mut summaries = db.list_patterns(Some(&PatternFilter::default()))?;
            summaries.sort_by_key(|summary| summary.id);

            let mut patterns = Vec::with_capacity(summaries.len());
            for summary in &summaries {
                patterns.push(db.materialize_pattern(summary.id, today, horizon_end, &*calendar)?);
            }

            Ok(SweepReport {
                today,
                window_end: horizon_end,
                patterns,
            })
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Last date of the materialization window for the given reference day.
    fn horizon_end(&self, today: Date) -> Date {
        engine::add_days(today, self.horizon_days).unwrap_or(Date::MAX)
    }
}
