//! Turning expanded occurrences into stored trips.
//!
//! Materialization is idempotent: every trip row carries the pattern ID and
//! sequence index of the occurrence it was created from, and a partial
//! unique index keeps more than one live trip from occupying the same slot.
//! Running the same window twice therefore creates nothing the second time.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::{
    calendar::ExclusionCalendar,
    engine,
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{MaterializeReport, OccurrenceDisposition, OccurrenceOutcome},
};

impl super::Database {
    /// Materializes one pattern's occurrences as trips over a date window.
    ///
    /// Expands the pattern from `window_start` through `window_end`
    /// (inclusive) and inserts a scheduled trip for every occurrence whose
    /// slot is free. Occurrences already holding a live trip are reported
    /// as existing, and a failed insert is reported without aborting the
    /// rest of the batch. The whole run happens in one immediate
    /// transaction, so concurrent runs serialize instead of interleaving.
    ///
    /// An inactive pattern materializes nothing.
    pub fn materialize_pattern(
        &mut self,
        pattern_id: u64,
        window_start: Date,
        window_end: Date,
        calendar: &dyn ExclusionCalendar,
    ) -> Result<MaterializeReport> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let pattern = tx
            .query_row(
                super::pattern_queries::SELECT_PATTERN_SQL,
                params![pattern_id as i64],
                Self::build_pattern_from_row,
            )
            .optional()
            .db_context("Failed to query pattern")?
            .ok_or(SchedulerError::PatternNotFound { id: pattern_id })?;

        let mut report = MaterializeReport {
            pattern_id,
            window_start,
            window_end,
            outcomes: Vec::new(),
        };

        if !pattern.is_active() {
            tx.commit().db_context("Failed to commit transaction")?;
            return Ok(report);
        }

        let exclusions = calendar.exclusions_in(window_start, window_end);
        let occurrences = engine::expand(&pattern, window_start, window_end, &exclusions)?;
        let live = Self::live_sequence_indices(&tx, pattern_id)?;

        let now_str = Timestamp::now().to_string();

        for occurrence in &occurrences {
            let disposition = if live.contains(&occurrence.sequence_index) {
                OccurrenceDisposition::AlreadyExists
            } else {
                match Self::insert_occurrence_trip(&tx, &pattern, occurrence, &now_str) {
                    Ok(trip_id) => OccurrenceDisposition::Created { trip_id },
                    Err(SchedulerError::DuplicateTrip { .. }) => {
                        OccurrenceDisposition::AlreadyExists
                    }
                    Err(e) => OccurrenceDisposition::Failed {
                        reason: e.to_string(),
                    },
                }
            };

            report.outcomes.push(OccurrenceOutcome {
                sequence_index: occurrence.sequence_index,
                date: occurrence.date,
                disposition,
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(report)
    }
}
