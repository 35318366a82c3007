//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update, and delete operations with consistent messaging, plus Display
//! implementations for the materialization and reconciliation reports.

use std::fmt;

use crate::models::{
    MaterializeReport, OccurrenceDisposition, ReconcileReport, RecurrencePattern, SweepReport,
    Trip,
};

/// Wrapper type for displaying the result of create operations.
///
/// This provides consistent formatting for creation results,
/// including success messages and the created resource information.
///
/// The wrapper formats creation results with:
/// - Success message with resource type and ID
/// - Full details of the created resource
/// - Consistent markdown structure
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<RecurrencePattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created pattern with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created trip with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// This provides consistent formatting for update results,
/// including success messages and the updated resource information.
///
/// The wrapper can track and display specific changes made during the update,
/// providing users with clear feedback about what was modified.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<RecurrencePattern> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated pattern with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated trip with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of a pattern deletion.
///
/// Deletion is the one destructive operation on the surface, so the
/// confirmation message spells out the collateral: how many future trips
/// got cancelled along the way.
pub struct DeleteResult {
    pub pattern: RecurrencePattern,
    pub cancelled_trips: u32,
}

impl DeleteResult {
    /// Create a new DeleteResult wrapper.
    pub fn new(pattern: RecurrencePattern, cancelled_trips: u32) -> Self {
        Self {
            pattern,
            cancelled_trips,
        }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted pattern for '{}' (ID: {})",
            self.pattern.rider, self.pattern.id
        )?;
        if self.cancelled_trips > 0 {
            writeln!(
                f,
                "Cancelled {} future scheduled trip(s); past trips were kept as history.",
                self.cancelled_trips
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pattern {}: {} created, {} already scheduled ({} through {})",
            self.pattern_id,
            self.created(),
            self.already_exists(),
            self.window_start,
            self.window_end
        )?;

        for outcome in &self.outcomes {
            if let OccurrenceDisposition::Failed { reason } = &outcome.disposition {
                writeln!(
                    f,
                    "  Failed occurrence {} on {}: {reason}",
                    outcome.sequence_index, outcome.date
                )?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reconciled pattern {}: {} desired, {} created, {} cancelled",
            self.pattern_id, self.desired, self.created, self.cancelled
        )
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Swept {} pattern(s) through {}",
            self.patterns.len(),
            self.window_end
        )?;
        writeln!(
            f,
            "{} trip(s) created, {} already scheduled, {} failed",
            self.created(),
            self.already_exists(),
            self.failed()
        )?;

        for report in &self.patterns {
            if report.created() > 0 || report.failed() > 0 {
                writeln!(f)?;
                write!(f, "{report}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::OccurrenceOutcome;

    fn report_with(dispositions: Vec<OccurrenceDisposition>) -> MaterializeReport {
        MaterializeReport {
            pattern_id: 7,
            window_start: date(2026, 3, 2),
            window_end: date(2026, 4, 1),
            outcomes: dispositions
                .into_iter()
                .enumerate()
                .map(|(i, disposition)| OccurrenceOutcome {
                    sequence_index: i as u32,
                    date: date(2026, 3, 2),
                    disposition,
                })
                .collect(),
        }
    }

    #[test]
    fn test_materialize_report_display() {
        let report = report_with(vec![
            OccurrenceDisposition::Created { trip_id: 1 },
            OccurrenceDisposition::AlreadyExists,
            OccurrenceDisposition::Failed {
                reason: "database is locked".to_string(),
            },
        ]);
        let output = format!("{}", report);

        assert!(output.contains("Pattern 7: 1 created, 1 already scheduled"));
        assert!(output.contains("Failed occurrence 2"));
        assert!(output.contains("database is locked"));
    }

    #[test]
    fn test_sweep_report_display() {
        let sweep = SweepReport {
            today: date(2026, 3, 2),
            window_end: date(2026, 4, 1),
            patterns: vec![
                report_with(vec![OccurrenceDisposition::Created { trip_id: 1 }]),
                report_with(vec![OccurrenceDisposition::AlreadyExists]),
            ],
        };
        let output = format!("{}", sweep);

        assert!(output.contains("Swept 2 pattern(s)"));
        assert!(output.contains("1 trip(s) created, 1 already scheduled, 0 failed"));
    }

    #[test]
    fn test_reconcile_report_display() {
        let report = ReconcileReport {
            pattern_id: 3,
            desired: 4,
            created: 2,
            cancelled: 1,
        };
        let output = format!("{}", report);
        assert!(output.contains("Reconciled pattern 3: 4 desired, 2 created, 1 cancelled"));
    }
}
