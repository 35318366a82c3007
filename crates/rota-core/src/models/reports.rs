//! Outcome reports for materialization, reconciliation, and sweeps.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// What the materializer did with one expanded occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OccurrenceDisposition {
    /// A trip was inserted for the occurrence
    Created { trip_id: u64 },
    /// A live trip already occupies the occurrence slot
    AlreadyExists,
    /// The insert failed; the rest of the batch still proceeds
    Failed { reason: String },
}

/// Per-occurrence materialization outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceOutcome {
    /// Position of the occurrence in the pattern's full sequence
    pub sequence_index: u32,
    /// Service date of the occurrence
    pub date: Date,
    /// What the materializer did with it
    #[serde(flatten)]
    pub disposition: OccurrenceDisposition,
}

/// Report of one pattern's materialization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializeReport {
    /// Pattern the run expanded
    pub pattern_id: u64,
    /// First date of the materialization window
    pub window_start: Date,
    /// Last date of the materialization window (inclusive)
    pub window_end: Date,
    /// Outcome for every occurrence expanded in the window
    pub outcomes: Vec<OccurrenceOutcome>,
}

impl MaterializeReport {
    /// Number of trips created by this run.
    pub fn created(&self) -> u32 {
        self.count(|d| matches!(d, OccurrenceDisposition::Created { .. }))
    }

    /// Number of occurrences that already had a live trip.
    pub fn already_exists(&self) -> u32 {
        self.count(|d| matches!(d, OccurrenceDisposition::AlreadyExists))
    }

    /// Number of occurrences whose insert failed.
    pub fn failed(&self) -> u32 {
        self.count(|d| matches!(d, OccurrenceDisposition::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&OccurrenceDisposition) -> bool) -> u32 {
        self.outcomes
            .iter()
            .filter(|o| pred(&o.disposition))
            .count() as u32
    }
}

/// Report of one pattern's reconciliation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Pattern the run reconciled
    pub pattern_id: u64,
    /// Occurrences the current schedule wants in the window
    pub desired: u32,
    /// Trips created for occurrences that had none
    pub created: u32,
    /// Scheduled trips cancelled because their occurrence disappeared
    pub cancelled: u32,
}

impl ReconcileReport {
    /// Whether the schedule produces nothing at all in the window. Worth a
    /// warning after an edit, since it usually means the edit was stricter
    /// than intended.
    pub fn is_empty_schedule(&self) -> bool {
        self.desired == 0
    }
}

/// Aggregated report of a sweep across every active pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Date the sweep treated as today
    pub today: Date,
    /// Last date covered by the materialization window (inclusive)
    pub window_end: Date,
    /// Per-pattern reports, in pattern ID order
    pub patterns: Vec<MaterializeReport>,
}

impl SweepReport {
    /// Total trips created across all patterns.
    pub fn created(&self) -> u32 {
        self.patterns.iter().map(MaterializeReport::created).sum()
    }

    /// Total occurrences that already had a live trip.
    pub fn already_exists(&self) -> u32 {
        self.patterns
            .iter()
            .map(MaterializeReport::already_exists)
            .sum()
    }

    /// Total failed inserts across all patterns.
    pub fn failed(&self) -> u32 {
        self.patterns.iter().map(MaterializeReport::failed).sum()
    }
}
