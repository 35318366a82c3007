//! Occurrence model definition.

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

/// One dated instance implied by a recurrence pattern.
///
/// Occurrences are derived by the expansion engine and are never persisted
/// on their own; a persisted occurrence is a trip. The
/// `(pattern_id, sequence_index)` pair is the idempotency key that ties a
/// trip back to the occurrence it materialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    /// Pattern that produced this occurrence
    pub pattern_id: u64,

    /// 0-based ordinal among surviving occurrences, counted from the
    /// pattern's start date
    pub sequence_index: u32,

    /// Calendar date of the occurrence
    pub date: Date,

    /// Pickup date and time
    pub start: DateTime,
}
