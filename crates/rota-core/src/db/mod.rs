//! Database operations and SQLite management for patterns and trips.
//!
//! This module provides low-level database operations for the Rota
//! scheduling system. It handles SQLite database connections, schema
//! management, and provides specialized query interfaces for recurrence
//! patterns and trips, plus the transactional materialization and
//! reconciliation routines built on top of them.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod materialize;
pub mod migrations;
pub mod pattern_queries;
pub mod reconcile;
pub mod trip_queries;

/// Cancellation reason recorded when reconciliation removes an occurrence
/// that the edited pattern no longer produces.
pub(crate) const REASON_PATTERN_UPDATED: &str = "pattern updated";

/// Cancellation reason recorded when a pattern is deactivated.
pub(crate) const REASON_PATTERN_DEACTIVATED: &str = "pattern deactivated";

/// Cancellation reason recorded when a pattern is deleted outright.
pub(crate) const REASON_PATTERN_DELETED: &str = "pattern deleted";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
