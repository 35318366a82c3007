//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, SchedulerError};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Wait out writers from concurrent invocations instead of failing
        // immediately with SQLITE_BUSY
        self.connection
            .busy_timeout(std::time::Duration::from_secs(5))
            .db_context("Failed to set busy timeout")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if cancel_reason column exists in trips table
        let has_cancel_reason_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('trips') WHERE name = 'cancel_reason'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add cancel_reason column if it doesn't exist
        if !has_cancel_reason_column {
            self.connection
                .execute("ALTER TABLE trips ADD COLUMN cancel_reason TEXT", [])
                .map_err(|e| {
                    SchedulerError::database("Failed to add cancel_reason column to trips table")
                        .with_source(e)
                })?;
        }

        Ok(())
    }
}
