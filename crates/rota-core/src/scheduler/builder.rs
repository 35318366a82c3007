//! Builder for creating and configuring Scheduler instances.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task;

use super::{Scheduler, DEFAULT_HORIZON_DAYS};
use crate::{
    calendar::{ExclusionCalendar, NoExclusions},
    db::Database,
    error::{Result, SchedulerError},
};

/// Builder for creating and configuring Scheduler instances.
#[derive(Clone)]
pub struct SchedulerBuilder {
    database_path: Option<PathBuf>,
    horizon_days: i64,
    calendar: Arc<dyn ExclusionCalendar>,
}

impl SchedulerBuilder {
    /// Creates a new builder with default settings: XDG database path, the
    /// default horizon, and no holiday exclusions.
    pub fn new() -> Self {
        Self {
            database_path: None,
            horizon_days: DEFAULT_HORIZON_DAYS,
            calendar: Arc::new(NoExclusions),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/rota/rota.db` or `~/.local/share/rota/rota.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how many days past "today" the materialization window reaches.
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the exclusion calendar consulted for holiday skipping.
    pub fn with_exclusion_calendar<C>(mut self, calendar: C) -> Self
    where
        C: ExclusionCalendar + 'static,
    {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Builds the configured scheduler instance.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidInput` for a non-positive horizon,
    /// `SchedulerError::FileSystem` if the database path is invalid, and
    /// `SchedulerError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Scheduler> {
        if self.horizon_days <= 0 {
            return Err(SchedulerError::invalid_input("horizon_days")
                .with_reason("Horizon must be at least one day"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SchedulerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), SchedulerError>(())
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Scheduler::new(db_path, self.horizon_days, self.calendar))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("rota")
            .place_data_file("rota.db")
            .map_err(|e| SchedulerError::XdgDirectory(e.to_string()))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
