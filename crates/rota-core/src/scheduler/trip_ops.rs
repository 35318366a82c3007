//! Trip operations for the Scheduler.
//!
//! These cover the dispatch-facing half of the surface: ad hoc trips that
//! exist outside any pattern, and the status transitions a trip goes
//! through once dispatch picks it up. Materialized trips are created by the
//! pattern operations, never here.

use tokio::task;

use super::Scheduler;
use crate::{
    db::Database,
    display,
    error::{Result, SchedulerError},
    models::{NewTripRequest, Trip, TripFilter, UpdateTripRequest},
    params::{AddTrip, Id, ListTrips, UpdateTrip},
};

impl Scheduler {
    /// Creates a one-off trip that is not tied to any pattern.
    ///
    /// Ad hoc trips carry no `(pattern_id, sequence_index)` key and are
    /// invisible to reconciliation.
    pub async fn add_trip(&self, params: &AddTrip) -> Result<Trip> {
        let request = NewTripRequest::try_from(params.clone())?;

        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_trip(&request)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a trip by its ID.
    pub async fn get_trip(&self, params: &Id) -> Result<Option<Trip>> {
        let db_path = self.db_path.clone();
        let trip_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_trip(trip_id)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists trips filtered by pattern, status, date range, or rider, in
    /// schedule order.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<display::Trips> {
        let filter = TripFilter::try_from(params)?;

        let db_path = self.db_path.clone();

        let trips = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_trips(Some(&filter))
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(display::Trips(trips))
    }

    /// Updates a trip through the dispatch workflow.
    ///
    /// Status changes follow `Scheduled → InProgress → Completed`, with
    /// cancellation only from `Scheduled`. A trip that has left `Scheduled`
    /// rejects driver changes; completed and cancelled trips never change
    /// again.
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        let trip_id = params.id;
        let request = UpdateTripRequest::try_from(params.clone())?;

        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_trip(trip_id, &request)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
