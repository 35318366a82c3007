use jiff::civil::{date, time};
use rota_core::models::{
    Frequency, IntervalUnit, NewPatternRequest, NewTripRequest, PatternFilter, TripFilter,
    TripStatus, UpdatePatternRequest, UpdateTripRequest, WeekdaySet,
};
use rota_core::{Database, NoExclusions, SchedulerError, StaticHolidays};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn daily_request(rider: &str) -> NewPatternRequest {
    NewPatternRequest {
        rider: rider.to_string(),
        pickup: "12 Elm St".to_string(),
        dropoff: "County Clinic".to_string(),
        frequency: Frequency::Daily,
        start_date: date(2026, 3, 2),
        end_date: None,
        start_time: time(8, 30, 0, 0),
        duration_minutes: 45,
        max_occurrences: None,
        skip_weekends: false,
        skip_holidays: false,
    }
}

fn trip_request(rider: &str) -> NewTripRequest {
    NewTripRequest {
        rider: rider.to_string(),
        pickup: "Depot".to_string(),
        dropoff: "Harbor".to_string(),
        scheduled_at: date(2026, 3, 5).at(9, 0, 0, 0),
        duration_minutes: 20,
        driver: None,
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();

    // Database should be initialized and ready to use
    assert!(temp_file.path().exists());
}

#[test]
fn test_create_and_get_pattern() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    assert!(pattern.id > 0);
    assert_eq!(pattern.rider, "Alice");
    assert!(pattern.is_active());

    let retrieved = db
        .get_pattern(pattern.id)
        .expect("Failed to get pattern")
        .expect("Pattern should exist");

    assert_eq!(retrieved, pattern);
}

#[test]
fn test_frequency_storage_round_trip() {
    let (_temp_file, mut db) = create_test_db();

    let frequencies = [
        Frequency::Daily,
        Frequency::Weekly {
            days: "mon,wed,fri".parse::<WeekdaySet>().unwrap(),
        },
        Frequency::Monthly { day_of_month: 31 },
        Frequency::Custom {
            interval: 2,
            unit: IntervalUnit::Weeks,
        },
    ];

    for frequency in frequencies {
        let mut request = daily_request("Alice");
        request.frequency = frequency;

        let pattern = db
            .create_pattern(&request)
            .expect("Failed to create pattern");
        let retrieved = db
            .get_pattern(pattern.id)
            .expect("Failed to get pattern")
            .expect("Pattern should exist");

        assert_eq!(retrieved.frequency, frequency);
    }
}

#[test]
fn test_create_pattern_rejects_invalid_schedule() {
    let (_temp_file, mut db) = create_test_db();

    let mut request = daily_request("Alice");
    request.end_date = Some(date(2026, 2, 1));

    assert!(matches!(
        db.create_pattern(&request),
        Err(SchedulerError::InvalidInput { .. })
    ));
}

#[test]
fn test_materialize_pattern_is_idempotent() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    let window_start = date(2026, 3, 2);
    let window_end = date(2026, 3, 8);

    let first = db
        .materialize_pattern(pattern.id, window_start, window_end, &NoExclusions)
        .expect("Failed to materialize");
    assert_eq!(first.created(), 7);
    assert_eq!(first.already_exists(), 0);

    let second = db
        .materialize_pattern(pattern.id, window_start, window_end, &NoExclusions)
        .expect("Failed to rematerialize");
    assert_eq!(second.created(), 0);
    assert_eq!(second.already_exists(), 7);

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips.len(), 7);
}

#[test]
fn test_materialize_missing_pattern() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.materialize_pattern(999, date(2026, 3, 2), date(2026, 3, 8), &NoExclusions);

    assert!(matches!(
        result,
        Err(SchedulerError::PatternNotFound { id: 999 })
    ));
}

#[test]
fn test_cancelled_trip_releases_its_slot() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    let window_start = date(2026, 3, 2);
    let window_end = date(2026, 3, 4);
    db.materialize_pattern(pattern.id, window_start, window_end, &NoExclusions)
        .expect("Failed to materialize");

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips.len(), 3);
    let victim = trips[1].clone();

    db.update_trip(
        victim.id,
        &UpdateTripRequest {
            status: Some(TripStatus::Cancelled),
            ..Default::default()
        },
    )
    .expect("Failed to cancel trip");

    // The cancelled trip no longer occupies (pattern_id, sequence_index),
    // so rematerializing fills the slot with a fresh trip
    let report = db
        .materialize_pattern(pattern.id, window_start, window_end, &NoExclusions)
        .expect("Failed to rematerialize");
    assert_eq!(report.created(), 1);
    assert_eq!(report.already_exists(), 2);

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips.len(), 4);

    let replacements: Vec<_> = trips
        .iter()
        .filter(|t| t.sequence_index == victim.sequence_index && t.status == TripStatus::Scheduled)
        .collect();
    assert_eq!(replacements.len(), 1);
    assert_ne!(replacements[0].id, victim.id);
}

#[test]
fn test_materialize_skips_holidays() {
    let (_temp_file, mut db) = create_test_db();

    let mut request = daily_request("Alice");
    request.skip_holidays = true;
    let pattern = db
        .create_pattern(&request)
        .expect("Failed to create pattern");

    let holidays = StaticHolidays::new([date(2026, 3, 3)]);
    let report = db
        .materialize_pattern(pattern.id, date(2026, 3, 2), date(2026, 3, 4), &holidays)
        .expect("Failed to materialize");

    assert_eq!(report.created(), 2);
    assert!(report.outcomes.iter().all(|o| o.date != date(2026, 3, 3)));

    // The holiday consumes no sequence index
    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips[0].sequence_index, Some(0));
    assert_eq!(trips[1].sequence_index, Some(1));
    assert_eq!(trips[1].date(), date(2026, 3, 4));
}

#[test]
fn test_update_pattern_reconciles_trips() {
    let (_temp_file, mut db) = create_test_db();

    let mut request = daily_request("Alice");
    request.frequency = Frequency::Weekly {
        days: "mon".parse::<WeekdaySet>().unwrap(),
    };
    let pattern = db
        .create_pattern(&request)
        .expect("Failed to create pattern");

    let today = date(2026, 3, 2);
    db.materialize_pattern(pattern.id, today, date(2026, 4, 1), &NoExclusions)
        .expect("Failed to materialize");

    let update = UpdatePatternRequest {
        frequency: Some(Frequency::Weekly {
            days: "mon,wed".parse::<WeekdaySet>().unwrap(),
        }),
        ..Default::default()
    };

    let (updated, report) = db
        .update_pattern(pattern.id, &update, today, 30, &NoExclusions)
        .expect("Failed to update pattern");

    assert_eq!(
        updated.frequency,
        Frequency::Weekly {
            days: "mon,wed".parse::<WeekdaySet>().unwrap()
        }
    );
    // 5 Mondays + 5 Wednesdays in [2026-03-02, 2026-04-01]; only the first
    // Monday keeps its (sequence_index, date) slot across the renumbering
    assert_eq!(report.desired, 10);
    assert_eq!(report.cancelled, 4);
    assert_eq!(report.created, 9);

    let scheduled = db
        .list_trips(Some(&TripFilter {
            status: Some(TripStatus::Scheduled),
            ..Default::default()
        }))
        .expect("Failed to list trips");
    assert_eq!(scheduled.len(), 10);
}

#[test]
fn test_update_pattern_rejects_invalid_merge() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    // End date before the (unchangeable) start date
    let update = UpdatePatternRequest {
        end_date: Some(date(2026, 1, 1)),
        ..Default::default()
    };

    let result = db.update_pattern(pattern.id, &update, date(2026, 3, 2), 30, &NoExclusions);
    assert!(matches!(result, Err(SchedulerError::InvalidInput { .. })));

    // The stored pattern is untouched
    let stored = db
        .get_pattern(pattern.id)
        .expect("Failed to get pattern")
        .expect("Pattern should exist");
    assert_eq!(stored.end_date, None);
}

#[test]
fn test_deactivate_and_reactivate_pattern() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    let today = date(2026, 3, 2);
    db.materialize_pattern(pattern.id, today, date(2026, 3, 8), &NoExclusions)
        .expect("Failed to materialize");

    let (deactivated, report) = db
        .deactivate_pattern(pattern.id, today)
        .expect("Failed to deactivate");
    assert!(!deactivated.is_active());
    assert_eq!(report.cancelled, 7);

    // Deactivation is idempotent
    let (_, second) = db
        .deactivate_pattern(pattern.id, today)
        .expect("Failed to deactivate again");
    assert_eq!(second.cancelled, 0);

    let (reactivated, report) = db
        .reactivate_pattern(pattern.id, today, 6, &NoExclusions)
        .expect("Failed to reactivate");
    assert!(reactivated.is_active());
    assert_eq!(report.created, 7);
}

#[test]
fn test_deactivate_missing_pattern() {
    let (_temp_file, mut db) = create_test_db();

    assert!(matches!(
        db.deactivate_pattern(999, date(2026, 3, 2)),
        Err(SchedulerError::PatternNotFound { id: 999 })
    ));
}

#[test]
fn test_delete_pattern_detaches_trips() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");

    let today = date(2026, 3, 2);
    db.materialize_pattern(pattern.id, today, date(2026, 3, 4), &NoExclusions)
        .expect("Failed to materialize");

    let (deleted, cancelled) = db
        .delete_pattern(pattern.id, today)
        .expect("Failed to delete pattern");
    assert_eq!(deleted.id, pattern.id);
    assert_eq!(cancelled, 3);

    assert!(db
        .get_pattern(pattern.id)
        .expect("Failed to get pattern")
        .is_none());

    let trips = db.list_trips(None).expect("Failed to list trips");
    assert_eq!(trips.len(), 3);
    for trip in &trips {
        assert_eq!(trip.pattern_id, None);
        assert_eq!(trip.sequence_index, None);
        assert_eq!(trip.status, TripStatus::Cancelled);
    }
}

#[test]
fn test_list_patterns_with_trip_counts() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");
    db.create_pattern(&daily_request("Bob"))
        .expect("Failed to create pattern");

    db.materialize_pattern(pattern.id, date(2026, 3, 2), date(2026, 3, 4), &NoExclusions)
        .expect("Failed to materialize");

    let summaries = db
        .list_patterns(Some(&PatternFilter::default()))
        .expect("Failed to list patterns");
    assert_eq!(summaries.len(), 2);

    let alice = summaries
        .iter()
        .find(|s| s.rider == "Alice")
        .expect("Alice should be listed");
    assert_eq!(alice.trips.total, 3);
    assert_eq!(alice.trips.scheduled, 3);

    let bob = summaries
        .iter()
        .find(|s| s.rider == "Bob")
        .expect("Bob should be listed");
    assert_eq!(bob.trips.total, 0);
}

#[test]
fn test_list_patterns_excludes_inactive_by_default() {
    let (_temp_file, mut db) = create_test_db();

    let pattern = db
        .create_pattern(&daily_request("Alice"))
        .expect("Failed to create pattern");
    db.deactivate_pattern(pattern.id, date(2026, 3, 2))
        .expect("Failed to deactivate");

    let active = db
        .list_patterns(Some(&PatternFilter::default()))
        .expect("Failed to list patterns");
    assert!(active.is_empty());

    let all = db
        .list_patterns(Some(&PatternFilter {
            include_inactive: true,
            ..Default::default()
        }))
        .expect("Failed to list all patterns");
    assert_eq!(all.len(), 1);
}

#[test]
fn test_create_and_update_trip_workflow() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db
        .create_trip(&trip_request("Bob"))
        .expect("Failed to create trip");
    assert_eq!(trip.status, TripStatus::Scheduled);
    assert!(!trip.is_recurring());

    let trip = db
        .update_trip(
            trip.id,
            &UpdateTripRequest {
                driver: Some("Dana".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to assign driver");
    assert_eq!(trip.driver, Some("Dana".to_string()));

    let trip = db
        .update_trip(
            trip.id,
            &UpdateTripRequest {
                status: Some(TripStatus::InProgress),
                ..Default::default()
            },
        )
        .expect("Failed to start trip");
    assert_eq!(trip.status, TripStatus::InProgress);

    // Driver changes are rejected once the trip is underway
    let result = db.update_trip(
        trip.id,
        &UpdateTripRequest {
            driver: Some("Evan".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(SchedulerError::InvalidInput { .. })));

    let trip = db
        .update_trip(
            trip.id,
            &UpdateTripRequest {
                status: Some(TripStatus::Completed),
                ..Default::default()
            },
        )
        .expect("Failed to complete trip");
    assert_eq!(trip.status, TripStatus::Completed);

    // Completed trips are immutable
    let result = db.update_trip(
        trip.id,
        &UpdateTripRequest {
            status: Some(TripStatus::Cancelled),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(SchedulerError::InvalidInput { .. })));
}

#[test]
fn test_cancel_trip_records_default_reason() {
    let (_temp_file, mut db) = create_test_db();

    let trip = db
        .create_trip(&trip_request("Bob"))
        .expect("Failed to create trip");

    let cancelled = db
        .update_trip(
            trip.id,
            &UpdateTripRequest {
                status: Some(TripStatus::Cancelled),
                ..Default::default()
            },
        )
        .expect("Failed to cancel trip");

    assert_eq!(cancelled.status, TripStatus::Cancelled);
    assert_eq!(
        cancelled.cancel_reason,
        Some("cancelled by operator".to_string())
    );
}

#[test]
fn test_update_trip_not_found() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.update_trip(
        999,
        &UpdateTripRequest {
            status: Some(TripStatus::Completed),
            ..Default::default()
        },
    );

    assert!(matches!(
        result,
        Err(SchedulerError::TripNotFound { id: 999 })
    ));
}

#[test]
fn test_list_trips_filters() {
    let (_temp_file, mut db) = create_test_db();

    let mut early = trip_request("Bob");
    early.scheduled_at = date(2026, 3, 1).at(9, 0, 0, 0);
    db.create_trip(&early).expect("Failed to create trip");

    let mut late = trip_request("Alice");
    late.scheduled_at = date(2026, 3, 20).at(9, 0, 0, 0);
    let late = db.create_trip(&late).expect("Failed to create trip");

    db.update_trip(
        late.id,
        &UpdateTripRequest {
            status: Some(TripStatus::Cancelled),
            ..Default::default()
        },
    )
    .expect("Failed to cancel trip");

    let in_range = db
        .list_trips(Some(&TripFilter {
            from: Some(date(2026, 3, 10)),
            to: Some(date(2026, 3, 31)),
            ..Default::default()
        }))
        .expect("Failed to list trips");
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].rider, "Alice");

    let scheduled = db
        .list_trips(Some(&TripFilter {
            status: Some(TripStatus::Scheduled),
            ..Default::default()
        }))
        .expect("Failed to list trips");
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].rider, "Bob");

    let by_rider = db
        .list_trips(Some(&TripFilter {
            rider_contains: Some("lice".to_string()),
            ..Default::default()
        }))
        .expect("Failed to list trips");
    assert_eq!(by_rider.len(), 1);
    assert_eq!(by_rider[0].rider, "Alice");
}
