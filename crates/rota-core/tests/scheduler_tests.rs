mod common;

use common::create_test_scheduler;
use jiff::civil::date;
use rota_core::models::TripStatus;
use rota_core::params::{
    CreatePattern, Id, ListPatterns, ListTrips, PreviewPattern, UpdatePattern, UpdateTrip,
};
use rota_core::SchedulerBuilder;
use tempfile::TempDir;

fn pattern_params(rider: &str, frequency: &str, start_date: &str) -> CreatePattern {
    let mut params = CreatePattern::default();
    params.rider = rider.to_string();
    params.pickup = "12 Elm St".to_string();
    params.dropoff = "County Clinic".to_string();
    params.frequency = frequency.to_string();
    params.start_date = start_date.to_string();
    params.start_time = "08:30".to_string();
    params.duration_minutes = 45;
    params
}

#[tokio::test]
async fn test_monthly_pattern_clamps_short_months() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let mut params = pattern_params("Alice", "monthly", "2026-01-31");
    params.day_of_month = Some(31);
    let today = date(2026, 1, 31);

    let (pattern, _) = scheduler
        .create_pattern(&params, today)
        .await
        .expect("Failed to create pattern");

    let preview = scheduler
        .preview_occurrences(
            &PreviewPattern {
                id: pattern.id,
                count: 4,
            },
            today,
        )
        .await
        .expect("Failed to preview");

    let dates: Vec<_> = preview.iter().map(|o| o.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2026, 1, 31),
            date(2026, 2, 28),
            date(2026, 3, 31),
            date(2026, 4, 30),
        ]
    );
}

#[tokio::test]
async fn test_monthly_pattern_skips_month_before_start() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    // Day 10 has already passed in the start month, so the series begins
    // the following month
    let mut params = pattern_params("Alice", "monthly", "2026-03-15");
    params.day_of_month = Some(10);
    let today = date(2026, 3, 15);

    let (pattern, _) = scheduler
        .create_pattern(&params, today)
        .await
        .expect("Failed to create pattern");

    let preview = scheduler
        .preview_occurrences(
            &PreviewPattern {
                id: pattern.id,
                count: 2,
            },
            today,
        )
        .await
        .expect("Failed to preview");

    assert_eq!(preview[0].date, date(2026, 4, 10));
    assert_eq!(preview[0].sequence_index, 0);
    assert_eq!(preview[1].date, date(2026, 5, 10));
}

#[tokio::test]
async fn test_weekend_skipping_drops_without_shifting() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let mut params = pattern_params("Alice", "daily", "2026-03-02");
    params.skip_weekends = true;
    let today = date(2026, 3, 2); // Monday

    let (pattern, _) = scheduler
        .create_pattern(&params, today)
        .await
        .expect("Failed to create pattern");

    let preview = scheduler
        .preview_occurrences(
            &PreviewPattern {
                id: pattern.id,
                count: 7,
            },
            today,
        )
        .await
        .expect("Failed to preview");

    // Mon-Fri, then the following Mon-Tue; Saturday and Sunday vanish
    let dates: Vec<_> = preview.iter().map(|o| o.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2026, 3, 2),
            date(2026, 3, 3),
            date(2026, 3, 4),
            date(2026, 3, 5),
            date(2026, 3, 6),
            date(2026, 3, 9),
            date(2026, 3, 10),
        ]
    );

    // Dropped days consume no sequence numbers
    let indices: Vec<_> = preview.iter().map(|o| o.sequence_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_max_occurrences_caps_the_series() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let mut params = pattern_params("Alice", "daily", "2026-03-02");
    params.max_occurrences = Some(5);
    let today = date(2026, 3, 2);

    let (_, report) = scheduler
        .create_pattern(&params, today)
        .await
        .expect("Failed to create pattern");
    assert_eq!(report.created(), 5);

    // Later sweeps never push past the cap
    let sweep = scheduler
        .sweep(date(2026, 3, 20))
        .await
        .expect("Failed to sweep");
    assert_eq!(sweep.created(), 0);

    let trips = scheduler
        .list_trips(&ListTrips::default())
        .await
        .expect("Failed to list trips");
    assert_eq!(trips.len(), 5);
}

#[tokio::test]
async fn test_reconcile_window_covers_far_future_trips() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let today = date(2026, 3, 2);

    // Materialize two months ahead with a wide-horizon scheduler
    let wide = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_horizon_days(60)
        .build()
        .await
        .expect("Failed to create scheduler");
    let (pattern, report) = wide
        .create_pattern(&pattern_params("Alice", "daily", "2026-03-02"), today)
        .await
        .expect("Failed to create pattern");
    assert_eq!(report.created(), 61);

    // A narrow-horizon scheduler still reconciles every live future trip,
    // not just the ones inside its own horizon
    let narrow = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_horizon_days(7)
        .build()
        .await
        .expect("Failed to create scheduler");

    let mut update = UpdatePattern::default();
    update.id = pattern.id;
    update.end_date = Some("2026-03-10".to_string());

    let (_, reconcile) = narrow
        .update_pattern(&update, today)
        .await
        .expect("Failed to update pattern");

    assert_eq!(reconcile.desired, 9); // Mar 2 through Mar 10
    assert_eq!(reconcile.cancelled, 52); // everything past the new end date
    assert_eq!(reconcile.created, 0);
}

#[tokio::test]
async fn test_list_patterns_filters_by_rider_and_status() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let today = date(2026, 3, 2);

    let (alice, _) = scheduler
        .create_pattern(&pattern_params("Alice", "daily", "2026-03-02"), today)
        .await
        .expect("Failed to create pattern");
    scheduler
        .create_pattern(&pattern_params("Bob", "daily", "2026-03-02"), today)
        .await
        .expect("Failed to create pattern");

    let by_rider = scheduler
        .list_patterns(&ListPatterns {
            rider: Some("Ali".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list patterns");
    assert_eq!(by_rider.len(), 1);
    assert_eq!(by_rider[0].rider, "Alice");

    scheduler
        .deactivate_pattern(&Id { id: alice.id }, today)
        .await
        .expect("Failed to deactivate");

    let active = scheduler
        .list_patterns(&ListPatterns::default())
        .await
        .expect("Failed to list patterns");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].rider, "Bob");

    let inactive = scheduler
        .list_patterns(&ListPatterns {
            inactive: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list patterns");
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0].rider, "Alice");
}

#[tokio::test]
async fn test_custom_interval_pattern() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let mut params = pattern_params("Alice", "custom", "2026-03-02");
    params.interval = Some(2);
    params.interval_unit = Some("weeks".to_string());
    let today = date(2026, 3, 2);

    let (pattern, report) = scheduler
        .create_pattern(&params, today)
        .await
        .expect("Failed to create pattern");

    // Fortnightly inside a 30-day horizon: Mar 2, 16, 30
    assert_eq!(report.created(), 3);

    let preview = scheduler
        .preview_occurrences(
            &PreviewPattern {
                id: pattern.id,
                count: 3,
            },
            today,
        )
        .await
        .expect("Failed to preview");
    let dates: Vec<_> = preview.iter().map(|o| o.date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 3, 2), date(2026, 3, 16), date(2026, 3, 30)]
    );
}

#[tokio::test]
async fn test_deactivation_leaves_past_trips_untouched() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let (pattern, report) = scheduler
        .create_pattern(&pattern_params("Alice", "daily", "2026-03-02"), date(2026, 3, 2))
        .await
        .expect("Failed to create pattern");
    assert_eq!(report.created(), 31);

    // The first two trips get completed before the clock moves on
    for day in ["2026-03-02", "2026-03-03"] {
        let trips = scheduler
            .list_trips(&ListTrips {
                from: Some(day.to_string()),
                to: Some(day.to_string()),
                ..Default::default()
            })
            .await
            .expect("Failed to list trips");
        assert_eq!(trips.len(), 1);
        for status in ["in_progress", "completed"] {
            scheduler
                .update_trip(&UpdateTrip {
                    id: trips[0].id,
                    status: Some(status.to_string()),
                    ..Default::default()
                })
                .await
                .expect("Failed to advance trip status");
        }
    }

    // Three days in: Mar 2-3 completed, Mar 4 still scheduled but already
    // in the past, Mar 5 through Apr 1 still ahead
    let today = date(2026, 3, 5);
    let (_, reconcile) = scheduler
        .deactivate_pattern(&Id { id: pattern.id }, today)
        .await
        .expect("Failed to deactivate");
    assert_eq!(reconcile.cancelled, 28);

    // History keeps its statuses, including the never-dispatched Mar 4 run
    let past = scheduler
        .list_trips(&ListTrips {
            to: Some("2026-03-04".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list trips");
    assert_eq!(past.len(), 3);
    assert_eq!(past[0].status, TripStatus::Completed);
    assert_eq!(past[1].status, TripStatus::Completed);
    assert_eq!(past[2].status, TripStatus::Scheduled);
}

#[tokio::test]
async fn test_reconcile_never_alters_trips_before_today() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let (pattern, _) = scheduler
        .create_pattern(&pattern_params("Alice", "daily", "2026-03-02"), date(2026, 3, 2))
        .await
        .expect("Failed to create pattern");

    // A week later the series is ended retroactively on Mar 4
    let today = date(2026, 3, 9);
    let mut update = UpdatePattern::default();
    update.id = pattern.id;
    update.end_date = Some("2026-03-04".to_string());

    let (_, reconcile) = scheduler
        .update_pattern(&update, today)
        .await
        .expect("Failed to update pattern");

    // The shortened schedule wants nothing from today on, so every future
    // scheduled trip goes
    assert_eq!(reconcile.desired, 0);
    assert_eq!(reconcile.cancelled, 24);
    assert_eq!(reconcile.created, 0);

    // Mar 5 through Mar 8 fall after the new end date, but they are dated
    // before today and stay exactly as they were
    let past = scheduler
        .list_trips(&ListTrips {
            from: Some("2026-03-05".to_string()),
            to: Some("2026-03-08".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list trips");
    assert_eq!(past.len(), 4);
    assert!(past.0.iter().all(|t| t.status == TripStatus::Scheduled));
}

#[tokio::test]
async fn test_preview_works_on_inactive_patterns() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let today = date(2026, 3, 2);

    let (pattern, _) = scheduler
        .create_pattern(&pattern_params("Alice", "daily", "2026-03-02"), today)
        .await
        .expect("Failed to create pattern");
    scheduler
        .deactivate_pattern(&Id { id: pattern.id }, today)
        .await
        .expect("Failed to deactivate");

    // Preview answers "what would this pattern produce", so deactivation
    // does not blank it
    let preview = scheduler
        .preview_occurrences(
            &PreviewPattern {
                id: pattern.id,
                count: 3,
            },
            today,
        )
        .await
        .expect("Failed to preview");
    assert_eq!(preview.len(), 3);
}
