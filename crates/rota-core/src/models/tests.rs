#[cfg(test)]
mod model_tests {
    use jiff::civil::{date, time, Weekday};
    use jiff::Timestamp;

    use crate::models::{
        Frequency, IntervalUnit, PatternStatus, PatternSummary, RecurrencePattern, Trip,
        TripCounts, TripStatus, WeekdaySet,
    };

    fn create_test_pattern() -> RecurrencePattern {
        RecurrencePattern {
            id: 1,
            rider: "Avery Quinn".to_string(),
            pickup: "5 Mill Lane".to_string(),
            dropoff: "Riverside Dialysis".to_string(),
            frequency: Frequency::Weekly {
                days: WeekdaySet::from_days([Weekday::Monday, Weekday::Thursday]),
            },
            start_date: date(2025, 3, 3),
            end_date: None,
            start_time: time(8, 30, 0, 0),
            duration_minutes: 45,
            max_occurrences: None,
            skip_weekends: false,
            skip_holidays: false,
            status: PatternStatus::Active,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1641081600).unwrap(), // 2022-01-02 00:00:00 UTC
        }
    }

    fn create_test_trip() -> Trip {
        Trip {
            id: 7,
            pattern_id: Some(1),
            sequence_index: Some(3),
            rider: "Avery Quinn".to_string(),
            pickup: "5 Mill Lane".to_string(),
            dropoff: "Riverside Dialysis".to_string(),
            scheduled_at: date(2025, 3, 10).at(8, 30, 0, 0),
            duration_minutes: 45,
            status: TripStatus::Scheduled,
            driver: None,
            cancel_reason: None,
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_weekday_set_membership() {
        let days = WeekdaySet::from_days([Weekday::Monday, Weekday::Friday]);

        assert!(days.contains(Weekday::Monday));
        assert!(days.contains(Weekday::Friday));
        assert!(!days.contains(Weekday::Sunday));
        assert_eq!(days.len(), 2);
        assert!(!days.is_empty());
        assert!(WeekdaySet::EMPTY.is_empty());
    }

    #[test]
    fn test_weekday_set_iterates_monday_first() {
        let days =
            WeekdaySet::from_days([Weekday::Sunday, Weekday::Wednesday, Weekday::Monday]);

        let collected: Vec<Weekday> = days.iter().collect();
        assert_eq!(
            collected,
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Sunday]
        );
    }

    #[test]
    fn test_weekday_set_display_round_trip() {
        let days =
            WeekdaySet::from_days([Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);

        let text = days.to_string();
        assert_eq!(text, "mon,wed,fri");
        assert_eq!(text.parse::<WeekdaySet>().unwrap(), days);
    }

    #[test]
    fn test_weekday_set_parses_full_names() {
        let days = "Monday, Thursday".parse::<WeekdaySet>().unwrap();
        assert!(days.contains(Weekday::Monday));
        assert!(days.contains(Weekday::Thursday));
        assert_eq!(days.len(), 2);

        assert!("mon,funday".parse::<WeekdaySet>().is_err());
    }

    #[test]
    fn test_weekend_constant() {
        assert!(WeekdaySet::WEEKEND.contains(Weekday::Saturday));
        assert!(WeekdaySet::WEEKEND.contains(Weekday::Sunday));
        assert!(!WeekdaySet::WEEKEND.contains(Weekday::Friday));
    }

    #[test]
    fn test_frequency_display() {
        assert_eq!(Frequency::Daily.to_string(), "daily");
        assert_eq!(
            Frequency::Weekly {
                days: WeekdaySet::from_days([Weekday::Tuesday])
            }
            .to_string(),
            "weekly on tue"
        );
        assert_eq!(
            Frequency::Monthly { day_of_month: 15 }.to_string(),
            "monthly on day 15"
        );
        assert_eq!(
            Frequency::Custom {
                interval: 2,
                unit: IntervalUnit::Weeks
            }
            .to_string(),
            "every 2 weeks"
        );
    }

    #[test]
    fn test_frequency_validate() {
        assert!(Frequency::Daily.validate().is_ok());
        assert!(Frequency::Weekly {
            days: WeekdaySet::EMPTY
        }
        .validate()
        .is_err());
        assert!(Frequency::Monthly { day_of_month: 0 }.validate().is_err());
        assert!(Frequency::Monthly { day_of_month: 32 }.validate().is_err());
        assert!(Frequency::Monthly { day_of_month: 31 }.validate().is_ok());
        assert!(Frequency::Custom {
            interval: 0,
            unit: IntervalUnit::Days
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_interval_unit_from_str() {
        assert_eq!("days".parse::<IntervalUnit>(), Ok(IntervalUnit::Days));
        assert_eq!("week".parse::<IntervalUnit>(), Ok(IntervalUnit::Weeks));
        assert_eq!("Months".parse::<IntervalUnit>(), Ok(IntervalUnit::Months));
        assert!("fortnights".parse::<IntervalUnit>().is_err());
    }

    #[test]
    fn test_frequency_serde_round_trip() {
        let frequency = Frequency::Weekly {
            days: WeekdaySet::from_days([Weekday::Monday, Weekday::Wednesday]),
        };

        let json = serde_json::to_string(&frequency).unwrap();
        assert!(json.contains("\"weekly\""));
        assert!(json.contains("mon,wed"));

        let parsed: Frequency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, frequency);
    }

    #[test]
    fn test_pattern_status_round_trip() {
        assert_eq!("active".parse::<PatternStatus>(), Ok(PatternStatus::Active));
        assert_eq!(
            "INACTIVE".parse::<PatternStatus>(),
            Ok(PatternStatus::Inactive)
        );
        assert_eq!(PatternStatus::Active.as_str(), "active");
        assert_eq!(PatternStatus::default(), PatternStatus::Active);
        assert!("archived".parse::<PatternStatus>().is_err());
    }

    #[test]
    fn test_trip_status_round_trip() {
        for status in [
            TripStatus::Scheduled,
            TripStatus::InProgress,
            TripStatus::Completed,
            TripStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<TripStatus>(), Ok(status));
        }
        assert!("done".parse::<TripStatus>().is_err());
    }

    #[test]
    fn test_trip_status_transitions() {
        assert!(TripStatus::Scheduled.can_transition_to(TripStatus::InProgress));
        assert!(TripStatus::Scheduled.can_transition_to(TripStatus::Cancelled));
        assert!(TripStatus::InProgress.can_transition_to(TripStatus::Completed));

        assert!(!TripStatus::InProgress.can_transition_to(TripStatus::Cancelled));
        assert!(!TripStatus::Completed.can_transition_to(TripStatus::Scheduled));
        assert!(!TripStatus::Cancelled.can_transition_to(TripStatus::Scheduled));
        assert!(!TripStatus::Scheduled.can_transition_to(TripStatus::Completed));
    }

    #[test]
    fn test_trip_status_liveness() {
        assert!(TripStatus::Scheduled.is_live());
        assert!(TripStatus::InProgress.is_live());
        assert!(TripStatus::Completed.is_live());
        assert!(!TripStatus::Cancelled.is_live());
    }

    #[test]
    fn test_pattern_validate() {
        assert!(create_test_pattern().validate().is_ok());

        let mut pattern = create_test_pattern();
        pattern.end_date = Some(date(2025, 3, 1));
        assert!(pattern.validate().is_err());

        let mut pattern = create_test_pattern();
        pattern.duration_minutes = 0;
        assert!(pattern.validate().is_err());

        let mut pattern = create_test_pattern();
        pattern.max_occurrences = Some(0);
        assert!(pattern.validate().is_err());

        let mut pattern = create_test_pattern();
        pattern.frequency = Frequency::Weekly {
            days: WeekdaySet::EMPTY,
        };
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn test_pattern_is_active() {
        let mut pattern = create_test_pattern();
        assert!(pattern.is_active());

        pattern.status = PatternStatus::Inactive;
        assert!(!pattern.is_active());
    }

    #[test]
    fn test_trip_helpers() {
        let trip = create_test_trip();

        assert_eq!(trip.date(), date(2025, 3, 10));
        assert!(trip.is_recurring());

        let ad_hoc = Trip {
            pattern_id: None,
            sequence_index: None,
            ..trip
        };
        assert!(!ad_hoc.is_recurring());
    }

    #[test]
    fn test_pattern_summary_from_pattern() {
        let pattern = create_test_pattern();
        let counts = TripCounts {
            total: 4,
            scheduled: 2,
            completed: 1,
            cancelled: 1,
        };

        let summary = PatternSummary::from_pattern(pattern.clone(), counts);

        assert_eq!(summary.id, pattern.id);
        assert_eq!(summary.rider, pattern.rider);
        assert_eq!(summary.frequency, pattern.frequency);
        assert_eq!(summary.trips.total, 4);
        assert_eq!(summary.trips.scheduled, 2);

        let bare = PatternSummary::from(&pattern);
        assert_eq!(bare.trips.total, 0);
    }

    #[test]
    fn test_pattern_display_includes_schedule() {
        let output = format!("{}", create_test_pattern());

        assert!(output.contains("Avery Quinn"));
        assert!(output.contains("weekly on mon,thu"));
        assert!(output.contains("5 Mill Lane"));
        assert!(output.contains("08:30"));
        assert!(output.contains("open-ended"));
    }

    #[test]
    fn test_trip_display_includes_occurrence_key() {
        let output = format!("{}", create_test_trip());

        assert!(output.contains("○ Scheduled"));
        assert!(output.contains("2025-03-10 08:30"));
        assert!(output.contains("Pattern: 1 (occurrence 3)"));
    }
}
