#[cfg(test)]
mod tests {
    use crate::models::schedule::parse_schedule_json_str;
    use crate::models::schedule::BusinessScheduleModel;
    use crate::models::time::{CalendarDate, ClockTime, MonthCursor};
    use crate::services::availability::{
        can_navigate, check_slot, compute_disabled_dates, is_slot_valid, month_overlaps_window,
        AvailabilityWindow, BookedInterval, FallbackPolicy, MonthStep, SlotViolation,
    };

    // Mon-Fri 09:00-18:00 with a 12:00-13:00 lunch break; 2024-06-10 closed.
    fn weekday_schedule() -> BusinessScheduleModel {
        parse_schedule_json_str(
            r#"{
                "weekly_hours": {
                    "monday":    { "is_open": true, "open": "09:00", "close": "18:00",
                                   "breaks": [ { "start": "12:00", "end": "13:00" } ] },
                    "tuesday":   { "is_open": true, "open": "09:00", "close": "18:00" },
                    "wednesday": { "is_open": true, "open": "09:00", "close": "18:00" },
                    "thursday":  { "is_open": true, "open": "09:00", "close": "18:00" },
                    "friday":    { "is_open": true, "open": "09:00", "close": "18:00" }
                },
                "blocked_dates": [ "2024-06-10" ]
            }"#,
        )
        .expect("fixture schedule should parse")
    }

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    fn june_window() -> AvailabilityWindow {
        AvailabilityWindow::new(date(2024, 6, 3), date(2024, 6, 16)).unwrap()
    }

    // =========================================================
    // Disabled-date computation
    // =========================================================

    #[test]
    fn test_disabled_dates_weekends_and_blocked() {
        let disabled =
            compute_disabled_dates(&weekday_schedule(), &june_window(), FallbackPolicy::Propagate)
                .unwrap();

        // Two weekends plus the blocked Monday
        assert!(disabled.contains(&date(2024, 6, 8)));
        assert!(disabled.contains(&date(2024, 6, 9)));
        assert!(disabled.contains(&date(2024, 6, 15)));
        assert!(disabled.contains(&date(2024, 6, 16)));
        assert!(disabled.contains(&date(2024, 6, 10)));
        assert_eq!(disabled.len(), 5);
    }

    #[test]
    fn test_disabled_dates_stay_inside_window() {
        let window = june_window();
        let disabled =
            compute_disabled_dates(&weekday_schedule(), &window, FallbackPolicy::Propagate)
                .unwrap();
        for d in &disabled {
            assert!(window.contains(*d), "{} escaped the window", d);
        }
    }

    #[test]
    fn test_open_unblocked_dates_are_not_disabled() {
        let disabled =
            compute_disabled_dates(&weekday_schedule(), &june_window(), FallbackPolicy::Propagate)
                .unwrap();
        assert!(!disabled.contains(&date(2024, 6, 3)));
        assert!(!disabled.contains(&date(2024, 6, 14)));
    }

    #[test]
    fn test_window_min_date_is_selectable_same_day() {
        // The window's first day (conceptually "today") is not excluded
        // merely for being today.
        let disabled =
            compute_disabled_dates(&weekday_schedule(), &june_window(), FallbackPolicy::Propagate)
                .unwrap();
        assert!(!disabled.contains(&date(2024, 6, 3)));
    }

    #[test]
    fn test_unusable_schedule_propagates_by_default() {
        let mut schedule = weekday_schedule();
        let monday = schedule
            .weekly_hours
            .get_mut(&crate::models::time::Weekday::Monday)
            .unwrap();
        monday.open = time(19, 0); // open after close

        let result =
            compute_disabled_dates(&schedule, &june_window(), FallbackPolicy::Propagate);
        assert!(matches!(
            result,
            Err(crate::error::FlowError::ScheduleUnavailable { .. })
        ));
    }

    #[test]
    fn test_unusable_schedule_with_opt_in_fallback_disables_nothing() {
        let mut schedule = weekday_schedule();
        let monday = schedule
            .weekly_hours
            .get_mut(&crate::models::time::Weekday::Monday)
            .unwrap();
        monday.open = time(19, 0);

        let disabled =
            compute_disabled_dates(&schedule, &june_window(), FallbackPolicy::AssumeOpen)
                .unwrap();
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let result = AvailabilityWindow::new(date(2024, 6, 16), date(2024, 6, 3));
        assert!(matches!(
            result,
            Err(crate::error::FlowError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_single_day_window_is_valid() {
        let window = AvailabilityWindow::new(date(2024, 6, 3), date(2024, 6, 3)).unwrap();
        let disabled =
            compute_disabled_dates(&weekday_schedule(), &window, FallbackPolicy::Propagate)
                .unwrap();
        assert!(disabled.is_empty());
    }

    // =========================================================
    // Slot validity
    // =========================================================

    #[test]
    fn test_slot_valid_at_opening() {
        assert!(is_slot_valid(
            &weekday_schedule(),
            date(2024, 6, 3),
            time(9, 0),
            60,
            &[]
        ));
    }

    #[test]
    fn test_slot_inside_break_is_invalid() {
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(12, 30), 30, &[]),
            Err(SlotViolation::InsideBreak)
        );
    }

    #[test]
    fn test_slot_touching_break_edges_is_valid() {
        // 11:00-12:00 ends exactly at break start; 13:00-14:00 starts at its end
        let schedule = weekday_schedule();
        assert!(is_slot_valid(&schedule, date(2024, 6, 3), time(11, 0), 60, &[]));
        assert!(is_slot_valid(&schedule, date(2024, 6, 3), time(13, 0), 60, &[]));
    }

    #[test]
    fn test_slot_on_closed_weekday_is_invalid() {
        // 2024-06-08 is a Saturday
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 8), time(10, 0), 30, &[]),
            Err(SlotViolation::ClosedDay)
        );
    }

    #[test]
    fn test_slot_crossing_midnight_is_invalid_regardless_of_hours() {
        // Even a business closing at 18:00 reports the midnight rule first
        // for a 23:30 start: the weekday gate runs first, so use an open day.
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(23, 30), 45, &[]),
            Err(SlotViolation::CrossesMidnight)
        );
    }

    #[test]
    fn test_oversized_duration_is_invalid_not_a_panic() {
        // A duration large enough to overflow minute arithmetic must come
        // back as a midnight-rule violation, never a wrapped-around "valid".
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(9, 0), u32::MAX - 500, &[]),
            Err(SlotViolation::CrossesMidnight)
        );
        assert!(!is_slot_valid(
            &weekday_schedule(),
            date(2024, 6, 3),
            time(9, 0),
            u32::MAX,
            &[]
        ));
    }

    #[test]
    fn test_slot_ending_exactly_at_midnight_checks_hours() {
        // 23:00 + 60min = 24:00 does not cross midnight, but is outside hours.
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(23, 0), 60, &[]),
            Err(SlotViolation::OutsideHours)
        );
    }

    #[test]
    fn test_slot_running_past_close_is_invalid() {
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(17, 30), 60, &[]),
            Err(SlotViolation::OutsideHours)
        );
    }

    #[test]
    fn test_slot_ending_exactly_at_close_is_valid() {
        assert!(is_slot_valid(
            &weekday_schedule(),
            date(2024, 6, 3),
            time(17, 0),
            60,
            &[]
        ));
    }

    #[test]
    fn test_slot_before_opening_is_invalid() {
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(8, 30), 30, &[]),
            Err(SlotViolation::OutsideHours)
        );
    }

    #[test]
    fn test_slot_on_blocked_date_is_invalid() {
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 10), time(10, 0), 30, &[]),
            Err(SlotViolation::DateBlocked)
        );
    }

    #[test]
    fn test_slot_overlapping_booked_interval_is_invalid() {
        let booked = [BookedInterval {
            date: date(2024, 6, 3),
            start: time(10, 0),
            end: time(10, 30),
        }];
        assert_eq!(
            check_slot(&weekday_schedule(), date(2024, 6, 3), time(10, 15), 30, &booked),
            Err(SlotViolation::AlreadyBooked)
        );
        // Touching intervals do not collide (half-open rule)
        assert!(is_slot_valid(
            &weekday_schedule(),
            date(2024, 6, 3),
            time(10, 30),
            30,
            &booked
        ));
        // Same time on another day is free
        assert!(is_slot_valid(
            &weekday_schedule(),
            date(2024, 6, 4),
            time(10, 15),
            30,
            &booked
        ));
    }

    // =========================================================
    // Month navigation bounds
    // =========================================================

    #[test]
    fn test_month_overlap_with_window() {
        let window = june_window();
        assert!(month_overlaps_window(&MonthCursor::new(2024, 6).unwrap(), &window));
        assert!(!month_overlaps_window(&MonthCursor::new(2024, 5).unwrap(), &window));
        assert!(!month_overlaps_window(&MonthCursor::new(2024, 7).unwrap(), &window));
    }

    #[test]
    fn test_navigation_disabled_outside_window() {
        let window = june_window();
        let june = MonthCursor::new(2024, 6).unwrap();
        assert!(!can_navigate(&june, MonthStep::Prev, &window));
        assert!(!can_navigate(&june, MonthStep::Next, &window));
    }

    #[test]
    fn test_navigation_enabled_when_window_spans_months() {
        // Window crossing a month boundary: June 25 - July 9
        let window = AvailabilityWindow::new(date(2024, 6, 25), date(2024, 7, 9)).unwrap();
        let june = MonthCursor::new(2024, 6).unwrap();
        let july = MonthCursor::new(2024, 7).unwrap();
        assert!(can_navigate(&june, MonthStep::Next, &window));
        assert!(can_navigate(&july, MonthStep::Prev, &window));
        assert!(!can_navigate(&june, MonthStep::Prev, &window));
        assert!(!can_navigate(&july, MonthStep::Next, &window));
    }

    #[test]
    fn test_navigation_bounds_ignore_open_state() {
        // Every day of the adjacent month may be closed; the control only
        // looks at the window boundary.
        let window = AvailabilityWindow::new(date(2024, 6, 25), date(2024, 7, 9)).unwrap();
        let june = MonthCursor::new(2024, 6).unwrap();
        assert!(can_navigate(&june, MonthStep::Next, &window));
    }
}
