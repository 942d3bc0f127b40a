// Scenarios the consultation form and the dashboard depend on

#[cfg(test)]
mod booking_scenarios_test {
    use chrono::NaiveDate;

    use booking_features::{
        phone::{auto_format_phone, normalize_phone_number, validate_phone_number},
        slots::{get_time_slots_for_day, validate_selection, BookingSelection},
        ReservationStatus,
        StatusFilterSet,
    };

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Closed days offer nothing
    #[test]
    fn test00() {
        for weekday in [0, 1, 4, 5] {
            assert!(get_time_slots_for_day(weekday).is_empty(), "weekday {weekday}");
        }
    }

    /// Tuesday and Wednesday evenings
    #[test]
    fn test01() {
        let evening = ["19:00", "20:00", "21:00", "22:00"];
        assert_eq!(get_time_slots_for_day(2), evening);
        assert_eq!(get_time_slots_for_day(3), evening);
    }

    /// Saturday runs hourly from 09:00 to 22:00
    #[test]
    fn test02() {
        let saturday = get_time_slots_for_day(6);
        assert_eq!(saturday.len(), 14);
        assert_eq!(saturday.first(), Some(&"09:00"));
        assert_eq!(saturday.last(), Some(&"22:00"));
        for (i, slot) in saturday.iter().enumerate() {
            assert_eq!(*slot, format!("{:02}:00", 9 + i));
        }
    }

    /// Saturday 09:00 is bookable, 08:00 is not
    #[test]
    fn test03() {
        let saturday = ymd(2026, 3, 14);
        assert!(validate_selection(saturday, "09:00"));
        assert!(!validate_selection(saturday, "08:00"));
        // no normalization of the time token
        assert!(!validate_selection(saturday, "9:00"));
    }

    /// Changing the date drops the time even if it is still offered
    #[test]
    fn test04() {
        let mut selection = BookingSelection::new();
        selection.select_date(ymd(2026, 3, 17)); // Tuesday
        selection.select_time("19:00").unwrap();
        assert!(selection.is_complete());

        selection.select_date(ymd(2026, 3, 18)); // Wednesday, 19:00 also offered
        assert_eq!(selection.time(), None);
        assert!(!selection.is_complete());
        assert_eq!(selection.available_times(), ["19:00", "20:00", "21:00", "22:00"]);
    }

    /// Toggling the same status twice gets back to nothing
    #[test]
    fn test05() {
        let set = StatusFilterSet::clear_all().toggle(ReservationStatus::Pending);
        assert!(set.contains(ReservationStatus::Pending));
        assert_eq!(set.len(), 1);
        assert!(set.toggle(ReservationStatus::Pending).is_empty());
    }

    /// Typed local number all the way to a valid canonical number
    #[test]
    fn test06() {
        let display = auto_format_phone("081234567890");
        assert_eq!(display, "+62 812 3456 7890");
        let canonical = normalize_phone_number(&display);
        assert_eq!(canonical, "6281234567890");
        assert!(validate_phone_number(&canonical));
    }
}
