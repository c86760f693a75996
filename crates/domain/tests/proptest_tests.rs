//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{ClockTime, LectureCategory, LectureDate, LectureId};
use proptest::prelude::*;

// ============================================================================
// ClockTime Property Tests
// ============================================================================

mod clock_time_tests {
    use super::*;

    proptest! {
        #[test]
        fn padded_times_parse(hour in 0u32..=23, minute in 0u32..=59) {
            let text = format!("{hour:02}:{minute:02}");
            let time = ClockTime::parse(&text).unwrap();
            prop_assert_eq!(time.hour(), hour);
            prop_assert_eq!(time.minute(), minute);
            prop_assert_eq!(time.to_string(), text);
        }

        #[test]
        fn unpadded_hours_parse_and_render_padded(hour in 0u32..=9, minute in 0u32..=59) {
            let time = ClockTime::parse(&format!("{hour}:{minute:02}")).unwrap();
            prop_assert_eq!(time.to_string(), format!("0{hour}:{minute:02}"));
        }

        #[test]
        fn out_of_range_hours_rejected(hour in 24u32..=99, minute in 0u32..=59) {
            let text = format!("{hour}:{minute:02}");
            prop_assert!(ClockTime::parse(&text).is_err());
        }

        #[test]
        fn out_of_range_minutes_rejected(hour in 0u32..=23, minute in 60u32..=99) {
            let text = format!("{hour:02}:{minute}");
            prop_assert!(ClockTime::parse(&text).is_err());
        }

        #[test]
        fn single_digit_minutes_rejected(hour in 0u32..=23, minute in 0u32..=9) {
            let text = format!("{hour:02}:{minute}");
            prop_assert!(ClockTime::parse(&text).is_err());
        }

        #[test]
        fn order_matches_rendered_order(
            h1 in 0u32..=23, m1 in 0u32..=59,
            h2 in 0u32..=23, m2 in 0u32..=59
        ) {
            let a = ClockTime::new(h1, m1).unwrap();
            let b = ClockTime::new(h2, m2).unwrap();
            prop_assert_eq!(a.cmp(&b), a.to_string().cmp(&b.to_string()));
        }

        #[test]
        fn arbitrary_text_never_panics(s in "\\PC{0,8}") {
            let _ = ClockTime::parse(&s);
        }
    }
}

// ============================================================================
// LectureDate Property Tests
// ============================================================================

mod lecture_date_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_dates_parse_and_render_identically(
            year in 1900i32..=2200,
            month in 1u32..=12,
            day in 1u32..=28
        ) {
            let text = format!("{year:04}-{month:02}-{day:02}");
            let date = LectureDate::parse(&text).unwrap();
            prop_assert_eq!(date.to_string(), text);
        }

        #[test]
        fn invalid_months_rejected(year in 1900i32..=2200, month in 13u32..=99, day in 1u32..=28) {
            let text = format!("{year:04}-{month:02}-{day:02}");
            prop_assert!(LectureDate::parse(&text).is_err());
        }

        #[test]
        fn unpadded_components_rejected(year in 1900i32..=2200, month in 1u32..=9, day in 1u32..=9) {
            let text = format!("{year}-{month}-{day}");
            prop_assert!(LectureDate::parse(&text).is_err());
        }

        #[test]
        fn order_matches_rendered_order(
            y1 in 1900i32..=2200, mo1 in 1u32..=12, d1 in 1u32..=28,
            y2 in 1900i32..=2200, mo2 in 1u32..=12, d2 in 1u32..=28
        ) {
            let a = LectureDate::parse(&format!("{y1:04}-{mo1:02}-{d1:02}")).unwrap();
            let b = LectureDate::parse(&format!("{y2:04}-{mo2:02}-{d2:02}")).unwrap();
            prop_assert_eq!(a.cmp(&b), a.to_string().cmp(&b.to_string()));
        }

        #[test]
        fn serialization_roundtrip(year in 1900i32..=2200, month in 1u32..=12, day in 1u32..=28) {
            let date = LectureDate::parse(&format!("{year:04}-{month:02}-{day:02}")).unwrap();
            let json = serde_json::to_string(&date).unwrap();
            let back: LectureDate = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(date, back);
        }
    }
}

// ============================================================================
// LectureCategory Property Tests
// ============================================================================

mod lecture_category_tests {
    use super::*;

    proptest! {
        #[test]
        fn every_category_parses_from_its_name(index in 0usize..8) {
            let category = LectureCategory::all()[index];
            prop_assert_eq!(category.as_str().parse::<LectureCategory>().unwrap(), category);
        }

        #[test]
        fn uppercase_names_rejected(s in "[A-Z]{3,12}") {
            prop_assert!(s.parse::<LectureCategory>().is_err());
        }
    }
}

// ============================================================================
// LectureId Property Tests
// ============================================================================

mod lecture_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn non_empty_ids_kept_verbatim(s in "[ a-zA-Z0-9-]{1,36}") {
            let id = LectureId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
