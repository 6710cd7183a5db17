//! Property-based checks over fingerprints, level ordering and record sorting.

use proptest::prelude::*;

use specgate_checker::{fingerprint, sort_changes, Change, Level};

fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Err),
    ]
}

fn arb_change() -> impl Strategy<Value = Change> {
    (
        arb_level(),
        "[a-z-]{1,12}",
        "(/[a-z]{1,6}){1,3}",
        prop_oneof![Just("GET"), Just("POST"), Just("DELETE")],
        ".{0,24}",
    )
        .prop_map(|(level, id, path, operation, text)| Change {
            id,
            level,
            text,
            comment: String::new(),
            operation: operation.to_string(),
            operation_id: String::new(),
            path,
            source: String::new(),
        })
}

proptest! {
    #[test]
    fn fingerprint_is_case_insensitive_fixed_width_hex(text in ".{0,64}") {
        let lower = fingerprint(&text.to_lowercase());
        let upper = fingerprint(&text.to_uppercase());
        prop_assert_eq!(&lower, &fingerprint(&text));
        prop_assert_eq!(lower.len(), 16);
        prop_assert!(lower.chars().all(|c| c.is_ascii_hexdigit()));
        // Upper/lower variants of the same text agree when casing is the
        // only difference in a caseless alphabet
        if text.to_lowercase() == text.to_uppercase().to_lowercase() {
            prop_assert_eq!(lower, upper);
        }
    }

    #[test]
    fn level_ordering_is_total_and_info_is_lowest(a in arb_level(), b in arb_level()) {
        prop_assert!(a <= b || b <= a);
        prop_assert!(Level::Info <= a);
        prop_assert!(a <= Level::Err);
    }

    #[test]
    fn sorting_is_idempotent_and_order_independent(
        mut records in proptest::collection::vec(arb_change(), 0..16),
    ) {
        let mut shuffled: Vec<Change> = records.iter().rev().cloned().collect();
        sort_changes(&mut records);
        sort_changes(&mut shuffled);
        prop_assert_eq!(&records, &shuffled);

        let once = records.clone();
        sort_changes(&mut records);
        prop_assert_eq!(records, once);
    }
}
