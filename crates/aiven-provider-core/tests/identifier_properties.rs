//! Property tests for composite resource identifiers.

use aiven_provider_core::identifier::{build_resource_id, split_resource_id};
use aiven_provider_core::{split_resource_id2, split_resource_id3};
use proptest::prelude::*;

fn part_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z0-9-]{1,20}").unwrap(),
        prop::string::string_regex("[a-z/%+ ]{0,20}").unwrap(),
        any::<String>(),
    ]
}

proptest! {
    /// Decoding an encoded id with the same arity gives back the parts.
    #[test]
    fn decode_inverts_encode(parts in prop::collection::vec(part_strategy(), 1..5)) {
        let id = build_resource_id(&parts);
        prop_assert_eq!(split_resource_id(&id, parts.len()), parts);
    }

    /// The separator only ever appears between parts.
    #[test]
    fn separator_count_matches_arity(parts in prop::collection::vec(part_strategy(), 1..5)) {
        let id = build_resource_id(&parts);
        prop_assert_eq!(id.matches('/').count(), parts.len() - 1);
    }

    #[test]
    fn fixed_arity_round_trip(a in part_strategy(), b in part_strategy(), c in part_strategy()) {
        let (a2, b2) = split_resource_id2(&build_resource_id(&[&a, &b])).unwrap();
        prop_assert_eq!((a2, b2), (a.clone(), b.clone()));

        let (a3, b3, c3) = split_resource_id3(&build_resource_id(&[&a, &b, &c])).unwrap();
        prop_assert_eq!((a3, b3, c3), (a, b, c));
    }
}
