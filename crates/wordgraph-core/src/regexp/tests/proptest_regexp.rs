//! Property-based tests for the regular-expression search.
//!
//! Literal patterns must find exactly the listed word, and `.*` must
//! enumerate the whole dictionary.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::alphabet::{Alphabet, LetterDef};
use crate::dict::DawgBuilder;
use crate::regexp::search;

use super::options;

fn abcd() -> Alphabet {
    Alphabet::new(
        ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|c| LetterDef::new(c, 1, 1, c == 'A', c != 'A'))
            .collect(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn literal_and_wildcard_patterns(
        words in prop::collection::btree_set("[ABCD]{1,6}", 1..40),
        query in "[ABCD]{1,6}",
    ) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();

        let found = search(&dawg, &query, &options(1, 15, 0)).unwrap();
        let expected: Vec<String> = if words.contains(&query) {
            vec![query.to_lowercase()]
        } else {
            Vec::new()
        };
        prop_assert_eq!(found.words, expected);

        let all = search(&dawg, ".*", &options(1, 15, 0)).unwrap();
        let all: BTreeSet<String> = all.words.into_iter().collect();
        let lower: BTreeSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        prop_assert_eq!(all, lower);
    }

    #[test]
    fn optional_matches_both_spellings(
        words in prop::collection::btree_set("[ABCD]{1,5}", 1..40),
        prefix in "[ABCD]{0,2}",
        optional in "[ABCD]",
        suffix in "[ABCD]{1,2}",
    ) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();
        let pattern = format!("{prefix}{optional}?{suffix}");
        let found: BTreeSet<String> = search(&dawg, &pattern, &options(1, 15, 0))
            .unwrap()
            .words
            .into_iter()
            .collect();
        let expected: BTreeSet<String> = [format!("{prefix}{suffix}"), format!("{prefix}{optional}{suffix}")]
            .into_iter()
            .filter(|w| words.contains(w))
            .map(|w| w.to_lowercase())
            .collect();
        prop_assert_eq!(found, expected);
    }
}
