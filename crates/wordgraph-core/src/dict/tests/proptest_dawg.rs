//! Property-based tests for the DAWG compiler.
//!
//! Random word sets over a four-letter alphabet are compiled and checked
//! for exact membership and full enumeration.

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::alphabet::{Alphabet, LetterDef};
use crate::dict::{Dawg, DawgBuilder};

fn abcd() -> Alphabet {
    Alphabet::new(
        ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|c| LetterDef::new(c, 1, 1, c == 'A', c != 'A'))
            .collect(),
    )
    .unwrap()
}

fn arb_word() -> impl Strategy<Value = String> {
    "[ABCD]{1,6}"
}

fn contains(dawg: &Dawg, word: &str) -> bool {
    let i = dawg.char_lookup(dawg.root(), word);
    i != 0 && dawg.is_word(i)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn compiled_dictionary_matches_word_set(
        words in prop::collection::btree_set(arb_word(), 0..60),
        queries in prop::collection::vec(arb_word(), 0..40),
    ) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();

        for word in &words {
            prop_assert!(contains(&dawg, word), "missing {}", word);
        }
        for query in &queries {
            prop_assert_eq!(contains(&dawg, query), words.contains(query));
        }
        let listed: Vec<String> = dawg.words();
        let expected: Vec<String> = words.iter().cloned().collect();
        prop_assert_eq!(listed, expected);
        prop_assert_eq!(dawg.header().nwords() as usize, words.len());
    }

    #[test]
    fn file_round_trip_preserves_words(words in prop::collection::btree_set(arb_word(), 1..40)) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();
        let loaded = Dawg::from_bytes(&dawg.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(loaded.words(), dawg.words());
    }

    #[test]
    fn sharing_never_grows_the_graph(words in prop::collection::btree_set(arb_word(), 1..60)) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();
        let letters: usize = words.iter().map(String::len).sum();
        let h = dawg.header();
        // edges_used counts the sentinel
        prop_assert!(h.edges_used() as usize <= letters + 1);
        let unique: BTreeSet<u32> = (0..dawg.edge_count() as u32)
            .map(|i| dawg.successor(i))
            .collect();
        prop_assert!(unique.len() <= h.nodes_used() as usize + 1);
    }
}
