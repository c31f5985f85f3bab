use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::alphabet::{Alphabet, LetterDef};
use crate::dict::tests::{abc_alphabet, sample_dict};
use crate::dict::DawgBuilder;
use crate::regexp::RegexpOptions;

use super::{SearchError, WordSearch};

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_search_word() {
    let dawg = sample_dict();
    assert!(dawg.search_word("AB"));
    assert!(dawg.search_word("ab"));
    assert!(dawg.search_word("XYZABC"));
    assert!(!dawg.search_word("ABD"));
    assert!(!dawg.search_word("XYZ"));
    assert!(!dawg.search_word(""));
    assert!(!dawg.search_word("ÉTÉ"));
}

#[test]
fn test_small_dictionary_cross() {
    let dawg = DawgBuilder::new(abc_alphabet())
        .compile("scenario", ["AB", "ABC", "AC"])
        .unwrap();
    assert!(dawg.search_word("AB"));
    assert!(!dawg.search_word("A"));
    assert_eq!(dawg.search_cross(".B", 0), strings(&["AB"]));
}

#[test]
fn test_anagrams_use_part_of_rack() {
    let dawg = sample_dict();
    let found = dawg.search_anagrams("AEIOU", 3, false, 0).unwrap();
    assert_eq!(found, strings(&["AIE", "EAU"]));

    let without_i = dawg.search_anagrams("AEOUU", 3, false, 0).unwrap();
    assert!(!without_i.contains(&"AIE".to_string()));
}

#[test]
fn test_anagrams_with_joker() {
    let dawg = sample_dict();
    assert_eq!(
        dawg.search_anagrams("TA?", 3, true, 0).unwrap(),
        strings(&["TAb"])
    );
    assert!(matches!(
        dawg.search_anagrams("TA?", 3, false, 0),
        Err(SearchError::JokerNotAllowed)
    ));
    assert!(matches!(
        dawg.search_anagrams("TAÉ", 3, false, 0),
        Err(SearchError::Alphabet(_))
    ));
}

#[test]
fn test_anagrams_longer_than_rack() {
    let dawg = sample_dict();
    assert!(dawg.search_anagrams("AB", 3, false, 0).unwrap().is_empty());
    assert!(dawg.search_anagrams("AB", 0, false, 0).unwrap().is_empty());
}

#[test]
fn test_plus1() {
    let dawg = sample_dict();
    let results = dawg.search_plus1("AB", false, 0).unwrap();
    let expected: BTreeMap<Option<char>, Vec<String>> = [
        (None, strings(&["AB", "BA"])),
        (Some('C'), strings(&["ABC", "BAC", "CAB"])),
        (Some('T'), strings(&["TAB"])),
    ]
    .into_iter()
    .collect();
    assert_eq!(results, expected);
}

#[test]
fn test_plus1_cap_counts_all_groups() {
    let dawg = sample_dict();
    let results = dawg.search_plus1("AB", false, 3).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[&None], strings(&["AB", "BA"]));
    assert_eq!(results[&Some('C')], strings(&["ABC"]));
}

#[test]
fn test_plus1_empty_rack() {
    assert!(sample_dict().search_plus1("", false, 0).unwrap().is_empty());
}

#[test]
fn test_racc() {
    let dawg = sample_dict();
    assert_eq!(dawg.search_racc("AB", 0), strings(&["CAB", "TAB", "ABC"]));
    assert_eq!(dawg.search_racc("ab", 0), strings(&["CAB", "TAB", "ABC"]));
    assert_eq!(dawg.search_racc("AB", 1), strings(&["CAB"]));
    assert!(dawg.search_racc("", 0).is_empty());
}

#[test]
fn test_benj() {
    let dawg = sample_dict();
    assert_eq!(dawg.search_benj("C", 0), strings(&["SABC"]));
    assert_eq!(dawg.search_benj("AC", 0), strings(&["TABAC"]));
    assert!(dawg.search_benj("Q", 0).is_empty());
    assert!(dawg.search_benj("", 0).is_empty());
}

#[test]
fn test_cross() {
    let dawg = sample_dict();
    assert_eq!(dawg.search_cross("CAB.", 0), strings(&["CABS"]));
    assert_eq!(
        dawg.search_cross("?A?", 0),
        strings(&["BAC", "CAB", "EAU", "TAB"])
    );
    assert_eq!(dawg.search_cross("?A?", 2), strings(&["BAC", "CAB"]));
    assert_eq!(dawg.search_cross("a", 0), strings(&["A"]));
    assert!(dawg.search_cross("ZZZ", 0).is_empty());
    assert!(dawg.search_cross("É..", 0).is_empty());
    assert!(dawg.search_cross("", 0).is_empty());
    assert!(dawg.search_cross(&".".repeat(16), 0).is_empty());
}

#[test]
fn test_regexp_through_trait() {
    let dawg = sample_dict();
    let options = RegexpOptions {
        min_length: 1,
        max_length: 15,
        max_results: 0,
        user_list_1: String::new(),
        user_list_2: String::new(),
    };
    let found = dawg.search_regexp("TAB(AC)?", &options).unwrap();
    assert_eq!(found.words, strings(&["tab", "tabac"]));
    assert!(matches!(
        dawg.search_regexp("TAB(", &options),
        Err(SearchError::Pattern(_))
    ));
}

fn abcd() -> Alphabet {
    Alphabet::new(
        ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|c| LetterDef::new(c, 1, 1, c == 'A', c != 'A'))
            .collect(),
    )
    .unwrap()
}

fn letter_counts(word: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in word.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

fn fits(word: &str, rack: &BTreeMap<char, usize>) -> bool {
    letter_counts(word)
        .iter()
        .all(|(c, n)| rack.get(c).copied().unwrap_or(0) >= *n)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn anagrams_respect_rack(
        words in prop::collection::btree_set("[ABCD]{1,5}", 1..60),
        rack in "[ABCD]{1,6}",
        length in 1usize..6,
    ) {
        let dawg = DawgBuilder::new(abcd()).compile("prop", &words).unwrap();
        let found = dawg.search_anagrams(&rack, length, false, 0).unwrap();
        let budget = letter_counts(&rack);

        let expected: Vec<String> = words
            .iter()
            .filter(|w| w.len() == length && fits(w, &budget))
            .cloned()
            .collect();
        prop_assert_eq!(found, expected);
    }
}
