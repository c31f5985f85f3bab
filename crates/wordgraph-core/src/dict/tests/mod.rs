mod proptest_dawg;

use crate::alphabet::{Alphabet, LetterDef};
use crate::dict::{Dawg, DawgBuilder};

const VOWELS: &str = "AEIOUY";

/// A..Z plus the joker, with vowel/consonant flags set.
pub(crate) fn latin_alphabet() -> Alphabet {
    let mut defs: Vec<LetterDef> = ('A'..='Z')
        .map(|c| {
            let vowel = VOWELS.contains(c);
            LetterDef::new(c, 1, 2, vowel, !vowel || c == 'Y')
        })
        .collect();
    defs.push(LetterDef::new('?', 0, 2, true, true));
    Alphabet::new(defs).unwrap()
}

pub(crate) fn abc_alphabet() -> Alphabet {
    Alphabet::new(vec![
        LetterDef::new('A', 1, 9, true, false),
        LetterDef::new('B', 3, 2, false, true),
        LetterDef::new('C', 3, 2, false, true),
    ])
    .unwrap()
}

/// Compile a sorted word list over the latin alphabet.
pub(crate) fn build(words: &[&str]) -> Dawg {
    DawgBuilder::new(latin_alphabet())
        .compile("test", words)
        .unwrap()
}

/// Small dictionary shared by the search tests.
pub(crate) fn sample_dict() -> Dawg {
    build(&[
        "A", "AB", "ABC", "AC", "AIE", "AIES", "BA", "BAC", "CAB", "CABS", "DISPLAY", "EAU",
        "ETE", "REPLAY", "SABC", "TAB", "TABAC", "XYZABC",
    ])
}
