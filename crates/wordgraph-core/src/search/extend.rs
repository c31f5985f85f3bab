use tracing::{debug, debug_span};

use crate::alphabet::{to_upper, JOKER};
use crate::dict::Dawg;

use super::{is_full, WordSearch};

/// One letter in front, then one letter at the end.
pub(super) fn racc(dawg: &Dawg, word: &str, max_results: usize) -> Vec<String> {
    let _span = debug_span!("search_racc", word).entered();
    let mut found = Vec::new();
    if word.is_empty() {
        return found;
    }
    let word: String = word.chars().map(to_upper).collect();

    let alphabet = dawg.alphabet();
    let mut candidate = String::with_capacity(word.len() + 4);
    for &ch in alphabet.letters() {
        if ch == JOKER {
            continue;
        }
        candidate.clear();
        candidate.push(ch);
        candidate.push_str(&word);
        if dawg.search_word(&candidate) {
            found.push(candidate.clone());
            if is_full(found.len(), max_results) {
                return found;
            }
        }
    }

    let end = dawg.char_lookup(dawg.root(), &word);
    if end != 0 {
        for edge in dawg.children(end) {
            if !dawg.is_word(edge) {
                continue;
            }
            let Ok(ch) = dawg.char_at(edge) else {
                continue;
            };
            let mut extended = word.clone();
            extended.push(ch);
            found.push(extended);
            if is_full(found.len(), max_results) {
                break;
            }
        }
    }

    debug!(results = found.len());
    found
}

/// Three letters in front of the word.
pub(super) fn benj(dawg: &Dawg, word: &str, max_results: usize) -> Vec<String> {
    let _span = debug_span!("search_benj", word).entered();
    let mut found = Vec::new();
    if word.is_empty() {
        return found;
    }
    let word: String = word.chars().map(to_upper).collect();

    let mut prefix = String::with_capacity(3 * 4);
    for e0 in dawg.children(dawg.root()) {
        let Ok(c0) = dawg.char_at(e0) else { continue };
        prefix.push(c0);
        for e1 in dawg.children(e0) {
            let Ok(c1) = dawg.char_at(e1) else { continue };
            prefix.push(c1);
            for e2 in dawg.children(e1) {
                let end = dawg.char_lookup(e2, &word);
                if end == 0 || !dawg.is_word(end) {
                    continue;
                }
                let Ok(c2) = dawg.char_at(e2) else { continue };
                let mut result = prefix.clone();
                result.push(c2);
                result.push_str(&word);
                found.push(result);
                if is_full(found.len(), max_results) {
                    debug!(results = found.len());
                    return found;
                }
            }
            prefix.pop();
        }
        prefix.pop();
    }

    debug!(results = found.len());
    found
}
