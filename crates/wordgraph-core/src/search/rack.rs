use tracing::{debug, debug_span};

use crate::alphabet::{to_lower, Code, JOKER};
use crate::dict::Dawg;
use crate::settings::settings;

use super::{is_full, Plus1Results, SearchError};

/// Letter budget of a rack, indexed by code. Slot 0 holds the jokers.
struct Budget {
    counts: [u8; 64],
    len: usize,
}

impl Budget {
    fn parse(dawg: &Dawg, rack: &str, joker: bool) -> Result<Self, SearchError> {
        let mut counts = [0u8; 64];
        let mut len = 0;
        for c in rack.chars() {
            if c == JOKER {
                if !joker {
                    return Err(SearchError::JokerNotAllowed);
                }
                counts[0] = counts[0].saturating_add(1);
                len += 1;
            } else if c.is_alphabetic() {
                let code = dawg.alphabet().code(c)?;
                counts[code as usize] = counts[code as usize].saturating_add(1);
                len += 1;
            }
        }
        Ok(Self { counts, len })
    }
}

/// One pass of the rack walk: every word of `target` letters.
struct RackWalk<'a> {
    dawg: &'a Dawg,
    budget: &'a mut Budget,
    target: usize,
    max_results: usize,
    word: String,
    found: Vec<String>,
}

impl RackWalk<'_> {
    fn walk(&mut self, first: u32, depth: usize) {
        for edge in self.dawg.siblings(first) {
            if is_full(self.found.len(), self.max_results) {
                return;
            }
            let code = self.dawg.code(edge);
            let Ok(ch) = self.dawg.char_at(edge) else {
                continue;
            };
            if self.budget.counts[code as usize] > 0 {
                self.step(edge, code, ch, depth);
            }
            if self.budget.counts[0] > 0 {
                self.step(edge, 0, to_lower(ch), depth);
            }
        }
    }

    fn step(&mut self, edge: u32, slot: Code, ch: char, depth: usize) {
        self.budget.counts[slot as usize] -= 1;
        self.word.push(ch);
        if depth + 1 == self.target {
            if self.dawg.is_word(edge) && !is_full(self.found.len(), self.max_results) {
                self.found.push(self.word.clone());
            }
        } else {
            self.walk(self.dawg.successor(edge), depth + 1);
        }
        self.word.pop();
        self.budget.counts[slot as usize] += 1;
    }
}

fn run(dawg: &Dawg, budget: &mut Budget, target: usize, max_results: usize) -> Vec<String> {
    if target == 0 || target > budget.len {
        return Vec::new();
    }
    let mut walk = RackWalk {
        dawg,
        budget,
        target,
        max_results,
        word: String::with_capacity(target),
        found: Vec::new(),
    };
    walk.walk(dawg.successor(dawg.root()), 0);
    walk.found
}

pub(super) fn anagrams(
    dawg: &Dawg,
    rack: &str,
    length: usize,
    joker: bool,
    max_results: usize,
) -> Result<Vec<String>, SearchError> {
    let _span = debug_span!("search_anagrams", rack, length).entered();
    let mut budget = Budget::parse(dawg, rack, joker)?;
    if length > settings().search.max_word_length {
        return Ok(Vec::new());
    }
    let found = run(dawg, &mut budget, length, max_results);
    debug!(results = found.len());
    Ok(found)
}

pub(super) fn plus1(
    dawg: &Dawg,
    rack: &str,
    joker: bool,
    max_results: usize,
) -> Result<Plus1Results, SearchError> {
    let _span = debug_span!("search_plus1", rack, joker).entered();
    let mut results = Plus1Results::new();
    let mut budget = Budget::parse(dawg, rack, joker)?;
    let len = budget.len;
    if len == 0 || len > settings().search.max_word_length {
        return Ok(results);
    }

    let mut total = 0;
    let exact = run(dawg, &mut budget, len, max_results);
    total += exact.len();
    if !exact.is_empty() {
        results.insert(None, exact);
    }

    let alphabet = dawg.alphabet();
    for code in alphabet.codes() {
        let Ok(ch) = alphabet.char_of(code) else {
            continue;
        };
        if ch == JOKER {
            continue;
        }
        if is_full(total, max_results) {
            break;
        }
        let remaining = if max_results == 0 { 0 } else { max_results - total };
        budget.len += 1;
        budget.counts[code as usize] += 1;
        let words = run(dawg, &mut budget, len + 1, remaining);
        budget.counts[code as usize] -= 1;
        budget.len -= 1;
        total += words.len();
        if !words.is_empty() {
            results.insert(Some(ch), words);
        }
    }

    debug!(results = total);
    Ok(results)
}
