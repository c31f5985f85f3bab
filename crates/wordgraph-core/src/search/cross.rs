use tracing::{debug, debug_span};

use crate::alphabet::{to_upper, Code};
use crate::dict::Dawg;
use crate::settings::settings;

use super::is_full;

struct CrossWalk<'a> {
    dawg: &'a Dawg,
    /// `None` is a wildcard.
    mask: Vec<Option<Code>>,
    max_results: usize,
    word: String,
    found: Vec<String>,
}

impl CrossWalk<'_> {
    fn walk(&mut self, edge: u32, depth: usize) {
        if is_full(self.found.len(), self.max_results) {
            return;
        }
        if depth == self.mask.len() {
            if self.dawg.is_word(edge) {
                self.found.push(self.word.clone());
            }
            return;
        }
        let wanted = self.mask[depth];
        for child in self.dawg.children(edge) {
            let code = self.dawg.code(child);
            if wanted.is_some_and(|w| w != code) {
                continue;
            }
            let Ok(ch) = self.dawg.char_at(child) else {
                continue;
            };
            self.word.push(ch);
            self.walk(child, depth + 1);
            self.word.pop();
            if wanted.is_some() {
                break;
            }
        }
    }
}

pub(super) fn cross(dawg: &Dawg, mask: &str, max_results: usize) -> Vec<String> {
    let _span = debug_span!("search_cross", mask).entered();
    let mut codes = Vec::new();
    for c in mask.chars() {
        if c.is_alphabetic() {
            match dawg.alphabet().code(to_upper(c)) {
                Ok(code) => codes.push(Some(code)),
                Err(_) => return Vec::new(),
            }
        } else {
            codes.push(None);
        }
    }
    if codes.is_empty() || codes.len() > settings().search.max_word_length {
        return Vec::new();
    }

    let mut walk = CrossWalk {
        dawg,
        word: String::with_capacity(codes.len()),
        mask: codes,
        max_results,
        found: Vec::new(),
    };
    walk.walk(dawg.root(), 0);
    debug!(results = walk.found.len());
    walk.found
}
