//! Queries over a compiled dictionary.
//!
//! Every search is a depth-first walk over the edge array that reuses one
//! word buffer, undoing each step on the way back. Result caps truncate
//! silently (`0` means no cap); only the regular-expression search reports
//! truncation.

mod cross;
mod extend;
mod rack;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use crate::alphabet::AlphabetError;
use crate::dict::Dawg;
use crate::regexp::{self, RegexpError, RegexpMatches, RegexpOptions};

/// Plus-one results keyed by the added letter; `None` holds the words made
/// from the rack alone.
pub type Plus1Results = BTreeMap<Option<char>, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{0}")]
    Alphabet(#[from] AlphabetError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] RegexpError),

    #[error("the rack contains a joker but jokers are not allowed")]
    JokerNotAllowed,
}

/// Read-only query interface of a dictionary.
pub trait WordSearch: Send + Sync {
    /// Exact membership. Words with characters outside the alphabet are
    /// not found.
    fn search_word(&self, word: &str) -> bool;

    /// Words of exactly `length` letters that can be made from the rack.
    ///
    /// `?` stands for a joker when `joker` is set; joker letters come back
    /// lower-cased.
    fn search_anagrams(
        &self,
        rack: &str,
        length: usize,
        joker: bool,
        max_results: usize,
    ) -> Result<Vec<String>, SearchError>;

    /// Words using every rack letter, then every rack letter plus one.
    fn search_plus1(
        &self,
        rack: &str,
        joker: bool,
        max_results: usize,
    ) -> Result<Plus1Results, SearchError>;

    /// Words made by adding one letter in front of or after `word`.
    fn search_racc(&self, word: &str, max_results: usize) -> Vec<String>;

    /// Words made by adding three letters in front of `word`.
    fn search_benj(&self, word: &str, max_results: usize) -> Vec<String>;

    /// Words matching a mask where any non-letter is a wildcard.
    fn search_cross(&self, mask: &str, max_results: usize) -> Vec<String>;

    /// Words matching a regular expression.
    fn search_regexp(
        &self,
        pattern: &str,
        options: &RegexpOptions,
    ) -> Result<RegexpMatches, SearchError>;
}

impl WordSearch for Dawg {
    fn search_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let index = self.char_lookup(self.root(), word);
        index != 0 && self.is_word(index)
    }

    fn search_anagrams(
        &self,
        rack: &str,
        length: usize,
        joker: bool,
        max_results: usize,
    ) -> Result<Vec<String>, SearchError> {
        rack::anagrams(self, rack, length, joker, max_results)
    }

    fn search_plus1(
        &self,
        rack: &str,
        joker: bool,
        max_results: usize,
    ) -> Result<Plus1Results, SearchError> {
        rack::plus1(self, rack, joker, max_results)
    }

    fn search_racc(&self, word: &str, max_results: usize) -> Vec<String> {
        extend::racc(self, word, max_results)
    }

    fn search_benj(&self, word: &str, max_results: usize) -> Vec<String> {
        extend::benj(self, word, max_results)
    }

    fn search_cross(&self, mask: &str, max_results: usize) -> Vec<String> {
        cross::cross(self, mask, max_results)
    }

    fn search_regexp(
        &self,
        pattern: &str,
        options: &RegexpOptions,
    ) -> Result<RegexpMatches, SearchError> {
        Ok(regexp::search(self, pattern, options)?)
    }
}

pub(crate) fn is_full(results: usize, max_results: usize) -> bool {
    max_results != 0 && results >= max_results
}
