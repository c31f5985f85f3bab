//! Regular-expression search over a dictionary.
//!
//! A pattern is parsed into a syntax tree, turned into a position automaton,
//! determinized, then walked in lock-step with the edge array: a word matches
//! when the walk ends on a terminal edge in an accepting state.
//!
//! Syntax:
//!
//! ```text
//! A         a letter of the alphabet (either case)
//! .         any letter
//! :v: :c:   any vowel / any consonant
//! :1: :2:   any letter of a user-defined list
//! [ABC]     any of the listed letters, [^ABC] any other letter
//! ( ... )   grouping
//! x? x* x+  optional, zero or more, one or more
//! ```

mod automaton;
mod parser;
#[cfg(test)]
mod tests;
mod tree;

pub use automaton::Automaton;
pub use tree::PosSet;

use tracing::{debug, debug_span};

use crate::alphabet::{to_lower, Alphabet, AlphabetError};
use crate::dict::Dawg;
use crate::search::is_full;
use crate::settings::{settings, MAX_WORD_LENGTH_LIMIT};

/// Automaton symbol. `1..=63` are letter codes, the rest are meta symbols.
pub type Symbol = u16;

pub const EPSILON: Symbol = 64;
/// End marker appended to every pattern.
pub const FINAL: Symbol = 65;
/// First letter-list symbol; list `i` is `ALL + i`.
pub const ALL: Symbol = 66;
pub const VOWEL: Symbol = 67;
pub const CONSONANT: Symbol = 68;
pub const USER_LIST_1: Symbol = 69;
pub const USER_LIST_2: Symbol = 70;

/// Number of positions a pattern may use, end marker included.
pub const MAX_POSITIONS: usize = 64;
const BUILTIN_LISTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegexpError {
    #[error("syntax error at position {pos}: {reason}")]
    Syntax { pos: usize, reason: String },

    #[error("unknown letter '{ch}' at position {pos}")]
    UnknownLetter { pos: usize, ch: char },

    #[error("pattern is too long (at most {max} positions)")]
    TooManyPositions { max: usize },

    #[error("invalid letter in user list {list}: {source}")]
    UserList {
        list: u8,
        #[source]
        source: AlphabetError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexpOptions {
    pub min_length: usize,
    pub max_length: usize,
    /// `0` means no cap.
    pub max_results: usize,
    pub user_list_1: String,
    pub user_list_2: String,
}

impl Default for RegexpOptions {
    fn default() -> Self {
        settings().regexp.options()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegexpMatches {
    /// Matching words, lower-cased, in dictionary order.
    pub words: Vec<String>,
    /// Set when `max_results` cut the search short.
    pub truncated: bool,
}

/// Letter sets addressable by list symbols, bit `code - 1`.
#[derive(Debug, Clone)]
pub(crate) struct LetterLists {
    sets: Vec<u64>,
}

impl LetterLists {
    pub fn new(alphabet: &Alphabet, options: &RegexpOptions) -> Result<Self, RegexpError> {
        let all = alphabet.codes().fold(0u64, |m, c| m | 1u64 << (c - 1));
        let user = |list: u8, letters: &str| -> Result<u64, RegexpError> {
            letters
                .chars()
                .filter(|c| !c.is_whitespace())
                .try_fold(0u64, |m, c| {
                    let code = alphabet
                        .code(c)
                        .map_err(|source| RegexpError::UserList { list, source })?;
                    Ok(m | 1u64 << (code - 1))
                })
        };
        Ok(Self {
            sets: vec![
                all,
                alphabet.vowel_mask(),
                alphabet.consonant_mask(),
                user(1, &options.user_list_1)?,
                user(2, &options.user_list_2)?,
            ],
        })
    }

    /// Register a bracket list and return its symbol.
    pub fn push(&mut self, set: u64) -> Symbol {
        self.sets.push(set);
        ALL + (self.sets.len() - 1) as Symbol
    }

    pub fn all(&self) -> u64 {
        self.sets[0]
    }

    /// List symbols whose set contains `code`.
    pub fn symbols_for(&self, code: Symbol) -> impl Iterator<Item = Symbol> + '_ {
        self.sets
            .iter()
            .enumerate()
            .filter(move |(_, set)| (1..EPSILON).contains(&code) && *set & (1u64 << (code - 1)) != 0)
            .map(|(i, _)| ALL + i as Symbol)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

/// Compile `pattern` into a deterministic automaton over `alphabet`.
pub fn compile(
    pattern: &str,
    alphabet: &Alphabet,
    options: &RegexpOptions,
) -> Result<Automaton, RegexpError> {
    let _span = debug_span!("regexp_compile", pattern).entered();
    let mut lists = LetterLists::new(alphabet, options)?;
    let mut root = parser::parse(pattern, alphabet, &mut lists)?;

    let mut symbols = Vec::new();
    root.traverse(&mut symbols)?;
    let mut follow = vec![PosSet::EMPTY; symbols.len()];
    root.next_positions(&mut follow);
    debug!(
        positions = symbols.len() - 1,
        lists = lists.len() - BUILTIN_LISTS
    );

    let automaton = Automaton::build(root.first, &symbols, &follow, &lists, alphabet.len());
    debug!(states = automaton.state_count());
    Ok(automaton)
}

struct Matcher<'a> {
    dawg: &'a Dawg,
    automaton: &'a Automaton,
    min_length: usize,
    max_length: usize,
    max_results: usize,
    word: String,
    matches: RegexpMatches,
}

impl Matcher<'_> {
    fn walk(&mut self, edge: u32, state: u32, depth: usize) {
        if self.matches.truncated {
            return;
        }
        if self.automaton.is_accepting(state)
            && self.dawg.is_word(edge)
            && (self.min_length..=self.max_length).contains(&depth)
        {
            if is_full(self.matches.words.len(), self.max_results) {
                self.matches.truncated = true;
                return;
            }
            self.matches.words.push(self.word.clone());
        }
        if depth >= self.max_length {
            return;
        }
        for child in self.dawg.children(edge) {
            let next = self.automaton.next_state(state, self.dawg.code(child));
            if next == 0 {
                continue;
            }
            let Ok(ch) = self.dawg.char_at(child) else {
                continue;
            };
            self.word.push(to_lower(ch));
            self.walk(child, next, depth + 1);
            self.word.pop();
            if self.matches.truncated {
                return;
            }
        }
    }
}

/// Every dictionary word matching `pattern` within the length bounds.
///
/// An empty pattern matches nothing.
pub fn search(
    dawg: &Dawg,
    pattern: &str,
    options: &RegexpOptions,
) -> Result<RegexpMatches, RegexpError> {
    let _span = debug_span!("search_regexp", pattern).entered();
    if pattern.is_empty() {
        return Ok(RegexpMatches::default());
    }
    let automaton = compile(pattern, dawg.alphabet(), options)?;

    let max_length = options.max_length.min(MAX_WORD_LENGTH_LIMIT);
    if options.min_length > max_length {
        return Ok(RegexpMatches::default());
    }
    let mut matcher = Matcher {
        dawg,
        automaton: &automaton,
        min_length: options.min_length,
        max_length,
        max_results: options.max_results,
        word: String::with_capacity(max_length),
        matches: RegexpMatches::default(),
    };
    matcher.walk(dawg.root(), automaton.init(), 0);
    debug!(
        results = matcher.matches.words.len(),
        truncated = matcher.matches.truncated
    );
    Ok(matcher.matches)
}
