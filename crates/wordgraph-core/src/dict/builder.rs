//! Offline compiler from a sorted word list to a minimal DAWG.
//!
//! Nodes are emitted children first, so every edge run is complete
//! (pointers included) when it is looked up in the dedup table. Two runs
//! with identical content describe isomorphic sub-graphs and share storage.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, debug_span};

use crate::alphabet::{parse_letters, Alphabet, AlphabetError, Code};
use crate::settings::{settings, MAX_WORD_LENGTH_LIMIT};

use super::edge::{Edge, MAX_PTR};
use super::header::{DictType, Header, HeaderInfo};
use super::{Dawg, DictError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("letters: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("line {line}: {source}")]
    Word { line: usize, source: AlphabetError },

    #[error("line {line}: '{word}' is out of alphabetical order")]
    Unsorted { line: usize, word: String },

    #[error("line {line}: duplicate word '{word}'")]
    Duplicate { line: usize, word: String },

    #[error("line {line}: word longer than {max} letters")]
    WordTooLong { line: usize, max: usize },

    #[error("node with {count} siblings exceeds the limit of {max}")]
    TooManySiblings { count: usize, max: usize },

    #[error("word graph exceeds {} edges", MAX_PTR)]
    TooManyEdges,

    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),
}

/// Summary of a `build_dictionary` run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub header: Header,
    pub file_size: usize,
    pub load_time: Duration,
    pub build_time: Duration,
    pub max_depth: usize,
}

/// Owns all mutable state of one compilation.
pub struct DawgBuilder {
    alphabet: Alphabet,
    max_siblings: usize,
    edges: Vec<Edge>,
    dedup: HashMap<Vec<Edge>, u32>,
    nodes_used: u32,
    nodes_saved: u32,
    edges_saved: u32,
    max_depth: usize,
}

impl DawgBuilder {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            max_siblings: settings().builder.max_siblings,
            edges: Vec::new(),
            dedup: HashMap::new(),
            nodes_used: 0,
            nodes_saved: 0,
            edges_saved: 0,
            max_depth: 0,
        }
    }

    pub fn with_max_siblings(mut self, max: usize) -> Self {
        self.max_siblings = max;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Deepest recursion reached by the last `compile` call.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compile words given in strict alphabetical order (by letter code).
    ///
    /// Empty entries are skipped. Line numbers in errors count every entry.
    pub fn compile<I, S>(&mut self, name: &str, words: I) -> Result<Dawg, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let encoded = self.encode_words(words)?;
        self.compile_encoded(name, &encoded)
    }

    /// Compile the content of a word list file: UTF-8, one word per line.
    pub fn compile_text(&mut self, name: &str, text: &str) -> Result<Dawg, BuildError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        self.compile(name, text.lines().map(str::trim))
    }

    fn encode_words<I, S>(&self, words: I) -> Result<Vec<Vec<Code>>, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut encoded: Vec<Vec<Code>> = Vec::new();
        for (idx, word) in words.into_iter().enumerate() {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            let line = idx + 1;
            let codes = self
                .alphabet
                .encode(word)
                .map_err(|source| BuildError::Word { line, source })?;
            if codes.len() > MAX_WORD_LENGTH_LIMIT {
                return Err(BuildError::WordTooLong {
                    line,
                    max: MAX_WORD_LENGTH_LIMIT,
                });
            }
            if let Some(prev) = encoded.last() {
                if codes == *prev {
                    return Err(BuildError::Duplicate {
                        line,
                        word: word.to_string(),
                    });
                }
                if codes < *prev {
                    return Err(BuildError::Unsorted {
                        line,
                        word: word.to_string(),
                    });
                }
            }
            encoded.push(codes);
        }
        Ok(encoded)
    }

    fn compile_encoded(&mut self, name: &str, words: &[Vec<Code>]) -> Result<Dawg, BuildError> {
        let _span = debug_span!("compile", words = words.len()).entered();

        self.edges.clear();
        self.dedup.clear();
        self.edges.push(Edge::SENTINEL);
        self.nodes_used = 1;
        self.nodes_saved = 0;
        self.edges_saved = 0;
        self.max_depth = 0;

        let root_node = self.make_node(words, 0)?;
        let edges_used = self.edges.len() as u32;
        self.edges.push(Edge::new(0, root_node, false, false));

        debug!(
            edges_used,
            nodes_used = self.nodes_used,
            edges_saved = self.edges_saved,
            nodes_saved = self.nodes_saved,
            max_depth = self.max_depth,
        );

        let header = Header::new(HeaderInfo {
            root: edges_used,
            nwords: words.len() as u32,
            edges_used,
            nodes_used: self.nodes_used,
            edges_saved: self.edges_saved,
            nodes_saved: self.nodes_saved,
            name: name.to_string(),
            alphabet: self.alphabet.clone(),
            dict_type: DictType::Dawg,
        });
        // Reject names and letter sets that do not fit the header up front.
        header.to_bytes()?;

        Ok(Dawg::from_parts(header, std::mem::take(&mut self.edges)))
    }

    /// Build the node reached after `depth` letters shared by all `words`,
    /// returning the index of its first edge (0 for a leaf).
    ///
    /// Every word in `words` is longer than `depth`.
    fn make_node(&mut self, words: &[Vec<Code>], depth: usize) -> Result<u32, BuildError> {
        if words.is_empty() {
            return Ok(0);
        }
        self.max_depth = self.max_depth.max(depth + 1);

        let mut run: Vec<Edge> = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let code = words[i][depth];
            let start = i;
            while i < words.len() && words[i][depth] == code {
                i += 1;
            }
            let group = &words[start..i];
            // Sorted input puts the word ending here first in its group.
            let term = group[0].len() == depth + 1;
            let rest = if term { &group[1..] } else { group };
            let ptr = self.make_node(rest, depth + 1)?;
            run.push(Edge::new(code, ptr, term, false));
            if run.len() > self.max_siblings {
                return Err(BuildError::TooManySiblings {
                    count: run.len(),
                    max: self.max_siblings,
                });
            }
        }

        if let Some(last) = run.last_mut() {
            *last = last.with_last(true);
        }

        if let Some(&pos) = self.dedup.get(&run) {
            self.edges_saved += run.len() as u32;
            self.nodes_saved += 1;
            return Ok(pos);
        }

        let pos = self.edges.len();
        if pos + run.len() > MAX_PTR as usize {
            return Err(BuildError::TooManyEdges);
        }
        self.edges.extend_from_slice(&run);
        self.nodes_used += 1;
        self.dedup.insert(run, pos as u32);
        Ok(pos as u32)
    }
}

/// Full offline pipeline: letters file + word list file → DAWG file.
pub fn build_dictionary(
    letters: &Path,
    words: &Path,
    output: &Path,
    name: &str,
) -> Result<BuildReport, BuildError> {
    let _span = debug_span!("build_dictionary", name).entered();

    let alphabet = Alphabet::new(parse_letters(&fs::read_to_string(letters)?)?)?;

    let start = Instant::now();
    let text = fs::read_to_string(words)?;
    let load_time = start.elapsed();

    let start = Instant::now();
    let mut builder = DawgBuilder::new(alphabet);
    let dawg = builder.compile_text(name, &text)?;
    let bytes = dawg.to_bytes()?;
    fs::write(output, &bytes)?;
    let build_time = start.elapsed();

    debug!(file_size = bytes.len(), ?build_time);

    Ok(BuildReport {
        header: dawg.header().clone(),
        file_size: bytes.len(),
        load_time,
        build_time,
        max_depth: builder.max_depth(),
    })
}
