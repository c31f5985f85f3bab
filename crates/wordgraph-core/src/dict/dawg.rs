use std::io::{self, Write};

use crate::alphabet::{Alphabet, AlphabetError, Code};
use crate::settings::MAX_WORD_LENGTH_LIMIT;

use super::edge::Edge;
use super::header::Header;

/// A compiled dictionary: the header plus the flat edge array.
///
/// Nodes are indices into the edge array: a node is the run of sibling
/// edges starting at that index. Index 0 is the empty sentinel node.
/// Indices passed to the traversal methods must come from this dictionary.
#[derive(Debug, Clone)]
pub struct Dawg {
    pub(super) header: Header,
    pub(super) edges: Vec<Edge>,
}

impl Dawg {
    pub(crate) fn from_parts(header: Header, edges: Vec<Edge>) -> Self {
        Self { header, edges }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.header.alphabet
    }

    /// Number of edge records, root edge included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, index: u32) -> Edge {
        self.edges[index as usize]
    }

    /// Edge whose successor holds the first letters of every word.
    pub fn root(&self) -> u32 {
        self.header.root
    }

    pub fn successor(&self, index: u32) -> u32 {
        self.edge(index).ptr()
    }

    /// Next edge of the same node, 0 after the last one.
    pub fn next_sibling(&self, index: u32) -> u32 {
        let next = index as usize + 1;
        if self.edge(index).is_last() || next >= self.edges.len() {
            0
        } else {
            next as u32
        }
    }

    pub fn is_last(&self, index: u32) -> bool {
        self.edge(index).is_last()
    }

    pub fn is_word(&self, index: u32) -> bool {
        self.edge(index).is_term()
    }

    pub fn code(&self, index: u32) -> Code {
        self.edge(index).code()
    }

    pub fn char_at(&self, index: u32) -> Result<char, AlphabetError> {
        self.alphabet().char_of(self.code(index))
    }

    /// Sibling run starting at `index` (empty for index 0).
    pub fn siblings(&self, index: u32) -> Siblings<'_> {
        Siblings {
            dawg: self,
            next: index,
        }
    }

    /// Edges leaving the node reached through `index`.
    pub fn children(&self, index: u32) -> Siblings<'_> {
        self.siblings(self.successor(index))
    }

    /// Follow `codes` from `root`, returning the edge of the last letter.
    ///
    /// Returns `root` for an empty pattern and 0 when a letter is missing.
    pub fn lookup(&self, root: u32, codes: &[Code]) -> u32 {
        let mut current = root;
        for &code in codes {
            match self.children(current).find(|&i| self.code(i) == code) {
                Some(i) => current = i,
                None => return 0,
            }
        }
        current
    }

    /// Like `lookup`, with characters coded on the fly. Characters outside
    /// the alphabet are never found.
    pub fn char_lookup(&self, root: u32, word: &str) -> u32 {
        let mut current = root;
        for ch in word.chars() {
            let Ok(code) = self.alphabet().code(ch) else {
                return 0;
            };
            match self.children(current).find(|&i| self.code(i) == code) {
                Some(i) => current = i,
                None => return 0,
            }
        }
        current
    }

    /// Every word of the dictionary, in alphabetical order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::with_capacity((self.header.nwords as usize).min(self.edges.len()));
        let mut buf = String::new();
        self.collect_words(self.root(), 0, &mut buf, &mut out);
        out
    }

    fn collect_words(&self, index: u32, depth: usize, buf: &mut String, out: &mut Vec<String>) {
        if depth >= MAX_WORD_LENGTH_LIMIT {
            return;
        }
        for child in self.children(index) {
            let Ok(ch) = self.char_at(child) else {
                continue;
            };
            buf.push(ch);
            if self.is_word(child) {
                out.push(buf.clone());
            }
            self.collect_words(child, depth + 1, buf, out);
            buf.pop();
        }
    }

    /// Dump the edge table, one record per line.
    pub fn hex_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "offset binary   |       ptr |t|l|chr")?;
        for (i, edge) in self.edges.iter().enumerate() {
            let letter = match edge.code() {
                0 => ' ',
                code => self.alphabet().char_of(code).unwrap_or('!'),
            };
            writeln!(
                out,
                "{:06x} {:08x} | {:9} |{}|{}| {:2} {}",
                i * 4,
                edge.raw(),
                edge.ptr(),
                u8::from(edge.is_term()),
                u8::from(edge.is_last()),
                edge.code(),
                letter,
            )?;
        }
        Ok(())
    }
}

/// Iterator over one sibling run; stops after the edge flagged last.
pub struct Siblings<'a> {
    dawg: &'a Dawg,
    next: u32,
}

impl Iterator for Siblings<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next == 0 {
            return None;
        }
        let current = self.next;
        self.next = self.dawg.next_sibling(current);
        Some(current)
    }
}
