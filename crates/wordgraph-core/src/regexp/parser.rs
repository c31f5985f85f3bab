//! Recursive-descent parser producing the unannotated syntax tree.
//!
//! ```text
//! pattern := repeat+                      (followed by the end marker)
//! repeat  := group ( '?' | '*' | '+' )?
//! group   := var | '[' '^'? letter+ ']' | '(' repeat+ ')'
//! var     := letter | '.' | ':v:' | ':c:' | ':1:' | ':2:'
//! ```

use crate::alphabet::{to_upper, Alphabet, JOKER};

use super::tree::Node;
use super::{
    LetterLists, RegexpError, Symbol, ALL, CONSONANT, EPSILON, FINAL, MAX_POSITIONS, USER_LIST_1,
    USER_LIST_2, VOWEL,
};

/// Nesting limit for parentheses.
const MAX_DEPTH: usize = 32;

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    /// Leaves created so far; each one becomes a position.
    leaves: usize,
    alphabet: &'a Alphabet,
    lists: &'a mut LetterLists,
}

/// Parse `pattern` and append the end marker: the result is
/// `AND(pattern, FINAL)`.
pub(super) fn parse(
    pattern: &str,
    alphabet: &Alphabet,
    lists: &mut LetterLists,
) -> Result<Node, RegexpError> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
        depth: 0,
        leaves: 0,
        alphabet,
        lists,
    };
    let expr = parser.sequence()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected '{c}'")));
    }
    let end = parser.leaf(FINAL)?;
    Ok(Node::and(expr, end))
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> RegexpError {
        RegexpError::Syntax {
            pos: self.pos,
            reason: reason.into(),
        }
    }

    /// New leaf, failing as soon as the pattern needs too many positions.
    fn leaf(&mut self, symbol: Symbol) -> Result<Node, RegexpError> {
        self.leaves += 1;
        if self.leaves > MAX_POSITIONS {
            return Err(RegexpError::TooManyPositions { max: MAX_POSITIONS });
        }
        Ok(Node::var(symbol))
    }

    fn starts_group(c: char) -> bool {
        !matches!(c, ')' | ']' | '?' | '*' | '+' | '^')
    }

    /// `repeat+`, concatenated right to left.
    fn sequence(&mut self) -> Result<Node, RegexpError> {
        let mut items = Vec::new();
        while self.peek().is_some_and(Self::starts_group) {
            items.push(self.repeat()?);
        }
        let Some(mut node) = items.pop() else {
            return Err(match self.peek() {
                Some(c) => self.error(format!("unexpected '{c}'")),
                None => self.error("empty expression"),
            });
        };
        while let Some(prev) = items.pop() {
            node = Node::and(prev, node);
        }
        Ok(node)
    }

    fn repeat(&mut self) -> Result<Node, RegexpError> {
        let group = self.group()?;
        let node = match self.peek() {
            Some('?') => Node::or(group, self.leaf(EPSILON)?),
            Some('*') => Node::star(group),
            Some('+') => Node::plus(group),
            _ => return Ok(group),
        };
        self.pos += 1;
        Ok(node)
    }

    fn group(&mut self) -> Result<Node, RegexpError> {
        match self.peek() {
            Some('(') => {
                if self.depth == MAX_DEPTH {
                    return Err(self.error("parentheses nested too deeply"));
                }
                self.pos += 1;
                self.depth += 1;
                let inner = self.sequence()?;
                self.depth -= 1;
                self.expect(')')?;
                Ok(inner)
            }
            Some('[') => {
                self.pos += 1;
                let negate = self.peek() == Some('^');
                if negate {
                    self.pos += 1;
                }
                let set = self.choice()?;
                self.expect(']')?;
                let set = if negate { !set & self.lists.all() } else { set };
                let symbol = self.lists.push(set);
                self.leaf(symbol)
            }
            _ => {
                let symbol = self.var()?;
                self.leaf(symbol)
            }
        }
    }

    /// Letters of a bracket list, as a code bitmask.
    fn choice(&mut self) -> Result<u64, RegexpError> {
        let mut set = 0u64;
        let mut count = 0;
        while let Some(c) = self.peek() {
            if c == ']' {
                break;
            }
            let code = self.letter(c)?;
            set |= 1u64 << (code - 1);
            count += 1;
            self.pos += 1;
        }
        if count == 0 {
            return Err(self.error("empty letter list"));
        }
        Ok(set)
    }

    fn var(&mut self) -> Result<Symbol, RegexpError> {
        let Some(c) = self.peek() else {
            return Err(self.error("unexpected end of pattern"));
        };
        match c {
            '.' => {
                self.pos += 1;
                Ok(ALL)
            }
            ':' => {
                let symbol = match self.chars.get(self.pos + 1..self.pos + 3) {
                    Some(['v', ':']) => VOWEL,
                    Some(['c', ':']) => CONSONANT,
                    Some(['1', ':']) => USER_LIST_1,
                    Some(['2', ':']) => USER_LIST_2,
                    _ => return Err(self.error("expected :v:, :c:, :1: or :2:")),
                };
                self.pos += 3;
                Ok(symbol)
            }
            _ => {
                let code = self.letter(c)?;
                self.pos += 1;
                Ok(code as Symbol)
            }
        }
    }

    fn letter(&self, c: char) -> Result<u8, RegexpError> {
        if c != JOKER && c.is_alphabetic() {
            if let Ok(code) = self.alphabet.code(to_upper(c)) {
                return Ok(code);
            }
            return Err(RegexpError::UnknownLetter { pos: self.pos, ch: c });
        }
        Err(self.error(format!("unexpected '{c}'")))
    }

    fn expect(&mut self, wanted: char) -> Result<(), RegexpError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{wanted}', found '{c}'"))),
            None => Err(self.error(format!("expected '{wanted}'"))),
        }
    }
}
