//! Syntax tree annotated with position sets.
//!
//! Each `Var` leaf owns one position. `traverse` numbers the leaves and
//! computes `nullable`, the first-position set and the last-position set of
//! every node; `next_positions` then fills the follow table.

use std::fmt;

use super::{RegexpError, Symbol, MAX_POSITIONS};

/// Set of positions `1..=64`, position `p` stored in bit `p - 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PosSet(u64);

impl PosSet {
    pub const EMPTY: PosSet = PosSet(0);

    pub fn single(position: usize) -> Self {
        debug_assert!((1..=MAX_POSITIONS).contains(&position));
        Self(1u64 << (position - 1))
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, position: usize) -> bool {
        (1..=MAX_POSITIONS).contains(&position) && self.0 & (1u64 << (position - 1)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        (1..=MAX_POSITIONS).filter(move |&p| self.contains(p))
    }
}

impl fmt::Debug for PosSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[derive(Debug)]
pub(crate) enum NodeKind {
    Var { symbol: Symbol, position: usize },
    Or(Box<Node>, Box<Node>),
    And(Box<Node>, Box<Node>),
    Star(Box<Node>),
    Plus(Box<Node>),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub nullable: bool,
    pub first: PosSet,
    pub last: PosSet,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            nullable: false,
            first: PosSet::EMPTY,
            last: PosSet::EMPTY,
        }
    }

    pub fn var(symbol: Symbol) -> Self {
        Self::new(NodeKind::Var {
            symbol,
            position: 0,
        })
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::new(NodeKind::Or(Box::new(left), Box::new(right)))
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::new(NodeKind::And(Box::new(left), Box::new(right)))
    }

    pub fn star(child: Node) -> Self {
        Self::new(NodeKind::Star(Box::new(child)))
    }

    pub fn plus(child: Node) -> Self {
        Self::new(NodeKind::Plus(Box::new(child)))
    }

    /// Post-order walk assigning positions; `symbols[p]` receives the symbol
    /// at position `p` (index 0 is unused).
    pub fn traverse(&mut self, symbols: &mut Vec<Symbol>) -> Result<(), RegexpError> {
        match &mut self.kind {
            NodeKind::Var { symbol, position } => {
                if symbols.is_empty() {
                    symbols.push(0);
                }
                if symbols.len() > MAX_POSITIONS {
                    return Err(RegexpError::TooManyPositions { max: MAX_POSITIONS });
                }
                *position = symbols.len();
                symbols.push(*symbol);
                self.nullable = false;
                self.first = PosSet::single(*position);
                self.last = self.first;
            }
            NodeKind::Or(left, right) => {
                left.traverse(symbols)?;
                right.traverse(symbols)?;
                self.nullable = left.nullable || right.nullable;
                self.first = left.first.union(right.first);
                self.last = left.last.union(right.last);
            }
            NodeKind::And(left, right) => {
                left.traverse(symbols)?;
                right.traverse(symbols)?;
                self.nullable = left.nullable && right.nullable;
                self.first = if left.nullable {
                    left.first.union(right.first)
                } else {
                    left.first
                };
                self.last = if right.nullable {
                    left.last.union(right.last)
                } else {
                    right.last
                };
            }
            NodeKind::Star(child) => {
                child.traverse(symbols)?;
                self.nullable = true;
                self.first = child.first;
                self.last = child.last;
            }
            NodeKind::Plus(child) => {
                child.traverse(symbols)?;
                self.nullable = false;
                self.first = child.first;
                self.last = child.last;
            }
        }
        Ok(())
    }

    /// Fill `follow[p]` with the positions that may come right after `p`.
    pub fn next_positions(&self, follow: &mut [PosSet]) {
        match &self.kind {
            NodeKind::Var { .. } => {}
            NodeKind::Or(left, right) => {
                left.next_positions(follow);
                right.next_positions(follow);
            }
            NodeKind::And(left, right) => {
                left.next_positions(follow);
                right.next_positions(follow);
                for p in left.last.iter() {
                    follow[p] = follow[p].union(right.first);
                }
            }
            NodeKind::Star(child) | NodeKind::Plus(child) => {
                child.next_positions(follow);
                for p in self.last.iter() {
                    follow[p] = follow[p].union(self.first);
                }
            }
        }
    }
}
