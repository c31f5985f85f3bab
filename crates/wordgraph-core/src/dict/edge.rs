use std::fmt;

use crate::alphabet::Code;

const PTR_MASK: u32 = 0x00FF_FFFF;
const TERM_BIT: u32 = 1 << 24;
const LAST_BIT: u32 = 1 << 25;
const CODE_SHIFT: u32 = 26;

/// Largest index an edge can point to (24 bits).
pub const MAX_PTR: u32 = PTR_MASK;

/// Size of one edge record on disk.
pub const EDGE_SIZE: usize = 4;

/// One arc of the word graph, packed into 32 bits.
///
/// Layout, least significant bit first: 24-bit pointer to the first edge
/// of the next node, terminal flag, last-sibling flag, 6-bit letter code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Edge(u32);

impl Edge {
    /// The zero-arc node stored at index 0.
    pub const SENTINEL: Edge = Edge(LAST_BIT);

    pub fn new(code: Code, ptr: u32, term: bool, last: bool) -> Self {
        debug_assert!(code < 64);
        debug_assert!(ptr <= MAX_PTR);
        let mut raw = (ptr & PTR_MASK) | ((code as u32 & 0x3F) << CODE_SHIFT);
        if term {
            raw |= TERM_BIT;
        }
        if last {
            raw |= LAST_BIT;
        }
        Self(raw)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn ptr(self) -> u32 {
        self.0 & PTR_MASK
    }

    pub fn is_term(self) -> bool {
        self.0 & TERM_BIT != 0
    }

    pub fn is_last(self) -> bool {
        self.0 & LAST_BIT != 0
    }

    pub fn code(self) -> Code {
        (self.0 >> CODE_SHIFT) as Code
    }

    pub fn with_last(self, last: bool) -> Self {
        if last {
            Self(self.0 | LAST_BIT)
        } else {
            Self(self.0 & !LAST_BIT)
        }
    }

    pub fn to_be_bytes(self) -> [u8; EDGE_SIZE] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; EDGE_SIZE]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("code", &self.code())
            .field("ptr", &self.ptr())
            .field("term", &self.is_term())
            .field("last", &self.is_last())
            .finish()
    }
}
