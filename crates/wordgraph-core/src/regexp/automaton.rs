//! Position automaton construction and subset determinization.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use super::tree::PosSet;
use super::{LetterLists, Symbol, EPSILON};

/// Table width: one column per possible letter code.
const COLUMNS: usize = 64;

/// Nondeterministic state: a set of positions.
#[derive(Debug)]
struct NfaState {
    accepting: bool,
    next: BTreeMap<Symbol, usize>,
}

#[derive(Debug)]
struct Nfa {
    states: Vec<NfaState>,
}

impl Nfa {
    /// One state per reachable position set, starting from `first`. The last
    /// position is the end marker; a state holding it accepts.
    fn from_positions(first: PosSet, symbols: &[Symbol], follow: &[PosSet]) -> Self {
        let final_pos = symbols.len() - 1;
        let alphabet: BTreeSet<Symbol> = symbols[1..final_pos].iter().copied().collect();

        let mut index: HashMap<PosSet, usize> = HashMap::new();
        let mut sets = vec![first];
        let mut states = Vec::new();
        index.insert(first, 0);

        let mut i = 0;
        while i < sets.len() {
            let current = sets[i];
            let mut next = BTreeMap::new();
            for &symbol in &alphabet {
                let target = current
                    .iter()
                    .filter(|&p| p < final_pos && symbols[p] == symbol)
                    .fold(PosSet::EMPTY, |acc, p| acc.union(follow[p]));
                if target.is_empty() {
                    continue;
                }
                let id = *index.entry(target).or_insert_with(|| {
                    sets.push(target);
                    sets.len() - 1
                });
                next.insert(symbol, id);
            }
            states.push(NfaState {
                accepting: current.contains(final_pos),
                next,
            });
            i += 1;
        }
        Self { states }
    }

    /// Add every state reachable through epsilon moves.
    fn close(&self, mut set: BTreeSet<usize>) -> BTreeSet<usize> {
        let mut pending: Vec<usize> = set.iter().copied().collect();
        while let Some(s) = pending.pop() {
            if let Some(&t) = self.states[s].next.get(&EPSILON) {
                if set.insert(t) {
                    pending.push(t);
                }
            }
        }
        set
    }

    fn step(&self, from: &BTreeSet<usize>, code: Symbol, lists: &LetterLists) -> BTreeSet<usize> {
        let mut to = BTreeSet::new();
        for &s in from {
            let next = &self.states[s].next;
            if let Some(&t) = next.get(&code) {
                to.insert(t);
            }
            for list in lists.symbols_for(code) {
                if let Some(&t) = next.get(&list) {
                    to.insert(t);
                }
            }
        }
        self.close(to)
    }
}

/// Deterministic automaton as a dense transition table.
///
/// States are numbered from 1; 0 is the dead state.
#[derive(Debug, Clone)]
pub struct Automaton {
    init: u32,
    table: Vec<[u32; COLUMNS]>,
    accepting: Vec<bool>,
}

impl Automaton {
    pub(crate) fn build(
        first: PosSet,
        symbols: &[Symbol],
        follow: &[PosSet],
        lists: &LetterLists,
        letter_count: usize,
    ) -> Self {
        let nfa = Nfa::from_positions(first, symbols, follow);

        let mut index: HashMap<BTreeSet<usize>, u32> = HashMap::new();
        let mut queue = VecDeque::new();
        let mut table = vec![[0u32; COLUMNS]];
        let mut accepting = vec![false];

        let start = nfa.close(BTreeSet::from([0]));
        let mut add = |set: BTreeSet<usize>,
                       table: &mut Vec<[u32; COLUMNS]>,
                       accepting: &mut Vec<bool>,
                       queue: &mut VecDeque<(u32, BTreeSet<usize>)>|
         -> u32 {
            if let Some(&id) = index.get(&set) {
                return id;
            }
            let id = table.len() as u32;
            table.push([0; COLUMNS]);
            accepting.push(set.iter().any(|&s| nfa.states[s].accepting));
            index.insert(set.clone(), id);
            queue.push_back((id, set));
            id
        };
        let init = add(start, &mut table, &mut accepting, &mut queue);

        while let Some((row, set)) = queue.pop_front() {
            for code in 1..=letter_count.min(COLUMNS - 1) {
                let target = nfa.step(&set, code as Symbol, lists);
                if target.is_empty() {
                    continue;
                }
                let id = add(target, &mut table, &mut accepting, &mut queue);
                table[row as usize][code] = id;
            }
        }

        Self {
            init,
            table,
            accepting,
        }
    }

    pub fn init(&self) -> u32 {
        self.init
    }

    /// Number of live states.
    pub fn state_count(&self) -> usize {
        self.table.len() - 1
    }

    /// Successor of `state` on letter `code`, `0` when dead.
    pub fn next_state(&self, state: u32, code: u8) -> u32 {
        self.table
            .get(state as usize)
            .and_then(|row| row.get(code as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_accepting(&self, state: u32) -> bool {
        self.accepting.get(state as usize).copied().unwrap_or(false)
    }

    /// Run the automaton over a word of letter codes.
    pub fn matches(&self, codes: &[u8]) -> bool {
        let mut state = self.init;
        for &code in codes {
            state = self.next_state(state, code);
            if state == 0 {
                return false;
            }
        }
        self.is_accepting(state)
    }
}
