use std::collections::{HashMap, HashSet};

use super::outcome::{Failure, Outcome};

/// A memoized rule result, along with the furthest failure of any terminal
/// tried while producing it
#[derive(Clone, Debug)]
pub struct Entry {
    pub outcome: Outcome,
    pub furthest: Option<Failure>,
}

/// Per-parse packrat cache, keyed by input position and rule number.
///
/// Failures are cached as well as successes. `in_progress` holds the rules
/// currently being evaluated at a position; finding a key there again means
/// the rule is left recursive.
#[derive(Default)]
pub struct Memo {
    rule_memo: HashMap<(usize, usize), Entry>,
    in_progress: HashSet<(usize, usize)>,
}

impl Memo {
    pub fn get(&self, pos: usize, rule_no: usize) -> Option<&Entry> {
        self.rule_memo.get(&(pos, rule_no))
    }

    pub fn insert(&mut self, pos: usize, rule_no: usize, entry: Entry) {
        self.rule_memo.insert((pos, rule_no), entry);
    }

    /// Mark the rule as being evaluated at `pos`. Returns false if it
    /// already was.
    pub fn enter(&mut self, pos: usize, rule_no: usize) -> bool {
        self.in_progress.insert((pos, rule_no))
    }

    pub fn leave(&mut self, pos: usize, rule_no: usize) {
        self.in_progress.remove(&(pos, rule_no));
    }

    pub fn len(&self) -> usize {
        self.rule_memo.len()
    }

    pub fn clear(&mut self) {
        self.rule_memo.clear();
        self.in_progress.clear();
    }
}
