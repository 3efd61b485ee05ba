use std::collections::{BTreeSet, HashMap, HashSet};

use itertools::Itertools as _;
use log::warn;

use crate::{Grammar, Symbol};

/// FIRST sets of a grammar.
///
/// The sets of the non-terminals are computed once, as a fixpoint over
/// the rules' leading symbols. A rule beginning with its own left side
/// (A -> A w) never contributes to A.
#[derive(Debug)]
pub struct FirstSets<'g> {
    grammar: &'g Grammar,
    sets: HashMap<Symbol, BTreeSet<Symbol>>,
    left_recursion: Vec<Symbol>,
}

impl<'g> FirstSets<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let mut sets = grammar
            .iter_non_terminals()
            .map(|sym| (sym.clone(), BTreeSet::new()))
            .collect::<HashMap<_, _>>();

        let mut changed = true;
        while changed {
            changed = false;

            for rule in grammar.rules().iter().filter(|rule| !rule.is_left_recursive()) {
                let Some(lead) = rule.rhs.first() else {
                    continue;
                };

                let incoming = if lead == grammar.end_marker() || grammar.is_terminal(lead) {
                    vec![lead.clone()]
                } else {
                    sets.get(lead)
                        .map(|set| set.iter().cloned().collect())
                        .unwrap_or_default()
                };

                let set = sets.entry(rule.lhs.clone()).or_default();
                for sym in incoming {
                    changed |= set.insert(sym);
                }
            }
        }

        let left_recursion = leading_cycles(grammar);
        if !left_recursion.is_empty() {
            warn!(
                "indirect left recursion through {}: the backtracking parser will not terminate on this grammar",
                left_recursion.iter().join(", ")
            );
        }

        Self {
            grammar,
            sets,
            left_recursion,
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// FIRST of a single symbol.
    pub fn first1(&self, symbol: &Symbol) -> BTreeSet<Symbol> {
        if symbol == self.grammar.end_marker() || self.grammar.is_terminal(symbol) {
            return BTreeSet::from_iter([symbol.clone()]);
        }

        self.sets.get(symbol).cloned().unwrap_or_default()
    }

    /// FIRST of a sequence of symbols.
    ///
    /// A trailing end marker is ignored unless nothing else remains.
    /// Right-hand sides are never empty, so only the leading symbol
    /// contributes.
    pub fn first(&self, sequence: &[Symbol]) -> BTreeSet<Symbol> {
        let end = self.grammar.end_marker();

        let sequence = match sequence {
            [rest @ .., last] if last == end => rest,
            _ => sequence,
        };

        match sequence.first() {
            Some(lead) => self.first1(lead),
            None => BTreeSet::from_iter([end.clone()]),
        }
    }

    /// Non-terminals reaching themselves through the leading symbols of
    /// other non-terminals (A -> B w, B -> A v).
    pub fn left_recursion(&self) -> &[Symbol] {
        &self.left_recursion
    }
}

/// Leading non-terminals of the symbol's rules, itself excluded.
fn leads<'g>(grammar: &'g Grammar, symbol: &Symbol) -> impl Iterator<Item = &'g Symbol> + 'g {
    let symbol = symbol.clone();
    grammar
        .iter_rules_by_symbol(&symbol)
        .filter_map(|rule| rule.rhs.first())
        .filter(move |lead| **lead != symbol && !grammar.is_terminal(lead))
}

fn leading_cycles(grammar: &Grammar) -> Vec<Symbol> {
    grammar
        .iter_non_terminals()
        .filter(|&start| {
            let mut visited = HashSet::<&Symbol>::default();
            let mut stack = leads(grammar, start).collect::<Vec<_>>();

            while let Some(symbol) = stack.pop() {
                if symbol == start {
                    return true;
                }

                if visited.insert(symbol) {
                    stack.extend(leads(grammar, symbol));
                }
            }

            false
        })
        .cloned()
        .collect()
}
