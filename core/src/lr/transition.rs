use crate::{ItemSet, Symbol};

use super::graph::Graph;

/// A state together with the states its symbols lead to.
pub struct Transition<'set> {
    pub(super) from: &'set ItemSet,
    pub(super) edges: Vec<(&'set Symbol, &'set ItemSet)>,
}

impl Transition<'_> {
    /// The state reached by reading the symbol.
    pub fn target(&self, symbol: &Symbol) -> Option<&ItemSet> {
        self.edges
            .iter()
            .find(|(sym, _)| *sym == symbol)
            .map(|(_, set)| *set)
    }
}

impl Graph<'_, '_> {
    pub fn iter_transitions(&self) -> impl Iterator<Item = Transition<'_>> {
        self.sets.iter().zip(self.edges.iter()).map(|(set, edges)| Transition {
            from: set,
            edges: edges
                .iter()
                .filter_map(|(sym, to)| self.get(*to).map(|to| (sym, to)))
                .collect(),
        })
    }
}
