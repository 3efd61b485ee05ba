use std::collections::{BTreeSet, HashMap, VecDeque};

use log::{debug, trace};

use crate::{
    item::{AugmentedGrammar, Item},
    ItemSet, StateId, Symbol,
};

/// The canonical collection of LR(1) item sets.
///
/// States are numbered in discovery order, the start set is #0.
pub struct Graph<'r, 'g> {
    rules: &'r AugmentedGrammar<'g>,
    pub(super) sets: Vec<ItemSet>,
    /// Outgoing edges of each state, in symbol order.
    pub(super) edges: Vec<Vec<(Symbol, StateId)>>,
    index: HashMap<BTreeSet<Item>, StateId>,
}

impl<'r, 'g> Graph<'r, 'g> {
    pub fn new(rules: &'r AugmentedGrammar<'g>) -> Self {
        let start = rules.start_item_set();

        Self {
            rules,
            index: HashMap::from_iter([(start.kernel().clone(), 0)]),
            sets: vec![start],
            edges: vec![vec![]],
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, id: StateId) -> Option<&ItemSet> {
        self.sets.get(id)
    }

    /// Push a new set in the graph, if it does not yet exist.
    ///
    /// Returns the id of the set, and whether it was added.
    fn push(&mut self, mut set: ItemSet) -> (StateId, bool) {
        if let Some(id) = self.index.get(set.kernel()) {
            return (*id, false);
        }

        let id = self.sets.len();
        set.id = id;
        self.index.insert(set.kernel().clone(), id);
        self.sets.push(set);
        self.edges.push(vec![]);
        (id, true)
    }

    pub fn build(&mut self) {
        let mut queue = VecDeque::from_iter([0]);
        let rules = self.rules;
        let grammar = rules.grammar();

        let symbols = grammar
            .iter_terminals()
            .chain(grammar.iter_non_terminals())
            .cloned()
            .collect::<Vec<_>>();

        while let Some(set_id) = queue.pop_front() {
            for symbol in symbols.iter() {
                let target = rules.goto(&self.sets[set_id], symbol);

                if target.is_empty() {
                    continue;
                }

                let (to_id, added) = self.push(target);
                if added {
                    trace!("{}", self.sets[to_id].render(rules));
                    queue.push_back(to_id);
                }

                trace!("#{} --{}--> #{}", set_id, symbol, to_id);
                self.edges[set_id].push((symbol.clone(), to_id));
            }
        }

        debug!(
            "canonical collection: {} states, {} edges",
            self.len(),
            self.edges.iter().map(Vec::len).sum::<usize>()
        );
    }
}
