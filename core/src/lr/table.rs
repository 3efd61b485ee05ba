use prettytable::Table as PtTable;
use std::collections::HashMap;

use log::{debug, warn};

use crate::{
    error::{TableError, TableResult},
    item::{AugmentedGrammar, ItemRule},
    Grammar, StateId, Symbol,
};

use super::{Action, Graph, Transition};

pub mod traits {
    use crate::{lr::Action, Grammar, StateId, Symbol};

    pub trait LrTable {
        /// The grammar the table was built from.
        fn grammar(&self) -> &Grammar;

        /// Terminals having an action in the state.
        fn iter_terminals<'a>(&'a self, state: StateId) -> impl Iterator<Item = &'a Symbol> + 'a;

        /// Non-terminals having a goto in the state.
        fn iter_non_terminals<'a>(
            &'a self,
            state: StateId,
        ) -> impl Iterator<Item = &'a Symbol> + 'a;

        fn action(&self, state: StateId, symbol: &Symbol) -> Option<&Action>;
        fn goto(&self, state: StateId, symbol: &Symbol) -> Option<StateId>;

        /// The number of rows in the table.
        fn len(&self) -> usize;

        fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }
}

/// What to do when two actions compete for the same cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Fail the build with the conflicting pair.
    #[default]
    Reject,
    /// Keep the last action written, and log a warning.
    LastWriteWins,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub conflicts: ConflictPolicy,
}

impl TableOptions {
    pub fn with_conflicts(mut self, conflicts: ConflictPolicy) -> Self {
        self.conflicts = conflicts;
        self
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Row {
    actions: HashMap<Symbol, Action>,
    goto: HashMap<Symbol, StateId>,
}

impl Row {
    pub fn action(&self, symbol: &Symbol) -> Option<&Action> {
        self.actions.get(symbol)
    }

    pub fn goto(&self, symbol: &Symbol) -> Option<StateId> {
        self.goto.get(symbol).copied()
    }

    fn set_action(
        &mut self,
        state: StateId,
        symbol: &Symbol,
        action: Action,
        options: &TableOptions,
    ) -> TableResult<()> {
        match self.actions.get(symbol) {
            None => {
                self.actions.insert(symbol.clone(), action);
                Ok(())
            }
            Some(existing) if *existing == action => Ok(()),
            Some(existing) => {
                let conflict = [*existing, action];

                match options.conflicts {
                    ConflictPolicy::Reject => Err(conflict_error(state, symbol, conflict)),
                    ConflictPolicy::LastWriteWins => {
                        warn!(
                            "{}, keeping {}",
                            conflict_error(state, symbol, conflict),
                            action
                        );
                        self.actions.insert(symbol.clone(), action);
                        Ok(())
                    }
                }
            }
        }
    }

    fn from_transition(
        transition: Transition<'_>,
        rules: &AugmentedGrammar<'_>,
        options: &TableOptions,
    ) -> TableResult<Self> {
        let grammar = rules.grammar();
        let state = transition.from.id;
        let mut row = Self::default();

        for item in transition.from.iter() {
            match item.symbol(rules) {
                None => {
                    let action = match item.rule {
                        ItemRule::Start => Action::Accept,
                        ItemRule::Rule(id) => Action::Reduce(id),
                    };
                    row.set_action(state, &item.lookahead, action, options)?;
                }
                Some(symbol) if grammar.is_terminal(symbol) => {
                    if let Some(to) = transition.target(symbol) {
                        row.set_action(state, symbol, Action::Shift(to.id), options)?;
                    }
                }
                Some(_) => {}
            }
        }

        row.goto.extend(
            transition
                .edges
                .iter()
                .filter(|(sym, _)| !grammar.is_terminal(sym))
                .map(|(sym, to)| ((*sym).clone(), to.id)),
        );

        Ok(row)
    }
}

fn conflict_error(state: StateId, symbol: &Symbol, conflict: [Action; 2]) -> TableError {
    let symbol = symbol.clone();

    if conflict.iter().any(Action::is_shift) {
        TableError::ShiftReduceConflict {
            state,
            symbol,
            conflict,
        }
    } else {
        TableError::ReduceReduceConflict {
            state,
            symbol,
            conflict,
        }
    }
}

/// One rendered row of the table: a cell per terminal, then a cell per
/// non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub state: StateId,
    pub actions: Vec<(Symbol, Option<Action>)>,
    pub gotos: Vec<(Symbol, Option<StateId>)>,
}

/// The ACTION and GOTO tables of a canonical LR(1) automaton.
#[derive(PartialEq)]
pub struct LrTable<'g> {
    grammar: &'g Grammar,
    rows: Vec<Row>,
}

impl std::fmt::Debug for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::fmt::Display for LrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        table.add_row(
            ["#".to_string()]
                .into_iter()
                .chain(
                    self.terminal_columns()
                        .chain(self.grammar.iter_non_terminals())
                        .map(ToString::to_string),
                )
                .collect(),
        );

        for row in self.rows() {
            table.add_row(
                [row.state.to_string()]
                    .into_iter()
                    .chain(row.actions.iter().map(|(_, action)| {
                        action.as_ref().map(ToString::to_string).unwrap_or_default()
                    }))
                    .chain(row.gotos.iter().map(|(_, to)| {
                        to.as_ref().map(ToString::to_string).unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}

impl traits::LrTable for LrTable<'_> {
    fn grammar(&self) -> &Grammar {
        self.grammar
    }

    fn action(&self, state: StateId, symbol: &Symbol) -> Option<&Action> {
        self.rows.get(state).and_then(|row| row.action(symbol))
    }

    fn goto(&self, state: StateId, symbol: &Symbol) -> Option<StateId> {
        self.rows.get(state).and_then(|row| row.goto(symbol))
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn iter_terminals<'a>(&'a self, state: StateId) -> impl Iterator<Item = &'a Symbol> + 'a {
        let row = self.rows.get(state);
        self.terminal_columns()
            .filter(move |sym| row.is_some_and(|row| row.actions.contains_key(*sym)))
    }

    fn iter_non_terminals<'a>(
        &'a self,
        state: StateId,
    ) -> impl Iterator<Item = &'a Symbol> + 'a {
        let row = self.rows.get(state);
        self.grammar
            .iter_non_terminals()
            .filter(move |sym| row.is_some_and(|row| row.goto.contains_key(*sym)))
    }
}

impl<'g> LrTable<'g> {
    /// Build the LR(1) table of a grammar, rejecting conflicts.
    pub fn build(grammar: &'g Grammar) -> TableResult<Self> {
        Self::build_with(grammar, TableOptions::default())
    }

    pub fn build_with(grammar: &'g Grammar, options: TableOptions) -> TableResult<Self> {
        let rules = AugmentedGrammar::new(grammar);

        let mut graph = Graph::new(&rules);
        graph.build();

        Self::from_graph(&graph, &rules, &options)
    }

    fn from_graph(
        graph: &Graph<'_, 'g>,
        rules: &AugmentedGrammar<'g>,
        options: &TableOptions,
    ) -> TableResult<Self> {
        let rows = graph
            .iter_transitions()
            .map(|t| Row::from_transition(t, rules, options))
            .collect::<TableResult<Vec<_>>>()?;

        debug!("LR(1) table: {} states", rows.len());

        Ok(Self {
            grammar: rules.grammar(),
            rows,
        })
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Terminal columns, the end marker included.
    pub fn terminal_columns(&self) -> impl Iterator<Item = &Symbol> + '_ {
        let grammar: &Grammar = self.grammar;
        let end = grammar.end_marker();
        let declared = grammar.iter_terminals().any(|sym| sym == end);

        grammar
            .iter_terminals()
            .chain(std::iter::once(end).filter(move |_| !declared))
    }

    /// Rows in state order, with a cell per terminal and non-terminal.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        self.rows.iter().enumerate().map(|(state, row)| TableRow {
            state,
            actions: self
                .terminal_columns()
                .map(|sym| (sym.clone(), row.action(sym).copied()))
                .collect(),
            gotos: self
                .grammar
                .iter_non_terminals()
                .map(|sym| (sym.clone(), row.goto(sym)))
                .collect(),
        })
    }
}
