use log::{debug, trace};

use crate::{
    error::{ParseError, ParseResult, TableResult},
    Grammar, RuleId, Symbol,
};

mod action;
mod graph;
mod table;
mod transition;

pub use action::*;
use graph::*;
pub use table::*;
use transition::*;

pub use crate::item::StateId;

/// Table-driven LR parser.
///
/// The parser holds no state between calls, one table may serve any
/// number of parses.
pub struct LrParser<'table, Table>
where
    Table: traits::LrTable,
{
    table: &'table Table,
}

impl<'table, Table> LrParser<'table, Table>
where
    Table: traits::LrTable,
{
    pub fn new(table: &'table Table) -> Self {
        Self { table }
    }

    /// Parse a sequence of terminals ended by the end marker.
    ///
    /// Returns the rules reduced, in order: the reverse of a rightmost
    /// derivation.
    pub fn parse(&self, input: &[Symbol]) -> ParseResult<Vec<RuleId>> {
        let grammar = self.table.grammar();
        let end = grammar.end_marker();

        if input.last() != Some(end) {
            return Err(ParseError::UnterminatedInput(end.clone()));
        }

        let mut states: Vec<StateId> = vec![0];
        let mut reductions = Vec::<RuleId>::default();
        let mut cursor = 0;

        loop {
            let state = states.last().copied().unwrap_or_default();

            let symbol = input
                .get(cursor)
                .ok_or_else(|| ParseError::UnterminatedInput(end.clone()))?;

            let action = self.table.action(state, symbol).ok_or_else(|| {
                ParseError::unexpected_symbol(
                    cursor,
                    state,
                    symbol,
                    self.table.iter_terminals(state).cloned(),
                )
            })?;

            trace!("#{} {} :: {}", state, symbol, action);

            match *action {
                Action::Shift(next) => {
                    states.push(next);
                    cursor += 1;
                }
                Action::Reduce(rule_id) => {
                    let rule = &grammar.rules()[rule_id];
                    states.truncate(states.len().saturating_sub(rule.len()));

                    let state = states.last().copied().unwrap_or_default();

                    let next = self.table.goto(state, &rule.lhs).ok_or_else(|| {
                        ParseError::unexpected_symbol(
                            cursor,
                            state,
                            &rule.lhs,
                            self.table.iter_non_terminals(state).cloned(),
                        )
                    })?;

                    states.push(next);
                    reductions.push(rule_id);
                }
                Action::Accept => {
                    if let Some(extra) = input.get(cursor + 1) {
                        return Err(ParseError::unexpected_symbol(
                            cursor + 1,
                            state,
                            extra,
                            std::iter::empty(),
                        ));
                    }

                    debug!("accepted {} symbols, {} reductions", cursor, reductions.len());
                    return Ok(reductions);
                }
            }
        }
    }
}

/// A canonical LR(1) parser owning its table.
pub struct Lr1Parser<'g> {
    table: LrTable<'g>,
}

impl<'g> Lr1Parser<'g> {
    /// Build the parser, failing if the grammar is not LR(1).
    pub fn new(grammar: &'g Grammar) -> TableResult<Self> {
        Self::with_options(grammar, TableOptions::default())
    }

    pub fn with_options(grammar: &'g Grammar, options: TableOptions) -> TableResult<Self> {
        Ok(Self {
            table: LrTable::build_with(grammar, options)?,
        })
    }

    pub fn table(&self) -> &LrTable<'g> {
        &self.table
    }

    pub fn parse(&self, input: &[Symbol]) -> ParseResult<Vec<RuleId>> {
        LrParser::new(&self.table).parse(input)
    }
}
