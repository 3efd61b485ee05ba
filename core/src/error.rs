use itertools::Itertools as _;
use thiserror::Error;

use crate::{lr::Action, RuleId, StateId, Symbol};

/// A list of symbols the parser would have accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSymbols(pub Vec<Symbol>);

impl std::fmt::Display for ExpectedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(", ").fmt(f)
    }
}

/// Errors raised while building a [`Grammar`](crate::Grammar).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("wrong rule #{rule}: {lhs} -> {}", .rhs.iter().join(" "))]
    InvalidRule {
        rule: RuleId,
        lhs: Symbol,
        rhs: Vec<Symbol>,
    },

    #[error("rule #{rule} produces {symbol} which is not a declared non-terminal")]
    UnknownLeftSide { rule: RuleId, symbol: Symbol },

    #[error("{0} is declared both as a terminal and a non-terminal")]
    AmbiguousSymbol(Symbol),

    #[error("the root symbol {0} is not a declared non-terminal")]
    RootNotNonTerminal(Symbol),

    #[error("this non-terminal is not in the rules: {0}")]
    UndeclaredNonTerminal(Symbol),
}

/// Errors raised while building an LR(1) table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("a shift-reduce conflict has occurred for symbol {symbol} [{}, {}], state={state}", .conflict[0], .conflict[1])]
    ShiftReduceConflict {
        state: StateId,
        symbol: Symbol,
        conflict: [Action; 2],
    },

    #[error("a reduce-reduce conflict has occurred for symbol {symbol} [{}, {}], state={state}", .conflict[0], .conflict[1])]
    ReduceReduceConflict {
        state: StateId,
        symbol: Symbol,
        conflict: [Action; 2],
    },
}

/// Errors raised by the parsers for one input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected symbol {symbol} at position {position} in state {state}, expecting {expected}")]
    UnexpectedSymbol {
        position: usize,
        state: StateId,
        symbol: Symbol,
        expected: ExpectedSymbols,
    },

    #[error("the input is not terminated by the end marker {0}")]
    UnterminatedInput(Symbol),

    #[error("the input string does not belong to the grammar")]
    NotInGrammar,

    #[error("the input string is empty")]
    EmptyInput,
}

impl ParseError {
    pub fn unexpected_symbol<I>(position: usize, state: StateId, symbol: &Symbol, expecting: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        Self::UnexpectedSymbol {
            position,
            state,
            symbol: symbol.clone(),
            expected: ExpectedSymbols(expecting.into_iter().collect()),
        }
    }
}

/// Errors raised while replaying a derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("unknown rule {0}")]
    UnknownRule(RuleId),

    #[error("step {step}: rule #{rule} rewrites {expected} but the sentential form holds {found}")]
    Mismatch {
        step: usize,
        rule: RuleId,
        expected: Symbol,
        found: Symbol,
    },

    #[error("step {step}: rule #{rule} has no non-terminal left to rewrite")]
    Exhausted { step: usize, rule: RuleId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

pub type GrammarResult<T> = Result<T, GrammarError>;
pub type TableResult<T> = Result<T, TableError>;
pub type ParseResult<T> = Result<T, ParseError>;
pub type Result<T, E = Error> = std::result::Result<T, E>;
