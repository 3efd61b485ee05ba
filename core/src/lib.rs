//! Context-free grammars and two parsers over them: a canonical LR(1)
//! table-driven parser, and a backtracking top-down parser.
pub mod backtrack;
pub mod derivation;
pub mod error;
pub mod first;
pub mod grammar;
pub mod item;
pub mod lr;
pub mod prelude;
pub mod report;
pub mod rule;
pub mod symbol;

pub use backtrack::{BacktrackParser, Control, Frame};
pub use derivation::{derive_leftmost, derive_rightmost};
pub use error::*;
pub use first::FirstSets;
pub use grammar::{Grammar, GrammarSpec, NonTerminalDef};
pub use item::{Item, ItemRule, ItemSet, StateId};
pub use lr::{Action, ConflictPolicy, Lr1Parser, LrParser, LrTable, TableOptions};
pub use report::{NullSink, Step, StepLog, TraceSink};
pub use rule::*;
pub use symbol::*;

/// Creates a symbol from an identifier, or a string or char literal.
#[macro_export]
macro_rules! sym {
    ($sym:ident) => {
        $crate::Symbol::new(stringify!($sym))
    };
    ($sym:literal) => {
        $crate::Symbol::from($sym)
    };
}

/// Creates a rule definition.
///
/// # Example
/// ```
/// use parselab_core::rule;
///
/// let rule = rule!(E => E "+" T);
/// assert_eq!(rule.rhs.len(), 3);
/// ```
#[macro_export]
macro_rules! rule {
    ($lhs:tt => $($rhs:tt)+) => {
        $crate::RuleDef::new($crate::sym!($lhs), [$($crate::sym!($rhs)),+])
    };
}

/// Creates a grammar specification.
///
/// # Example
/// ```
/// use parselab_core::grammar;
///
/// let grammar = grammar! {
///     root: S,
///     terminals: ["+", a],
///     non_terminals: [S, E],
///     rules: {
///         S => [E],
///         E => [a "+" E],
///         E => [a],
///     }
/// }
/// .build()
/// .unwrap();
///
/// assert_eq!(grammar.alternatives(&"E".into()), &[1, 2]);
/// ```
#[macro_export]
macro_rules! grammar {
    (
        root: $root:tt,
        terminals: [$($term:tt),* $(,)?],
        non_terminals: [$($nterm:tt),* $(,)?],
        rules: { $($lhs:tt => [$($rhs:tt)+]),* $(,)? } $(,)?
    ) => {{
        let terminals: Vec<$crate::Symbol> = vec![$($crate::sym!($term)),*];
        let non_terminals: Vec<$crate::Symbol> = vec![$($crate::sym!($nterm)),*];
        let rules: Vec<$crate::RuleDef> = vec![$($crate::rule!($lhs => $($rhs)+)),*];

        $crate::GrammarSpec::new($crate::sym!($root), terminals, non_terminals, rules)
    }};
}
