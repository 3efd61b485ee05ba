pub use crate::lr::traits::LrTable as _;
pub use crate::{
    BacktrackParser, Grammar, GrammarSpec, Lr1Parser, LrParser, LrTable, RuleDef, RuleId, Symbol,
    TableOptions, TraceSink,
};
