use itertools::Itertools;

use crate::Symbol;

/// The rule's identifier in the grammar.
///
/// It is the position of the rule in the grammar's rule list, both
/// parsers report their traces with it.
pub type RuleId = usize;

/// Defines a grammar rule
///
/// X := A1..An
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl RuleDef {
    pub fn new<L, I, S>(lhs: L, rhs: I) -> Self
    where
        L: Into<Symbol>,
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a rule whose right-hand side has one symbol per character.
    ///
    /// # Example
    /// `RuleDef::chars("E", "E+T")` is `E -> E + T`.
    pub fn chars(lhs: &str, rhs: &str) -> Self {
        Self {
            lhs: Symbol::new(lhs),
            rhs: Symbol::split(rhs),
        }
    }

    /// The left side is textually identical to the right side (A -> A).
    pub fn is_identity(&self) -> bool {
        matches!(self.rhs.as_slice(), [sym] if *sym == self.lhs)
    }
}

/// A grammar rule
///
/// # Example
/// A -> w
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub id: RuleId,
    pub lhs: Symbol,
    pub rhs: Vec<Symbol>,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) {} -> {}",
            self.id,
            self.lhs,
            self.rhs.iter().join(" ")
        )
    }
}

impl Rule {
    pub(crate) fn from_def(id: RuleId, def: RuleDef) -> Self {
        Self {
            id,
            lhs: def.lhs,
            rhs: def.rhs,
        }
    }

    /// The RHS begins with the LHS (A -> A w).
    pub fn is_left_recursive(&self) -> bool {
        self.rhs.first() == Some(&self.lhs)
    }

    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}
