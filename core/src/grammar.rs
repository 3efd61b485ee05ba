use std::collections::HashMap;

use itertools::Itertools;
use log::debug;
use prettytable::Table as PtTable;

use crate::{GrammarError, GrammarResult, Rule, RuleDef, RuleId, Symbol, SymbolKind};

/// The caller's description of a grammar.
///
/// # Example
///
/// For the following grammar :
///
/// ```grammar
/// 0. S := E
/// 1. E := E + T
/// 2. E := T
/// 3. T := a
/// ```
///
/// ```
/// use parselab_core::{GrammarSpec, RuleDef};
///
/// let grammar = GrammarSpec::new(
///     "S",
///     ["+", "a", "$"],
///     ["S", "E", "T"],
///     [
///         RuleDef::chars("S", "E"),
///         RuleDef::chars("E", "E+T"),
///         RuleDef::chars("E", "T"),
///         RuleDef::chars("T", "a"),
///     ],
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(grammar.rules().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSpec {
    pub root: Symbol,
    pub terminals: Vec<Symbol>,
    pub non_terminals: Vec<Symbol>,
    pub rules: Vec<RuleDef>,
    pub end_marker: Symbol,
}

impl GrammarSpec {
    pub fn new<R, T, N, D>(root: R, terminals: T, non_terminals: N, rules: D) -> Self
    where
        R: Into<Symbol>,
        T: IntoIterator,
        T::Item: Into<Symbol>,
        N: IntoIterator,
        N::Item: Into<Symbol>,
        D: IntoIterator<Item = RuleDef>,
    {
        Self {
            root: root.into(),
            terminals: terminals.into_iter().map(Into::into).collect(),
            non_terminals: non_terminals.into_iter().map(Into::into).collect(),
            rules: rules.into_iter().collect(),
            end_marker: Symbol::end(),
        }
    }

    /// Replaces the default end-of-input marker (`$`).
    pub fn with_end_marker(mut self, marker: impl Into<Symbol>) -> Self {
        self.end_marker = marker.into();
        self
    }

    pub fn build(self) -> GrammarResult<Grammar> {
        Grammar::new(self)
    }
}

/// A non-terminal and the rules producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminalDef {
    pub symbol: Symbol,
    /// Rules whose left side is the symbol, in grammar order.
    pub alternatives: Vec<RuleId>,
}

impl NonTerminalDef {
    /// Number of alternatives.
    pub fn count(&self) -> usize {
        self.alternatives.len()
    }
}

/// A validated context-free grammar.
///
/// Immutable once built, parsers only borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    root: Symbol,
    end_marker: Symbol,
    rules: Vec<Rule>,
    terminals: Vec<Symbol>,
    /// Right-hand side symbols which are declared nowhere.
    implicit_terminals: Vec<Symbol>,
    non_terminals: Vec<NonTerminalDef>,
    index: HashMap<Symbol, usize>,
}

impl TryFrom<GrammarSpec> for Grammar {
    type Error = GrammarError;

    fn try_from(spec: GrammarSpec) -> Result<Self, Self::Error> {
        Self::new(spec)
    }
}

impl Grammar {
    /// Validates the specification and builds the grammar.
    pub fn new(spec: GrammarSpec) -> GrammarResult<Self> {
        let GrammarSpec {
            root,
            terminals,
            non_terminals,
            rules,
            end_marker,
        } = spec;

        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(id, def)| {
                if def.rhs.is_empty() || def.is_identity() || def.rhs.contains(&end_marker) {
                    Err(GrammarError::InvalidRule {
                        rule: id,
                        lhs: def.lhs,
                        rhs: def.rhs,
                    })
                } else {
                    Ok(Rule::from_def(id, def))
                }
            })
            .collect::<GrammarResult<Vec<_>>>()?;

        let terminals = terminals.into_iter().unique().collect::<Vec<_>>();
        let non_terminals = non_terminals.into_iter().unique().collect::<Vec<_>>();

        let index = non_terminals
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, sym)| (sym, i))
            .collect::<HashMap<_, _>>();

        if let Some(rule) = rules.iter().find(|rule| !index.contains_key(&rule.lhs)) {
            return Err(GrammarError::UnknownLeftSide {
                rule: rule.id,
                symbol: rule.lhs.clone(),
            });
        }

        if let Some(sym) = terminals
            .iter()
            .chain(std::iter::once(&end_marker))
            .find(|sym| index.contains_key(*sym))
        {
            return Err(GrammarError::AmbiguousSymbol(sym.clone()));
        }

        if !index.contains_key(&root) {
            return Err(GrammarError::RootNotNonTerminal(root));
        }

        let non_terminals = non_terminals
            .into_iter()
            .map(|symbol| {
                let alternatives = rules
                    .iter()
                    .filter(|rule| rule.lhs == symbol)
                    .map(|rule| rule.id)
                    .collect::<Vec<_>>();

                if alternatives.is_empty() {
                    Err(GrammarError::UndeclaredNonTerminal(symbol))
                } else {
                    Ok(NonTerminalDef {
                        symbol,
                        alternatives,
                    })
                }
            })
            .collect::<GrammarResult<Vec<_>>>()?;

        let implicit_terminals = rules
            .iter()
            .flat_map(|rule| rule.rhs.iter())
            .filter(|sym| !index.contains_key(*sym) && !terminals.contains(*sym))
            .unique()
            .cloned()
            .collect::<Vec<_>>();

        debug!(
            "grammar rooted at {root}: {} rules, {} terminals ({} implicit), {} non-terminals",
            rules.len(),
            terminals.len() + implicit_terminals.len(),
            implicit_terminals.len(),
            non_terminals.len()
        );

        Ok(Self {
            root,
            end_marker,
            rules,
            terminals,
            implicit_terminals,
            non_terminals,
            index,
        })
    }

    /// Returns the root symbol of the grammar.
    pub fn root(&self) -> &Symbol {
        &self.root
    }

    /// Returns the end-of-input marker.
    pub fn end_marker(&self) -> &Symbol {
        &self.end_marker
    }

    /// All the rules, indexed by their [`RuleId`].
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    /// The declared terminal symbols.
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    /// The declared non-terminal symbols with their alternatives.
    pub fn non_terminals(&self) -> &[NonTerminalDef] {
        &self.non_terminals
    }

    /// Iterate over every terminal: the declared ones, then the symbols
    /// used in right-hand sides but declared nowhere.
    pub fn iter_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.terminals.iter().chain(self.implicit_terminals.iter())
    }

    pub fn iter_non_terminals(&self) -> impl Iterator<Item = &Symbol> {
        self.non_terminals.iter().map(|nt| &nt.symbol)
    }

    /// Returns the position of the symbol among the declared non-terminals.
    pub fn find_non_terminal(&self, symbol: &Symbol) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    pub fn non_terminal(&self, symbol: &Symbol) -> Option<&NonTerminalDef> {
        self.find_non_terminal(symbol)
            .and_then(|i| self.non_terminals.get(i))
    }

    /// Classify a symbol.
    ///
    /// Any symbol which is not a declared non-terminal is a terminal,
    /// including symbols the grammar has never seen.
    pub fn classify(&self, symbol: &Symbol) -> SymbolKind {
        match self.find_non_terminal(symbol) {
            Some(_) => SymbolKind::NonTerminal,
            None => SymbolKind::Terminal,
        }
    }

    #[inline(always)]
    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.classify(symbol) == SymbolKind::Terminal
    }

    /// The rules producing the symbol, empty for a terminal.
    pub fn alternatives(&self, symbol: &Symbol) -> &[RuleId] {
        self.non_terminal(symbol)
            .map(|nt| nt.alternatives.as_slice())
            .unwrap_or_default()
    }

    /// Iterate the rules producing the given symbol.
    pub fn iter_rules_by_symbol<'a>(&'a self, symbol: &Symbol) -> impl Iterator<Item = &'a Rule> {
        self.alternatives(symbol)
            .iter()
            .filter_map(|id| self.rules.get(*id))
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rules = PtTable::new();
        rules.set_titles(["#", "Rule"].into_iter().collect());
        for rule in self.rules.iter() {
            rules.add_row(
                [
                    rule.id.to_string(),
                    format!("{} -> {}", rule.lhs, rule.rhs.iter().join(" ")),
                ]
                .into_iter()
                .collect(),
            );
        }

        let mut non_terminals = PtTable::new();
        non_terminals.set_titles(["Symbol", "Qty of alts", "Alternatives"].into_iter().collect());
        for nt in self.non_terminals.iter() {
            non_terminals.add_row(
                [
                    nt.symbol.to_string(),
                    nt.count().to_string(),
                    format!("[{}]", nt.alternatives.iter().join(" ")),
                ]
                .into_iter()
                .collect(),
            );
        }

        writeln!(f, "Rules:")?;
        write!(f, "{}", rules)?;
        writeln!(f, "Start symbol: {}", self.root)?;
        writeln!(f, "Terminal symbols: {}", self.iter_terminals().join(" "))?;
        writeln!(f, "Non terminal symbols:")?;
        write!(f, "{}", non_terminals)
    }
}
