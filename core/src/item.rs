use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{FirstSets, Grammar, Rule, RuleId, Symbol};

/// Identifier of an item set, which is also the LR state it becomes.
pub type StateId = usize;

/// The rule an item is progressing through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemRule {
    /// The augmented start rule S' -> root.
    Start,
    Rule(RuleId),
}

/// An LR(1) item.
///
/// # Example
/// [A -> w • v, a]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub rule: ItemRule,
    pub position: usize,
    pub lookahead: Symbol,
}

impl Item {
    pub fn new(rule: ItemRule, lookahead: Symbol) -> Self {
        Self {
            rule,
            position: 0,
            lookahead,
        }
    }

    /// Returns the current symbol.
    /// If A -> w •, then returns None.
    pub fn symbol<'r>(&self, rules: &'r AugmentedGrammar<'_>) -> Option<&'r Symbol> {
        rules.rule(self.rule).rhs.get(self.position)
    }

    /// Check if we reached the end of a rule.
    ///
    /// # Example
    /// A -> w •
    pub fn is_exhausted(&self, rules: &AugmentedGrammar<'_>) -> bool {
        self.position >= rules.rule(self.rule).len()
    }

    /// Returns the item with the dot moved over the current symbol.
    ///
    /// # Example
    /// (A -> • w v).next() -> (A -> w • v)
    pub fn next(&self) -> Self {
        Self {
            rule: self.rule,
            position: self.position + 1,
            lookahead: self.lookahead.clone(),
        }
    }

    /// What may follow the current symbol: the rest of the rule, then
    /// the lookahead.
    ///
    /// # Example
    /// [A -> w • B v, a] gives `v a`.
    pub fn continuation(&self, rules: &AugmentedGrammar<'_>) -> Vec<Symbol> {
        let rhs = &rules.rule(self.rule).rhs;

        rhs.iter()
            .skip(self.position + 1)
            .chain(std::iter::once(&self.lookahead))
            .cloned()
            .collect()
    }

    pub fn render(&self, rules: &AugmentedGrammar<'_>) -> String {
        let rule = rules.rule(self.rule);
        let mut rhs = rule
            .rhs
            .iter()
            .enumerate()
            .map(|(pos, sym)| {
                if pos == self.position {
                    format!("• {}", sym)
                } else {
                    sym.to_string()
                }
            })
            .join(" ");

        if self.is_exhausted(rules) {
            rhs.push_str(" •")
        }

        format!("[{} -> {}, {}]", rule.lhs, rhs, self.lookahead)
    }
}

/// A set of items.
///
/// The kernel is the original set of items before closure.
/// `items` holds the whole closure, kernel included.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    pub id: StateId,
    kernel: BTreeSet<Item>,
    items: BTreeSet<Item>,
}

/// Compares kernel sets.
///
/// The closure is a function of the kernel, equal kernels give equal sets.
impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        self.kernel.eq(&other.kernel)
    }
}

impl Eq for ItemSet {}

impl ItemSet {
    pub fn kernel(&self) -> &BTreeSet<Item> {
        &self.kernel
    }

    /// Iterate over all items within the set.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    /// Moves the dot over the symbol in every item expecting it.
    ///
    /// The result is the kernel of the set reached by the symbol.
    pub fn advance(&self, symbol: &Symbol, rules: &AugmentedGrammar<'_>) -> BTreeSet<Item> {
        self.iter()
            .filter(|item| item.symbol(rules) == Some(symbol))
            .map(Item::next)
            .collect()
    }

    pub fn render(&self, rules: &AugmentedGrammar<'_>) -> String {
        format!(
            "#{}{{{}}}",
            self.id,
            self.iter().map(|item| item.render(rules)).join(", ")
        )
    }
}

/// A grammar extended with the start rule S' -> root.
///
/// The start rule is not part of the grammar's rule list, rule
/// identifiers are left untouched.
#[derive(Debug)]
pub struct AugmentedGrammar<'g> {
    grammar: &'g Grammar,
    start: Rule,
    first: FirstSets<'g>,
}

impl<'g> AugmentedGrammar<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let root = grammar.root();

        Self {
            grammar,
            start: Rule {
                id: grammar.rules().len(),
                lhs: Symbol::new(format!("{}'", root)),
                rhs: vec![root.clone()],
            },
            first: FirstSets::new(grammar),
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn rule(&self, rule: ItemRule) -> &Rule {
        match rule {
            ItemRule::Start => &self.start,
            ItemRule::Rule(id) => &self.grammar.rules()[id],
        }
    }

    /// Returns the start item set (#0): the closure of [S' -> • root, $].
    pub fn start_item_set(&self) -> ItemSet {
        self.closure(BTreeSet::from_iter([Item::new(
            ItemRule::Start,
            self.grammar.end_marker().clone(),
        )]))
    }

    /// Close the item set
    ///
    /// Every item expecting a non-terminal B brings [B -> • w, b] for each
    /// rule of B and each b in FIRST of the item's continuation, until no
    /// item is added.
    pub fn closure(&self, kernel: BTreeSet<Item>) -> ItemSet {
        let mut items = kernel.clone();
        let mut stack = kernel.iter().cloned().collect::<Vec<_>>();

        while let Some(item) = stack.pop() {
            let Some(symbol) = item.symbol(self) else {
                continue;
            };

            if self.grammar.is_terminal(symbol) {
                continue;
            }

            let lookaheads = self.first.first(&item.continuation(self));

            for rule in self.grammar.alternatives(symbol) {
                for lookahead in lookaheads.iter() {
                    let item = Item::new(ItemRule::Rule(*rule), lookahead.clone());
                    if !items.contains(&item) {
                        items.insert(item.clone());
                        stack.push(item);
                    }
                }
            }
        }

        ItemSet {
            id: 0,
            kernel,
            items,
        }
    }

    /// The set reached from `set` by reading `symbol`.
    ///
    /// Empty if no item of the set expects the symbol.
    pub fn goto(&self, set: &ItemSet, symbol: &Symbol) -> ItemSet {
        self.closure(set.advance(symbol, self))
    }
}
