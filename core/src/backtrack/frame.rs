use crate::{Symbol, SymbolKind};

/// An entry of the committed stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A terminal matched against the input.
    Terminal(Symbol),
    /// A non-terminal being tried with its `current` alternative, counted
    /// from 1.
    NonTerminal {
        symbol: Symbol,
        alternatives: usize,
        current: usize,
    },
}

impl Frame {
    pub fn symbol(&self) -> &Symbol {
        match self {
            Frame::Terminal(symbol) => symbol,
            Frame::NonTerminal { symbol, .. } => symbol,
        }
    }
}

/// Non-terminals carry the number of the alternative being tried,
/// as a subscript (T₂).
impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frame::Terminal(symbol) => write!(f, "{}", symbol),
            Frame::NonTerminal {
                symbol, current, ..
            } => write!(f, "{}{}", symbol, subscript(*current)),
        }
    }
}

fn subscript(n: usize) -> String {
    const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGITS[d as usize])
        .collect()
}

/// A symbol awaiting to be expanded or matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub symbol: Symbol,
    pub kind: SymbolKind,
}

impl Pending {
    pub fn new(symbol: Symbol, kind: SymbolKind) -> Self {
        Self { symbol, kind }
    }
}

/// The stack of pending symbols.
///
/// Its front is the next symbol to process, stored at the end of the
/// underlying vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spine(Vec<Pending>);

impl Spine {
    pub fn front(&self) -> Option<&Pending> {
        self.0.last()
    }

    pub fn pop_front(&mut self) -> Option<Pending> {
        self.0.pop()
    }

    pub fn push_front(&mut self, pending: Pending) {
        self.0.push(pending)
    }

    /// Push the symbols so that the first one becomes the front.
    pub fn extend_front<I>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = Pending>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.0.extend(symbols.into_iter().rev())
    }

    /// Drop `len` symbols from the front, then push `symbols` in their place.
    pub fn replace_front<I>(&mut self, len: usize, symbols: I)
    where
        I: IntoIterator<Item = Pending>,
        I::IntoIter: DoubleEndedIterator,
    {
        self.0.truncate(self.0.len().saturating_sub(len));
        self.extend_front(symbols)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate from the front.
    pub fn iter(&self) -> impl Iterator<Item = &Pending> {
        self.0.iter().rev()
    }
}
