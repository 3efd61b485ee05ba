use std::{borrow::Borrow, sync::Arc};

/// The default end-of-input marker.
pub const END_MARKER: &str = "$";

/// Kind of a grammar symbol.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Terminal => write!(f, "terminal"),
            SymbolKind::NonTerminal => write!(f, "non-terminal"),
        }
    }
}

/// An atomic grammar symbol.
///
/// A symbol is only an identifier, its kind is decided by the grammar
/// it is used with (see [`Grammar::classify`](crate::Grammar::classify)).
/// Cloning is cheap, the identifier is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The default end-of-input marker (`$`).
    pub fn end() -> Self {
        Self::new(END_MARKER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a string into one symbol per character.
    ///
    /// # Example
    /// `"(a+a)$"` gives `(`, `a`, `+`, `a`, `)`, `$`.
    pub fn split(value: &str) -> Vec<Symbol> {
        value.chars().map(Symbol::from).collect()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self::new(value.encode_utf8(&mut [0; 4]))
    }
}

impl From<&Symbol> for Symbol {
    fn from(value: &Symbol) -> Self {
        value.clone()
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
