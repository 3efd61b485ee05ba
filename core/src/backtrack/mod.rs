use log::{debug, trace};

use crate::{
    error::{ParseError, ParseResult},
    report::{NullSink, Step, TraceSink},
    Grammar, RuleId, Symbol, SymbolKind,
};

mod frame;

pub use frame::*;

/// The state of the search automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Moving forward: expanding or matching.
    Normal,
    /// Undoing the last choice.
    Retreat,
    /// The input is recognised.
    End,
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::Normal => write!(f, "normal"),
            Control::Retreat => write!(f, "retreat"),
            Control::End => write!(f, "end"),
        }
    }
}

/// Top-down parser trying the alternatives of each non-terminal in
/// order, and backtracking on mismatches.
///
/// The grammar must not be left-recursive, or the search never ends.
pub struct BacktrackParser<'g> {
    grammar: &'g Grammar,
}

impl<'g> BacktrackParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Returns the rules of the leftmost derivation of the input.
    pub fn parse(&self, input: &[Symbol]) -> ParseResult<Vec<RuleId>> {
        self.parse_with(input, &mut NullSink)
    }

    /// Same as [`parse`](Self::parse), reporting each step to the sink.
    pub fn parse_with<S>(&self, input: &[Symbol], sink: &mut S) -> ParseResult<Vec<RuleId>>
    where
        S: TraceSink + ?Sized,
    {
        let input = self.strip_end_marker(input);

        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let derivation = Search::new(self.grammar, input).run(sink)?;
        debug!("derived {} symbols with {} rules", input.len(), derivation.len());
        Ok(derivation)
    }

    /// Drop a trailing end marker, rules never use it.
    fn strip_end_marker<'i>(&self, input: &'i [Symbol]) -> &'i [Symbol] {
        match input {
            [rest @ .., last] if last == self.grammar.end_marker() => rest,
            _ => input,
        }
    }
}

/// One run of the search over one input.
struct Search<'g, 'i> {
    grammar: &'g Grammar,
    input: &'i [Symbol],
    cursor: usize,
    control: Control,
    committed: Vec<Frame>,
    pending: Spine,
}

impl<'g, 'i> Search<'g, 'i> {
    fn new(grammar: &'g Grammar, input: &'i [Symbol]) -> Self {
        let mut pending = Spine::default();
        pending.push_front(Pending::new(grammar.root().clone(), SymbolKind::NonTerminal));

        Self {
            grammar,
            input,
            cursor: 0,
            control: Control::Normal,
            committed: Vec::default(),
            pending,
        }
    }

    fn step(&self) -> Step<'_> {
        Step {
            control: self.control,
            committed: &self.committed,
            pending: &self.pending,
            remaining: self.input.get(self.cursor..).unwrap_or_default(),
        }
    }

    fn run<S>(mut self, sink: &mut S) -> ParseResult<Vec<RuleId>>
    where
        S: TraceSink + ?Sized,
    {
        sink.on_step(&self.step());

        loop {
            match self.control {
                Control::Normal => self.advance(),
                Control::Retreat => self.retreat()?,
                Control::End => return Ok(self.derivation()),
            }

            sink.on_step(&self.step());
        }
    }

    fn advance(&mut self) {
        let (kind, matches) = match self.pending.front() {
            Some(front) => (front.kind, self.input.get(self.cursor) == Some(&front.symbol)),
            None => {
                self.control = Control::Retreat;
                return;
            }
        };

        match kind {
            SymbolKind::NonTerminal => self.expand(),
            SymbolKind::Terminal if matches => self.consume(),
            SymbolKind::Terminal => self.control = Control::Retreat,
        }
    }

    /// Commit to the first alternative of the front non-terminal.
    fn expand(&mut self) {
        let Some(front) = self.pending.pop_front() else {
            return;
        };

        let alternatives = self.grammar.alternatives(&front.symbol);
        let Some(&first) = alternatives.first() else {
            self.pending.push_front(front);
            self.control = Control::Retreat;
            return;
        };

        trace!("expand {} with rule #{}", front.symbol, first);

        self.committed.push(Frame::NonTerminal {
            symbol: front.symbol,
            alternatives: alternatives.len(),
            current: 1,
        });
        self.pending.extend_front(spine_of(self.grammar, first));
    }

    /// Match the front terminal with the current input symbol.
    fn consume(&mut self) {
        let Some(front) = self.pending.pop_front() else {
            return;
        };

        self.committed.push(Frame::Terminal(front.symbol));
        self.cursor += 1;

        let exhausted = self.cursor >= self.input.len();

        self.control = match (self.pending.is_empty(), exhausted) {
            (true, true) => Control::End,
            (false, false) => Control::Normal,
            _ => Control::Retreat,
        };
    }

    fn retreat(&mut self) -> ParseResult<()> {
        match self.committed.last() {
            None => Err(ParseError::NotInGrammar),
            Some(Frame::Terminal(_)) => {
                self.restore_terminal();
                Ok(())
            }
            Some(Frame::NonTerminal {
                alternatives,
                current,
                ..
            }) if current < alternatives => {
                self.next_alternative();
                Ok(())
            }
            Some(Frame::NonTerminal { symbol, .. })
                if symbol == self.grammar.root() && self.cursor == 0 =>
            {
                Err(ParseError::NotInGrammar)
            }
            Some(Frame::NonTerminal { .. }) => {
                self.restore_non_terminal();
                Ok(())
            }
        }
    }

    /// Give the matched terminal back to the input.
    fn restore_terminal(&mut self) {
        if let Some(Frame::Terminal(symbol)) = self.committed.pop() {
            self.pending.push_front(Pending::new(symbol, SymbolKind::Terminal));
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    /// Swap the current alternative of the top non-terminal for the next one.
    fn next_alternative(&mut self) {
        let grammar = self.grammar;

        if let Some(Frame::NonTerminal {
            symbol, current, ..
        }) = self.committed.last_mut()
        {
            let alternatives = grammar.alternatives(symbol);
            let (previous, next) = (alternatives[*current - 1], alternatives[*current]);
            *current += 1;

            trace!("retry {} with rule #{}", symbol, next);

            self.pending
                .replace_front(grammar.rules()[previous].len(), spine_of(grammar, next));
            self.control = Control::Normal;
        }
    }

    /// Every alternative failed: put the non-terminal back to pending.
    fn restore_non_terminal(&mut self) {
        let grammar = self.grammar;

        if let Some(Frame::NonTerminal {
            symbol, current, ..
        }) = self.committed.pop()
        {
            let rule = grammar.alternatives(&symbol)[current - 1];
            self.pending.replace_front(
                grammar.rules()[rule].len(),
                [Pending::new(symbol, SymbolKind::NonTerminal)],
            );
        }
    }

    /// The chosen rule of every non-terminal frame, root first.
    fn derivation(&self) -> Vec<RuleId> {
        self.committed
            .iter()
            .filter_map(|frame| match frame {
                Frame::NonTerminal {
                    symbol, current, ..
                } => self.grammar.alternatives(symbol).get(current - 1).copied(),
                Frame::Terminal(_) => None,
            })
            .collect()
    }
}

/// Right-hand side of a rule as pending symbols.
fn spine_of(grammar: &Grammar, rule: RuleId) -> Vec<Pending> {
    grammar.rules()[rule]
        .rhs
        .iter()
        .map(|sym| Pending::new(sym.clone(), grammar.classify(sym)))
        .collect()
}
