//! Observation of the backtracking search.
use itertools::Itertools as _;
use prettytable::Table as PtTable;

use crate::{
    backtrack::{Control, Frame, Spine},
    Symbol,
};

/// A snapshot of the search, after a transition.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub control: Control,
    /// Bottom to top.
    pub committed: &'a [Frame],
    pub pending: &'a Spine,
    pub remaining: &'a [Symbol],
}

impl Step<'_> {
    pub fn render_committed(&self) -> String {
        self.committed.iter().join("")
    }

    pub fn render_pending(&self) -> String {
        self.pending.iter().map(|pending| &pending.symbol).join("")
    }

    pub fn render_remaining(&self) -> String {
        self.remaining.iter().join("")
    }
}

/// Receives the steps of a search.
pub trait TraceSink {
    fn on_step(&mut self, step: &Step<'_>);
}

/// Discards every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    #[inline]
    fn on_step(&mut self, _step: &Step<'_>) {}
}

impl<F> TraceSink for F
where
    F: FnMut(&Step<'_>),
{
    fn on_step(&mut self, step: &Step<'_>) {
        self(step)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRow {
    pub control: Control,
    pub committed: String,
    pub pending: String,
    pub remaining: String,
}

/// Records every step as rendered text.
#[derive(Debug, Default, Clone)]
pub struct StepLog {
    rows: Vec<StepRow>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StepRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TraceSink for StepLog {
    fn on_step(&mut self, step: &Step<'_>) {
        self.rows.push(StepRow {
            control: step.control,
            committed: step.render_committed(),
            pending: step.render_pending(),
            remaining: step.render_remaining(),
        })
    }
}

impl std::fmt::Display for StepLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();
        table.set_titles(["State", "L1", "L2", "Input"].into_iter().collect());

        for row in self.rows.iter() {
            table.add_row(
                [
                    row.control.to_string(),
                    row.committed.clone(),
                    row.pending.clone(),
                    row.remaining.clone(),
                ]
                .into_iter()
                .collect(),
            );
        }

        write!(f, "{}", table)
    }
}
