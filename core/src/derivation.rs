//! Replay of parser traces into sentential forms.
use crate::{error::ReplayError, Grammar, RuleId, Symbol};

#[derive(Clone, Copy)]
enum Side {
    Leftmost,
    Rightmost,
}

/// Apply a leftmost derivation from the root symbol.
///
/// The backtracking parser's result replays to its input.
pub fn derive_leftmost(grammar: &Grammar, derivation: &[RuleId]) -> Result<Vec<Symbol>, ReplayError> {
    replay(grammar, derivation.iter().copied(), Side::Leftmost)
}

/// Apply the reverse of a reduction trace, rewriting the rightmost
/// non-terminal each time.
///
/// The LR parser's result replays to its input, end marker excluded.
pub fn derive_rightmost(grammar: &Grammar, reductions: &[RuleId]) -> Result<Vec<Symbol>, ReplayError> {
    replay(grammar, reductions.iter().rev().copied(), Side::Rightmost)
}

fn replay<I>(grammar: &Grammar, rules: I, side: Side) -> Result<Vec<Symbol>, ReplayError>
where
    I: Iterator<Item = RuleId>,
{
    let mut form = vec![grammar.root().clone()];

    for (step, id) in rules.enumerate() {
        let rule = grammar.rule(id).ok_or(ReplayError::UnknownRule(id))?;

        let position = match side {
            Side::Leftmost => form.iter().position(|sym| !grammar.is_terminal(sym)),
            Side::Rightmost => form.iter().rposition(|sym| !grammar.is_terminal(sym)),
        }
        .ok_or(ReplayError::Exhausted { step, rule: id })?;

        if form[position] != rule.lhs {
            return Err(ReplayError::Mismatch {
                step,
                rule: id,
                expected: rule.lhs.clone(),
                found: form[position].clone(),
            });
        }

        form.splice(position..=position, rule.rhs.iter().cloned());
    }

    Ok(form)
}
