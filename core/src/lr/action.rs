use crate::{RuleId, StateId};

/// An entry of the ACTION table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    Shift(StateId),
    Reduce(RuleId),
    Accept,
}

impl Action {
    pub fn is_shift(&self) -> bool {
        matches!(self, Self::Shift(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(to) => write!(f, "s{}", to),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::Accept => write!(f, "acc"),
        }
    }
}
