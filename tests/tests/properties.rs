#![cfg(test)]

use itertools::Itertools as _;
use proptest::prelude::*;

use parselab::{derive_leftmost, derive_rightmost, BacktrackParser, Grammar, Lr1Parser, Symbol};
use parselab_tests::{statement_grammar, sum_grammar, terminated};

/// Expand the leftmost non-terminal with the chosen alternatives, then
/// with the first non-recursive one once the choices run out.
fn sentence(grammar: &Grammar, choices: &[usize]) -> String {
    let mut form = vec![grammar.root().clone()];
    let mut choices = choices.iter();

    while let Some(position) = form.iter().position(|sym| !grammar.is_terminal(sym)) {
        let alternatives = grammar.alternatives(&form[position]);

        let rule = match choices.next() {
            Some(choice) => alternatives[choice % alternatives.len()],
            None => alternatives
                .iter()
                .copied()
                .find(|id| {
                    let rule = &grammar.rules()[*id];
                    rule.rhs.iter().all(|sym| *sym != rule.lhs && *sym != "B")
                })
                .unwrap_or(alternatives[0]),
        };

        form.splice(position..=position, grammar.rules()[rule].rhs.iter().cloned());
    }

    form.iter().join("")
}

proptest! {
    #[test]
    fn sentences_are_accepted_by_both_parsers(choices in prop::collection::vec(0usize..3, 0..12)) {
        let grammar = sum_grammar();
        let input = sentence(&grammar, &choices);
        let symbols = Symbol::split(&input);

        let derivation = BacktrackParser::new(&grammar).parse(&symbols);
        prop_assert!(derivation.is_ok(), "backtracking rejected {}", input);
        prop_assert_eq!(derive_leftmost(&grammar, &derivation.unwrap()).unwrap(), symbols.clone());

        let lr = Lr1Parser::new(&grammar).unwrap();
        let reductions = lr.parse(&terminated(&input));
        prop_assert!(reductions.is_ok(), "LR(1) rejected {}", input);
        prop_assert_eq!(derive_rightmost(&grammar, &reductions.unwrap()).unwrap(), symbols);
    }

    #[test]
    fn parsers_agree_on_random_strings(input in "[+*ab()]{1,7}") {
        let grammar = sum_grammar();

        let derivation = BacktrackParser::new(&grammar).parse(&Symbol::split(&input));
        let reductions = Lr1Parser::new(&grammar).unwrap().parse(&terminated(&input));

        prop_assert_eq!(derivation.is_ok(), reductions.is_ok());
    }

    #[test]
    fn parsers_agree_on_random_statements(input in "[itpbd;nm]{1,8}") {
        let grammar = statement_grammar();
        let symbols = Symbol::split(&input);

        let derivation = BacktrackParser::new(&grammar).parse(&symbols);
        let reductions = Lr1Parser::new(&grammar).unwrap().parse(&terminated(&input));

        prop_assert_eq!(derivation.is_ok(), reductions.is_ok(), "parsers disagree on {}", input);
        if let (Ok(derivation), Ok(reductions)) = (derivation, reductions) {
            prop_assert_eq!(derive_leftmost(&grammar, &derivation).unwrap(), symbols.clone());
            prop_assert_eq!(derive_rightmost(&grammar, &reductions).unwrap(), symbols);
        }
    }

    #[test]
    fn lr_parse_is_deterministic(input in "[+*ab()]{0,8}") {
        let grammar = sum_grammar();
        let lr = Lr1Parser::new(&grammar).unwrap();

        let symbols = terminated(&input);
        prop_assert_eq!(lr.parse(&symbols), lr.parse(&symbols));
    }
}
