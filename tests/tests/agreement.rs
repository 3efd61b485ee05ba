use parselab::{derive_leftmost, derive_rightmost, BacktrackParser, Grammar, Lr1Parser, Symbol};
use parselab_tests::{statement_grammar, strings, sum_grammar, terminated};

/// Runs both parsers on every string up to `max_len` and returns how
/// many were accepted.
fn agree(grammar: &Grammar, alphabet: &str, max_len: usize) -> usize {
    let lr = Lr1Parser::new(grammar).unwrap();
    let backtrack = BacktrackParser::new(grammar);

    let mut accepted = 0;

    for input in strings(alphabet, max_len) {
        let symbols = Symbol::split(&input);

        let derivation = backtrack.parse(&symbols);
        let reductions = lr.parse(&terminated(&input));

        assert_eq!(
            derivation.is_ok(),
            reductions.is_ok(),
            "parsers disagree on {input}"
        );

        if let (Ok(derivation), Ok(reductions)) = (derivation, reductions) {
            accepted += 1;

            assert_eq!(derive_leftmost(grammar, &derivation).unwrap(), symbols);
            assert_eq!(derive_rightmost(grammar, &reductions).unwrap(), symbols);
        }
    }

    accepted
}

#[test]
fn test_parsers_agree_on_short_strings() {
    let accepted = agree(&sum_grammar(), "+*ab()", 5);

    // a, a+b, (a), a+b*a, (a*b)...
    assert!(accepted > 20, "only {accepted} strings accepted");
}

#[test]
fn test_parsers_agree_on_statements() {
    let accepted = agree(&statement_grammar(), "itpbd;nm", 5);

    // pn, pm, bpnd, bpmd, intpn, intpm, imtpn, imtpm
    assert_eq!(accepted, 8);
}

#[test]
fn test_statement_derivations() {
    let grammar = statement_grammar();
    let lr = Lr1Parser::new(&grammar).unwrap();
    let backtrack = BacktrackParser::new(&grammar);

    assert_eq!(backtrack.parse(&Symbol::split("bpn;pmd")), Ok(vec![2, 3, 1, 5, 4, 1, 6]));
    assert_eq!(lr.parse(&terminated("bpn;pmd")), Ok(vec![5, 1, 6, 1, 4, 3, 2]));
}
