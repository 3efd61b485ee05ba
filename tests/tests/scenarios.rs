use parselab::{
    derive_leftmost, derive_rightmost, BacktrackParser, GrammarError, GrammarSpec, Lr1Parser,
    ParseError, RuleDef, Symbol,
};
use parselab_tests::{expression_grammar, sum_grammar, terminated};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_lr1_accepts_nested_expression() {
    init();
    let grammar = expression_grammar();
    let parser = Lr1Parser::new(&grammar).expect("the expression grammar is LR(1)");

    let trace = parser.parse(&Symbol::split("(a+a)*a*a$")).unwrap();

    let last = grammar.rule(*trace.last().unwrap()).unwrap();
    assert_eq!(last.lhs, "S");
    assert_eq!(
        derive_rightmost(&grammar, &trace).unwrap(),
        Symbol::split("(a+a)*a*a")
    );
}

#[test]
fn test_backtracking_derives_sum() {
    init();
    let grammar = sum_grammar();
    let parser = BacktrackParser::new(&grammar);

    let derivation = parser.parse(&Symbol::split("a+b")).unwrap();

    let rules = derivation
        .iter()
        .map(|id| grammar.rule(*id).unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        rules,
        [
            "(0) B -> T + B",
            "(2) T -> M",
            "(4) M -> a",
            "(1) B -> T",
            "(2) T -> M",
            "(5) M -> b",
        ]
    );
    assert_eq!(derive_leftmost(&grammar, &derivation).unwrap(), Symbol::split("a+b"));
}

#[test]
fn test_non_terminal_without_rules() {
    let result = GrammarSpec::new(
        "S",
        ["a"],
        ["S", "X"],
        [RuleDef::chars("S", "a")],
    )
    .build();

    assert_eq!(result, Err(GrammarError::UndeclaredNonTerminal("X".into())));
}

#[test]
fn test_identity_rule() {
    let result = GrammarSpec::new("A", ["a"], ["A"], [RuleDef::chars("A", "A")]).build();

    assert!(matches!(result, Err(GrammarError::InvalidRule { rule: 0, .. })));
}

#[test]
fn test_backtracking_rejects_foreign_symbol() {
    let grammar = sum_grammar();
    let parser = BacktrackParser::new(&grammar);

    assert_eq!(parser.parse(&Symbol::split("z")), Err(ParseError::NotInGrammar));
    assert_eq!(parser.parse(&Symbol::split("a+z")), Err(ParseError::NotInGrammar));
}

#[test]
fn test_both_parsers_on_the_same_grammar() {
    let grammar = sum_grammar();
    let lr = Lr1Parser::new(&grammar).expect("the sum grammar is LR(1)");
    let backtrack = BacktrackParser::new(&grammar);

    let input = "(a+b)*a";
    let reductions = lr.parse(&terminated(input)).unwrap();
    let derivation = backtrack.parse(&Symbol::split(input)).unwrap();

    // Same tree, visited in different orders.
    let mut a = reductions.clone();
    let mut b = derivation.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b);

    // The trailing end marker is optional for the backtracking parser.
    assert_eq!(backtrack.parse(&terminated(input)), Ok(derivation));
}
