use parselab::{
    BacktrackParser, ConflictPolicy, GrammarError, GrammarSpec, Lr1Parser, LrTable, ParseError,
    RuleDef, Symbol, TableError, TableOptions,
};
use parselab_tests::{expression_grammar, sum_grammar};

#[test]
fn test_empty_inputs() {
    let grammar = sum_grammar();
    let lr = Lr1Parser::new(&grammar).unwrap();
    let backtrack = BacktrackParser::new(&grammar);

    assert_eq!(backtrack.parse(&[]), Err(ParseError::EmptyInput));
    assert_eq!(lr.parse(&[]), Err(ParseError::UnterminatedInput("$".into())));
    assert!(matches!(
        lr.parse(&Symbol::split("$")),
        Err(ParseError::UnexpectedSymbol { position: 0, state: 0, .. })
    ));
}

#[test]
fn test_single_symbol_inputs() {
    let grammar = sum_grammar();
    let lr = Lr1Parser::new(&grammar).unwrap();
    let backtrack = BacktrackParser::new(&grammar);

    assert_eq!(backtrack.parse(&Symbol::split("a")), Ok(vec![1, 2, 4]));
    assert_eq!(lr.parse(&Symbol::split("a$")), Ok(vec![4, 2, 1]));

    assert_eq!(backtrack.parse(&Symbol::split("+")), Err(ParseError::NotInGrammar));
    assert!(lr.parse(&Symbol::split("+$")).is_err());
}

#[test]
fn test_grammar_validation() {
    // A terminal on a left side.
    let err = GrammarSpec::new(
        "S",
        ["a"],
        ["S"],
        [RuleDef::chars("S", "a"), RuleDef::chars("a", "S")],
    )
    .build()
    .unwrap_err();
    assert_eq!(err, GrammarError::UnknownLeftSide { rule: 1, symbol: "a".into() });

    // A symbol in both lists.
    let err = GrammarSpec::new("S", ["a", "S"], ["S"], [RuleDef::chars("S", "a")])
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::AmbiguousSymbol("S".into()));

    // The root is a terminal.
    let err = GrammarSpec::new("a", ["a"], ["S"], [RuleDef::chars("S", "a")])
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::RootNotNonTerminal("a".into()));

    // An empty right-hand side.
    let err = GrammarSpec::new("S", ["a"], ["S"], [RuleDef::new("S", Vec::<Symbol>::new())])
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidRule { rule: 0, .. }));

    // The end marker is reserved.
    let err = GrammarSpec::new("S", ["a", "$"], ["S"], [RuleDef::chars("S", "a$")])
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidRule { rule: 0, .. }));
}

#[test]
fn test_input_after_end_marker() {
    let grammar = sum_grammar();
    let lr = Lr1Parser::new(&grammar).unwrap();
    let backtrack = BacktrackParser::new(&grammar);

    for input in ["a$b$", "a$+$"] {
        assert!(
            matches!(
                lr.parse(&Symbol::split(input)),
                Err(ParseError::UnexpectedSymbol { position: 2, .. })
            ),
            "{input} accepted"
        );
        assert_eq!(backtrack.parse(&Symbol::split(input)), Err(ParseError::NotInGrammar));
    }
}

#[test]
fn test_custom_end_marker() {
    let grammar = GrammarSpec::new(
        "S",
        ["a", "b"],
        ["S"],
        [RuleDef::chars("S", "aS"), RuleDef::chars("S", "b")],
    )
    .with_end_marker("#")
    .build()
    .unwrap();

    let lr = Lr1Parser::new(&grammar).unwrap();
    assert_eq!(lr.parse(&Symbol::split("aab#")), Ok(vec![1, 0, 0]));
    assert_eq!(
        lr.parse(&Symbol::split("aab$")),
        Err(ParseError::UnterminatedInput("#".into()))
    );

    let backtrack = BacktrackParser::new(&grammar);
    assert_eq!(backtrack.parse(&Symbol::split("aab#")), Ok(vec![0, 0, 1]));
}

#[test]
fn test_non_lr1_grammar() {
    let grammar = GrammarSpec::new(
        "E",
        ["*", "a"],
        ["E"],
        [RuleDef::chars("E", "E*E"), RuleDef::chars("E", "a")],
    )
    .build()
    .unwrap();

    assert!(matches!(
        LrTable::build(&grammar),
        Err(TableError::ShiftReduceConflict { .. })
    ));

    let options = TableOptions::default().with_conflicts(ConflictPolicy::LastWriteWins);
    assert!(LrTable::build_with(&grammar, options).is_ok());
}

#[test]
fn test_tables_are_deterministic() {
    let grammar = expression_grammar();

    let a = LrTable::build(&grammar).unwrap();
    let b = LrTable::build(&grammar).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(a.rows().collect::<Vec<_>>(), b.rows().collect::<Vec<_>>());
}
