//! Grammars and inputs shared by the integration tests.
use itertools::Itertools as _;
use parselab::{Grammar, GrammarSpec, RuleDef, Symbol};

/// Arithmetic expressions, left-recursive. LR(1) only.
pub fn expression_grammar() -> Grammar {
    GrammarSpec::new(
        "S",
        ["+", "*", "a", "(", ")", "$"],
        ["E", "T", "F", "S"],
        [
            RuleDef::chars("S", "E"),
            RuleDef::chars("E", "E+T"),
            RuleDef::chars("E", "T"),
            RuleDef::chars("T", "T*F"),
            RuleDef::chars("T", "F"),
            RuleDef::chars("F", "(E)"),
            RuleDef::chars("F", "a"),
        ],
    )
    .build()
    .expect("cannot build the expression grammar")
}

/// Sums of products, right-recursive. Both parsers accept it.
pub fn sum_grammar() -> Grammar {
    parselab::grammar! {
        root: B,
        terminals: ["+", "*", a, b],
        non_terminals: [B, T, M],
        rules: {
            B => [T "+" B],
            B => [T],
            T => [M],
            T => [M "*" T],
            M => [a],
            M => [b],
            M => ["(" B ")"],
        }
    }
    .build()
    .expect("cannot build the sum grammar")
}

/// Nested statements, right-recursive lists. Both parsers accept it.
///
/// `i` if, `t` then, `p` print, `b`/`d` block delimiters, `n`/`m` operands.
pub fn statement_grammar() -> Grammar {
    GrammarSpec::new(
        "S",
        ["i", "t", "p", "b", "d", ";", "n", "m"],
        ["S", "L", "E"],
        [
            RuleDef::chars("S", "iEtS"),
            RuleDef::chars("S", "pE"),
            RuleDef::chars("S", "bLd"),
            RuleDef::chars("L", "S;L"),
            RuleDef::chars("L", "S"),
            RuleDef::chars("E", "n"),
            RuleDef::chars("E", "m"),
        ],
    )
    .build()
    .expect("cannot build the statement grammar")
}

/// Appends the end marker.
pub fn terminated(input: &str) -> Vec<Symbol> {
    Symbol::split(&format!("{input}$"))
}

/// Every string over the alphabet, up to the given length.
pub fn strings(alphabet: &str, max_len: usize) -> impl Iterator<Item = String> + '_ {
    (1..=max_len).flat_map(move |len| {
        (0..len)
            .map(move |_| alphabet.chars())
            .multi_cartesian_product()
            .map(|chars| chars.into_iter().collect::<String>())
    })
}

#[cfg(test)]
mod tests {
    use super::strings;

    #[test]
    fn test_strings() {
        assert_eq!(strings("ab", 2).collect::<Vec<_>>(), ["a", "b", "aa", "ab", "ba", "bb"]);
        assert_eq!(strings("+*ab()", 4).count(), 6 + 36 + 216 + 1296);
    }
}
