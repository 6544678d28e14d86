/*
    This module answers read-only queries about a grammar's nonterminals

    Both queries work over single-upper-case-letter names only, the
    shape input grammars declare. Multi-character names introduced by
    the transformation ("Ca", "D1", ...) are neither followed nor
    reported, so reachability is only meaningful on a grammar that has
    not been transformed yet. This is a known limitation carried over
    from the traversal's character-keyed result set.
*/

use std::collections::{BTreeSet, VecDeque};

use crate::grammar::{Grammar, Symbol};

fn single_upper(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

// All single-letter nonterminals currently declared, whether or not
// any production mentions them
pub fn declared_nonterminals(grammar: &Grammar) -> BTreeSet<char> {
    grammar.nonterminals.iter()
        .filter_map(|name| single_upper(name))
        .collect()
}

// Breadth-first closure over the nonterminals reachable from the start
// symbol. Empty if there is no start symbol or it is not upper-case.
pub fn reachable_nonterminals(grammar: &Grammar) -> BTreeSet<char> {
    let mut reachable = BTreeSet::new();

    let Some(start) = grammar.start_symbol.chars().next() else {
        return reachable;
    };
    if !start.is_ascii_uppercase() {
        return reachable;
    }

    let mut queue = VecDeque::new();
    reachable.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let lhs = current.to_string();
        for production in &grammar.productions {
            if production.lhs != lhs {
                continue;
            }
            for symbol in &production.rhs {
                let Symbol::Nonterminal(name) = symbol else { continue };
                if let Some(c) = single_upper(name) {
                    if reachable.insert(c) {
                        queue.push_back(c);
                    }
                }
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;
    use crate::transformer;
    use std::path::PathBuf;

    fn load(text: &str) -> Grammar {
        parser::parse_reader(text.as_bytes(), PathBuf::from("test.gra")).unwrap()
    }

    #[test]
    fn unreferenced_nonterminal_is_declared_but_not_reachable() {
        let grammar = load("3\na\nb\nc\n4\nS\nA\nB\nC\n4\nS AB\nA a\nB b\nC c\n");

        assert_eq!(reachable_nonterminals(&grammar), BTreeSet::from(['S', 'A', 'B']));
        assert_eq!(declared_nonterminals(&grammar), BTreeSet::from(['S', 'A', 'B', 'C']));
    }

    #[test]
    fn reachability_follows_chains() {
        let grammar = load("1\na\n3\nS\nA\nB\n3\nS AA\nA BB\nB a\n");

        assert_eq!(reachable_nonterminals(&grammar), BTreeSet::from(['S', 'A', 'B']));
    }

    #[test]
    fn empty_start_symbol_yields_empty_set() {
        let mut grammar = load("1\na\n1\nS\n1\nS a\n");
        grammar.start_symbol.clear();

        assert_eq!(reachable_nonterminals(&grammar), BTreeSet::new());
    }

    #[test]
    fn generated_names_are_not_reported() {
        let mut grammar = load("2\na\nb\n1\nS\n2\nS aSb\nS ab\n");
        transformer::transform(&mut grammar);

        // "Ca", "Cb" and "D1" exist now but only single letters appear
        assert_eq!(declared_nonterminals(&grammar), BTreeSet::from(['S']));
        assert_eq!(reachable_nonterminals(&grammar), BTreeSet::from(['S']));
    }
}
